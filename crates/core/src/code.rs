//! Code node dispatch.
//!
//! Decides how a code node renders from its language tag and whether it is
//! inline. `file` and `progress` are widget tags and are checked first, so
//! they never reach the highlighter.

use crate::language::canonical_language;

/// Language tag of embedded file widgets.
pub const FILE_TAG: &str = "file";
/// Language tag of progress bar widgets.
pub const PROGRESS_TAG: &str = "progress";

/// Rendering route for a code node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeDispatch {
    /// Hand the raw content to the file-block widget renderer.
    FileBlock,
    /// Hand the raw content to the progress-bar widget renderer.
    ProgressBar,
    /// Syntax-highlighted block.
    Highlighted {
        /// Lower-cased tag shown in the block header.
        label: String,
        /// Alias-mapped name handed to the highlighter.
        language: String,
    },
    /// Plain inline code styling, content unchanged.
    Plain,
}

/// Routes a code node. `tag` must already be lower-cased; empty means absent.
///
/// # Examples
///
/// ```
/// use chatmark_core::code::{dispatch, CodeDispatch};
///
/// assert_eq!(dispatch("file", true), CodeDispatch::FileBlock);
/// assert_eq!(
///     dispatch("ts", false),
///     CodeDispatch::Highlighted { label: "ts".into(), language: "typescript".into() },
/// );
/// assert_eq!(dispatch("", false), CodeDispatch::Plain);
/// ```
pub fn dispatch(tag: &str, inline: bool) -> CodeDispatch {
    match tag {
        FILE_TAG => CodeDispatch::FileBlock,
        PROGRESS_TAG => CodeDispatch::ProgressBar,
        "" => CodeDispatch::Plain,
        _ if inline => CodeDispatch::Plain,
        _ => CodeDispatch::Highlighted {
            label: tag.to_string(),
            language: canonical_language(tag).to_string(),
        },
    }
}

/// Content handed to the highlighter and the copy button: one trailing newline removed.
pub fn highlight_content(content: &str) -> &str {
    content.strip_suffix('\n').unwrap_or(content)
}
