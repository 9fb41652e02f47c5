#![deny(missing_docs)]
//! chatmark core: pure classification of links, virtual commands and code tags,
//! plus markdown parsing options.

/// Reserved in-app link paths.
pub mod action;
/// Code node dispatch.
pub mod code;
/// Virtual command decoding.
pub mod command;
/// Core error types.
pub mod error;
/// Icon identifiers.
pub mod icon;
/// Code-fence language normalization.
pub mod language;
/// Link classification.
pub mod link;
/// Tokenizer options and the parse pipeline.
pub mod parse;

pub use action::{ClickOutcome, DialogKind, intercept};
pub use code::{CodeDispatch, dispatch};
pub use command::{VIRTUAL_PREFIX, VirtualCommand, decode, icon_for};
pub use error::{ChatmarkError, SourceLocation};
pub use icon::Icon;
pub use language::{canonical_language, language_from_class, language_from_info};
pub use link::{HostMatch, LinkKind, SocialPlatform, classify, classify_strict, sanitize_url};
pub use parse::{AstTransform, ParseOptions, ParserPipeline, parse_mdast};
