//! syntect-backed [`Highlighter`].

use super::{HighlightRequest, Highlighter};
use html_escape::{encode_double_quoted_attribute, encode_text};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Class-based HTML highlighting with syntect's bundled syntaxes.
///
/// Colors come from a stylesheet generated for the host theme; the output
/// only carries scope classes.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
}

impl SyntectHighlighter {
    /// Loads the bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn find_syntax(&self, language: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_token(language)
            .or_else(|| {
                self.syntax_set
                    .syntaxes()
                    .iter()
                    .find(|syntax| syntax.name.eq_ignore_ascii_case(language))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    fn highlight_lines(&self, content: &str, language: &str) -> Option<String> {
        let syntax = self.find_syntax(language);
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(content) {
            if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
                log::warn!("highlighting {language} failed, falling back to plain text: {err}");
                return None;
            }
        }
        Some(generator.finalize())
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, request: &HighlightRequest<'_>) -> String {
        let body = self
            .highlight_lines(request.content, request.language)
            .unwrap_or_else(|| encode_text(request.content).into_owned());

        let wrap = if request.wrap_long_lines {
            " style=\"white-space: pre-wrap; overflow-wrap: anywhere\""
        } else {
            ""
        };
        format!(
            "<div class=\"{}\" data-language=\"{}\"{wrap}><code>{body}</code></div>",
            encode_double_quoted_attribute(request.class_name),
            encode_double_quoted_attribute(request.language),
        )
    }
}
