//! Default markup-only collaborators.
//!
//! These emit inert HTML hooks for a client-side widget layer. Hosts with
//! richer widgets plug in their own [`WidgetRenderer`] / [`Typesetter`].

use super::{Typesetter, WidgetRenderer};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Emits `file-instance` and `progress` markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupWidgets;

impl WidgetRenderer for MarkupWidgets {
    /// First line is the file name, the rest its preview.
    fn file_block(&self, content: &str) -> String {
        let (name, body) = content.split_once('\n').unwrap_or((content, ""));
        let name = name.trim();
        let mut html = format!(
            "<div class=\"file-instance\" data-name=\"{}\"><span class=\"file-name\">{}</span>",
            encode_double_quoted_attribute(name),
            encode_text(name)
        );
        let body = body.trim_end_matches('\n');
        if !body.is_empty() {
            html.push_str("<pre class=\"file-preview\">");
            html.push_str(&encode_text(body));
            html.push_str("</pre>");
        }
        html.push_str("</div>");
        html
    }

    /// Content is a percentage; anything unparsable renders as zero.
    fn progress_bar(&self, content: &str) -> String {
        let raw = content.trim().trim_end_matches('%');
        let value = match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => value.clamp(0.0, 100.0),
            _ => {
                log::debug!("progress widget content is not a percentage: {content:?}");
                0.0
            }
        };
        format!(
            "<div class=\"progress\" role=\"progressbar\" aria-valuemin=\"0\" aria-valuemax=\"100\" aria-valuenow=\"{value}\"><div class=\"progress-indicator\" style=\"width: {value}%\"></div></div>"
        )
    }
}

/// Emits `math-inline` / `math-display` elements for a client-side typesetter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathMarkup;

impl Typesetter for MathMarkup {
    fn inline(&self, tex: &str) -> String {
        format!("<span class=\"math math-inline\">{}</span>", encode_text(tex))
    }

    fn display(&self, tex: &str) -> String {
        format!("<div class=\"math math-display\">{}</div>", encode_text(tex))
    }
}
