//! Markup fragments shared by markdown links and raw HTML anchors.

use chatmark_core::Icon;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Title of the virtual action confirmation dialog.
const SEND_MESSAGE_TITLE: &str = "Send message";
/// Body of the virtual action confirmation dialog.
const SEND_MESSAGE_DESCRIPTION: &str = "The following message will be sent to the conversation:";
const CANCEL_LABEL: &str = "Cancel";
const CONFIRM_LABEL: &str = "Confirm";

/// Attributes every navigating anchor carries.
pub const LINK_TARGET: &str = "_blank";
/// `rel` of every navigating anchor.
pub const LINK_REL: &str = "noopener noreferrer";

/// An inline icon element; `spacing` is the placement class.
pub fn icon_html(icon: Icon, spacing: &str) -> String {
    format!(
        "<span class=\"icon icon-{} {spacing}\" aria-hidden=\"true\"></span>",
        icon.name()
    )
}

/// Confirmation dialog of a virtual action, kept inert in a `<template>`.
///
/// Valid inside paragraphs; the host clones it when the action is pressed.
pub fn virtual_dialog_html(id: usize, message: &str) -> String {
    format!(
        concat!(
            "<template class=\"virtual-dialog\" data-interaction=\"{id}\">",
            "<div class=\"virtual-dialog-header\"><h3>{title}</h3>",
            "<p class=\"virtual-description\">{description}</p>",
            "<p class=\"virtual-prompt\">{message}</p></div>",
            "<div class=\"virtual-dialog-footer\">",
            "<button type=\"button\" data-role=\"cancel\">{cancel}</button>",
            "<button type=\"button\" data-role=\"confirm\">{confirm}</button>",
            "</div></template>"
        ),
        id = encode_double_quoted_attribute(&id.to_string()),
        title = encode_text(SEND_MESSAGE_TITLE),
        description = encode_text(SEND_MESSAGE_DESCRIPTION),
        message = encode_text(message),
        cancel = encode_text(CANCEL_LABEL),
        confirm = encode_text(CONFIRM_LABEL),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_carries_name_and_spacing() {
        assert_eq!(
            icon_html(Icon::Codepen, "social-icon"),
            "<span class=\"icon icon-codepen social-icon\" aria-hidden=\"true\"></span>"
        );
    }

    #[test]
    fn dialog_escapes_the_message() {
        let html = virtual_dialog_html(4, "/VARIATION <b>");
        assert!(html.starts_with("<template class=\"virtual-dialog\" data-interaction=\"4\">"));
        assert!(html.contains("<p class=\"virtual-prompt\">/VARIATION &lt;b&gt;</p>"));
        assert!(html.ends_with("</div></template>"));
    }
}
