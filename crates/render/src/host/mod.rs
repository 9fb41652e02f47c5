//! Host collaborator contracts.
//!
//! The renderer never draws dialogs, touches the clipboard or highlights code
//! itself; it talks to the host application through these traits.

pub mod defaults;
pub mod highlight;

use chatmark_core::{ClickOutcome, DialogKind, intercept};
use thiserror::Error;

pub use defaults::{MarkupWidgets, MathMarkup};
pub use highlight::SyntectHighlighter;

/// Input handed to a [`Highlighter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRequest<'a> {
    /// Code with the trailing newline already stripped.
    pub content: &'a str,
    /// Alias-mapped language name. May be unknown to the engine.
    pub language: &'a str,
    /// Class list for the emitted block (`code-block` plus any override).
    pub class_name: &'a str,
    /// Whether long lines should wrap instead of scrolling.
    pub wrap_long_lines: bool,
}

/// Syntax highlighting engine.
///
/// Must accept unknown language names and fall back to plain output.
pub trait Highlighter {
    /// Returns the highlighted block as HTML.
    fn highlight(&self, request: &HighlightRequest<'_>) -> String;
}

/// Renderers for the embedded widgets of `file` and `progress` fences.
///
/// Both receive the raw fence content; its syntax is theirs to interpret.
pub trait WidgetRenderer {
    /// Renders a file-block widget. File entries carry the `file-instance` class.
    fn file_block(&self, content: &str) -> String;
    /// Renders a progress-bar widget.
    fn progress_bar(&self, content: &str) -> String;
}

/// Math typesetting.
pub trait Typesetter {
    /// Renders inline math (`$x$`).
    fn inline(&self, tex: &str) -> String;
    /// Renders display math (`$$ ... $$`).
    fn display(&self, tex: &str) -> String;
}

/// Opens application dialogs.
pub trait Dialogs {
    /// Opens the given dialog.
    fn open_dialog(&self, kind: DialogKind);
}

impl<F> Dialogs for F
where
    F: Fn(DialogKind),
{
    fn open_dialog(&self, kind: DialogKind) {
        (self)(kind)
    }
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Headline text.
    pub title: String,
    /// Optional body text.
    pub description: Option<String>,
}

impl Toast {
    /// Creates a toast with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }
}

/// Shows transient notifications.
pub trait Toaster {
    /// Shows a toast.
    fn show_toast(&self, toast: &Toast);
}

impl<F> Toaster for F
where
    F: Fn(&Toast),
{
    fn show_toast(&self, toast: &Toast) {
        (self)(toast)
    }
}

/// Application-wide "send message" event dispatch. Fire and forget.
pub trait EventSink {
    /// Emits a message to the rest of the application.
    fn emit(&self, message: &str);
}

impl<F> EventSink for F
where
    F: Fn(&str),
{
    fn emit(&self, message: &str) {
        (self)(message)
    }
}

/// Clipboard failure reported by the host.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// The host refused clipboard access.
    #[error("clipboard access denied")]
    Denied,
    /// Any other host-side failure.
    #[error("clipboard write failed: {0}")]
    Failed(String),
}

/// Asynchronous clipboard access.
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    /// Writes `text` to the clipboard.
    async fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Handles a click on a rendered link.
///
/// The reserved paths open their dialog (exactly once) and suppress
/// navigation; every other href navigates without side effects.
pub fn handle_link_click(href: &str, dialogs: &dyn Dialogs) -> ClickOutcome {
    match intercept(href) {
        Some(kind) => {
            log::debug!("intercepted click on {href}, opening {kind:?} dialog");
            dialogs.open_dialog(kind);
            ClickOutcome::Intercepted(kind)
        }
        None => ClickOutcome::Navigate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn reserved_links_open_one_dialog_each() {
        let opened = RefCell::new(Vec::new());
        let dialogs = |kind: DialogKind| opened.borrow_mut().push(kind);

        assert_eq!(
            handle_link_click("/subscribe", &dialogs),
            ClickOutcome::Intercepted(DialogKind::Subscription)
        );
        assert_eq!(
            handle_link_click("/buy", &dialogs),
            ClickOutcome::Intercepted(DialogKind::Quota)
        );
        assert_eq!(
            *opened.borrow(),
            vec![DialogKind::Subscription, DialogKind::Quota]
        );
    }

    #[test]
    fn other_links_navigate_without_side_effects() {
        let opened = RefCell::new(Vec::new());
        let dialogs = |kind: DialogKind| opened.borrow_mut().push(kind);

        for href in ["https://github.com", "/subscribe/now", "#top", ""] {
            assert_eq!(handle_link_click(href, &dialogs), ClickOutcome::Navigate);
        }
        assert!(opened.borrow().is_empty());
    }

    #[test]
    fn closures_act_as_sinks() {
        let sent = RefCell::new(Vec::new());
        let sink = |message: &str| sent.borrow_mut().push(message.to_string());
        sink.emit("/REROLL");
        assert_eq!(*sent.borrow(), vec!["/REROLL".to_string()]);
    }
}
