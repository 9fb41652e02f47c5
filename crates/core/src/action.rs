//! In-app link paths that open dialogs instead of navigating.

use serde::{Deserialize, Serialize};

/// Dialogs that reserved links can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogKind {
    /// Subscription upsell.
    Subscription,
    /// Quota purchase.
    Quota,
}

impl DialogKind {
    /// The href reserved for this dialog.
    pub fn path(self) -> &'static str {
        match self {
            DialogKind::Subscription => "/subscribe",
            DialogKind::Quota => "/buy",
        }
    }
}

/// What a click on a rendered link should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Default navigation proceeds.
    Navigate,
    /// Navigation was suppressed and the dialog opened instead.
    Intercepted(DialogKind),
}

impl ClickOutcome {
    /// True when the host must suppress the default navigation.
    pub fn prevents_default(self) -> bool {
        matches!(self, ClickOutcome::Intercepted(_))
    }
}

/// Returns the dialog a link href is reserved for. Only exact paths match.
pub fn intercept(href: &str) -> Option<DialogKind> {
    match href {
        "/subscribe" => Some(DialogKind::Subscription),
        "/buy" => Some(DialogKind::Quota),
        _ => None,
    }
}
