//! Host-side handlers for the interactive parts of a render.

use crate::host::{Clipboard, Dialogs, EventSink, Toast, Toaster};
use crate::renderer::Interaction;
use chatmark_core::{ClickOutcome, VirtualCommand};

/// Confirmation dialog of a virtual action button.
///
/// Confirming sends the decoded message exactly once; cancelling sends
/// nothing. Either way the dialog closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualActionDialog {
    command: VirtualCommand,
    open: bool,
}

impl VirtualActionDialog {
    /// Creates a closed dialog for `command`.
    pub fn new(command: VirtualCommand) -> Self {
        Self {
            command,
            open: false,
        }
    }

    /// The command this dialog confirms.
    pub fn command(&self) -> &VirtualCommand {
        &self.command
    }

    /// The message shown in the dialog and sent on confirm.
    pub fn message(&self) -> &str {
        &self.command.message
    }

    /// Whether the dialog is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the dialog (the action button was pressed).
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes without sending.
    pub fn cancel(&mut self) {
        self.open = false;
    }

    /// Sends the message and closes. Returns false when the dialog was not
    /// open, in which case nothing is sent.
    pub fn confirm(&mut self, sink: &dyn EventSink) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        log::debug!("sending virtual command {}", self.command.verb);
        sink.emit(&self.command.message);
        true
    }
}

/// Handles a click on an element registered as [`Interaction::Dialog`].
///
/// Opens the dialog once and reports that navigation must be suppressed.
/// Other interactions are not links and leave navigation alone.
pub fn open_reserved_link(interaction: &Interaction, dialogs: &dyn Dialogs) -> ClickOutcome {
    match interaction {
        Interaction::Dialog { kind, .. } => {
            dialogs.open_dialog(*kind);
            ClickOutcome::Intercepted(*kind)
        }
        _ => ClickOutcome::Navigate,
    }
}

/// Result of [`copy_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The code is on the clipboard.
    Copied,
    /// The host clipboard rejected the write.
    Failed,
}

/// Toast title after a successful copy.
pub const COPIED_TITLE: &str = "Copied";
/// Toast title after a failed copy.
pub const COPY_FAILED_TITLE: &str = "Copy failed";

/// Copies a code block and reports the result with a toast.
///
/// The toast is shown only after the clipboard write completes. Failures
/// are logged and reported, never propagated.
pub async fn copy_code<C, T>(code: &str, clipboard: &C, toaster: &T) -> CopyOutcome
where
    C: Clipboard + ?Sized,
    T: Toaster + ?Sized,
{
    match clipboard.copy(code).await {
        Ok(()) => {
            toaster.show_toast(&Toast::titled(COPIED_TITLE));
            CopyOutcome::Copied
        }
        Err(err) => {
            log::warn!("failed to copy code block: {err}");
            toaster.show_toast(&Toast {
                title: COPY_FAILED_TITLE.to_string(),
                description: Some(err.to_string()),
            });
            CopyOutcome::Failed
        }
    }
}
