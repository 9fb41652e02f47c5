#![deny(missing_docs)]
//! chatmark renderer: chat markdown to interactive HTML.
//!
//! Links, code nodes, raw HTML and math are routed through overrides:
//! social links gain an icon, virtual command links become confirm-to-send
//! buttons, `file` / `progress` fences become widgets and tagged fences are
//! highlighted. The host supplies collaborators through [`host`].

/// Host collaborator traits and their default implementations.
pub mod host;
/// Handlers for virtual action dialogs and code copying.
pub mod interaction;
/// The mdast walk and its output types.
pub mod renderer;
/// AST and HTML transforms around the walk.
pub mod transform;
/// Memoized views and the deferred file-block pass.
pub mod view;

pub use host::{
    Clipboard, ClipboardError, Dialogs, EventSink, HighlightRequest, Highlighter, Toast, Toaster,
    Typesetter, WidgetRenderer, handle_link_click,
};
pub use interaction::{CopyOutcome, VirtualActionDialog, copy_code, open_reserved_link};
pub use renderer::{Interaction, RenderOptions, Rendered, Renderer};
pub use transform::{
    language_from_filename, normalize_file_blocks, rewrite_raw_links, wrap_in_fence,
};
pub use view::{FileView, MarkdownView, PendingRepair, RepairOutcome};
