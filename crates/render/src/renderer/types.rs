//! Type definitions for the chat renderer.

use chatmark_core::{ChatmarkError, DialogKind, VirtualCommand};
use serde::{Deserialize, Serialize};

/// Per-render configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Pass raw HTML through instead of skipping it.
    pub accept_raw_html: bool,
    /// Extra class appended to highlighted code blocks.
    pub code_style: Option<String>,
    /// Extra class appended to the `markdown-body` root.
    pub class_name: Option<String>,
}

impl RenderOptions {
    /// Whether raw HTML nodes are dropped from the output.
    pub fn skip_html(&self) -> bool {
        !self.accept_raw_html
    }

    /// Parses host-supplied options; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ChatmarkError> {
        serde_json::from_str(json).map_err(|err| ChatmarkError::InvalidOptions(err.to_string()))
    }
}

/// An interactive element of the rendered output.
///
/// The HTML refers to it through `data-interaction="{id}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Interaction {
    /// Virtual command button with its confirmation dialog.
    VirtualAction {
        /// Interaction id.
        id: usize,
        /// Decoded command.
        command: VirtualCommand,
    },
    /// Copy button of a highlighted code block.
    CopyCode {
        /// Interaction id.
        id: usize,
        /// Exact code copied to the clipboard.
        code: String,
    },
    /// Reserved link that opens an in-app dialog instead of navigating.
    Dialog {
        /// Interaction id.
        id: usize,
        /// Dialog opened on click.
        kind: DialogKind,
    },
}

impl Interaction {
    /// Interaction id.
    pub fn id(&self) -> usize {
        match self {
            Interaction::VirtualAction { id, .. }
            | Interaction::CopyCode { id, .. }
            | Interaction::Dialog { id, .. } => *id,
        }
    }
}

/// Output of one render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    /// HTML rooted at a `markdown-body` div.
    pub html: String,
    /// Interactive elements referenced from `html`, in document order.
    pub interactions: Vec<Interaction>,
}

impl Rendered {
    /// Looks up an interaction by id.
    pub fn interaction(&self, id: usize) -> Option<&Interaction> {
        self.interactions.iter().find(|interaction| interaction.id() == id)
    }

    /// Serializes the render result for a host across a JSON boundary.
    pub fn to_json(&self) -> Result<String, ChatmarkError> {
        serde_json::to_string(self).map_err(|err| ChatmarkError::InternalError(err.to_string()))
    }
}

/// Enclosing construct that changes how nested nodes render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Inside a list element (`<ul>` or `<ol>`).
    List {
        /// Loose list: item content keeps its `<p>` wrappers.
        spread: bool,
    },
    /// Inside a link or virtual action; nested links render as text.
    Link,
}
