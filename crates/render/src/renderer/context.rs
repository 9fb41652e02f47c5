//! Rendering context for the chat renderer.

use super::Renderer;
use super::types::{Interaction, RenderOptions, Rendered, Scope};
use chatmark_core::{DialogKind, HostMatch, VirtualCommand};
use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};
use markdown::mdast::Node;
use std::collections::HashMap;

/// Target of a `[label]: url "title"` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    /// Destination URL.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
}

/// Manages the state of one render pass.
///
/// Holds the HTML buffer, registered interactions and the scope stack, and
/// gives the node renderers access to the host collaborators.
pub struct Context<'a> {
    html: String,
    interactions: Vec<Interaction>,
    stack: Vec<Scope>,
    options: &'a RenderOptions,
    renderer: &'a Renderer,
    definitions: HashMap<String, LinkDefinition>,
    /// Footnote identifiers in order of first reference.
    footnote_order: Vec<String>,
    /// Footnote bodies, rendered at finish time only if referenced.
    footnotes: HashMap<String, Vec<Node>>,
}

impl<'a> Context<'a> {
    /// Creates a context for one render pass.
    pub fn new(renderer: &'a Renderer, options: &'a RenderOptions) -> Self {
        Self {
            html: String::with_capacity(4096),
            interactions: Vec::new(),
            stack: Vec::new(),
            options,
            renderer,
            definitions: HashMap::new(),
            footnote_order: Vec::new(),
            footnotes: HashMap::new(),
        }
    }

    /// The host collaborators.
    pub fn renderer(&self) -> &'a Renderer {
        self.renderer
    }

    /// Options of this render pass.
    pub fn options(&self) -> &'a RenderOptions {
        self.options
    }

    /// Host matching mode for social link detection.
    pub fn host_match(&self) -> HostMatch {
        self.renderer.host_match()
    }

    /// Writes a raw string to the buffer without escaping (for safe HTML tags).
    pub fn push_raw(&mut self, s: &str) {
        self.html.push_str(s);
    }

    /// Writes HTML-escaped text to the buffer.
    pub fn push_text(&mut self, s: &str) {
        encode_text_to_string(s, &mut self.html);
    }

    /// Writes an escaped, double-quoted attribute value (without the quotes).
    pub fn push_attr_value(&mut self, s: &str) {
        encode_double_quoted_attribute_to_string(s, &mut self.html);
    }

    /// Writes ` name="value"` with the value escaped.
    pub fn push_attr(&mut self, name: &str, value: &str) {
        self.html.push(' ');
        self.html.push_str(name);
        self.html.push_str("=\"");
        self.push_attr_value(value);
        self.html.push('"');
    }

    /// Returns true if inside a tight (non-spread) list.
    ///
    /// Used to suppress `<p>` wrappers around list item content.
    pub fn is_in_tight_list(&self) -> bool {
        self.stack
            .iter()
            .rev()
            .find(|scope| matches!(scope, Scope::List { .. }))
            .is_some_and(|scope| matches!(scope, Scope::List { spread: false }))
    }

    /// Returns true inside a link or virtual action.
    pub fn is_in_link(&self) -> bool {
        self.stack.iter().any(|scope| matches!(scope, Scope::Link))
    }

    /// Enters a new scope by pushing it onto the stack.
    pub fn enter(&mut self, scope: Scope) {
        self.stack.push(scope);
    }

    /// Exits the current scope by popping from the stack.
    pub fn exit(&mut self) -> Option<Scope> {
        self.stack.pop()
    }

    /// Id the next registered interaction will get.
    pub fn next_interaction_id(&self) -> usize {
        self.interactions.len()
    }

    /// Appends interactions built elsewhere; their ids must continue from
    /// [`Context::next_interaction_id`].
    pub fn extend_interactions(&mut self, interactions: impl IntoIterator<Item = Interaction>) {
        for interaction in interactions {
            debug_assert_eq!(interaction.id(), self.interactions.len());
            self.interactions.push(interaction);
        }
    }

    /// Registers a virtual action and returns its interaction id.
    pub fn register_virtual_action(&mut self, command: VirtualCommand) -> usize {
        let id = self.next_interaction_id();
        self.interactions
            .push(Interaction::VirtualAction { id, command });
        id
    }

    /// Registers a copy button and returns its interaction id.
    pub fn register_copy(&mut self, code: String) -> usize {
        let id = self.next_interaction_id();
        self.interactions.push(Interaction::CopyCode { id, code });
        id
    }

    /// Registers a reserved link and returns its interaction id.
    pub fn register_dialog(&mut self, kind: DialogKind) -> usize {
        let id = self.next_interaction_id();
        self.interactions.push(Interaction::Dialog { id, kind });
        id
    }

    /// Records every link, image and footnote definition before rendering.
    pub fn collect_definitions(&mut self, node: &Node) {
        // First definition wins, as in CommonMark.
        match node {
            Node::Definition(def) => {
                self.definitions
                    .entry(def.identifier.clone())
                    .or_insert_with(|| LinkDefinition {
                        url: def.url.clone(),
                        title: def.title.clone(),
                    });
            }
            Node::FootnoteDefinition(def) => {
                self.footnotes
                    .entry(def.identifier.clone())
                    .or_insert_with(|| def.children.clone());
            }
            _ => {}
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    /// Looks up a definition by its normalized identifier.
    pub fn definition(&self, identifier: &str) -> Option<LinkDefinition> {
        self.definitions.get(identifier).cloned()
    }

    /// Renders child nodes into a detached HTML string.
    pub fn render_children_to_html(&mut self, children: &[Node]) -> String {
        use super::render::render_node;

        let saved = std::mem::take(&mut self.html);
        for child in children {
            render_node(child, self);
        }
        std::mem::replace(&mut self.html, saved)
    }

    /// Returns the 1-based ordinal of a footnote, assigning one on first reference.
    pub fn footnote_ordinal(&mut self, identifier: &str) -> usize {
        match self.footnote_order.iter().position(|id| id == identifier) {
            Some(index) => index + 1,
            None => {
                self.footnote_order.push(identifier.to_string());
                self.footnote_order.len()
            }
        }
    }

    /// Consumes the context, wrapping the buffer in the `markdown-body` root.
    pub fn finish(mut self) -> Rendered {
        let footnotes = self.footnotes_section();

        let mut html = String::with_capacity(self.html.len() + footnotes.len() + 64);
        html.push_str("<div class=\"markdown-body");
        if let Some(class) = self.options.class_name.as_deref().map(str::trim)
            && !class.is_empty()
        {
            html.push(' ');
            encode_double_quoted_attribute_to_string(class, &mut html);
        }
        html.push_str("\">");
        html.push_str(&self.html);
        html.push_str(&footnotes);
        html.push_str("</div>");

        Rendered {
            html,
            interactions: self.interactions,
        }
    }

    /// Renders referenced footnotes in order of first reference.
    ///
    /// Bodies render here rather than in document order, so unreferenced
    /// footnotes register no interactions.
    fn footnotes_section(&mut self) -> String {
        let mut items = String::new();
        let mut index = 0;
        // References inside footnote bodies may extend the order while we walk it.
        while let Some(id) = self.footnote_order.get(index).cloned() {
            index += 1;
            let Some(children) = self.footnotes.get(&id).cloned() else {
                continue;
            };
            let body = self.render_children_to_html(&children);
            items.push_str("<li id=\"user-content-fn-");
            encode_double_quoted_attribute_to_string(&id, &mut items);
            items.push_str("\">");
            items.push_str(&body);
            items.push_str("<a href=\"#user-content-fnref-");
            encode_double_quoted_attribute_to_string(&id, &mut items);
            items.push_str("\" data-footnote-backref class=\"data-footnote-backref\" aria-label=\"Back to reference\">↩</a></li>");
        }
        if items.is_empty() {
            return items;
        }
        format!(
            "<section data-footnotes class=\"footnotes\"><h2 class=\"sr-only\" id=\"footnote-label\">Footnotes</h2><ol>{items}</ol></section>"
        )
    }
}
