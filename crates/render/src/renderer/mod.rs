//! The chat renderer: markdown in, `markdown-body` HTML plus interactions out.

pub mod context;
pub mod markup;
pub mod render;
pub mod types;

pub use context::{Context, LinkDefinition};
pub use render::{render_code_node, render_node};
pub use types::{Interaction, RenderOptions, Rendered, Scope};

use crate::host::{
    Highlighter, MarkupWidgets, MathMarkup, SyntectHighlighter, Typesetter, WidgetRenderer,
};
use crate::transform::{language_from_filename, soft_breaks_to_hard, wrap_in_fence};
use chatmark_core::{ChatmarkError, HostMatch, ParseOptions, ParserPipeline};

/// Renders chat markdown with the host's collaborators plugged in.
///
/// Soft line breaks, GFM and math are always on. Raw HTML is tokenized and
/// then kept or dropped per [`RenderOptions::accept_raw_html`].
pub struct Renderer {
    pipeline: ParserPipeline,
    highlighter: Box<dyn Highlighter>,
    widgets: Box<dyn WidgetRenderer>,
    typesetter: Box<dyn Typesetter>,
    host_match: HostMatch,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Creates a renderer with the built-in collaborators.
    pub fn new() -> Self {
        let mut pipeline = ParserPipeline::new(ParseOptions::chat());
        pipeline.add_ast_transform(soft_breaks_to_hard);
        Self {
            pipeline,
            highlighter: Box::new(SyntectHighlighter::new()),
            widgets: Box::new(MarkupWidgets),
            typesetter: Box::new(MathMarkup),
            host_match: HostMatch::default(),
        }
    }

    /// Replaces the syntax highlighter.
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    /// Replaces the `file` / `progress` widget renderer.
    pub fn with_widgets(mut self, widgets: impl WidgetRenderer + 'static) -> Self {
        self.widgets = Box::new(widgets);
        self
    }

    /// Replaces the math typesetter.
    pub fn with_typesetter(mut self, typesetter: impl Typesetter + 'static) -> Self {
        self.typesetter = Box::new(typesetter);
        self
    }

    /// Selects how link hosts are matched against the social domains.
    pub fn with_host_match(mut self, host_match: HostMatch) -> Self {
        self.host_match = host_match;
        self
    }

    /// The syntax highlighter.
    pub fn highlighter(&self) -> &dyn Highlighter {
        self.highlighter.as_ref()
    }

    /// The widget renderer.
    pub fn widgets(&self) -> &dyn WidgetRenderer {
        self.widgets.as_ref()
    }

    /// The math typesetter.
    pub fn typesetter(&self) -> &dyn Typesetter {
        self.typesetter.as_ref()
    }

    /// Social host matching mode.
    pub fn host_match(&self) -> HostMatch {
        self.host_match
    }

    /// Renders a chat message.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatmark_render::{RenderOptions, Renderer};
    ///
    /// let rendered = Renderer::new()
    ///     .render("Hello **world**", &RenderOptions::default())
    ///     .unwrap();
    /// assert_eq!(
    ///     rendered.html,
    ///     "<div class=\"markdown-body\"><p>Hello <strong>world</strong></p></div>"
    /// );
    /// ```
    pub fn render(&self, children: &str, options: &RenderOptions) -> Result<Rendered, ChatmarkError> {
        let root = self.pipeline.parse(children)?;

        let mut ctx = Context::new(self, options);
        ctx.collect_definitions(&root);
        render_node(&root, &mut ctx);
        Ok(ctx.finish())
    }

    /// Renders a whole file as one fenced code block tagged by its extension.
    pub fn render_from_file(
        &self,
        filename: &str,
        content: &str,
        options: &RenderOptions,
    ) -> Result<Rendered, ChatmarkError> {
        let wrapped = wrap_in_fence(language_from_filename(filename), content);
        self.render(&wrapped, options)
    }
}
