//! Tokenizing chat messages into mdast.

use crate::{ChatmarkError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Which markdown constructs the tokenizer recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Tables, footnotes, task lists, strikethrough and autolink literals.
    pub gfm: bool,
    /// `$inline$` and `$$display$$` math.
    pub math: bool,
    /// Raw HTML becomes `Html` nodes instead of literal text.
    ///
    /// Whether those nodes are emitted or skipped is a rendering decision.
    pub raw_html: bool,
}

impl ParseOptions {
    /// Chat messages: every construct on.
    pub const fn chat() -> Self {
        Self {
            gfm: true,
            math: true,
            raw_html: true,
        }
    }

    /// Builds the markdown-rs options. Frontmatter is never recognized.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let constructs = markdown::Constructs {
            frontmatter: false,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            gfm_autolink_literal: self.gfm,
            gfm_footnote_definition: self.gfm,
            gfm_label_start_footnote: self.gfm,
            gfm_strikethrough: self.gfm,
            gfm_table: self.gfm,
            gfm_task_list_item: self.gfm,
            math_flow: self.math,
            math_text: self.math,
            ..markdown::Constructs::default()
        };

        markdown::ParseOptions {
            constructs,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::chat()
    }
}

/// In-place rewrite of a freshly parsed tree.
pub trait AstTransform {
    /// Rewrites `root`.
    fn transform(&self, root: &mut Node);
}

impl<F> AstTransform for F
where
    F: Fn(&mut Node),
{
    fn transform(&self, root: &mut Node) {
        (self)(root)
    }
}

/// Tokenizer plus the tree rewrites that always follow it.
pub struct ParserPipeline {
    options: markdown::ParseOptions,
    ast_transforms: Vec<Box<dyn AstTransform>>,
}

impl ParserPipeline {
    /// A pipeline with no rewrites.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options: options.to_markdown(),
            ast_transforms: Vec::new(),
        }
    }

    /// Appends a rewrite; rewrites run in insertion order.
    pub fn add_ast_transform<T: AstTransform + 'static>(&mut self, transform: T) {
        self.ast_transforms.push(Box::new(transform));
    }

    /// Tokenizes `input` and applies every rewrite.
    pub fn parse(&self, input: &str) -> Result<Node, ChatmarkError> {
        let mut root = to_mdast(input, &self.options)?;
        for transform in &self.ast_transforms {
            transform.transform(&mut root);
        }
        Ok(root)
    }
}

/// Tokenizes `input` without any rewrites.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, ChatmarkError> {
    to_mdast(input, &options.to_markdown())
}

fn to_mdast(input: &str, options: &markdown::ParseOptions) -> Result<Node, ChatmarkError> {
    markdown::to_mdast(input, options).map_err(|err| ChatmarkError::MarkdownAdapter {
        message: err.to_string(),
        location: location_of(&err),
    })
}

fn location_of(message: &Message) -> SourceLocation {
    let point = match message.place.as_deref() {
        Some(Place::Point(point)) => point,
        Some(Place::Position(position)) => &position.start,
        None => return SourceLocation::new(1, 1),
    };
    SourceLocation::new(point.line, point.column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_child(root: &Node) -> &Node {
        root.children()
            .and_then(|children| children.first())
            .expect("root has a child")
    }

    #[test]
    fn tables_need_gfm() {
        let input = "| a | b |\n| - | - |\n| 1 | 2 |";
        let root = parse_mdast(input, &ParseOptions::chat()).unwrap();
        assert!(matches!(first_child(&root), Node::Table(_)));

        let plain = ParseOptions {
            gfm: false,
            ..ParseOptions::chat()
        };
        let root = parse_mdast(input, &plain).unwrap();
        assert!(matches!(first_child(&root), Node::Paragraph(_)));
    }

    #[test]
    fn display_math_is_recognized() {
        let root = parse_mdast("$$\nx^2\n$$", &ParseOptions::chat()).unwrap();
        assert!(matches!(first_child(&root), Node::Math(_)));
    }

    #[test]
    fn raw_html_becomes_html_node() {
        let root = parse_mdast("<div>hi</div>", &ParseOptions::chat()).unwrap();
        assert!(matches!(first_child(&root), Node::Html(_)));
    }

    #[test]
    fn frontmatter_is_plain_markdown() {
        let root = parse_mdast("---\ntitle: x\n---", &ParseOptions::chat()).unwrap();
        assert!(!matches!(first_child(&root), Node::Yaml(_)));
    }

    #[test]
    fn rewrites_run_in_order() {
        let mut pipeline = ParserPipeline::new(ParseOptions::chat());
        pipeline.add_ast_transform(|root: &mut Node| {
            if let Node::Root(root) = root {
                root.children.truncate(2);
            }
        });
        pipeline.add_ast_transform(|root: &mut Node| {
            if let Node::Root(root) = root {
                root.children.remove(0);
            }
        });

        let root = pipeline.parse("one\n\ntwo\n\nthree").unwrap();
        let children = root.children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].to_string(), "two");
    }
}
