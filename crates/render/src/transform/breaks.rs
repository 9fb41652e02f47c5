//! Soft line breaks become hard breaks, so chat messages keep their lines.

use markdown::mdast::{Break, Node, Text};

/// Splits every text node on line endings, inserting `Break` nodes between the pieces.
///
/// Code, inline code and HTML nodes are untouched: their content is not `Text`.
pub fn soft_breaks_to_hard(root: &mut Node) {
    let Some(children) = root.children_mut() else {
        return;
    };

    if children
        .iter()
        .any(|child| matches!(child, Node::Text(text) if has_line_ending(&text.value)))
    {
        let old = std::mem::take(children);
        for child in old {
            match child {
                Node::Text(text) if has_line_ending(&text.value) => split_text(text, children),
                other => children.push(other),
            }
        }
    }

    for child in children.iter_mut() {
        soft_breaks_to_hard(child);
    }
}

fn has_line_ending(value: &str) -> bool {
    value.contains(['\n', '\r'])
}

fn split_text(text: Text, out: &mut Vec<Node>) {
    let normalized = text.value.replace("\r\n", "\n").replace('\r', "\n");
    for (i, piece) in normalized.split('\n').enumerate() {
        if i > 0 {
            out.push(Node::Break(Break { position: None }));
        }
        if !piece.is_empty() {
            out.push(Node::Text(Text {
                value: piece.to_string(),
                position: None,
            }));
        }
    }
}
