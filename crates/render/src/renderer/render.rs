//! Node rendering with the chat overrides for links, code, HTML and math.

use super::context::{Context, LinkDefinition};
use super::markup::{LINK_REL, LINK_TARGET, icon_html, virtual_dialog_html};
use super::types::Scope;
use crate::host::HighlightRequest;
use crate::transform::rewrite_raw_links;
use chatmark_core::code::{CodeDispatch, dispatch, highlight_content};
use chatmark_core::link::{LinkKind, classify_with};
use chatmark_core::{VirtualCommand, intercept, language_from_info, sanitize_url};
use markdown::mdast::{AlignKind, Node};

fn render_children(children: &[Node], ctx: &mut Context) {
    for child in children {
        render_node(child, ctx);
    }
}

/// Renders a link target through the link classifier.
fn render_link_to(url: &str, title: Option<&str>, children: &[Node], ctx: &mut Context) {
    if ctx.is_in_link() {
        render_children(children, ctx);
        return;
    }

    match classify_with(url, ctx.host_match()) {
        LinkKind::VirtualCommand { command } => render_virtual_action(command, children, ctx),
        kind => {
            let href = sanitize_url(url);
            if href.len() != url.len() {
                log::debug!("blanking unsafe link target: {url}");
            }
            ctx.push_raw("<a");
            ctx.push_attr("href", href);
            if let Some(title) = title {
                ctx.push_attr("title", title);
            }
            ctx.push_attr("target", LINK_TARGET);
            ctx.push_attr("rel", LINK_REL);
            if let Some(dialog) = intercept(href) {
                let id = ctx.register_dialog(dialog);
                ctx.push_attr("data-interaction", &id.to_string());
            }
            ctx.push_raw(">");
            if let Some(icon) = kind.icon() {
                ctx.push_raw(&icon_html(icon, "social-icon"));
            }
            ctx.enter(Scope::Link);
            render_children(children, ctx);
            ctx.exit();
            ctx.push_raw("</a>");
        }
    }
}

/// Renders a virtual command as a button plus its confirmation dialog template.
fn render_virtual_action(command: VirtualCommand, children: &[Node], ctx: &mut Context) {
    let icon = command.icon();
    let message = command.message.clone();
    let id = ctx.register_virtual_action(command);

    ctx.push_raw("<button type=\"button\" class=\"virtual-action\"");
    ctx.push_attr("data-interaction", &id.to_string());
    ctx.push_raw(">");
    if let Some(icon) = icon {
        ctx.push_raw(&icon_html(icon, "command-icon"));
    }
    ctx.enter(Scope::Link);
    render_children(children, ctx);
    ctx.exit();
    ctx.push_raw("</button>");
    ctx.push_raw(&virtual_dialog_html(id, &message));
}

/// Renders a code node through the code dispatcher.
///
/// `content` is the node text as the tokenizer hands it to a code override:
/// fenced blocks carry one trailing newline.
pub fn render_code_node(tag: &str, content: &str, inline: bool, ctx: &mut Context) {
    let renderer = ctx.renderer();
    match dispatch(tag, inline) {
        CodeDispatch::FileBlock => {
            let widget = renderer.widgets().file_block(content);
            ctx.push_raw(&widget);
        }
        CodeDispatch::ProgressBar => {
            let widget = renderer.widgets().progress_bar(content);
            ctx.push_raw(&widget);
        }
        CodeDispatch::Highlighted { label, language } => {
            let code = highlight_content(content);
            let id = ctx.register_copy(code.to_string()).to_string();

            let class_name = match ctx.options().code_style.as_deref().map(str::trim) {
                Some(style) if !style.is_empty() => format!("code-block {style}"),
                _ => "code-block".to_string(),
            };
            let highlighted = renderer.highlighter().highlight(&HighlightRequest {
                content: code,
                language: &language,
                class_name: &class_name,
                wrap_long_lines: true,
            });

            ctx.push_raw("<div class=\"markdown-syntax\"><div class=\"markdown-syntax-header\">");
            ctx.push_raw("<button type=\"button\" class=\"copy-code\" aria-label=\"Copy\"");
            ctx.push_attr("data-interaction", &id);
            ctx.push_raw("><span class=\"icon icon-copy\" aria-hidden=\"true\"></span></button><p>");
            ctx.push_text(&label);
            ctx.push_raw("</p></div>");
            ctx.push_raw(&highlighted);
            ctx.push_raw("</div>");
        }
        CodeDispatch::Plain => {
            ctx.push_raw("<code class=\"code-inline");
            if !tag.is_empty() {
                ctx.push_raw(" language-");
                ctx.push_attr_value(tag);
            }
            ctx.push_raw("\">");
            ctx.push_text(content);
            ctx.push_raw("</code>");
        }
    }
}

/// Renders a fenced or indented code block inside `<pre>`.
fn render_code(code: &markdown::mdast::Code, ctx: &mut Context) {
    let tag = code
        .lang
        .as_deref()
        .and_then(language_from_info)
        .unwrap_or_default();
    // Empty fences stay empty; anything else carries the tokenizer's trailing newline.
    let mut content = String::with_capacity(code.value.len() + 1);
    content.push_str(&code.value);
    if !content.is_empty() {
        content.push('\n');
    }

    ctx.push_raw("<pre>");
    render_code_node(&tag, &content, false, ctx);
    ctx.push_raw("</pre>");
}

/// Renders raw HTML through the link overrides, or skips it.
fn render_html(html: &markdown::mdast::Html, ctx: &mut Context) {
    if ctx.options().skip_html() {
        log::debug!("Skipping raw HTML: {}", html.value);
        return;
    }

    match rewrite_raw_links(&html.value, ctx.next_interaction_id(), ctx.host_match()) {
        Ok(raw) => {
            ctx.push_raw(&raw.html);
            ctx.extend_interactions(raw.interactions);
        }
        Err(err) => log::warn!("Dropping raw HTML the link pass rejected: {err}"),
    }
}

/// Renders a list node as `<ul>` or `<ol>`.
fn render_list(list: &markdown::mdast::List, ctx: &mut Context) {
    let tag = if list.ordered { "ol" } else { "ul" };
    ctx.push_raw("<");
    ctx.push_raw(tag);
    if list.ordered
        && let Some(start) = list.start
        && start != 1
    {
        ctx.push_attr("start", &start.to_string());
    }
    ctx.push_raw(">");
    ctx.enter(Scope::List {
        spread: list.spread,
    });
    render_children(&list.children, ctx);
    ctx.exit();
    ctx.push_raw(&format!("</{}>", tag));
}

/// Renders a list item node as `<li>`, with a disabled checkbox for task items.
fn render_list_item(item: &markdown::mdast::ListItem, ctx: &mut Context) {
    match item.checked {
        Some(checked) => {
            ctx.push_raw("<li class=\"task-list-item\"><input type=\"checkbox\" disabled");
            if checked {
                ctx.push_raw(" checked");
            }
            ctx.push_raw(" /> ");
        }
        None => ctx.push_raw("<li>"),
    }
    render_children(&item.children, ctx);
    ctx.push_raw("</li>");
}

/// Renders a paragraph node, suppressing `<p>` wrappers in tight lists.
fn render_paragraph(para: &markdown::mdast::Paragraph, ctx: &mut Context) {
    if ctx.is_in_tight_list() {
        render_children(&para.children, ctx);
    } else {
        ctx.push_raw("<p>");
        render_children(&para.children, ctx);
        ctx.push_raw("</p>");
    }
}

/// Helper function to render a table row with proper alignment.
fn render_table_row(
    row: &markdown::mdast::TableRow,
    ctx: &mut Context,
    is_header: bool,
    aligns: &[AlignKind],
) {
    ctx.push_raw("<tr>");
    let tag = if is_header { "th" } else { "td" };

    for (i, cell) in row.children.iter().enumerate() {
        let Node::TableCell(c) = cell else {
            continue;
        };
        let align_attr = match aligns.get(i) {
            Some(AlignKind::Left) => " align=\"left\"",
            Some(AlignKind::Right) => " align=\"right\"",
            Some(AlignKind::Center) => " align=\"center\"",
            Some(AlignKind::None) | None => "",
        };

        ctx.push_raw(&format!("<{}{}>", tag, align_attr));
        render_children(&c.children, ctx);
        ctx.push_raw(&format!("</{}>", tag));
    }

    ctx.push_raw("</tr>");
}

/// Renders a table node as `<table>` with `<thead>` and optional `<tbody>`.
fn render_table(table: &markdown::mdast::Table, ctx: &mut Context) {
    ctx.push_raw("<table><thead>");
    if let Some(Node::TableRow(row)) = table.children.first() {
        render_table_row(row, ctx, true, &table.align);
    }
    ctx.push_raw("</thead>");

    if table.children.len() > 1 {
        ctx.push_raw("<tbody>");
        for row in table.children.iter().skip(1) {
            if let Node::TableRow(r) = row {
                render_table_row(r, ctx, false, &table.align);
            }
        }
        ctx.push_raw("</tbody>");
    }

    ctx.push_raw("</table>");
}

/// Renders an image node as `<img>`.
fn render_image(url: &str, alt: &str, title: Option<&str>, ctx: &mut Context) {
    ctx.push_raw("<img");
    ctx.push_attr("src", sanitize_url(url));
    ctx.push_attr("alt", alt);
    if let Some(title) = title {
        ctx.push_attr("title", title);
    }
    ctx.push_raw(" />");
}

/// Renders a reference link, or its source text when the definition is missing.
fn render_link_reference(link: &markdown::mdast::LinkReference, ctx: &mut Context) {
    match ctx.definition(&link.identifier) {
        Some(LinkDefinition { url, title }) => {
            render_link_to(&url, title.as_deref(), &link.children, ctx);
        }
        None => {
            ctx.push_text("[");
            render_children(&link.children, ctx);
            ctx.push_text("]");
        }
    }
}

/// Renders a reference image, or its alt text when the definition is missing.
fn render_image_reference(image: &markdown::mdast::ImageReference, ctx: &mut Context) {
    match ctx.definition(&image.identifier) {
        Some(LinkDefinition { url, title }) => {
            render_image(&url, &image.alt, title.as_deref(), ctx);
        }
        None => {
            ctx.push_text("![");
            ctx.push_text(&image.alt);
            ctx.push_text("]");
        }
    }
}

/// Renders a footnote reference as a superscript link.
fn render_footnote_reference(fnref: &markdown::mdast::FootnoteReference, ctx: &mut Context) {
    let ordinal = ctx.footnote_ordinal(&fnref.identifier);
    ctx.push_raw("<sup><a");
    ctx.push_attr("href", &format!("#user-content-fn-{}", fnref.identifier));
    ctx.push_attr("id", &format!("user-content-fnref-{}", fnref.identifier));
    ctx.push_raw(" data-footnote-ref aria-describedby=\"footnote-label\">");
    ctx.push_raw(&ordinal.to_string());
    ctx.push_raw("</a></sup>");
}

/// Recursively renders an AST node to HTML, updating the context state.
pub fn render_node(node: &Node, ctx: &mut Context) {
    match node {
        Node::Root(root) => render_children(&root.children, ctx),
        Node::Text(text) => ctx.push_text(&text.value),
        Node::Paragraph(para) => render_paragraph(para, ctx),
        Node::Link(link) => render_link_to(&link.url, link.title.as_deref(), &link.children, ctx),
        Node::LinkReference(link) => render_link_reference(link, ctx),
        Node::Strong(strong) => {
            ctx.push_raw("<strong>");
            render_children(&strong.children, ctx);
            ctx.push_raw("</strong>");
        }
        Node::Emphasis(emphasis) => {
            ctx.push_raw("<em>");
            render_children(&emphasis.children, ctx);
            ctx.push_raw("</em>");
        }
        Node::Delete(delete) => {
            ctx.push_raw("<del>");
            render_children(&delete.children, ctx);
            ctx.push_raw("</del>");
        }
        Node::InlineCode(code) => render_code_node("", &code.value, true, ctx),
        Node::Code(code) => render_code(code, ctx),
        Node::Heading(heading) => {
            let tag = format!("h{}", heading.depth);
            ctx.push_raw(&format!("<{}>", tag));
            render_children(&heading.children, ctx);
            ctx.push_raw(&format!("</{}>", tag));
        }
        Node::List(list) => render_list(list, ctx),
        Node::ListItem(item) => render_list_item(item, ctx),
        Node::Blockquote(quote) => {
            ctx.push_raw("<blockquote>");
            render_children(&quote.children, ctx);
            ctx.push_raw("</blockquote>");
        }
        Node::Break(_) => ctx.push_raw("<br />"),
        Node::ThematicBreak(_) => ctx.push_raw("<hr />"),
        Node::Image(img) => render_image(&img.url, &img.alt, img.title.as_deref(), ctx),
        Node::ImageReference(img) => render_image_reference(img, ctx),
        Node::Html(html) => render_html(html, ctx),
        Node::Table(table) => render_table(table, ctx),
        Node::TableRow(_) | Node::TableCell(_) => {}
        // Collected up front; footnote bodies render at finish time.
        Node::Definition(_) | Node::FootnoteDefinition(_) => {}
        Node::FootnoteReference(fnref) => render_footnote_reference(fnref, ctx),
        Node::Math(math) => {
            let html = ctx.renderer().typesetter().display(&math.value);
            ctx.push_raw(&html);
        }
        Node::InlineMath(math) => {
            let html = ctx.renderer().typesetter().inline(&math.value);
            ctx.push_raw(&html);
        }
        _ => {
            log::warn!("Unhandled markdown node type: {:?}", node);
        }
    }
}
