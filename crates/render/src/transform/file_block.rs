//! Groups embedded file widgets after rendering.
//!
//! Every element carrying the `file-instance` class marks its direct parent
//! with `file-block`, so adjacent file widgets lay out as one group. Runs on
//! realized HTML, after the widget renderers have filled their slots.

use chatmark_core::ChatmarkError;
use lol_html::html_content::EndTag;
use lol_html::{EndTagHandler, RewriteStrSettings, element, rewrite_str};
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

/// Class of an individual file widget.
pub const FILE_INSTANCE_CLASS: &str = "file-instance";
/// Class added to the direct container of file widgets.
pub const FILE_BLOCK_CLASS: &str = "file-block";

fn has_class(class_attr: Option<&str>, class: &str) -> bool {
    class_attr.is_some_and(|value| value.split_ascii_whitespace().any(|c| c == class))
}

/// Finds the document-order indices of elements that directly contain a file widget.
///
/// Assumes well-formed markup: element nesting is tracked through explicit end tags.
fn file_instance_parents(html: &str) -> Result<BTreeSet<usize>, ChatmarkError> {
    let parents = RefCell::new(BTreeSet::new());
    let stack = Rc::new(RefCell::new(Vec::<usize>::new()));
    let counter = Cell::new(0usize);

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("*", |el| {
                let index = counter.get();
                counter.set(index + 1);

                let class = el.get_attribute("class");
                if has_class(class.as_deref(), FILE_INSTANCE_CLASS)
                    && let Some(&parent) = stack.borrow().last()
                {
                    parents.borrow_mut().insert(parent);
                }

                if let Some(handlers) = el.end_tag_handlers() {
                    stack.borrow_mut().push(index);
                    let stack = stack.clone();
                    handlers.push(Box::new(move |_end: &mut EndTag<'_>| {
                        stack.borrow_mut().pop();
                        Ok(())
                    }) as EndTagHandler<'static>);
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(ChatmarkError::rewrite)?;

    Ok(parents.into_inner())
}

/// Adds `file-block` to the direct parent of every `file-instance` element.
///
/// Idempotent: the class is only added when absent, so a second pass returns
/// its input unchanged.
pub fn normalize_file_blocks(html: &str) -> Result<String, ChatmarkError> {
    if !html.contains(FILE_INSTANCE_CLASS) {
        return Ok(html.to_string());
    }

    let parents = file_instance_parents(html)?;
    if parents.is_empty() {
        return Ok(html.to_string());
    }

    let counter = Cell::new(0usize);
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("*", |el| {
                let index = counter.get();
                counter.set(index + 1);
                if !parents.contains(&index) {
                    return Ok(());
                }

                let class = el.get_attribute("class");
                if has_class(class.as_deref(), FILE_BLOCK_CLASS) {
                    return Ok(());
                }
                let classes = match class.as_deref().map(str::trim) {
                    Some(existing) if !existing.is_empty() => {
                        format!("{existing} {FILE_BLOCK_CLASS}")
                    }
                    _ => FILE_BLOCK_CLASS.to_string(),
                };
                el.set_attribute("class", &classes)?;
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(ChatmarkError::rewrite)
}
