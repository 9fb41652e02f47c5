//! Link overrides for accepted raw HTML.
//!
//! Anchors written as raw HTML get the same treatment as markdown links:
//! unsafe URLs are blanked, navigating anchors open in a new tab with their
//! platform icon, reserved paths and virtual commands become interactions.
//! The element keeps its `<a>` tag because its end tag may live in a later
//! HTML node; virtual commands turn into `role="button"` anchors.

use crate::renderer::Interaction;
use crate::renderer::markup::{LINK_REL, LINK_TARGET, icon_html, virtual_dialog_html};
use chatmark_core::link::classify_with;
use chatmark_core::{ChatmarkError, HostMatch, LinkKind, intercept, sanitize_url};
use lol_html::html_content::{ContentType, Element};
use lol_html::{RewriteStrSettings, element, rewrite_str};
use std::cell::RefCell;

/// Raw HTML after the link pass, with the interactions it introduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLinks {
    /// Rewritten HTML, followed by any virtual action dialogs.
    pub html: String,
    /// New interactions, ids starting at the `first_id` given to [`rewrite_raw_links`].
    pub interactions: Vec<Interaction>,
}

fn add_class(el: &mut Element<'_, '_>, class: &str) -> Result<(), ChatmarkError> {
    let classes = match el.get_attribute("class") {
        Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
        _ => class.to_string(),
    };
    el.set_attribute("class", &classes)
        .map_err(ChatmarkError::rewrite)
}

/// Applies the link overrides to every `a[href]` in a raw HTML fragment.
pub fn rewrite_raw_links(
    html: &str,
    first_id: usize,
    host_match: HostMatch,
) -> Result<RawLinks, ChatmarkError> {
    if !html.to_ascii_lowercase().contains("<a") {
        return Ok(RawLinks {
            html: html.to_string(),
            interactions: Vec::new(),
        });
    }

    let interactions = RefCell::new(Vec::new());
    let dialogs = RefCell::new(String::new());

    let mut rewritten = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("a[href]", |el| {
                let href = el.get_attribute("href").unwrap_or_default();
                let id = first_id + interactions.borrow().len();

                match classify_with(&href, host_match) {
                    LinkKind::VirtualCommand { command } => {
                        el.remove_attribute("href");
                        el.remove_attribute("target");
                        el.set_attribute("role", "button")?;
                        add_class(el, "virtual-action")?;
                        el.set_attribute("data-interaction", &id.to_string())?;
                        if let Some(icon) = command.icon() {
                            el.prepend(&icon_html(icon, "command-icon"), ContentType::Html);
                        }
                        dialogs
                            .borrow_mut()
                            .push_str(&virtual_dialog_html(id, &command.message));
                        interactions
                            .borrow_mut()
                            .push(Interaction::VirtualAction { id, command });
                    }
                    kind => {
                        let safe = sanitize_url(&href);
                        if safe != href {
                            log::debug!("blanking unsafe raw HTML link: {href}");
                            el.set_attribute("href", safe)?;
                        }
                        el.set_attribute("target", LINK_TARGET)?;
                        el.set_attribute("rel", LINK_REL)?;
                        if let Some(dialog) = intercept(safe) {
                            el.set_attribute("data-interaction", &id.to_string())?;
                            interactions
                                .borrow_mut()
                                .push(Interaction::Dialog { id, kind: dialog });
                        }
                        if let Some(icon) = kind.icon() {
                            el.prepend(&icon_html(icon, "social-icon"), ContentType::Html);
                        }
                    }
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(ChatmarkError::rewrite)?;

    rewritten.push_str(&dialogs.into_inner());
    Ok(RawLinks {
        html: rewritten,
        interactions: interactions.into_inner(),
    })
}
