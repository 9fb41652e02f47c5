//! Memoized views over the renderer.
//!
//! A view owns the last render result and hands out shared handles to it
//! while its input stays equal. It also sequences the deferred file-block
//! pass: [`MarkdownView::commit`] realizes the HTML and returns a ticket,
//! [`MarkdownView::apply_repair`] runs the pass unless a newer render has
//! superseded the ticket.

use crate::renderer::{RenderOptions, Rendered, Renderer};
use crate::transform::{language_from_filename, normalize_file_blocks, wrap_in_fence};
use chatmark_core::ChatmarkError;
use std::sync::Arc;

/// A deferred post-render pass, valid for one render generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRepair {
    generation: u64,
}

impl PendingRepair {
    /// Render generation this pass was scheduled for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of [`MarkdownView::apply_repair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The pass ran on the realized HTML.
    Applied {
        /// Whether any element gained the `file-block` class.
        changed: bool,
    },
    /// A newer render superseded the ticket; nothing was touched.
    Stale,
}

struct Memo {
    children: String,
    options: RenderOptions,
    rendered: Arc<Rendered>,
}

/// Renders chat markdown, reusing the previous result on equal input.
pub struct MarkdownView {
    renderer: Renderer,
    memo: Option<Memo>,
    generation: u64,
    realized: Option<(u64, String)>,
}

impl Default for MarkdownView {
    fn default() -> Self {
        Self::new(Renderer::new())
    }
}

impl MarkdownView {
    /// Creates a view around a configured renderer.
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            memo: None,
            generation: 0,
            realized: None,
        }
    }

    /// The underlying renderer.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Number of renders that produced new output.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Renders `children`, or returns the cached result when `children` and
    /// `options` equal the previous call's.
    pub fn render(
        &mut self,
        children: &str,
        options: &RenderOptions,
    ) -> Result<Arc<Rendered>, ChatmarkError> {
        if let Some(memo) = &self.memo
            && memo.children == children
            && memo.options == *options
        {
            log::trace!("markdown view memo hit (generation {})", self.generation);
            return Ok(Arc::clone(&memo.rendered));
        }

        let rendered = Arc::new(self.renderer.render(children, options)?);
        self.generation += 1;
        self.memo = Some(Memo {
            children: children.to_string(),
            options: options.clone(),
            rendered: Arc::clone(&rendered),
        });
        Ok(rendered)
    }

    /// Realizes the latest render and schedules the file-block pass for it.
    ///
    /// Returns `None` before the first render. Committing the same generation
    /// twice keeps any repair already applied.
    pub fn commit(&mut self) -> Option<PendingRepair> {
        let memo = self.memo.as_ref()?;
        let current = self
            .realized
            .as_ref()
            .is_some_and(|(generation, _)| *generation == self.generation);
        if !current {
            self.realized = Some((self.generation, memo.rendered.html.clone()));
        }
        Some(PendingRepair {
            generation: self.generation,
        })
    }

    /// Runs a scheduled file-block pass on the realized HTML.
    pub fn apply_repair(&mut self, repair: PendingRepair) -> Result<RepairOutcome, ChatmarkError> {
        let Some((generation, html)) = self.realized.as_mut() else {
            log::debug!("dropping repair for generation {}: nothing realized", repair.generation);
            return Ok(RepairOutcome::Stale);
        };
        if repair.generation != self.generation || *generation != self.generation {
            log::debug!(
                "dropping stale repair for generation {} (current {})",
                repair.generation,
                self.generation
            );
            return Ok(RepairOutcome::Stale);
        }

        let repaired = normalize_file_blocks(html)?;
        let changed = repaired != *html;
        *html = repaired;
        Ok(RepairOutcome::Applied { changed })
    }

    /// The committed HTML, including any applied repair.
    pub fn realized_html(&self) -> Option<&str> {
        self.realized.as_ref().map(|(_, html)| html.as_str())
    }
}

/// Renders a whole file as a highlighted block.
///
/// The fenced source is re-derived only when the file content changes; a new
/// file name with the same content keeps the previous language tag.
pub struct FileView {
    view: MarkdownView,
    wrapped: Option<(String, String)>,
}

impl Default for FileView {
    fn default() -> Self {
        Self::new(Renderer::new())
    }
}

impl FileView {
    /// Creates a file view around a configured renderer.
    pub fn new(renderer: Renderer) -> Self {
        Self {
            view: MarkdownView::new(renderer),
            wrapped: None,
        }
    }

    /// The fenced markdown for `content`, tagged by the file extension.
    pub fn wrapped(&mut self, filename: &str, content: &str) -> &str {
        let stale = self
            .wrapped
            .as_ref()
            .is_none_or(|(cached, _)| cached != content);
        if stale {
            let fenced = wrap_in_fence(language_from_filename(filename), content);
            self.wrapped = Some((content.to_string(), fenced));
        }
        self.wrapped
            .as_ref()
            .map(|(_, fenced)| fenced.as_str())
            .unwrap_or_default()
    }

    /// Renders the file through the inner [`MarkdownView`].
    pub fn render(
        &mut self,
        filename: &str,
        content: &str,
        options: &RenderOptions,
    ) -> Result<Arc<Rendered>, ChatmarkError> {
        let fenced = self.wrapped(filename, content).to_string();
        self.view.render(&fenced, options)
    }

    /// The inner markdown view.
    pub fn view_mut(&mut self) -> &mut MarkdownView {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::WidgetRenderer;

    #[test]
    fn equal_input_returns_the_cached_result() {
        let mut view = MarkdownView::default();
        let options = RenderOptions::default();
        let first = view.render("*hi*", &options).unwrap();
        let second = view.render("*hi*", &options).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(view.generation(), 1);
    }

    #[test]
    fn changed_options_rerender() {
        let mut view = MarkdownView::default();
        let first = view.render("x", &RenderOptions::default()).unwrap();
        let options = RenderOptions {
            class_name: Some("wide".into()),
            ..RenderOptions::default()
        };
        let second = view.render("x", &options).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(view.generation(), 2);
    }

    #[test]
    fn commit_before_render_schedules_nothing() {
        let mut view = MarkdownView::default();
        assert_eq!(view.commit(), None);
        assert_eq!(view.realized_html(), None);
    }

    #[test]
    fn repair_marks_file_widget_container() {
        let mut view = MarkdownView::default();
        view.render("```file\nreport.pdf\n```", &RenderOptions::default())
            .unwrap();
        let ticket = view.commit().unwrap();
        assert_eq!(
            view.apply_repair(ticket).unwrap(),
            RepairOutcome::Applied { changed: true }
        );
        let html = view.realized_html().unwrap();
        assert!(html.contains("<pre class=\"file-block\"><div class=\"file-instance\""));

        // Re-applying finds nothing left to do.
        let ticket = view.commit().unwrap();
        assert_eq!(
            view.apply_repair(ticket).unwrap(),
            RepairOutcome::Applied { changed: false }
        );
    }

    #[test]
    fn superseded_repair_is_stale() {
        let mut view = MarkdownView::default();
        let options = RenderOptions::default();
        view.render("```file\na.txt\n```", &options).unwrap();
        let old = view.commit().unwrap();

        view.render("```file\nb.txt\n```", &options).unwrap();
        assert_eq!(view.apply_repair(old).unwrap(), RepairOutcome::Stale);

        let fresh = view.commit().unwrap();
        assert_eq!(
            view.apply_repair(fresh).unwrap(),
            RepairOutcome::Applied { changed: true }
        );
        assert!(view.realized_html().unwrap().contains("b.txt"));
    }

    #[test]
    fn render_without_commit_makes_ticket_stale() {
        let mut view = MarkdownView::default();
        let options = RenderOptions::default();
        view.render("one", &options).unwrap();
        let ticket = view.commit().unwrap();
        view.render("two", &options).unwrap();
        assert_eq!(view.apply_repair(ticket).unwrap(), RepairOutcome::Stale);
        assert!(view.realized_html().unwrap().contains("one"));
    }

    #[test]
    fn file_view_wraps_by_extension() {
        let mut view = FileView::default();
        assert_eq!(view.wrapped("main.rs", "fn main(){}"), "```rs\nfn main(){}\n```");
    }

    #[test]
    fn file_view_rederives_only_on_content_change() {
        let mut view = FileView::default();
        assert_eq!(view.wrapped("a.rs", "x"), "```rs\nx\n```");
        assert_eq!(view.wrapped("a.py", "x"), "```rs\nx\n```");
        assert_eq!(view.wrapped("a.py", "y"), "```py\ny\n```");
    }

    #[test]
    fn file_view_render_is_memoized() {
        let mut view = FileView::default();
        let options = RenderOptions::default();
        let first = view.render("a.ts", "let a = 1;", &options).unwrap();
        let second = view.render("a.ts", "let a = 1;", &options).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.html.contains("<p>ts</p>"));
        assert_eq!(view.view_mut().generation(), 1);
    }

    struct Boxed;

    impl WidgetRenderer for Boxed {
        fn file_block(&self, content: &str) -> String {
            format!("<span class=\"file-instance\">{}</span>", content.trim())
        }

        fn progress_bar(&self, _content: &str) -> String {
            String::new()
        }
    }

    #[test]
    fn repair_uses_custom_widget_markup() {
        let mut view = MarkdownView::new(Renderer::new().with_widgets(Boxed));
        view.render("```file\nx\n```", &RenderOptions::default())
            .unwrap();
        let ticket = view.commit().unwrap();
        view.apply_repair(ticket).unwrap();
        assert_eq!(
            view.realized_html().unwrap(),
            "<div class=\"markdown-body\"><pre class=\"file-block\"><span class=\"file-instance\">x</span></pre></div>"
        );
    }
}
