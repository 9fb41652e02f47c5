use chatmark_core::{ClickOutcome, DialogKind, LinkKind, classify, decode};
use chatmark_render::{
    HighlightRequest, Highlighter, Interaction, MarkdownView, RenderOptions, Renderer,
    RepairOutcome, VirtualActionDialog, handle_link_click, normalize_file_blocks,
    open_reserved_link,
};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Records every language the highlighter is asked for.
#[derive(Clone, Default)]
struct RecordingHighlighter {
    languages: Rc<RefCell<Vec<String>>>,
}

impl Highlighter for RecordingHighlighter {
    fn highlight(&self, request: &HighlightRequest<'_>) -> String {
        self.languages.borrow_mut().push(request.language.to_string());
        format!("<code data-language=\"{}\">{}</code>", request.language, request.content)
    }
}

fn recording_renderer() -> (Renderer, Rc<RefCell<Vec<String>>>) {
    let highlighter = RecordingHighlighter::default();
    let languages = Rc::clone(&highlighter.languages);
    (Renderer::new().with_highlighter(highlighter), languages)
}

#[test]
fn malformed_url_is_ordinary() {
    assert_eq!(classify("ht!tp://::"), LinkKind::Ordinary);

    let rendered = Renderer::new()
        .render("[odd](ht!tp://::)", &RenderOptions::default())
        .expect("render should succeed");
    assert!(!rendered.html.contains("icon-"));
}

#[test]
fn empty_virtual_payload_decodes() {
    let command = decode("https://chatnio.virtual");
    assert_eq!(command.verb, "");
    assert_eq!(command.message, "");
}

#[test]
fn language_aliases_reach_the_highlighter() {
    let (renderer, languages) = recording_renderer();
    let rendered = renderer
        .render(
            "```ts\nconst a = 1;\n```\n\n```python\nprint(1)\n```\n\n```Rs\nfn f() {}\n```",
            &RenderOptions::default(),
        )
        .expect("render should succeed");

    assert_eq!(*languages.borrow(), vec!["typescript", "python", "rust"]);
    // The header shows the lower-cased tag, not the mapped name.
    assert!(rendered.html.contains("<p>ts</p>"));
    assert!(rendered.html.contains("<p>python</p>"));
    assert!(rendered.html.contains("<p>rs</p>"));
}

#[test]
fn widgets_never_reach_the_highlighter() {
    let (renderer, languages) = recording_renderer();
    let rendered = renderer
        .render(
            "```file\nreport.pdf\n```\n\n```progress\n40\n```",
            &RenderOptions::default(),
        )
        .expect("render should succeed");

    assert!(languages.borrow().is_empty());
    assert!(rendered.html.contains("class=\"file-instance\""));
    assert!(rendered.html.contains("aria-valuenow=\"40\""));
    assert!(rendered.interactions.is_empty());
}

#[test]
fn normalizer_is_idempotent_on_rendered_output() {
    let rendered = Renderer::new()
        .render(
            "```file\na.txt\n```\n\n- item\n\n```file\nb.txt\n```",
            &RenderOptions::default(),
        )
        .expect("render should succeed");

    let once = normalize_file_blocks(&rendered.html).expect("first pass");
    let twice = normalize_file_blocks(&once).expect("second pass");
    assert_eq!(once, twice);
    assert_eq!(once.matches("<pre class=\"file-block\">").count(), 2);
}

#[test]
fn render_from_file_equals_fenced_render() {
    let renderer = Renderer::new();
    let options = RenderOptions::default();
    let from_file = renderer
        .render_from_file("notes.rs", "fn main(){}", &options)
        .expect("render_from_file should succeed");
    let fenced = renderer
        .render("```rs\nfn main(){}\n```", &options)
        .expect("render should succeed");
    assert_eq!(from_file, fenced);
}

#[test]
fn variation_link_round_trip() {
    let (renderer, _) = recording_renderer();
    let rendered = renderer
        .render(
            "Try [a variation](https://chatnio.virtual/VARIATION-make-it-bigger)!",
            &RenderOptions::default(),
        )
        .expect("render should succeed");

    let Some(Interaction::VirtualAction { id, command }) = rendered.interactions.first() else {
        panic!("expected a virtual action, got {:?}", rendered.interactions);
    };
    assert_eq!(command.verb, "/VARIATION");
    assert_eq!(command.message, "/VARIATION make it bigger");
    assert!(rendered.html.contains(&format!("data-interaction=\"{id}\"")));

    // Host side: pressing the button and confirming sends the message once.
    let sent = RefCell::new(Vec::new());
    let sink = |message: &str| sent.borrow_mut().push(message.to_string());
    let mut dialog = VirtualActionDialog::new(command.clone());
    dialog.open();
    dialog.confirm(&sink);
    dialog.confirm(&sink);
    assert_eq!(*sent.borrow(), vec!["/VARIATION make it bigger".to_string()]);
}

#[test]
fn reserved_paths_open_exactly_one_dialog() {
    let opened = RefCell::new(Vec::new());
    let dialogs = |kind: DialogKind| opened.borrow_mut().push(kind);

    assert_eq!(
        handle_link_click("/subscribe", &dialogs),
        ClickOutcome::Intercepted(DialogKind::Subscription)
    );
    assert_eq!(*opened.borrow(), vec![DialogKind::Subscription]);

    assert_eq!(
        handle_link_click("/buy", &dialogs),
        ClickOutcome::Intercepted(DialogKind::Quota)
    );
    assert_eq!(
        *opened.borrow(),
        vec![DialogKind::Subscription, DialogKind::Quota]
    );

    assert_eq!(handle_link_click("/pricing", &dialogs), ClickOutcome::Navigate);
    assert_eq!(opened.borrow().len(), 2);
}

#[test]
fn rendered_reserved_links_open_exactly_one_dialog() {
    let rendered = Renderer::new()
        .render(
            "[Subscribe](/subscribe) then [buy more](/buy)",
            &RenderOptions::default(),
        )
        .expect("render should succeed");

    let opened = RefCell::new(Vec::new());
    let dialogs = |kind: DialogKind| opened.borrow_mut().push(kind);
    for interaction in &rendered.interactions {
        assert!(
            rendered
                .html
                .contains(&format!("data-interaction=\"{}\"", interaction.id()))
        );
        assert!(open_reserved_link(interaction, &dialogs).prevents_default());
    }
    assert_eq!(
        *opened.borrow(),
        vec![DialogKind::Subscription, DialogKind::Quota]
    );
}

#[test]
fn script_links_never_reach_the_output() {
    let accepting = RenderOptions {
        accept_raw_html: true,
        ..RenderOptions::default()
    };
    let rendered = Renderer::new()
        .render(
            "[click](javascript:alert(1)) <a href=\"javascript:alert(2)\">raw</a>",
            &accepting,
        )
        .expect("render should succeed");
    assert!(!rendered.html.contains("javascript:alert"));
}

#[test]
fn raw_html_anchor_matches_markdown_link() {
    let accepting = RenderOptions {
        accept_raw_html: true,
        ..RenderOptions::default()
    };
    let renderer = Renderer::new();
    let raw = renderer
        .render("<a href=\"https://github.com/x\">gh</a>", &accepting)
        .expect("render should succeed");
    let markdown = renderer
        .render("[gh](https://github.com/x)", &accepting)
        .expect("render should succeed");
    assert_eq!(raw.html, markdown.html);
}

#[test]
fn memoized_view_and_deferred_repair() {
    let mut view = MarkdownView::default();
    let options = RenderOptions::default();

    let first = view
        .render("```file\nslides.key\n```", &options)
        .expect("render should succeed");
    let again = view
        .render("```file\nslides.key\n```", &options)
        .expect("render should succeed");
    assert!(Arc::ptr_eq(&first, &again));

    let ticket = view.commit().expect("a render is pending");
    assert_eq!(
        view.apply_repair(ticket).expect("repair should succeed"),
        RepairOutcome::Applied { changed: true }
    );
    // The memoized result is untouched; only the realized copy is repaired.
    assert!(!first.html.contains("file-block"));
    assert!(
        view.realized_html()
            .expect("committed")
            .contains("file-block")
    );
}

#[derive(Deserialize, Debug)]
struct RenderedJson {
    html: String,
    interactions: Vec<InteractionJson>,
}

#[derive(Deserialize, Debug)]
struct InteractionJson {
    #[serde(rename = "type")]
    kind: String,
    id: usize,
}

#[test]
fn json_boundary() {
    let options = RenderOptions::from_json(r#"{"codeStyle":"compact","className":"bubble"}"#)
        .expect("options should parse");
    let rendered = Renderer::new()
        .render(
            "[go](https://chatnio.virtual/REROLL)\n\n```js\nx\n```",
            &options,
        )
        .expect("render should succeed");

    let json = rendered.to_json().expect("serialize");
    let parsed: RenderedJson = serde_json::from_str(&json).expect("deserialize result");

    assert!(parsed.html.starts_with("<div class=\"markdown-body bubble\">"));
    assert!(parsed.html.contains("code-block compact"));
    let kinds: Vec<_> = parsed
        .interactions
        .iter()
        .map(|i| (i.kind.as_str(), i.id))
        .collect();
    assert_eq!(kinds, vec![("virtualAction", 0), ("copyCode", 1)]);
}
