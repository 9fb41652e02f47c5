//! Code-fence language tag normalization.

/// Short tags users type in fences, mapped to the names the highlighter knows.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("html", "htmlbars"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("jsx", "javascript"),
    ("tsx", "typescript"),
    ("rs", "rust"),
];

/// Returns the highlighter language name for a (lower-cased) fence tag.
///
/// Unmapped tags pass through unchanged.
///
/// # Examples
///
/// ```
/// use chatmark_core::language::canonical_language;
///
/// assert_eq!(canonical_language("ts"), "typescript");
/// assert_eq!(canonical_language("python"), "python");
/// ```
pub fn canonical_language(tag: &str) -> &str {
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map(|(_, name)| *name)
        .unwrap_or(tag)
}

/// Extracts the language tag from a `language-xxx` class attribute.
///
/// Takes the first run of word characters after `language-` and lower-cases
/// it. Returns `None` when no such class is present.
pub fn language_from_class(class: &str) -> Option<String> {
    let start = class.find("language-")? + "language-".len();
    let tag: String = class[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_lowercase())
    }
}

/// Extracts the language tag from a fence info string (e.g. `rs title="x"`).
///
/// Mirrors [`language_from_class`] applied to `language-{info}`.
pub fn language_from_info(info: &str) -> Option<String> {
    let tag: String = info
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_lowercase())
    }
}
