//! Wrapping whole files as fenced code blocks.

/// Language tag for a file name: the text after the last `.`.
///
/// Empty when the name has no dot. No alias mapping happens here; the code
/// dispatcher applies it later.
///
/// # Examples
///
/// ```
/// use chatmark_render::transform::fence::language_from_filename;
///
/// assert_eq!(language_from_filename("notes.rs"), "rs");
/// assert_eq!(language_from_filename("archive.tar.gz"), "gz");
/// assert_eq!(language_from_filename("Makefile"), "");
/// ```
pub fn language_from_filename(name: &str) -> &str {
    name.rsplit_once('.').map_or("", |(_, ext)| ext)
}

/// Wraps `content` in a fenced code block tagged `tag`.
///
/// The fence is at least three backticks and always longer than the longest
/// backtick run inside `content`, so the content cannot close it early.
pub fn wrap_in_fence(tag: &str, content: &str) -> String {
    let fence = "`".repeat(longest_backtick_run(content).max(2) + 1);
    let mut out = String::with_capacity(content.len() + tag.len() + fence.len() * 2 + 2);
    out.push_str(&fence);
    out.push_str(tag);
    out.push('\n');
    out.push_str(content);
    out.push('\n');
    out.push_str(&fence);
    out
}

fn longest_backtick_run(content: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in content.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
