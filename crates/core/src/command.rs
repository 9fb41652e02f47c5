//! Virtual command links.
//!
//! A link such as `https://chatnio.virtual/VARIATION-make-it-bigger` is not a
//! navigable destination: it encodes a chat message the user can send with
//! one click. Dashes stand in for spaces in the payload.

use crate::icon::Icon;
use serde::Serialize;

/// Scheme and host reserved for virtual command links.
pub const VIRTUAL_PREFIX: &str = "https://chatnio.virtual";

/// A decoded virtual command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VirtualCommand {
    /// First space-delimited token of `message` (e.g. `/VARIATION`).
    pub verb: String,
    /// The message sent when the command is confirmed.
    pub message: String,
}

impl VirtualCommand {
    /// Icon shown before the command's link text, if the verb is known.
    pub fn icon(&self) -> Option<Icon> {
        icon_for(&self.verb)
    }
}

/// Returns true when `url` carries the reserved virtual command prefix.
pub fn is_virtual(url: &str) -> bool {
    url.starts_with(VIRTUAL_PREFIX)
}

/// Decodes the payload of a virtual command URL.
///
/// Strips exactly the prefix length from the front (whatever those bytes
/// are), replaces every `-` with a space and splits off the verb at the first
/// space. Total: an empty payload yields an empty verb and message.
///
/// # Examples
///
/// ```
/// use chatmark_core::command::decode;
///
/// let cmd = decode("https://chatnio.virtual/UPSCALE-1");
/// assert_eq!(cmd.verb, "/UPSCALE");
/// assert_eq!(cmd.message, "/UPSCALE 1");
/// ```
pub fn decode(url: &str) -> VirtualCommand {
    let payload = url.get(VIRTUAL_PREFIX.len()..).unwrap_or("");
    let message = payload.replace('-', " ");
    let verb = message.split(' ').next().unwrap_or("").to_string();
    VirtualCommand { verb, message }
}

/// Maps a command verb to its icon. Unknown verbs have none.
pub fn icon_for(verb: &str) -> Option<Icon> {
    match verb {
        "/VARIATION" => Some(Icon::Wand),
        "/UPSCALE" => Some(Icon::Maximize),
        "/REROLL" => Some(Icon::RefreshCcwDot),
        _ => None,
    }
}
