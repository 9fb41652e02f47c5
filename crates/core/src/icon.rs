//! Presentational icon identifiers shared by link and command rendering.

use serde::Serialize;

/// An inline icon drawn before link text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    /// GitHub mark.
    Github,
    /// Twitter bird.
    Twitter,
    /// YouTube play button.
    Youtube,
    /// CodePen cube.
    Codepen,
    /// CodeSandbox box.
    Codesandbox,
    /// Magic wand, used for variation commands.
    Wand,
    /// Expand arrows, used for upscale commands.
    Maximize,
    /// Circular arrows, used for reroll commands.
    RefreshCcwDot,
}

impl Icon {
    /// Stable kebab-case identifier, used as the icon's CSS class suffix.
    pub fn name(self) -> &'static str {
        match self {
            Icon::Github => "github",
            Icon::Twitter => "twitter",
            Icon::Youtube => "youtube",
            Icon::Codepen => "codepen",
            Icon::Codesandbox => "codesandbox",
            Icon::Wand => "wand",
            Icon::Maximize => "maximize",
            Icon::RefreshCcwDot => "refresh-ccw-dot",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
