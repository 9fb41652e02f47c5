//! Link classification.
//!
//! Every anchor in a rendered message falls into exactly one [`LinkKind`],
//! decided from the URL string alone.

use crate::command::{self, VirtualCommand};
use crate::icon::Icon;
use serde::Serialize;
use url::Url;

/// Platforms whose links get an icon annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SocialPlatform {
    /// github.com
    Github,
    /// twitter.com
    Twitter,
    /// youtube.com
    Youtube,
    /// codepen.io
    Codepen,
    /// codesandbox.io
    Codesandbox,
}

/// Domains checked in order; the first match wins.
const SOCIAL_DOMAINS: &[(&str, SocialPlatform)] = &[
    ("github.com", SocialPlatform::Github),
    ("twitter.com", SocialPlatform::Twitter),
    ("youtube.com", SocialPlatform::Youtube),
    ("codepen.io", SocialPlatform::Codepen),
    ("codesandbox.io", SocialPlatform::Codesandbox),
];

impl SocialPlatform {
    /// Icon drawn before links to this platform.
    pub fn icon(self) -> Icon {
        match self {
            SocialPlatform::Github => Icon::Github,
            SocialPlatform::Twitter => Icon::Twitter,
            SocialPlatform::Youtube => Icon::Youtube,
            SocialPlatform::Codepen => Icon::Codepen,
            SocialPlatform::Codesandbox => Icon::Codesandbox,
        }
    }

    /// The platform's registered domain.
    pub fn domain(self) -> &'static str {
        SOCIAL_DOMAINS
            .iter()
            .find(|(_, platform)| *platform == self)
            .map(|(domain, _)| *domain)
            .unwrap_or_default()
    }
}

/// Category of a link target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LinkKind {
    /// Regular external link.
    Ordinary,
    /// Link to a known platform, annotated with its icon.
    Social {
        /// Matched platform.
        platform: SocialPlatform,
    },
    /// In-app command rendered as a confirmation affordance.
    VirtualCommand {
        /// Decoded command.
        command: VirtualCommand,
    },
}

impl LinkKind {
    /// Icon drawn before the link's own text, if any.
    pub fn icon(&self) -> Option<Icon> {
        match self {
            LinkKind::Ordinary => None,
            LinkKind::Social { platform } => Some(platform.icon()),
            LinkKind::VirtualCommand { command } => command.icon(),
        }
    }
}

/// How a hostname is compared against the social domain list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostMatch {
    /// Hostname contains the domain anywhere (`evil-github.com.attacker.net` matches).
    #[default]
    Substring,
    /// Hostname equals the domain or ends with `.domain`.
    Suffix,
}

impl HostMatch {
    fn matches(self, host: &str, domain: &str) -> bool {
        match self {
            HostMatch::Substring => host.contains(domain),
            HostMatch::Suffix => {
                host == domain
                    || host
                        .strip_suffix(domain)
                        .is_some_and(|rest| rest.ends_with('.'))
            }
        }
    }
}

/// Classifies a link URL with the default substring host matching.
///
/// Never fails: unparsable URLs are [`LinkKind::Ordinary`].
///
/// # Examples
///
/// ```
/// use chatmark_core::link::{classify, LinkKind, SocialPlatform};
///
/// assert_eq!(
///     classify("https://github.com/rust-lang/rust"),
///     LinkKind::Social { platform: SocialPlatform::Github },
/// );
/// assert_eq!(classify("not a url"), LinkKind::Ordinary);
/// ```
pub fn classify(url: &str) -> LinkKind {
    classify_with(url, HostMatch::Substring)
}

/// Classifies a link URL, accepting only exact social domains or their subdomains.
pub fn classify_strict(url: &str) -> LinkKind {
    classify_with(url, HostMatch::Suffix)
}

/// Classifies a link URL with an explicit host matching mode.
pub fn classify_with(url: &str, mode: HostMatch) -> LinkKind {
    if command::is_virtual(url) {
        return LinkKind::VirtualCommand {
            command: command::decode(url),
        };
    }

    match social_platform(url, mode) {
        Some(platform) => LinkKind::Social { platform },
        None => LinkKind::Ordinary,
    }
}

/// URL schemes allowed in emitted `href` / `src` attributes.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Returns `url` when it is safe to emit, or an empty string.
///
/// Relative references (no scheme, or a `/`, `?` or `#` before the first
/// `:`) and the schemes in the allow-list pass; `javascript:`, `data:` and
/// every other scheme are replaced.
///
/// # Examples
///
/// ```
/// use chatmark_core::link::sanitize_url;
///
/// assert_eq!(sanitize_url("https://chatnio.virtual/REROLL"), "https://chatnio.virtual/REROLL");
/// assert_eq!(sanitize_url("/buy"), "/buy");
/// assert_eq!(sanitize_url("javascript:alert(1)"), "");
/// ```
pub fn sanitize_url(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };
    if url[..colon].contains(['/', '?', '#']) {
        return url;
    }
    let scheme = &url[..colon];
    if SAFE_SCHEMES
        .iter()
        .any(|safe| safe.eq_ignore_ascii_case(scheme))
    {
        url
    } else {
        ""
    }
}

/// Looks up the social platform for a URL's hostname.
pub fn social_platform(url: &str, mode: HostMatch) -> Option<SocialPlatform> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    SOCIAL_DOMAINS
        .iter()
        .find(|(domain, _)| mode.matches(host, domain))
        .map(|(_, platform)| *platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_urls_are_ordinary() {
        for url in ["", "github.com", "://", "http://[::1", "/subscribe", "hello world"] {
            assert_eq!(classify(url), LinkKind::Ordinary, "{url}");
            assert_eq!(classify(url).icon(), None);
        }
    }

    #[test]
    fn social_hosts_get_icons() {
        let cases = [
            ("https://github.com/a/b", SocialPlatform::Github, Icon::Github),
            ("https://twitter.com/x", SocialPlatform::Twitter, Icon::Twitter),
            ("https://www.youtube.com/watch?v=1", SocialPlatform::Youtube, Icon::Youtube),
            ("https://codepen.io/pen", SocialPlatform::Codepen, Icon::Codepen),
            ("https://codesandbox.io/s/1", SocialPlatform::Codesandbox, Icon::Codesandbox),
        ];
        for (url, platform, icon) in cases {
            let kind = classify(url);
            assert_eq!(kind, LinkKind::Social { platform });
            assert_eq!(kind.icon(), Some(icon));
        }
    }

    #[test]
    fn other_hosts_are_ordinary() {
        assert_eq!(classify("https://www.rust-lang.org/"), LinkKind::Ordinary);
        assert_eq!(classify("mailto:someone@github.com"), LinkKind::Ordinary);
    }

    #[test]
    fn substring_matching_accepts_lookalikes() {
        assert_eq!(
            classify("https://evil-github.com.attacker.net/"),
            LinkKind::Social {
                platform: SocialPlatform::Github
            }
        );
    }

    #[test]
    fn strict_matching_rejects_lookalikes() {
        assert_eq!(
            classify_strict("https://evil-github.com.attacker.net/"),
            LinkKind::Ordinary
        );
        assert_eq!(classify_strict("https://notgithub.com/"), LinkKind::Ordinary);
        assert_eq!(
            classify_strict("https://gist.github.com/x"),
            LinkKind::Social {
                platform: SocialPlatform::Github
            }
        );
        assert_eq!(
            classify_strict("https://codepen.io/"),
            LinkKind::Social {
                platform: SocialPlatform::Codepen
            }
        );
    }

    #[test]
    fn virtual_prefix_wins_over_parsing() {
        let kind = classify("https://chatnio.virtual/VARIATION-make-it-bigger");
        match &kind {
            LinkKind::VirtualCommand { command } => {
                assert_eq!(command.verb, "/VARIATION");
                assert_eq!(command.message, "/VARIATION make it bigger");
            }
            other => panic!("expected virtual command, got {other:?}"),
        }
        assert_eq!(kind.icon(), Some(Icon::Wand));
    }

    #[test]
    fn unsafe_schemes_are_blanked() {
        for url in [
            "javascript:alert(1)",
            "JavaScript:alert(1)",
            "data:text/html,<b>x</b>",
            "vbscript:msgbox",
            "file:///etc/passwd",
        ] {
            assert_eq!(sanitize_url(url), "", "{url}");
        }
    }

    #[test]
    fn safe_and_relative_urls_pass() {
        for url in [
            "https://github.com/a",
            "HTTP://example.com",
            "mailto:someone@example.com",
            "/subscribe",
            "#section",
            "?q=a:b",
            "docs/a:b",
            "plain",
            "",
        ] {
            assert_eq!(sanitize_url(url), url, "{url}");
        }
    }

    #[test]
    fn platform_domains_round_trip_through_table() {
        assert_eq!(SocialPlatform::Youtube.domain(), "youtube.com");
        assert_eq!(SocialPlatform::Codesandbox.domain(), "codesandbox.io");
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_string(&classify("https://github.com")).unwrap();
        assert_eq!(json, r#"{"type":"social","platform":"github"}"#);
    }
}
