//! Sanitization of user-controlled page text.
//!
//! Page titles may carry a little inline markup and links come straight from
//! the content store, so both pass through a [`Sanitizer`] before they are
//! embedded. The renderer still attribute-escapes URLs afterwards, so
//! [`Sanitizer::clean_url`] only has to decide what URL is acceptable, not
//! how to quote it.

use std::borrow::Cow;

/// Inline tags a title may keep. Attributes are always stripped.
pub const ALLOWED_TITLE_TAGS: &[&str] = &[
    "b", "br", "code", "em", "i", "mark", "span", "strong", "sub", "sup",
];

/// URL schemes accepted by [`DefaultSanitizer::clean_url`].
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Collaborator that makes titles and links safe to embed in markup.
pub trait Sanitizer: Send + Sync {
    /// Filter a title down to allowed inline HTML; the result is emitted raw.
    fn sanitize_html<'a>(&self, html: &'a str) -> Cow<'a, str>;

    /// Clean a link target. An empty result means the link was rejected.
    fn clean_url<'a>(&self, url: &'a str) -> Cow<'a, str>;
}

/// Allowed-tag title filter and scheme-checking URL cleaner.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSanitizer;

impl Sanitizer for DefaultSanitizer {
    fn sanitize_html<'a>(&self, html: &'a str) -> Cow<'a, str> {
        if !html.contains(['<', '>', '&']) {
            return Cow::Borrowed(html);
        }

        let mut out = String::with_capacity(html.len() + 16);
        let mut rest = html;
        while let Some(pos) = rest.find(['<', '>', '&']) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            if tail.starts_with('<') {
                if let Some((tag, consumed)) = allowed_tag(tail) {
                    out.push_str(&tag);
                    rest = &tail[consumed..];
                    continue;
                }
                out.push_str("&lt;");
            } else if tail.starts_with('>') {
                out.push_str("&gt;");
            } else if let Some(len) = entity_len(tail) {
                out.push_str(&tail[..len]);
                rest = &tail[len..];
                continue;
            } else {
                out.push_str("&amp;");
            }
            rest = &tail[1..];
        }
        out.push_str(rest);
        Cow::Owned(out)
    }

    fn clean_url<'a>(&self, url: &'a str) -> Cow<'a, str> {
        let trimmed = url.trim();
        if LinkType::from_href(trimmed) == LinkType::Disallowed {
            return Cow::Borrowed("");
        }

        let needs_rewrite = trimmed.chars().any(|c| c.is_control() || c == ' ');
        if !needs_rewrite {
            return Cow::Borrowed(trimmed);
        }

        let mut out = String::with_capacity(trimmed.len() + 8);
        for c in trimmed.chars() {
            match c {
                ' ' => out.push_str("%20"),
                c if c.is_control() => {}
                c => out.push(c),
            }
        }
        Cow::Owned(out)
    }
}

/// Match an allowed tag at the start of `s` (which begins with `<`).
///
/// Returns the normalized tag and the number of bytes consumed.
fn allowed_tag(s: &str) -> Option<(String, usize)> {
    let end = s.find('>')?;
    let inner = &s[1..end];
    if inner.contains('<') {
        return None;
    }

    let (closing, name) = match inner.strip_prefix('/') {
        Some(name) => (true, name),
        None => (false, inner),
    };
    if name.starts_with(|c: char| c.is_ascii_whitespace()) {
        return None;
    }
    let name = name.trim_end().trim_end_matches('/').trim_end();
    // Attributes are dropped: only the tag name survives.
    let name = name.split_ascii_whitespace().next()?;
    if !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    let lower = name.to_ascii_lowercase();
    if !ALLOWED_TITLE_TAGS.contains(&lower.as_str()) {
        return None;
    }

    let tag = match (closing, lower.as_str()) {
        (true, "br") => return Some((String::new(), end + 1)),
        (true, _) => format!("</{lower}>"),
        (false, _) => format!("<{lower}>"),
    };
    Some((tag, end + 1))
}

/// Length of a well-formed character reference at the start of `s`.
fn entity_len(s: &str) -> Option<usize> {
    let end = s.find(';')?;
    let body = &s[1..end];
    let valid = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit())
    } else if let Some(dec) = body.strip_prefix('#') {
        !dec.is_empty() && dec.bytes().all(|b| b.is_ascii_digit())
    } else {
        !body.is_empty() && body.bytes().all(|b| b.is_ascii_alphanumeric())
    };
    valid.then_some(end + 1)
}

// =============================================================================
// LinkType
// =============================================================================

/// Link type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkType {
    #[default]
    None,
    Absolute,   // /path
    Relative,   // ./file
    Fragment,   // #anchor
    External,   // https://...
    Email,      // mailto:...
    Phone,      // tel:...
    Disallowed, // javascript:, data:, ...
}

impl LinkType {
    /// Infer link type from href string
    pub fn from_href(href: &str) -> Self {
        let href = href.trim();
        if href.is_empty() {
            return Self::None;
        }
        if href.starts_with("//") {
            return Self::External;
        }
        if let Some(scheme) = url_scheme(href) {
            let scheme = scheme.to_ascii_lowercase();
            return match scheme.as_str() {
                "mailto" => Self::Email,
                "tel" => Self::Phone,
                s if ALLOWED_URL_SCHEMES.contains(&s) => Self::External,
                _ => Self::Disallowed,
            };
        }
        if href.starts_with('/') {
            Self::Absolute
        } else if href.starts_with('#') {
            Self::Fragment
        } else {
            Self::Relative
        }
    }
}

/// Scheme prefix of a URL: the part before the first `:` when that colon
/// comes before any `/`, `?` or `#`.
fn url_scheme(href: &str) -> Option<&str> {
    let colon = href.find(':')?;
    if href[..colon].contains(['/', '?', '#']) {
        return None;
    }
    // Browsers skip tabs and newlines inside a scheme ("java\tscript:").
    let scheme = &href[..colon];
    let is_scheme = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') || c.is_whitespace() || c.is_control());
    is_scheme.then_some(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type() {
        assert_eq!(LinkType::from_href("https://example.com"), LinkType::External);
        assert_eq!(LinkType::from_href("/about"), LinkType::Absolute);
        assert_eq!(LinkType::from_href("#section"), LinkType::Fragment);
        assert_eq!(LinkType::from_href("./file"), LinkType::Relative);
        assert_eq!(LinkType::from_href("mailto:a@b.com"), LinkType::Email);
        assert_eq!(LinkType::from_href("tel:+123"), LinkType::Phone);
        assert_eq!(LinkType::from_href("javascript:alert(1)"), LinkType::Disallowed);
        assert_eq!(LinkType::from_href("/path?x=a:b"), LinkType::Absolute);
    }

    #[test]
    fn test_sanitize_keeps_allowed_tags() {
        let s = DefaultSanitizer;
        assert!(matches!(s.sanitize_html("Plain title"), Cow::Borrowed("Plain title")));
        assert_eq!(
            s.sanitize_html(r#"<strong class="x">Bold</strong> &amp; <EM>more</EM>"#),
            "<strong>Bold</strong> &amp; <em>more</em>"
        );
        assert_eq!(s.sanitize_html("a<br/>b"), "a<br>b");
    }

    #[test]
    fn test_sanitize_escapes_everything_else() {
        let s = DefaultSanitizer;
        assert_eq!(
            s.sanitize_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
        assert_eq!(s.sanitize_html("Fish & Chips"), "Fish &amp; Chips");
        assert_eq!(s.sanitize_html("1 < 2 > 0"), "1 &lt; 2 &gt; 0");
        assert_eq!(s.sanitize_html("&#169; &#xA9;"), "&#169; &#xA9;");
    }

    #[test]
    fn test_clean_url() {
        let s = DefaultSanitizer;
        assert_eq!(s.clean_url(" https://example.com/a "), "https://example.com/a");
        assert_eq!(s.clean_url("/my page/"), "/my%20page/");
        assert_eq!(s.clean_url("javascript:alert(1)"), "");
        assert_eq!(s.clean_url("JavaScript:alert(1)"), "");
        assert_eq!(s.clean_url("data:text/html,x"), "");
        assert_eq!(s.clean_url("mailto:me@example.com"), "mailto:me@example.com");
    }
}
