// src/analyzer/links.rs
// =============================================================================
// Decides whether a link points back at the analyzed site or somewhere else.
//
// The rules:
// - A relative reference ("/docs", "page.html", "#top", "") has no host, so
//   it is internal.
// - An absolute URL is internal when its host (and explicit port) matches the
//   page's host, ignoring case. Otherwise it is external.
// - Anything malformed is external. It will then be probed like any other
//   external link and fail, which is how it ends up counted as inaccessible.
// - If the page address itself is malformed, nothing can match it, so every
//   link is external.
//
// We compare the raw href as written. No resolving against the base, no
// normalization: "/a" and "/a/" are two different links.
// =============================================================================

use log::warn;
use url::{ParseError, Url};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Internal,
    External,
}

/// Classifies links against one page address
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    // None when the page address itself didn't parse
    base: Option<Url>,
}

impl LinkClassifier {
    pub fn new(base_address: &str) -> Self {
        let base = match Url::parse(base_address) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(
                    "Invalid base URL '{}' ({}), all links will be treated as external",
                    base_address, e
                );
                None
            }
        };

        Self { base }
    }

    pub fn classify(&self, href: &str) -> LinkKind {
        let Some(base) = &self.base else {
            return LinkKind::External;
        };

        match Url::parse(href) {
            Ok(target) => {
                if same_origin_host(base, &target) {
                    LinkKind::Internal
                } else {
                    LinkKind::External
                }
            }
            Err(ParseError::RelativeUrlWithoutBase) => {
                if is_valid_relative_reference(href) {
                    LinkKind::Internal
                } else {
                    warn!("Malformed relative link '{}', treating it as external", href);
                    LinkKind::External
                }
            }
            Err(e) => {
                warn!("Malformed link '{}' ({}), treating it as external", href, e);
                LinkKind::External
            }
        }
    }
}

// Hosts compared case-insensitively; ports only when spelled out (the url
// crate drops default ports, so "http://a:80" and "http://a" are the same)
fn same_origin_host(base: &Url, target: &Url) -> bool {
    let hosts_match = match (base.host_str(), target.host_str()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, None) => true,
        _ => false,
    };

    hosts_match && base.port() == target.port()
}

// In a relative reference with no scheme, the first path segment may not
// contain a colon (RFC 3986, section 4.2). "a:b/c" is not a path, it's junk.
fn is_valid_relative_reference(href: &str) -> bool {
    let first_segment = href
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or("");

    !first_segment.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(base: &str, href: &str) -> LinkKind {
        LinkClassifier::new(base).classify(href)
    }

    #[test]
    fn test_same_host_is_internal() {
        assert_eq!(
            classify("https://www.google.com/", "https://www.google.com/test"),
            LinkKind::Internal
        );
    }

    #[test]
    fn test_host_match_ignores_case() {
        assert_eq!(
            classify("https://Example.COM/", "http://example.com/about"),
            LinkKind::Internal
        );
    }

    #[test]
    fn test_other_host_is_external() {
        assert_eq!(
            classify("https://www.google.com/", "https://www.yahoo.com/"),
            LinkKind::External
        );
    }

    #[test]
    fn test_subdomain_is_external() {
        assert_eq!(
            classify("https://example.com/", "https://blog.example.com/"),
            LinkKind::External
        );
    }

    #[test]
    fn test_explicit_port_must_match() {
        assert_eq!(
            classify("http://example.com:8080/", "http://example.com/"),
            LinkKind::External
        );
        assert_eq!(
            classify("http://example.com:8080/", "http://EXAMPLE.com:8080/x"),
            LinkKind::Internal
        );
    }

    #[test]
    fn test_relative_links_are_internal() {
        let base = "http://example.com";
        for href in ["/local", "page.html", "../up", "#section", "?q=1", "", "//cdn.example/x"] {
            assert_eq!(classify(base, href), LinkKind::Internal, "href {:?}", href);
        }
    }

    #[test]
    fn test_non_http_schemes_are_external() {
        assert_eq!(
            classify("http://example.com", "mailto:test@example.com"),
            LinkKind::External
        );
        assert_eq!(
            classify("http://example.com", "javascript:void(0)"),
            LinkKind::External
        );
    }

    #[test]
    fn test_malformed_target_is_external() {
        assert_eq!(classify("https://www.google.com/", ";;:::12abc"), LinkKind::External);
        assert_eq!(classify("https://www.google.com/", "http://"), LinkKind::External);
    }

    #[test]
    fn test_malformed_base_makes_everything_external() {
        assert_eq!(classify(";;:::12abc", "https://www.google.com/"), LinkKind::External);
        assert_eq!(classify(";;:::12abc", "/local"), LinkKind::External);
    }
}
