//! Utility functions and helpers.

pub mod fs;
pub mod http;

use url::Url;

/// Resolve a potentially relative link against the page URL into a
/// canonical absolute URL.
///
/// The fragment is dropped so that `#section` anchors into the same
/// document share one identity. Returns `None` for unresolvable links and
/// non-HTTP schemes.
pub fn canonical_url(base: &Url, href: &str) -> Option<String> {
    let mut resolved = base.join(href.trim()).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved.to_string())
}
