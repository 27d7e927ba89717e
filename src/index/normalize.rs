// src/index/normalize.rs
// =============================================================================
// Turns "parent URL + href" into the canonical URL used as a dedup key.
//
// Listings are walked by string concatenation: the child of
// `https://host/pub/` with href `a/` is `https://host/pub/a/`. Concatenation
// happily produces `https://host/pub//a/` when a server emits hrefs with a
// leading slash or a root ends with `//`, so every URL goes through
// normalize() before it is printed, compared or fetched.
//
// normalize() is textual on purpose. It never parses the URL and never fails,
// whatever garbage a listing contains.
// =============================================================================

use url::Url;

/// Collapses doubled path separators and repairs the scheme separator
///
/// Examples:
///   "https://host//pub///a/" -> "https://host/pub/a/"
///   "https:/host/a"          -> "https://host/a"
///
/// normalize(normalize(x)) == normalize(x) for every input.
pub fn normalize(raw: &str) -> String {
    let mut url = raw.to_string();

    // A single replace pass turns "///" into "//", so keep going until no
    // doubled separator is left.
    while url.contains("//") {
        url = url.replace("//", "/");
    }

    // The loop above also ate the scheme's "//"; put it back once.
    if let Some(pos) = url.find(":/") {
        url.replace_range(pos..pos + 2, "://");
    }

    url
}

/// Builds the canonical URL of an href found on the page at `parent`
///
/// Relative hrefs (what directory listings almost always emit) are appended
/// to the parent. Hrefs carrying their own scheme, or starting with `/`, are
/// resolved like a browser would, otherwise `https://host/pub/` + `/pub/a/`
/// would point at `/pub/pub/a/`.
pub fn resolve(parent: &str, href: &str) -> String {
    if is_absolute(href) || href.starts_with('/') {
        if let Ok(base) = Url::parse(parent) {
            if let Ok(joined) = base.join(href) {
                return normalize(joined.as_str());
            }
        }
    }

    normalize(&format!("{}{}", parent, href))
}

/// True when the href names its own scheme (or is protocol-relative)
fn is_absolute(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || href.starts_with("//")
}
