// src/index/links.rs
// =============================================================================
// This module pulls the candidate entries out of a directory listing page.
//
// We use the `scraper` crate (html5ever underneath), which is very tolerant of
// broken markup: almost any text body produces a document. Apache, nginx,
// lighttpd and IIS listings are all plain <a href> lists, so one selector is
// enough.
//
// What is NOT an entry:
// - sort links like `?C=N;O=D`
// - the parent directory (`../`, `/`, anything with `/../`, or any link whose
//   text says "Parent Directory")
// - in-page anchors and non-HTTP schemes (`#top`, `mailto:`, `javascript:`)
//
// Order matters: entries are returned in document order, which is the order
// the server listed them in and the order the tree is drawn in.
// =============================================================================

use scraper::{Html, Selector};

use crate::error::ParseError;

/// One anchor that survived the exclusion rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    /// Visible text of the anchor
    pub text: String,
}

// How many leading bytes we sniff for NUL bytes before calling a body binary
const SNIFF_LEN: usize = 1024;

/// Extracts the listing entries from a fetched body
///
/// Fails only when the body is clearly not a text document (NUL bytes near
/// the start, e.g. the "index" was really a zip file) or the selector cannot
/// be built.
pub fn extract_links(body: &[u8]) -> Result<Vec<Anchor>, ParseError> {
    if body.iter().take(SNIFF_LEN).any(|byte| *byte == 0) {
        return Err(ParseError::Binary);
    }

    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    let selector = Selector::parse("a").map_err(|e| ParseError::Selector(format!("{:?}", e)))?;

    let anchors = document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim().to_string();
            let text = element.text().collect::<String>().trim().to_string();
            Some(Anchor { href, text })
        })
        .filter(|anchor| !is_excluded(&anchor.href, &anchor.text))
        .collect();

    Ok(anchors)
}

/// True for anchors that do not name a child of the listed directory
fn is_excluded(href: &str, text: &str) -> bool {
    let lower_href = href.to_ascii_lowercase();

    href.is_empty()
        || href.starts_with('?')
        || href.starts_with('#')
        || href == "../"
        || href == "/"
        || href.starts_with("../")
        || href.contains("/../")
        || lower_href.starts_with("mailto:")
        || lower_href.starts_with("javascript:")
        || lower_href.starts_with("tel:")
        || text.to_lowercase().contains("parent")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hrefs(html: &str) -> Vec<String> {
        extract_links(html.as_bytes())
            .unwrap()
            .into_iter()
            .map(|anchor| anchor.href)
            .collect()
    }

    #[test]
    fn test_apache_listing() {
        let html = r#"
            <html><body><h1>Index of /</h1>
            <pre><a href="?C=N;O=D">Name</a> <a href="?C=M;O=A">Last modified</a>
            <hr><a href="/">Parent Directory</a>
            <a href="a/">a/</a>
            <a href="b.txt">b.txt</a>
            </pre></body></html>
        "#;
        assert_eq!(hrefs(html), vec!["a/", "b.txt"]);
    }

    #[test]
    fn test_nginx_listing() {
        let html = r#"<html><body><pre><a href="../">../</a>
<a href="a/">a/</a>                 01-Jan-2024 00:00       -
<a href="b.txt">b.txt</a>           01-Jan-2024 00:00      12
</pre></body></html>"#;
        assert_eq!(hrefs(html), vec!["a/", "b.txt"]);
    }

    #[test]
    fn test_parent_text_is_case_insensitive() {
        let html = r#"<a href="up/">PARENT folder</a><a href="keep/">keep</a>"#;
        assert_eq!(hrefs(html), vec!["keep/"]);
    }

    #[test]
    fn test_dot_dot_segments_are_skipped() {
        let html = r#"<a href="x/../y/">y</a><a href="../z/">z</a><a href="ok/">ok</a>"#;
        assert_eq!(hrefs(html), vec!["ok/"]);
    }

    #[test]
    fn test_skip_anchors_and_other_schemes() {
        let html = r##"
            <a href="#top">top</a>
            <a href="mailto:admin@example.test">mail</a>
            <a href="javascript:void(0)">js</a>
            <a>no href</a>
            <a href="">empty</a>
            <a href="file.iso">file.iso</a>
        "##;
        assert_eq!(hrefs(html), vec!["file.iso"]);
    }

    #[test]
    fn test_keeps_document_order_and_text() {
        let html = r#"<a href="z.txt">Zed</a><a href="a.txt">Ay</a>"#;
        let anchors = extract_links(html.as_bytes()).unwrap();
        assert_eq!(anchors[0], Anchor { href: "z.txt".into(), text: "Zed".into() });
        assert_eq!(anchors[1].href, "a.txt");
    }

    #[test]
    fn test_malformed_html_still_parses() {
        let html = r#"<pre><a href="a/">a/<a href="b.txt">b.txt</pre"#;
        assert_eq!(hrefs(html), vec!["a/", "b.txt"]);
    }

    #[test]
    fn test_binary_body_is_a_parse_error() {
        let body = [0x50, 0x4b, 0x03, 0x04, 0x00, 0x00];
        assert_eq!(extract_links(&body), Err(ParseError::Binary));
    }

    #[test]
    fn test_empty_body_has_no_entries() {
        assert!(hrefs("").is_empty());
    }
}
