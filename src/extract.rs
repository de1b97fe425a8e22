use scraper::{Html, Selector};
use url::Url;

/// Extracts outbound targets from anchor hrefs and form actions, in
/// document order.
///
/// Relative references are resolved against `base_url`; only references
/// whose resolved form is a well-formed absolute URL are kept. Duplicates
/// within one page are allowed here; deduplication happens at the
/// VisitedSet boundary, not in the extractor.
pub fn extract_links(content: &str, base_url: &str) -> Vec<String> {
    let doc = Html::parse_document(content);
    let selector = Selector::parse("a[href], form[action]").unwrap();
    let base = Url::parse(base_url).ok();

    let links: Vec<String> = doc
        .select(&selector)
        .filter_map(|element| {
            let value = element.value();
            let reference = match value.name() {
                "a" => value.attr("href"),
                "form" => value.attr("action"),
                _ => None,
            }?;
            resolve(reference, base.as_ref())
        })
        .collect();

    ::log::debug!("Extracted {} links from {}", links.len(), base_url);
    links
}

/// Returns the body of every `<script>` element in document order.
pub fn extract_scripts(content: &str) -> Vec<String> {
    let doc = Html::parse_document(content);
    let selector = Selector::parse("script").unwrap();

    doc.select(&selector)
        .map(|script| script.text().collect::<String>())
        .collect()
}

/// Resolves a reference to a well-formed absolute URL, or drops it.
fn resolve(reference: &str, base: Option<&Url>) -> Option<String> {
    if reference.trim().is_empty() {
        return None;
    }
    match Url::parse(reference) {
        Ok(absolute) => Some(absolute.to_string()),
        // Relative reference: resolve against the page it came from
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            base.and_then(|b| b.join(reference).ok())
                .map(|resolved| resolved.to_string())
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_anchors_and_form_actions_as_absolute_urls() {
        let content = r#"<html><body>
            <a href="/page1">One</a>
            <a href="https://example.com/page2">Two</a>
            <form action="/submit"><input type="submit"/></form>
        </body></html>"#;

        let links = extract_links(content, "https://example.com");
        assert_eq!(
            links,
            vec![
                "https://example.com/page1",
                "https://example.com/page2",
                "https://example.com/submit",
            ]
        );
    }

    #[test]
    fn keeps_duplicates_and_document_order() {
        let content = r#"<html><body>
            <a href="/a">first</a>
            <a href="/b">second</a>
            <a href="/a">again</a>
        </body></html>"#;

        let links = extract_links(content, "https://example.com");
        assert_eq!(
            links,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/a",
            ]
        );
    }

    #[test]
    fn drops_empty_and_unresolvable_references() {
        let content = r#"<html><body>
            <a href="">blank</a>
            <a href="   ">spaces</a>
            <a href="/ok">fine</a>
        </body></html>"#;

        // No base to resolve relative references against
        let links = extract_links(content, "not a url");
        assert!(links.is_empty());

        let links = extract_links(content, "https://example.com");
        assert_eq!(links, vec!["https://example.com/ok"]);
    }

    #[test]
    fn extracts_script_bodies() {
        let content = r#"<html><head>
            <script>var x = 1;</script>
            <script src="app.js"></script>
        </head><body><p>text</p></body></html>"#;

        let scripts = extract_scripts(content);
        assert_eq!(scripts, vec!["var x = 1;".to_string(), String::new()]);
    }

    #[test]
    fn page_without_links_yields_empty() {
        let links = extract_links("<html><body>No links here</body></html>", "https://example.com");
        assert!(links.is_empty());
    }
}
