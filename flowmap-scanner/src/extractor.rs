use scraper::{Html, Selector};
use std::sync::LazyLock;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector"));

/// Title and raw anchor targets of a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    /// `None` when the document has no non-blank `<title>`.
    pub title: Option<String>,
    /// Raw non-blank `href` values in document order.
    pub hrefs: Vec<String>,
}

pub trait LinkExtractor: Send + Sync {
    fn extract(&self, content: &str) -> Extracted;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl LinkExtractor for HtmlExtractor {
    fn extract(&self, content: &str) -> Extracted {
        let document = Html::parse_document(content);

        let title = document
            .select(&TITLE_SELECTOR)
            .map(|element| element.text().collect::<String>())
            .collect::<String>()
            .trim()
            .to_string();

        let hrefs = document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|element| element.value().attr("href"))
            .filter(|href| !href.trim().is_empty())
            .map(str::to_string)
            .collect();

        Extracted {
            title: (!title.is_empty()).then_some(title),
            hrefs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_links_in_document_order() {
        let html = r#"<html><head><title>  Welcome Home </title></head><body>
            <a href="/a">A</a>
            <a>no href</a>
            <a href="https://example.com/b?x=1">B</a>
            <a href="/a">A again</a>
        </body></html>"#;

        let extracted = HtmlExtractor.extract(html);
        assert_eq!(extracted.title.as_deref(), Some("Welcome Home"));
        assert_eq!(
            extracted.hrefs,
            vec!["/a", "https://example.com/b?x=1", "/a"]
        );
    }

    #[test]
    fn test_blank_hrefs_are_skipped() {
        let html = r#"<a href="">empty</a><a href="   ">blank</a><a href="/a">A</a>"#;
        let extracted = HtmlExtractor.extract(html);
        assert_eq!(extracted.hrefs, vec!["/a"]);
    }

    #[test]
    fn test_missing_title_is_none() {
        let extracted = HtmlExtractor.extract("<html><body><p>hi</p></body></html>");
        assert_eq!(extracted.title, None);
        assert!(extracted.hrefs.is_empty());
    }

    #[test]
    fn test_blank_title_is_none() {
        let extracted = HtmlExtractor.extract("<html><head><title>   </title></head></html>");
        assert_eq!(extracted.title, None);
    }

    #[test]
    fn test_garbage_input_does_not_panic() {
        let extracted = HtmlExtractor.extract("<<<not html at all");
        assert!(extracted.hrefs.is_empty());
    }
}
