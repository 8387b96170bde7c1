//! Narrow DOM helpers over the HTML parser.
//!
//! The scraping modules only ever need three capabilities: select elements
//! by CSS selector, read an attribute, read collapsed text. Everything else
//! in the parser API stays out of them.

use scraper::{ElementRef, Selector};

/// First descendant of `scope` matching `selector`.
pub fn first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// Text content of `element` with whitespace runs collapsed to single spaces.
pub fn text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    let mut prev_space = true;

    for ch in element.text().flat_map(str::chars) {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(ch);
            prev_space = false;
        }
    }

    out.trim_end().to_string()
}

/// Collapsed text of the first match, if any.
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    first(scope, selector).map(text)
}

/// Attribute value of the first match, if the attribute is present.
pub fn first_attr(scope: ElementRef<'_>, selector: &Selector, name: &str) -> Option<String> {
    first(scope, selector)
        .and_then(|element| element.value().attr(name))
        .map(str::to_string)
}

/// Next sibling that is an element, skipping text and comment nodes.
pub fn next_sibling_element<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Whether `element` carries the given class.
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scraper::Html;

    fn selector(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn test_text_collapses_whitespace() {
        let doc = Html::parse_document("<p>  N°\n   ABC123  </p>");
        let p = doc.select(&selector("p")).next().unwrap();
        assert_eq!(text(p), "N° ABC123");
    }

    #[test]
    fn test_first_attr() {
        let doc = Html::parse_document(r#"<div><a class="dl" href="/a.pdf">x</a></div>"#);
        let div = doc.select(&selector("div")).next().unwrap();
        assert_eq!(first_attr(div, &selector(".dl"), "href").as_deref(), Some("/a.pdf"));
        assert_eq!(first_attr(div, &selector(".dl"), "title"), None);
        assert_eq!(first_attr(div, &selector(".missing"), "href"), None);
    }

    #[test]
    fn test_next_sibling_element_skips_text_nodes() {
        let doc = Html::parse_document("<div><p id=\"a\">a</p>\n  text\n<p id=\"b\">b</p></div>");
        let a = doc.select(&selector("#a")).next().unwrap();
        let b = next_sibling_element(a).unwrap();
        assert_eq!(b.value().attr("id"), Some("b"));
        assert!(next_sibling_element(b).is_none());
    }

    #[test]
    fn test_has_class() {
        let doc = Html::parse_document(r#"<div class="zone action__display-zone"></div>"#);
        let div = doc.select(&selector("div")).next().unwrap();
        assert!(has_class(div, "action__display-zone"));
        assert!(!has_class(div, "display-zone"));
    }
}
