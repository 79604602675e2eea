//! HTML normalization passes.
//!
//! Converter output carries presentational noise (inline styles, breaks,
//! hyperlinks, paragraph-wrapped cells, empty spans). The passes here turn
//! it into the small markup vocabulary the segmenter expects. None of them
//! fail: content that cannot be cleaned is dropped.
//!
//! ## Pipeline Order
//!
//! 1. **Strip styles** - drop `style` attributes
//! 2. **Remove breaks** - delete `<br>`
//! 3. **Unwrap links** - `<a>` becomes its text
//! 4. **Semantic emphasis** - `strong`/`em` become `bold`/`italic`
//! 5. **Drop broken images** - `src` containing `undefined`
//! 6. **Flatten cells** - unwrap paragraphs inside `td`/`th`
//! 7. **Lift tables** - remove paragraphs that wrap a table
//! 8. **Collapse blocks** - whitespace collapse, empty container removal

mod inline;
mod pass;
mod table;
mod whitespace;

pub use whitespace::collapse_whitespace;

use crate::dom::{Dom, document_html, parse_html};

/// Run all normalization passes on a parsed document.
pub fn normalize(dom: &mut Dom) {
    inline::strip_styles(dom);
    inline::remove_breaks(dom);
    inline::unwrap_links(dom);
    inline::semantic_emphasis(dom);
    inline::drop_broken_images(dom);
    table::flatten_cell_paragraphs(dom);
    table::lift_tables_from_paragraphs(dom);
    whitespace::collapse_blocks(dom);
}

/// Normalize an HTML string and serialize the cleaned document.
pub fn normalize_html(html: &str) -> String {
    let mut dom = parse_html(html);
    normalize(&mut dom);
    document_html(&dom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::inner_html;

    fn normalized_body(html: &str) -> String {
        let mut dom = parse_html(html);
        normalize(&mut dom);
        let body = dom.find_by_tag("body").unwrap();
        inner_html(&dom, body)
    }

    #[test]
    fn test_full_pipeline() {
        let html = concat!(
            r#"<p style="x"><strong>Bold</strong> and <a href="http://e">link</a><br></p>"#,
            "<p>   </p>",
            r#"<table><tr><td><p>cell</p></td></tr></table>"#,
        );
        assert_eq!(
            normalized_body(html),
            "<p><bold>Bold</bold> and link</p><table><tbody><tr><td>cell</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_normalize_html_is_a_full_document() {
        let out = normalize_html("<p>x</p>");
        assert!(out.starts_with("<html>"));
        assert!(out.contains("<body><p>x</p></body>"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_html(r#"<p> a <em>b</em>&nbsp;c </p><p><img src="undefined"></p>"#);
        let twice = normalize_html(&once);
        assert_eq!(once, twice);
    }
}
