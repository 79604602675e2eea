//! Mutable HTML tree used by every stage of the pipeline.
//!
//! html5ever parses converter output into an arena ([`Dom`]); the
//! normalizer rewrites it in place and the segmenter reads it back.

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{Attribute, Children, Dom, Node, NodeData, NodeId};
pub use serialize::{document_html, escape_attr, escape_text, inner_html, outer_html};
pub use tree_sink::DomSink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse an HTML document (or fragment) into a [`Dom`].
///
/// Fragments are accepted: the parser supplies the `html`/`head`/`body`
/// scaffolding and the content lands under `body`.
pub fn parse_html(html: &str) -> Dom {
    let sink = DomSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Re-parse a markup fragment and return it serialized.
///
/// This decodes every HTML entity, drops stray end tags, closes unclosed
/// elements and re-escapes text, yielding a well-formed fragment.
pub fn reformat_fragment(html: &str) -> String {
    let dom = parse_html(html);
    match dom.find_by_tag("body") {
        Some(body) => inner_html(&dom, body),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reformat_fragment_closes_open_tags() {
        assert_eq!(reformat_fragment("<bold>DOI:"), "<bold>DOI:</bold>");
    }

    #[test]
    fn test_reformat_fragment_drops_stray_end_tags() {
        assert_eq!(reformat_fragment("DOI:</bold> 10.1/x"), "DOI: 10.1/x");
    }

    #[test]
    fn test_reformat_fragment_decodes_entities() {
        assert_eq!(reformat_fragment("A &amp; B &ndash; C"), "A &amp; B \u{2013} C");
    }
}
