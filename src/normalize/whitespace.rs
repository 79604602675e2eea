//! Whitespace collapsing and empty-container removal.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::dom::{Dom, NodeData, NodeId};

use super::pass::walk_bottom_up;

const BLOCK_CONTAINERS: &[&str] = &["p", "div", "span"];

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s\x{A0}\x{202F}]+").expect("whitespace pattern is valid")
});

/// Collapse whitespace inside `p`/`div`/`span` and drop the empty ones.
///
/// Runs bottom-up: a `span` emptied out is removed before its paragraph is
/// judged. A container survives if it has any text or holds an image.
pub fn collapse_blocks(dom: &mut Dom) {
    walk_bottom_up(dom, |dom, id| {
        let is_container = dom
            .element_name(id)
            .is_some_and(|n| BLOCK_CONTAINERS.contains(&n.as_ref()));
        if is_container {
            collapse_block(dom, id);
        }
    });
}

fn collapse_block(dom: &mut Dom, id: NodeId) {
    for d in dom.descendants(id) {
        if let Some(text) = dom.text_content(d) {
            let collapsed = collapse_whitespace(text);
            if collapsed != text {
                dom.set_text(d, collapsed);
            }
        }
    }
    trim_edges(dom, id);

    if dom.text(id).trim().is_empty() && !dom.has_descendant(id, "img") {
        dom.detach(id);
    }
}

/// Trim leading whitespace of a leading text child and trailing whitespace
/// of a trailing text child.
fn trim_edges(dom: &mut Dom, id: NodeId) {
    let (first, last) = match dom.get(id) {
        Some(n) => (n.first_child, n.last_child),
        None => return,
    };
    if let Some(text) = dom.text_content(first) {
        let trimmed = text.trim_start().to_string();
        update_or_remove(dom, first, trimmed);
    }
    if let Some(text) = dom.text_content(last) {
        let trimmed = text.trim_end().to_string();
        update_or_remove(dom, last, trimmed);
    }
}

fn update_or_remove(dom: &mut Dom, id: NodeId, text: String) {
    if text.is_empty() {
        dom.detach(id);
    } else if !matches!(dom.get(id).map(|n| &n.data), Some(NodeData::Text(t)) if *t == text) {
        dom.set_text(id, text);
    }
}

/// Replace non-breaking spaces and whitespace runs with single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{inner_html, parse_html};

    fn body_html(dom: &Dom) -> String {
        let body = dom.find_by_tag("body").unwrap();
        inner_html(dom, body)
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \u{a0}\n\t b"), "a b");
        assert_eq!(collapse_whitespace("plain"), "plain");
    }

    #[test]
    fn test_paragraph_is_trimmed_and_collapsed() {
        let mut dom = parse_html("<p>  Hello&nbsp;&nbsp;   world  </p>");
        collapse_blocks(&mut dom);
        assert_eq!(body_html(&dom), "<p>Hello world</p>");
    }

    #[test]
    fn test_empty_containers_are_removed() {
        let mut dom = parse_html("<p> &nbsp; </p><div><span> </span></div><p>kept</p>");
        collapse_blocks(&mut dom);
        assert_eq!(body_html(&dom), "<p>kept</p>");
    }

    #[test]
    fn test_image_only_paragraph_survives() {
        let mut dom = parse_html(r#"<p> <img src="media/image001.png"> </p>"#);
        collapse_blocks(&mut dom);
        assert_eq!(body_html(&dom), r#"<p><img src="media/image001.png"/></p>"#);
    }
}
