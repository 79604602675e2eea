//! Presentational markup removal.

use crate::dom::{Dom, NodeData};

use super::pass::elements_matching;

/// Drop every inline `style` attribute.
pub fn strip_styles(dom: &mut Dom) {
    for id in dom.descendants(dom.document()) {
        if dom.get_attr(id, "style").is_some() {
            dom.remove_attr(id, "style");
        }
    }
}

/// Remove `<br>` elements without leaving a placeholder.
pub fn remove_breaks(dom: &mut Dom) {
    for id in dom.elements_by_tag("br") {
        dom.detach(id);
    }
}

/// Replace each hyperlink with its plain text.
pub fn unwrap_links(dom: &mut Dom) {
    for id in dom.elements_by_tag("a") {
        if !dom.is_attached(id) {
            continue;
        }
        let text = dom.text(id);
        dom.replace_with_text(id, text);
    }
}

/// Rename emphasis to the JATS inline vocabulary.
///
/// `strong`/`b` become `bold`, `em`/`i` become `italic`; children are kept.
pub fn semantic_emphasis(dom: &mut Dom) {
    for id in elements_matching(dom, &["strong", "b", "em", "i"]) {
        let name: Option<&str> = dom.element_name(id).map(|n| n.as_ref());
        let target = match name {
            Some("strong" | "b") => "bold",
            _ => "italic",
        };
        dom.rename(id, target);
    }
}

/// Remove images whose source the converter could not resolve.
pub fn drop_broken_images(dom: &mut Dom) {
    for id in dom.elements_by_tag("img") {
        if dom.get_attr(id, "src").is_some_and(|src| src.contains("undefined")) {
            log::debug!("dropping unresolved image reference");
            dom.detach(id);
        }
    }
}

/// Whether a node is a text node holding only whitespace.
pub(crate) fn is_blank_text(dom: &Dom, id: crate::dom::NodeId) -> bool {
    matches!(dom.get(id).map(|n| &n.data), Some(NodeData::Text(t)) if t.trim().is_empty())
}
