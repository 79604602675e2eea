//! Table cleanup.

use crate::dom::{Dom, NodeId};

use super::inline::is_blank_text;
use super::pass::elements_matching;

/// Strip paragraph wrappers inside table cells.
///
/// A cell whose content is nothing but paragraphs gets the paragraphs'
/// content joined with single spaces. Cells with any other content are left
/// alone.
pub fn flatten_cell_paragraphs(dom: &mut Dom) {
    for cell in elements_matching(dom, &["td", "th"]) {
        let children = dom.child_vec(cell);
        let paragraphs: Vec<NodeId> = children
            .iter()
            .copied()
            .filter(|&c| !is_blank_text(dom, c))
            .collect();

        let all_paragraphs =
            !paragraphs.is_empty() && paragraphs.iter().all(|&c| dom.is_tag(c, "p"));
        if !all_paragraphs {
            continue;
        }

        dom.clear_children(cell);
        for (i, p) in paragraphs.into_iter().enumerate() {
            if i > 0 {
                dom.append_text(cell, " ");
            }
            dom.reparent_children(p, cell);
        }
    }
}

/// Remove paragraphs that contain a table, keeping the table.
///
/// Converters sometimes nest a table inside a paragraph. The table is moved
/// out in front of the paragraph and the paragraph is dropped, so the table
/// is rendered exactly once.
pub fn lift_tables_from_paragraphs(dom: &mut Dom) {
    for p in dom.elements_by_tag("p") {
        if !dom.is_attached(p) || !dom.has_descendant(p, "table") {
            continue;
        }
        let tables: Vec<NodeId> = dom
            .descendants(p)
            .into_iter()
            .filter(|&id| dom.is_tag(id, "table") && !nested_in_table_within(dom, id, p))
            .collect();
        for table in tables {
            dom.insert_before(p, table);
        }
        log::debug!("removed paragraph wrapping a table");
        dom.detach(p);
    }
}

/// Whether `id` sits inside another table below `stop`.
fn nested_in_table_within(dom: &Dom, id: NodeId, stop: NodeId) -> bool {
    let mut cursor = dom.get(id).map_or(NodeId::NONE, |n| n.parent);
    while cursor.is_some() && cursor != stop {
        if dom.is_tag(cursor, "table") {
            return true;
        }
        cursor = dom.get(cursor).map_or(NodeId::NONE, |n| n.parent);
    }
    false
}
