//! Tree traversal utilities for normalization passes.

use crate::dom::{Dom, NodeId};

/// Walk the tree bottom-up and call `visitor` on every node.
///
/// Children are visited before their parent, so a pass that removes empty
/// elements sees the effect of removals further down before judging the
/// parent. The child list is snapshotted before recursing, so the visitor may
/// detach the node it is given.
pub fn walk_bottom_up<F>(dom: &mut Dom, mut visitor: F)
where
    F: FnMut(&mut Dom, NodeId),
{
    let root = dom.document();
    walk_children(dom, root, &mut visitor);
}

fn walk_children<F>(dom: &mut Dom, parent: NodeId, visitor: &mut F)
where
    F: FnMut(&mut Dom, NodeId),
{
    for child in dom.child_vec(parent) {
        walk_children(dom, child, visitor);
        visitor(dom, child);
    }
}

/// Elements matching any of `tags`, in document order.
pub fn elements_matching(dom: &Dom, tags: &[&str]) -> Vec<NodeId> {
    dom.descendants(dom.document())
        .into_iter()
        .filter(|&id| {
            dom.element_name(id)
                .is_some_and(|n| tags.contains(&n.as_ref()))
        })
        .collect()
}
