//! Arena-allocated mutable DOM.
//!
//! html5ever parses into this tree (see `tree_sink`), the normalizer edits it
//! in place, and the segmenter walks it. Nodes are never freed: removing a
//! node only unlinks it, so ids stay valid for the lifetime of the tree.

use html5ever::{LocalName, QualName, ns};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
        /// Pre-split class attribute.
        classes: Vec<String>,
    },
    Text(String),
    Comment(String),
    Doctype(String),
}

/// Element attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        }
    }
}

#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
pub struct Dom {
    nodes: Vec<Node>,
    document: NodeId,
}

impl Dom {
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
        };
        dom.document = dom.alloc(NodeData::Document);
        dom
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    pub fn document(&self) -> NodeId {
        self.document
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        let classes = split_classes(&attrs);
        self.alloc(NodeData::Element {
            name,
            attrs,
            classes,
        })
    }

    /// Create an HTML-namespace element by local name.
    pub fn create_html_element(&mut self, local: &str, attrs: Vec<Attribute>) -> NodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(local));
        self.create_element(name, attrs)
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(NodeData::Comment(text))
    }

    pub fn create_doctype(&mut self, name: String) -> NodeId {
        self.alloc(NodeData::Doctype(name))
    }

    // ------------------------------------------------------------------
    // Linking
    // ------------------------------------------------------------------

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let last = self.get(parent).map_or(NodeId::NONE, |n| n.last_child);

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = last;
        }
        if let Some(node) = self.get_mut(last) {
            node.next_sibling = child;
        }
        if let Some(node) = self.get_mut(parent) {
            if node.first_child.is_none() {
                node.first_child = child;
            }
            node.last_child = child;
        }
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        self.detach(new_node);
        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(node) = self.get_mut(new_node) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = sibling;
        }
        if let Some(node) = self.get_mut(sibling) {
            node.prev_sibling = new_node;
        }
        if prev.is_some() {
            if let Some(node) = self.get_mut(prev) {
                node.next_sibling = new_node;
            }
        } else if let Some(node) = self.get_mut(parent) {
            node.first_child = new_node;
        }
    }

    /// Append text, merging into a trailing text node when there is one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last = self.get(parent).map_or(NodeId::NONE, |n| n.last_child);
        if let Some(node) = self.get_mut(last)
            && let NodeData::Text(existing) = &mut node.data
        {
            existing.push_str(text);
            return;
        }
        let node = self.create_text(text);
        self.append(parent, node);
    }

    /// Unlink a node from its parent and siblings. Its subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(node) = self.get_mut(prev) {
                node.next_sibling = next;
            }
        } else if let Some(node) = self.get_mut(parent)
            && node.first_child == id
        {
            node.first_child = next;
        }

        if next.is_some() {
            if let Some(node) = self.get_mut(next) {
                node.prev_sibling = prev;
            }
        } else if let Some(node) = self.get_mut(parent)
            && node.last_child == id
        {
            node.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Replace a node by a single text node.
    pub fn replace_with_text(&mut self, id: NodeId, text: impl Into<String>) {
        let node = self.create_text(text);
        self.insert_before(id, node);
        self.detach(id);
    }

    /// Remove all children of a node.
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.child_vec(id) {
            self.detach(child);
        }
    }

    /// Move all children of `from` to the end of `to`.
    pub fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        for child in self.child_vec(from) {
            self.append(to, child);
        }
    }

    // ------------------------------------------------------------------
    // Element editing
    // ------------------------------------------------------------------

    /// Change an element's tag, keeping attributes and children.
    pub fn rename(&mut self, id: NodeId, local: &str) {
        if let Some(node) = self.get_mut(id)
            && let NodeData::Element { name, .. } = &mut node.data
        {
            name.local = LocalName::from(local);
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, attr_name: &str) {
        if let Some(node) = self.get_mut(id)
            && let NodeData::Element { attrs, classes, .. } = &mut node.data
        {
            attrs.retain(|a| a.name.local.as_ref() != attr_name);
            if attr_name == "class" {
                classes.clear();
            }
        }
    }

    /// Set an attribute, replacing any existing value. `class` is not
    /// re-split, so use it only for other attributes.
    pub fn set_attr(&mut self, id: NodeId, attr_name: &str, value: impl Into<String>) {
        if let Some(node) = self.get_mut(id)
            && let NodeData::Element { attrs, .. } = &mut node.data
        {
            let value = value.into();
            match attrs.iter_mut().find(|a| a.name.local.as_ref() == attr_name) {
                Some(existing) => existing.value = value,
                None => attrs.push(Attribute::new(attr_name, value)),
            }
        }
    }

    /// Overwrite the contents of a text node.
    pub fn set_text(&mut self, id: NodeId, text: String) {
        if let Some(node) = self.get_mut(id)
            && let NodeData::Text(existing) = &mut node.data
        {
            *existing = text;
        }
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let first = self.get(parent).map_or(NodeId::NONE, |n| n.first_child);
        Children {
            dom: self,
            current: first,
        }
    }

    /// Children collected up front, for loops that mutate the tree.
    pub fn child_vec(&self, parent: NodeId) -> Vec<NodeId> {
        self.children(parent).collect()
    }

    /// All descendants of `root` in document order, `root` excluded.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_vec(root).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut children = self.child_vec(id);
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Elements with the given tag, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.document)
            .into_iter()
            .filter(|&id| self.is_tag(id, tag))
            .collect()
    }

    /// First element with the given tag, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.document)
            .into_iter()
            .find(|&id| self.is_tag(id, tag))
    }

    /// Next sibling that is an element, skipping text and comments.
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.get(id)?.next_sibling;
        while let Some(node) = self.get(cursor) {
            if matches!(node.data, NodeData::Element { .. }) {
                return Some(cursor);
            }
            cursor = node.next_sibling;
        }
        None
    }

    /// Whether any ancestor of `id` has the given tag.
    pub fn has_ancestor(&self, id: NodeId, tag: &str) -> bool {
        let mut cursor = self.get(id).map_or(NodeId::NONE, |n| n.parent);
        while let Some(node) = self.get(cursor) {
            if self.is_tag(cursor, tag) {
                return true;
            }
            cursor = node.parent;
        }
        false
    }

    /// Whether the node is still reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cursor = id;
        while let Some(node) = self.get(cursor) {
            if cursor == self.document {
                return true;
            }
            cursor = node.parent;
        }
        false
    }

    /// Whether any descendant of `id` has the given tag.
    pub fn has_descendant(&self, id: NodeId, tag: &str) -> bool {
        self.descendants(id).into_iter().any(|d| self.is_tag(d, tag))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self, id: NodeId) -> String {
        if let Some(t) = self.text_content(id) {
            return t.to_string();
        }
        let mut out = String::new();
        for d in self.descendants(id) {
            if let Some(t) = self.text_content(d) {
                out.push_str(t);
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Node queries
    // ------------------------------------------------------------------

    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.element_name(id).is_some_and(|n| n.as_ref() == tag)
    }

    pub fn get_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|a| a.name.local.as_ref() == attr_name)
            .map(|a| a.value.as_str())
    }

    pub fn attrs(&self, id: NodeId) -> &[Attribute] {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Element { attrs, .. }) => attrs,
            _ => &[],
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Element { classes, .. }) => classes.iter().any(|c| c == class),
            _ => false,
        }
    }

    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node.
pub struct Children<'a> {
    dom: &'a Dom,
    current: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self.dom.get(id).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(id)
    }
}

fn split_classes(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .find(|a| a.name.local.as_ref() == "class")
        .map(|a| a.value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
