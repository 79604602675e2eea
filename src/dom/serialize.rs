//! Markup serialization for [`Dom`] subtrees.
//!
//! Output is XHTML-compatible: void elements self-close and text is escaped,
//! so a serialized fragment can be embedded directly in XML.

use std::fmt::Write;

use super::arena::{Dom, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serialize the whole document, doctype included.
pub fn document_html(dom: &Dom) -> String {
    inner_html(dom, dom.document())
}

/// Serialize the children of a node.
pub fn inner_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    for child in dom.children(id) {
        write_node(dom, child, &mut out);
    }
    out
}

/// Serialize a node and its subtree.
pub fn outer_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, &mut out);
    out
}

fn write_node(dom: &Dom, id: NodeId, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, out);
            }
        }
        NodeData::Doctype(name) => {
            let _ = write!(out, "<!DOCTYPE {name}>");
        }
        NodeData::Comment(text) => {
            let _ = write!(out, "<!--{text}-->");
        }
        NodeData::Text(text) => out.push_str(&escape_text(text)),
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                let key = match &attr.name.prefix {
                    Some(prefix) => format!("{}:{}", prefix.as_ref(), attr.name.local.as_ref()),
                    None => attr.name.local.to_string(),
                };
                let _ = write!(out, " {key}=\"{}\"", escape_attr(&attr.value));
            }

            if VOID_ELEMENTS.contains(&tag) {
                out.push_str("/>");
                return;
            }

            out.push('>');
            for child in dom.children(id) {
                write_node(dom, child, out);
            }
            let _ = write!(out, "</{tag}>");
        }
    }
}

/// Escape character data.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
