//! Figure and table cross-references.
//!
//! Mentions like "Figura 2" or "Table 1" in paragraph text are replaced with
//! `<xref>` elements pointing at the matching `fig-N` or `table-N` id.
//! Mentions whose number has no target are left as text.
//!
//! The rewrite works on text nodes, so it never touches attribute values or
//! markup, and text already inside an `<xref>` is skipped. That makes a
//! second pass a no-op.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::dom::{Attribute, Dom, NodeId, escape_attr, escape_text};
use crate::model::{Image, Section};

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Figura|Figure|Tabla|Table)\s*(\d+)\b").expect("reference pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefType {
    Fig,
    Table,
}

impl RefType {
    pub fn as_str(self) -> &'static str {
        match self {
            RefType::Fig => "fig",
            RefType::Table => "table",
        }
    }
}

/// Identifiers a mention can point at, keyed by number.
#[derive(Debug, Clone, Default)]
pub struct Targets {
    figures: HashMap<usize, String>,
    tables: HashMap<usize, String>,
}

impl Targets {
    pub fn new(images: &[Image], tables: &[Section]) -> Self {
        let figures = images
            .iter()
            .filter_map(|img| Some((img.number()?, img.id.clone())))
            .collect();
        let tables = tables
            .iter()
            .filter_map(|t| Some((t.table_number()?, t.id.clone()?)))
            .collect();
        Self { figures, tables }
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty() && self.tables.is_empty()
    }

    fn lookup(&self, word: &str, digits: &str) -> Option<(RefType, &str)> {
        let number: usize = digits.parse().ok()?;
        // "Figure 01" is not a mention of figure 1
        if number.to_string() != digits {
            return None;
        }
        let (kind, ids) = match word {
            "Figura" | "Figure" => (RefType::Fig, &self.figures),
            _ => (RefType::Table, &self.tables),
        };
        ids.get(&number).map(|id| (kind, id.as_str()))
    }
}

/// A run of paragraph text after reference detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece<'a> {
    Text(&'a str),
    Ref {
        kind: RefType,
        rid: &'a str,
        label: String,
    },
}

/// Split `text` into plain runs and resolved references.
pub fn split_references<'a>(text: &'a str, targets: &'a Targets) -> Vec<Piece<'a>> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for caps in REFERENCE.captures_iter(text) {
        let (Some(whole), Some(word), Some(digits)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let Some((kind, rid)) = targets.lookup(word.as_str(), digits.as_str()) else {
            continue;
        };
        if whole.start() > last {
            pieces.push(Piece::Text(&text[last..whole.start()]));
        }
        pieces.push(Piece::Ref {
            kind,
            rid,
            label: format!("{} {}", word.as_str(), digits.as_str()),
        });
        last = whole.end();
    }
    if last < text.len() {
        pieces.push(Piece::Text(&text[last..]));
    }
    pieces
}

/// Resolve references in plain text, returning escaped markup.
pub fn link_text(text: &str, targets: &Targets) -> String {
    let mut out = String::with_capacity(text.len());
    for piece in split_references(text, targets) {
        match piece {
            Piece::Text(t) => out.push_str(&escape_text(t)),
            Piece::Ref { kind, rid, label } => {
                out.push_str(&format!(
                    r#"<xref ref-type="{}" rid="{}">{}</xref>"#,
                    kind.as_str(),
                    escape_attr(rid),
                    escape_text(&label)
                ));
            }
        }
    }
    out
}

/// Whether a paragraph holds a table, as an element or as escaped markup.
fn holds_table(dom: &Dom, p: NodeId) -> bool {
    dom.has_descendant(p, "table") || dom.text(p).contains("<table")
}

/// Drop table-bearing paragraphs, then link references in the rest.
pub fn annotate_paragraphs(dom: &mut Dom, targets: &Targets) {
    let mut removed = 0;
    let mut linked = 0;

    for p in dom.elements_by_tag("p") {
        if !dom.is_attached(p) {
            continue;
        }
        if holds_table(dom, p) {
            dom.detach(p);
            removed += 1;
            continue;
        }
        if targets.is_empty() {
            continue;
        }

        let text_nodes: Vec<NodeId> = dom
            .descendants(p)
            .into_iter()
            .filter(|&d| dom.text_content(d).is_some() && !dom.has_ancestor(d, "xref"))
            .collect();
        for node in text_nodes {
            linked += link_node(dom, node, targets);
        }
    }

    log::debug!("dropped {removed} table paragraphs, linked {linked} references");
}

fn link_node(dom: &mut Dom, node: NodeId, targets: &Targets) -> usize {
    let Some(text) = dom.text_content(node).map(str::to_string) else {
        return 0;
    };
    let pieces = split_references(&text, targets);
    if pieces.iter().all(|p| matches!(p, Piece::Text(_))) {
        return 0;
    }

    let mut count = 0;
    for piece in pieces {
        let new_node = match piece {
            Piece::Text(t) => dom.create_text(t),
            Piece::Ref { kind, rid, label } => {
                let xref = dom.create_html_element(
                    "xref",
                    vec![
                        Attribute::new("ref-type", kind.as_str()),
                        Attribute::new("rid", rid),
                    ],
                );
                dom.append_text(xref, &label);
                count += 1;
                xref
            }
        };
        dom.insert_before(node, new_node);
    }
    dom.detach(node);
    count
}
