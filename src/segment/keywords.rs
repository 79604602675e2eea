//! Keyword-located front-matter sections.
//!
//! Abstract, Resumen, Keywords and Palabras claves have no heading of their
//! own. They are found with a two-tier lookup: the paragraph class the
//! converter's style map assigns (when enabled), then a case-sensitive
//! substring search over paragraph text.

use std::collections::HashSet;

use crate::dom::{Dom, NodeId};
use crate::model::{Section, titles};

struct Locator {
    title: &'static str,
    needle: &'static str,
    class: &'static str,
}

const LOCATORS: &[Locator] = &[
    Locator {
        title: titles::ABSTRACT,
        needle: "Abstract",
        class: "abstract",
    },
    Locator {
        title: titles::RESUMEN,
        needle: "Resumen",
        class: "resumen",
    },
    Locator {
        title: titles::KEYWORDS,
        needle: "Keywords",
        class: "keywords",
    },
    Locator {
        title: titles::PALABRAS_CLAVES,
        needle: "Palabras claves",
        class: "palabras-claves",
    },
];

pub fn collect(dom: &Dom, processed: &mut HashSet<String>, structural: bool) -> Vec<Section> {
    let paragraphs = dom.elements_by_tag("p");
    let mut sections = Vec::new();

    for locator in LOCATORS {
        if processed.contains(locator.title) {
            continue;
        }
        let found = structural
            .then(|| by_class(dom, &paragraphs, locator.class))
            .flatten()
            .or_else(|| by_text(dom, &paragraphs, locator.needle));

        if let Some(text) = found {
            sections.push(Section::text(locator.title, text));
            processed.insert(locator.title.to_string());
        }
    }
    sections
}

fn by_class(dom: &Dom, paragraphs: &[NodeId], class: &str) -> Option<String> {
    paragraphs
        .iter()
        .find(|&&p| dom.has_class(p, class))
        .map(|&p| dom.text(p).trim().to_string())
        .filter(|text| !text.is_empty())
}

fn by_text(dom: &Dom, paragraphs: &[NodeId], needle: &str) -> Option<String> {
    paragraphs.iter().find_map(|&p| {
        let text = dom.text(p);
        text.contains(needle).then(|| text.trim().to_string())
    })
}

/// Split `"Label: a, b; c"` into the label (with its colon) and the terms.
///
/// Without a `": "` separator the whole text is the label.
pub fn split_label(text: &str) -> (String, Vec<String>) {
    match text.split_once(": ") {
        Some((label, rest)) => (format!("{label}:"), terms(rest)),
        None => (format!("{}:", text.trim_end_matches(':')), Vec::new()),
    }
}

fn terms(list: &str) -> Vec<String> {
    list.split([',', ';'])
        .map(|t| t.trim().trim_end_matches('.').trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Terms of the Keywords and Palabras claves sections, in that order.
pub fn extract_terms(sections: &[Section]) -> Vec<String> {
    [titles::KEYWORDS, titles::PALABRAS_CLAVES]
        .iter()
        .filter_map(|title| sections.iter().find(|s| s.title == *title))
        .filter_map(Section::as_text)
        .flat_map(|text| split_label(text).1)
        .collect()
}
