//! Authors block.

use crate::dom::Dom;
use crate::model::{AuthorEntry, Section, SectionContent, titles};

pub const AUTHORS_CLASS: &str = "authors";
pub const AFFILIATIONS_CLASS: &str = "affiliations";

/// Collect author and affiliation paragraphs into one section.
///
/// Author paragraphs are kept even when blank so the last one can title
/// the block; blank affiliation paragraphs are dropped.
pub fn collect(dom: &Dom) -> Option<Section> {
    let mut entries = Vec::new();

    for p in dom.elements_by_tag("p") {
        if dom.has_class(p, AUTHORS_CLASS) {
            entries.push(AuthorEntry::Title(dom.text(p).trim().to_string()));
        }
    }
    for p in dom.elements_by_tag("p") {
        if dom.has_class(p, AFFILIATIONS_CLASS) {
            let text = dom.text(p).trim().to_string();
            if !text.is_empty() {
                entries.push(AuthorEntry::Affiliation(text));
            }
        }
    }

    if entries.is_empty() {
        return None;
    }
    Some(Section::new(titles::AUTHORS, SectionContent::Authors(entries)))
}
