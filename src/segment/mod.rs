//! Section segmentation.
//!
//! Builds the [`Segmented`] model from normalized HTML. The steps run in a
//! fixed order and append to one section list:
//!
//! 1. authors and affiliations ([`authors`])
//! 2. boxed text ([`boxed`])
//! 3. article and secondary titles
//! 4. images
//! 5. tables
//! 6. paragraph cross-references ([`crate::xref`]), so that heading sections
//!    inherit the annotated markup
//! 7. `<h3>`-delimited sections ([`headings`])
//! 8. keyword-located front matter ([`keywords`])
//!
//! A set of processed titles carries over between steps so a title claimed
//! by an earlier step is not extracted again.

pub mod authors;
pub mod boxed;
pub mod headings;
pub mod keywords;

use std::collections::HashSet;

use crate::dom::{Dom, parse_html};
use crate::error::{Anomaly, Error, Result};
use crate::model::{Image, Section, Segmented, titles};
use crate::xref;

pub use boxed::BoxedTextPolicy;

/// Knobs for segmentation; the defaults are the built-in behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentOptions {
    pub boxed_text: BoxedTextPolicy,
    /// Look up keyword sections by paragraph class before substring search.
    pub structural_keywords: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            boxed_text: BoxedTextPolicy::default(),
            structural_keywords: true,
        }
    }
}

/// A segmented document together with the anomalies absorbed on the way.
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub document: Segmented,
    pub anomalies: Vec<Anomaly>,
}

/// Segment an already-normalized document.
///
/// The tree is annotated in place with cross-references.
pub fn segment(dom: &mut Dom, options: &SegmentOptions) -> Result<Segmentation> {
    let mut sections: Vec<Section> = Vec::new();
    let mut processed: HashSet<String> = HashSet::new();
    let mut anomalies = Vec::new();

    if let Some(section) = authors::collect(dom) {
        processed.insert(section.title.clone());
        sections.push(section);
    }

    sections.extend(boxed::collect(dom, options.boxed_text, &mut anomalies));

    for section in title_sections(dom) {
        processed.insert(section.title.clone());
        sections.push(section);
    }

    let images = collect_images(dom);
    let tables = collect_tables(dom);
    log::debug!("found {} images and {} tables", images.len(), tables.len());

    let targets = xref::Targets::new(&images, &tables);
    sections.extend(tables);
    xref::annotate_paragraphs(dom, &targets);

    sections.extend(headings::collect(dom, &mut processed));
    sections.extend(keywords::collect(
        dom,
        &mut processed,
        options.structural_keywords,
    ));

    if sections.iter().all(|s| s.content.is_empty()) {
        return Err(Error::EmptyDocument);
    }

    let keywords = keywords::extract_terms(&sections);
    log::info!(
        "segmented {} sections, {} images, {} keywords",
        sections.len(),
        images.len(),
        keywords.len()
    );

    Ok(Segmentation {
        document: Segmented {
            sections,
            keywords,
            images,
        },
        anomalies,
    })
}

/// Parse and segment normalized HTML, discarding anomalies.
pub fn segment_html(html: &str, options: &SegmentOptions) -> Result<Segmented> {
    let mut dom = parse_html(html);
    segment(&mut dom, options).map(|s| s.document)
}

fn title_sections(dom: &Dom) -> Vec<Section> {
    let article_title = first_text(dom, "h1").unwrap_or_default();
    let secondary = first_text(dom, "h2")
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| article_title.clone());

    let mut sections = Vec::with_capacity(2);
    if !article_title.is_empty() {
        sections.push(Section::text(titles::ARTICLE_TITLE, article_title));
    }
    sections.push(Section::text(titles::SECONDARY_TITLE, secondary));
    sections
}

fn first_text(dom: &Dom, tag: &str) -> Option<String> {
    dom.find_by_tag(tag).map(|id| dom.text(id).trim().to_string())
}

fn collect_images(dom: &Dom) -> Vec<Image> {
    dom.elements_by_tag("img")
        .into_iter()
        .enumerate()
        .map(|(i, img)| Image::new(i + 1, dom.get_attr(img, "src"), dom.get_attr(img, "alt")))
        .collect()
}

fn collect_tables(dom: &Dom) -> Vec<Section> {
    let mut counter = 0;
    let mut tables = Vec::new();

    for table in dom.elements_by_tag("table") {
        let rows: Vec<Vec<String>> = dom
            .descendants(table)
            .into_iter()
            .filter(|&d| dom.is_tag(d, "tr"))
            .map(|tr| {
                dom.children(tr)
                    .filter(|&c| dom.is_tag(c, "td") || dom.is_tag(c, "th"))
                    .map(|cell| dom.text(cell).trim().to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();

        counter += 1;
        tables.push(Section::table(counter, rows));
    }
    tables
}
