//! Semantic document model.
//!
//! The segmenter builds a [`Segmented`] document once per conversion; the
//! cross-reference resolver and the JATS serializer read it. Nothing in the
//! model outlives the conversion call.

mod section;

pub use section::{
    AuthorEntry, ContentUnit, List, ListItem, ListKind, Section, SectionContent, Subsection,
    SubsectionStyle,
};

use serde::Serialize;

/// Section titles used as classification keys.
pub mod titles {
    pub const ARTICLE_TITLE: &str = "Título del artículo";
    pub const SECONDARY_TITLE: &str = "Título secundario";
    pub const ABSTRACT: &str = "Abstract";
    pub const RESUMEN: &str = "Resumen";
    pub const KEYWORDS: &str = "Keywords";
    pub const PALABRAS_CLAVES: &str = "Palabras claves";
    pub const AUTHORS: &str = "Autores";
    pub const AFFILIATIONS: &str = "Afiliaciones";
    pub const BOXED_TEXT: &str = "Boxed Text";
    pub const TABLE: &str = "Tabla";

    /// Titles consumed by front matter and never emitted into the body.
    pub const FRONT_MATTER: &[&str] = &[
        ARTICLE_TITLE,
        SECONDARY_TITLE,
        ABSTRACT,
        RESUMEN,
        KEYWORDS,
        PALABRAS_CLAVES,
        AUTHORS,
        AFFILIATIONS,
        BOXED_TEXT,
    ];

    pub fn is_front_matter(title: &str) -> bool {
        FRONT_MATTER.contains(&title)
    }
}

/// An `<img>` found in the manuscript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// `fig-N`, 1-based in document order.
    pub id: String,
    pub src: String,
    pub alt: String,
}

impl Image {
    /// Build the record for the `index`-th image (1-based).
    pub fn new(index: usize, src: Option<&str>, alt: Option<&str>) -> Self {
        Self {
            id: format!("fig-{index}"),
            src: src.unwrap_or_default().to_string(),
            alt: alt
                .filter(|a| !a.is_empty())
                .map_or_else(|| format!("Figura {index}"), str::to_string),
        }
    }

    /// 1-based position of this image.
    pub fn number(&self) -> Option<usize> {
        self.id.strip_prefix("fig-").and_then(|n| n.parse().ok())
    }
}

/// Output of segmentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segmented {
    /// Sections in insertion order, which is document order per step.
    pub sections: Vec<Section>,
    /// Terms from the Keywords and Palabras claves sections.
    pub keywords: Vec<String>,
    pub images: Vec<Image>,
}

impl Segmented {
    /// First section with the given title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// All sections with the given title, in order.
    pub fn sections_titled<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a Section> {
        self.sections.iter().filter(move |s| s.title == title)
    }

    /// Table sections, in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.is_table())
    }

    /// Sections that belong in the article body.
    pub fn body_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.is_front_matter())
    }
}
