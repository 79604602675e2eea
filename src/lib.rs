//! # jatsify
//!
//! Turns the HTML a DOCX converter produces for a journal manuscript into a
//! cleaned HTML document and a JATS 1.3 article.
//!
//! ## Pipeline
//!
//! 1. [`normalize`] cleans converter noise (inline styles, links, breaks,
//!    empty containers) and maps emphasis to `<bold>`/`<italic>`.
//! 2. [`segment`] classifies the cleaned document into [`Section`]s: title,
//!    authors, boxed text, abstracts, keywords, body sections, tables and
//!    figures.
//! 3. [`xref`] links "Figure N" / "Tabla N" mentions to their targets.
//! 4. [`jats`] writes the article.
//!
//! ## Quick Start
//!
//! ```
//! use jatsify::{Config, Template, convert};
//!
//! let html = "<h1>Study of X</h1><h3>Introduction</h3><p>Hello world.</p>";
//! let out = convert(html, Template::ResearchArticle, &Config::default()).unwrap();
//! assert!(out.xml.contains("<article-title>Study of X</article-title>"));
//! ```

pub mod config;
pub mod convert;
pub mod dom;
pub mod error;
pub mod jats;
pub mod media;
pub mod model;
pub mod normalize;
pub mod segment;
pub mod template;
pub mod util;
pub mod xref;

pub use config::Config;
pub use convert::{Conversion, ConversionReport, convert, convert_file};
pub use error::{Anomaly, Error, Result};
pub use jats::{JatsOptions, generate_jats};
pub use model::{
    AuthorEntry, ContentUnit, Image, List, ListItem, ListKind, Section, SectionContent,
    Segmented, Subsection, SubsectionStyle,
};
pub use normalize::normalize_html;
pub use segment::{BoxedTextPolicy, SegmentOptions, segment_html};
pub use template::Template;
