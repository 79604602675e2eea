//! End-to-end conversion.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::dom::{Dom, document_html, parse_html};
use crate::error::{Anomaly, Result};
use crate::jats::generate_jats;
use crate::media::extract_inline_images;
use crate::model::Segmented;
use crate::normalize::normalize;
use crate::segment::segment;
use crate::template::Template;
use crate::util::decode_html;

/// Output of [`convert`].
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Normalized HTML document.
    pub html: String,
    /// JATS XML document.
    pub xml: String,
    pub document: Segmented,
    pub anomalies: Vec<Anomaly>,
}

/// Files written by [`convert_file`].
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub html_path: PathBuf,
    pub xml_path: PathBuf,
    pub images: Vec<PathBuf>,
    pub document: Segmented,
    pub anomalies: Vec<Anomaly>,
}

/// Convert converter HTML into normalized HTML and JATS XML.
///
/// Fails before parsing when `template` is not supported, and after
/// segmentation when the document has no usable content.
pub fn convert(html: &str, template: Template, config: &Config) -> Result<Conversion> {
    template.ensure_supported()?;
    run(parse_html(html), config, Vec::new())
}

/// Convert an HTML file, writing `<stem>.html`, `<stem>.xml` and the
/// extracted `media/` images into `output_dir`.
///
/// Fails without writing anything when `<stem>.html` or `<stem>.xml` would
/// replace the input itself.
pub fn convert_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    template: Template,
    config: &Config,
) -> Result<ConversionReport> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();
    template.ensure_supported()?;

    let stem = input
        .file_stem()
        .map_or_else(|| "article".into(), |s| s.to_string_lossy());
    let html_path = output_dir.join(format!("{stem}.html"));
    let xml_path = output_dir.join(format!("{stem}.xml"));
    if is_same_file(input, &html_path) || is_same_file(input, &xml_path) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("refusing to overwrite input {}", input.display()),
        )
        .into());
    }

    let bytes = fs::read(input)?;
    let mut dom = parse_html(&decode_html(&bytes));

    fs::create_dir_all(output_dir)?;
    let media = extract_inline_images(&mut dom, output_dir);
    let conversion = run(dom, config, media.anomalies)?;

    fs::write(&html_path, &conversion.html)?;
    fs::write(&xml_path, &conversion.xml)?;
    log::info!("wrote {} and {}", html_path.display(), xml_path.display());

    Ok(ConversionReport {
        html_path,
        xml_path,
        images: media.images.into_iter().map(|i| i.path).collect(),
        document: conversion.document,
        anomalies: conversion.anomalies,
    })
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn run(mut dom: Dom, config: &Config, mut anomalies: Vec<Anomaly>) -> Result<Conversion> {
    normalize(&mut dom);
    let html = document_html(&dom);

    // Segment what a reader of the cleaned file would see.
    let mut cleaned = parse_html(&html);
    let segmentation = segment(&mut cleaned, &config.segment_options())?;
    anomalies.extend(segmentation.anomalies);

    let xml = generate_jats(&segmentation.document, &config.jats_options());
    if !anomalies.is_empty() {
        log::warn!("conversion finished with {} anomalies", anomalies.len());
    }

    Ok(Conversion {
        html,
        xml,
        document: segmentation.document,
        anomalies,
    })
}
