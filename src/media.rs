//! Inline image extraction.
//!
//! The DOCX converter embeds pictures as `data:` URIs. Before the core runs,
//! each one is written to `media/imageNNN.png` under the output directory
//! (NNN is the 1-based position among all `<img>` elements, zero-padded to
//! three digits) and its `src` is pointed at the file. The serializer's
//! `<graphic>` references rely on exactly this naming.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::dom::Dom;
use crate::error::Anomaly;
use crate::util::ImageFormat;

pub const MEDIA_DIR: &str = "media";

/// Relative reference to the `index`-th image (1-based).
pub fn image_href(index: usize) -> String {
    format!("{MEDIA_DIR}/image{index:03}.png")
}

/// One image written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    pub index: usize,
    pub path: PathBuf,
    /// Format sniffed from the decoded bytes, if recognizable.
    pub format: Option<ImageFormat>,
}

#[derive(Debug, Clone, Default)]
pub struct MediaReport {
    pub images: Vec<ExtractedImage>,
    pub anomalies: Vec<Anomaly>,
}

/// Write every inline image under `output_dir` and rewrite its `src`.
///
/// Images that already reference a file are left alone. An image whose data
/// cannot be decoded or written keeps its original `src` and is reported.
pub fn extract_inline_images(dom: &mut Dom, output_dir: &Path) -> MediaReport {
    let mut report = MediaReport::default();

    for (i, img) in dom.elements_by_tag("img").into_iter().enumerate() {
        let index = i + 1;
        let Some(src) = dom.get_attr(img, "src") else {
            continue;
        };
        let Some(payload) = data_uri_payload(src) else {
            continue;
        };

        match decode_and_write(payload, output_dir, index) {
            Ok(image) => {
                if image.format != Some(ImageFormat::Png) {
                    log::debug!(
                        "image {index} is {} but is named .png",
                        image.format.map_or("unknown data", ImageFormat::mime_type)
                    );
                }
                dom.set_attr(img, "src", image_href(index));
                report.images.push(image);
            }
            Err(reason) => {
                let anomaly = Anomaly::MissingImageData { index, reason };
                anomaly.log();
                report.anomalies.push(anomaly);
            }
        }
    }

    log::info!("extracted {} inline images", report.images.len());
    report
}

/// Base64 payload of a `data:image/...;base64,` URI.
fn data_uri_payload(src: &str) -> Option<&str> {
    let rest = src.trim().strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let is_image = header.starts_with("image/");
    let is_base64 = header.split(';').any(|p| p.eq_ignore_ascii_case("base64"));
    (is_image && is_base64).then_some(payload)
}

fn decode_and_write(
    payload: &str,
    output_dir: &Path,
    index: usize,
) -> Result<ExtractedImage, String> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let data = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| format!("invalid base64 data: {e}"))?;
    if data.is_empty() {
        return Err("empty image data".to_string());
    }

    let dir = output_dir.join(MEDIA_DIR);
    fs::create_dir_all(&dir).map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
    let path = dir.join(format!("image{index:03}.png"));
    fs::write(&path, &data).map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    Ok(ExtractedImage {
        index,
        path,
        format: ImageFormat::detect(&data),
    })
}
