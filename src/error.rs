//! Error types for jatsify operations.

use std::fmt;

use thiserror::Error;

/// Errors that abort a conversion.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no segmentable content found in document")]
    EmptyDocument,

    #[error("unsupported template: {0}")]
    UnsupportedTemplate(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML writing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable problems found while converting.
///
/// These never abort a conversion. The offending unit is dropped, the
/// anomaly is logged and reported alongside the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// A boxed-text paragraph did not follow the expected block layout.
    MalformedBoxedText { excerpt: String },
    /// An inline image could not be decoded or written.
    MissingImageData { index: usize, reason: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::MalformedBoxedText { excerpt } => {
                write!(f, "malformed boxed text dropped: {excerpt}")
            }
            Anomaly::MissingImageData { index, reason } => {
                write!(f, "image {index} skipped: {reason}")
            }
        }
    }
}

impl Anomaly {
    pub(crate) fn boxed_text(content: &str) -> Self {
        let excerpt: String = content.chars().take(60).collect();
        Anomaly::MalformedBoxedText { excerpt }
    }

    /// Log this anomaly at `warn` level.
    pub(crate) fn log(&self) {
        log::warn!("{self}");
    }
}
