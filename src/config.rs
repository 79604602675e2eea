//! TOML configuration.
//!
//! Every field has a default, and the defaults reproduce the built-in
//! behavior, so an empty file (or no file) is a valid configuration.
//!
//! ```toml
//! [boxed_text]
//! policy = "standard"   # "standard" | "strict" | "partial"
//!
//! [keywords]
//! structural_markers = true
//!
//! [output]
//! pretty = true
//! indent = 2
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::jats::JatsOptions;
use crate::segment::{BoxedTextPolicy, SegmentOptions};

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub boxed_text: BoxedTextSection,
    #[serde(default)]
    pub keywords: KeywordsSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct BoxedTextSection {
    /// What to do with boxed-text paragraphs missing some blocks.
    #[serde(default)]
    pub policy: BoxedTextPolicy,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct KeywordsSection {
    /// Look for `p.abstract`, `p.keywords`, ... before falling back to
    /// substring search.
    #[serde(default = "default_true")]
    pub structural_markers: bool,
}

impl Default for KeywordsSection {
    fn default() -> Self {
        Self {
            structural_markers: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OutputSection {
    #[serde(default = "default_true")]
    pub pretty: bool,
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: default_indent(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    2
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn segment_options(&self) -> SegmentOptions {
        SegmentOptions {
            boxed_text: self.boxed_text.policy,
            structural_keywords: self.keywords.structural_markers,
        }
    }

    pub fn jats_options(&self) -> JatsOptions {
        JatsOptions {
            indent: if self.output.pretty {
                self.output.indent
            } else {
                0
            },
        }
    }
}
