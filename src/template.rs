//! Manuscript templates.
//!
//! The upload form lets the author pick the kind of manuscript. Only research
//! articles have a segmentation grammar; the other kinds are recognized so
//! the caller gets a precise error rather than a generic one.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    #[default]
    ResearchArticle,
    ResearchLetter,
    Review,
}

impl Template {
    pub fn name(self) -> &'static str {
        match self {
            Template::ResearchArticle => "research-article",
            Template::ResearchLetter => "research-letter",
            Template::Review => "review",
        }
    }

    /// Fail unless this core can segment the template.
    pub fn ensure_supported(self) -> Result<()> {
        match self {
            Template::ResearchArticle => Ok(()),
            other => Err(Error::UnsupportedTemplate(other.name().to_string())),
        }
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "research-article" => Ok(Template::ResearchArticle),
            "research-letter" => Ok(Template::ResearchLetter),
            "review" => Ok(Template::Review),
            other => Err(Error::UnsupportedTemplate(other.to_string())),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_templates() {
        assert_eq!(
            "research-article".parse::<Template>().unwrap(),
            Template::ResearchArticle
        );
        assert_eq!("review".parse::<Template>().unwrap(), Template::Review);
    }

    #[test]
    fn test_unknown_template_is_unsupported() {
        let err = "default".parse::<Template>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedTemplate(name) if name == "default"));
    }

    #[test]
    fn test_only_research_article_is_supported() {
        assert!(Template::ResearchArticle.ensure_supported().is_ok());
        assert!(Template::ResearchLetter.ensure_supported().is_err());
        assert!(Template::Review.ensure_supported().is_err());
    }
}
