//! Sections and their content.

use serde::Serialize;

use super::titles;

/// One classified block of the manuscript.
///
/// `title` is the classification key. It is not unique: a document may hold
/// several "Boxed Text" or "Tabla" sections, told apart by position or `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub content: SectionContent,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Section {
    /// A section whose content is a single string.
    pub fn text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(title, SectionContent::Text(text.into()))
    }

    pub fn new(title: impl Into<String>, content: SectionContent) -> Self {
        Self {
            title: title.into(),
            content,
            subsections: Vec::new(),
            id: None,
        }
    }

    /// A table section with its `table-N` identifier.
    pub fn table(counter: usize, rows: Vec<Vec<String>>) -> Self {
        Self {
            id: Some(format!("table-{counter}")),
            ..Self::new(titles::TABLE, SectionContent::Rows(rows))
        }
    }

    pub fn is_table(&self) -> bool {
        self.title == titles::TABLE
    }

    /// Whether this section is consumed by front matter only.
    pub fn is_front_matter(&self) -> bool {
        titles::is_front_matter(&self.title)
    }

    /// Numeric suffix of a `table-N` id.
    pub fn table_number(&self) -> Option<usize> {
        self.id
            .as_deref()
            .and_then(|id| id.strip_prefix("table-"))
            .and_then(|n| n.parse().ok())
    }

    /// The content as a single string, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            SectionContent::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// What a section holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionContent {
    /// Free text: titles and keyword-located sections.
    Text(String),
    /// Ordered paragraph fragments and lists of a heading section.
    Units(Vec<ContentUnit>),
    /// Table rows, each an ordered list of cell texts.
    Rows(Vec<Vec<String>>),
    /// Author and affiliation lines.
    Authors(Vec<AuthorEntry>),
    /// Boxed-text lines (markup fragments).
    Lines(Vec<String>),
}

impl SectionContent {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Text(t) => t.is_empty(),
            SectionContent::Units(u) => u.is_empty(),
            SectionContent::Rows(r) => r.is_empty(),
            SectionContent::Authors(a) => a.is_empty(),
            SectionContent::Lines(l) => l.is_empty(),
        }
    }
}

/// One paragraph-equivalent inside a heading section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentUnit {
    /// Inner markup of a block element, trimmed.
    Html(String),
    List(List),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Bullet,
    Ordered,
}

impl ListKind {
    /// JATS `list-type` value.
    pub fn jats_type(self) -> &'static str {
        match self {
            ListKind::Bullet => "bullet",
            ListKind::Ordered => "order",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "list")]
pub struct List {
    #[serde(rename = "listType")]
    pub kind: ListKind,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "list-item")]
pub struct ListItem {
    pub text: String,
}

/// How a subsection heading is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsectionStyle {
    /// `<h4>`: a nested `<sec>` with its own title.
    Nested,
    /// `<h5>`: a bold-italic run-in label inside the parent section.
    RunIn,
}

/// Content under an `<h4>` or `<h5>` inside a heading section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subsection {
    pub title: String,
    pub content: Vec<String>,
    pub style: SubsectionStyle,
}

impl Subsection {
    pub fn is_run_in(&self) -> bool {
        self.style == SubsectionStyle::RunIn
    }
}

/// A line of the authors block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum AuthorEntry {
    /// An author-styled paragraph (the author names).
    Title(String),
    /// An affiliation-styled paragraph.
    Affiliation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_section_numbering() {
        let table = Section::table(3, vec![vec!["a".into()]]);
        assert!(table.is_table());
        assert_eq!(table.id.as_deref(), Some("table-3"));
        assert_eq!(table.table_number(), Some(3));
    }

    #[test]
    fn test_front_matter_classification() {
        assert!(Section::text(titles::ABSTRACT, "x").is_front_matter());
        assert!(!Section::text("Introduction", "x").is_front_matter());
    }

    #[test]
    fn test_list_unit_json_shape() {
        let unit = ContentUnit::List(List {
            kind: ListKind::Bullet,
            items: vec![ListItem { text: "one".into() }],
        });
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["type"], "list");
        assert_eq!(json["listType"], "bullet");
        assert_eq!(json["items"][0]["type"], "list-item");
        assert_eq!(json["items"][0]["text"], "one");
    }
}
