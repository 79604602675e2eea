//! Text and fragment helpers for the serializer.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

use crate::dom::{escape_text, inner_html, parse_html, reformat_fragment};
use crate::normalize::collapse_whitespace;

/// Units that are table or image markup and never become paragraphs.
static SKIPPED_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<table|&lt;table|<tbody|&lt;tbody|<thead|<img|&lt;img")
        .expect("skipped unit pattern is valid")
});

static AFFILIATION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\w\)|corresponding\s*author:|autor\s*de\s*correspondencia:")
        .expect("affiliation marker pattern is valid")
});

static SUPERSCRIPT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\w\)$").expect("superscript pattern is valid"));

/// Escaped inline tags the serializer may find in its own output.
static ESCAPED_INLINE: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ["xref", "bold", "italic", "sup"]
        .into_iter()
        .map(|tag| {
            let pattern = Regex::new(&format!(
                r"&lt;{tag}((?:\s(?:[^<>&]|&quot;|&amp;)*)?)&gt;([^<>]*?)&lt;/{tag}&gt;"
            ))
            .expect("escaped inline pattern is valid");
            (tag, pattern)
        })
        .collect()
});

pub fn is_skipped_unit(unit: &str) -> bool {
    SKIPPED_UNIT.is_match(unit)
}

/// Re-parse trusted markup into well-formed XML.
pub fn fragment(unit: &str) -> String {
    reformat_fragment(unit.trim())
}

/// Inner markup of every `<li>` in a fragment, in order.
///
/// Returns `None` when the fragment has no list items.
pub fn list_items(unit: &str) -> Option<Vec<String>> {
    if !unit.contains("<li") {
        return None;
    }
    let dom = parse_html(unit);
    let items: Vec<String> = dom
        .elements_by_tag("li")
        .into_iter()
        .map(|li| inner_html(&dom, li).trim().to_string())
        .collect();
    (!items.is_empty()).then_some(items)
}

/// Split `text` at the first `". "` or `": "`, whichever comes first.
///
/// A colon stays on the title; a sentence period is dropped.
pub fn split_heading(text: &str) -> (&str, &str) {
    let period = text.find(". ");
    let colon = text.find(": ");
    match (period, colon) {
        (Some(p), Some(c)) if p < c => (&text[..p], &text[p + 2..]),
        (_, Some(c)) => (&text[..=c], &text[c + 2..]),
        (Some(p), None) => (&text[..p], &text[p + 2..]),
        (None, None) => (text, ""),
    }
}

/// One output paragraph of an affiliation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliationPart {
    /// A `(a)`-style marker rendered as superscript.
    pub superscript: Option<String>,
    pub text: String,
}

impl AffiliationPart {
    /// XML markup for the paragraph content.
    pub fn to_markup(&self) -> String {
        let text = escape_text(&self.text);
        match &self.superscript {
            Some(sup) if text.is_empty() => format!("<sup>{}</sup>", escape_text(sup)),
            Some(sup) => format!("<sup>{}</sup> {text}", escape_text(sup)),
            None => text,
        }
    }
}

/// Break an affiliation line at each `(x)` marker and correspondence phrase.
pub fn split_affiliation(line: &str) -> Vec<AffiliationPart> {
    let mut parts = Vec::new();
    let mut current = AffiliationPart {
        superscript: None,
        text: String::new(),
    };

    let mut flush = |part: &mut AffiliationPart| {
        let done = AffiliationPart {
            superscript: part.superscript.take(),
            text: collapse_whitespace(&std::mem::take(&mut part.text))
                .trim()
                .to_string(),
        };
        if done.superscript.is_some() || !done.text.is_empty() {
            parts.push(done);
        }
    };

    let mut last = 0;
    for m in AFFILIATION_MARKER.find_iter(line) {
        current.text.push_str(&line[last..m.start()]);
        flush(&mut current);
        if SUPERSCRIPT_MARKER.is_match(m.as_str()) {
            current.superscript = Some(m.as_str().to_string());
        } else {
            current.text.push_str(m.as_str().trim());
            current.text.push(' ');
        }
        last = m.end();
    }
    current.text.push_str(&line[last..]);
    flush(&mut current);

    parts
}

/// Unescape inline tags that were escaped on their way into the output.
///
/// Only balanced pairs of the inline vocabulary are restored, so the
/// result stays well-formed.
pub fn unescape_inline_tags(xml: &str) -> String {
    if !xml.contains("&lt;") {
        return xml.to_string();
    }
    let mut out = xml.to_string();
    loop {
        let before = out.len();
        for (tag, pattern) in ESCAPED_INLINE.iter() {
            out = pattern
                .replace_all(&out, |caps: &Captures<'_>| {
                    let attrs = caps.get(1).map_or("", |m| m.as_str()).replace("&quot;", "\"");
                    let inner = caps.get(2).map_or("", |m| m.as_str());
                    format!("<{tag}{attrs}>{inner}</{tag}>")
                })
                .into_owned();
        }
        if out.len() == before {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_heading() {
        assert_eq!(
            split_heading("Abstract: This is a test. It has two sentences."),
            ("Abstract:", "This is a test. It has two sentences.")
        );
        assert_eq!(
            split_heading("Abstract. This is a test. More."),
            ("Abstract", "This is a test. More.")
        );
        assert_eq!(split_heading("Resumen: uno"), ("Resumen:", "uno"));
        assert_eq!(split_heading("Abstract"), ("Abstract", ""));
    }

    #[test]
    fn test_skipped_units() {
        assert!(is_skipped_unit("<table><tr></tr></table>"));
        assert!(is_skipped_unit(r#"<img src="media/image001.png"/>"#));
        assert!(is_skipped_unit("see &lt;table&gt;"));
        assert!(!is_skipped_unit("A <bold>table</bold> of results"));
    }

    #[test]
    fn test_list_items() {
        assert_eq!(
            list_items("<ul><li>one</li><li> <bold>two</bold> </li></ul>"),
            Some(vec!["one".to_string(), "<bold>two</bold>".to_string()])
        );
        assert_eq!(list_items("plain"), None);
    }

    #[test]
    fn test_fragment_decodes_and_reescapes() {
        assert_eq!(fragment(" a &amp; b &nbsp;<bold>c</bold>"), "a &amp; b \u{a0}<bold>c</bold>");
        assert_eq!(fragment("x < y"), "x &lt; y");
    }

    #[test]
    fn test_split_affiliation() {
        let parts = split_affiliation(
            "(a) University A, City. (b) University B. Corresponding author: ana@x.org",
        );
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].superscript.as_deref(), Some("(a)"));
        assert_eq!(parts[0].text, "University A, City.");
        assert_eq!(parts[1].to_markup(), "<sup>(b)</sup> University B.");
        assert_eq!(parts[2].superscript, None);
        assert_eq!(parts[2].text, "Corresponding author: ana@x.org");
    }

    #[test]
    fn test_split_affiliation_spanish_marker() {
        let parts = split_affiliation("Universidad X autor de correspondencia: a@b.ec");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text, "Universidad X");
        assert_eq!(parts[1].text, "autor de correspondencia: a@b.ec");
    }

    #[test]
    fn test_unescape_inline_tags() {
        assert_eq!(
            unescape_inline_tags("<p>&lt;bold&gt;x&lt;/bold&gt; &lt;3</p>"),
            "<p><bold>x</bold> &lt;3</p>"
        );
        assert_eq!(
            unescape_inline_tags(
                "&lt;xref ref-type=&quot;fig&quot; rid=&quot;fig-1&quot;&gt;Figure 1&lt;/xref&gt;"
            ),
            r#"<xref ref-type="fig" rid="fig-1">Figure 1</xref>"#
        );
        assert_eq!(unescape_inline_tags("&lt;bold&gt; unbalanced"), "&lt;bold&gt; unbalanced");
    }
}
