//! `<front>`: journal metadata and the abstract block.

use super::JatsWriter;
use super::markup::{fragment, split_affiliation, split_heading};
use crate::error::Result;
use crate::model::{AuthorEntry, SectionContent, Segmented, titles};
use crate::segment::keywords::split_label;

const JOURNAL_TITLE: &str = "EASI: Ingeniería y Ciencias Aplicadas en la Industria";
const ISSN: &str = "2953-6634";
const PUBLISHER: &str = "Universidad de Guayaquil";
const PUBLISHER_LOC: &str = "Guayaquil, Ecuador";
const LICENSE_HREF: &str = "https://creativecommons.org/licenses/by/4.0/";
const LICENSE_LINK: &str = "http://creativecommons.org/licenses/by/4.0/";

pub(super) fn write_front(w: &mut JatsWriter, doc: &Segmented) -> Result<()> {
    w.start("front", &[])?;
    write_journal_meta(w)?;
    write_article_meta(w, doc)?;
    w.end("front")
}

fn write_journal_meta(w: &mut JatsWriter) -> Result<()> {
    w.start("journal-meta", &[])?;
    w.leaf("journal-id", &[("journal-id-type", "publisher")], JOURNAL_TITLE)?;
    w.leaf("issn", &[], ISSN)?;
    w.start("journal-title-group", &[])?;
    w.leaf("journal-title", &[], JOURNAL_TITLE)?;
    w.end("journal-title-group")?;
    w.start("publisher", &[])?;
    w.leaf("publisher-name", &[], PUBLISHER)?;
    w.leaf("publisher-loc", &[], PUBLISHER_LOC)?;
    w.end("publisher")?;
    w.end("journal-meta")
}

fn write_article_meta(w: &mut JatsWriter, doc: &Segmented) -> Result<()> {
    w.start("article-meta", &[])?;

    w.start("article-categories", &[])?;
    w.start("subj-group", &[])?;
    for _ in 0..3 {
        w.leaf("subject", &[], " ")?;
    }
    w.end("subj-group")?;
    w.end("article-categories")?;

    match doc.section(titles::ARTICLE_TITLE).and_then(|s| s.as_text()) {
        Some(title) => {
            w.start("title-group", &[])?;
            w.leaf("article-title", &[], title)?;
            w.end("title-group")?;
        }
        None => w.empty("title-group", &[])?,
    }

    w.leaf("volume", &[], " ")?;
    w.leaf("issue", &[], " ")?;
    write_permissions(w)?;
    write_abstract(w, doc)?;

    w.start("kwd-group", &[("kwd-group-type", "author-keywords")])?;
    w.leaf("title", &[], "Keywords")?;
    for _ in 0..3 {
        w.leaf("kwd", &[], " ")?;
    }
    w.end("kwd-group")?;

    w.end("article-meta")
}

fn write_permissions(w: &mut JatsWriter) -> Result<()> {
    w.start("permissions", &[])?;
    w.leaf("copyright-statement", &[], "© ")?;
    w.leaf("copyright-year", &[], " ")?;
    w.leaf("copyright-holder", &[], " ")?;
    w.start("license", &[("xlink:href", LICENSE_HREF)])?;
    w.start("license-p", &[])?;
    w.text("This article is distributed under the terms of the ")?;
    w.start(
        "ext-link",
        &[("ext-link-type", "uri"), ("xlink:href", LICENSE_LINK)],
    )?;
    w.text("Creative Commons Attribution License")?;
    w.end("ext-link")?;
    w.text(
        ", which permits unrestricted use and redistribution provided that \
         the original author and source are credited.",
    )?;
    w.end("license-p")?;
    w.end("license")?;
    w.end("permissions")
}

fn write_abstract(w: &mut JatsWriter, doc: &Segmented) -> Result<()> {
    w.start("abstract", &[("abstract-type", "section")])?;

    if let Some(title) = doc.section(titles::SECONDARY_TITLE).and_then(|s| s.as_text()) {
        w.leaf("title", &[], title)?;
    }

    if let Some(SectionContent::Authors(entries)) =
        doc.section(titles::AUTHORS).map(|s| &s.content)
    {
        write_authors(w, entries)?;
    }

    for section in doc.sections_titled(titles::BOXED_TEXT) {
        let SectionContent::Lines(lines) = &section.content else {
            continue;
        };
        w.start("sec", &[])?;
        w.start("boxed-text", &[])?;
        for line in lines {
            w.leaf_raw("p", &fragment(line))?;
        }
        w.end("boxed-text")?;
        w.end("sec")?;
    }

    for (title, is_keywords) in [
        (titles::ABSTRACT, false),
        (titles::KEYWORDS, true),
        (titles::RESUMEN, false),
        (titles::PALABRAS_CLAVES, true),
    ] {
        let Some(text) = doc.section(title).and_then(|s| s.as_text()) else {
            continue;
        };
        let text = text.trim();
        w.start("sec", &[])?;
        if is_keywords {
            let (label, terms) = split_label(text);
            w.leaf("title", &[], &label)?;
            for term in terms {
                w.leaf("p", &[], &term)?;
            }
        } else {
            let (heading, body) = split_heading(text);
            w.leaf("title", &[], heading)?;
            w.leaf("p", &[], body)?;
        }
        w.end("sec")?;
    }

    w.end("abstract")
}

fn write_authors(w: &mut JatsWriter, entries: &[AuthorEntry]) -> Result<()> {
    let names = entries
        .iter()
        .filter_map(|e| match e {
            AuthorEntry::Title(t) => Some(t.as_str()),
            AuthorEntry::Affiliation(_) => None,
        })
        .last()
        .unwrap_or_default();

    w.start("sec", &[])?;
    w.leaf("title", &[], names)?;
    for entry in entries {
        if let AuthorEntry::Affiliation(line) = entry {
            for part in split_affiliation(line) {
                w.leaf_raw("p", &part.to_markup())?;
            }
        }
    }
    w.end("sec")
}

#[cfg(test)]
mod tests {
    use super::super::{JatsOptions, generate_jats};
    use crate::model::{AuthorEntry, Section, SectionContent, Segmented, titles};

    fn xml_for(sections: Vec<Section>) -> String {
        let doc = Segmented {
            sections,
            ..Segmented::default()
        };
        generate_jats(&doc, &JatsOptions { indent: 0 })
    }

    #[test]
    fn test_journal_meta() {
        let xml = xml_for(vec![]);
        assert!(xml.contains(
            "<journal-id journal-id-type=\"publisher\">EASI: Ingeniería y Ciencias Aplicadas en la Industria</journal-id>"
        ));
        assert!(xml.contains("<issn>2953-6634</issn>"));
        assert!(xml.contains("<publisher-loc>Guayaquil, Ecuador</publisher-loc>"));
        assert_eq!(xml.matches("<subject> </subject>").count(), 3);
        assert_eq!(xml.matches("<kwd> </kwd>").count(), 3);
        assert!(xml.contains(r#"<license xlink:href="https://creativecommons.org/licenses/by/4.0/">"#));
        assert!(xml.contains("Creative Commons Attribution License</ext-link>, which permits"));
    }

    #[test]
    fn test_abstract_split() {
        let xml = xml_for(vec![
            Section::text(titles::SECONDARY_TITLE, "Sub"),
            Section::text(titles::ABSTRACT, "Abstract: This is a test. It has two sentences."),
        ]);
        assert!(xml.contains(
            "<abstract abstract-type=\"section\"><title>Sub</title><sec><title>Abstract:</title><p>This is a test. It has two sentences.</p></sec>"
        ));
    }

    #[test]
    fn test_keywords_each_term_a_paragraph() {
        let xml = xml_for(vec![Section::text(
            titles::PALABRAS_CLAVES,
            "Palabras claves: acero, hormigón",
        )]);
        assert!(xml.contains(
            "<sec><title>Palabras claves:</title><p>acero</p><p>hormigón</p></sec>"
        ));
    }

    #[test]
    fn test_authors_block() {
        let xml = xml_for(vec![Section::new(
            titles::AUTHORS,
            SectionContent::Authors(vec![
                AuthorEntry::Title("Ana (a)".into()),
                AuthorEntry::Title("Ana Pérez (a), Luis Mora (b)".into()),
                AuthorEntry::Affiliation("(a) Univ A & Co. (b) Univ B".into()),
            ]),
        )]);
        assert!(xml.contains(
            "<sec><title>Ana Pérez (a), Luis Mora (b)</title><p><sup>(a)</sup> Univ A &amp; Co.</p><p><sup>(b)</sup> Univ B</p></sec>"
        ));
    }

    #[test]
    fn test_boxed_text_lines() {
        let xml = xml_for(vec![Section::new(
            titles::BOXED_TEXT,
            SectionContent::Lines(vec![
                "<bold>DOI:</bold> 10.1/x".into(),
                "Accepted: 2024&nbsp;&amp; later".into(),
            ]),
        )]);
        assert!(xml.contains(
            "<sec><boxed-text><p><bold>DOI:</bold> 10.1/x</p><p>Accepted: 2024\u{a0}&amp; later</p></boxed-text></sec>"
        ));
    }

    #[test]
    fn test_missing_title_omits_element() {
        let xml = xml_for(vec![]);
        assert!(xml.contains("<title-group/>"));
    }
}
