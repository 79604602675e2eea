//! JATS output read back with an XML parser.

use proptest::prelude::*;
use quick_xml::Reader;
use quick_xml::events::Event;

use jatsify::model::titles;
use jatsify::{
    AuthorEntry, ContentUnit, Image, JatsOptions, Section, SectionContent, Segmented,
    Subsection, SubsectionStyle, generate_jats,
};

/// Title and paragraphs of every top-level `<sec>` in `<body>`.
fn body_sections(xml: &str) -> Vec<(String, Vec<String>)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut sections: Vec<(String, Vec<String>)> = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "sec" && stack.last().map(String::as_str) == Some("body") {
                    sections.push((String::new(), Vec::new()));
                }
                stack.push(name);
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                let path: Vec<&str> = stack.iter().map(String::as_str).collect();
                match path.as_slice() {
                    [.., "body", "sec", "title"] => {
                        if let Some(last) = sections.last_mut() {
                            last.0 = text;
                        }
                    }
                    [.., "body", "sec", "p"] => {
                        if let Some(last) = sections.last_mut() {
                            last.1.push(text);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    sections
}

/// Names of every element, in document order.
fn element_names(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut names = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) => {
                names.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Eof => break,
            _ => {}
        }
    }
    names
}

fn units(title: &str, paragraphs: &[&str]) -> Section {
    Section::new(
        title,
        SectionContent::Units(
            paragraphs
                .iter()
                .map(|p| ContentUnit::Html(p.to_string()))
                .collect(),
        ),
    )
}

fn sample() -> Segmented {
    let mut methods = units("Methods", &["Overview."]);
    methods.subsections = vec![
        Subsection {
            title: "Sampling".into(),
            content: vec!["Ten sites.".into()],
            style: SubsectionStyle::Nested,
        },
        Subsection {
            title: "Analysis".into(),
            content: vec!["By hand.".into()],
            style: SubsectionStyle::RunIn,
        },
    ];

    Segmented {
        sections: vec![
            Section::text(titles::ARTICLE_TITLE, "A <Study> & more"),
            Section::text(titles::SECONDARY_TITLE, "Un estudio"),
            Section::new(
                titles::AUTHORS,
                SectionContent::Authors(vec![
                    AuthorEntry::Title("Ana Pérez (a)".into()),
                    AuthorEntry::Affiliation("(a) Universidad X".into()),
                ]),
            ),
            Section::table(1, vec![vec!["k".into(), "v".into()], vec!["1".into(), "2".into()]]),
            units("Introduction", &["Plain text.", "Second paragraph."]),
            methods,
            Section::text(titles::KEYWORDS, "Keywords: one, two"),
        ],
        keywords: vec!["one".into(), "two".into()],
        images: vec![Image::new(1, Some("media/image001.png"), None)],
    }
}

#[test]
fn test_output_is_well_formed() {
    let xml = generate_jats(&sample(), &JatsOptions::default());
    let names = element_names(&xml);
    assert_eq!(names.first().map(String::as_str), Some("article"));
    assert!(names.iter().any(|n| n == "table-wrap"));
    assert!(names.iter().any(|n| n == "graphic"));
    assert!(xml.contains("<article-title>A &lt;Study&gt; &amp; more</article-title>"));
}

#[test]
fn test_front_matter_stays_out_of_body() {
    let xml = generate_jats(&sample(), &JatsOptions::default());
    let titles: Vec<_> = body_sections(&xml).into_iter().map(|(t, _)| t).collect();
    assert_eq!(titles, vec!["Tabla", "Introduction", "Methods"]);
}

#[test]
fn test_subsection_styles() {
    let xml = generate_jats(&sample(), &JatsOptions { indent: 0 });
    assert!(xml.contains(
        "<sec><title>Methods</title><p>Overview.</p><sec><title>Sampling</title><p>Ten sites.</p></sec><p><italic><bold>Analysis</bold></italic></p><p>By hand.</p></sec>"
    ));
}

#[test]
fn test_element_order_in_article() {
    let names = element_names(&generate_jats(&sample(), &JatsOptions::default()));
    let position = |name: &str| names.iter().position(|n| n == name).unwrap();
    assert!(position("front") < position("body"));
    assert!(position("body") < position("back"));
    assert!(position("journal-meta") < position("article-meta"));
    assert!(position("permissions") < position("abstract"));
    assert!(position("abstract") < position("kwd-group"));
    assert!(position("table-wrap") < position("fig"));
}

#[test]
fn test_residual_escaped_markup_is_restored() {
    let doc = Segmented {
        sections: vec![units("Intro", &["see &lt;bold&gt;this&lt;/bold&gt; now"])],
        ..Segmented::default()
    };
    let xml = generate_jats(&doc, &JatsOptions { indent: 0 });
    assert!(xml.contains("<p>see <bold>this</bold> now</p>"));
    element_names(&xml);
}

#[test]
fn test_recovers_from_unbalanced_markup() {
    let doc = Segmented {
        sections: vec![units("Intro", &["<bold>open only", "a < b"])],
        ..Segmented::default()
    };
    let xml = generate_jats(&doc, &JatsOptions { indent: 0 });
    assert!(xml.contains("<p><bold>open only</bold></p><p>a &lt; b</p>"));
    element_names(&xml);
}

proptest! {
    #[test]
    fn prop_body_sections_round_trip(
        sections in prop::collection::vec(
            ("Sec [a-z]{2,8}", prop::collection::vec("[A-Za-z][A-Za-z ,.]{0,30}[a-z.]", 1..4)),
            1..6,
        )
    ) {
        let doc = Segmented {
            sections: sections
                .iter()
                .map(|(title, paragraphs)| {
                    let paragraphs: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
                    units(title, &paragraphs)
                })
                .collect(),
            ..Segmented::default()
        };
        let xml = generate_jats(&doc, &JatsOptions::default());
        let read = body_sections(&xml);

        prop_assert_eq!(read.len(), sections.len());
        for ((title, paragraphs), (read_title, read_paragraphs)) in sections.iter().zip(&read) {
            prop_assert_eq!(title, read_title);
            let expected: Vec<String> = paragraphs.iter().map(|p| p.trim().to_string()).collect();
            prop_assert_eq!(&expected, read_paragraphs);
        }
    }
}
