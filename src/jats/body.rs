//! `<body>`: sections, tables and figures.

use super::JatsWriter;
use super::markup::{fragment, is_skipped_unit, list_items};
use crate::dom::escape_text;
use crate::error::Result;
use crate::model::{ContentUnit, List, Section, SectionContent, Segmented, Subsection, titles};

pub(super) fn write_body(w: &mut JatsWriter, doc: &Segmented) -> Result<()> {
    w.start("body", &[])?;
    for section in doc.body_sections() {
        write_section(w, section)?;
    }
    for (i, _) in doc.images.iter().enumerate() {
        write_figure(w, i + 1)?;
    }
    w.end("body")
}

fn write_section(w: &mut JatsWriter, section: &Section) -> Result<()> {
    w.start("sec", &[])?;
    w.leaf("title", &[], &section.title)?;

    match &section.content {
        SectionContent::Rows(rows) if section.is_table() => write_table(w, section, rows)?,
        SectionContent::Units(units) => {
            for unit in units {
                match unit {
                    ContentUnit::Html(html) => write_unit(w, html)?,
                    ContentUnit::List(list) => write_list(w, list)?,
                }
            }
        }
        SectionContent::Text(text) if !text.trim().is_empty() => write_unit(w, text)?,
        _ => {}
    }

    for subsection in &section.subsections {
        if titles::is_front_matter(&subsection.title) {
            continue;
        }
        write_subsection(w, subsection)?;
    }

    w.end("sec")
}

fn write_subsection(w: &mut JatsWriter, subsection: &Subsection) -> Result<()> {
    if subsection.is_run_in() {
        let label = escape_text(&subsection.title);
        w.leaf_raw("p", &format!("<italic><bold>{label}</bold></italic>"))?;
        for unit in &subsection.content {
            write_unit(w, unit)?;
        }
        return Ok(());
    }

    w.start("sec", &[])?;
    w.leaf("title", &[], &subsection.title)?;
    for unit in &subsection.content {
        write_unit(w, unit)?;
    }
    w.end("sec")
}

/// One paragraph-equivalent: a paragraph, a list, or nothing.
fn write_unit(w: &mut JatsWriter, unit: &str) -> Result<()> {
    let unit = unit.trim();
    if unit.is_empty() || is_skipped_unit(unit) {
        return Ok(());
    }
    if let Some(items) = list_items(unit) {
        w.start("list", &[("list-type", "bullet")])?;
        for item in items {
            w.start("list-item", &[])?;
            w.leaf_raw("p", &fragment(&item))?;
            w.end("list-item")?;
        }
        return w.end("list");
    }
    w.leaf_raw("p", &fragment(unit))
}

fn write_list(w: &mut JatsWriter, list: &List) -> Result<()> {
    w.start("list", &[("list-type", list.kind.jats_type())])?;
    for item in &list.items {
        w.start("list-item", &[])?;
        w.leaf("p", &[], &item.text)?;
        w.end("list-item")?;
    }
    w.end("list")
}

fn write_table(w: &mut JatsWriter, section: &Section, rows: &[Vec<String>]) -> Result<()> {
    let number = section.table_number().unwrap_or_default();
    let id = section.id.clone().unwrap_or_else(|| format!("table-{number}"));
    let label = format!("Table {number}");

    w.start("table-wrap", &[("id", id.as_str())])?;
    w.leaf("label", &[], &label)?;
    w.start("caption", &[])?;
    w.leaf("title", &[], &label)?;
    w.end("caption")?;
    w.start("table", &[])?;
    for (i, row) in rows.iter().enumerate() {
        let cell_tag = if i == 0 { "th" } else { "td" };
        w.start("tr", &[])?;
        for cell in row {
            w.leaf(cell_tag, &[], cell)?;
        }
        w.end("tr")?;
    }
    w.end("table")?;
    w.end("table-wrap")
}

fn write_figure(w: &mut JatsWriter, number: usize) -> Result<()> {
    let id = format!("fig-{number}");
    let href = format!("media/image{number:03}.png");
    let label = format!("Figure {number}.");

    w.start("fig", &[("id", id.as_str())])?;
    w.empty(
        "graphic",
        &[
            ("mimetype", "image"),
            ("mime-subtype", "png"),
            ("xlink:href", href.as_str()),
        ],
    )?;
    w.start("caption", &[])?;
    w.leaf("label", &[], &label)?;
    w.leaf("title", &[], &label)?;
    w.end("caption")?;
    w.end("fig")
}

#[cfg(test)]
mod tests {
    use super::super::{JatsOptions, generate_jats};
    use crate::model::{
        ContentUnit, Image, List, ListItem, ListKind, Section, SectionContent, Segmented,
        Subsection, SubsectionStyle, titles,
    };

    fn xml_for(doc: Segmented) -> String {
        generate_jats(&doc, &JatsOptions { indent: 0 })
    }

    fn units(title: &str, units: Vec<ContentUnit>) -> Section {
        Section::new(title, SectionContent::Units(units))
    }

    #[test]
    fn test_paragraphs_keep_inline_markup() {
        let xml = xml_for(Segmented {
            sections: vec![units(
                "Intro",
                vec![ContentUnit::Html(
                    r#"See <xref ref-type="fig" rid="fig-1">Figure 1</xref> &amp; <bold>more</bold>"#
                        .into(),
                )],
            )],
            ..Segmented::default()
        });
        assert!(xml.contains(
            r#"<body><sec><title>Intro</title><p>See <xref ref-type="fig" rid="fig-1">Figure 1</xref> &amp; <bold>more</bold></p></sec>"#
        ));
    }

    #[test]
    fn test_front_matter_not_in_body() {
        let xml = xml_for(Segmented {
            sections: vec![
                Section::text(titles::ABSTRACT, "Abstract: x"),
                units("Intro", vec![ContentUnit::Html("y".into())]),
            ],
            ..Segmented::default()
        });
        let body = &xml[xml.find("<body>").unwrap()..];
        assert!(!body.contains("Abstract"));
    }

    #[test]
    fn test_table_wrap() {
        let xml = xml_for(Segmented {
            sections: vec![Section::table(
                2,
                vec![
                    vec!["H1".into(), "H2".into()],
                    vec!["a".into(), "b".into()],
                ],
            )],
            ..Segmented::default()
        });
        assert!(xml.contains(
            r#"<sec><title>Tabla</title><table-wrap id="table-2"><label>Table 2</label><caption><title>Table 2</title></caption><table><tr><th>H1</th><th>H2</th></tr><tr><td>a</td><td>b</td></tr></table></table-wrap></sec>"#
        ));
    }

    #[test]
    fn test_skipped_and_list_units() {
        let xml = xml_for(Segmented {
            sections: vec![units(
                "Data",
                vec![
                    ContentUnit::Html(r#"<img src="media/image001.png"/>"#.into()),
                    ContentUnit::Html("<li>one</li><li>two</li>".into()),
                    ContentUnit::List(List {
                        kind: ListKind::Ordered,
                        items: vec![ListItem { text: "first".into() }],
                    }),
                ],
            )],
            ..Segmented::default()
        });
        assert!(!xml.contains("<img"));
        assert!(xml.contains(
            r#"<list list-type="bullet"><list-item><p>one</p></list-item><list-item><p>two</p></list-item></list>"#
        ));
        assert!(xml.contains(
            r#"<list list-type="order"><list-item><p>first</p></list-item></list>"#
        ));
    }

    #[test]
    fn test_subsection_styles() {
        let mut section = units("Methods", vec![ContentUnit::Html("lead".into())]);
        section.subsections = vec![
            Subsection {
                title: "Setup".into(),
                content: vec!["s".into()],
                style: SubsectionStyle::Nested,
            },
            Subsection {
                title: "Detail".into(),
                content: vec!["d".into()],
                style: SubsectionStyle::RunIn,
            },
        ];
        let xml = xml_for(Segmented {
            sections: vec![section],
            ..Segmented::default()
        });
        assert!(xml.contains(
            "<sec><title>Methods</title><p>lead</p><sec><title>Setup</title><p>s</p></sec><p><italic><bold>Detail</bold></italic></p><p>d</p></sec>"
        ));
    }

    #[test]
    fn test_figures() {
        let xml = xml_for(Segmented {
            images: vec![Image::new(1, None, None), Image::new(2, None, None)],
            ..Segmented::default()
        });
        assert!(xml.contains(
            r#"<fig id="fig-2"><graphic mimetype="image" mime-subtype="png" xlink:href="media/image002.png"/><caption><label>Figure 2.</label><title>Figure 2.</title></caption></fig>"#
        ));
        assert!(xml.contains("</fig></body><back/></article>"));
    }
}
