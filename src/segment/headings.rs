//! Heading-delimited body sections.
//!
//! Each `<h3>` owns the element siblings that follow it up to the next
//! `<h3>`. Inside that run, `<h4>` and `<h5>` open subsections that own
//! their siblings up to the next heading of any of the three levels.

use std::collections::HashSet;

use crate::dom::{Dom, NodeId, inner_html};
use crate::model::{
    ContentUnit, List, ListItem, ListKind, Section, SectionContent, Subsection, SubsectionStyle,
};

const SUBSECTION_END: &[&str] = &["h3", "h4", "h5"];

pub fn collect(dom: &Dom, processed: &mut HashSet<String>) -> Vec<Section> {
    let mut sections = Vec::new();

    for heading in dom.elements_by_tag("h3") {
        let title = dom.text(heading).trim().to_string();
        if processed.contains(&title) {
            log::debug!("skipping repeated section {title:?}");
            continue;
        }

        let mut units = Vec::new();
        let mut subsections = Vec::new();
        let mut cursor = dom.next_element_sibling(heading);

        while let Some(el) = cursor {
            let Some(name) = dom.element_name(el) else {
                break;
            };
            let tag: &str = name.as_ref();
            match tag {
                "h3" => break,
                "h4" | "h5" => {
                    let style = if tag == "h5" {
                        SubsectionStyle::RunIn
                    } else {
                        SubsectionStyle::Nested
                    };
                    let (subsection, next) = subsection(dom, el, style);
                    if let Some(subsection) = subsection {
                        subsections.push(subsection);
                    }
                    cursor = next;
                    continue;
                }
                "ul" => units.push(ContentUnit::List(list(dom, el, ListKind::Bullet))),
                "ol" => units.push(ContentUnit::List(list(dom, el, ListKind::Ordered))),
                _ => units.push(ContentUnit::Html(inner_html(dom, el).trim().to_string())),
            }
            cursor = dom.next_element_sibling(el);
        }

        if units.is_empty() && subsections.is_empty() {
            continue;
        }
        let mut section = Section::new(title.clone(), SectionContent::Units(units));
        section.subsections = subsections;
        sections.push(section);
        processed.insert(title);
    }

    sections
}

/// Gather one subsection; returns it with the element that ends it.
fn subsection(
    dom: &Dom,
    heading: NodeId,
    style: SubsectionStyle,
) -> (Option<Subsection>, Option<NodeId>) {
    let title = dom.text(heading).trim().to_string();
    let mut content = Vec::new();
    let mut cursor = dom.next_element_sibling(heading);

    while let Some(el) = cursor {
        if SUBSECTION_END.iter().any(|tag| dom.is_tag(el, tag)) {
            break;
        }
        content.push(inner_html(dom, el).trim().to_string());
        cursor = dom.next_element_sibling(el);
    }

    let subsection = (!title.is_empty()).then(|| Subsection {
        title,
        content,
        style,
    });
    (subsection, cursor)
}

fn list(dom: &Dom, el: NodeId, kind: ListKind) -> List {
    let items = dom
        .descendants(el)
        .into_iter()
        .filter(|&d| dom.is_tag(d, "li"))
        .map(|li| ListItem {
            text: dom.text(li).trim().to_string(),
        })
        .collect();
    List { kind, items }
}
