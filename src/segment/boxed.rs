//! Boxed-text splitting.
//!
//! The journal template puts its submission metadata in one "Boxed Text"
//! paragraph. The paragraph is cut into up to four blocks by named block
//! markers, and each block is cut into lines by named line markers:
//!
//! | block        | starts at                            | line markers |
//! |--------------|--------------------------------------|--------------|
//! | header       | paragraph start (must hold `Accepted:`) | DOI, ISSN-e, Submitted, Revised, Accepted |
//! | institution  | `Engineering and Applied Sciences`   | university address, frequency, web, journal URL, email, journal address |
//! | citation     | `How to cite this article:`          | none |
//! | repository   | `Articles in journal repositories`   | none |

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Deserialize;

use crate::dom::{Dom, inner_html};
use crate::error::Anomaly;
use crate::model::{Section, SectionContent, titles};

/// Class the converter's style map gives to boxed-text paragraphs.
pub const BOXED_TEXT_CLASS: &str = "boxedtext";

const ACCEPTED: &str = "Accepted:";

/// How incomplete boxed-text paragraphs are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxedTextPolicy {
    /// Header and repository blocks are required; the others are optional.
    #[default]
    Standard,
    /// All four blocks are required.
    Strict,
    /// Only the `Accepted:` header is required.
    Partial,
}

/// The four blocks, in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BlockKind {
    Header,
    Institution,
    Citation,
    Repository,
}

const BLOCK_MARKERS: &[(BlockKind, &str)] = &[
    (BlockKind::Institution, "Engineering and Applied Sciences"),
    (BlockKind::Citation, "How to cite this article:"),
    (BlockKind::Repository, "Articles in journal repositories"),
];

/// A contiguous slice of the boxed-text markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub kind: BlockKind,
    pub markup: &'a str,
}

/// A named point where a block is broken into a new line.
struct LineMarker {
    name: &'static str,
    pattern: Regex,
    /// Break before every match, not only the first.
    every: bool,
}

impl LineMarker {
    fn new(name: &'static str, pattern: &str, every: bool) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("line marker pattern is valid"),
            every,
        }
    }
}

static HEADER_MARKERS: LazyLock<Vec<LineMarker>> = LazyLock::new(|| {
    vec![
        LineMarker::new("doi", r"DOI:", true),
        LineMarker::new("issn", r"ISSN-e:", true),
        LineMarker::new("submitted", r"Submitted:", true),
        LineMarker::new("revised", r"Revised:", true),
        LineMarker::new("accepted", r"Accepted:", true),
    ]
});

static INSTITUTION_MARKERS: LazyLock<Vec<LineMarker>> = LazyLock::new(|| {
    vec![
        LineMarker::new("address", r"University of Guayaquil\..*?Ecuador", false),
        LineMarker::new("frequency", r"Frequency/Year: \d+", false),
        LineMarker::new("web", r"Web:", false),
        LineMarker::new("journal-url", r"revistas\.ug\.edu\.ec/index\.php/easi", false),
        LineMarker::new("email", r"Email:", false),
        LineMarker::new(
            "journal-email",
            r"easi-publication\.industrial@ug\.edu\.ec",
            false,
        ),
    ]
});

static EMPTY_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<bold>\s*</bold>").expect("empty bold pattern is valid"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Emphasis the template wraps its markers in.
const MARKER_OPEN_TAGS: &[&str] = &["<bold>", "<italic>"];

/// Move a break at `pos` in front of the emphasis tags opening there.
fn break_before_open_tags(markup: &str, mut pos: usize) -> usize {
    loop {
        let before = markup[..pos].trim_end();
        match MARKER_OPEN_TAGS.iter().find(|tag| before.ends_with(**tag)) {
            Some(tag) => pos = before.len() - tag.len(),
            None => return pos,
        }
    }
}

fn has_text(markup: &str) -> bool {
    !TAG.replace_all(markup, "").trim().is_empty()
}

/// Cut boxed-text markup into blocks.
///
/// Returns `None` when the markup does not satisfy `policy`.
pub fn split_blocks(markup: &str, policy: BoxedTextPolicy) -> Option<Vec<Block<'_>>> {
    let accepted = markup.find(ACCEPTED)?;

    let mut blocks = Vec::new();
    let mut kind = BlockKind::Header;
    let mut start = 0;
    let mut cursor = accepted + ACCEPTED.len();

    loop {
        let next = BLOCK_MARKERS
            .iter()
            .filter(|(k, _)| *k > kind)
            .filter_map(|(k, marker)| {
                markup[cursor..]
                    .find(marker)
                    .map(|offset| (cursor + offset, *k, marker.len()))
            })
            .min_by_key(|(pos, _, _)| *pos);

        match next {
            Some((pos, next_kind, marker_len)) => {
                let split = break_before_open_tags(markup, pos).max(start);
                blocks.push(Block {
                    kind,
                    markup: &markup[start..split],
                });
                kind = next_kind;
                start = split;
                cursor = pos + marker_len;
            }
            None => {
                blocks.push(Block {
                    kind,
                    markup: &markup[start..],
                });
                break;
            }
        }
    }

    let satisfied = match policy {
        BoxedTextPolicy::Standard => kind == BlockKind::Repository,
        BoxedTextPolicy::Strict => blocks.len() == 4,
        BoxedTextPolicy::Partial => true,
    };
    satisfied.then_some(blocks)
}

/// Cut one block into lines.
pub fn block_lines(block: &Block<'_>) -> Vec<String> {
    match block.kind {
        BlockKind::Header => split_at_markers(block.markup, &HEADER_MARKERS),
        BlockKind::Institution => {
            let cleaned = EMPTY_BOLD.replace_all(block.markup, " ");
            split_at_markers(&cleaned, &INSTITUTION_MARKERS)
        }
        BlockKind::Citation | BlockKind::Repository => {
            let line = block.markup.trim();
            if !has_text(line) {
                Vec::new()
            } else {
                vec![line.to_string()]
            }
        }
    }
}

fn split_at_markers(text: &str, markers: &[LineMarker]) -> Vec<String> {
    let mut breaks: Vec<usize> = Vec::new();
    for marker in markers {
        if marker.every {
            breaks.extend(
                marker
                    .pattern
                    .find_iter(text)
                    .map(|m| break_before_open_tags(text, m.start())),
            );
        } else if let Some(m) = marker.pattern.find(text) {
            log::trace!("boxed text line marker {} at {}", marker.name, m.start());
            breaks.push(break_before_open_tags(text, m.start()));
        }
    }
    breaks.push(text.len());
    breaks.sort_unstable();
    breaks.dedup();

    let mut lines = Vec::new();
    let mut start = 0;
    for end in breaks {
        let line = text[start..end].trim();
        if has_text(line) {
            lines.push(line.to_string());
        }
        start = end;
    }
    lines
}

/// Turn every boxed-text paragraph into one section per block.
pub fn collect(dom: &Dom, policy: BoxedTextPolicy, anomalies: &mut Vec<Anomaly>) -> Vec<Section> {
    let mut sections = Vec::new();
    for p in dom.elements_by_tag("p") {
        if !dom.has_class(p, BOXED_TEXT_CLASS) {
            continue;
        }
        let markup = inner_html(dom, p);
        let markup = markup.trim();

        let Some(blocks) = split_blocks(markup, policy) else {
            let anomaly = Anomaly::boxed_text(markup);
            anomaly.log();
            anomalies.push(anomaly);
            continue;
        };

        for block in &blocks {
            let lines = block_lines(block);
            if !lines.is_empty() {
                sections.push(Section::new(titles::BOXED_TEXT, SectionContent::Lines(lines)));
            }
        }
    }
    sections
}
