//! JATS serializer.
//!
//! Writes a [`Segmented`] document as a JATS 1.3 `<article>`:
//!
//! ```text
//! article
//! ├── front
//! │   ├── journal-meta      fixed journal identity
//! │   └── article-meta      title, placeholders, permissions,
//! │                         abstract (authors, boxed text, abstracts,
//! │                         keywords), kwd-group
//! ├── body                  one sec per body section, then every fig
//! └── back
//! ```
//!
//! Serialization never fails. Trusted inline markup from content units
//! (emphasis, cross-references, superscripts) is written raw after being
//! re-parsed, so the output is well-formed whatever the segmenter produced.

mod body;
mod front;
pub mod markup;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::dom::escape_text;
use crate::error::Result;
use crate::model::Segmented;

/// Output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JatsOptions {
    /// Spaces per nesting level; 0 writes everything on one line.
    pub indent: usize,
}

impl Default for JatsOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Serialize a segmented document to JATS XML.
pub fn generate_jats(doc: &Segmented, options: &JatsOptions) -> String {
    let mut w = JatsWriter::new(options.indent);
    if let Err(e) = write_article(&mut w, doc) {
        log::error!("JATS output truncated: {e}");
    }
    markup::unescape_inline_tags(&w.into_string())
}

fn write_article(w: &mut JatsWriter, doc: &Segmented) -> Result<()> {
    w.declaration()?;
    w.start(
        "article",
        &[
            ("xmlns:xlink", "http://www.w3.org/TR/REC-html40"),
            ("article-type", "research"),
            ("dtd-version", "1.3"),
            ("specific-use", "production"),
            ("xml:lang", "en"),
        ],
    )?;
    front::write_front(w, doc)?;
    body::write_body(w, doc)?;
    w.empty("back", &[])?;
    w.end("article")
}

type Attrs<'a> = &'a [(&'a str, &'a str)];

/// Event writer over an in-memory buffer.
pub(crate) struct JatsWriter {
    inner: Writer<Vec<u8>>,
}

impl JatsWriter {
    fn new(indent: usize) -> Self {
        let inner = if indent == 0 {
            Writer::new(Vec::new())
        } else {
            Writer::new_with_indent(Vec::new(), b' ', indent)
        };
        Self { inner }
    }

    fn declaration(&mut self) -> Result<()> {
        self.inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    fn start(&mut self, name: &str, attrs: Attrs<'_>) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Start(start))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: Attrs<'_>) -> Result<()> {
        let empty = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Empty(empty))?;
        Ok(())
    }

    /// Character data, escaped.
    fn text(&mut self, text: &str) -> Result<()> {
        self.raw(&escape_text(text))
    }

    /// Markup that is already well-formed XML.
    fn raw(&mut self, markup: &str) -> Result<()> {
        self.inner
            .write_event(Event::Text(BytesText::from_escaped(markup)))?;
        Ok(())
    }

    /// `<name>text</name>`
    fn leaf(&mut self, name: &str, attrs: Attrs<'_>, text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    /// `<name>markup</name>`
    fn leaf_raw(&mut self, name: &str, markup: &str) -> Result<()> {
        self.start(name, &[])?;
        self.raw(markup)?;
        self.end(name)
    }

    fn into_string(self) -> String {
        let bytes = self.inner.into_inner();
        String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }
}
