//! Event-driven tree construction.
//!
//! [`TreeBuilder`] consumes start-tag, end-tag and text events and keeps a
//! stack of open elements. [`parse_document`] drives it from a `quick-xml`
//! event reader.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::arena::{Attribute, Document, NodeId};
use crate::error::{Error, Result};

/// Tags that never have a matching end tag.
const DEFAULT_VOID_TAGS: &[&str] = &[
    "meta", "br", "hr", "img", "link", "input", "col", "area", "base", "wbr",
];

/// Configuration for markup parsing.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Tags recorded as children but never pushed on the open-element stack.
    pub void_tags: Vec<String>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            void_tags: DEFAULT_VOID_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ParseConfig {
    /// Replace the void tag list.
    pub fn with_void_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.void_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    fn is_void(&self, tag: &str) -> bool {
        self.void_tags.iter().any(|t| t == tag)
    }
}

/// Builds a [`Document`] from a stream of markup events.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    doc: Document,
    open: Vec<NodeId>,
    config: ParseConfig,
}

impl TreeBuilder {
    /// Create a builder with the default void tags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the builder with custom settings.
    pub fn with_config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    /// Handle a start tag.
    pub fn start_tag(&mut self, tag: &str, attrs: Vec<Attribute>) -> Result<()> {
        let parent = self.open.last().copied();

        if self.config.is_void(tag) {
            match parent {
                Some(parent) => {
                    let node = self.doc.create_element(tag, attrs);
                    self.doc.append(parent, node);
                }
                None => tracing::trace!(tag, "ignoring void tag outside the root element"),
            }
            return Ok(());
        }

        let node = self.doc.create_element(tag, attrs);
        match parent {
            Some(parent) => self.doc.append(parent, node),
            None if self.doc.root().is_none() => self.doc.set_root(node),
            None => {
                return Err(Error::MalformedMarkup(format!(
                    "second root element <{tag}>"
                )));
            }
        }
        self.open.push(node);
        Ok(())
    }

    /// Handle an end tag. The name must match the innermost open element.
    pub fn end_tag(&mut self, tag: &str) -> Result<()> {
        if self.config.is_void(tag) {
            return Ok(());
        }

        let Some(top) = self.open.pop() else {
            return Err(Error::MalformedMarkup(format!(
                "end tag </{tag}> with no open element"
            )));
        };

        match self.doc.tag(top) {
            Some(open_tag) if open_tag == tag => Ok(()),
            open_tag => Err(Error::MalformedMarkup(format!(
                "end tag </{tag}> does not match open <{}>",
                open_tag.unwrap_or("?")
            ))),
        }
    }

    /// Handle character data.
    pub fn text(&mut self, text: &str) -> Result<()> {
        match self.open.last().copied() {
            Some(top) => {
                self.doc.append_text(top, text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(Error::MalformedMarkup(format!(
                "text outside the root element: {:?}",
                text.trim()
            ))),
        }
    }

    /// Finish building. Every element must have been closed.
    pub fn finish(self) -> Result<Document> {
        if let Some(&top) = self.open.last() {
            return Err(Error::MalformedMarkup(format!(
                "unclosed element <{}>",
                self.doc.tag(top).unwrap_or("?")
            )));
        }
        if self.doc.root().is_none() {
            return Err(Error::MalformedMarkup("document has no root element".into()));
        }
        Ok(self.doc)
    }
}

/// Parse a complete markup document into a tree.
///
/// The whole document must be supplied; a truncated prefix fails with
/// [`Error::MalformedMarkup`] because its elements are never closed.
pub fn parse_document(markup: &str) -> Result<Document> {
    parse_document_with_config(markup, ParseConfig::default())
}

/// Parse a complete markup document with custom settings.
pub fn parse_document_with_config(markup: &str, config: ParseConfig) -> Result<Document> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().check_end_names = false;
    reader.config_mut().allow_unmatched_ends = true;

    let mut builder = TreeBuilder::new().with_config(config);

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(quick_xml::Error::IllFormed(e)) => {
                return Err(Error::MalformedMarkup(format!(
                    "{e} at byte {}",
                    reader.error_position()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        match event {
            Event::Start(e) => {
                let (tag, attrs) = element_parts(&e)?;
                builder.start_tag(&tag, attrs)?;
            }
            Event::Empty(e) => {
                let (tag, attrs) = element_parts(&e)?;
                builder.start_tag(&tag, attrs)?;
                builder.end_tag(&tag)?;
            }
            Event::End(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                builder.end_tag(&tag)?;
            }
            Event::Text(e) => {
                builder.text(&String::from_utf8_lossy(e.as_ref()))?;
            }
            Event::CData(e) => {
                builder.text(&String::from_utf8_lossy(e.as_ref()))?;
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                match resolve_entity(&entity) {
                    Some(resolved) => builder.text(&resolved)?,
                    None => builder.text(&format!("&{entity};"))?,
                }
            }
            Event::Eof => break,
            // Comments, doctype, declarations and processing instructions
            _ => {}
        }
    }

    let doc = builder.finish()?;
    tracing::debug!(nodes = doc.len(), "parsed markup tree");
    Ok(doc)
}

fn element_parts(e: &BytesStart<'_>) -> Result<(String, Vec<Attribute>)> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
    let mut attrs = Vec::new();

    for attr in e.html_attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let raw = String::from_utf8_lossy(&attr.value).into_owned();
        let value = quick_xml::escape::unescape(&raw)
            .map(|v| v.into_owned())
            .unwrap_or(raw);
        attrs.push(Attribute { name, value });
    }

    Ok((tag, attrs))
}

/// Resolve a named or numeric character reference (without `&` and `;`).
fn resolve_entity(entity: &str) -> Option<String> {
    let named = match entity {
        "apos" => Some("'"),
        "quot" => Some("\""),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "nbsp" => Some("\u{a0}"),
        "ndash" => Some("\u{2013}"),
        "mdash" => Some("\u{2014}"),
        "lsquo" => Some("\u{2018}"),
        "rsquo" => Some("\u{2019}"),
        "ldquo" => Some("\u{201c}"),
        "rdquo" => Some("\u{201d}"),
        "hellip" => Some("\u{2026}"),
        _ => None,
    };
    if let Some(s) = named {
        return Some(s.to_string());
    }

    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}
