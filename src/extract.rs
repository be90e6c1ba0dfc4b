//! Vocabulary extraction.
//!
//! The dictionary body is a flat run of headers and paragraphs under one
//! container element. [`Extractor`] walks that run with a stack of open
//! headers and files each classified paragraph under the innermost header.

use indexmap::IndexMap;

use crate::classify::classify_block;
use crate::diagnostics::Warning;
use crate::error::{Error, Result};
use crate::markup::{Document, NodeId, header_level};
use crate::style::StyleSheet;
use crate::util::{fold_diacritics, normalize_nbsp};
use crate::vocab::{Verb, VocabEntry};

/// Settings for [`Extractor`].
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Inline tag whose text forms a header's title.
    pub label_tag: String,
    /// Tag of content blocks handed to the classifier.
    pub paragraph_tag: String,
    /// Header titles whose content is not vocabulary.
    pub skipped_headers: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            label_tag: "span".to_string(),
            paragraph_tag: "p".to_string(),
            skipped_headers: vec!["Numerals".to_string()],
        }
    }
}

impl ExtractConfig {
    pub fn with_label_tag(mut self, tag: impl Into<String>) -> Self {
        self.label_tag = tag.into();
        self
    }

    pub fn with_paragraph_tag(mut self, tag: impl Into<String>) -> Self {
        self.paragraph_tag = tag.into();
        self
    }

    /// Add a header title to skip.
    pub fn skip_header(mut self, title: impl Into<String>) -> Self {
        self.skipped_headers.push(title.into());
        self
    }

    fn is_skipped(&self, title: &str) -> bool {
        self.skipped_headers.iter().any(|h| h == title)
    }
}

/// Entries grouped by header title, in document order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct Dictionary {
    sections: IndexMap<String, Vec<VocabEntry>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a header. A title seen before keeps its entries.
    pub fn insert_header(&mut self, title: impl Into<String>) {
        self.sections.entry(title.into()).or_default();
    }

    pub fn push(&mut self, title: &str, entry: VocabEntry) {
        match self.sections.get_mut(title) {
            Some(entries) => entries.push(entry),
            None => {
                self.sections.insert(title.to_string(), vec![entry]);
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&[VocabEntry]> {
        self.sections.get(title).map(Vec::as_slice)
    }

    /// Header titles in document order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[VocabEntry])> {
        self.sections
            .iter()
            .map(|(title, entries)| (title.as_str(), entries.as_slice()))
    }

    /// Every entry, section by section.
    pub fn entries(&self) -> impl Iterator<Item = &VocabEntry> {
        self.sections.values().flatten()
    }

    pub fn verbs(&self) -> impl Iterator<Item = &Verb> {
        self.entries().filter_map(VocabEntry::as_verb)
    }

    /// Entries whose text or generated forms contain `query`, ignoring
    /// macrons and case.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a VocabEntry> + 'a {
        let needle = fold_diacritics(query).to_lowercase();
        self.entries().filter(move |entry| {
            fold_diacritics(&entry.extended_description())
                .to_lowercase()
                .contains(&needle)
        })
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of entries across all headers.
    pub fn entry_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// Generate paradigms for every entry.
    pub fn load_all(&mut self) -> Vec<Warning> {
        self.sections
            .values_mut()
            .flatten()
            .flat_map(VocabEntry::load)
            .collect()
    }
}

/// A dictionary plus everything that went wrong building it.
#[derive(Debug, Default)]
pub struct Extraction {
    pub dictionary: Dictionary,
    pub warnings: Vec<Warning>,
}

/// Locate and parse the document's style block.
///
/// A `type` attribute, when present, must be `text/css`.
pub fn find_stylesheet(doc: &Document) -> Result<StyleSheet> {
    let root = doc
        .root()
        .ok_or_else(|| Error::MissingElement("root element".into()))?;
    let style = doc
        .find(root, "style")
        .ok_or_else(|| Error::MissingElement("style block".into()))?;

    if let Some(kind) = doc.get_attr(style, "type")
        && !kind.eq_ignore_ascii_case("text/css")
    {
        return Err(Error::UnsupportedStyle(kind.to_string()));
    }

    let css: String = doc
        .flattened_data(style)
        .into_iter()
        .map(|run| run.text)
        .collect();
    StyleSheet::parse(&css)
}

/// Walks the dictionary body and classifies its paragraphs.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// The parent of the first header found depth-first.
    pub fn find_container(&self, doc: &Document) -> Result<NodeId> {
        let root = doc
            .root()
            .ok_or_else(|| Error::MissingElement("root element".into()))?;
        let header = doc
            .find_by(root, |tag| header_level(tag).is_some())
            .ok_or_else(|| Error::MissingElement("header (h1-h9)".into()))?;
        doc.parent(header)
            .ok_or_else(|| Error::MissingElement("header container".into()))
    }

    /// Header title: text of its label runs, with non-breaking spaces
    /// normalized.
    fn header_title(&self, doc: &Document, header: NodeId) -> String {
        doc.flattened_data(header)
            .into_iter()
            .filter(|run| doc.tag(run.node) == Some(self.config.label_tag.as_str()))
            .map(|run| normalize_nbsp(run.text))
            .collect()
    }

    /// Build the dictionary. Paradigms are not generated here; see
    /// [`Dictionary::load_all`].
    pub fn extract(&self, doc: &Document, sheet: &StyleSheet) -> Result<Extraction> {
        let container = self.find_container(doc)?;
        let mut extraction = Extraction::default();
        let mut headers: Vec<String> = Vec::new();

        for child in doc.children(container) {
            let Some(tag) = doc.tag(child) else {
                continue;
            };

            if let Some(depth) = header_level(tag) {
                if headers.len() >= depth {
                    headers.truncate(depth - 1);
                } else {
                    headers.resize(depth - 1, String::new());
                }
                let title = self.header_title(doc, child);
                tracing::debug!(depth, title = %title, "header");
                extraction.dictionary.insert_header(title.as_str());
                headers.push(title);
                continue;
            }

            let Some(current) = headers.last() else {
                continue;
            };
            if self.config.is_skipped(current) || tag != self.config.paragraph_tag {
                continue;
            }

            let classification = classify_block(doc, child, sheet);
            extraction.warnings.extend(classification.warnings);
            if let Some(entry) = classification.entry {
                extraction.dictionary.push(current, entry);
            }
        }

        tracing::debug!(
            headers = extraction.dictionary.len(),
            entries = extraction.dictionary.entry_count(),
            "extracted vocabulary"
        );
        Ok(extraction)
    }
}
