//! Annotated descriptions.
//!
//! An entry's description is the sequence of typed runs it was built from,
//! rendered once into a string such as
//! `[Verb] latin:"amō, amāre, amāvī, amātum" | text:": " | definition:"to love"`.
//! The rendered string is stable and identifies the entry.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::PartOfSpeech;

/// What a description block holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum DescBlockKind {
    PartOfSpeech,
    /// Bold run.
    Latin,
    /// Italic run.
    Definition,
    /// Plain run carrying a gender marker.
    Gender,
    Text,
    /// Extraction notes, excluded from the clean text.
    DebugInfo,
}

impl DescBlockKind {
    pub fn tag(self) -> &'static str {
        match self {
            DescBlockKind::PartOfSpeech => "pos",
            DescBlockKind::Latin => "latin",
            DescBlockKind::Definition => "definition",
            DescBlockKind::Gender => "gender",
            DescBlockKind::Text => "text",
            DescBlockKind::DebugInfo => "debug",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct DescBlock {
    pub kind: DescBlockKind,
    pub text: String,
}

impl DescBlock {
    pub fn new(kind: DescBlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for DescBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DescBlockKind::PartOfSpeech => write!(f, "[{}]", self.text),
            kind => write!(f, "{}:{:?}", kind.tag(), self.text),
        }
    }
}

/// Typed blocks plus their rendering.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Description {
    rendered: String,
    blocks: Vec<DescBlock>,
}

impl Description {
    /// Build a description headed by a part-of-speech block.
    pub fn new(pos: PartOfSpeech, blocks: impl IntoIterator<Item = DescBlock>) -> Self {
        let mut all = vec![DescBlock::new(DescBlockKind::PartOfSpeech, pos.name())];
        all.extend(blocks);
        let mut description = Self {
            rendered: String::new(),
            blocks: all,
        };
        description.render();
        description
    }

    fn render(&mut self) {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            match i {
                0 => {}
                1 => out.push(' '),
                _ => out.push_str(" | "),
            }
            out.push_str(&block.to_string());
        }
        self.rendered = out;
    }

    /// Append an extraction note.
    pub fn push_debug(&mut self, note: impl Into<String>) {
        self.blocks.push(DescBlock::new(DescBlockKind::DebugInfo, note));
        self.render();
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    pub fn blocks(&self) -> &[DescBlock] {
        &self.blocks
    }

    /// Reading text without annotations or debug notes.
    pub fn clean(&self) -> String {
        self.blocks
            .iter()
            .filter(|b| {
                !matches!(
                    b.kind,
                    DescBlockKind::PartOfSpeech | DescBlockKind::DebugInfo
                )
            })
            .map(|b| b.text.as_str())
            .collect()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl PartialEq for Description {
    fn eq(&self, other: &Self) -> bool {
        self.rendered == other.rendered
    }
}

impl Eq for Description {}

impl Hash for Description {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rendered.hash(state);
    }
}
