//! Part-of-speech classification of content blocks.
//!
//! A block is flattened into text runs. Each run is typed by its resolved
//! class list: bold (`font-weight: 700`) marks Latin, italic marks an English
//! definition. Lexical markers (`adv.`, `prep.`, ...) and the shape of the
//! leading Latin run then decide the part of speech.
//!
//! Only a single unambiguous match produces an entry.

use std::collections::BTreeSet;

use crate::diagnostics::{Warning, WarningKind};
use crate::markup::{Document, FlattenedRun, NodeId};
use crate::paradigm::PrincipalParts;
use crate::style::StyleSheet;
use crate::util::find_marker;
use crate::vocab::{DescBlock, DescBlockKind, Description, PartOfSpeech, Verb, VocabEntry};

/// Lexical markers and the part of speech each implies.
const MARKERS: [(&str, PartOfSpeech); 5] = [
    ("adv.", PartOfSpeech::Adverb),
    ("pron.", PartOfSpeech::Pronoun),
    ("prep.", PartOfSpeech::Preposition),
    ("conj.", PartOfSpeech::Conjunction),
    ("interj.", PartOfSpeech::Interjection),
];

/// Imperative marker; flags possible irregulars.
const IMPERATIVE_MARKER: &str = "imp.";

/// Infinitives accepted without the `-re` ending.
const IRREGULAR_INFINITIVES: [&str; 2] = ["posse", "esse"];

const GENDER_MARKERS: [&str; 3] = [" m.", " f.", " n."];

const IRREGULAR_NOTE: &str = "possible unhandled irregular (imp.)";

/// A flattened run with its typographic classification resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRun<'a> {
    pub text: &'a str,
    pub node: NodeId,
    pub latin: bool,
    pub definition: bool,
}

impl<'a> StyledRun<'a> {
    pub fn resolve(doc: &Document, run: FlattenedRun<'a>, sheet: &StyleSheet) -> Self {
        Self {
            text: run.text,
            node: run.node,
            latin: is_latin(doc, run.node, sheet),
            definition: is_definition(doc, run.node, sheet),
        }
    }

    /// Neither Latin nor definition.
    pub fn is_plain(&self) -> bool {
        !self.latin && !self.definition
    }

    fn block_kind(&self) -> DescBlockKind {
        if self.latin {
            DescBlockKind::Latin
        } else if self.definition {
            DescBlockKind::Definition
        } else if GENDER_MARKERS.iter().any(|m| self.text.contains(*m)) {
            DescBlockKind::Gender
        } else {
            DescBlockKind::Text
        }
    }
}

fn has_class_declaration(
    doc: &Document,
    node: NodeId,
    sheet: &StyleSheet,
    property: &str,
    value: &str,
) -> bool {
    doc.ancestor_attributes(node, Some("class"), Some(' '))
        .into_iter()
        .any(|class| sheet.class_has(class, property, value))
}

/// Whether text in `node` is set bold by any resolved class.
pub fn is_latin(doc: &Document, node: NodeId, sheet: &StyleSheet) -> bool {
    has_class_declaration(doc, node, sheet, "font-weight", "700")
}

/// Whether text in `node` is set italic by any resolved class.
pub fn is_definition(doc: &Document, node: NodeId, sheet: &StyleSheet) -> bool {
    has_class_declaration(doc, node, sheet, "font-style", "italic")
}

/// Search runs for a marker.
///
/// With `plain_only` set, Latin and definition runs are skipped. With
/// `whole_word` set, the match must not touch a letter on either side.
pub fn has_marker(runs: &[StyledRun<'_>], marker: &str, plain_only: bool, whole_word: bool) -> bool {
    runs.iter()
        .filter(|run| !plain_only || run.is_plain())
        .any(|run| find_marker(run.text, marker, whole_word).is_some())
}

/// Principal parts if the block opens like a verb entry.
fn verb_parts(runs: &[StyledRun<'_>]) -> Option<PrincipalParts> {
    let first = runs.first().filter(|run| run.latin)?;
    let parts = PrincipalParts::from_list(first.text)?;
    let infinitive = parts.infinitive.as_str();
    if infinitive.ends_with("re") || IRREGULAR_INFINITIVES.contains(&infinitive) {
        Some(parts)
    } else {
        None
    }
}

/// Parts of speech whose predicates accept the block.
pub fn matching_parts_of_speech(runs: &[StyledRun<'_>]) -> BTreeSet<PartOfSpeech> {
    let mut matches: BTreeSet<PartOfSpeech> = MARKERS
        .iter()
        .filter(|(marker, _)| has_marker(runs, marker, true, true))
        .map(|(_, pos)| *pos)
        .collect();
    if verb_parts(runs).is_some() {
        matches.insert(PartOfSpeech::Verb);
    }
    matches
}

fn is_gloss(run: &StyledRun<'_>) -> bool {
    run.definition && run.text.trim_start().starts_with("to ")
}

/// English gloss of a verb entry.
fn verb_gloss<'a>(runs: &[StyledRun<'a>]) -> Option<&'a str> {
    if let [latin, separator, definition] = runs
        && latin.latin
        && separator.is_plain()
        && is_gloss(definition)
    {
        return Some(definition.text.trim());
    }
    runs.iter().find(|run| is_gloss(run)).map(|run| run.text.trim())
}

fn describe(pos: PartOfSpeech, runs: &[StyledRun<'_>]) -> Description {
    Description::new(
        pos,
        runs.iter().map(|run| DescBlock::new(run.block_kind(), run.text)),
    )
}

/// Outcome of classifying one block.
#[derive(Debug, Default)]
pub struct Classification {
    /// Every part of speech whose predicate matched.
    pub matches: BTreeSet<PartOfSpeech>,
    /// Present only for exactly one match.
    pub entry: Option<VocabEntry>,
    pub warnings: Vec<Warning>,
}

/// Classify pre-resolved runs.
pub fn classify_runs(runs: &[StyledRun<'_>]) -> Classification {
    let matches = matching_parts_of_speech(runs);
    let mut classification = Classification {
        matches,
        ..Default::default()
    };

    let pos = match classification.matches.len() {
        1 => classification.matches.iter().next().copied(),
        _ => None,
    };
    let Some(pos) = pos else {
        tracing::trace!(
            matches = ?classification.matches,
            "block dropped: {} part-of-speech matches",
            classification.matches.len()
        );
        return classification;
    };

    let mut description = describe(pos, runs);
    let subject = runs.first().map(|run| run.text.trim()).unwrap_or_default();

    let entry = match pos {
        PartOfSpeech::Verb => verb_parts(runs).map(|parts| {
            if has_marker(runs, IMPERATIVE_MARKER, true, true) {
                description.push_debug(IRREGULAR_NOTE);
                classification.warnings.push(Warning::new(
                    WarningKind::PossibleIrregular,
                    subject,
                    "imperative marker present; forms may need special cases",
                ));
            }
            let english = verb_gloss(runs).unwrap_or_else(|| {
                classification.warnings.push(Warning::new(
                    WarningKind::MissingGloss,
                    subject,
                    "no definition beginning with \"to \"",
                ));
                ""
            });
            VocabEntry::Verb(Verb::with_description(description, parts, english))
        }),
        other => VocabEntry::simple(other, description),
    };
    tracing::trace!(pos = %pos, "block classified");
    classification.entry = entry;
    classification
}

/// Classify one content block of a document.
pub fn classify_block(doc: &Document, block: NodeId, sheet: &StyleSheet) -> Classification {
    let runs: Vec<StyledRun<'_>> = doc
        .flattened_data(block)
        .into_iter()
        .map(|run| StyledRun::resolve(doc, run, sheet))
        .collect();
    classify_runs(&runs)
}
