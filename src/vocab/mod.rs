//! Vocabulary entries.
//!
//! [`VocabEntry`] is a closed union over parts of speech. Verbs and nouns
//! carry principal parts and a lazily generated paradigm table; every other
//! part of speech is just an annotated [`Description`].
//!
//! Paradigm generation is explicit: [`VocabEntry::load`] fills the table on
//! first call and is a no-op afterwards.

mod description;

use std::fmt;

pub use description::{DescBlock, DescBlockKind, Description};
pub use crate::paradigm::noun::Gender;

use crate::diagnostics::Warning;
use crate::paradigm::{
    Conjugation, Conjugations, Declension, Declensions, PrincipalParts, SpecialCase, SpecialCases,
    SpecialForm, apply_special_cases, conjugate, decline,
};

/// Part of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum PartOfSpeech {
    Verb,
    Noun,
    Adjective,
    Pronoun,
    Preposition,
    Conjunction,
    Interjection,
    Adverb,
    Unknown,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 9] = [
        PartOfSpeech::Verb,
        PartOfSpeech::Noun,
        PartOfSpeech::Adjective,
        PartOfSpeech::Pronoun,
        PartOfSpeech::Preposition,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Interjection,
        PartOfSpeech::Adverb,
        PartOfSpeech::Unknown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PartOfSpeech::Verb => "Verb",
            PartOfSpeech::Noun => "Noun",
            PartOfSpeech::Adjective => "Adjective",
            PartOfSpeech::Pronoun => "Pronoun",
            PartOfSpeech::Preposition => "Preposition",
            PartOfSpeech::Conjunction => "Conjunction",
            PartOfSpeech::Interjection => "Interjection",
            PartOfSpeech::Adverb => "Adverb",
            PartOfSpeech::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An entry with no paradigm of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Word {
    pub description: Description,
    loaded: bool,
}

impl Word {
    pub fn new(description: Description) -> Self {
        Self {
            description,
            loaded: false,
        }
    }
}

/// A verb and its conjugation table.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Verb {
    pub description: Description,
    loaded: bool,
    parts: PrincipalParts,
    english: String,
    conjugation: Option<Conjugation>,
    conjugations: Conjugations,
    #[cfg_attr(feature = "cli", serde(skip))]
    special_cases: SpecialCases,
}

impl Verb {
    /// A verb with a description rendered from its parts and gloss.
    pub fn new(parts: PrincipalParts, english: impl Into<String>) -> Self {
        let english = english.into();
        let description = Description::new(
            PartOfSpeech::Verb,
            [
                DescBlock::new(DescBlockKind::Latin, parts.joined()),
                DescBlock::new(DescBlockKind::Text, ": "),
                DescBlock::new(DescBlockKind::Definition, english.as_str()),
            ],
        );
        Self::with_description(description, parts, english)
    }

    pub fn with_description(
        description: Description,
        parts: PrincipalParts,
        english: impl Into<String>,
    ) -> Self {
        Self {
            description,
            loaded: false,
            parts,
            english: english.into(),
            conjugation: None,
            conjugations: Conjugations::new(),
            special_cases: SpecialCases::new(),
        }
    }

    /// Register an irregular form. See [`Verb::add_special_case`]; warnings
    /// from patching a loaded verb are only logged.
    pub fn with_special_case(mut self, key: SpecialCase, form: SpecialForm) -> Self {
        self.add_special_case(key, form);
        self
    }

    /// Register an irregular form.
    ///
    /// Before [`Verb::load`] the form is applied during generation. On a
    /// loaded verb it patches the existing table immediately.
    pub fn add_special_case(&mut self, key: SpecialCase, form: SpecialForm) -> Vec<Warning> {
        let mut warnings = Vec::new();
        if self.loaded {
            let single = SpecialCases::from([(key, form.clone())]);
            apply_special_cases(
                &mut self.conjugations,
                &single,
                &self.parts.present,
                &mut warnings,
            );
        }
        self.special_cases.insert(key, form);
        warnings
    }

    pub fn parts(&self) -> &PrincipalParts {
        &self.parts
    }

    pub fn english(&self) -> &str {
        &self.english
    }

    /// `None` until loaded, or when the infinitive matched no class.
    pub fn conjugation(&self) -> Option<Conjugation> {
        self.conjugation
    }

    pub fn conjugations(&self) -> &Conjugations {
        &self.conjugations
    }

    pub fn special_cases(&self) -> &SpecialCases {
        &self.special_cases
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Generate the conjugation table once.
    pub fn load(&mut self) -> Vec<Warning> {
        if self.loaded {
            return Vec::new();
        }
        let result = conjugate(&self.parts, &self.special_cases);
        self.conjugation = result.class;
        self.conjugations = result.table;
        self.loaded = true;
        result.warnings
    }
}

/// A noun and its case table.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Noun {
    pub description: Description,
    loaded: bool,
    nominative: String,
    genitive: String,
    gender: Gender,
    english: String,
    declension: Option<Declension>,
    base: Option<String>,
    plural_only: bool,
    declensions: Declensions,
}

impl Noun {
    pub fn new(
        nominative: impl Into<String>,
        genitive: impl Into<String>,
        gender: Gender,
        english: impl Into<String>,
    ) -> Self {
        let nominative = nominative.into();
        let genitive = genitive.into();
        let english = english.into();
        let description = Description::new(
            PartOfSpeech::Noun,
            [
                DescBlock::new(DescBlockKind::Latin, format!("{nominative}, {genitive}")),
                DescBlock::new(DescBlockKind::Gender, format!(", {gender}")),
                DescBlock::new(DescBlockKind::Text, ": "),
                DescBlock::new(DescBlockKind::Definition, english.as_str()),
            ],
        );
        Self {
            description,
            loaded: false,
            nominative,
            genitive,
            gender,
            english,
            declension: None,
            base: None,
            plural_only: false,
            declensions: Declensions::new(),
        }
    }

    pub fn nominative(&self) -> &str {
        &self.nominative
    }

    pub fn genitive(&self) -> &str {
        &self.genitive
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn english(&self) -> &str {
        &self.english
    }

    pub fn declension(&self) -> Option<Declension> {
        self.declension
    }

    /// Base stem, known once loaded.
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn is_plural_only(&self) -> bool {
        self.plural_only
    }

    pub fn declensions(&self) -> &Declensions {
        &self.declensions
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Generate the case table once.
    pub fn load(&mut self) -> Vec<Warning> {
        if self.loaded {
            return Vec::new();
        }
        let result = decline(&self.nominative, &self.genitive, self.gender);
        self.declension = result.class;
        self.base = result.base;
        self.plural_only = result.plural_only;
        self.declensions = result.table;
        self.loaded = true;
        result.warnings
    }
}

/// One dictionary entry.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "part_of_speech"))]
pub enum VocabEntry {
    Verb(Verb),
    Noun(Noun),
    Adjective(Word),
    Pronoun(Word),
    Preposition(Word),
    Conjunction(Word),
    Interjection(Word),
    Adverb(Word),
    Unknown(Word),
}

impl VocabEntry {
    /// Wrap a description for a part of speech without a paradigm.
    ///
    /// Returns `None` for verbs and nouns, which need their principal parts.
    pub fn simple(pos: PartOfSpeech, description: Description) -> Option<Self> {
        let word = Word::new(description);
        let entry = match pos {
            PartOfSpeech::Verb | PartOfSpeech::Noun => return None,
            PartOfSpeech::Adjective => VocabEntry::Adjective(word),
            PartOfSpeech::Pronoun => VocabEntry::Pronoun(word),
            PartOfSpeech::Preposition => VocabEntry::Preposition(word),
            PartOfSpeech::Conjunction => VocabEntry::Conjunction(word),
            PartOfSpeech::Interjection => VocabEntry::Interjection(word),
            PartOfSpeech::Adverb => VocabEntry::Adverb(word),
            PartOfSpeech::Unknown => VocabEntry::Unknown(word),
        };
        Some(entry)
    }

    pub fn part_of_speech(&self) -> PartOfSpeech {
        match self {
            VocabEntry::Verb(_) => PartOfSpeech::Verb,
            VocabEntry::Noun(_) => PartOfSpeech::Noun,
            VocabEntry::Adjective(_) => PartOfSpeech::Adjective,
            VocabEntry::Pronoun(_) => PartOfSpeech::Pronoun,
            VocabEntry::Preposition(_) => PartOfSpeech::Preposition,
            VocabEntry::Conjunction(_) => PartOfSpeech::Conjunction,
            VocabEntry::Interjection(_) => PartOfSpeech::Interjection,
            VocabEntry::Adverb(_) => PartOfSpeech::Adverb,
            VocabEntry::Unknown(_) => PartOfSpeech::Unknown,
        }
    }

    pub fn description(&self) -> &Description {
        match self {
            VocabEntry::Verb(v) => &v.description,
            VocabEntry::Noun(n) => &n.description,
            VocabEntry::Adjective(w)
            | VocabEntry::Pronoun(w)
            | VocabEntry::Preposition(w)
            | VocabEntry::Conjunction(w)
            | VocabEntry::Interjection(w)
            | VocabEntry::Adverb(w)
            | VocabEntry::Unknown(w) => &w.description,
        }
    }

    /// The rendered annotated description. Stable across loads.
    pub fn key(&self) -> &str {
        self.description().as_str()
    }

    pub fn parsed_description(&self) -> &[DescBlock] {
        self.description().blocks()
    }

    pub fn clean_description(&self) -> String {
        self.description().clean()
    }

    /// Clean text followed by every generated form, for form search.
    pub fn extended_description(&self) -> String {
        let mut text = self.clean_description();
        let forms: Vec<&str> = match self {
            VocabEntry::Verb(v) => v.conjugations().iter().map(|(_, f)| f).collect(),
            VocabEntry::Noun(n) => n.declensions().iter().map(|(_, f)| f).collect(),
            _ => Vec::new(),
        };
        for form in forms {
            text.push(' ');
            text.push_str(form);
        }
        text
    }

    pub fn is_loaded(&self) -> bool {
        match self {
            VocabEntry::Verb(v) => v.loaded,
            VocabEntry::Noun(n) => n.loaded,
            VocabEntry::Adjective(w)
            | VocabEntry::Pronoun(w)
            | VocabEntry::Preposition(w)
            | VocabEntry::Conjunction(w)
            | VocabEntry::Interjection(w)
            | VocabEntry::Adverb(w)
            | VocabEntry::Unknown(w) => w.loaded,
        }
    }

    /// Generate the paradigm table if this entry has one. Idempotent.
    pub fn load(&mut self) -> Vec<Warning> {
        match self {
            VocabEntry::Verb(v) => v.load(),
            VocabEntry::Noun(n) => n.load(),
            VocabEntry::Adjective(w)
            | VocabEntry::Pronoun(w)
            | VocabEntry::Preposition(w)
            | VocabEntry::Conjunction(w)
            | VocabEntry::Interjection(w)
            | VocabEntry::Adverb(w)
            | VocabEntry::Unknown(w) => {
                w.loaded = true;
                Vec::new()
            }
        }
    }

    pub fn as_verb(&self) -> Option<&Verb> {
        match self {
            VocabEntry::Verb(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_noun(&self) -> Option<&Noun> {
        match self {
            VocabEntry::Noun(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for VocabEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.description(), f)
    }
}

impl PartialEq for VocabEntry {
    fn eq(&self, other: &Self) -> bool {
        self.description() == other.description()
    }
}

impl Eq for VocabEntry {}

impl std::hash::Hash for VocabEntry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.description().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paradigm::{Case, Mood, Number, Person, Tense};
    use std::collections::HashSet;

    fn amo() -> VocabEntry {
        VocabEntry::Verb(Verb::new(
            PrincipalParts::new("amō", "amāre", "amāvī", "amātum"),
            "to love",
        ))
    }

    #[test]
    fn test_verb_description() {
        let entry = amo();
        assert_eq!(
            entry.key(),
            r#"[Verb] latin:"amō, amāre, amāvī, amātum" | text:": " | definition:"to love""#
        );
        assert_eq!(entry.clean_description(), "amō, amāre, amāvī, amātum: to love");
        assert_eq!(entry.part_of_speech(), PartOfSpeech::Verb);
    }

    #[test]
    fn test_verb_load_is_idempotent() {
        let mut entry = amo();
        assert!(!entry.is_loaded());
        assert!(entry.load().is_empty());
        assert!(entry.is_loaded());

        let before = entry.as_verb().unwrap().conjugations().clone();
        assert!(entry.load().is_empty());
        assert_eq!(entry.as_verb().unwrap().conjugations(), &before);

        let verb = entry.as_verb().unwrap();
        assert_eq!(verb.conjugation(), Some(Conjugation::First));
        assert_eq!(
            verb.conjugations()
                .indicative(Tense::Present, Number::Plural, Person::Third),
            Some("amant")
        );
    }

    #[test]
    fn test_verb_warnings_reported_once() {
        let mut entry = VocabEntry::Verb(Verb::new(
            PrincipalParts::new("sum", "esse", "fuī", "futūrus"),
            "to be",
        ));
        assert_eq!(entry.load().len(), 1);
        assert!(entry.load().is_empty());
    }

    #[test]
    fn test_special_case_applied_on_load() {
        let verb = Verb::new(PrincipalParts::new("dīcō", "dīcere", "dīxī", "dictum"), "to say")
            .with_special_case(
                SpecialCase::mood(Mood::Imperative).with_number(Number::Singular),
                SpecialForm::Form("dīc".into()),
            );
        let mut entry = VocabEntry::Verb(verb);
        entry.load();
        let (sg, pl) = entry.as_verb().unwrap().conjugations().imperative();
        assert_eq!((sg, pl), (Some("dīc"), Some("dīcite")));
    }

    #[test]
    fn test_special_case_after_load_patches_table() {
        let mut verb = Verb::new(PrincipalParts::new("dīcō", "dīcere", "dīxī", "dictum"), "to say");
        assert!(verb.load().is_empty());
        assert_eq!(verb.conjugations().imperative(), (Some("dīce"), Some("dīcite")));

        let warnings = verb.add_special_case(
            SpecialCase::mood(Mood::Imperative).with_number(Number::Singular),
            SpecialForm::Form("dīc".into()),
        );
        assert!(warnings.is_empty());
        assert!(verb.is_loaded());
        assert_eq!(verb.conjugations().imperative(), (Some("dīc"), Some("dīcite")));

        // A later load keeps the patched table
        assert!(verb.load().is_empty());
        assert_eq!(verb.conjugations().imperative().0, Some("dīc"));
        assert_eq!(
            verb.conjugations()
                .indicative(Tense::Present, Number::Singular, Person::First),
            Some("dīcō")
        );
    }

    #[test]
    fn test_invalid_special_case_after_load() {
        let mut verb = Verb::new(PrincipalParts::new("dīcō", "dīcere", "dīxī", "dictum"), "to say");
        verb.load();
        let warnings = verb.add_special_case(
            SpecialCase::mood(Mood::Imperative),
            SpecialForm::Form("dīc".into()),
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, crate::WarningKind::InvalidSpecialCase);
        assert_eq!(verb.conjugations().imperative().0, Some("dīce"));
    }

    #[test]
    fn test_noun_load() {
        let mut entry = VocabEntry::Noun(Noun::new("puella", "puellae", Gender::Feminine, "girl"));
        assert_eq!(entry.clean_description(), "puella, puellae, f.: girl");
        assert!(entry.load().is_empty());

        let noun = entry.as_noun().unwrap();
        assert_eq!(noun.declension(), Some(Declension::First));
        assert_eq!(noun.base(), Some("puell"));
        assert_eq!(
            noun.declensions().get(Case::Genitive, Number::Plural),
            Some("puellārum")
        );
        assert_eq!(
            noun.declensions().get(Case::Vocative, Number::Singular),
            Some("puella")
        );
    }

    #[test]
    fn test_extended_description_lists_forms() {
        let mut entry = amo();
        assert_eq!(entry.extended_description(), entry.clean_description());
        entry.load();
        let extended = entry.extended_description();
        assert!(extended.starts_with("amō, amāre, amāvī, amātum: to love "));
        assert!(extended.contains(" amābāmus "));
        assert!(extended.contains(" amāverint"));
    }

    #[test]
    fn test_simple_entries() {
        let d = Description::new(PartOfSpeech::Adverb, Vec::<DescBlock>::new());
        assert!(VocabEntry::simple(PartOfSpeech::Verb, d.clone()).is_none());

        let mut entry = VocabEntry::simple(PartOfSpeech::Adverb, d).unwrap();
        assert_eq!(entry.part_of_speech(), PartOfSpeech::Adverb);
        assert!(entry.load().is_empty());
        assert!(entry.is_loaded());
        assert_eq!(entry.extended_description(), entry.clean_description());
    }

    #[test]
    fn test_entries_hash_by_description() {
        let mut loaded = amo();
        loaded.load();
        let set: HashSet<VocabEntry> = [amo(), loaded].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
