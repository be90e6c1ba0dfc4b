//! Paradigm tables and their generators.
//!
//! A verb's conjugation table and a noun's case table are explicit maps keyed
//! by grammatical category ([`VerbCell`], [`NounCell`]). A missing cell means
//! the form is unknown, never that it is empty.
//!
//! Generation is table-driven suffix substitution:
//! - [`verb::conjugate`] for 1st–4th conjugation verbs
//! - [`noun::decline`] for 1st–3rd declension nouns
//!
//! Both are pure functions of their inputs.

pub mod noun;
pub mod verb;

use std::collections::BTreeMap;
use std::fmt;

pub use noun::{Declension, DeclensionResult, decline};
pub use verb::{Conjugation, ConjugationResult, PrincipalParts, conjugate};

use crate::diagnostics::{Warning, WarningKind};

// ============================================================================
// Grammatical categories
// ============================================================================

/// Verb mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum Mood {
    Infinitive,
    Indicative,
    Imperative,
}

/// Indicative tense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum Tense {
    Present,
    Imperfect,
    Future,
    Perfect,
    Pluperfect,
    FuturePerfect,
}

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum Number {
    Singular,
    Plural,
}

/// Grammatical person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum Person {
    First,
    Second,
    Third,
}

/// Noun case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum Case {
    Nominative,
    Genitive,
    Dative,
    Accusative,
    Ablative,
    Vocative,
}

impl Tense {
    pub const ALL: [Tense; 6] = [
        Tense::Present,
        Tense::Imperfect,
        Tense::Future,
        Tense::Perfect,
        Tense::Pluperfect,
        Tense::FuturePerfect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tense::Present => "present",
            Tense::Imperfect => "imperfect",
            Tense::Future => "future",
            Tense::Perfect => "perfect",
            Tense::Pluperfect => "pluperfect",
            Tense::FuturePerfect => "future perfect",
        }
    }
}

impl Number {
    pub const ALL: [Number; 2] = [Number::Singular, Number::Plural];

    pub fn name(self) -> &'static str {
        match self {
            Number::Singular => "singular",
            Number::Plural => "plural",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Person {
    pub const ALL: [Person; 3] = [Person::First, Person::Second, Person::Third];

    pub fn name(self) -> &'static str {
        match self {
            Person::First => "1st",
            Person::Second => "2nd",
            Person::Third => "3rd",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Case {
    pub const ALL: [Case; 6] = [
        Case::Nominative,
        Case::Genitive,
        Case::Dative,
        Case::Accusative,
        Case::Ablative,
        Case::Vocative,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Case::Nominative => "nominative",
            Case::Genitive => "genitive",
            Case::Dative => "dative",
            Case::Accusative => "accusative",
            Case::Ablative => "ablative",
            Case::Vocative => "vocative",
        }
    }
}

impl Mood {
    pub fn name(self) -> &'static str {
        match self {
            Mood::Infinitive => "infinitive",
            Mood::Indicative => "indicative",
            Mood::Imperative => "imperative",
        }
    }
}

/// A (number × person) suffix table, indexed `[number][person]`.
pub(crate) type PersonTable = [[&'static str; 3]; 2];

pub(crate) fn lookup(table: &PersonTable, number: Number, person: Person) -> &'static str {
    table[number.index()][person.index()]
}

// ============================================================================
// Verb tables
// ============================================================================

/// One cell of a conjugation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VerbCell {
    Infinitive,
    Indicative {
        tense: Tense,
        number: Number,
        person: Person,
    },
    Imperative {
        number: Number,
    },
}

impl VerbCell {
    pub fn mood(self) -> Mood {
        match self {
            VerbCell::Infinitive => Mood::Infinitive,
            VerbCell::Indicative { .. } => Mood::Indicative,
            VerbCell::Imperative { .. } => Mood::Imperative,
        }
    }

    /// Every cell of a mood, in table order.
    pub fn all_of(mood: Mood) -> Vec<VerbCell> {
        match mood {
            Mood::Infinitive => vec![VerbCell::Infinitive],
            Mood::Imperative => Number::ALL
                .iter()
                .map(|&number| VerbCell::Imperative { number })
                .collect(),
            Mood::Indicative => Tense::ALL
                .iter()
                .flat_map(|&tense| {
                    Number::ALL.iter().flat_map(move |&number| {
                        Person::ALL.iter().map(move |&person| VerbCell::Indicative {
                            tense,
                            number,
                            person,
                        })
                    })
                })
                .collect(),
        }
    }
}

impl fmt::Display for VerbCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerbCell::Infinitive => f.write_str("infinitive"),
            VerbCell::Indicative {
                tense,
                number,
                person,
            } => write!(
                f,
                "indicative {} {} {}",
                tense.name(),
                person.name(),
                number.name()
            ),
            VerbCell::Imperative { number } => write!(f, "imperative {}", number.name()),
        }
    }
}

/// Conjugation table. Absent cells are unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conjugations {
    cells: BTreeMap<VerbCell, String>,
}

impl Conjugations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: VerbCell) -> Option<&str> {
        self.cells.get(&cell).map(String::as_str)
    }

    pub fn set(&mut self, cell: VerbCell, form: impl Into<String>) {
        self.cells.insert(cell, form.into());
    }

    /// The infinitive form.
    pub fn infinitive(&self) -> Option<&str> {
        self.get(VerbCell::Infinitive)
    }

    /// One indicative cell.
    pub fn indicative(&self, tense: Tense, number: Number, person: Person) -> Option<&str> {
        self.get(VerbCell::Indicative {
            tense,
            number,
            person,
        })
    }

    /// The (singular, plural) imperative pair.
    pub fn imperative(&self) -> (Option<&str>, Option<&str>) {
        (
            self.get(VerbCell::Imperative {
                number: Number::Singular,
            }),
            self.get(VerbCell::Imperative {
                number: Number::Plural,
            }),
        )
    }

    /// Iterate over all known cells in table order.
    pub fn iter(&self) -> impl Iterator<Item = (VerbCell, &str)> {
        self.cells.iter().map(|(cell, form)| (*cell, form.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(feature = "cli")]
impl serde::Serialize for Conjugations {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.cells.iter().map(|(cell, form)| (cell.to_string(), form)))
    }
}

// ============================================================================
// Noun tables
// ============================================================================

/// One cell of a case table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NounCell {
    pub case: Case,
    pub number: Number,
}

impl NounCell {
    pub fn new(case: Case, number: Number) -> Self {
        Self { case, number }
    }
}

impl fmt::Display for NounCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.case.name(), self.number.name())
    }
}

/// Case table. Absent cells are unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declensions {
    cells: BTreeMap<NounCell, String>,
}

impl Declensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, case: Case, number: Number) -> Option<&str> {
        self.cells.get(&NounCell::new(case, number)).map(String::as_str)
    }

    pub fn set(&mut self, case: Case, number: Number, form: impl Into<String>) {
        self.cells.insert(NounCell::new(case, number), form.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (NounCell, &str)> {
        self.cells.iter().map(|(cell, form)| (*cell, form.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(feature = "cli")]
impl serde::Serialize for Declensions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.cells.iter().map(|(cell, form)| (cell.to_string(), form)))
    }
}

// ============================================================================
// Special cases
// ============================================================================

/// Override key: a mood plus optional qualifiers.
///
/// With no qualifiers the override covers every cell of the mood. Otherwise
/// it names exactly one cell; unspecified qualifiers fall back to singular,
/// first person and present tense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecialCase {
    pub mood: Mood,
    pub tense: Option<Tense>,
    pub number: Option<Number>,
    pub person: Option<Person>,
}

impl SpecialCase {
    /// Cover the whole mood.
    pub fn mood(mood: Mood) -> Self {
        Self {
            mood,
            tense: None,
            number: None,
            person: None,
        }
    }

    pub fn with_tense(mut self, tense: Tense) -> Self {
        self.tense = Some(tense);
        self
    }

    pub fn with_number(mut self, number: Number) -> Self {
        self.number = Some(number);
        self
    }

    pub fn with_person(mut self, person: Person) -> Self {
        self.person = Some(person);
        self
    }

    fn is_whole_mood(&self) -> bool {
        self.tense.is_none() && self.number.is_none() && self.person.is_none()
    }

    /// The cells this key replaces, in table order.
    pub fn cells(&self) -> Vec<VerbCell> {
        if self.is_whole_mood() {
            return VerbCell::all_of(self.mood);
        }
        let number = self.number.unwrap_or(Number::Singular);
        let cell = match self.mood {
            Mood::Infinitive => VerbCell::Infinitive,
            Mood::Imperative => VerbCell::Imperative { number },
            Mood::Indicative => VerbCell::Indicative {
                tense: self.tense.unwrap_or(Tense::Present),
                number,
                person: self.person.unwrap_or(Person::First),
            },
        };
        vec![cell]
    }
}

/// Replacement value for a [`SpecialCase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialForm {
    /// A single form, for keys naming one cell.
    Form(String),
    /// One form per covered cell, in table order.
    Forms(Vec<String>),
}

/// Irregular-form overrides applied after generation.
pub type SpecialCases = BTreeMap<SpecialCase, SpecialForm>;

/// Patch a generated table with overrides. Mismatched values are skipped
/// with a warning.
pub(crate) fn apply_special_cases(
    table: &mut Conjugations,
    special_cases: &SpecialCases,
    subject: &str,
    warnings: &mut Vec<Warning>,
) {
    for (key, value) in special_cases {
        let cells = key.cells();
        let forms: Vec<&str> = match value {
            SpecialForm::Form(form) => vec![form.as_str()],
            SpecialForm::Forms(forms) => forms.iter().map(String::as_str).collect(),
        };

        if forms.len() != cells.len() {
            warnings.push(Warning::new(
                WarningKind::InvalidSpecialCase,
                subject,
                format!(
                    "override for {} covers {} cells but provides {} forms",
                    key.mood.name(),
                    cells.len(),
                    forms.len()
                ),
            ));
            continue;
        }

        for (cell, form) in cells.into_iter().zip(forms) {
            table.set(cell, form);
        }
    }
}
