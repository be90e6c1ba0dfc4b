//! Noun declension.
//!
//! The declension class and base stem come from the nominative/genitive
//! singular pair. Each declension has a (case × number) ending table; the
//! vocative is copied from the nominative afterwards.

use std::fmt;

use super::{Case, Declensions, Number};
use crate::diagnostics::{Warning, WarningKind};

/// Grammatical gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Gender {
    pub fn abbreviation(self) -> &'static str {
        match self {
            Gender::Masculine => "m.",
            Gender::Feminine => "f.",
            Gender::Neuter => "n.",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Declension class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum Declension {
    First,
    Second,
    Third,
}

impl Declension {
    /// 1 through 3.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

/// One slot of an ending table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    /// The nominative singular as given; no independent form.
    Lemma,
    /// Base stem plus this suffix.
    Suffix(&'static str),
}

use Ending::{Lemma, Suffix};

/// Endings for nominative, genitive, dative, accusative, ablative.
type CaseRow = [Ending; 5];

struct EndingTable {
    singular: CaseRow,
    plural: CaseRow,
}

const FIRST: EndingTable = EndingTable {
    singular: [Lemma, Suffix("ae"), Suffix("ae"), Suffix("am"), Suffix("ā")],
    plural: [Suffix("ae"), Suffix("ārum"), Suffix("īs"), Suffix("ās"), Suffix("īs")],
};

const SECOND: EndingTable = EndingTable {
    singular: [Lemma, Suffix("ī"), Suffix("ō"), Suffix("um"), Suffix("ō")],
    plural: [Suffix("ī"), Suffix("ōrum"), Suffix("īs"), Suffix("ōs"), Suffix("īs")],
};

const THIRD: EndingTable = EndingTable {
    singular: [Lemma, Suffix("is"), Suffix("ī"), Suffix("em"), Suffix("e")],
    plural: [Suffix("ēs"), Suffix("um"), Suffix("ibus"), Suffix("ēs"), Suffix("ibus")],
};

const OBLIQUE: [Case; 5] = [
    Case::Nominative,
    Case::Genitive,
    Case::Dative,
    Case::Accusative,
    Case::Ablative,
];

/// Result of matching a nominative/genitive pair.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Inference<'a> {
    class: Declension,
    plural_only: bool,
    base: &'a str,
}

fn ends_with_any(word: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| word.ends_with(*s))
}

fn infer<'a>(nominative: &str, genitive: &'a str) -> Option<Inference<'a>> {
    let rules: [(&[&str], &str, Declension, bool); 5] = [
        (&["a"], "ae", Declension::First, false),
        (&["ae"], "ārum", Declension::First, true),
        (&["er", "us", "um"], "ī", Declension::Second, false),
        (&["ī", "a"], "ōrum", Declension::Second, true),
        (&[""], "is", Declension::Third, false),
    ];

    rules.iter().find_map(|(nom_endings, gen_ending, class, plural_only)| {
        if !ends_with_any(nominative, nom_endings) {
            return None;
        }
        let base = genitive.strip_suffix(*gen_ending)?;
        Some(Inference {
            class: *class,
            plural_only: *plural_only,
            base,
        })
    })
}

/// Output of [`decline`].
#[derive(Debug, Clone, Default)]
pub struct DeclensionResult {
    pub class: Option<Declension>,
    pub plural_only: bool,
    /// Genitive singular minus its declension suffix.
    pub base: Option<String>,
    pub table: Declensions,
    pub warnings: Vec<Warning>,
}

/// Generate the case table for a noun.
///
/// An unrecognised nominative/genitive pair leaves the table empty and
/// reports [`WarningKind::UnresolvedDeclension`].
pub fn decline(nominative: &str, genitive: &str, gender: Gender) -> DeclensionResult {
    let Some(inference) = infer(nominative, genitive) else {
        return DeclensionResult {
            warnings: vec![Warning::new(
                WarningKind::UnresolvedDeclension,
                nominative,
                format!("no declension matches {nominative:?} / {genitive:?}"),
            )],
            ..Default::default()
        };
    };

    let Inference {
        class,
        plural_only,
        base,
    } = inference;
    tracing::debug!(noun = nominative, class = class.number(), plural_only, "declining");

    let endings = match class {
        Declension::First => &FIRST,
        Declension::Second => &SECOND,
        Declension::Third => &THIRD,
    };
    let neuter = gender == Gender::Neuter && class != Declension::First;

    let mut table = Declensions::new();
    let rows = [
        (Number::Singular, &endings.singular),
        (Number::Plural, &endings.plural),
    ];
    for (number, row) in rows {
        if plural_only && number == Number::Singular {
            continue;
        }
        for (case, ending) in OBLIQUE.iter().zip(row) {
            let form = match (case, ending) {
                (Case::Nominative, _) if plural_only => nominative.to_string(),
                (Case::Nominative, Suffix(_)) if neuter => format!("{base}a"),
                (_, Lemma) => nominative.to_string(),
                (_, Suffix(suffix)) => format!("{base}{suffix}"),
            };
            table.set(*case, number, form);
        }
        if neuter && let Some(nom) = table.get(Case::Nominative, number) {
            let nom = nom.to_string();
            table.set(Case::Accusative, number, nom);
        }
        if let Some(nom) = table.get(Case::Nominative, number) {
            let vocative = if class == Declension::Second
                && number == Number::Singular
                && gender == Gender::Masculine
                && nominative.ends_with("us")
            {
                format!("{base}e")
            } else {
                nom.to_string()
            };
            table.set(Case::Vocative, number, vocative);
        }
    }

    DeclensionResult {
        class: Some(class),
        plural_only,
        base: Some(base.to_string()),
        table,
        warnings: Vec::new(),
    }
}
