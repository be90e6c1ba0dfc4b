//! Verb conjugation.
//!
//! The conjugation class is inferred from the infinitive ending. The present
//! system (present, imperfect, future, imperative) is built per class; the
//! perfect system is built uniformly from the perfect stem. Special cases
//! are applied last.

use super::{
    Conjugations, Number, Person, PersonTable, SpecialCases, Tense, VerbCell, apply_special_cases,
    lookup,
};
use crate::diagnostics::{Warning, WarningKind};
use crate::util::{drop_last_chars, last_chars};

/// Conjugation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum Conjugation {
    First,
    Second,
    Third,
    Fourth,
}

impl Conjugation {
    /// Infer the class from the last three characters of the infinitive.
    pub fn from_infinitive(infinitive: &str) -> Option<Self> {
        match last_chars(infinitive, 3)? {
            "āre" => Some(Conjugation::First),
            "ēre" => Some(Conjugation::Second),
            "ere" => Some(Conjugation::Third),
            "īre" => Some(Conjugation::Fourth),
            _ => None,
        }
    }

    /// 1 through 4.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

/// The dictionary principal parts of a verb.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct PrincipalParts {
    /// 1st singular present (`amō`).
    pub present: String,
    /// Present infinitive (`amāre`).
    pub infinitive: String,
    /// 1st singular perfect (`amāvī`).
    pub perfect: String,
    /// Supine (`amātum`). Empty when the entry lists only three parts.
    pub supine: String,
}

impl PrincipalParts {
    pub fn new(
        present: impl Into<String>,
        infinitive: impl Into<String>,
        perfect: impl Into<String>,
        supine: impl Into<String>,
    ) -> Self {
        Self {
            present: present.into(),
            infinitive: infinitive.into(),
            perfect: perfect.into(),
            supine: supine.into(),
        }
    }

    /// Build from a comma-separated part list. Returns `None` unless there
    /// are three or four parts.
    pub fn from_list(list: &str) -> Option<Self> {
        let parts: Vec<&str> = list.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [present, infinitive, perfect] => {
                Some(Self::new(*present, *infinitive, *perfect, ""))
            }
            [present, infinitive, perfect, supine] => {
                Some(Self::new(*present, *infinitive, *perfect, *supine))
            }
            _ => None,
        }
    }

    /// Parts joined the way the dictionary lists them.
    pub fn joined(&self) -> String {
        let mut parts = vec![
            self.present.as_str(),
            self.infinitive.as_str(),
            self.perfect.as_str(),
        ];
        if !self.supine.is_empty() {
            parts.push(self.supine.as_str());
        }
        parts.join(", ")
    }
}

/// Output of [`conjugate`].
#[derive(Debug, Clone, Default)]
pub struct ConjugationResult {
    pub class: Option<Conjugation>,
    pub table: Conjugations,
    pub warnings: Vec<Warning>,
}

// Personal endings shared by most tenses.
const PERSONAL: PersonTable = [["ō", "s", "t"], ["mus", "tis", "nt"]];
const PAST_PERSONAL: PersonTable = [["m", "s", "t"], ["mus", "tis", "nt"]];

const IMPERFECT_INFIX: PersonTable = [["ba", "bā", "ba"], ["bā", "bā", "ba"]];
const FUTURE_INFIX: PersonTable = [["b", "bi", "bi"], ["bi", "bi", "bu"]];

const PRESENT_3_4: PersonTable = [["ō", "s", "t"], ["mus", "tis", "unt"]];
const FUTURE_3_4: PersonTable = [["am", "ēs", "et"], ["ēmus", "ētis", "ent"]];

const PERFECT: PersonTable = [["ī", "istī", "it"], ["imus", "istis", "ērunt"]];
const PLUPERFECT: PersonTable = [["eram", "erās", "erat"], ["erāmus", "erātis", "erant"]];
const FUTURE_PERFECT: PersonTable = [["erō", "eris", "erit"], ["erimus", "eritis", "erint"]];

// Word-final long vowels that shorten before these endings.
const FIRST_FIXUPS: [(&str, &str); 3] = [("āō", "ō"), ("āt", "at"), ("ānt", "ant")];
const SECOND_FIXUPS: [(&str, &str); 3] = [("ēō", "eō"), ("ēt", "et"), ("ēnt", "ent")];

/// Generate the conjugation table for a verb.
///
/// When the class cannot be inferred, only the class-dependent part of
/// generation is skipped: the infinitive cell and the present system stay
/// empty and an [`WarningKind::UnresolvedConjugation`] warning is emitted.
/// The perfect system depends only on the perfect stem, so it is still built,
/// and special cases are still applied on top.
pub fn conjugate(parts: &PrincipalParts, special_cases: &SpecialCases) -> ConjugationResult {
    let subject = parts.present.as_str();
    let mut result = ConjugationResult {
        class: Conjugation::from_infinitive(&parts.infinitive),
        ..Default::default()
    };

    match result.class {
        Some(class) => {
            tracing::debug!(verb = subject, class = class.number(), "conjugating");
            result.table.set(VerbCell::Infinitive, parts.infinitive.as_str());
            present_system(class, parts, &mut result.table);
        }
        None => result.warnings.push(Warning::new(
            WarningKind::UnresolvedConjugation,
            subject,
            format!("infinitive {:?} has no recognised ending", parts.infinitive),
        )),
    }

    match parts.perfect.strip_suffix('ī') {
        Some(stem) if !stem.is_empty() => perfect_system(stem, &mut result.table),
        _ => result.warnings.push(Warning::new(
            WarningKind::MissingPerfectStem,
            subject,
            format!("perfect {:?} does not end in ī", parts.perfect),
        )),
    }

    apply_special_cases(&mut result.table, special_cases, subject, &mut result.warnings);
    result
}

fn fill(
    table: &mut Conjugations,
    tense: Tense,
    mut form: impl FnMut(Number, Person) -> String,
) {
    for number in Number::ALL {
        for person in Person::ALL {
            table.set(
                VerbCell::Indicative {
                    tense,
                    number,
                    person,
                },
                form(number, person),
            );
        }
    }
}

fn set_imperative(table: &mut Conjugations, singular: String, plural: String) {
    table.set(
        VerbCell::Imperative {
            number: Number::Singular,
        },
        singular,
    );
    table.set(
        VerbCell::Imperative {
            number: Number::Plural,
        },
        plural,
    );
}

fn present_system(class: Conjugation, parts: &PrincipalParts, table: &mut Conjugations) {
    match class {
        Conjugation::First => vowel_stem(parts, &FIRST_FIXUPS, table),
        Conjugation::Second => vowel_stem(parts, &SECOND_FIXUPS, table),
        Conjugation::Third => third(parts, table),
        Conjugation::Fourth => fourth(parts, table),
    }
}

fn apply_fixups(form: String, fixups: &[(&str, &str)]) -> String {
    for (from, to) in fixups {
        if let Some(head) = form.strip_suffix(*from) {
            return format!("{head}{to}");
        }
    }
    form
}

/// 1st and 2nd conjugation: stem is the infinitive minus `re`.
fn vowel_stem(parts: &PrincipalParts, fixups: &[(&str, &str)], table: &mut Conjugations) {
    let Some(stem) = drop_last_chars(&parts.infinitive, 2) else {
        return;
    };

    fill(table, Tense::Present, |n, p| {
        apply_fixups(format!("{stem}{}", lookup(&PERSONAL, n, p)), fixups)
    });
    fill(table, Tense::Imperfect, |n, p| {
        format!(
            "{stem}{}{}",
            lookup(&IMPERFECT_INFIX, n, p),
            lookup(&PAST_PERSONAL, n, p)
        )
    });
    fill(table, Tense::Future, |n, p| {
        format!(
            "{stem}{}{}",
            lookup(&FUTURE_INFIX, n, p),
            lookup(&PERSONAL, n, p)
        )
    });
    set_imperative(table, stem.to_string(), format!("{stem}te"));
}

/// 3rd conjugation, including the `-iō` variant (`capiō, capere`).
fn third(parts: &PrincipalParts, table: &mut Conjugations) {
    let Some(base) = drop_last_chars(&parts.infinitive, 3) else {
        return;
    };
    let i_stem = parts.present.ends_with("iō");
    let long_stem = if i_stem {
        format!("{base}i")
    } else {
        base.to_string()
    };

    fill(table, Tense::Present, |n, p| {
        let suffix = lookup(&PRESENT_3_4, n, p);
        match (n, p) {
            (Number::Singular, Person::First) | (Number::Plural, Person::Third) => {
                format!("{long_stem}{suffix}")
            }
            _ => format!("{base}i{suffix}"),
        }
    });
    fill(table, Tense::Imperfect, |n, p| {
        format!(
            "{long_stem}ē{}{}",
            lookup(&IMPERFECT_INFIX, n, p),
            lookup(&PAST_PERSONAL, n, p)
        )
    });
    fill(table, Tense::Future, |n, p| {
        format!("{long_stem}{}", lookup(&FUTURE_3_4, n, p))
    });
    set_imperative(table, format!("{base}e"), format!("{base}ite"));
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'ā' | 'ē' | 'ī' | 'ō' | 'ū')
}

/// Stem vowel of the 4th conjugation: short before a vowel or final `t`.
fn fourth_vowel(suffix: &str) -> char {
    let before_vowel = suffix.chars().next().is_some_and(is_vowel);
    if before_vowel || suffix.ends_with('t') {
        'i'
    } else {
        'ī'
    }
}

/// 4th conjugation: base is the infinitive minus `īre`.
fn fourth(parts: &PrincipalParts, table: &mut Conjugations) {
    let Some(base) = drop_last_chars(&parts.infinitive, 3) else {
        return;
    };
    let form = |suffix: &str| format!("{base}{}{suffix}", fourth_vowel(suffix));

    fill(table, Tense::Present, |n, p| form(lookup(&PRESENT_3_4, n, p)));
    fill(table, Tense::Imperfect, |n, p| {
        form(&format!(
            "ē{}{}",
            lookup(&IMPERFECT_INFIX, n, p),
            lookup(&PAST_PERSONAL, n, p)
        ))
    });
    fill(table, Tense::Future, |n, p| form(lookup(&FUTURE_3_4, n, p)));
    set_imperative(table, form(""), form("te"));
}

fn perfect_system(stem: &str, table: &mut Conjugations) {
    fill(table, Tense::Perfect, |n, p| {
        format!("{stem}{}", lookup(&PERFECT, n, p))
    });
    fill(table, Tense::Pluperfect, |n, p| {
        format!("{stem}{}", lookup(&PLUPERFECT, n, p))
    });
    fill(table, Tense::FuturePerfect, |n, p| {
        format!("{stem}{}", lookup(&FUTURE_PERFECT, n, p))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paradigm::{Mood, SpecialCase, SpecialForm};

    use Number::{Plural, Singular};
    use Person::{First, Second, Third};

    fn conj(list: &str) -> ConjugationResult {
        let parts = PrincipalParts::from_list(list).expect("three or four parts");
        conjugate(&parts, &SpecialCases::new())
    }

    fn row(result: &ConjugationResult, tense: Tense) -> Vec<&str> {
        Number::ALL
            .iter()
            .flat_map(|&n| Person::ALL.iter().map(move |&p| (n, p)))
            .map(|(n, p)| result.table.indicative(tense, n, p).unwrap_or("?"))
            .collect()
    }

    #[test]
    fn test_class_from_infinitive() {
        assert_eq!(Conjugation::from_infinitive("amāre"), Some(Conjugation::First));
        assert_eq!(Conjugation::from_infinitive("monēre"), Some(Conjugation::Second));
        assert_eq!(Conjugation::from_infinitive("regere"), Some(Conjugation::Third));
        assert_eq!(Conjugation::from_infinitive("audīre"), Some(Conjugation::Fourth));
        assert_eq!(Conjugation::from_infinitive("esse"), None);
        assert_eq!(Conjugation::from_infinitive("re"), None);
        assert_eq!(Conjugation::Fourth.number(), 4);
    }

    #[test]
    fn test_first_conjugation() {
        let r = conj("amō, amāre, amāvī, amātum");
        assert_eq!(r.class, Some(Conjugation::First));
        assert!(r.warnings.is_empty());
        assert_eq!(r.table.infinitive(), Some("amāre"));
        assert_eq!(
            row(&r, Tense::Present),
            ["amō", "amās", "amat", "amāmus", "amātis", "amant"]
        );
        assert_eq!(
            row(&r, Tense::Imperfect),
            ["amābam", "amābās", "amābat", "amābāmus", "amābātis", "amābant"]
        );
        assert_eq!(
            row(&r, Tense::Future),
            ["amābō", "amābis", "amābit", "amābimus", "amābitis", "amābunt"]
        );
        assert_eq!(r.table.imperative(), (Some("amā"), Some("amāte")));
    }

    #[test]
    fn test_second_conjugation() {
        let r = conj("moneō, monēre, monuī, monitum");
        assert_eq!(
            row(&r, Tense::Present),
            ["moneō", "monēs", "monet", "monēmus", "monētis", "monent"]
        );
        assert_eq!(r.table.indicative(Tense::Imperfect, Singular, First), Some("monēbam"));
        assert_eq!(r.table.indicative(Tense::Future, Plural, Third), Some("monēbunt"));
        assert_eq!(r.table.imperative(), (Some("monē"), Some("monēte")));
    }

    #[test]
    fn test_third_conjugation() {
        let r = conj("regō, regere, rēxī, rēctum");
        assert_eq!(
            row(&r, Tense::Present),
            ["regō", "regis", "regit", "regimus", "regitis", "regunt"]
        );
        assert_eq!(
            row(&r, Tense::Imperfect),
            ["regēbam", "regēbās", "regēbat", "regēbāmus", "regēbātis", "regēbant"]
        );
        assert_eq!(
            row(&r, Tense::Future),
            ["regam", "regēs", "reget", "regēmus", "regētis", "regent"]
        );
        assert_eq!(r.table.imperative(), (Some("rege"), Some("regite")));
    }

    #[test]
    fn test_third_conjugation_io() {
        let r = conj("capiō, capere, cēpī, captum");
        assert_eq!(
            row(&r, Tense::Present),
            ["capiō", "capis", "capit", "capimus", "capitis", "capiunt"]
        );
        assert_eq!(r.table.indicative(Tense::Imperfect, Singular, First), Some("capiēbam"));
        assert_eq!(r.table.indicative(Tense::Future, Singular, Second), Some("capiēs"));
    }

    #[test]
    fn test_fourth_conjugation() {
        let r = conj("audiō, audīre, audīvī, audītum");
        assert_eq!(
            row(&r, Tense::Present),
            ["audiō", "audīs", "audit", "audīmus", "audītis", "audiunt"]
        );
        assert_eq!(r.table.indicative(Tense::Imperfect, Plural, Third), Some("audiēbant"));
        assert_eq!(
            row(&r, Tense::Future),
            ["audiam", "audiēs", "audiet", "audiēmus", "audiētis", "audient"]
        );
        assert_eq!(r.table.imperative(), (Some("audī"), Some("audīte")));
    }

    #[test]
    fn test_perfect_system() {
        let r = conj("amō, amāre, amāvī, amātum");
        assert_eq!(
            row(&r, Tense::Perfect),
            ["amāvī", "amāvistī", "amāvit", "amāvimus", "amāvistis", "amāvērunt"]
        );
        assert_eq!(r.table.indicative(Tense::Pluperfect, Singular, First), Some("amāveram"));
        assert_eq!(
            r.table.indicative(Tense::FuturePerfect, Plural, Third),
            Some("amāverint")
        );
    }

    #[test]
    fn test_three_part_verb() {
        let r = conj("timeō, timēre, timuī");
        assert_eq!(r.class, Some(Conjugation::Second));
        assert_eq!(r.table.indicative(Tense::Perfect, Singular, Third), Some("timuit"));
    }

    #[test]
    fn test_unresolved_class_still_gets_perfect() {
        let r = conj("sum, esse, fuī, futūrus");
        assert_eq!(r.class, None);
        assert_eq!(r.warnings.len(), 1);
        assert_eq!(r.warnings[0].kind, WarningKind::UnresolvedConjugation);
        assert_eq!(r.table.infinitive(), None);
        assert_eq!(r.table.indicative(Tense::Present, Singular, First), None);
        assert_eq!(r.table.indicative(Tense::Perfect, Singular, First), Some("fuī"));
    }

    #[test]
    fn test_missing_perfect_stem() {
        let r = conj("fīō, fierī, —");
        let kinds: Vec<_> = r.warnings.iter().map(|w| w.kind).collect();
        assert!(kinds.contains(&WarningKind::MissingPerfectStem));
        assert_eq!(r.table.indicative(Tense::Perfect, Singular, First), None);
    }

    #[test]
    fn test_special_cases_override() {
        let parts = PrincipalParts::from_list("dūcō, dūcere, dūxī, ductum").unwrap();
        let mut cases = SpecialCases::new();
        cases.insert(
            SpecialCase::mood(Mood::Imperative).with_number(Singular),
            SpecialForm::Form("dūc".into()),
        );
        let r = conjugate(&parts, &cases);
        assert_eq!(r.table.imperative(), (Some("dūc"), Some("dūcite")));
    }

    #[test]
    fn test_special_cases_fill_unresolved_verb() {
        let parts = PrincipalParts::from_list("sum, esse, fuī, futūrus").unwrap();
        let present = ["sum", "es", "est", "sumus", "estis", "sunt"];
        let mut cases = SpecialCases::new();
        cases.insert(
            SpecialCase::mood(Mood::Infinitive),
            SpecialForm::Form("esse".into()),
        );
        for (i, form) in present.iter().enumerate() {
            let (number, person) = (Number::ALL[i / 3], Person::ALL[i % 3]);
            cases.insert(
                SpecialCase::mood(Mood::Indicative)
                    .with_tense(Tense::Present)
                    .with_number(number)
                    .with_person(person),
                SpecialForm::Form(form.to_string()),
            );
        }
        let r = conjugate(&parts, &cases);
        assert_eq!(r.table.infinitive(), Some("esse"));
        assert_eq!(row(&r, Tense::Present), present);
    }

    #[test]
    fn test_principal_parts_from_list() {
        assert_eq!(PrincipalParts::from_list("a, b"), None);
        let parts = PrincipalParts::from_list("amō,amāre , amāvī").unwrap();
        assert_eq!(parts.infinitive, "amāre");
        assert_eq!(parts.supine, "");
        assert_eq!(parts.joined(), "amō, amāre, amāvī");
    }
}
