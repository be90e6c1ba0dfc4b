//! End-to-end extraction tests against a dictionary export fixture.
//!
//! The fixture mirrors the shape of a word-processor HTML export: one style
//! block of generated classes, then a flat run of headers and paragraphs.

use std::io::Write;

use latin_vocab::paradigm::{Case, Number, Person, Tense};
use latin_vocab::{
    Conjugation, Error, ExtractConfig, Gender, Noun, ParseConfig, PartOfSpeech, VocabEntry,
    WarningKind, load_dictionary, load_dictionary_from_path, load_dictionary_with_config,
};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> String {
    format!("{}/{}", FIXTURES_DIR, name)
}

fn fixture() -> latin_vocab::Extraction {
    load_dictionary_from_path(fixture_path("latin_dictionary.html")).expect("Failed to load fixture")
}

// ============================================================================
// Dictionary structure
// ============================================================================

#[test]
fn test_headers_in_document_order() {
    let extraction = fixture();
    let headers: Vec<&str> = extraction.dictionary.headers().collect();
    assert_eq!(
        headers,
        ["CAPVT I", "Irregular Verbs", "CAPVT II", "Numerals", "CAPVT III"]
    );
}

#[test]
fn test_entry_counts_per_header() {
    let dict = fixture().dictionary;
    assert_eq!(dict.get("CAPVT I").unwrap().len(), 3);
    assert_eq!(dict.get("Irregular Verbs").unwrap().len(), 2);
    assert_eq!(dict.get("CAPVT II").unwrap().len(), 8);
    assert_eq!(dict.get("Numerals").unwrap().len(), 0);
    assert_eq!(dict.get("CAPVT III").unwrap().len(), 1);
    assert_eq!(dict.entry_count(), 14);
    assert_eq!(dict.verbs().count(), 9);
}

#[test]
fn test_parts_of_speech() {
    let dict = fixture().dictionary;
    let kinds: Vec<PartOfSpeech> = dict
        .get("CAPVT II")
        .unwrap()
        .iter()
        .map(VocabEntry::part_of_speech)
        .collect();
    assert_eq!(
        kinds,
        [
            PartOfSpeech::Verb,
            PartOfSpeech::Verb,
            PartOfSpeech::Verb,
            PartOfSpeech::Verb,
            PartOfSpeech::Preposition,
            PartOfSpeech::Conjunction,
            PartOfSpeech::Pronoun,
            PartOfSpeech::Interjection,
        ]
    );
}

#[test]
fn test_descriptions() {
    let dict = fixture().dictionary;
    let first = &dict.get("CAPVT I").unwrap()[0];
    assert_eq!(
        first.key(),
        r#"[Verb] latin:"amō, amāre, amāvī, amātum" | text:": " | definition:"to love""#
    );

    let adverb = &dict.get("CAPVT I").unwrap()[2];
    assert_eq!(adverb.clean_description(), "saepe, adv.: often");
}

// ============================================================================
// Paradigms
// ============================================================================

#[test]
fn test_verbs_loaded() {
    let dict = fixture().dictionary;
    assert!(dict.entries().all(VocabEntry::is_loaded));

    let amo = dict.verbs().next().unwrap();
    assert_eq!(amo.conjugation(), Some(Conjugation::First));
    let table = amo.conjugations();
    assert_eq!(table.indicative(Tense::Present, Number::Singular, Person::First), Some("amō"));
    assert_eq!(table.indicative(Tense::Present, Number::Plural, Person::Third), Some("amant"));
    assert_eq!(table.indicative(Tense::Imperfect, Number::Singular, Person::First), Some("amābam"));
    assert_eq!(table.imperative(), (Some("amā"), Some("amāte")));
}

#[test]
fn test_verb_classes() {
    let dict = fixture().dictionary;
    let by_present = |present: &str| {
        dict.verbs()
            .find(|v| v.parts().present == present)
            .unwrap_or_else(|| panic!("{present} missing"))
    };

    let moneo = by_present("moneō");
    assert_eq!(
        moneo
            .conjugations()
            .indicative(Tense::Present, Number::Singular, Person::Third),
        Some("monet")
    );
    assert_eq!(moneo.english(), "to warn, advise");

    let rego = by_present("regō");
    assert_eq!(rego.conjugation(), Some(Conjugation::Third));
    assert_eq!(
        rego.conjugations()
            .indicative(Tense::Present, Number::Plural, Person::Third),
        Some("regunt")
    );

    let capio = by_present("capiō");
    assert_eq!(
        capio
            .conjugations()
            .indicative(Tense::Future, Number::Singular, Person::First),
        Some("capiam")
    );

    let audio = by_present("audiō");
    assert_eq!(audio.conjugation(), Some(Conjugation::Fourth));
    assert_eq!(
        audio
            .conjugations()
            .indicative(Tense::Perfect, Number::Plural, Person::Third),
        Some("audīvērunt")
    );

    let possum = by_present("possum");
    assert_eq!(possum.conjugation(), None);
    assert_eq!(possum.parts().supine, "");
    assert_eq!(
        possum
            .conjugations()
            .indicative(Tense::Perfect, Number::Singular, Person::First),
        Some("potuī")
    );
}

#[test]
fn test_warnings() {
    let extraction = fixture();
    let count = |kind: WarningKind| extraction.warnings.iter().filter(|w| w.kind == kind).count();

    assert_eq!(count(WarningKind::UnresolvedConjugation), 2);
    assert_eq!(count(WarningKind::PossibleIrregular), 1);
    assert_eq!(count(WarningKind::MissingGloss), 1);
    assert_eq!(extraction.warnings.len(), 4);

    let irregular = extraction
        .warnings
        .iter()
        .find(|w| w.kind == WarningKind::PossibleIrregular)
        .unwrap();
    assert_eq!(irregular.subject, "dīcō, dīcere, dīxī, dictum");
}

#[test]
fn test_search_ignores_macrons() {
    let dict = fixture().dictionary;
    let hits: Vec<String> = dict.search("amabam").map(VocabEntry::clean_description).collect();
    assert_eq!(hits, ["amō, amāre, amāvī, amātum: to love"]);
    assert_eq!(dict.search("zzz").count(), 0);
}

#[test]
fn test_noun_paradigm_outside_extraction() {
    let mut noun = Noun::new("dominus", "dominī", Gender::Masculine, "master");
    assert!(noun.load().is_empty());
    assert_eq!(noun.declensions().get(Case::Vocative, Number::Singular), Some("domine"));
}

// ============================================================================
// Configuration and I/O
// ============================================================================

#[test]
fn test_skip_additional_header() {
    let markup = std::fs::read_to_string(fixture_path("latin_dictionary.html")).unwrap();
    let config = ExtractConfig::default().skip_header("Irregular Verbs");
    let extraction = load_dictionary_with_config(&markup, ParseConfig::default(), config).unwrap();
    assert_eq!(extraction.dictionary.get("Irregular Verbs").unwrap().len(), 0);
    assert_eq!(extraction.dictionary.entry_count(), 12);
}

#[test]
fn test_load_from_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        concat!(
            "<html><head><style type=\"text/css\">.b{{font-weight:700}}.i{{font-style:italic}}</style></head>\n",
            "<body>\n",
            "<h1><span>Verba</span></h1>\n",
            "<p><span class=\"b\">laudō, laudāre, laudāvī, laudātum</span><span>: </span><span class=\"i\">to praise</span></p>\n",
            "</body></html>\n"
        )
    )
    .unwrap();

    let extraction = load_dictionary_from_path(file.path()).unwrap();
    let verb = extraction.dictionary.verbs().next().unwrap();
    assert_eq!(verb.english(), "to praise");
    assert_eq!(
        verb.conjugations()
            .indicative(Tense::Future, Number::Plural, Person::First),
        Some("laudābimus")
    );
}

#[test]
fn test_multiline_input_read_whole() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    // Entries after the first line must not be lost
    writeln!(file, "<html><head><style>.b{{font-weight:700}}</style></head><body>").unwrap();
    writeln!(file, "<h1><span>A</span></h1>").unwrap();
    writeln!(file, "<p><span class=\"b\">amō, amāre, amāvī</span></p>").unwrap();
    writeln!(file, "</body></html>").unwrap();

    let extraction = load_dictionary_from_path(file.path()).unwrap();
    assert_eq!(extraction.dictionary.entry_count(), 1);
}

#[test]
fn test_missing_file() {
    let err = load_dictionary_from_path(fixture_path("does_not_exist.html")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_truncated_document_is_error() {
    let markup = std::fs::read_to_string(fixture_path("latin_dictionary.html")).unwrap();
    let first_line = markup.lines().next().unwrap();
    assert!(matches!(load_dictionary(first_line), Err(Error::MalformedMarkup(_))));
}

#[test]
fn test_duplicate_selector_rejected() {
    let markup = "<html><head><style>.a{color:red}.a{color:blue}</style></head><body><h1>x</h1></body></html>";
    assert!(matches!(load_dictionary(markup), Err(Error::DuplicateSelector(_))));
}
