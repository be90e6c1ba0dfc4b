//! # latin-vocab
//!
//! Extracts vocabulary from a Latin dictionary exported as styled markup and
//! generates full paradigms for the entries it finds.
//!
//! ## Pipeline
//!
//! 1. [`markup`] parses the export into an arena-backed [`Document`].
//! 2. [`style`] parses its style block into a [`StyleSheet`].
//! 3. [`extract`] walks the header/paragraph run into a [`Dictionary`],
//!    using [`classify`] to type each paragraph.
//! 4. [`paradigm`] generates conjugation and declension tables on
//!    [`VocabEntry::load`].
//!
//! Structural problems are fatal [`Error`]s. Entries that cannot be fully
//! processed yield [`Warning`]s instead and the batch carries on.
//!
//! ## Quick Start
//!
//! ```no_run
//! use latin_vocab::load_dictionary_from_path;
//!
//! let extraction = load_dictionary_from_path("latin.html")?;
//! for verb in extraction.dictionary.verbs() {
//!     println!("{}: {}", verb.parts().present, verb.english());
//! }
//! # Ok::<(), latin_vocab::Error>(())
//! ```
//!
//! ## Generating paradigms directly
//!
//! ```
//! use latin_vocab::paradigm::{Number, Person, Tense};
//! use latin_vocab::{PrincipalParts, Verb};
//!
//! let mut verb = Verb::new(PrincipalParts::new("amō", "amāre", "amāvī", "amātum"), "to love");
//! assert!(verb.load().is_empty());
//! assert_eq!(
//!     verb.conjugations().indicative(Tense::Present, Number::Plural, Person::Third),
//!     Some("amant")
//! );
//! ```

pub mod classify;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod markup;
pub mod paradigm;
pub mod style;
pub mod util;
pub mod vocab;

use std::path::Path;

pub use diagnostics::{Warning, WarningKind};
pub use error::{Error, Result};
pub use extract::{Dictionary, ExtractConfig, Extraction, Extractor, find_stylesheet};
pub use markup::{Document, ParseConfig, parse_document};
pub use paradigm::{Conjugation, Declension, PrincipalParts};
pub use style::StyleSheet;
pub use vocab::{Gender, Noun, PartOfSpeech, Verb, VocabEntry};

/// Run the whole pipeline over markup text and generate every paradigm.
pub fn load_dictionary(markup: &str) -> Result<Extraction> {
    load_dictionary_with_config(markup, ParseConfig::default(), ExtractConfig::default())
}

/// [`load_dictionary`] with explicit parse and extraction settings.
pub fn load_dictionary_with_config(
    markup: &str,
    parse: ParseConfig,
    extract: ExtractConfig,
) -> Result<Extraction> {
    let doc = markup::parse_document_with_config(markup, parse)?;
    let sheet = find_stylesheet(&doc)?;
    let mut extraction = Extractor::with_config(extract).extract(&doc, &sheet)?;
    let warnings = extraction.dictionary.load_all();
    extraction.warnings.extend(warnings);
    Ok(extraction)
}

/// Read a whole file, decode it, and run [`load_dictionary`].
pub fn load_dictionary_from_path(path: impl AsRef<Path>) -> Result<Extraction> {
    let markup = read_markup(path)?;
    load_dictionary(&markup)
}

/// Read and decode a markup file: UTF-8 first, then any declared charset,
/// then Windows-1252.
pub fn read_markup(path: impl AsRef<Path>) -> Result<String> {
    let bytes = std::fs::read(path.as_ref())?;
    let hint = util::extract_meta_charset(&bytes);
    Ok(util::decode_text(&bytes, hint.as_deref()).into_owned())
}
