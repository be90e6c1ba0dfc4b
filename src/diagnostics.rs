//! Non-fatal diagnostics collected during classification and paradigm generation.

use std::fmt;

/// What kind of shortfall a [`Warning`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum WarningKind {
    /// Infinitive ending matched no conjugation class.
    UnresolvedConjugation,
    /// Perfect principal part is missing or does not end in `ī`.
    MissingPerfectStem,
    /// Nominative/genitive pair matched no declension class.
    UnresolvedDeclension,
    /// Entry carries an imperative marker and may need special cases.
    PossibleIrregular,
    /// No English gloss could be located for a verb.
    MissingGloss,
    /// A special-case override does not fit the cells it names.
    InvalidSpecialCase,
}

impl WarningKind {
    pub const ALL: [WarningKind; 6] = [
        WarningKind::UnresolvedConjugation,
        WarningKind::MissingPerfectStem,
        WarningKind::UnresolvedDeclension,
        WarningKind::PossibleIrregular,
        WarningKind::MissingGloss,
        WarningKind::InvalidSpecialCase,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WarningKind::UnresolvedConjugation => "unresolved conjugation",
            WarningKind::MissingPerfectStem => "missing perfect stem",
            WarningKind::UnresolvedDeclension => "unresolved declension",
            WarningKind::PossibleIrregular => "possible irregular",
            WarningKind::MissingGloss => "missing gloss",
            WarningKind::InvalidSpecialCase => "invalid special case",
        }
    }
}

/// A recoverable problem tied to one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Warning {
    pub kind: WarningKind,
    /// The lemma or description the warning is about.
    pub subject: String,
    pub message: String,
}

impl Warning {
    /// Create a warning and log it immediately.
    pub fn new(kind: WarningKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        let warning = Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        };
        tracing::warn!(kind = kind.as_str(), subject = %warning.subject, "{}", warning.message);
        warning
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind.as_str(), self.subject, self.message)
    }
}
