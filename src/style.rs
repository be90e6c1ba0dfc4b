//! Embedded stylesheet parsing.
//!
//! The export carries one `<style>` block of flat rules: comma-separated
//! selectors followed by a `{ property: value; ... }` block. Rules are read
//! verbatim into a selector → declarations map. Parsing is strict: a repeated
//! selector, a declaration without exactly one `:` or an unknown at-rule
//! aborts with an error instead of being skipped.
//!
//! # Example
//!
//! ```
//! use latin_vocab::style::StyleSheet;
//!
//! let sheet = StyleSheet::parse(".c1, .c2 { font-weight: 700 } .c3 { font-style: italic }")?;
//! assert_eq!(sheet.declaration(".c2", "font-weight"), Some("700"));
//! assert!(sheet.class_has("c3", "font-style", "italic"));
//! # Ok::<(), latin_vocab::Error>(())
//! ```

use std::collections::HashMap;
use std::fmt;

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, ParseErrorKind, Parser, ParserInput,
    ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser,
};

use crate::error::{Error, Result};

/// Declarations of one selector: property → raw value.
pub type Declarations = HashMap<String, String>;

/// Parsed stylesheet: selector → declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: HashMap<String, Declarations>,
}

impl StyleSheet {
    /// Parse the text content of a style block.
    pub fn parse(css: &str) -> Result<Self> {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut rules = HashMap::new();

        let mut rule_parser = TopLevelRuleParser { rules: &mut rules };
        let stylesheet_parser = StyleSheetParser::new(&mut parser, &mut rule_parser);

        for result in stylesheet_parser {
            if let Err((err, slice)) = result {
                return Err(into_error(err, slice));
            }
        }

        tracing::debug!(selectors = rules.len(), "parsed stylesheet");
        Ok(Self { rules })
    }

    /// Declarations for an exact selector string.
    pub fn get(&self, selector: &str) -> Option<&Declarations> {
        self.rules.get(selector)
    }

    /// Value of one property under an exact selector.
    pub fn declaration(&self, selector: &str, property: &str) -> Option<&str> {
        self.rules
            .get(selector)
            .and_then(|decls| decls.get(property))
            .map(String::as_str)
    }

    /// Whether the `.class` rule sets `property` to exactly `value`.
    pub fn class_has(&self, class: &str, property: &str, value: &str) -> bool {
        self.declaration(&format!(".{class}"), property) == Some(value)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Canonical form: one rule per selector, sorted, `selector{prop:value;...}`.
impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut selectors: Vec<_> = self.rules.keys().collect();
        selectors.sort();

        for selector in selectors {
            let decls = &self.rules[selector];
            let mut props: Vec<_> = decls.iter().collect();
            props.sort();

            write!(f, "{selector}{{")?;
            for (i, (property, value)) in props.into_iter().enumerate() {
                if i > 0 {
                    f.write_str(";")?;
                }
                write!(f, "{property}:{value}")?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

/// Failures raised from inside the cssparser callbacks.
#[derive(Debug, Clone)]
enum StyleError {
    DuplicateSelector(String),
    EmptySelector(String),
    Declaration(String),
    AtRule(String),
}

fn into_error(err: ParseError<'_, StyleError>, slice: &str) -> Error {
    match err.kind {
        ParseErrorKind::Custom(StyleError::DuplicateSelector(s)) => Error::DuplicateSelector(s),
        ParseErrorKind::Custom(StyleError::Declaration(s)) => Error::MalformedDeclaration(s),
        ParseErrorKind::Custom(StyleError::EmptySelector(s)) => {
            Error::MalformedStyleSheet(format!("empty selector in {s:?}"))
        }
        ParseErrorKind::Custom(StyleError::AtRule(name)) => {
            Error::MalformedStyleSheet(format!("unsupported at-rule @{name}"))
        }
        ParseErrorKind::Basic(kind) => Error::MalformedStyleSheet(format!(
            "{kind:?} at line {} in {:?}",
            err.location.line + 1,
            slice.trim()
        )),
    }
}

/// Consume the rest of the input and return its raw text.
fn raw_remainder<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next().is_ok() {}
    input.slice_from(start)
}

/// Parser for top-level stylesheet rules.
struct TopLevelRuleParser<'a> {
    rules: &'a mut HashMap<String, Declarations>,
}

impl<'i> AtRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = StyleError;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        // Font imports precede the rules in the export and carry no declarations.
        if name.eq_ignore_ascii_case("import") {
            raw_remainder(input);
            Ok(())
        } else {
            Err(input.new_custom_error(StyleError::AtRule(name.to_string())))
        }
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> std::result::Result<Self::AtRule, ()> {
        Ok(())
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = Vec<String>;
    type QualifiedRule = ();
    type Error = StyleError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let raw = raw_remainder(input);
        let selectors: Vec<String> = raw.split(',').map(|s| s.trim().to_string()).collect();

        if selectors.iter().any(String::is_empty) {
            return Err(input.new_custom_error(StyleError::EmptySelector(raw.trim().to_string())));
        }
        Ok(selectors)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut collector = DeclarationCollector::default();
        let mut failure = None;

        for result in RuleBodyParser::new(input, &mut collector) {
            if let Err((err, slice)) = result {
                failure = Some(match err.kind {
                    ParseErrorKind::Custom(e) => e,
                    ParseErrorKind::Basic(_) => StyleError::Declaration(slice.trim().to_string()),
                });
                break;
            }
        }

        if let Some(e) = failure {
            return Err(input.new_custom_error(e));
        }

        for selector in prelude {
            if self.rules.contains_key(&selector) {
                return Err(input.new_custom_error(StyleError::DuplicateSelector(selector)));
            }
            self.rules
                .insert(selector, collector.declarations.iter().cloned().collect());
        }

        Ok(())
    }
}

/// Collects `property: value` pairs of one rule body.
#[derive(Default)]
struct DeclarationCollector {
    declarations: Vec<(String, String)>,
}

impl<'i> AtRuleParser<'i> for DeclarationCollector {
    type Prelude = ();
    type AtRule = ();
    type Error = StyleError;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(StyleError::AtRule(name.to_string())))
    }
}

impl<'i> QualifiedRuleParser<'i> for DeclarationCollector {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = StyleError;
}

impl<'i> DeclarationParser<'i> for DeclarationCollector {
    type Declaration = ();
    type Error = StyleError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> std::result::Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let value = raw_remainder(input).trim();

        if value.contains(':') {
            return Err(input.new_custom_error(StyleError::Declaration(format!("{}:{value}", &*name))));
        }

        self.declarations.push((name.to_string(), value.to_string()));
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), StyleError> for DeclarationCollector {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_grouped_selectors() {
        let sheet = StyleSheet::parse(".c1, .c2{font-weight:700;color:#000000}").unwrap();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.declaration(".c1", "font-weight"), Some("700"));
        assert_eq!(sheet.declaration(".c2", "color"), Some("#000000"));
    }

    #[test]
    fn test_parse_google_docs_style() {
        let css = concat!(
            "@import url('https://themes.googleusercontent.com/fonts/css?kit=abc');",
            "ul.lst-kix_1-0{list-style-type:none}",
            ".lst-kix_1-0>li:before{content:\"\\0025cf   \"}",
            ".c0{font-weight:400;font-style:italic;font-family:\"Arial\"}",
            ".c1{font-weight:700}",
            "h1{padding-top:20pt;font-size:20pt}",
        );
        let sheet = StyleSheet::parse(css).unwrap();
        assert_eq!(sheet.len(), 5);
        assert!(sheet.class_has("c0", "font-style", "italic"));
        assert!(sheet.class_has("c1", "font-weight", "700"));
        assert!(!sheet.class_has("c0", "font-weight", "700"));
        assert_eq!(sheet.declaration("h1", "font-size"), Some("20pt"));
        assert!(sheet.get(".lst-kix_1-0>li:before").is_some());
    }

    #[test]
    fn test_duplicate_selector_is_error() {
        let err = StyleSheet::parse(".a{color:red}.a{color:blue}").unwrap_err();
        assert!(matches!(err, Error::DuplicateSelector(s) if s == ".a"));

        let err = StyleSheet::parse(".a, .a{color:red}").unwrap_err();
        assert!(matches!(err, Error::DuplicateSelector(_)));
    }

    #[test]
    fn test_declaration_without_colon_is_error() {
        let err = StyleSheet::parse(".a{color red}").unwrap_err();
        assert!(matches!(err, Error::MalformedDeclaration(_)));
    }

    #[test]
    fn test_declaration_with_two_colons_is_error() {
        let err = StyleSheet::parse(".a{color:red:blue}").unwrap_err();
        assert!(matches!(err, Error::MalformedDeclaration(_)));
    }

    #[test]
    fn test_unknown_at_rule_is_error() {
        let err = StyleSheet::parse("@media print{.a{color:red}}").unwrap_err();
        assert!(matches!(err, Error::MalformedStyleSheet(_)));
    }

    #[test]
    fn test_empty_selector_is_error() {
        assert!(StyleSheet::parse(".a,{color:red}").is_err());
    }

    #[test]
    fn test_trailing_semicolon_and_empty_block() {
        let sheet = StyleSheet::parse(".a{color:red;}.b{}").unwrap();
        assert_eq!(sheet.get(".a").map(|d| d.len()), Some(1));
        assert_eq!(sheet.get(".b").map(|d| d.len()), Some(0));
    }

    #[test]
    fn test_display_is_canonical() {
        let sheet = StyleSheet::parse(".b{z:1;a:2} .a{color:red}").unwrap();
        assert_eq!(sheet.to_string(), ".a{color:red}\n.b{a:2;z:1}\n");
    }

    fn arb_stylesheet() -> impl Strategy<Value = StyleSheet> {
        let decls = prop::collection::hash_map(
            "[a-z]{1,8}(-[a-z]{1,6})?",
            "[a-z][a-z0-9]{0,7}|[0-9]{1,4}",
            0..5,
        );
        prop::collection::hash_map("\\.c[0-9]{1,3}|[a-z]{1,3}\\.[a-z]{1,4}", decls, 0..8)
            .prop_map(|rules| StyleSheet { rules })
    }

    proptest! {
        #[test]
        fn prop_parse_inverts_display(sheet in arb_stylesheet()) {
            let printed = sheet.to_string();
            let parsed = StyleSheet::parse(&printed).unwrap();
            prop_assert_eq!(parsed, sheet);
        }
    }
}
