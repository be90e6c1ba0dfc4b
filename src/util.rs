//! Text helpers shared by the parser, classifier and consumers.

use std::borrow::Cow;

use memchr::memmem;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from a `<meta charset>` declaration)
/// 3. Falls back to Windows-1252
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the charset label from the first `charset=` occurrence in a markup
/// prefix, e.g. `<meta content="text/html; charset=UTF-8" ...>`.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(1024)];
    let start = memmem::find(head, b"charset=")? + b"charset=".len();
    let label: Vec<u8> = head[start..]
        .iter()
        .copied()
        .skip_while(|&b| b == b'"' || b == b'\'')
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
        .collect();

    if label.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&label).into_owned())
    }
}

/// Replace non-breaking spaces with regular spaces.
pub fn normalize_nbsp(text: &str) -> Cow<'_, str> {
    if text.contains('\u{a0}') {
        Cow::Owned(text.replace('\u{a0}', " "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Strip macrons and other combining marks (`amāre` → `amare`).
///
/// Used for diacritic-insensitive matching of descriptions.
pub fn fold_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Find `needle` in `haystack`, optionally requiring that the match is not
/// preceded or followed by a letter.
///
/// Returns the byte offset of the first acceptable match.
pub fn find_marker(haystack: &str, needle: &str, whole_word: bool) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    memmem::find_iter(haystack.as_bytes(), needle.as_bytes()).find(|&pos| {
        if !whole_word {
            return true;
        }
        let before = haystack[..pos].chars().next_back();
        let after = haystack[pos + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphabetic) && !after.is_some_and(char::is_alphabetic)
    })
}

/// Drop the last `n` characters of `s`, or `None` if it is shorter.
pub(crate) fn drop_last_chars(s: &str, n: usize) -> Option<&str> {
    if n == 0 {
        return Some(s);
    }
    let (idx, _) = s.char_indices().rev().nth(n - 1)?;
    Some(&s[..idx])
}

/// The last `n` characters of `s`, or `None` if it is shorter.
pub(crate) fn last_chars(s: &str, n: usize) -> Option<&str> {
    drop_last_chars(s, n).map(|head| &s[head.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("amō".as_bytes(), None), "amō");
    }

    #[test]
    fn test_decode_falls_back_to_cp1252() {
        // 0xE9 is "é" in Windows-1252 and invalid as a lone UTF-8 byte
        assert_eq!(decode_text(b"caf\xe9", None), "café");
    }

    #[test]
    fn test_extract_meta_charset() {
        let html = br#"<html><head><meta content="text/html; charset=UTF-8" http-equiv="content-type">"#;
        assert_eq!(extract_meta_charset(html).as_deref(), Some("UTF-8"));
        assert_eq!(extract_meta_charset(b"<html>"), None);
    }

    #[test]
    fn test_normalize_nbsp() {
        assert_eq!(normalize_nbsp("CAPVT\u{a0}I"), "CAPVT I");
        assert!(matches!(normalize_nbsp("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_fold_diacritics() {
        assert_eq!(fold_diacritics("amō, amāre, amāvī"), "amo, amare, amavi");
        assert_eq!(fold_diacritics("plain"), "plain");
    }

    #[test]
    fn test_find_marker_whole_word() {
        assert_eq!(find_marker("adv. quickly", "adv.", true), Some(0));
        assert_eq!(find_marker("(adv.)", "adv.", true), Some(1));
        assert_eq!(find_marker("sadv. x", "adv.", true), None);
        assert_eq!(find_marker("sadv. x", "adv.", false), Some(1));
        assert_eq!(find_marker("nothing here", "adv.", false), None);
    }

    #[test]
    fn test_find_marker_skips_bad_first_hit() {
        assert_eq!(find_marker("xprep. prep.", "prep.", true), Some(7));
    }

    #[test]
    fn test_char_slicing() {
        assert_eq!(drop_last_chars("amāre", 2), Some("amā"));
        assert_eq!(last_chars("amāre", 3), Some("āre"));
        assert_eq!(last_chars("re", 3), None);
        assert_eq!(drop_last_chars("ab", 0), Some("ab"));
        assert_eq!(drop_last_chars("ab", 2), Some(""));
    }

    proptest! {
        #[test]
        fn prop_fold_diacritics_is_idempotent(s in "[a-zāēīōūĀĒĪŌŪ ,.]{0,24}") {
            let once = fold_diacritics(&s);
            prop_assert_eq!(fold_diacritics(&once), once.clone());
            prop_assert!(once.is_ascii());
        }
    }
}
