//! Phoneme-level string helpers
//!
//! A "phoneme" here is one base code point followed by any combining marks.
//! The helpers do not know about digraphs: fold text with the normalizer
//! first when `th` should count as one phoneme.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Extension methods over phonetic strings
pub trait PhoneticStr {
    /// Iterate over base-plus-marks clusters
    fn phonemes(&self) -> Phonemes<'_>;

    /// Number of clusters
    fn phoneme_count(&self) -> usize {
        self.phonemes().count()
    }

    /// The `n`th cluster
    fn nth_phoneme(&self, n: usize) -> Option<&str> {
        self.phonemes().nth(n)
    }

    /// First combining mark, in decomposed form
    fn mark(&self) -> Option<char>;

    /// Whether the text carries `mark` once decomposed
    fn has_mark(&self, mark: char) -> bool;

    /// The text decomposed with every combining mark removed
    fn strip_marks(&self) -> String;
}

impl PhoneticStr for str {
    fn phonemes(&self) -> Phonemes<'_> {
        Phonemes { rest: self }
    }

    fn mark(&self) -> Option<char> {
        self.nfd().find(|&c| is_combining_mark(c))
    }

    fn has_mark(&self, mark: char) -> bool {
        self.nfd().any(|c| c == mark)
    }

    fn strip_marks(&self) -> String {
        self.nfd().filter(|&c| !is_combining_mark(c)).collect()
    }
}

/// Iterator returned by [`PhoneticStr::phonemes`]
#[derive(Debug, Clone)]
pub struct Phonemes<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Phonemes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let mut chars = self.rest.char_indices();
        chars.next()?;

        let end = chars
            .find(|&(_, c)| !is_combining_mark(c))
            .map_or(self.rest.len(), |(i, _)| i);

        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(head)
    }
}

/// Whether `ch` is a subscript digit (`₀`–`₉`), returning its value
#[inline]
pub fn subscript_digit(ch: char) -> Option<u8> {
    match ch {
        '\u{2080}'..='\u{2089}' => Some((ch as u32 - 0x2080) as u8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phonemes_group_marks() {
        let word = "ba\u{0301}nda\u{0304}";
        let phonemes: Vec<&str> = word.phonemes().collect();
        assert_eq!(phonemes, vec!["b", "a\u{0301}", "n", "d", "a\u{0304}"]);
        assert_eq!(word.phoneme_count(), 5);
        assert_eq!(word.nth_phoneme(1), Some("a\u{0301}"));
        assert_eq!(word.nth_phoneme(9), None);
    }

    #[test]
    fn test_phonemes_leading_mark() {
        let phonemes: Vec<&str> = "\u{0301}a".phonemes().collect();
        assert_eq!(phonemes, vec!["\u{0301}", "a"]);
    }

    #[test]
    fn test_mark_on_composed_text() {
        assert_eq!("á".mark(), Some('\u{0301}'));
        assert_eq!("a".mark(), None);
        assert!("ā".has_mark('\u{0304}'));
        assert!(!"ā".has_mark('\u{0301}'));
    }

    #[test]
    fn test_strip_marks() {
        assert_eq!("barándā".strip_marks(), "baranda");
        assert_eq!("kʰelt".strip_marks(), "kʰelt");
    }

    #[test]
    fn test_subscript_digit() {
        assert_eq!(subscript_digit('₁'), Some(1));
        assert_eq!(subscript_digit('₉'), Some(9));
        assert_eq!(subscript_digit('1'), None);
    }
}
