use unicode_normalization::UnicodeNormalization;

// Hebrew cantillation accents (U+0591-U+05AF), vowel points (U+05B0-U+05BB)
// and the remaining point marks up to the sin dot (U+05BC-U+05C2)
const HEBREW_MARK_FIRST: char = '\u{0591}';
const HEBREW_MARK_LAST: char = '\u{05C2}';

pub fn is_hebrew_mark(c: char) -> bool {
    (HEBREW_MARK_FIRST..=HEBREW_MARK_LAST).contains(&c)
}

/// Removes Hebrew vowel points and cantillation marks, leaving the consonantal text.
///
/// The input is decomposed first since marks may arrive precomposed with their
/// base letter (e.g. U+FB2A SHIN WITH SHIN DOT), and recomposed afterwards.
pub fn strip_hebrew_marks(text: &str) -> String {
    text.nfd().filter(|&c| !is_hebrew_mark(c)).nfc().collect()
}
