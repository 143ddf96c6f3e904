use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks. Vowel signs and other combining marks of
/// abugidas (Devanagari, Thai, ...) are letters of the name and stay.
fn is_diacritic_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Comparison key for a place name: NFD-decomposed, diacritics dropped,
/// lower-cased. `"Querétaro"` and `"QUERETARO"` share the key `"queretaro"`.
pub fn normalize(s: &str) -> String {
    if s.is_ascii() {
        return s.to_lowercase();
    }
    s.nfd()
        .filter(|c| !is_diacritic_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
