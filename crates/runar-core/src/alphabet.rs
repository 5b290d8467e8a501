//! Fixed glyph tables of the language.

/// Output glyphs, indexed by register value.
pub const ALPHABET: [char; 16] = [
    'ᚠ', 'ᚢ', 'ᚦ', 'ᚬ', 'ᚱ', 'ᚴ', 'ᚼ', 'ᚾ', 'ᛁ', 'ᛅ', 'ᛋ', 'ᛏ', 'ᛒ', 'ᛘ', 'ᛚ', 'ᛦ',
];

/// Emitted instead of a numeral when the register is unset.
pub const SEPARATOR: char = '᛬';

pub fn numeral(value: i64) -> Option<char> {
    usize::try_from(value)
        .ok()
        .and_then(|idx| ALPHABET.get(idx).copied())
}

/// Register glyph for diagnostics: separator when unset, `?` when out of range.
pub fn register_glyph(value: Option<i64>) -> char {
    match value {
        None => SEPARATOR,
        Some(v) => numeral(v).unwrap_or('?'),
    }
}

/// Lowercase hex digit cells (`0-9a-f`) set the register.
pub fn hex_digit(glyph: char) -> Option<i64> {
    match glyph {
        '0'..='9' | 'a'..='f' => glyph.to_digit(16).map(i64::from),
        _ => None,
    }
}
