//! Pentimal numerals: a stem rune stacked with combining marks, each mark worth
//! a fixed stroke count. A marked cluster collapses to the lowercase hex digit
//! of `strokes - 1`; unmarked glyphs pass through.

use crate::diagnostics::LoadError;

/// Base rune that carries pentimal marks. Worth nothing by itself.
pub const STEM: char = 'ᛁ';

pub fn is_combining(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

pub fn mark_value(c: char) -> Option<u32> {
    match c {
        '\u{0335}' | '\u{0304}' => Some(1),
        '\u{0333}' | '\u{033F}' => Some(2),
        '\u{0339}' | '\u{0357}' => Some(5),
        '\u{030A}' | '\u{0325}' => Some(10),
        _ => None,
    }
}

/// Splits a line into clusters of one base character plus its trailing marks.
pub fn clusters(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = None;
    for (idx, c) in line.char_indices() {
        if start.is_some() && is_combining(c) {
            continue;
        }
        if let Some(s) = start {
            out.push(&line[s..idx]);
        }
        start = Some(idx);
    }
    if let Some(s) = start {
        out.push(&line[s..]);
    }
    out
}

/// Collapses one cluster. `Err` carries the character that could not be read.
///
/// A cluster led by a mark (only possible at the start of a line) uses that
/// mark as its base, and the base's strokes count toward the sum.
pub fn decode_cluster(cluster: &str) -> Result<char, char> {
    let mut chars = cluster.chars();
    let Some(base) = chars.next() else {
        return Err('\u{FFFD}');
    };
    let base_strokes = match mark_value(base) {
        Some(v) => v,
        None if is_combining(base) => return Err(base),
        None => 0,
    };
    let marks = chars.as_str();
    if marks.is_empty() {
        return Ok(base);
    }
    if base != STEM && !is_combining(base) {
        return Err(base);
    }

    // Only the last hex digit survives, so sum modulo 16.
    let mut strokes = base_strokes % 16;
    for m in marks.chars() {
        strokes = (strokes + mark_value(m).ok_or(m)?) % 16;
    }
    // At least one stroke was counted; `+ 15` is `- 1` modulo 16.
    char::from_digit((strokes + 15) % 16, 16).ok_or(base)
}

/// Decodes one source line into single-character cells. `line_no` is 1-based
/// and only used for diagnostics.
pub fn decode_line(line: &str, line_no: usize) -> Result<Vec<char>, LoadError> {
    clusters(line)
        .into_iter()
        .enumerate()
        .map(|(idx, cluster)| {
            decode_cluster(cluster)
                .map_err(|found| LoadError::unknown_diacritic(line_no, idx + 1, found))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorCode;

    fn decode(s: &str) -> String {
        decode_line(s, 1).expect("decode").into_iter().collect()
    }

    #[test]
    fn unmarked_glyphs_pass_through() {
        assert_eq!(decode("ᛌ1ᚭᛧ"), "ᛌ1ᚭᛧ");
        assert_eq!(decode("ᛁ"), "ᛁ");
        assert_eq!(decode(""), "");
    }

    #[test]
    fn marks_sum_to_digit_minus_one() {
        assert_eq!(decode("ᛁ\u{0335}"), "0");
        assert_eq!(decode("ᛁ\u{0333}"), "1");
        assert_eq!(decode("ᛁ\u{0333}\u{0304}"), "2");
        assert_eq!(decode("ᛁ\u{0339}"), "4");
        assert_eq!(decode("ᛁ\u{030A}"), "9");
        assert_eq!(decode("ᛁ\u{030A}\u{0339}"), "e");
        assert_eq!(decode("ᛁ\u{0325}\u{0357}\u{0335}"), "f");
    }

    #[test]
    fn digit_wraps_past_fifteen() {
        // 10 + 10 strokes: hex(19) ends in '3'.
        assert_eq!(decode("ᛁ\u{030A}\u{0325}"), "3");
    }

    #[test]
    fn length_counts_clusters_not_codepoints() {
        let line = "ᚠᛁ\u{0333}\u{0304}\u{0335}ᚢ";
        assert_eq!(line.chars().count(), 6);
        assert_eq!(clusters(line), vec!["ᚠ", "ᛁ\u{0333}\u{0304}\u{0335}", "ᚢ"]);
        assert_eq!(decode(line), "ᚠ3ᚢ");
    }

    #[test]
    fn unknown_mark_fails_with_position() {
        let err = decode_line("ᚠᚢᛁ\u{0301}", 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownDiacritic);
        assert_eq!(err.line, 4);
        assert_eq!(err.column, 3);
        assert_eq!(err.found, Some('\u{0301}'));
    }

    #[test]
    fn marks_on_non_stem_base_fail() {
        let err = decode_line("ᚠ\u{0335}", 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownDiacritic);
        assert_eq!(err.found, Some('ᚠ'));
    }

    #[test]
    fn leading_mark_is_its_own_base() {
        let cells = decode_line("\u{0335}ᛁ", 1).unwrap();
        assert_eq!(cells, vec!['\u{0335}', 'ᛁ']);
        // 1 + 2 strokes, base included.
        assert_eq!(decode("\u{0335}\u{0333}ᚭ"), "2ᚭ");
    }

    #[test]
    fn leading_unknown_mark_fails() {
        let err = decode_line("\u{0301}ᛁ", 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownDiacritic);
        assert_eq!(err.column, 1);
        assert_eq!(err.found, Some('\u{0301}'));
    }

    #[test]
    fn long_mark_runs_keep_the_last_digit() {
        // 17 * 10 = 170 strokes; hex(169) = 0xa9.
        let cluster: String = std::iter::once(STEM)
            .chain(std::iter::repeat('\u{030A}').take(17))
            .collect();
        assert_eq!(decode_cluster(&cluster), Ok('9'));
        let cluster: String = std::iter::once(STEM)
            .chain(std::iter::repeat('\u{0335}').take(100_000))
            .collect();
        // hex(99_999) = 0x1869f.
        assert_eq!(decode_cluster(&cluster), Ok('f'));
    }

    #[test]
    fn decoding_is_deterministic_over_the_mark_table() {
        let marks = [
            '\u{0335}', '\u{0304}', '\u{0333}', '\u{033F}', '\u{030A}', '\u{0325}', '\u{0339}',
            '\u{0357}',
        ];
        for a in marks {
            for b in marks {
                let cluster: String = [STEM, a, b].iter().collect();
                let first = decode_cluster(&cluster);
                assert_eq!(first, decode_cluster(&cluster));
                let strokes = mark_value(a).unwrap() + mark_value(b).unwrap();
                assert_eq!(first, Ok(char::from_digit((strokes - 1) % 16, 16).unwrap()));
            }
        }
    }
}
