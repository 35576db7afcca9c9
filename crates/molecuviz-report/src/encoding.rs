//! WinAnsi text encoding and Helvetica glyph metrics for the standard
//! Type 1 fonts used in reports.

/// Code points 0x80..=0x9F that WinAnsi maps away from Latin-1.
const WIN_ANSI_HIGH: &[(char, u8)] = &[
    ('\u{20ac}', 0x80), // €
    ('\u{201a}', 0x82),
    ('\u{2026}', 0x85), // …
    ('\u{2022}', 0x95), // •
    ('\u{2013}', 0x96), // –
    ('\u{2014}', 0x97), // —
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201c}', 0x93),
    ('\u{201d}', 0x94),
    ('\u{2122}', 0x99), // ™
];

/// Fold characters the standard fonts cannot show onto close ASCII
/// equivalents. Chemical formulas use sub/superscript digits heavily.
pub fn fold(c: char) -> char {
    match c {
        '\u{2080}'..='\u{2089}' => char::from(b'0' + (c as u32 - 0x2080) as u8),
        '\u{2070}' => '0',
        '\u{2074}'..='\u{2079}' => char::from(b'4' + (c as u32 - 0x2074) as u8),
        '\u{208b}' | '\u{207b}' | '\u{2212}' => '-',
        '\u{208a}' | '\u{207a}' => '+',
        '\u{2093}' => 'x',
        '\t' | '\r' | '\n' => ' ',
        _ => c,
    }
}

/// Encode a string for a WinAnsiEncoding font. Unrepresentable characters
/// become `?`.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(fold)
        .map(|c| match c as u32 {
            0x20..=0x7e | 0xa0..=0xff => c as u32 as u8,
            _ => WIN_ANSI_HIGH
                .iter()
                .find(|(ch, _)| *ch == c)
                .map(|(_, b)| *b)
                .unwrap_or(b'?'),
        })
        .collect()
}

/// Inverse of [`encode`] for the bytes it can produce.
pub fn decode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            WIN_ANSI_HIGH
                .iter()
                .find(|(_, code)| *code == b)
                .map(|(ch, _)| *ch)
                .unwrap_or(b as char)
        })
        .collect()
}

/// Helvetica advance widths (1/1000 em) for 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015,                                             // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // 'N'..'Z'
    278, 278, 278, 469, 556, 333,                                                   // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // 'n'..'z'
    334, 260, 334, 584,                                                             // '{'..'~'
];

/// Advance width of one character in 1/1000 em, Helvetica regular.
pub fn glyph_width(c: char) -> u16 {
    match fold(c) as u32 {
        code @ 0x20..=0x7e => HELVETICA_WIDTHS[(code - 0x20) as usize],
        _ => 556,
    }
}
