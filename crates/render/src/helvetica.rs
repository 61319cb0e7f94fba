//! Helvetica metrics and WinAnsi encoding for the standard (non-embedded) font.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em. Text is measured
//! through the same encoding it is written with, so a character that cannot
//! be encoded is both drawn and measured as `?`.

/// PDF base font name.
pub const FONT_NAME: &str = "Helvetica";
/// PDF encoding name matching [`win_ansi_code`].
pub const ENCODING: &str = "WinAnsiEncoding";

/// Width used for codes with no glyph entry.
const DEFAULT_WIDTH: u16 = 556;

/// 0x20..=0x7E
#[rustfmt::skip]
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

/// 0xA0..=0xFF (identical to Latin-1 code points)
#[rustfmt::skip]
const LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// WinAnsi codes 0x80..=0x9F: (unicode, code, width)
const WIN_ANSI_EXTRAS: [(char, u8, u16); 27] = [
    ('\u{20AC}', 0x80, 556),  // euro
    ('\u{201A}', 0x82, 222),  // quotesinglbase
    ('\u{0192}', 0x83, 556),  // florin
    ('\u{201E}', 0x84, 333),  // quotedblbase
    ('\u{2026}', 0x85, 1000), // ellipsis
    ('\u{2020}', 0x86, 556),  // dagger
    ('\u{2021}', 0x87, 556),  // daggerdbl
    ('\u{02C6}', 0x88, 333),  // circumflex
    ('\u{2030}', 0x89, 1000), // perthousand
    ('\u{0160}', 0x8A, 667),  // Scaron
    ('\u{2039}', 0x8B, 333),  // guilsinglleft
    ('\u{0152}', 0x8C, 1000), // OE
    ('\u{017D}', 0x8E, 611),  // Zcaron
    ('\u{2018}', 0x91, 222),  // quoteleft
    ('\u{2019}', 0x92, 222),  // quoteright
    ('\u{201C}', 0x93, 333),  // quotedblleft
    ('\u{201D}', 0x94, 333),  // quotedblright
    ('\u{2022}', 0x95, 350),  // bullet
    ('\u{2013}', 0x96, 556),  // endash
    ('\u{2014}', 0x97, 1000), // emdash
    ('\u{02DC}', 0x98, 333),  // tilde
    ('\u{2122}', 0x99, 1000), // trademark
    ('\u{0161}', 0x9A, 500),  // scaron
    ('\u{203A}', 0x9B, 333),  // guilsinglright
    ('\u{0153}', 0x9C, 944),  // oe
    ('\u{017E}', 0x9E, 500),  // zcaron
    ('\u{0178}', 0x9F, 667),  // Ydieresis
];

/// WinAnsi byte for `c`, or `?` when the encoding has no slot for it.
pub fn win_ansi_code(c: char) -> u8 {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => c as u8,
        _ => WIN_ANSI_EXTRAS
            .iter()
            .find(|(ch, _, _)| *ch == c)
            .map(|(_, code, _)| *code)
            .unwrap_or(b'?'),
    }
}

/// Encode `text` for a WinAnsi-encoded PDF string.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_code).collect()
}

/// Advance width of an encoded byte, in 1/1000 em.
pub fn code_width(code: u8) -> u16 {
    match code {
        0x20..=0x7E => ASCII_WIDTHS[(code - 0x20) as usize],
        0xA0..=0xFF => LATIN1_WIDTHS[(code - 0xA0) as usize],
        _ => WIN_ANSI_EXTRAS
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(_, _, w)| *w)
            .unwrap_or(DEFAULT_WIDTH),
    }
}

/// Width of `text` set in Helvetica at `font_size` points.
pub fn string_width(text: &str, font_size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|c| u32::from(code_width(win_ansi_code(c))))
        .sum();
    f64::from(units) * font_size / 1000.0
}
