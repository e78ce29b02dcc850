//! Character advance widths for the SERP font.
//!
//! Values are Arial advance widths in thousandths of an em. Arial is
//! metrically compatible with Helvetica, so these are the Helvetica AFM
//! widths. Pixel width at size `s` is `units * s / 1000`.

/// Width of characters missing from the table (average lowercase/digit advance)
pub const FALLBACK_UNITS: u32 = 556;

/// Width of East Asian wide characters and emoji, rendered at a full em
pub const WIDE_UNITS: u32 = 1000;

/// Printable ASCII, indexed by `code - 0x20`
const ASCII_UNITS: [u32; 95] = [
    278,  // ' '
    278,  // !
    355,  // "
    556,  // #
    556,  // $
    889,  // %
    667,  // &
    191,  // '
    333,  // (
    333,  // )
    389,  // *
    584,  // +
    278,  // ,
    333,  // -
    278,  // .
    278,  // /
    556,  // 0
    556,  // 1
    556,  // 2
    556,  // 3
    556,  // 4
    556,  // 5
    556,  // 6
    556,  // 7
    556,  // 8
    556,  // 9
    278,  // :
    278,  // ;
    584,  // <
    584,  // =
    584,  // >
    556,  // ?
    1015, // @
    667,  // A
    667,  // B
    722,  // C
    722,  // D
    667,  // E
    611,  // F
    778,  // G
    722,  // H
    278,  // I
    500,  // J
    667,  // K
    556,  // L
    833,  // M
    722,  // N
    778,  // O
    667,  // P
    778,  // Q
    722,  // R
    667,  // S
    611,  // T
    722,  // U
    667,  // V
    944,  // W
    667,  // X
    667,  // Y
    611,  // Z
    278,  // [
    278,  // \
    278,  // ]
    469,  // ^
    556,  // _
    333,  // `
    556,  // a
    556,  // b
    500,  // c
    556,  // d
    556,  // e
    278,  // f
    556,  // g
    556,  // h
    222,  // i
    222,  // j
    500,  // k
    222,  // l
    833,  // m
    556,  // n
    556,  // o
    556,  // p
    556,  // q
    333,  // r
    500,  // s
    278,  // t
    556,  // u
    500,  // v
    722,  // w
    500,  // x
    500,  // y
    500,  // z
    334,  // {
    260,  // |
    334,  // }
    584,  // ~
];

/// Non-ASCII punctuation and symbols common in titles
const EXTRA_UNITS: &[(char, u32)] = &[
    ('\u{00A0}', 278),  // no-break space
    ('\u{00A9}', 737),  // ©
    ('\u{00AE}', 737),  // ®
    ('\u{00B7}', 278),  // ·
    ('\u{00BB}', 556),  // »
    ('\u{00AB}', 556),  // «
    ('\u{2013}', 556),  // en dash
    ('\u{2014}', 1000), // em dash
    ('\u{2018}', 222),  // ‘
    ('\u{2019}', 222),  // ’
    ('\u{201C}', 333),  // “
    ('\u{201D}', 333),  // ”
    ('\u{2022}', 350),  // •
    ('\u{2026}', 1000), // …
    ('\u{203A}', 333),  // ›
    ('\u{2039}', 333),  // ‹
    ('\u{20AC}', 556),  // €
    ('\u{2122}', 1000), // ™
];

/// Advance width of `c` in thousandths of an em
pub fn char_units(c: char) -> u32 {
    let code = c as u32;
    if (0x20..0x7F).contains(&code) {
        return ASCII_UNITS[(code - 0x20) as usize];
    }
    // Tabs and line breaks render as a single space in a result snippet
    if matches!(c, '\t' | '\n' | '\r') {
        return ASCII_UNITS[0];
    }
    if c.is_control() {
        return 0;
    }
    if let Some(&(_, units)) = EXTRA_UNITS.iter().find(|(ch, _)| *ch == c) {
        return units;
    }
    if let Some(base) = latin1_base(c) {
        return ASCII_UNITS[(base as u32 - 0x20) as usize];
    }
    if is_wide(code) {
        return WIDE_UNITS;
    }
    FALLBACK_UNITS
}

/// Accented Latin letters share the advance of their base letter
fn latin1_base(c: char) -> Option<char> {
    let base = match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

fn is_wide(code: u32) -> bool {
    matches!(
        code,
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x1F300..=0x1FAFF
            | 0x20000..=0x3FFFD
    )
}
