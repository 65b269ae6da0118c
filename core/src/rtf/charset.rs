//! Decoding of `\'hh` escapes. Rich-text editors write Windows-1252 by
//! default (`\ansicpg1252`); other code pages fall back to Latin-1.

const CP1252_HIGH: [char; 32] = [
    '€', '\u{81}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{8d}', 'Ž', '\u{8f}',
    '\u{90}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ', '\u{9d}', 'ž', 'Ÿ',
];

pub const CP1252: i32 = 1252;

pub fn decode_byte(byte: u8, codepage: i32) -> char {
    match byte {
        0x80..=0x9f if codepage == CP1252 => CP1252_HIGH[usize::from(byte - 0x80)],
        _ => char::from(byte),
    }
}
