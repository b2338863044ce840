//! Display width classification.
//!
//! Terminals render characters from the CJK / Hangul / fullwidth blocks across
//! two columns. Every grid write asks [`is_wide`] how many columns a glyph takes.

/// Inclusive code point ranges rendered two columns wide.
const WIDE_RANGES: [(u32, u32); 8] = [
    (0x1100, 0x115F), // Hangul Jamo initial consonants
    (0x2E80, 0xA4CF), // CJK radicals through Yi
    (0xAC00, 0xD7A3), // Hangul syllables
    (0xF900, 0xFAFF), // CJK compatibility ideographs
    (0xFE10, 0xFE19), // Vertical forms
    (0xFE30, 0xFE6F), // CJK compatibility forms
    (0xFF00, 0xFF60), // Fullwidth forms
    (0xFFE0, 0xFFE6), // Fullwidth symbol variants
];

/// True if `c` occupies two display columns.
#[inline]
pub fn is_wide(c: char) -> bool {
    let cp = c as u32;
    WIDE_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Columns consumed by `c` (1 or 2).
#[inline]
pub fn width(c: char) -> u16 {
    if is_wide(c) {
        2
    } else {
        1
    }
}
