//! Builtin 5x7 dot glyphs, used when no font file is available.
//!
//! Rows are stored top to bottom, five bits each, most significant bit leftmost. Lowercase
//! letters draw as uppercase; anything else without a pattern draws as a hollow box.

use kurbo::Rect;

/// Glyph width in dots.
pub(crate) const GLYPH_COLS: u32 = 5;
/// Glyph height in dots.
pub(crate) const GLYPH_ROWS: u32 = 7;
/// Horizontal advance in dots, including one dot of spacing.
pub(crate) const ADVANCE_COLS: u32 = 6;
/// Nominal size of builtin text at scale 1.
pub const BUILTIN_FONT_PX: u32 = 10;

type Pattern = [u8; GLYPH_ROWS as usize];

const DIGITS: [Pattern; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

const LETTERS: [Pattern; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
    [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
];

const DASH: Pattern = [0, 0, 0, 0b11111, 0, 0, 0];
const TOFU: Pattern = [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111];

/// Pattern for `ch`; `None` for whitespace.
pub(crate) fn pattern(ch: char) -> Option<&'static Pattern> {
    match ch {
        c if c.is_whitespace() => None,
        '0'..='9' => Some(&DIGITS[(ch as u32 - '0' as u32) as usize]),
        'A'..='Z' => Some(&LETTERS[(ch as u32 - 'A' as u32) as usize]),
        'a'..='z' => Some(&LETTERS[(ch as u32 - 'a' as u32) as usize]),
        '-' => Some(&DASH),
        _ => Some(&TOFU),
    }
}

/// Dot edge length in pixels for a nominal size.
pub(crate) fn dot_px(size_px: u32) -> u32 {
    ((f64::from(size_px) / f64::from(BUILTIN_FONT_PX)).round() as u32).max(1)
}

/// Filled rectangles of `text`, relative to the pen origin on the baseline.
///
/// Horizontal runs of dots within a row are merged into one rectangle.
pub(crate) fn ink_rects(text: &str, size_px: u32) -> Vec<Rect> {
    let dot = f64::from(dot_px(size_px));
    let top = -f64::from(GLYPH_ROWS) * dot;
    let mut out = Vec::new();

    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = pattern(ch) else {
            continue;
        };
        let gx = (i as u32 * ADVANCE_COLS) as f64 * dot;
        for (ry, bits) in rows.iter().enumerate() {
            let y0 = top + ry as f64 * dot;
            let mut col = 0;
            while col < GLYPH_COLS {
                if bits & (1 << (GLYPH_COLS - 1 - col)) == 0 {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < GLYPH_COLS && bits & (1 << (GLYPH_COLS - 1 - col)) != 0 {
                    col += 1;
                }
                out.push(Rect::new(
                    gx + f64::from(start) * dot,
                    y0,
                    gx + f64::from(col) * dot,
                    y0 + dot,
                ));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/builtin.rs"]
mod tests;
