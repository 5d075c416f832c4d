//! HUD text and bitmap-font layout.
//!
//! The font is a single strip of 3-pixel-wide glyphs in the order of
//! [`ALPHABET`]. Characters outside the alphabet draw nothing and pull the
//! next glyph one pixel left, so pairs like `"n..n"` squeeze into wider
//! letters the font lacks.

/// Glyph order in the font strip.
pub const ALPHABET: &str = "naobpcdresftguhvijkxlyz0123456789: ";

/// Glyph width in font pixels.
pub const GLYPH_WIDTH: i32 = 3;

/// Horizontal advance after a drawn glyph.
pub const GLYPH_ADVANCE: i32 = GLYPH_WIDTH + 1;

/// Index of `c` in the font strip, case-insensitively.
pub fn glyph_index(c: char) -> Option<usize> {
    let lower = c.to_ascii_lowercase();
    ALPHABET.chars().position(|g| g == lower)
}

/// A glyph placed on a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedGlyph {
    pub glyph: usize,
    /// Left edge in font pixels from the start of the line.
    pub x: i32,
}

/// Lay out one line of text.
pub fn layout(text: &str) -> Vec<PlacedGlyph> {
    let mut x = 0;
    let mut placed = Vec::with_capacity(text.len());
    for c in text.chars() {
        match glyph_index(c) {
            Some(glyph) => {
                placed.push(PlacedGlyph { glyph, x });
                x += GLYPH_ADVANCE;
            }
            None => x -= 1,
        }
    }
    placed
}

/// Zero-pad `value` to `width` digits. Longer values keep only their last
/// `width` digits.
pub fn pad(value: u32, width: usize) -> String {
    let digits = format!("{value:0width$}");
    let skip = digits.len().saturating_sub(width);
    digits[skip..].to_string()
}

/// The level counter, e.g. `"day 03"`.
pub fn day_text(day: u32) -> String {
    format!("day {}", pad(day, 2))
}

/// The score readout under its `"score"` label.
pub fn score_text(score: u32) -> String {
    pad(score, 4)
}

/// The high-score readout under its `"high"` label.
pub fn high_text(high: u32) -> String {
    pad(high, 4)
}

/// Lines of the game-over screen, top to bottom.
pub fn game_over_lines(score: u32) -> [String; 4] {
    [
        "  ...gan..ne over".to_string(),
        format!("     .{}", pad(score, 3)),
        "      joeys rescued".to_string(),
        "    tap to try again".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_follow_alphabet() {
        assert_eq!(glyph_index('n'), Some(0));
        assert_eq!(glyph_index('A'), Some(1));
        assert_eq!(glyph_index('0'), Some(23));
        assert_eq!(glyph_index(' '), Some(34));
        assert_eq!(glyph_index('.'), None);
        assert_eq!(glyph_index('m'), None);
    }

    #[test]
    fn unknown_chars_pull_left() {
        let placed = layout("n..n");
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].x, 0);
        assert_eq!(placed[1].x, 2);
    }

    #[test]
    fn padding_keeps_last_digits() {
        assert_eq!(pad(7, 4), "0007");
        assert_eq!(pad(1234, 4), "1234");
        assert_eq!(pad(12345, 4), "2345");
        assert_eq!(pad(0, 2), "00");
    }

    #[test]
    fn hud_strings() {
        assert_eq!(day_text(3), "day 03");
        assert_eq!(score_text(90), "0090");
        assert_eq!(high_text(0), "0000");
        assert_eq!(game_over_lines(5)[1], "     .005");
    }
}
