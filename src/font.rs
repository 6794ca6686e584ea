//! Access to an external bitmap font table.
//!
//! The table holds one 6-byte record per character, starting at ASCII 32 (space). The first byte
//! of a record is the glyph width in columns (at most 5); the following bytes are the columns, left
//! to right, each an 8-bit vertical mask with the most significant bit on the top row.

use core::convert::TryFrom;

/// Bytes per glyph record.
pub const GLYPH_STRIDE: usize = 6;
/// Character code of the first record.
pub const FIRST_CHAR: u32 = 32;
/// Widest glyph a record can describe.
pub const MAX_GLYPH_WIDTH: u8 = (GLYPH_STRIDE - 1) as u8;
/// Height of every glyph, in pixels.
pub const GLYPH_HEIGHT: u8 = 8;

/// A read-only font table.
#[derive(Clone, Copy, Debug)]
pub struct Font<'a> {
    table: &'a [u8],
}

/// One character's columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph<'a> {
    columns: &'a [u8],
}

impl<'a> Font<'a> {
    pub const fn new(table: &'a [u8]) -> Self {
        Font { table }
    }

    /// Look up the glyph for `c`. Returns `None` for characters before space, characters past the
    /// end of the table, and malformed records.
    pub fn glyph(&self, c: char) -> Option<Glyph<'a>> {
        let code = c as u32;
        if code < FIRST_CHAR {
            return None;
        }
        let start = usize::try_from(code - FIRST_CHAR).ok()?.checked_mul(GLYPH_STRIDE)?;
        let width = *self.table.get(start)?;
        if width > MAX_GLYPH_WIDTH {
            return None;
        }
        let columns = self.table.get(start..)?.get(1..1 + width as usize)?;
        Some(Glyph { columns })
    }

    /// On-screen width of `text` in pixels, counting the blank spacing column drawn after every
    /// glyph. Text ends at the first NUL. Returns the first character without a glyph as the
    /// error.
    pub fn text_width(&self, text: &str) -> Result<usize, char> {
        text.chars()
            .take_while(|&c| c != '\0')
            .map(|c| self.glyph(c).map(|g| g.width() as usize + 1).ok_or(c))
            .sum()
    }
}

impl<'a> Glyph<'a> {
    /// Number of visible columns.
    pub fn width(&self) -> u8 {
        self.columns.len() as u8
    }

    /// Column bitmasks, left to right, MSB on top.
    pub fn columns(&self) -> &'a [u8] {
        self.columns
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Space, '!', and '"' from a 5x8 font, followed by a zero-width record for '#'.
    #[cfg_attr(rustfmt, rustfmt_skip)]
    pub(crate) const TABLE: [u8; 24] = [
        3, 0x00, 0x00, 0x00, 0x00, 0x00,
        1, 0xFA, 0x00, 0x00, 0x00, 0x00,
        3, 0xC0, 0x00, 0xC0, 0x00, 0x00,
        0, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn glyph_lookup() {
        let font = Font::new(&TABLE);
        assert_eq!(font.glyph(' ').unwrap().columns(), &[0, 0, 0]);
        assert_eq!(font.glyph('!').unwrap().columns(), &[0xFA]);
        assert_eq!(font.glyph('"').unwrap().width(), 3);
        assert_eq!(font.glyph('#').unwrap().width(), 0);
    }

    #[test]
    fn missing_glyphs() {
        let font = Font::new(&TABLE);
        assert_eq!(font.glyph('\n'), None);
        assert_eq!(font.glyph('$'), None);
        assert_eq!(font.glyph('é'), None);
        assert_eq!(font.glyph(char::MAX), None);

        let bad = [6u8, 1, 2, 3, 4, 5, 6];
        assert_eq!(Font::new(&bad).glyph(' '), None);
        let short = [5u8, 1, 2];
        assert_eq!(Font::new(&short).glyph(' '), None);
    }

    #[test]
    fn text_width() {
        let font = Font::new(&TABLE);
        assert_eq!(font.text_width(""), Ok(0));
        assert_eq!(font.text_width("!"), Ok(2));
        assert_eq!(font.text_width("! \""), Ok(2 + 4 + 4));
        assert_eq!(font.text_width("!\0\"\"\""), Ok(2));
        assert_eq!(font.text_width("!$"), Err('$'));
    }
}
