//! Text rendering from a column-major bitmap font.

use core::iter;

use log::trace;

use crate::color::Color;
use crate::command::consts::*;
use crate::command::Window;
use crate::display::Display;
use crate::error::Error;
use crate::font::{Font, GLYPH_HEIGHT};
use crate::interface;

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Draw `text` with its upper left corner at `(x, y)`. Each glyph is drawn one 1x8 column at a
    /// time, set bits in `color` and clear bits in `background`, followed by a blank column of
    /// `background`. Text ends at the first NUL.
    ///
    /// The whole string must fit on the panel, spacing column included, and every character must
    /// have a glyph; otherwise nothing is drawn.
    pub fn draw_string(
        &mut self,
        font: &Font,
        text: &str,
        x: u8,
        y: u8,
        color: Color,
        background: Color,
    ) -> Result<(), Error<DI::Error>> {
        let width = font.text_width(text).map_err(Error::MissingGlyph)?;
        if false
            || x as usize + width > NUM_PIXEL_COLS as usize
            || y as u16 + GLYPH_HEIGHT as u16 > NUM_PIXEL_ROWS as u16
        {
            return Err(Error::OutOfBounds);
        }
        if width == 0 {
            return Ok(());
        }
        trace!("draw_string {:?} at ({}, {})", text, x, y);

        let mut session = self.session()?;
        let mut column_x = x;
        for c in text.chars().take_while(|&c| c != '\0') {
            let glyph = font.glyph(c).ok_or(Error::MissingGlyph(c))?;
            // A zero bitmask is an all-background column, which is exactly the spacing column.
            let columns = glyph.columns().iter().copied().chain(iter::once(0));
            for bits in columns {
                let window = Window::new(column_x, y, 1, GLYPH_HEIGHT).ok_or(Error::OutOfBounds)?;
                session.set_window(window)?;
                session.write_pixels((0..GLYPH_HEIGHT).map(|row| {
                    match bits & (0x80 >> row) {
                        0 => background.raw(),
                        _ => color.raw(),
                    }
                }))?;
                column_x += 1;
            }
        }
        session.end()
    }
}
