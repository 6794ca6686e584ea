//! Filled and outlined shapes, bitmaps, pixels, and lines.
//!
//! Every operation validates its whole extent before the bus is touched and then runs as a single
//! bus session.

use log::trace;

use crate::color::Color;
use crate::command::consts::*;
use crate::command::Window;
use crate::display::line::Bresenham;
use crate::display::Display;
use crate::error::Error;
use crate::interface;

fn window<E>(x: u8, y: u8, width: u8, height: u8) -> Result<Window, Error<E>> {
    Window::new(x, y, width, height).ok_or(Error::OutOfBounds)
}

fn on_panel(x: u8, y: u8) -> bool {
    x < NUM_PIXEL_COLS && y < NUM_PIXEL_ROWS
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Fill the whole panel with `color`.
    pub fn clear(&mut self, color: Color) -> Result<(), Error<DI::Error>> {
        trace!("clear {:?}", color);
        self.fill_window(Window::FULL, core::iter::repeat(color.raw()))
    }

    /// Stream raw 16-bit pixel values into `window`, left-to-right and top-to-bottom. At most
    /// `window.area()` values are taken from `pixels`.
    pub fn fill_window<I>(&mut self, window: Window, pixels: I) -> Result<(), Error<DI::Error>>
    where
        I: IntoIterator<Item = u16>,
    {
        let mut session = self.session()?;
        session.set_window(window)?;
        session.write_pixels(pixels.into_iter().take(window.area()))?;
        session.end()
    }

    /// Fill a rectangle with `color`.
    pub fn fill_rect(
        &mut self,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
        color: Color,
    ) -> Result<(), Error<DI::Error>> {
        let w = window(x, y, width, height)?;
        trace!("fill_rect {:?} {:?}", w, color);
        let mut session = self.session()?;
        session.set_window(w)?;
        session.fill(color, w.area())?;
        session.end()
    }

    /// Draw a one pixel wide rectangle outline. The edges are drawn as four separate windows (top,
    /// bottom, left, right), so the corners are written twice.
    pub fn draw_rect(
        &mut self,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
        color: Color,
    ) -> Result<(), Error<DI::Error>> {
        let outline = window(x, y, width, height)?;
        trace!("draw_rect {:?} {:?}", outline, color);
        let edges = [
            window(x, y, width, 1)?,
            window(x, y + height - 1, width, 1)?,
            window(x, y, 1, height)?,
            window(x + width - 1, y, 1, height)?,
        ];
        let mut session = self.session()?;
        for edge in edges.iter() {
            session.set_window(*edge)?;
            session.fill(color, edge.area())?;
        }
        session.end()
    }

    /// Draw a bitmap of pre-packed `0x0RGB` pixels, row by row, with its upper left corner at
    /// `(x, y)`. `bitmap` may be a caller-owned buffer or a `'static` table; only its first
    /// `width * height` entries are used.
    pub fn draw_bitmap(
        &mut self,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
        bitmap: &[u16],
    ) -> Result<(), Error<DI::Error>> {
        let w = window(x, y, width, height)?;
        if bitmap.len() < w.area() {
            return Err(Error::BufferSize);
        }
        trace!("draw_bitmap {:?}", w);
        self.fill_window(w, bitmap.iter().copied())
    }

    /// Set a single pixel. Each pixel costs a full window command, so prefer `draw_pixels` for
    /// more than a handful.
    pub fn draw_pixel(&mut self, x: u8, y: u8, color: Color) -> Result<(), Error<DI::Error>> {
        let w = window(x, y, 1, 1)?;
        let mut session = self.session()?;
        session.set_window(w)?;
        session.fill(color, 1)?;
        session.end()
    }

    /// Set many pixels in one bus session. The bytes sent for each pixel are the same as for
    /// `draw_pixel`. Pixels that fall off the panel are skipped.
    pub fn draw_pixels<I>(&mut self, pixels: I) -> Result<(), Error<DI::Error>>
    where
        I: IntoIterator<Item = (u8, u8, Color)>,
    {
        let mut session = self.session()?;
        for (x, y, color) in pixels {
            if let Some(w) = Window::new(x, y, 1, 1) {
                session.set_window(w)?;
                session.fill(color, 1)?;
            }
        }
        session.end()
    }

    /// Draw a straight line between two points, both inclusive. Horizontal and vertical lines are
    /// drawn as a single window; anything else is rasterized pixel by pixel.
    pub fn draw_line(
        &mut self,
        x1: u8,
        y1: u8,
        x2: u8,
        y2: u8,
        color: Color,
    ) -> Result<(), Error<DI::Error>> {
        if !on_panel(x1, y1) || !on_panel(x2, y2) {
            return Err(Error::OutOfBounds);
        }
        trace!("draw_line ({}, {}) -> ({}, {}) {:?}", x1, y1, x2, y2, color);

        if y1 == y2 || x1 == x2 {
            let w = window(
                x1.min(x2),
                y1.min(y2),
                x1.max(x2) - x1.min(x2) + 1,
                y1.max(y2) - y1.min(y2) + 1,
            )?;
            let mut session = self.session()?;
            session.set_window(w)?;
            session.fill(color, w.area())?;
            return session.end();
        }

        self.draw_pixels(Bresenham::new((x1, y1), (x2, y2)).map(|(x, y)| (x, y, color)))
    }
}
