//! Bus sessions: one chip-enable assertion covering a burst of commands and pixel data.

use itertools::repeat_n;

use crate::color::Color;
use crate::command::{BufCommand, Command, Window};
use crate::error::Error;
use crate::interface::{self, Mode};

/// A handle to an open bus session. Chip-enable is asserted for as long as the session lives and
/// is released when it is ended or dropped, including on early return.
///
/// Sessions mutably borrow the display that issued them, so two bursts can never interleave.
pub struct Session<'di, DI>
where
    DI: 'di + interface::DisplayInterface,
{
    iface: &'di mut DI,
    window: &'di mut Option<Window>,
    open: bool,
}

impl<'di, DI> Session<'di, DI>
where
    DI: 'di + interface::DisplayInterface,
{
    /// Assert chip-enable. Only called through `Display`, which owns the window state.
    pub(super) fn begin(
        iface: &'di mut DI,
        window: &'di mut Option<Window>,
    ) -> Result<Self, Error<DI::Error>> {
        iface.select(true)?;
        Ok(Session {
            iface,
            window,
            open: true,
        })
    }

    /// The addressing window the controller is currently filling, if known.
    pub fn window(&self) -> Option<Window> {
        *self.window
    }

    /// Point the controller at `window`. Register select is switched to command mode for the
    /// window command and returned to data mode afterwards.
    pub fn set_window(&mut self, window: Window) -> Result<(), Error<DI::Error>> {
        // Until the command is through, the controller's window is unknown.
        *self.window = None;
        self.iface.set_mode(Mode::Command)?;
        let sent = Command::SetWindow(window).send(self.iface);
        // Register select idles in data mode even when the command fails.
        self.iface.set_mode(Mode::Data)?;
        sent?;
        *self.window = Some(window);
        Ok(())
    }

    /// Write raw 16-bit pixel values into the current window, high byte first. Pixels are drawn
    /// left-to-right and top-to-bottom, wrapping at the window edge.
    pub fn write_pixels<I>(&mut self, pixels: I) -> Result<(), Error<DI::Error>>
    where
        I: IntoIterator<Item = u16>,
    {
        let mut pixels = pixels.into_iter();

        // Paint using constant memory by alternately filling a chunk buffer from the iterator and
        // writing it out.
        let mut buf = [0u8; 32];
        loop {
            let mut chunk_len = 0;
            for slot in buf.chunks_mut(2) {
                match pixels.next() {
                    Some(pixel) => {
                        slot[0] = (pixel >> 8) as u8;
                        slot[1] = (pixel & 0xFF) as u8;
                        chunk_len += 2;
                    }
                    None => break,
                }
            }

            if chunk_len > 0 {
                self.iface.send(&buf[..chunk_len])?;
            }

            // A short chunk means the iterator is exhausted.
            if chunk_len != buf.len() {
                return Ok(());
            }
        }
    }

    /// Write `count` pixels of a single color into the current window.
    pub fn fill(&mut self, color: Color, count: usize) -> Result<(), Error<DI::Error>> {
        self.write_pixels(repeat_n(color.raw(), count))
    }

    /// Send an encoded command. Register select must already be in command mode.
    pub(super) fn command(&mut self, cmd: Command) -> Result<(), Error<DI::Error>> {
        cmd.send(self.iface)
    }

    /// Replay a fixed table. Register select must already be in command mode.
    pub(super) fn replay(&mut self, table: &[u8]) -> Result<(), Error<DI::Error>> {
        BufCommand::Replay(table).send(self.iface)
    }

    /// Release chip-enable, reporting any failure to do so.
    pub fn end(mut self) -> Result<(), Error<DI::Error>> {
        self.open = false;
        self.iface.select(false)?;
        Ok(())
    }
}

impl<'di, DI> Drop for Session<'di, DI>
where
    DI: 'di + interface::DisplayInterface,
{
    fn drop(&mut self) {
        if self.open {
            // Nothing useful can be done with an error here; the burst has already failed.
            let _ = self.iface.select(false);
        }
    }
}
