//! The main API to the display driver. It brings the controller up, issues the single-shot
//! control commands, and provides drawing operations built on bus `Session`s.

// This has to be here in order to be usable by mods declared afterwards.
#[cfg(test)]
#[macro_use]
pub mod testing {
    macro_rules! sends {
        ($($kind:ident [$($d:expr),* $(,)?]),* $(,)?) => {
            vec![$(Sent::$kind(vec![$($d),*])),*]
        };
    }
}

pub mod draw;
pub mod line;
pub mod session;
pub mod text;

use log::debug;

use crate::command::consts::*;
use crate::command::{Command, InverseMode, Window};
use crate::config::Config;
use crate::error::Error;
use crate::hal::blocking::delay::DelayMs;
use crate::interface::{self, Mode};

pub use self::session::Session;

/// Controller bring-up progress. `Display::init` walks through these in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Nothing has been sent since the driver was constructed.
    Unpowered,
    /// The reset pulse is in progress.
    Reset,
    /// The vendor init sequence is being streamed.
    BringUp,
    /// The setup sequence has been applied; configured registers are being written.
    Configured,
    /// The display accepts drawing and control commands.
    Ready,
}

/// A driver for an LM15SGFNZ07 display.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    lifecycle: Lifecycle,
    window: Option<Window>,
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver connected to the interface `iface`. Nothing is sent until
    /// `init`.
    pub fn new(iface: DI) -> Self {
        Display {
            iface,
            lifecycle: Lifecycle::Unpowered,
            window: None,
        }
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The addressing window last set on the controller, or `None` if it is unknown (before init,
    /// or after a failed window command).
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Reset the controller and bring it up with `config`. Blocks for roughly 120ms with the
    /// default timings. May be called again to recover a display in an unknown state.
    pub fn init<DELAY>(&mut self, config: Config, delay: &mut DELAY) -> Result<(), Error<DI::Error>>
    where
        DELAY: DelayMs<u8>,
    {
        config.validate()?;
        self.lifecycle = Lifecycle::Unpowered;
        self.window = None;

        // Idle all three lines, then pulse reset.
        self.iface.select(false)?;
        self.iface.reset(false)?;
        self.iface.set_mode(Mode::Data)?;
        self.transition(Lifecycle::Reset);
        self.iface.reset(true)?;
        delay.delay_ms(config.reset_hold_ms);
        self.iface.reset(false)?;
        delay.delay_ms(config.reset_settle_ms);

        self.transition(Lifecycle::BringUp);
        self.iface.set_mode(Mode::Command)?;
        let mut session = self.open()?;
        session.replay(&INIT_SEQUENCE)?;
        // The controller latches the init sequence on a chip-enable cycle.
        delay.delay_ms(config.latch_ms);
        session.end()?;
        delay.delay_ms(config.latch_ms);
        let mut session = self.open()?;
        session.replay(&SETUP_SEQUENCE)?;
        session.end()?;
        self.iface.set_mode(Mode::Data)?;
        // The setup sequence leaves the whole panel addressed.
        self.window = Some(Window::FULL);

        self.transition(Lifecycle::Configured);
        for cmd in config.commands() {
            self.command(cmd)?;
        }
        delay.delay_ms(config.ready_ms);
        self.transition(Lifecycle::Ready);
        Ok(())
    }

    /// Open a bus session for a custom burst. The session mutably borrows the display so clashing
    /// writes are prevented.
    pub fn session(&mut self) -> Result<Session<'_, DI>, Error<DI::Error>> {
        self.check_ready()?;
        self.open()
    }

    /// Set the contrast, in the range 0-127.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<DI::Error>> {
        self.check_ready()?;
        self.command(Command::SetContrast(contrast))
    }

    /// Turn the panel on or off. Display RAM is preserved while off.
    pub fn set_lcd_on(&mut self, on: bool) -> Result<(), Error<DI::Error>> {
        self.check_ready()?;
        self.command(Command::SetLcdOn(on))
    }

    /// Invert the whole panel.
    pub fn inverse_screen(&mut self, inverse: bool) -> Result<(), Error<DI::Error>> {
        self.check_ready()?;
        self.command(Command::SetInverseScreen(inverse))
    }

    /// Choose which RAM row is shown on the top line, in the range 0-79. Content above it wraps
    /// around to the bottom.
    pub fn set_start_line(&mut self, line: u8) -> Result<(), Error<DI::Error>> {
        self.check_ready()?;
        self.command(Command::SetStartLine(line))
    }

    /// Apply `mode` to `height` rows starting at row `y`.
    pub fn set_inverse_lines(
        &mut self,
        y: u8,
        height: u8,
        mode: InverseMode,
    ) -> Result<(), Error<DI::Error>> {
        self.check_ready()?;
        self.command(Command::SetInverseLines(y, height, mode))
    }

    /// Set the addressing window on its own. Pixel data written afterwards in a `session` fills it.
    pub fn set_window(
        &mut self,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
    ) -> Result<(), Error<DI::Error>> {
        let window = Window::new(x, y, width, height).ok_or(Error::OutOfBounds)?;
        let mut session = self.session()?;
        session.set_window(window)?;
        session.end()
    }

    fn check_ready(&self) -> Result<(), Error<DI::Error>> {
        match self.lifecycle {
            Lifecycle::Ready => Ok(()),
            _ => Err(Error::NotReady),
        }
    }

    fn transition(&mut self, to: Lifecycle) {
        debug!("lcd: {:?} -> {:?}", self.lifecycle, to);
        self.lifecycle = to;
    }

    /// Assert chip-enable without checking the lifecycle.
    fn open(&mut self) -> Result<Session<'_, DI>, Error<DI::Error>> {
        Session::begin(&mut self.iface, &mut self.window)
    }

    /// Send one command as its own burst: register select goes to command mode before chip-enable
    /// is asserted and back to data mode after it is released. The command is checked before any
    /// line moves.
    fn command(&mut self, cmd: Command) -> Result<(), Error<DI::Error>> {
        let mut buf = [0u8; 10];
        cmd.encode(&mut buf).map_err(|_| Error::InvalidArgument)?;
        self.iface.set_mode(Mode::Command)?;
        let sent = self.open().and_then(|mut session| {
            session.command(cmd)?;
            session.end()
        });
        self.iface.set_mode(Mode::Data)?;
        sent
    }
}
