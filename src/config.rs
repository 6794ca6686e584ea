//! Settings applied by `Display::init`: bring-up timing plus the initial values of registers that
//! can also be changed afterwards.

use crate::command::consts::DEFAULT_CONTRAST;
use crate::command::Command;
use crate::error::Error;

/// A configuration for the display. Builder methods offer a declarative way to override the
/// defaults, which are known to work with the stock module.
pub struct Config {
    pub(crate) reset_hold_ms: u8,
    pub(crate) reset_settle_ms: u8,
    pub(crate) latch_ms: u8,
    pub(crate) ready_ms: u8,
    contrast_cmd: Command,
    start_line_cmd: Option<Command>,
    inverse_screen_cmd: Option<Command>,
}

impl Config {
    /// Create a configuration with contrast 0x1A, a 10ms reset pulse followed by 10ms of settle
    /// time, a 1ms latch pulse between the two setup tables, and a 100ms wait before the display
    /// accepts drawing.
    pub fn new() -> Self {
        Config {
            reset_hold_ms: 10,
            reset_settle_ms: 10,
            latch_ms: 1,
            ready_ms: 100,
            contrast_cmd: Command::SetContrast(DEFAULT_CONTRAST),
            start_line_cmd: None,
            inverse_screen_cmd: None,
        }
    }

    /// Contrast to set at the end of init. See `Command::SetContrast`.
    pub fn contrast(self, contrast: u8) -> Self {
        Self {
            contrast_cmd: Command::SetContrast(contrast),
            ..self
        }
    }

    /// How long to hold /RST asserted. The controller needs at least 10ms.
    pub fn reset_hold_ms(self, ms: u8) -> Self {
        Self {
            reset_hold_ms: ms,
            ..self
        }
    }

    /// How long to wait after releasing /RST before talking to the controller.
    pub fn reset_settle_ms(self, ms: u8) -> Self {
        Self {
            reset_settle_ms: ms,
            ..self
        }
    }

    /// Width of each half of the chip-enable pulse that latches the init sequence.
    pub fn latch_ms(self, ms: u8) -> Self {
        Self { latch_ms: ms, ..self }
    }

    /// How long to wait after configuration before the display is considered ready.
    pub fn ready_ms(self, ms: u8) -> Self {
        Self { ready_ms: ms, ..self }
    }

    /// Extend this `Config` to set the display start line at init. See `Command::SetStartLine`.
    pub fn start_line(self, line: u8) -> Self {
        Self {
            start_line_cmd: Some(Command::SetStartLine(line)),
            ..self
        }
    }

    /// Extend this `Config` to set screen inversion at init. See `Command::SetInverseScreen`.
    pub fn inverted(self, inverted: bool) -> Self {
        Self {
            inverse_screen_cmd: Some(Command::SetInverseScreen(inverted)),
            ..self
        }
    }

    /// Check every command parameter without sending anything, so a bad config is rejected
    /// before the reset pulse.
    pub(crate) fn validate<E>(&self) -> Result<(), Error<E>> {
        let mut buf = [0u8; 10];
        for cmd in self.commands() {
            cmd.encode(&mut buf).map_err(|_| Error::InvalidArgument)?;
        }
        Ok(())
    }

    /// The register commands this configuration applies, in the order they are sent.
    pub(crate) fn commands(&self) -> impl Iterator<Item = Command> {
        Some(self.contrast_cmd)
            .into_iter()
            .chain(self.start_line_cmd)
            .chain(self.inverse_screen_cmd)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::consts::DEFAULT_CONTRAST;

    #[test]
    fn defaults() {
        let cfg = Config::new();
        assert_eq!(cfg.reset_hold_ms, 10);
        assert_eq!(cfg.reset_settle_ms, 10);
        assert_eq!(cfg.latch_ms, 1);
        assert_eq!(cfg.ready_ms, 100);
        assert_eq!(
            cfg.commands().collect::<Vec<_>>(),
            vec![Command::SetContrast(DEFAULT_CONTRAST)]
        );
    }

    #[test]
    fn optional_commands_follow_contrast() {
        let cfg = Config::new().inverted(true).contrast(40).start_line(8);
        assert_eq!(
            cfg.commands().collect::<Vec<_>>(),
            vec![
                Command::SetContrast(40),
                Command::SetStartLine(8),
                Command::SetInverseScreen(true),
            ]
        );
    }

    #[test]
    fn validate() {
        assert_eq!(Config::new().validate::<()>(), Ok(()));
        assert_eq!(Config::new().contrast(128).validate::<()>(), Err(Error::InvalidArgument));
        assert_eq!(Config::new().start_line(80).validate::<()>(), Err(Error::InvalidArgument));
    }
}
