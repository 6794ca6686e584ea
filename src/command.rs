//! The command set for the LM15SGFNZ07.
//!
//! Note 1: Commands are nibble oriented. The high nibble of each byte is either an opcode
//! (`0xF0`-`0xF5`) selecting a register bank, or a register tag identifying which half of which
//! parameter the low nibble carries. Eight-bit parameters therefore travel as two bytes, low
//! nibble first.
//!
//! Note 2: The column address register counts in half pixels offset by 6, so pixel column `x`
//! starts at address `2x + 6` and ends at `2x + 7`.

use crate::interface::DisplayInterface;

pub mod consts {
    //! Panel geometry and the fixed controller bring-up tables.

    pub const NUM_PIXEL_COLS: u8 = 101;
    pub const NUM_PIXEL_ROWS: u8 = 80;
    pub const NUM_PIXELS: usize = NUM_PIXEL_COLS as usize * NUM_PIXEL_ROWS as usize;
    pub const PIXEL_COL_MAX: u8 = NUM_PIXEL_COLS - 1;
    pub const PIXEL_ROW_MAX: u8 = NUM_PIXEL_ROWS - 1;
    pub const CONTRAST_MAX: u8 = 127;
    pub const DEFAULT_CONTRAST: u8 = 0x1A;

    /// Register bank opcodes.
    pub const BANK_0: u8 = 0xF0;
    pub const BANK_4: u8 = 0xF4;
    pub const BANK_5: u8 = 0xF5;

    /// Vendor register initialization, streamed in command mode directly after reset.
    #[cfg_attr(rustfmt, rustfmt_skip)]
    pub const INIT_SEQUENCE: [u8; 139] = [
        0xF4, 0x90, 0xB3, 0xA0, 0xD0, 0xF0, 0xE2, 0xD4, 0x70, 0x66,
        0xB2, 0xBA, 0xA1, 0xA3, 0xAB, 0x94, 0x95, 0x95, 0x95, 0xF5,
        0x90, 0xF1, 0x00, 0x10, 0x22, 0x30, 0x45, 0x50, 0x68, 0x70,
        0x8A, 0x90, 0xAC, 0xB0, 0xCE, 0xD0, 0xF2, 0x0F, 0x10, 0x20,
        0x30, 0x43, 0x50, 0x66, 0x70, 0x89, 0x90, 0xAB, 0xB0, 0xCD,
        0xD0, 0xF3, 0x0E, 0x10, 0x2F, 0x30, 0x40, 0x50, 0x64, 0x70,
        0x87, 0x90, 0xAA, 0xB0, 0xCB, 0xD0, 0xF4, 0x0D, 0x10, 0x2E,
        0x30, 0x4F, 0x50, 0xF5, 0x91, 0xF1, 0x01, 0x11, 0x22, 0x31,
        0x43, 0x51, 0x64, 0x71, 0x86, 0x91, 0xA8, 0xB1, 0xCB, 0xD1,
        0xF2, 0x0F, 0x11, 0x21, 0x31, 0x42, 0x51, 0x63, 0x71, 0x85,
        0x91, 0xA6, 0xB1, 0xC8, 0xD1, 0xF3, 0x0B, 0x11, 0x2F, 0x31,
        0x41, 0x51, 0x62, 0x71, 0x83, 0x91, 0xA4, 0xB1, 0xC6, 0xD1,
        0xF4, 0x08, 0x11, 0x2B, 0x31, 0x4F, 0x51, 0x80, 0x94, 0xF5,
        0xA2, 0xF4, 0x60, 0xF0, 0x40, 0x50, 0xC0, 0xF4, 0x70
    ];

    /// Operating mode setup, streamed after the init sequence has been latched. It also leaves
    /// the addressing window covering the full panel.
    #[cfg_attr(rustfmt, rustfmt_skip)]
    pub const SETUP_SEQUENCE: [u8; 19] = [
        0xF0, 0x81, 0xF4, 0xB3, 0xA0, 0xF0, 0x06, 0x10, 0x20, 0x30,
        0xF5, 0x0F, 0x1C, 0x2F, 0x34, 0xF0, 0x91, 0xF5, 0x80
    ];
}

use self::consts::*;

use crate::error::Error;

/// A rectangular addressing window on the panel. Once a window is set, pixel data fills it left
/// to right, top to bottom, wrapping at the right edge.
///
/// A `Window` always lies entirely within the 101x80 panel and is never empty; the constructor
/// refuses anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    x: u8,
    y: u8,
    width: u8,
    height: u8,
}

impl Window {
    /// The whole panel.
    pub const FULL: Window = Window {
        x: 0,
        y: 0,
        width: NUM_PIXEL_COLS,
        height: NUM_PIXEL_ROWS,
    };

    /// Construct a window with upper left corner `(x, y)`. Returns `None` if the window is empty
    /// or does not fit on the panel.
    pub fn new(x: u8, y: u8, width: u8, height: u8) -> Option<Self> {
        if false
            || width == 0
            || height == 0
            || x as u16 + width as u16 > NUM_PIXEL_COLS as u16
            || y as u16 + height as u16 > NUM_PIXEL_ROWS as u16
        {
            return None;
        }
        Some(Window {
            x,
            y,
            width,
            height,
        })
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of pixels the controller expects before the window wraps back to its start.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Start and end column addresses (Note 2).
    fn column_addresses(&self) -> (u8, u8) {
        let start = (self.x << 1) + 6;
        let end = ((self.x + self.width - 1) << 1) + 7;
        (start, end)
    }

    fn row_addresses(&self) -> (u8, u8) {
        (self.y, self.y + self.height - 1)
    }
}

/// Line inversion function for `Command::SetInverseLines`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InverseMode {
    /// Lines are shown normally.
    Off = 0x00,
    /// Lines are shown in negative.
    On = 0x01,
    /// Lines alternate between positive and negative.
    Blink = 0x03,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Set the addressing window and move the write pointer to its upper left corner.
    SetWindow(Window),
    /// Set the contrast. Range is 0-127; 0x1A is a good value for most modules.
    SetContrast(u8),
    /// Turn the panel on or off. Display RAM is preserved while off.
    SetLcdOn(bool),
    /// Invert the whole panel.
    SetInverseScreen(bool),
    /// Set which display RAM row is shown on the top line of the panel; rows above it wrap to the
    /// bottom. Range is 0-79.
    SetStartLine(u8),
    /// Apply an inversion function to `height` rows starting at row `y`. The rows must lie on the
    /// panel and `height` must be at least 1.
    SetInverseLines(u8, u8, InverseMode),
}

macro_rules! ok_command {
    ($buf:ident, [$($arg:expr),*]) => {{
        let mut n = 0;
        $(
            $buf[n] = $arg;
            n += 1;
        )*
        Ok(&$buf[..n])
    }};
}

/// Low nibble of `v` tagged with register `tag`.
fn lo(tag: u8, v: u8) -> u8 {
    tag | (v & 0x0F)
}

/// High nibble of `v` tagged with register `tag`.
fn hi(tag: u8, v: u8) -> u8 {
    tag | (v >> 4)
}

impl Command {
    /// Encode the command into `buf`, returning the slice of `buf` holding the bytes to send in
    /// command mode. Out-of-range parameters yield `Err(())` and leave nothing to send.
    pub fn encode(self, buf: &mut [u8; 10]) -> Result<&[u8], ()> {
        match self {
            Command::SetWindow(window) => {
                let (x_start, x_end) = window.column_addresses();
                let (y_start, y_end) = window.row_addresses();
                ok_command!(buf, [
                    BANK_0, lo(0x00, x_start), hi(0x10, x_start), lo(0x20, y_start), hi(0x30, y_start),
                    BANK_5, lo(0x00, x_end), hi(0x10, x_end), lo(0x20, y_end), hi(0x30, y_end)
                ])
            }
            Command::SetContrast(contrast) => match contrast {
                0..=CONTRAST_MAX => ok_command!(buf, [BANK_4, hi(0xB0, contrast), lo(0xA0, contrast)]),
                _ => Err(()),
            },
            Command::SetLcdOn(on) => ok_command!(buf, [BANK_0, 0x80 | on as u8]),
            Command::SetInverseScreen(inverse) => ok_command!(
                buf,
                [
                    BANK_0,
                    match inverse {
                        true => 0x99,
                        false => 0x91,
                    }
                ]
            ),
            Command::SetStartLine(line) => match line {
                0..=PIXEL_ROW_MAX => ok_command!(buf, [BANK_0, lo(0x40, line), hi(0x50, line)]),
                _ => Err(()),
            },
            Command::SetInverseLines(y, height, mode) => {
                if height == 0 || y as u16 + height as u16 > NUM_PIXEL_ROWS as u16 {
                    return Err(());
                }
                let end = y + height - 1;
                ok_command!(buf, [
                    BANK_5, lo(0x40, y), hi(0x50, y),
                    BANK_5, lo(0x60, end), hi(0x70, end),
                    BANK_5, 0x80 | mode as u8
                ])
            }
        }
    }

    /// Transmit the encoded command. The interface must already be selected and in command mode.
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let mut buf = [0u8; 10];
        let bytes = self.encode(&mut buf).map_err(|_| Error::InvalidArgument)?;
        iface.send(bytes)?;
        Ok(())
    }
}

pub enum BufCommand<'buf> {
    /// Replay a fixed register table verbatim, such as `consts::INIT_SEQUENCE`.
    Replay(&'buf [u8]),
}

impl<'a> BufCommand<'a> {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        match self {
            BufCommand::Replay(table) => iface.send(table)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::TestSpyInterface;

    fn encoded(cmd: Command) -> Result<Vec<u8>, ()> {
        let mut buf = [0u8; 10];
        cmd.encode(&mut buf).map(|b| b.to_vec())
    }

    #[test]
    fn window_bounds() {
        assert!(Window::new(0, 0, 101, 80).is_some());
        assert!(Window::new(100, 79, 1, 1).is_some());
        assert!(Window::new(0, 0, 102, 80).is_none());
        assert!(Window::new(0, 0, 101, 81).is_none());
        assert!(Window::new(100, 0, 2, 1).is_none());
        assert!(Window::new(0, 79, 1, 2).is_none());
        assert!(Window::new(10, 10, 0, 5).is_none());
        assert!(Window::new(10, 10, 5, 0).is_none());
        assert!(Window::new(255, 255, 255, 255).is_none());
        assert_eq!(Window::new(0, 0, 101, 80), Some(Window::FULL));
        assert_eq!(Window::FULL.area(), NUM_PIXELS);
    }

    #[test]
    fn set_window_full_panel() {
        // Same bytes the setup table uses to select the whole panel.
        assert_eq!(
            encoded(Command::SetWindow(Window::FULL)).unwrap(),
            vec![0xF0, 0x06, 0x10, 0x20, 0x30, 0xF5, 0x0F, 0x1C, 0x2F, 0x34]
        );
        assert_eq!(&SETUP_SEQUENCE[5..15], &encoded(Command::SetWindow(Window::FULL)).unwrap()[..]);
    }

    #[test]
    fn set_window_single_pixel() {
        // x = 12: start 30 (0x1E), end 31 (0x1F). y = 40 (0x28).
        let w = Window::new(12, 40, 1, 1).unwrap();
        assert_eq!(
            encoded(Command::SetWindow(w)).unwrap(),
            vec![0xF0, 0x0E, 0x11, 0x28, 0x32, 0xF5, 0x0F, 0x11, 0x28, 0x32]
        );
    }

    #[test]
    fn set_window_follows_address_law() {
        for &(x, y, width, height) in &[(0, 0, 1, 1), (3, 7, 20, 9), (50, 40, 51, 40), (100, 0, 1, 80)] {
            let w = Window::new(x, y, width, height).unwrap();
            let bytes = encoded(Command::SetWindow(w)).unwrap();
            let x_start = (x as u16 * 2 + 6) as u8;
            let x_end = ((x as u16 + width as u16 - 1) * 2 + 7) as u8;
            let y_end = y + height - 1;
            assert_eq!(bytes.len(), 10);
            assert_eq!(bytes[0], 0xF0);
            assert_eq!(bytes[5], 0xF5);
            assert_eq!((bytes[1] & 0x0F) | (bytes[2] & 0x0F) << 4, x_start);
            assert_eq!((bytes[3] & 0x0F) | (bytes[4] & 0x0F) << 4, y);
            assert_eq!((bytes[6] & 0x0F) | (bytes[7] & 0x0F) << 4, x_end);
            assert_eq!((bytes[8] & 0x0F) | (bytes[9] & 0x0F) << 4, y_end);
            for (i, tag) in [0x00u8, 0x10, 0x20, 0x30].iter().enumerate() {
                assert_eq!(bytes[1 + i] & 0xF0, *tag);
                assert_eq!(bytes[6 + i] & 0xF0, *tag);
            }
            // Pure function of the window.
            assert_eq!(encoded(Command::SetWindow(w)).unwrap(), bytes);
        }
    }

    #[test]
    fn set_contrast() {
        assert_eq!(encoded(Command::SetContrast(0x1A)).unwrap(), vec![0xF4, 0xB1, 0xAA]);
        assert_eq!(encoded(Command::SetContrast(0)).unwrap(), vec![0xF4, 0xB0, 0xA0]);
        assert_eq!(encoded(Command::SetContrast(127)).unwrap(), vec![0xF4, 0xB7, 0xAF]);
        assert_eq!(encoded(Command::SetContrast(128)), Err(()));
    }

    #[test]
    fn set_lcd_on() {
        assert_eq!(encoded(Command::SetLcdOn(true)).unwrap(), vec![0xF0, 0x81]);
        assert_eq!(encoded(Command::SetLcdOn(false)).unwrap(), vec![0xF0, 0x80]);
    }

    #[test]
    fn set_inverse_screen() {
        assert_eq!(encoded(Command::SetInverseScreen(true)).unwrap(), vec![0xF0, 0x99]);
        assert_eq!(encoded(Command::SetInverseScreen(false)).unwrap(), vec![0xF0, 0x91]);
    }

    #[test]
    fn set_start_line() {
        assert_eq!(encoded(Command::SetStartLine(0)).unwrap(), vec![0xF0, 0x40, 0x50]);
        assert_eq!(encoded(Command::SetStartLine(79)).unwrap(), vec![0xF0, 0x4F, 0x54]);
        assert_eq!(encoded(Command::SetStartLine(80)), Err(()));
    }

    #[test]
    fn set_inverse_lines() {
        assert_eq!(
            encoded(Command::SetInverseLines(10, 8, InverseMode::On)).unwrap(),
            vec![0xF5, 0x4A, 0x50, 0xF5, 0x61, 0x71, 0xF5, 0x81]
        );
        assert_eq!(
            encoded(Command::SetInverseLines(0, 80, InverseMode::Blink)).unwrap(),
            vec![0xF5, 0x40, 0x50, 0xF5, 0x6F, 0x74, 0xF5, 0x83]
        );
        assert_eq!(
            encoded(Command::SetInverseLines(79, 1, InverseMode::Off)).unwrap(),
            vec![0xF5, 0x4F, 0x54, 0xF5, 0x6F, 0x74, 0xF5, 0x80]
        );
        assert_eq!(encoded(Command::SetInverseLines(10, 0, InverseMode::On)), Err(()));
        assert_eq!(encoded(Command::SetInverseLines(79, 2, InverseMode::On)), Err(()));
        assert_eq!(encoded(Command::SetInverseLines(200, 100, InverseMode::On)), Err(()));
    }

    #[test]
    fn send_rejects_without_traffic() {
        let mut di = TestSpyInterface::new();
        assert_eq!(Command::SetContrast(200).send(&mut di), Err(Error::InvalidArgument));
        assert!(di.events().is_empty());
        Command::SetContrast(0x1A).send(&mut di).unwrap();
        assert_eq!(di.bytes(), vec![0xF4, 0xB1, 0xAA]);
    }

    #[test]
    fn replay_is_verbatim() {
        let mut di = TestSpyInterface::new();
        BufCommand::Replay(&INIT_SEQUENCE).send(&mut di).unwrap();
        assert_eq!(di.bytes(), INIT_SEQUENCE.to_vec());
    }

    #[test]
    fn table_shapes() {
        assert_eq!(INIT_SEQUENCE.len(), 139);
        assert_eq!(SETUP_SEQUENCE.len(), 19);
        assert_eq!(&INIT_SEQUENCE[..5], &[0xF4, 0x90, 0xB3, 0xA0, 0xD0]);
        assert_eq!(&INIT_SEQUENCE[134..], &[0x40, 0x50, 0xC0, 0xF4, 0x70]);
    }
}
