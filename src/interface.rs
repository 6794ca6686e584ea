//! The physical connection to the controller: a byte-oriented serial bus plus the chip-enable,
//! reset, and register-select lines.

/// Register-select state, which tells the controller how to interpret the bytes that follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Bytes are opcodes and nibble-tagged register values.
    Command,
    /// Bytes are pixel data for the current window.
    Data,
}

pub trait DisplayInterface {
    type Error;

    /// Assert (`true`) or deassert the chip-enable line.
    fn select(&mut self, enabled: bool) -> Result<(), Self::Error>;
    /// Assert (`true`) or release the reset line.
    fn reset(&mut self, asserted: bool) -> Result<(), Self::Error>;
    /// Drive the register-select line.
    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error>;
    /// Clock out `buf` back to back. Nothing is read back.
    fn send(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

pub mod spi {
    //! Interface over an 8-bit SPI master with three GPIO control lines. The controller has no
    //! data output, so received bytes are discarded.

    use crate::hal;

    use super::{DisplayInterface, Mode};

    /// Assignment of GPIO output pins to controller roles.
    pub struct ControlPins<CS, RST, RS> {
        /// Connected to /CS (LCD pin 1). Active low.
        pub chip_enable: CS,
        /// Connected to /RST (LCD pin 2). Active low.
        pub reset: RST,
        /// Connected to RS (LCD pin 3). High selects command mode.
        pub register_select: RS,
    }

    /// Either the SPI master or one of the control pins failed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum InterfaceError<SpiE, PinE> {
        Spi(SpiE),
        Pin(PinE),
    }

    pub struct SpiInterface<SPI, CS, RST, RS> {
        /// The SPI master device connected to the LCD's Sclk and Sdata pins.
        spi: SPI,
        pins: ControlPins<CS, RST, RS>,
    }

    impl<SPI, CS, RST, RS, PinE> SpiInterface<SPI, CS, RST, RS>
    where
        SPI: hal::blocking::spi::Transfer<u8>,
        CS: hal::digital::v2::OutputPin<Error = PinE>,
        RST: hal::digital::v2::OutputPin<Error = PinE>,
        RS: hal::digital::v2::OutputPin<Error = PinE>,
    {
        /// Create a new interface from an SPI master already configured for 8-bit words and a set
        /// of pins already configured as push-pull outputs.
        pub fn new(spi: SPI, pins: ControlPins<CS, RST, RS>) -> Self {
            Self { spi, pins }
        }

        /// Give back the SPI master and pins.
        pub fn release(self) -> (SPI, ControlPins<CS, RST, RS>) {
            (self.spi, self.pins)
        }
    }

    impl<SPI, CS, RST, RS, PinE> DisplayInterface for SpiInterface<SPI, CS, RST, RS>
    where
        SPI: hal::blocking::spi::Transfer<u8>,
        CS: hal::digital::v2::OutputPin<Error = PinE>,
        RST: hal::digital::v2::OutputPin<Error = PinE>,
        RS: hal::digital::v2::OutputPin<Error = PinE>,
    {
        type Error = InterfaceError<SPI::Error, PinE>;

        fn select(&mut self, enabled: bool) -> Result<(), Self::Error> {
            let res = match enabled {
                true => self.pins.chip_enable.set_low(),
                false => self.pins.chip_enable.set_high(),
            };
            res.map_err(InterfaceError::Pin)
        }

        fn reset(&mut self, asserted: bool) -> Result<(), Self::Error> {
            let res = match asserted {
                true => self.pins.reset.set_low(),
                false => self.pins.reset.set_high(),
            };
            res.map_err(InterfaceError::Pin)
        }

        fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
            let res = match mode {
                Mode::Command => self.pins.register_select.set_high(),
                Mode::Data => self.pins.register_select.set_low(),
            };
            res.map_err(InterfaceError::Pin)
        }

        fn send(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            // `Transfer` works in place, so stage through a scratch chunk.
            let mut scratch = [0u8; 32];
            for chunk in buf.chunks(scratch.len()) {
                let words = &mut scratch[..chunk.len()];
                words.copy_from_slice(chunk);
                self.spi.transfer(words).map_err(InterfaceError::Spi)?;
            }
            Ok(())
        }
    }
}
