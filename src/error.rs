//! Errors reported by the driver.

use core::fmt;

/// Error returned by driver operations. `E` is the error type of the underlying
/// `DisplayInterface`.
///
/// Every variant except `Interface` is raised before any byte reaches the bus, so a rejected call
/// leaves the controller untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// The interface failed to drive a pin or transfer a byte. The controller offers no
    /// acknowledgment channel, so the burst is abandoned rather than retried.
    Interface(E),
    /// A coordinate, size, or text extent falls outside the 101x80 panel.
    OutOfBounds,
    /// A command parameter is outside the range the controller accepts.
    InvalidArgument,
    /// A bitmap holds fewer pixels than the target window.
    BufferSize,
    /// The font has no glyph for this character.
    MissingGlyph(char),
    /// The display has not finished `Display::init`.
    NotReady,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Interface(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "display interface error: {:?}", e),
            Error::OutOfBounds => f.write_str("drawing extends outside the display"),
            Error::InvalidArgument => f.write_str("command parameter out of range"),
            Error::BufferSize => f.write_str("bitmap smaller than its window"),
            Error::MissingGlyph(c) => write!(f, "no glyph for character {:?}", c),
            Error::NotReady => f.write_str("display not initialized"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}
