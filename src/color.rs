//! The controller's native 12-bit color format.

/// A 12-bit color, packed as 4 bits each of red, green, and blue in the low 12 bits of a `u16`
/// (`0x0RGB`). On the wire each pixel is two bytes, high byte first, with the top nibble of the
/// high byte unused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(u16);

impl Color {
    pub const BLACK: Color = Color(0x000);
    pub const BLUE: Color = Color(0x00F);
    pub const GREEN: Color = Color(0x0F0);
    pub const CYAN: Color = Color(0x0FF);
    pub const RED: Color = Color(0xF00);
    pub const PINK: Color = Color(0xF0F);
    pub const YELLOW: Color = Color(0xFF0);
    pub const WHITE: Color = Color(0xFFF);

    /// Wrap a raw `0x0RGB` value. Bits above the low 12 are discarded.
    pub const fn new(raw: u16) -> Self {
        Color(raw & 0x0FFF)
    }

    /// Build a color from 4-bit channel intensities. Each channel is truncated to its low nibble.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u16 & 0xF) << 8) | ((g as u16 & 0xF) << 4) | (b as u16 & 0xF))
    }

    /// Decode a transmitted pixel back into a color.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Color::new(((bytes[0] as u16) << 8) | bytes[1] as u16)
    }

    /// The two bytes sent to the controller for one pixel of this color.
    pub const fn to_bytes(self) -> [u8; 2] {
        [(self.0 >> 8) as u8, (self.0 & 0xFF) as u8]
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn r(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 & 0xF) as u8
    }
}

impl From<Color> for u16 {
    fn from(c: Color) -> u16 {
        c.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors() {
        assert_eq!(Color::BLACK.raw(), 0x000);
        assert_eq!(Color::BLUE.raw(), 0x00F);
        assert_eq!(Color::GREEN.raw(), 0x0F0);
        assert_eq!(Color::CYAN.raw(), 0x0FF);
        assert_eq!(Color::RED.raw(), 0xF00);
        assert_eq!(Color::PINK.raw(), 0xF0F);
        assert_eq!(Color::YELLOW.raw(), 0xFF0);
        assert_eq!(Color::WHITE.raw(), 0xFFF);
    }

    #[test]
    fn wire_encoding() {
        assert_eq!(Color::WHITE.to_bytes(), [0x0F, 0xFF]);
        assert_eq!(Color::RED.to_bytes(), [0x0F, 0x00]);
        assert_eq!(Color::CYAN.to_bytes(), [0x00, 0xFF]);
        assert_eq!(Color::from_rgb(0x1, 0x2, 0x3).to_bytes(), [0x01, 0x23]);
    }

    #[test]
    fn named_colors_survive_the_wire() {
        for &c in &[
            Color::BLACK,
            Color::BLUE,
            Color::GREEN,
            Color::CYAN,
            Color::RED,
            Color::PINK,
            Color::YELLOW,
            Color::WHITE,
        ] {
            assert_eq!(Color::from_bytes(c.to_bytes()), c);
        }
    }

    #[test]
    fn upper_nibble_is_dropped() {
        assert_eq!(Color::new(0xFABC), Color::new(0x0ABC));
        assert_eq!(Color::from_bytes([0xF1, 0x23]).raw(), 0x123);
        assert_eq!(Color::from_rgb(0x1F, 0x0, 0x0), Color::RED);
        assert_eq!(Color::from_rgb(0xA, 0xB, 0xC).r(), 0xA);
        assert_eq!(Color::from_rgb(0xA, 0xB, 0xC).g(), 0xB);
        assert_eq!(Color::from_rgb(0xA, 0xB, 0xC).b(), 0xC);
    }
}
