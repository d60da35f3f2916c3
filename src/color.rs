use std::fmt;

use rand::Rng;

/// Upper bound of a color channel (inclusive).
pub const CHANNEL_MAX: u16 = 65535;

/// RGB color with 16-bit channels.
///
/// Stands in for the toolkit color type tags are rendered with; the
/// string form is the 48-bit hex notation (`#rrrrggggbbbb`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Color {
    pub fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    /// Draw a color with three independent uniform channels.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            red: rng.gen_range(0..=CHANNEL_MAX),
            green: rng.gen_range(0..=CHANNEL_MAX),
            blue: rng.gen_range(0..=CHANNEL_MAX),
        }
    }

    /// Downsample to 8-bit channels for terminal swatches.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (
            (self.red >> 8) as u8,
            (self.green >> 8) as u8,
            (self.blue >> 8) as u8,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:04x}{:04x}{:04x}", self.red, self.green, self.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let color = Color::new(65535, 0, 255);
        assert_eq!(color.to_string(), "#ffff000000ff");
    }

    #[test]
    fn test_to_rgb8_downsamples_channels() {
        let color = Color::new(65535, 0, 0x8000);
        assert_eq!(color.to_rgb8(), (0xff, 0x00, 0x80));
    }

    #[test]
    fn test_random_colors_differ_eventually() {
        let mut rng = rand::thread_rng();
        let first = Color::random(&mut rng);
        let distinct = (0..100).any(|_| Color::random(&mut rng) != first);
        assert!(distinct, "100 draws should not all collide with the first");
    }
}
