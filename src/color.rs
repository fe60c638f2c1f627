use rand::Rng;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fill for cells that hold nothing.
    pub const BACKGROUND: Self = Self::new(30, 30, 30, 255);
    /// What the canvas is cleared to before each frame.
    pub const CLEAR: Self = Self::new(46, 46, 46, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// The named piece colours.
///
/// There is deliberately no "empty" entry here: emptiness is [`crate::Cell::Empty`],
/// so every variant is a legal piece colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumCount)]
pub enum PaletteColor {
    LightGray,
    Gray,
    Yellow,
    Gold,
    Orange,
    Pink,
    Red,
    Maroon,
    Green,
    Lime,
    DarkGreen,
    SkyBlue,
    Blue,
    DarkBlue,
    Purple,
    Violet,
    DarkPurple,
    Beige,
}

impl PaletteColor {
    pub const fn rgba(self) -> Rgba {
        match self {
            PaletteColor::LightGray => Rgba::new(200, 200, 200, 255),
            PaletteColor::Gray => Rgba::new(130, 130, 130, 255),
            PaletteColor::Yellow => Rgba::new(253, 249, 0, 255),
            PaletteColor::Gold => Rgba::new(255, 203, 0, 255),
            PaletteColor::Orange => Rgba::new(255, 161, 0, 255),
            PaletteColor::Pink => Rgba::new(255, 109, 194, 255),
            PaletteColor::Red => Rgba::new(230, 41, 55, 255),
            PaletteColor::Maroon => Rgba::new(190, 33, 55, 255),
            PaletteColor::Green => Rgba::new(0, 228, 48, 255),
            PaletteColor::Lime => Rgba::new(0, 158, 47, 255),
            PaletteColor::DarkGreen => Rgba::new(0, 117, 44, 255),
            PaletteColor::SkyBlue => Rgba::new(102, 191, 255, 255),
            PaletteColor::Blue => Rgba::new(0, 121, 241, 255),
            PaletteColor::DarkBlue => Rgba::new(0, 82, 172, 255),
            PaletteColor::Purple => Rgba::new(200, 122, 255, 255),
            PaletteColor::Violet => Rgba::new(135, 60, 190, 255),
            PaletteColor::DarkPurple => Rgba::new(112, 31, 126, 255),
            PaletteColor::Beige => Rgba::new(211, 176, 131, 255),
        }
    }
}

/// Colours a [`crate::ShapeGenerator`] picks from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
#[error("a palette needs at least one colour")]
pub struct EmptyPalette;

impl Palette {
    pub fn new(colors: impl IntoIterator<Item = Rgba>) -> Result<Self, EmptyPalette> {
        let colors: Vec<_> = colors.into_iter().collect();
        if colors.is_empty() {
            return Err(EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn pick(&self, rng: &mut impl Rng) -> Rgba {
        self.colors[rng.gen_range(0..self.colors.len())]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: PaletteColor::iter().map(PaletteColor::rgba).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn default_palette_has_every_named_color() {
        let palette = Palette::default();
        assert_eq!(palette.colors().len(), PaletteColor::COUNT);
        assert!(!palette.colors().contains(&Rgba::BACKGROUND));
    }

    #[test]
    fn empty_palette_is_refused() {
        assert_eq!(Palette::new([]), Err(EmptyPalette));
    }

    #[test]
    fn pick_stays_in_palette() {
        let palette = Palette::new([PaletteColor::Red.rgba(), PaletteColor::Blue.rgba()]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(palette.colors().contains(&palette.pick(&mut rng)));
        }
    }

    #[test]
    fn with_alpha_keeps_channels() {
        assert_eq!(
            PaletteColor::Gold.rgba().with_alpha(100),
            Rgba::new(255, 203, 0, 100)
        );
    }
}
