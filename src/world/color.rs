//! Neon palette and colour values carried by entities and draw commands.

/// 24-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Player, shield power-up and the jump and shield bursts.
    pub const NEON_CYAN: Self = Self(0x00_f3_ff);
    /// Multiplier power-up.
    pub const NEON_YELLOW: Self = Self(0xf0_f9_00);
    /// Obstacles.
    pub const NEON_RED: Self = Self(0xff_00_3c);
    /// Slow-motion power-up.
    pub const NEON_PURPLE: Self = Self(0x8a_2b_e2);
    /// Stars, floor line and glyphs.
    pub const WHITE: Self = Self(0xff_ff_ff);
}

/// Hue/saturation/lightness colour with alpha, used for speed-tinted paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    /// Hue in degrees.
    pub hue: f32,
    /// Saturation in percent.
    pub saturation: f32,
    /// Lightness in percent.
    pub lightness: f32,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl Hsla {
    /// Opaque colour.
    #[must_use]
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha: 1.0,
        }
    }

    /// Same colour with a different opacity.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// Fill or stroke colour of a draw command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Palette colour with opacity.
    Solid {
        /// Base colour.
        colour: Rgb,
        /// Opacity in `[0, 1]`.
        alpha: f32,
    },
    /// Hue-driven colour.
    Tinted(Hsla),
}

impl Paint {
    /// Fully opaque palette colour.
    #[must_use]
    pub const fn solid(colour: Rgb) -> Self {
        Self::Solid { colour, alpha: 1.0 }
    }

    /// Palette colour with opacity.
    #[must_use]
    pub const fn faded(colour: Rgb, alpha: f32) -> Self {
        Self::Solid { colour, alpha }
    }
}

impl From<Rgb> for Paint {
    fn from(colour: Rgb) -> Self {
        Self::solid(colour)
    }
}

impl From<Hsla> for Paint {
    fn from(colour: Hsla) -> Self {
        Self::Tinted(colour)
    }
}
