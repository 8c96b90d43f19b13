//! The five built-in color palettes and their typed identifiers.
//!
//! Palettes are addressed by [`PaletteId`]; string keys (`"palette1"` ..
//! `"palette5"`) only appear at the persistence and DOM boundaries and are
//! parsed with [`str::parse`], so an unknown key is an explicit
//! [`BackdropError::UnknownPalette`] rather than a missing lookup.

use std::fmt;
use std::str::FromStr;

use crate::error::BackdropError;

/// Number of reference colors in every palette.
pub const PALETTE_SIZE: usize = 4;

/// A 24-bit sRGB color, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Gamma-encoded channels in `0.0..=1.0`.
    #[must_use]
    pub fn to_srgb(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }

    /// Linear-light channels, ready for an sRGB render target.
    #[must_use]
    pub fn to_linear(self) -> [f32; 3] {
        self.to_srgb().map(srgb_to_linear)
    }

    /// CSS hex notation, e.g. `#667eea`.
    #[must_use]
    pub fn css(self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// A named set of four reference colors plus the two stops of its swatch
/// preview gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Human-readable name, shown as the swatch tooltip.
    pub name: &'static str,
    /// Reference colors driving particles, solids and point lights.
    pub colors: [Rgb; PALETTE_SIZE],
    /// Start and end stops of the swatch preview gradient.
    pub gradient: (Rgb, Rgb),
}

impl Palette {
    /// Color for a slot, wrapping around the four entries.
    #[must_use]
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index % PALETTE_SIZE]
    }

    /// CSS `background` value for the swatch preview.
    #[must_use]
    pub fn preview_css(&self) -> String {
        format!(
            "linear-gradient(135deg, {} 0%, {} 100%)",
            self.gradient.0.css(),
            self.gradient.1.css()
        )
    }
}

static PALETTES: [Palette; 5] = [
    Palette {
        name: "Purple Pink",
        colors: [Rgb(0x66_7eea), Rgb(0x76_4ba2), Rgb(0xf0_93fb), Rgb(0xf5_576c)],
        gradient: (Rgb(0x66_7eea), Rgb(0x76_4ba2)),
    },
    Palette {
        name: "Cyan Purple",
        colors: [Rgb(0x00_d2fc), Rgb(0x3a_47d5), Rgb(0x00_d2fc), Rgb(0x92_8dab)],
        gradient: (Rgb(0x00_d2fc), Rgb(0x3a_47d5)),
    },
    Palette {
        name: "Ocean",
        colors: [Rgb(0x00_77be), Rgb(0x00_a8e8), Rgb(0x00_c9ff), Rgb(0x92_e1ff)],
        gradient: (Rgb(0x00_77be), Rgb(0x00_c9ff)),
    },
    Palette {
        name: "Sunset",
        colors: [Rgb(0xff_6b6b), Rgb(0xff_a94d), Rgb(0xff_d93d), Rgb(0xff_8c42)],
        gradient: (Rgb(0xff_6b6b), Rgb(0xff_d93d)),
    },
    Palette {
        name: "Forest",
        colors: [Rgb(0x11_998e), Rgb(0x38_ef7d), Rgb(0x0d_7377), Rgb(0x14_cc80)],
        gradient: (Rgb(0x11_998e), Rgb(0x38_ef7d)),
    },
];

/// Identifier of one of the built-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteId {
    /// Purple Pink (the default).
    #[default]
    Palette1,
    /// Cyan Purple.
    Palette2,
    /// Ocean.
    Palette3,
    /// Sunset.
    Palette4,
    /// Forest.
    Palette5,
}

impl PaletteId {
    /// All palettes in menu order.
    pub const ALL: [Self; 5] = [
        Self::Palette1,
        Self::Palette2,
        Self::Palette3,
        Self::Palette4,
        Self::Palette5,
    ];

    /// Position in [`PaletteId::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Palette1 => 0,
            Self::Palette2 => 1,
            Self::Palette3 => 2,
            Self::Palette4 => 3,
            Self::Palette5 => 4,
        }
    }

    /// Persisted / DOM key, e.g. `"palette3"`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Palette1 => "palette1",
            Self::Palette2 => "palette2",
            Self::Palette3 => "palette3",
            Self::Palette4 => "palette4",
            Self::Palette5 => "palette5",
        }
    }

    /// The palette's colors.
    #[must_use]
    pub fn palette(self) -> &'static Palette {
        &PALETTES[self.index()]
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PaletteId {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| BackdropError::UnknownPalette(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back_to_their_ids() {
        for id in PaletteId::ALL {
            assert_eq!(id.key().parse::<PaletteId>().unwrap(), id);
            assert_eq!(id.to_string(), id.key());
        }
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = "palette6".parse::<PaletteId>().unwrap_err();
        assert!(matches!(err, BackdropError::UnknownPalette(k) if k == "palette6"));
        assert!("".parse::<PaletteId>().is_err());
        assert!("Palette1".parse::<PaletteId>().is_err());
    }

    #[test]
    fn default_is_purple_pink() {
        let palette = PaletteId::default().palette();
        assert_eq!(palette.name, "Purple Pink");
        assert_eq!(palette.colors[0], Rgb(0x66_7eea));
    }

    #[test]
    fn color_wraps_around_four_slots() {
        let palette = PaletteId::Palette4.palette();
        assert_eq!(palette.color(0), palette.color(4));
        assert_eq!(palette.color(3), Rgb(0xff_8c42));
    }

    #[test]
    fn css_helpers() {
        assert_eq!(Rgb(0x00_77be).css(), "#0077be");
        assert_eq!(
            PaletteId::Palette3.palette().preview_css(),
            "linear-gradient(135deg, #0077be 0%, #00c9ff 100%)"
        );
    }

    #[test]
    fn linear_conversion_endpoints() {
        assert_eq!(Rgb(0x00_0000).to_linear(), [0.0, 0.0, 0.0]);
        let white = Rgb(0xff_ffff).to_linear();
        for c in white {
            assert!((c - 1.0).abs() < 1e-6);
        }
        let [r, _, _] = Rgb(0x80_0000).to_linear();
        assert!(r > 0.2 && r < 0.23);
    }
}
