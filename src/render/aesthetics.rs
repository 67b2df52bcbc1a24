//! Palette and fonts shared by all panels.

use std::fmt;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS functional notation, `rgb(43, 103, 198)`.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Hex notation, `#2b67c6`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(&self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

pub const BLUE: Rgb = Rgb::new(43, 103, 198);
pub const RED: Rgb = Rgb::new(198, 43, 103);
pub const PALEBLUE: Rgb = Rgb::new(195, 230, 243);
pub const PALERED: Rgb = Rgb::new(255, 204, 204);
pub const ORANGE: Rgb = Rgb::new(255, 116, 0);

pub const LIGHTERGREY: Rgb = Rgb::new(245, 245, 245);
pub const LIGHTISHGREY: Rgb = Rgb::new(237, 237, 237);
pub const LIGHTGREY: Rgb = Rgb::new(230, 230, 230);
pub const LIGHTGREYER: Rgb = Rgb::new(217, 217, 217);
pub const LIGHTGREYISH: Rgb = Rgb::new(204, 204, 204);
pub const GREY: Rgb = Rgb::new(191, 191, 191);
pub const DARKGREY: Rgb = Rgb::new(140, 140, 140);
pub const DARKERGREY: Rgb = Rgb::new(89, 89, 89);
pub const VERYDARKGREY: Rgb = Rgb::new(38, 38, 38);
pub const SUPERDARKGREY: Rgb = Rgb::new(26, 26, 26);
pub const REALLYVERYDARKGREY: Rgb = Rgb::new(13, 13, 13);

/// Serif font stack used for titles and legends.
pub const FONT_STACK: &str =
    r#""EB Garamond", "Garamond", "Century Schoolbook L", "URW Bookman L", "Bookman Old Style", "Times", serif"#;

/// Font used for axis and bar labels.
pub const LABEL_FONT: &str = "Times, serif";
