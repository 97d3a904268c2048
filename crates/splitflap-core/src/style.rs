//! Visual configuration of a flap.
//!
//! The engine never reads these values; it hands the style to the host once
//! per surface at construction time.
//!
//! ```rust
//! use splitflap_core::style::{FlapStyle, Rgba, TextAlignment};
//!
//! let style = FlapStyle::new()
//!     .background(Rgba::BLACK)
//!     .text_color(Rgba::WHITE)
//!     .font("Courier", 50.0)
//!     .corner_radius(5.0)
//!     .alignment(TextAlignment::Center);
//! assert_eq!(style.font_family(), "Courier");
//! ```

/// A packed `0xRRGGBBAA` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const DARK_GRAY: Self = Self::rgb(85, 85, 85);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }
}

/// Horizontal placement of the token within a flap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Colours, font and shape of a flap.
#[derive(Debug, Clone, PartialEq)]
pub struct FlapStyle {
    background: Rgba,
    text_color: Rgba,
    line_color: Rgba,
    font_family: String,
    font_size: f32,
    corner_radius: f32,
    alignment: TextAlignment,
}

impl Default for FlapStyle {
    /// White on black with a dark split line, as a departure board.
    fn default() -> Self {
        Self {
            background: Rgba::BLACK,
            text_color: Rgba::WHITE,
            line_color: Rgba::DARK_GRAY,
            font_family: String::from("monospace"),
            font_size: 17.0,
            corner_radius: 0.0,
            alignment: TextAlignment::Center,
        }
    }
}

impl FlapStyle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    #[must_use]
    pub fn text_color(mut self, color: Rgba) -> Self {
        self.text_color = color;
        self
    }

    /// Colour of the horizontal split between the halves.
    #[must_use]
    pub fn line_color(mut self, color: Rgba) -> Self {
        self.line_color = color;
        self
    }

    #[must_use]
    pub fn font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn background_color(&self) -> Rgba {
        self.background
    }

    #[must_use]
    pub fn foreground_color(&self) -> Rgba {
        self.text_color
    }

    #[must_use]
    pub fn split_line_color(&self) -> Rgba {
        self.line_color
    }

    #[must_use]
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    #[must_use]
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.corner_radius
    }

    #[must_use]
    pub fn text_alignment(&self) -> TextAlignment {
        self.alignment
    }
}
