//! Pure colour transforms used by the stylesheet renderer and icon recolorer.
//!
//! A [`Color`] carries 8-bit RGB channels plus a normalized alpha. The two
//! transforms mirror the filters exposed to stylesheet templates: an opacity
//! blend and a luminosity shift.

use crate::error::CompileError;

/// An RGB colour with a normalized alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    alpha: f64,
}

impl Color {
    /// Build a fully opaque colour from raw channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Parse a `#RRGGBB` hex string, case-insensitively.
    pub fn from_hex(value: &str) -> Result<Self, CompileError> {
        let invalid = || CompileError::InvalidColor {
            value: value.to_string(),
        };

        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |range| u8::from_str_radix(&digits[range], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub const fn red(&self) -> u8 {
        self.red
    }

    pub const fn green(&self) -> u8 {
        self.green
    }

    pub const fn blue(&self) -> u8 {
        self.blue
    }

    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Render as lowercase `#rrggbb` hex. The alpha channel is not encoded.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Render as an `rgba(r, g, b, a)` string with alpha rounded to three
    /// decimal places.
    pub fn rgba_string(&self) -> String {
        let alpha = (self.alpha * 1000.0).round() / 1000.0;
        format!(
            "rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, alpha
        )
    }
}

/// Return `color` with its alpha channel set to `value`, clamped to [0, 1].
/// RGB channels are preserved exactly.
pub fn opacity(color: Color, value: f64) -> Color {
    Color {
        alpha: value.clamp(0.0, 1.0),
        ..color
    }
}

/// Shift every channel of `color` by `255 * brightness`, truncated and capped
/// at 255, forcing the result fully opaque. Negative `brightness` darkens.
///
/// A shift strong enough to drive a channel below zero clamps at 0; the
/// underflow is logged so surprising inputs stay visible.
pub fn luminosity(color: Color, brightness: f64) -> Color {
    let shift = |channel: u8| -> u8 {
        let shifted = (f64::from(channel) + 255.0 * brightness).trunc() as i64;
        let capped = shifted.min(255);
        if capped < 0 {
            tracing::warn!(channel, brightness, "luminosity shift underflowed a channel, clamping to 0");
            0
        } else {
            capped as u8
        }
    };

    Color {
        red: shift(color.red),
        green: shift(color.green),
        blue: shift(color.blue),
        alpha: 1.0,
    }
}
