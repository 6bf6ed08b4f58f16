//! Theme definitions and the palette derived from them.
//!
//! A [`ThemeDefinition`] is the caller-supplied mapping of the eight required
//! colour keys. [`Palette::from_theme`] extends it with the fixed semantic
//! colours and the font family, producing the full set of values a stylesheet
//! template may reference. Template-callable transforms live in an explicit
//! [`TransformRegistry`] rather than being discovered by name at render time.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::color::{self, Color};
use crate::error::CompileError;

pub const KEY_PRIMARY: &str = "QTCOLOR_PRIMARYCOLOR";
pub const KEY_PRIMARY_LIGHT: &str = "QTCOLOR_PRIMARYLIGHTCOLOR";
pub const KEY_PRIMARY_DARK: &str = "QTCOLOR_PRIMARYDARKCOLOR";
pub const KEY_SECONDARY: &str = "QTCOLOR_SECONDARYCOLOR";
pub const KEY_SECONDARY_LIGHT: &str = "QTCOLOR_SECONDARYLIGHTCOLOR";
pub const KEY_SECONDARY_DARK: &str = "QTCOLOR_SECONDARYDARKCOLOR";
pub const KEY_PRIMARY_TEXT: &str = "QTCOLOR_PRIMARYTEXTCOLOR";
pub const KEY_SECONDARY_TEXT: &str = "QTCOLOR_SECONDARYTEXTCOLOR";

/// The colour keys every theme definition must provide.
pub const REQUIRED_KEYS: [&str; 8] = [
    KEY_PRIMARY,
    KEY_PRIMARY_LIGHT,
    KEY_PRIMARY_DARK,
    KEY_SECONDARY,
    KEY_SECONDARY_LIGHT,
    KEY_SECONDARY_DARK,
    KEY_PRIMARY_TEXT,
    KEY_SECONDARY_TEXT,
];

pub const KEY_DANGER: &str = "QTCOLOR_DANGER";
pub const KEY_WARNING: &str = "QTCOLOR_WARNING";
pub const KEY_SUCCESS: &str = "QTCOLOR_SUCCESS";
pub const KEY_FONT_FAMILY: &str = "FONT_FAMILY";

/// Fixed semantic colours added to every palette.
pub const DANGER_COLOR: &str = "#DC3545";
pub const WARNING_COLOR: &str = "#FFC107";
pub const SUCCESS_COLOR: &str = "#17A2B8";

const FONT_FAMILY: &str = "Roboto";

/// Stable names under which the transforms are callable from templates.
pub const FILTER_OPACITY: &str = "FILTER_OPACITY";
pub const FILTER_LUMINOSITY: &str = "FILTER_LUMINOSITY";

/// Caller-supplied mapping of theme colour keys to `#RRGGBB` values.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ThemeDefinition {
    colors: BTreeMap<String, String>,
}

impl ThemeDefinition {
    /// Check that every key present is among the recognized eight.
    ///
    /// Missing keys are not a shape error; they surface later when the
    /// palette is built. Unknown keys fail validation so that typos never
    /// silently drop a colour.
    pub fn validate_shape(&self) -> Result<(), CompileError> {
        let unknown: Vec<String> = self
            .colors
            .keys()
            .filter(|key| !REQUIRED_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(CompileError::InvalidThemeShape { keys: unknown })
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    /// Look up a required key and parse it as a colour.
    pub fn color(&self, key: &str) -> Result<Color, CompileError> {
        let value = self.get(key).ok_or_else(|| CompileError::MissingPaletteKey {
            key: key.to_string(),
        })?;
        Color::from_hex(value)
    }
}

/// The fully resolved value set a stylesheet template renders against.
///
/// Built once per compilation and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Palette {
    values: BTreeMap<String, String>,
}

impl Palette {
    /// Derive the palette from a theme definition: the eight input colours
    /// unchanged, the fixed semantic colours, and the font family.
    pub fn from_theme(theme: &ThemeDefinition) -> Result<Self, CompileError> {
        let mut values = BTreeMap::new();

        for key in REQUIRED_KEYS {
            let value = theme.get(key).ok_or_else(|| CompileError::MissingPaletteKey {
                key: key.to_string(),
            })?;
            values.insert(key.to_string(), value.to_string());
        }

        values.insert(KEY_DANGER.to_string(), DANGER_COLOR.to_string());
        values.insert(KEY_WARNING.to_string(), WARNING_COLOR.to_string());
        values.insert(KEY_SUCCESS.to_string(), SUCCESS_COLOR.to_string());
        values.insert(KEY_FONT_FAMILY.to_string(), FONT_FAMILY.to_string());

        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// All palette entries in key order, for emission into `apptheme.json`.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// A named colour transform callable from stylesheet templates.
#[derive(Debug, Clone, Copy)]
pub struct TransformEntry {
    /// The transform itself.
    pub apply: fn(Color, f64) -> Color,
    /// Parameter used when the template omits the numeric argument.
    pub default_arg: f64,
}

/// Explicit registry mapping template function names to typed transforms.
#[derive(Debug, Clone)]
pub struct TransformRegistry {
    entries: BTreeMap<&'static str, TransformEntry>,
}

impl TransformRegistry {
    /// The built-in registry: `FILTER_OPACITY` and `FILTER_LUMINOSITY`.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            FILTER_OPACITY,
            TransformEntry {
                apply: color::opacity,
                default_arg: 0.5,
            },
        );
        entries.insert(
            FILTER_LUMINOSITY,
            TransformEntry {
                apply: color::luminosity,
                default_arg: 0.0,
            },
        );
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&TransformEntry> {
        self.entries.get(name)
    }
}
