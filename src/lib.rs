//! Core crate exports for the `themepack` bundle compiler.
//!
//! The pipeline runs in one direction: a [`ThemeDefinition`] builds a
//! [`Palette`], the palette drives the [`StylesheetRenderer`] and the icon
//! recolorer, and the populated [`StagingTree`] is packaged into a single
//! archive. The root module re-exports the pieces so embedders can drive a
//! compilation without digging through the module hierarchy.

pub mod app_dirs;
pub mod color;
mod error;
pub mod icons;
pub mod logging;
pub mod package;
pub mod palette;
pub mod stylesheet;

pub use color::{Color, luminosity, opacity};
pub use error::CompileError;
pub use icons::{Variant, recolor_icons, variant_color};
pub use package::{APP_THEME_FILE, StagingTree, package_theme};
pub use palette::{Palette, REQUIRED_KEYS, ThemeDefinition, TransformRegistry};
pub use stylesheet::{STYLESHEET_FILE, StylesheetRenderer};
