//! Recolors the SVG icon set once per semantic variant.
//!
//! Icon sources are treated as opaque text: the authoring convention marks
//! the region to recolor with `#0000FF` and regions that must become
//! transparent with `#000000`. No SVG parsing happens here.

use std::fs;
use std::path::Path;

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::color::{Color, luminosity};
use crate::error::CompileError;
use crate::package::StagingTree;
use crate::palette::{
    DANGER_COLOR, KEY_PRIMARY, KEY_PRIMARY_TEXT, KEY_SECONDARY, SUCCESS_COLOR, ThemeDefinition,
    WARNING_COLOR,
};

/// Marker colour icon authors use for the recolorable region.
pub const PLACEHOLDER_UPPER: &str = "#0000FF";
pub const PLACEHOLDER_LOWER: &str = "#0000ff";

/// Regions drawn in this colour become fully transparent in every variant.
const MASK_COLOR: &str = "#000000";
const MASK_REPLACEMENT: &str = "#ffffff00";

/// The six semantic recolor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Primary,
    Secondary,
    Disabled,
    Success,
    Warning,
    Danger,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Primary,
        Variant::Secondary,
        Variant::Disabled,
        Variant::Success,
        Variant::Warning,
        Variant::Danger,
    ];

    /// Folder name for this variant inside the staging tree.
    pub const fn as_str(self) -> &'static str {
        match self {
            Variant::Primary => "primary",
            Variant::Secondary => "secondary",
            Variant::Disabled => "disabled",
            Variant::Success => "success",
            Variant::Warning => "warning",
            Variant::Danger => "danger",
        }
    }
}

/// Compute the target colour for one variant.
///
/// These intentionally recompute from the theme definition with their own
/// luminosity parameters instead of reusing palette entries.
pub fn variant_color(variant: Variant, theme: &ThemeDefinition) -> Result<Color, CompileError> {
    let color = match variant {
        Variant::Primary => luminosity(theme.color(KEY_PRIMARY_TEXT)?, 0.4),
        Variant::Secondary => luminosity(theme.color(KEY_SECONDARY)?, 0.1),
        Variant::Disabled => luminosity(theme.color(KEY_PRIMARY)?, 0.5),
        Variant::Success => luminosity(Color::from_hex(SUCCESS_COLOR)?, 0.1),
        Variant::Warning => luminosity(Color::from_hex(WARNING_COLOR)?, 0.0),
        Variant::Danger => luminosity(Color::from_hex(DANGER_COLOR)?, 0.0),
    };
    Ok(color)
}

/// Produce one variant copy of an icon's content: swap the placeholder for
/// the target colour, then mask `#000000` regions transparent.
fn recolor(content: &str, target_hex: &str) -> String {
    content
        .replace(PLACEHOLDER_UPPER, target_hex)
        .replace(PLACEHOLDER_LOWER, target_hex)
        .replace(MASK_COLOR, MASK_REPLACEMENT)
}

/// Walk `icon_root` and write six recolored copies of every `.svg` file
/// into the staging tree. Returns the number of source icons processed.
///
/// The walk is sorted by file name so repeated compilations stage the same
/// bytes in the same order; nesting is flattened, so of two same-named files
/// in different subdirectories the later one in walk order wins.
pub fn recolor_icons(
    icon_root: &Path,
    theme: &ThemeDefinition,
    staging: &StagingTree,
) -> Result<usize, CompileError> {
    let mut targets = Vec::with_capacity(Variant::ALL.len());
    for variant in Variant::ALL {
        targets.push((variant, variant_color(variant, theme)?.hex()));
    }

    let walk = WalkBuilder::new(icon_root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut processed = 0;
    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%err, "skipping unreadable icon entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|kind| kind.is_file()) {
            continue;
        }

        let path = entry.path();
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if !is_svg {
            continue;
        }

        let Some(file_name) = path.file_name() else {
            continue;
        };

        // One read shared across the six variant writes.
        let content =
            fs::read_to_string(path).map_err(|source| CompileError::io(path, source))?;

        for (variant, hex) in &targets {
            staging.write_icon(*variant, file_name, &recolor(&content, hex))?;
        }

        debug!(icon = %path.display(), "recolored");
        processed += 1;
    }

    Ok(processed)
}
