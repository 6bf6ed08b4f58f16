//! Staging tree lifecycle and archive assembly.
//!
//! Every compilation stages its outputs under `<output_root>/generated/`,
//! archives that tree into `<output_root>/<theme>.zip`, then removes the
//! staging tree. Preparing the tree discards any leftover from an
//! interrupted run, so stale files never leak into a new archive.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::CompileError;
use crate::icons::Variant;
use crate::palette::Palette;
use crate::stylesheet::STYLESHEET_FILE;

/// Directory under the output root where outputs are staged before packing.
pub const STAGING_DIR: &str = "generated";

/// Theme metadata file bundled alongside the stylesheet.
pub const APP_THEME_FILE: &str = "apptheme.json";

/// The ephemeral output layout populated by one compilation.
#[derive(Debug)]
pub struct StagingTree {
    root: PathBuf,
}

impl StagingTree {
    /// Create a fresh staging tree under `output_root`, discarding any
    /// leftover tree from a previous run first.
    pub fn prepare(output_root: &Path) -> Result<Self, CompileError> {
        let root = output_root.join(STAGING_DIR);

        if root.exists() {
            debug!(staging = %root.display(), "removing stale staging tree");
            fs::remove_dir_all(&root).map_err(|source| CompileError::io(&root, source))?;
        }

        for variant in Variant::ALL {
            let dir = root.join("icons").join(variant.as_str());
            fs::create_dir_all(&dir).map_err(|source| CompileError::io(&dir, source))?;
        }

        let tree = Self { root };
        tree.write_file(Path::new(STYLESHEET_FILE), "")?;
        tree.write_file(Path::new(APP_THEME_FILE), "")?;
        Ok(tree)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stage the rendered stylesheet.
    pub fn write_stylesheet(&self, css: &str) -> Result<(), CompileError> {
        self.write_file(Path::new(STYLESHEET_FILE), css)
    }

    /// Stage the palette as `apptheme.json` so the bundle records the
    /// colours it was compiled from.
    pub fn write_app_theme(&self, palette: &Palette) -> Result<(), CompileError> {
        let json = serde_json::to_string_pretty(palette.entries()).map_err(|source| {
            CompileError::io(self.root.join(APP_THEME_FILE), io::Error::other(source))
        })?;
        self.write_file(Path::new(APP_THEME_FILE), &json)
    }

    /// Stage one recolored icon under its variant folder.
    pub fn write_icon(
        &self,
        variant: Variant,
        file_name: &OsStr,
        content: &str,
    ) -> Result<(), CompileError> {
        let relative = Path::new("icons").join(variant.as_str()).join(file_name);
        self.write_file(&relative, content)
    }

    fn write_file(&self, relative: &Path, content: &str) -> Result<(), CompileError> {
        let path = self.root.join(relative);
        fs::write(&path, content).map_err(|source| CompileError::io(&path, source))
    }
}

/// Archive the staging tree into `<output_root>/<theme_name>.zip`, then
/// delete the staging tree. An existing archive of the same name is
/// overwritten.
pub fn package_theme(
    staging: StagingTree,
    output_root: &Path,
    theme_name: &str,
) -> Result<PathBuf, CompileError> {
    fs::create_dir_all(output_root)
        .map_err(|source| CompileError::io(output_root, source))?;

    let archive_path = output_root.join(format!("{theme_name}.zip"));
    let file = fs::File::create(&archive_path)
        .map_err(|source| CompileError::archive(&archive_path, source))?;

    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in staged_files(staging.root()) {
        let relative = entry
            .strip_prefix(staging.root())
            .expect("staged file under staging root")
            .to_string_lossy()
            .replace('\\', "/");

        let content =
            fs::read(&entry).map_err(|source| CompileError::io(&entry, source))?;

        writer
            .start_file(relative, options)
            .map_err(|source| CompileError::archive(&archive_path, io::Error::other(source)))?;
        writer
            .write_all(&content)
            .map_err(|source| CompileError::archive(&archive_path, source))?;
    }

    writer
        .finish()
        .map_err(|source| CompileError::archive(&archive_path, io::Error::other(source)))?;

    fs::remove_dir_all(staging.root())
        .map_err(|source| CompileError::io(staging.root(), source))?;

    info!(archive = %archive_path.display(), "packaged theme");
    Ok(archive_path)
}

/// All regular files under `root`, sorted by name for stable archives.
fn staged_files(root: &Path) -> Vec<PathBuf> {
    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|kind| kind.is_file()))
        .map(|entry| entry.into_path())
        .collect()
}
