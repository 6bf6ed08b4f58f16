use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use tracing::info;

use themepack::{
    Palette, StagingTree, StylesheetRenderer, ThemeDefinition, TransformRegistry, package_theme,
    recolor_icons,
};

use crate::settings::ResolvedConfig;

/// Coordinates one full theme compilation: validate, stage, render, recolor,
/// package.
pub(crate) struct CompileWorkflow {
    config: ResolvedConfig,
}

/// What a successful compilation produced, for caller-facing output.
pub(crate) struct CompileOutcome {
    pub(crate) theme_name: String,
    pub(crate) archive: PathBuf,
    pub(crate) stylesheet_bytes: usize,
    pub(crate) icon_count: usize,
}

impl CompileWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Self {
        Self { config }
    }

    pub(crate) fn run(self) -> Result<CompileOutcome> {
        let config = self.config;

        // Fail before any staging happens if the definition is absent or
        // malformed.
        ensure!(
            config.theme_path.is_file(),
            "theme definition not found at {}",
            config.theme_path.display()
        );
        let raw = fs::read_to_string(&config.theme_path).with_context(|| {
            format!(
                "failed to read theme definition {}",
                config.theme_path.display()
            )
        })?;
        let theme: ThemeDefinition = serde_json::from_str(&raw).with_context(|| {
            format!(
                "theme definition {} is not a JSON colour mapping",
                config.theme_path.display()
            )
        })?;

        theme.validate_shape()?;
        let palette = Palette::from_theme(&theme)?;
        let registry = TransformRegistry::builtin();

        let staging = StagingTree::prepare(&config.output_root)?;

        let template_path = config.template_root.join(&config.template_name);
        let renderer = StylesheetRenderer::new(&palette, &registry);
        let css = renderer.render_file(&template_path)?;
        staging.write_stylesheet(&css)?;
        info!(bytes = css.len(), "rendered stylesheet");

        let icon_count = recolor_icons(&config.icon_root, &theme, &staging)?;
        info!(icons = icon_count, "recolored icon set");

        staging.write_app_theme(&palette)?;

        let archive = package_theme(staging, &config.output_root, &config.theme_name)?;

        Ok(CompileOutcome {
            theme_name: config.theme_name,
            archive,
            stylesheet_bytes: css.len(),
            icon_count,
        })
    }
}
