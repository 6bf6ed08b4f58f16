use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use themepack::app_dirs;

use crate::cli::CliArgs;

/// Default asset locations relative to the working directory, used when no
/// configuration file or flag overrides them.
const DEFAULT_TEMPLATE_ROOT: &str = "assets/stylesheets";
const DEFAULT_ICON_ROOT: &str = "assets/icons";
const DEFAULT_OUTPUT_ROOT: &str = "build";
const DEFAULT_TEMPLATE_NAME: &str = "main.css.tmpl";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    paths: PathsSection,
    stylesheet: StylesheetSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PathsSection {
    template_root: Option<PathBuf>,
    icon_root: Option<PathBuf>,
    output_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StylesheetSection {
    template: Option<String>,
}

/// Effective configuration for one compilation, with every asset location
/// resolved to an explicit path.
pub struct ResolvedConfig {
    pub theme_name: String,
    pub theme_path: PathBuf,
    pub template_root: PathBuf,
    pub icon_root: PathBuf,
    pub output_root: PathBuf,
    pub template_name: String,
}

impl ResolvedConfig {
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Theme name: {}", self.theme_name);
        println!("  Theme definition: {}", self.theme_path.display());
        println!("  Template root: {}", self.template_root.display());
        println!("  Template: {}", self.template_name);
        println!("  Icon root: {}", self.icon_root.display());
        println!("  Output root: {}", self.output_root.display());
    }
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve(cli)
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("themepack")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".themepack.toml"));
        files.push(current_dir.join("themepack.toml"));
    }

    files
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(path) = cli.template_root.clone() {
            self.paths.template_root = Some(path);
        }
        if let Some(path) = cli.icon_root.clone() {
            self.paths.icon_root = Some(path);
        }
        if let Some(path) = cli.output_root.clone() {
            self.paths.output_root = Some(path);
        }
        if let Some(template) = cli.template.clone() {
            self.stylesheet.template = Some(template);
        }
    }

    fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let template_root = absolutize(
            self.paths
                .template_root
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_ROOT)),
        )?;
        let icon_root = absolutize(
            self.paths
                .icon_root
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ICON_ROOT)),
        )?;
        let output_root = absolutize(
            self.paths
                .output_root
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT)),
        )?;
        let theme_path = absolutize(cli.theme.clone())?;

        let template_name = self
            .stylesheet
            .template
            .unwrap_or_else(|| DEFAULT_TEMPLATE_NAME.to_string());

        Ok(ResolvedConfig {
            theme_name: cli.name.clone(),
            theme_path,
            template_root,
            icon_root,
            output_root,
            template_name,
        })
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }

    let current = env::current_dir().context("failed to determine working directory")?;
    Ok(current.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    use clap::Parser;
    use tempfile::tempdir;

    // Serializes tests that read or mutate THEMEPACK__ environment state.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn cli(args: &[&str]) -> CliArgs {
        let mut full = vec!["themepack"];
        full.extend_from_slice(args);
        CliArgs::parse_from(full)
    }

    #[test]
    fn resolves_defaults_relative_to_cwd() {
        let _guard = ENV_LOCK.lock().expect("env lock");

        let args = cli(&["--no-config", "demo", "theme.json"]);
        let resolved = load(&args).expect("load");

        assert_eq!(resolved.theme_name, "demo");
        assert!(resolved.theme_path.is_absolute());
        assert!(resolved.template_root.ends_with(DEFAULT_TEMPLATE_ROOT));
        assert!(resolved.icon_root.ends_with(DEFAULT_ICON_ROOT));
        assert!(resolved.output_root.ends_with(DEFAULT_OUTPUT_ROOT));
        assert_eq!(resolved.template_name, DEFAULT_TEMPLATE_NAME);
    }

    #[test]
    fn cli_flags_override_config_defaults() {
        let _guard = ENV_LOCK.lock().expect("env lock");

        let args = cli(&[
            "--no-config",
            "demo",
            "theme.json",
            "--template-root",
            "/srv/templates",
            "--icon-root",
            "/srv/icons",
            "--output-root",
            "/srv/out",
            "--template",
            "dark.css.tmpl",
        ]);
        let resolved = load(&args).expect("load");

        assert_eq!(resolved.template_root, PathBuf::from("/srv/templates"));
        assert_eq!(resolved.icon_root, PathBuf::from("/srv/icons"));
        assert_eq!(resolved.output_root, PathBuf::from("/srv/out"));
        assert_eq!(resolved.template_name, "dark.css.tmpl");
    }

    #[test]
    fn config_file_env_and_cli_layer_in_order() {
        let _guard = ENV_LOCK.lock().expect("env lock");

        let dir = tempdir().expect("tempdir");
        let config_path = dir.path().join("themepack.toml");
        fs::write(
            &config_path,
            r#"
[paths]
template_root = "/from/file/templates"
icon_root = "/from/file/icons"
output_root = "/from/file/out"
"#,
        )
        .expect("config file");

        unsafe { env::set_var("THEMEPACK__PATHS__ICON_ROOT", "/from/env/icons") };

        let args = cli(&[
            "--no-config",
            "--config",
            config_path.to_str().expect("utf8 path"),
            "demo",
            "theme.json",
            "--template-root",
            "/from/cli/templates",
        ]);
        let resolved = load(&args);

        unsafe { env::remove_var("THEMEPACK__PATHS__ICON_ROOT") };

        let resolved = resolved.expect("load");
        // CLI beats the file, the environment beats the file, and untouched
        // keys fall through to the file value.
        assert_eq!(resolved.template_root, PathBuf::from("/from/cli/templates"));
        assert_eq!(resolved.icon_root, PathBuf::from("/from/env/icons"));
        assert_eq!(resolved.output_root, PathBuf::from("/from/file/out"));
    }
}
