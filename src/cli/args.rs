use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use themepack::app_dirs;

/// Produce the full version banner including the config directory.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("themepack {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "themepack",
    version,
    long_version = long_version(),
    about = "Compile a themed stylesheet and icon bundle from a colour palette",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `themepack` binary.
pub(crate) struct CliArgs {
    #[arg(value_name = "NAME", help = "Name of the theme bundle to generate")]
    pub(crate) name: String,
    #[arg(
        value_name = "THEME_JSON",
        help = "Path to the theme definition (JSON mapping of the eight colour keys)"
    )]
    pub(crate) theme: PathBuf,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "THEMEPACK_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long,
        value_name = "PATH",
        help = "Directory containing stylesheet templates (default: assets/stylesheets)"
    )]
    pub(crate) template_root: Option<PathBuf>,
    #[arg(
        long,
        value_name = "PATH",
        help = "Directory of SVG icon sources to recolor (default: assets/icons)"
    )]
    pub(crate) icon_root: Option<PathBuf>,
    #[arg(
        long,
        value_name = "PATH",
        help = "Directory the theme archive is written to (default: build)"
    )]
    pub(crate) output_root: Option<PathBuf>,
    #[arg(
        short = 't',
        long,
        value_name = "FILE",
        help = "Stylesheet template file name under the template root (default: main.css.tmpl)"
    )]
    pub(crate) template: Option<String>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the effective configuration before compiling (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long,
        value_enum,
        value_name = "FORMAT",
        default_value = "plain",
        help = "Output format for the compile result (default: plain)"
    )]
    pub(crate) output: OutputFormat,
}

/// Output format for reporting the compile outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_name_and_theme() {
        let args = CliArgs::parse_from(["themepack", "demo", "themes/demo.json"]);
        assert_eq!(args.name, "demo");
        assert_eq!(args.theme, PathBuf::from("themes/demo.json"));
        assert_eq!(args.output, OutputFormat::Plain);
        assert!(!args.no_config);
    }

    #[test]
    fn parses_path_overrides() {
        let args = CliArgs::parse_from([
            "themepack",
            "demo",
            "demo.json",
            "--icon-root",
            "/srv/icons",
            "--output",
            "json",
        ]);
        assert_eq!(args.icon_root, Some(PathBuf::from("/srv/icons")));
        assert_eq!(args.output, OutputFormat::Json);
    }
}
