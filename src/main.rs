mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::CompileWorkflow;

fn main() -> Result<()> {
    themepack::logging::initialize();

    let cli = parse_cli();
    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    run_compile(cli.output, resolved)
}

/// Execute the compile workflow and print the outcome in the chosen format.
fn run_compile(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
    let theme_name = settings.theme_name.clone();
    let workflow = CompileWorkflow::from_config(settings);

    match workflow.run() {
        Ok(outcome) => {
            match format {
                OutputFormat::Plain => print_plain(&outcome),
                OutputFormat::Json => print_json(&outcome)?,
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("Failed to compile '{theme_name}': {err:#}");
            std::process::exit(1);
        }
    }
}
