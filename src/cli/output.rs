use anyhow::Result;
use serde_json::json;

use crate::workflow::CompileOutcome;

/// Print a plain-text success line for the compiled theme.
pub(crate) fn print_plain(outcome: &CompileOutcome) {
    println!(
        "Compiled theme '{}' -> {}",
        outcome.theme_name,
        outcome.archive.display()
    );
}

/// Format the compile outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &CompileOutcome) -> Result<String> {
    let payload = json!({
        "theme": outcome.theme_name,
        "archive": outcome.archive.display().to_string(),
        "stylesheet_bytes": outcome.stylesheet_bytes,
        "icons": outcome.icon_count,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the compile outcome.
pub(crate) fn print_json(outcome: &CompileOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}
