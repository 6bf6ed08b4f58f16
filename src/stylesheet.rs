//! Renders a stylesheet template against a palette and flattens the result.
//!
//! Templates are plain text with `{{ KEY }}` placeholders and
//! `{{ FILTER_NAME(KEY, value) }}` transform invocations. The renderer treats
//! stylesheet syntax as opaque: after substitution it only strips block
//! comments and collapses formatting for compact output.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::color::Color;
use crate::error::CompileError;
use crate::palette::{Palette, TransformRegistry};

/// File name the rendered stylesheet is staged under.
pub const STYLESHEET_FILE: &str = "stylesheets.css";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*(?:\(([^)]*)\))?\s*\}\}").expect("placeholder pattern")
});

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("comment pattern"));

/// Resolves template placeholders against a palette and transform registry.
pub struct StylesheetRenderer<'a> {
    palette: &'a Palette,
    registry: &'a TransformRegistry,
}

impl<'a> StylesheetRenderer<'a> {
    pub fn new(palette: &'a Palette, registry: &'a TransformRegistry) -> Self {
        Self { palette, registry }
    }

    /// Render the template at `path` into final stylesheet text.
    pub fn render_file(&self, path: &Path) -> Result<String, CompileError> {
        if !path.is_file() {
            return Err(CompileError::TemplateNotFound {
                path: path.to_path_buf(),
            });
        }

        let source =
            fs::read_to_string(path).map_err(|source| CompileError::io(path, source))?;
        self.render(&source)
    }

    /// Substitute placeholders, strip comments, and flatten formatting.
    pub fn render(&self, template: &str) -> Result<String, CompileError> {
        let substituted = self.substitute(template)?;
        let stripped = strip_comments(&substituted);
        Ok(flatten(&stripped))
    }

    fn substitute(&self, template: &str) -> Result<String, CompileError> {
        let mut output = String::with_capacity(template.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let whole = caps.get(0).expect("match");
            output.push_str(&template[last..whole.start()]);
            output.push_str(&self.resolve(&caps)?);
            last = whole.end();
        }

        output.push_str(&template[last..]);
        Ok(output)
    }

    fn resolve(&self, caps: &Captures<'_>) -> Result<String, CompileError> {
        let name = &caps[1];

        let Some(args) = caps.get(2) else {
            // Bare placeholder: a direct palette lookup.
            return self
                .palette
                .get(name)
                .map(str::to_string)
                .ok_or_else(|| CompileError::UnknownPlaceholder {
                    name: name.to_string(),
                });
        };

        let entry =
            self.registry
                .get(name)
                .ok_or_else(|| CompileError::UnknownPlaceholder {
                    name: name.to_string(),
                })?;

        let (color_arg, amount) = split_args(args.as_str(), entry.default_arg)?;
        let color = if color_arg.starts_with('#') {
            Color::from_hex(color_arg)?
        } else {
            let value =
                self.palette
                    .get(color_arg)
                    .ok_or_else(|| CompileError::UnknownPlaceholder {
                        name: color_arg.to_string(),
                    })?;
            Color::from_hex(value)?
        };

        Ok((entry.apply)(color, amount).rgba_string())
    }
}

/// Split `KEY` or `KEY, value` transform arguments.
fn split_args(args: &str, default_arg: f64) -> Result<(&str, f64), CompileError> {
    let mut parts = args.splitn(2, ',');
    let color_arg = parts.next().unwrap_or_default().trim();
    if color_arg.is_empty() {
        return Err(CompileError::InvalidTransformArgument {
            value: args.to_string(),
        });
    }

    let amount = match parts.next() {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| CompileError::InvalidTransformArgument {
                value: raw.trim().to_string(),
            })?,
        None => default_arg,
    };

    Ok((color_arg, amount))
}

/// Remove every `/* ... */` span in a single non-greedy pass, so multiple
/// comments on one line are each removed independently.
fn strip_comments(input: &str) -> String {
    BLOCK_COMMENT.replace_all(input, "").into_owned()
}

/// Collapse the rendered document: join declarations onto their rule line,
/// drop 4-space indentation runs, and remove blank lines.
///
/// The space removal is a single pass, not recursive; indentation deeper
/// than one 4-space run loses each complete run it contains.
fn flatten(input: &str) -> String {
    let collapsed = input
        .replace(";\n", "; ")
        .replace(",\n", ", ")
        .replace("{\n", "{ ")
        .replace("    ", "");

    collapsed
        .lines()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
