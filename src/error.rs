use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while compiling a theme bundle.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A required colour key was absent when building the [`Palette`](crate::Palette).
    #[error("theme definition is missing required key '{key}'")]
    MissingPaletteKey { key: String },

    /// The theme definition contained keys outside the recognized set.
    #[error("theme definition contains unrecognized keys: {}", keys.join(", "))]
    InvalidThemeShape { keys: Vec<String> },

    /// A colour value could not be parsed as `#RRGGBB`.
    #[error("'{value}' is not a #RRGGBB colour")]
    InvalidColor { value: String },

    /// The stylesheet template does not exist under the template root.
    #[error("stylesheet template not found at {}", path.display())]
    TemplateNotFound { path: PathBuf },

    /// A template placeholder named a key or transform the palette does not provide.
    #[error("template references unknown placeholder '{name}'")]
    UnknownPlaceholder { name: String },

    /// A transform invocation carried an argument that could not be interpreted.
    #[error("invalid transform argument '{value}'")]
    InvalidTransformArgument { value: String },

    /// Creating or writing the output archive failed.
    #[error("failed to create archive {}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other filesystem failure inside the pipeline.
    #[error("filesystem operation failed on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CompileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Archive {
            path: path.into(),
            source,
        }
    }
}
