//! Error types for stencil-loader.

use std::path::PathBuf;

use thiserror::Error;

use stencil_compiler::CompileError;
use stencil_core::TemplateName;

/// All errors that can arise while resolving, compiling or loading a template.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No source file exists for the requested name. Nothing was written.
    #[error("template '{name}' not found (looked for {path})")]
    TemplateNotFound { name: TemplateName, path: PathBuf },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler rejected the source or failed while emitting code.
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    /// A cached artifact could not be installed as a unit.
    #[error("failed to load artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: CompileError,
    },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::TemplateNotFound { .. })
    }
}

/// Convenience constructor for [`LoadError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.into(),
        source,
    }
}
