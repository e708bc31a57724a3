//! Error types for stencil-compiler.

use std::string::FromUtf8Error;

use thiserror::Error;

use stencil_core::TemplateName;

/// Errors raised while compiling source or installing an artifact.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The template source does not parse.
    #[error("failed to compile template '{name}': {source}")]
    Syntax {
        name: TemplateName,
        #[source]
        source: tera::Error,
    },

    /// Writing generated code into the sink failed.
    #[error("I/O error while emitting artifact: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact document could not be serialized.
    #[error("artifact encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    /// In-memory compile output was not valid UTF-8.
    #[error("generated code is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Artifact bytes are not a readable artifact document.
    #[error("corrupt artifact for {unit}: {source}")]
    CorruptArtifact {
        unit: String,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact was produced by an incompatible compiler version.
    #[error("unsupported artifact format {found} (expected {expected})")]
    UnsupportedFormat { found: u32, expected: u32 },

    /// Artifact body was rejected when installing the unit.
    #[error("invalid artifact body for {unit}: {source}")]
    InvalidArtifact {
        unit: String,
        #[source]
        source: tera::Error,
    },
}

impl CompileError {
    /// Split serde_json failures into sink I/O errors and encoding errors.
    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        if err.is_io() {
            CompileError::Io(std::io::Error::from(err))
        } else {
            CompileError::Encode(err)
        }
    }
}

/// Errors raised while executing a loaded unit.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Writing to the output sink failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// Captured output was not valid UTF-8.
    #[error("rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}
