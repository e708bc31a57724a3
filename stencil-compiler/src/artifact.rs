//! Artifact document: the persisted output of [`crate::TeraCompiler`].
//!
//! A single pretty-printed JSON object:
//!
//! ```json
//! {
//!   "format": 1,
//!   "name": "mail/welcome.html",
//!   "compiled_at": "2026-01-01T00:00:00Z",
//!   "autoescape": true,
//!   "body": "Hello {{ user }}\n"
//! }
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stencil_core::TemplateName;

use crate::error::CompileError;

/// Current artifact layout version. Bump when the document shape changes.
pub const ARTIFACT_FORMAT: u32 = 1;

/// Template suffixes Tera autoescapes by default.
const AUTOESCAPE_SUFFIXES: &[&str] = &[".html", ".htm", ".xml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDocument {
    pub format: u32,
    /// Logical name the artifact was compiled from.
    pub name: TemplateName,
    pub compiled_at: DateTime<Utc>,
    /// Whether variable output is HTML-escaped when rendering.
    pub autoescape: bool,
    /// Validated, LF-normalised template body.
    pub body: String,
}

impl ArtifactDocument {
    pub fn new(name: &TemplateName, body: String) -> Self {
        ArtifactDocument {
            format: ARTIFACT_FORMAT,
            name: name.clone(),
            compiled_at: Utc::now(),
            autoescape: wants_autoescape(name),
            body,
        }
    }

    /// Stream the document into `sink`.
    pub fn write_to(&self, sink: &mut dyn Write) -> Result<(), CompileError> {
        serde_json::to_writer_pretty(&mut *sink, self).map_err(CompileError::from_json)?;
        sink.write_all(b"\n")?;
        Ok(())
    }

    /// Parse artifact bytes, rejecting unknown formats.
    pub fn parse(unit: &str, bytes: &[u8]) -> Result<Self, CompileError> {
        let doc: ArtifactDocument =
            serde_json::from_slice(bytes).map_err(|source| CompileError::CorruptArtifact {
                unit: unit.to_string(),
                source,
            })?;
        if doc.format != ARTIFACT_FORMAT {
            return Err(CompileError::UnsupportedFormat {
                found: doc.format,
                expected: ARTIFACT_FORMAT,
            });
        }
        Ok(doc)
    }
}

fn wants_autoescape(name: &TemplateName) -> bool {
    AUTOESCAPE_SUFFIXES
        .iter()
        .any(|suffix| name.as_str().ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoescape_follows_name_suffix() {
        assert!(ArtifactDocument::new(&"page.html".into(), String::new()).autoescape);
        assert!(ArtifactDocument::new(&"feed.xml".into(), String::new()).autoescape);
        assert!(!ArtifactDocument::new(&"mail.txt".into(), String::new()).autoescape);
    }

    #[test]
    fn written_document_parses_back() {
        let doc = ArtifactDocument::new(&"page.html".into(), "Hi {{ who }}".to_string());
        let mut buf = Vec::new();
        doc.write_to(&mut buf).unwrap();
        assert!(buf.ends_with(b"\n"));

        let parsed = ArtifactDocument::parse("unit", &buf).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn garbage_is_corrupt() {
        let err = ArtifactDocument::parse("__stencil_template_x", b"class X {}").unwrap_err();
        assert!(matches!(err, CompileError::CorruptArtifact { .. }), "got: {err}");
        assert!(err.to_string().contains("__stencil_template_x"));
    }

    #[test]
    fn future_format_is_rejected() {
        let mut doc = ArtifactDocument::new(&"a.txt".into(), "x".to_string());
        doc.format = ARTIFACT_FORMAT + 1;
        let bytes = serde_json::to_vec(&doc).unwrap();
        let err = ArtifactDocument::parse("unit", &bytes).unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnsupportedFormat { found, expected } if found == ARTIFACT_FORMAT + 1 && expected == ARTIFACT_FORMAT
        ));
    }
}
