//! Domain types shared by the compiler and the loader.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Filename prefix of every cached artifact.
pub const ARTIFACT_PREFIX: &str = "stencil_";
/// Filename suffix of every cached artifact.
pub const ARTIFACT_SUFFIX: &str = ".cache";
/// Prefix of the name a loaded unit is registered under.
pub const UNIT_PREFIX: &str = "__stencil_template_";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Caller-supplied logical template name, e.g. `"mail/welcome.html"`.
///
/// Opaque apart from its `/` separators; no validation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateName(pub String);

impl TemplateName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw `/`-separated segments, empty ones included.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TemplateName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TemplateName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Deterministic identity of a template: lowercase hex digest of its name.
///
/// Doubles as the cache artifact filename stem and the unit registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactId(pub String);

impl ArtifactId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `stencil_<id>.cache`
    pub fn artifact_file_name(&self) -> String {
        format!("{ARTIFACT_PREFIX}{}{ARTIFACT_SUFFIX}", self.0)
    }

    /// `__stencil_template_<id>`, the name the loaded unit is installed under.
    pub fn unit_name(&self) -> String {
        format!("{UNIT_PREFIX}{}", self.0)
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ArtifactId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ArtifactId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Render context
// ---------------------------------------------------------------------------

/// Variable name → value mapping handed to a unit at render time.
pub type RenderContext = BTreeMap<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
