//! Artifact identity: SHA-256 of the template name, hex encoded.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use stencil_core::{ArtifactId, TemplateName};

/// Derive the artifact id for `name`. Pure; stable across processes.
pub fn key_of(name: &TemplateName) -> ArtifactId {
    let mut hasher = Sha256::new();
    hasher.update(name.as_str().as_bytes());
    ArtifactId(hex::encode(hasher.finalize()))
}

/// `<cache_dir>/stencil_<id>.cache`. Pure, no I/O.
pub fn artifact_path(cache_dir: &Path, id: &ArtifactId) -> PathBuf {
    cache_dir.join(id.artifact_file_name())
}
