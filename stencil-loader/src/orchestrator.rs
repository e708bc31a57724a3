//! Compile orchestration: source file → compiler → artifact sink.
//!
//! ## Write modes
//!
//! - [`WriteMode::Truncate`] opens the artifact path for writing and streams
//!   compiler output straight into it. A failing compile leaves whatever was
//!   written so far.
//! - [`WriteMode::Atomic`] streams into a sibling `<artifact>.<pid>.<n>.stencil.tmp`,
//!   then renames it over the artifact. On any failure the temp file is
//!   removed and the previous artifact (if any) stays untouched. Each writer
//!   gets its own temp file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use stencil_compiler::Compiler;
use stencil_core::TemplateName;

use crate::error::{io_err, LoadError};

/// How compiled artifacts reach the cache directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Truncate,
    Atomic,
}

impl WriteMode {
    pub fn from_atomic(atomic: bool) -> Self {
        if atomic {
            WriteMode::Atomic
        } else {
            WriteMode::Truncate
        }
    }
}

/// Suffix of every temp file written by [`WriteMode::Atomic`].
pub const TMP_SUFFIX: &str = ".stencil.tmp";

/// Fresh temp path next to `artifact`; unique per process and call.
pub fn tmp_path(artifact: &Path) -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    PathBuf::from(format!(
        "{}.{}.{n}{TMP_SUFFIX}",
        artifact.display(),
        std::process::id()
    ))
}

/// Compile `source_path` into `artifact_path`, overwriting any previous artifact.
pub fn compile_to_path(
    compiler: &dyn Compiler,
    name: &TemplateName,
    source_path: &Path,
    artifact_path: &Path,
    mode: WriteMode,
) -> Result<(), LoadError> {
    let source = read_source(source_path)?;

    if let Some(parent) = artifact_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    match mode {
        WriteMode::Truncate => write_artifact(compiler, name, &source, artifact_path)?,
        WriteMode::Atomic => {
            let tmp = tmp_path(artifact_path);
            if let Err(err) = write_artifact(compiler, name, &source, &tmp) {
                let _ = std::fs::remove_file(&tmp);
                return Err(err);
            }
            if let Err(e) = std::fs::rename(&tmp, artifact_path) {
                let _ = std::fs::remove_file(&tmp);
                return Err(io_err(artifact_path, e));
            }
        }
    }

    tracing::info!("wrote artifact for '{}': {}", name, artifact_path.display());
    Ok(())
}

/// Compile `source_path` with no persistent sink and return the generated code.
pub fn compile_in_memory(
    compiler: &dyn Compiler,
    name: &TemplateName,
    source_path: &Path,
) -> Result<String, LoadError> {
    let source = read_source(source_path)?;
    Ok(compiler.compile_to_string(name, &source)?)
}

fn read_source(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| io_err(path, e))
}

fn write_artifact(
    compiler: &dyn Compiler,
    name: &TemplateName,
    source: &str,
    path: &Path,
) -> Result<(), LoadError> {
    let file = File::create(path).map_err(|e| io_err(path, e))?;
    let mut sink = BufWriter::new(file);
    compiler.compile(name, source, &mut sink)?;
    sink.flush().map_err(|e| io_err(path, e))?;
    Ok(())
}
