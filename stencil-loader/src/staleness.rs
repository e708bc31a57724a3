//! Source vs. artifact freshness.
//!
//! An artifact is valid iff its mtime is not older than its source's.
//! Equal mtimes count as fresh.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::error::{io_err, LoadError};

/// Why an artifact has to be (re)compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileReason {
    /// No artifact on disk yet.
    Missing,
    /// Source modified after the artifact was written.
    Stale,
}

impl fmt::Display for CompileReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileReason::Missing => write!(f, "no cached artifact"),
            CompileReason::Stale => write!(f, "source newer than artifact"),
        }
    }
}

/// Read-only classification of one template, used for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// No source file.
    Missing,
    /// Source exists, artifact does not.
    NeverCompiled,
    /// Artifact older than source.
    Stale {
        source_modified: SystemTime,
        artifact_modified: SystemTime,
    },
    /// Artifact up to date.
    Fresh { artifact_modified: SystemTime },
}

/// Modification time of `path`, or `None` if it does not exist.
pub fn modified_time(path: &Path) -> Result<Option<SystemTime>, LoadError> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_err(path, err)),
    };
    meta.modified().map(Some).map_err(|e| io_err(path, e))
}

/// Modification time of the template source at `path`.
///
/// Anything that is not a regular file (a directory, most often the template
/// root itself once every segment was sanitized away) counts as absent.
pub fn source_modified_time(path: &Path) -> Result<Option<SystemTime>, LoadError> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(io_err(path, err)),
    };
    if !meta.is_file() {
        return Ok(None);
    }
    meta.modified().map(Some).map_err(|e| io_err(path, e))
}

/// Decide whether `artifact` must be rebuilt for a source modified at `source_modified`.
pub fn compile_reason(
    source_modified: SystemTime,
    artifact: &Path,
) -> Result<Option<CompileReason>, LoadError> {
    match modified_time(artifact)? {
        None => Ok(Some(CompileReason::Missing)),
        Some(artifact_modified) if artifact_modified < source_modified => {
            Ok(Some(CompileReason::Stale))
        }
        Some(_) => Ok(None),
    }
}

/// Classify `source` / `artifact` without modifying anything.
pub fn check(source: &Path, artifact: &Path) -> Result<Freshness, LoadError> {
    let Some(source_modified) = source_modified_time(source)? else {
        return Ok(Freshness::Missing);
    };
    let Some(artifact_modified) = modified_time(artifact)? else {
        return Ok(Freshness::NeverCompiled);
    };
    if artifact_modified < source_modified {
        return Ok(Freshness::Stale {
            source_modified,
            artifact_modified,
        });
    }
    Ok(Freshness::Fresh { artifact_modified })
}

/// Format age from a filesystem timestamp.
pub fn format_system_time_age(timestamp: SystemTime) -> String {
    let age = SystemTime::now()
        .duration_since(timestamp)
        .unwrap_or_default();
    format_duration(age)
}

fn format_duration(duration: Duration) -> String {
    format_seconds(duration.as_secs())
}

fn format_seconds(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 60 * 60 {
        return format!("{}m", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h", seconds / (60 * 60));
    }
    format!("{}d", seconds / (60 * 60 * 24))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{set_file_mtime, FileTime};
    use std::fs;
    use tempfile::TempDir;

    fn at(secs_ago: u64) -> FileTime {
        FileTime::from_system_time(SystemTime::now() - Duration::from_secs(secs_ago))
    }

    fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let tmp = TempDir::new().expect("tmp");
        let source = tmp.path().join("page.tpl");
        let artifact = tmp.path().join("stencil_x.cache");
        fs::write(&source, "hello").expect("write source");
        (tmp, source, artifact)
    }

    #[test]
    fn missing_artifact_needs_compile() {
        let (_tmp, source, artifact) = setup();
        let mtime = modified_time(&source).unwrap().unwrap();
        assert_eq!(
            compile_reason(mtime, &artifact).unwrap(),
            Some(CompileReason::Missing)
        );
        assert_eq!(check(&source, &artifact).unwrap(), Freshness::NeverCompiled);
    }

    #[test]
    fn older_artifact_is_stale() {
        let (_tmp, source, artifact) = setup();
        fs::write(&artifact, "{}").unwrap();
        set_file_mtime(&artifact, at(120)).unwrap();
        set_file_mtime(&source, at(60)).unwrap();

        let mtime = modified_time(&source).unwrap().unwrap();
        assert_eq!(
            compile_reason(mtime, &artifact).unwrap(),
            Some(CompileReason::Stale)
        );
        assert!(matches!(
            check(&source, &artifact).unwrap(),
            Freshness::Stale { .. }
        ));
    }

    #[test]
    fn equal_mtimes_are_fresh() {
        let (_tmp, source, artifact) = setup();
        fs::write(&artifact, "{}").unwrap();
        let same = at(30);
        set_file_mtime(&artifact, same).unwrap();
        set_file_mtime(&source, same).unwrap();

        let mtime = modified_time(&source).unwrap().unwrap();
        assert_eq!(compile_reason(mtime, &artifact).unwrap(), None);
        assert!(matches!(
            check(&source, &artifact).unwrap(),
            Freshness::Fresh { .. }
        ));
    }

    #[test]
    fn newer_artifact_is_fresh() {
        let (_tmp, source, artifact) = setup();
        fs::write(&artifact, "{}").unwrap();
        set_file_mtime(&source, at(300)).unwrap();
        set_file_mtime(&artifact, at(10)).unwrap();

        let mtime = modified_time(&source).unwrap().unwrap();
        assert_eq!(compile_reason(mtime, &artifact).unwrap(), None);
    }

    #[test]
    fn missing_source_is_reported() {
        let tmp = TempDir::new().unwrap();
        let freshness = check(&tmp.path().join("gone.tpl"), &tmp.path().join("a.cache")).unwrap();
        assert_eq!(freshness, Freshness::Missing);
    }

    #[test]
    fn directory_source_is_missing() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("mail");
        fs::create_dir(&dir).unwrap();

        assert_eq!(source_modified_time(&dir).unwrap(), None);
        assert!(modified_time(&dir).unwrap().is_some());
        assert_eq!(
            check(&dir, &tmp.path().join("a.cache")).unwrap(),
            Freshness::Missing
        );
    }

    #[test]
    fn ages_are_compact() {
        let time = SystemTime::now() - Duration::from_secs(65);
        assert_eq!(format_system_time_age(time), "1m");
        assert_eq!(format_seconds(59), "59s");
        assert_eq!(format_seconds(2 * 60 * 60), "2h");
        assert_eq!(format_seconds(3 * 24 * 60 * 60), "3d");
    }
}
