//! Loader configuration.
//!
//! # File format
//!
//! ```yaml
//! template_root: templates        # relative to the config file's directory
//! cache_dir: .stencil-cache       # optional; defaults to <user cache dir>/stencil
//! atomic_writes: true             # optional; defaults to true
//! ```
//!
//! # API pattern
//!
//! - `load_at(path)`: explicit config file; used in tests with `TempDir`
//! - `discover_at(dir)`: `<dir>/stencil.yaml` if present, `None` otherwise

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default config filename looked up by [`discover_at`].
pub const CONFIG_FILE_NAME: &str = "stencil.yaml";

/// Where templates live, where artifacts go, and how artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory holding template sources.
    pub template_root: PathBuf,
    /// Directory holding compiled artifacts.
    pub cache_dir: PathBuf,
    /// Write artifacts through a temp file + rename instead of truncating in place.
    pub atomic_writes: bool,
}

/// On-disk shape: everything but the template root may be omitted.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    template_root: PathBuf,
    #[serde(default)]
    cache_dir: Option<PathBuf>,
    #[serde(default = "default_atomic_writes")]
    atomic_writes: bool,
}

fn default_atomic_writes() -> bool {
    true
}

impl LoaderConfig {
    /// Build a config with explicit directories and atomic writes enabled.
    pub fn new(template_root: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        LoaderConfig {
            template_root: template_root.into(),
            cache_dir: cache_dir.into(),
            atomic_writes: true,
        }
    }

    /// Build a config for `template_root`, caching under [`default_cache_dir`].
    pub fn with_default_cache(template_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(LoaderConfig::new(template_root, default_cache_dir()?))
    }

    pub fn atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }
}

/// `<user cache dir>/stencil`
pub fn default_cache_dir() -> Result<PathBuf, ConfigError> {
    dirs::cache_dir()
        .map(|dir| dir.join("stencil"))
        .ok_or(ConfigError::CacheDirNotFound)
}

/// Load a config file. Relative paths resolve against the file's directory.
pub fn load_at(path: &Path) -> Result<LoaderConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let cache_dir = match file.cache_dir {
        Some(dir) => base.join(dir),
        None => default_cache_dir()?,
    };
    Ok(LoaderConfig {
        template_root: base.join(file.template_root),
        cache_dir,
        atomic_writes: file.atomic_writes,
    })
}

/// Load `<dir>/stencil.yaml` if it exists.
pub fn discover_at(dir: &Path) -> Result<Option<LoaderConfig>, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    load_at(&path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn new_enables_atomic_writes() {
        let config = LoaderConfig::new("/t", "/c");
        assert!(config.atomic_writes);
        assert!(!config.atomic_writes(false).atomic_writes);
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "template_root: templates\ncache_dir: cache\n").unwrap();

        let config = load_at(&path).unwrap();
        assert_eq!(config.template_root, tmp.path().join("templates"));
        assert_eq!(config.cache_dir, tmp.path().join("cache"));
        assert!(config.atomic_writes);
    }

    #[test]
    fn absolute_paths_are_kept() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "template_root: /srv/templates\ncache_dir: /var/cache/stencil\natomic_writes: false\n",
        )
        .unwrap();

        let config = load_at(&path).unwrap();
        assert_eq!(config.template_root, PathBuf::from("/srv/templates"));
        assert_eq!(config.cache_dir, PathBuf::from("/var/cache/stencil"));
        assert!(!config.atomic_writes);
    }

    #[test]
    fn discover_returns_none_without_file() {
        let tmp = TempDir::new().unwrap();
        assert!(discover_at(tmp.path()).unwrap().is_none());
    }
}
