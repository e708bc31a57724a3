//! Process-wide registry of loaded units, keyed by [`ArtifactId`].
//!
//! Insertion is first-wins: once a unit is registered under an id, later
//! inserts for that id hand back the registered unit and drop theirs. There is
//! no removal.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use stencil_compiler::{CompiledUnit, Compiler};
use stencil_core::ArtifactId;

use crate::error::{io_err, LoadError};

#[derive(Default)]
pub struct UnitRegistry {
    units: Mutex<HashMap<ArtifactId, Arc<dyn CompiledUnit>>>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by every loader that was not given its own.
    pub fn global() -> Arc<UnitRegistry> {
        static GLOBAL: OnceLock<Arc<UnitRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(UnitRegistry::new())).clone()
    }

    pub fn get(&self, id: &ArtifactId) -> Option<Arc<dyn CompiledUnit>> {
        self.lock().get(id).cloned()
    }

    pub fn contains(&self, id: &ArtifactId) -> bool {
        self.lock().contains_key(id)
    }

    /// Register `unit` under `id` unless one is already there; returns the registered unit.
    pub fn insert(&self, id: ArtifactId, unit: Arc<dyn CompiledUnit>) -> Arc<dyn CompiledUnit> {
        self.lock().entry(id).or_insert(unit).clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load the artifact at `path` and register it under `id`.
    ///
    /// Idempotent: an id that is already registered returns its unit without
    /// reading the file.
    pub fn load(
        &self,
        compiler: &dyn Compiler,
        id: &ArtifactId,
        path: &Path,
    ) -> Result<Arc<dyn CompiledUnit>, LoadError> {
        if let Some(unit) = self.get(id) {
            return Ok(unit);
        }
        let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
        let unit = compiler
            .load(id, &bytes)
            .map_err(|source| LoadError::Artifact {
                path: path.to_path_buf(),
                source,
            })?;
        let unit = self.insert(id.clone(), unit);
        tracing::debug!("loaded unit {} from {}", unit.unit_name(), path.display());
        Ok(unit)
    }

    // A panic while holding the lock cannot leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<ArtifactId, Arc<dyn CompiledUnit>>> {
        self.units.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
