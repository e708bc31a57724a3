//! [`Loader`]: template name in, ready-to-render [`Template`] out.
//!
//! ## `require_template`: per-id state machine
//!
//! 1. Derive the id; a registered unit is returned with no I/O.
//! 2. Resolve the source path; a missing source is `TemplateNotFound`.
//! 3. Compare source and artifact mtimes.
//! 4. (Re)compile into the artifact path when missing or stale.
//! 5. Load the artifact and register it under the id.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use stencil_compiler::{CompiledUnit, Compiler, TeraCompiler};
use stencil_core::{ArtifactId, LoaderConfig, TemplateName};

use crate::error::LoadError;
use crate::keyer;
use crate::orchestrator::{self, WriteMode};
use crate::registry::UnitRegistry;
use crate::resolver::{FolderResolver, Resolve};
use crate::staleness::{self, Freshness};
use crate::template::Template;

/// Resolves, compiles, caches and loads templates.
///
/// Loaders built with [`Loader::new`] share the process-wide
/// [`UnitRegistry::global`]; ids are derived from names only, so two loaders
/// over different roots see each other's units for equal names.
pub struct Loader {
    resolver: Box<dyn Resolve>,
    cache_dir: PathBuf,
    write_mode: WriteMode,
    compiler: Arc<dyn Compiler>,
    registry: Arc<UnitRegistry>,
}

impl Loader {
    /// Folder-based loader with the Tera compiler and the global registry.
    pub fn new(config: &LoaderConfig) -> Self {
        Loader {
            resolver: Box::new(FolderResolver::new(&config.template_root)),
            cache_dir: config.cache_dir.clone(),
            write_mode: WriteMode::from_atomic(config.atomic_writes),
            compiler: Arc::new(TeraCompiler::new()),
            registry: UnitRegistry::global(),
        }
    }

    pub fn with_compiler(mut self, compiler: Arc<dyn Compiler>) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn with_registry(mut self, registry: Arc<UnitRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_resolver(mut self, resolver: impl Resolve + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// Load `name` and wrap it for rendering.
    pub fn get_template(&self, name: &str) -> Result<Template, LoadError> {
        Ok(Template::new(self.require_template(name)?))
    }

    /// Load `name`, compiling it first if its artifact is missing or stale.
    pub fn require_template(&self, name: &str) -> Result<Arc<dyn CompiledUnit>, LoadError> {
        let name = TemplateName::from(name);
        let id = keyer::key_of(&name);
        if let Some(unit) = self.registry.get(&id) {
            tracing::debug!("registry hit for '{}' ({})", name, id);
            return Ok(unit);
        }

        let source_path = self.resolver.resolve(&name);
        let Some(source_modified) = staleness::source_modified_time(&source_path)? else {
            return Err(LoadError::TemplateNotFound {
                name,
                path: source_path,
            });
        };

        let artifact_path = keyer::artifact_path(&self.cache_dir, &id);
        if let Some(reason) = staleness::compile_reason(source_modified, &artifact_path)? {
            tracing::info!("compiling '{}': {}", name, reason);
            orchestrator::compile_to_path(
                self.compiler.as_ref(),
                &name,
                &source_path,
                &artifact_path,
                self.write_mode,
            )?;
        }

        self.registry
            .load(self.compiler.as_ref(), &id, &artifact_path)
    }

    /// Compile `name` without touching the cache or the registry and return
    /// the generated code.
    pub fn compile_template(&self, name: &str) -> Result<String, LoadError> {
        let name = TemplateName::from(name);
        let source_path = self.existing_source(&name)?;
        orchestrator::compile_in_memory(self.compiler.as_ref(), &name, &source_path)
    }

    /// Artifact id for `name`.
    pub fn artifact_id(&self, name: &str) -> ArtifactId {
        keyer::key_of(&TemplateName::from(name))
    }

    /// Source path `name` resolves to. No filesystem access.
    pub fn source_path(&self, name: &str) -> PathBuf {
        self.resolver.resolve(&TemplateName::from(name))
    }

    /// Cache artifact path for `name`. No filesystem access.
    pub fn cache_path(&self, name: &str) -> PathBuf {
        keyer::artifact_path(&self.cache_dir, &self.artifact_id(name))
    }

    /// Freshness of `name`'s artifact. Never compiles or writes.
    pub fn status(&self, name: &str) -> Result<Freshness, LoadError> {
        staleness::check(&self.source_path(name), &self.cache_path(name))
    }

    /// Whether `name` already has a unit registered in this process.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.registry.contains(&self.artifact_id(name))
    }

    /// Every template name the resolver can enumerate.
    pub fn template_names(&self) -> Result<Vec<TemplateName>, LoadError> {
        self.resolver.list()
    }

    fn existing_source(&self, name: &TemplateName) -> Result<PathBuf, LoadError> {
        let path = self.resolver.resolve(name);
        match staleness::source_modified_time(&path)? {
            Some(_) => Ok(path),
            None => Err(LoadError::TemplateNotFound {
                name: name.clone(),
                path,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn loader(tmp: &TempDir) -> Loader {
        let config = LoaderConfig::new(tmp.path().join("t"), tmp.path().join("c"));
        Loader::new(&config).with_registry(Arc::new(UnitRegistry::new()))
    }

    #[test]
    fn paths_follow_resolver_and_keyer() {
        let tmp = TempDir::new().unwrap();
        let loader = loader(&tmp);
        let id = loader.artifact_id("page.tpl");

        assert_eq!(loader.source_path("../page.tpl"), tmp.path().join("t").join("page.tpl"));
        assert_eq!(
            loader.cache_path("page.tpl"),
            tmp.path().join("c").join(format!("stencil_{id}.cache"))
        );
    }

    #[test]
    fn compile_template_of_missing_source_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = loader(&tmp).compile_template("nope.tpl").unwrap_err();
        assert!(err.is_not_found(), "got: {err}");
    }

    #[test]
    fn custom_resolver_is_used() {
        struct Flat(PathBuf);
        impl Resolve for Flat {
            fn resolve(&self, name: &TemplateName) -> PathBuf {
                self.0.join(name.as_str().replace('/', "__"))
            }
        }

        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("mail__welcome.txt"), "hi {{ who }}").unwrap();
        let loader = loader(&tmp).with_resolver(Flat(tmp.path().to_path_buf()));

        let mut ctx = stencil_core::RenderContext::new();
        ctx.insert("who".to_string(), serde_json::json!("ada"));
        let out = loader
            .get_template("mail/welcome.txt")
            .unwrap()
            .render(Some(&ctx))
            .unwrap();
        assert_eq!(out, "hi ada");
        assert!(loader.template_names().unwrap().is_empty());
    }
}
