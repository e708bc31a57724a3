//! # stencil-loader
//!
//! Compile-and-cache template loading.
//!
//! A [`Loader`] resolves a template name to its source file, compiles the
//! source into a cache artifact when the artifact is missing or older than
//! the source, loads the artifact once per process into a [`UnitRegistry`],
//! and hands back a [`Template`] to render.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stencil_core::{LoaderConfig, RenderContext};
//! use stencil_loader::Loader;
//!
//! fn greet() -> Result<String, Box<dyn std::error::Error>> {
//!     let loader = Loader::new(&LoaderConfig::new("templates", ".stencil-cache"));
//!     let mut ctx = RenderContext::new();
//!     ctx.insert("user".into(), "ada".into());
//!     Ok(loader.get_template("mail/welcome.txt")?.render(Some(&ctx))?)
//! }
//! ```

pub mod error;
pub mod keyer;
pub mod loader;
pub mod orchestrator;
pub mod registry;
pub mod resolver;
pub mod staleness;
pub mod template;

pub use error::LoadError;
pub use loader::Loader;
pub use orchestrator::WriteMode;
pub use registry::UnitRegistry;
pub use resolver::{FolderResolver, Resolve};
pub use staleness::{CompileReason, Freshness};
pub use template::Template;
