//! Stencil core library: domain types, loader configuration, errors.
//!
//! Public API surface:
//! - [`types`]: newtypes for template names, artifact ids and render contexts
//! - [`config`]: [`LoaderConfig`] and its YAML loader
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::LoaderConfig;
pub use error::ConfigError;
pub use types::{ArtifactId, RenderContext, TemplateName};
