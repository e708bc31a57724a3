//! # stencil-compiler
//!
//! The compiler collaborator of the Stencil loader: turns template source into
//! a persisted artifact, and installs artifact bytes as an invokable
//! [`CompiledUnit`].
//!
//! The loader only talks to the [`Compiler`] and [`CompiledUnit`] traits; the
//! Tera-backed [`TeraCompiler`] is the default implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stencil_compiler::{Compiler, TeraCompiler};
//! use stencil_core::{ArtifactId, RenderContext, TemplateName};
//!
//! fn compile_and_run(source: &str) -> Result<String, Box<dyn std::error::Error>> {
//!     let compiler = TeraCompiler::new();
//!     let name = TemplateName::from("hello.txt");
//!     let artifact = compiler.compile_to_string(&name, source)?;
//!     let unit = compiler.load(&ArtifactId::from("demo"), artifact.as_bytes())?;
//!     let mut out = Vec::new();
//!     unit.render(&RenderContext::new(), &mut out)?;
//!     Ok(String::from_utf8(out)?)
//! }
//! ```

pub mod artifact;
pub mod context;
pub mod engine;
pub mod error;
pub mod unit;

pub use artifact::{ArtifactDocument, ARTIFACT_FORMAT};
pub use engine::{TeraCompiler, TeraUnit};
pub use error::{CompileError, RenderError};
pub use unit::{CompiledUnit, Compiler};
