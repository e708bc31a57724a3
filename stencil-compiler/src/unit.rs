//! Collaborator seams consumed by the loader.

use std::io::Write;
use std::sync::Arc;

use stencil_core::{ArtifactId, RenderContext, TemplateName};

use crate::error::{CompileError, RenderError};

/// Source → artifact code generation, and artifact → unit installation.
pub trait Compiler: Send + Sync {
    /// Compile `source` for `name`, writing generated code incrementally into `sink`.
    fn compile(
        &self,
        name: &TemplateName,
        source: &str,
        sink: &mut dyn Write,
    ) -> Result<(), CompileError>;

    /// Compile without a persistent sink and hand the generated code back.
    fn compile_to_string(&self, name: &TemplateName, source: &str) -> Result<String, CompileError> {
        let mut buf = Vec::new();
        self.compile(name, source, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Install artifact bytes as an invokable unit named after `id`.
    fn load(&self, id: &ArtifactId, artifact: &[u8]) -> Result<Arc<dyn CompiledUnit>, CompileError>;
}

/// A loaded, invokable template.
pub trait CompiledUnit: Send + Sync {
    /// Name the unit was installed under.
    fn unit_name(&self) -> &str;

    /// Write the rendered template for `context` into `out`.
    fn render(&self, context: &RenderContext, out: &mut dyn Write) -> Result<(), RenderError>;
}
