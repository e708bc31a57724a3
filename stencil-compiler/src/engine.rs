//! Tera-backed [`Compiler`] and [`CompiledUnit`].
//!
//! Compiling parses the source with Tera (syntax errors surface here, not at
//! render time) and emits an [`ArtifactDocument`]. Loading parses the document
//! and registers its body in a private [`Tera`] instance under the unit name
//! derived from the artifact id.

use std::io::Write;
use std::sync::Arc;

use tera::Tera;

use stencil_core::{ArtifactId, RenderContext, TemplateName};

use crate::artifact::ArtifactDocument;
use crate::context::to_tera_context;
use crate::error::{CompileError, RenderError};
use crate::unit::{CompiledUnit, Compiler};

// ---------------------------------------------------------------------------
// TeraCompiler
// ---------------------------------------------------------------------------

/// Default compiler: Tera syntax, JSON artifact documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeraCompiler;

impl TeraCompiler {
    pub fn new() -> Self {
        TeraCompiler
    }
}

impl Compiler for TeraCompiler {
    fn compile(
        &self,
        name: &TemplateName,
        source: &str,
        sink: &mut dyn Write,
    ) -> Result<(), CompileError> {
        // Normalise line endings to LF before validating and emitting.
        let body = source.replace("\r\n", "\n");

        let mut tera = Tera::default();
        tera.add_raw_template(name.as_str(), &body)
            .map_err(|source| CompileError::Syntax {
                name: name.clone(),
                source,
            })?;

        ArtifactDocument::new(name, body).write_to(sink)
    }

    fn load(&self, id: &ArtifactId, artifact: &[u8]) -> Result<Arc<dyn CompiledUnit>, CompileError> {
        let unit_name = id.unit_name();
        let doc = ArtifactDocument::parse(&unit_name, artifact)?;
        Ok(Arc::new(TeraUnit::install(unit_name, &doc)?))
    }
}

// ---------------------------------------------------------------------------
// TeraUnit
// ---------------------------------------------------------------------------

/// One installed template, owning the Tera instance that executes it.
pub struct TeraUnit {
    tera: Tera,
    unit_name: String,
}

impl TeraUnit {
    fn install(unit_name: String, doc: &ArtifactDocument) -> Result<Self, CompileError> {
        let mut tera = Tera::default();
        // Tera matches autoescape suffixes against the template name; the unit
        // name carries no extension, so the decision is made explicitly.
        if doc.autoescape {
            tera.autoescape_on(vec![""]);
        } else {
            tera.autoescape_on(vec![]);
        }
        tera.add_raw_template(&unit_name, &doc.body)
            .map_err(|source| CompileError::InvalidArtifact {
                unit: unit_name.clone(),
                source,
            })?;
        Ok(TeraUnit { tera, unit_name })
    }
}

impl CompiledUnit for TeraUnit {
    fn unit_name(&self) -> &str {
        &self.unit_name
    }

    fn render(&self, context: &RenderContext, out: &mut dyn Write) -> Result<(), RenderError> {
        let ctx = to_tera_context(context)?;
        self.tera.render_to(&self.unit_name, &ctx, out)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
