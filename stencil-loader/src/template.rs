//! [`Template`], the render facade handed to application code.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use stencil_compiler::{CompiledUnit, RenderError};
use stencil_core::RenderContext;

/// Cheap per-call wrapper around one loaded unit. Holds no cache state.
#[derive(Clone)]
pub struct Template {
    unit: Arc<dyn CompiledUnit>,
}

impl Template {
    pub fn new(unit: Arc<dyn CompiledUnit>) -> Self {
        Template { unit }
    }

    /// Name the underlying unit is registered under.
    pub fn unit_name(&self) -> &str {
        self.unit.unit_name()
    }

    /// Render into `out`. `None` renders with an empty context.
    pub fn display(
        &self,
        context: Option<&RenderContext>,
        out: &mut dyn Write,
    ) -> Result<(), RenderError> {
        match context {
            Some(ctx) => self.unit.render(ctx, out),
            None => self.unit.render(&RenderContext::new(), out),
        }
    }

    /// Render into a private buffer and return the text.
    ///
    /// Output only ever reaches the buffer, so a failing render leaves no
    /// partial output anywhere the caller can see.
    pub fn render(&self, context: Option<&RenderContext>) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        self.display(context, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Render to stdout.
    pub fn print(&self, context: Option<&RenderContext>) -> Result<(), RenderError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.display(context, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("unit", &self.unit.unit_name())
            .finish()
    }
}
