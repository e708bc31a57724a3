//! `stencil compile`: print generated code, bypassing the cache.

use anyhow::{Context, Result};
use clap::Args;

use stencil_loader::Loader;

/// Arguments for `stencil compile`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Template name, relative to the template root.
    pub name: String,
}

impl CompileArgs {
    pub fn run(self, loader: &Loader) -> Result<()> {
        let code = loader
            .compile_template(&self.name)
            .with_context(|| format!("compile failed for '{}'", self.name))?;
        print!("{code}");
        Ok(())
    }
}
