//! `stencil key`: show where a template name points.

use anyhow::Result;
use clap::Args;

use stencil_loader::Loader;

/// Arguments for `stencil key`.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Template name, relative to the template root.
    pub name: String,
}

impl KeyArgs {
    pub fn run(self, loader: &Loader) -> Result<()> {
        println!("id:       {}", loader.artifact_id(&self.name));
        println!("unit:     {}", loader.artifact_id(&self.name).unit_name());
        println!("source:   {}", loader.source_path(&self.name).display());
        println!("artifact: {}", loader.cache_path(&self.name).display());
        Ok(())
    }
}
