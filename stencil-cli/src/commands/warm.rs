//! `stencil warm`: compile and load templates ahead of first use.

use anyhow::{bail, Context, Result};
use clap::Args;

use stencil_loader::{Freshness, Loader};

/// Arguments for `stencil warm`.
#[derive(Args, Debug)]
pub struct WarmArgs {
    /// Templates to warm (defaults to every template under the root).
    pub names: Vec<String>,
}

impl WarmArgs {
    pub fn run(self, loader: &Loader) -> Result<()> {
        let names: Vec<String> = if self.names.is_empty() {
            loader
                .template_names()
                .context("failed to list templates")?
                .into_iter()
                .map(|name| name.0)
                .collect()
        } else {
            self.names
        };

        let mut compiled = 0usize;
        let mut cached = 0usize;
        let mut failed = Vec::new();
        for name in &names {
            let was_fresh = match loader.status(name) {
                Ok(freshness) => matches!(freshness, Freshness::Fresh { .. }),
                Err(err) => {
                    eprintln!("  ✗ {name}: {err:#}");
                    failed.push(name.clone());
                    continue;
                }
            };
            match loader.get_template(name) {
                Ok(_) if was_fresh => cached += 1,
                Ok(_) => {
                    compiled += 1;
                    println!("  compiled {name}");
                }
                Err(err) => {
                    eprintln!("  ✗ {name}: {err:#}");
                    failed.push(name.clone());
                }
            }
        }

        println!(
            "✓ {} template(s) loaded ({} compiled, {} cached)",
            compiled + cached,
            compiled,
            cached
        );
        if !failed.is_empty() {
            bail!("{} template(s) failed: {}", failed.len(), failed.join(", "));
        }
        Ok(())
    }
}
