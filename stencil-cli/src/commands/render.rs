//! `stencil render`: load (compiling if needed) and render a template.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use stencil_core::RenderContext;
use stencil_loader::Loader;

/// Arguments for `stencil render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template name, relative to the template root.
    pub name: String,

    /// JSON or YAML file with the render context (a top-level mapping).
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Context variable; the value is parsed as JSON, falling back to a plain string.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}

impl RenderArgs {
    pub fn run(self, loader: &Loader) -> Result<()> {
        let mut ctx = match &self.context {
            Some(path) => read_context(path)?,
            None => RenderContext::new(),
        };
        for var in &self.vars {
            let (key, value) = parse_var(var)?;
            ctx.insert(key, value);
        }

        let template = loader
            .get_template(&self.name)
            .with_context(|| format!("failed to load template '{}'", self.name))?;
        template
            .print(Some(&ctx))
            .with_context(|| format!("failed to render template '{}'", self.name))?;
        Ok(())
    }
}

fn read_context(path: &Path) -> Result<RenderContext> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read context file {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml" | "yml")
    );
    let ctx = if is_yaml {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("context file {} is not a YAML mapping", path.display()))?
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("context file {} is not a JSON object", path.display()))?
    };
    Ok(ctx)
}

fn parse_var(var: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = var.split_once('=') else {
        bail!("invalid --var '{var}': expected KEY=VALUE");
    };
    if key.is_empty() {
        bail!("invalid --var '{var}': empty key");
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
