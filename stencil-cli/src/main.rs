//! Stencil: compile-and-cache template CLI.
//!
//! # Usage
//!
//! ```text
//! stencil [--config stencil.yaml] [--templates DIR] [--cache DIR] [--no-atomic] [-v] <command>
//! stencil render <name> [--context FILE] [--var key=value]...
//! stencil compile <name>
//! stencil key <name>
//! stencil status [<name>...] [--json]
//! stencil warm [<name>...]
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use commands::{
    compile::CompileArgs, key::KeyArgs, render::RenderArgs, status::StatusArgs, warm::WarmArgs,
};
use stencil_core::{config, LoaderConfig};
use stencil_loader::Loader;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "stencil",
    version,
    about = "Compile, cache and render templates",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Config file (defaults to ./stencil.yaml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Template root directory; overrides the config file.
    #[arg(long, global = true)]
    templates: Option<PathBuf>,

    /// Artifact cache directory; overrides the config file.
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Truncate artifacts in place instead of writing through a temp file.
    #[arg(long, global = true)]
    no_atomic: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template to stdout.
    Render(RenderArgs),

    /// Print the generated artifact for a template without caching it.
    Compile(CompileArgs),

    /// Show the artifact id and paths a template name maps to.
    Key(KeyArgs),

    /// Show artifact freshness for templates.
    Status(StatusArgs),

    /// Compile and load templates ahead of time.
    Warm(WarmArgs),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

impl GlobalArgs {
    fn loader_config(&self) -> Result<LoaderConfig> {
        let file = match &self.config {
            Some(path) => Some(
                config::load_at(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
            ),
            None => {
                let cwd = std::env::current_dir().context("could not determine current directory")?;
                config::discover_at(&cwd).context("failed to load ./stencil.yaml")?
            }
        };

        let mut config = match (file, &self.templates) {
            (Some(mut config), Some(templates)) => {
                config.template_root = templates.clone();
                config
            }
            (Some(config), None) => config,
            (None, Some(templates)) => match &self.cache {
                Some(cache) => LoaderConfig::new(templates, cache),
                None => LoaderConfig::with_default_cache(templates)?,
            },
            (None, None) => {
                bail!("no template root: pass --templates <DIR> or create stencil.yaml")
            }
        };

        if let Some(cache) = &self.cache {
            config.cache_dir = cache.clone();
        }
        if self.no_atomic {
            config.atomic_writes = false;
        }
        Ok(config)
    }

    fn init_logging(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
            .format_timestamp(None)
            .init();
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.global.init_logging();

    let config = cli.global.loader_config()?;
    log::debug!(
        "templates: {}, cache: {}",
        config.template_root.display(),
        config.cache_dir.display()
    );
    let loader = Loader::new(&config);

    match cli.command {
        Commands::Render(args) => args.run(&loader),
        Commands::Compile(args) => args.run(&loader),
        Commands::Key(args) => args.run(&loader),
        Commands::Status(args) => args.run(&loader),
        Commands::Warm(args) => args.run(&loader),
    }
}
