//! `stencil status`: artifact freshness per template.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use stencil_loader::{staleness::format_system_time_age, Freshness, Loader};

/// Arguments for `stencil status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Templates to check (defaults to every template under the root).
    pub names: Vec<String>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self, loader: &Loader) -> Result<()> {
        let names = if self.names.is_empty() {
            loader
                .template_names()
                .context("failed to list templates")?
                .into_iter()
                .map(|name| name.0)
                .collect()
        } else {
            self.names
        };

        let mut rows = Vec::with_capacity(names.len());
        for name in names {
            let freshness = loader
                .status(&name)
                .with_context(|| format!("status check failed for '{name}'"))?;
            rows.push(TemplateStatus {
                id: loader.artifact_id(&name).0,
                name,
                freshness,
            });
        }

        if self.json {
            return print_json(&rows);
        }
        print_table(loader, rows);
        Ok(())
    }
}

#[derive(Debug)]
struct TemplateStatus {
    name: String,
    id: String,
    freshness: Freshness,
}

#[derive(Serialize)]
struct TemplateStatusJson<'a> {
    template: &'a str,
    id: &'a str,
    status: &'static str,
    detail: String,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "template")]
    template: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "detail")]
    detail: String,
    #[tabled(rename = "artifact")]
    artifact: String,
}

fn print_json(rows: &[TemplateStatus]) -> Result<()> {
    let payload: Vec<TemplateStatusJson<'_>> = rows
        .iter()
        .map(|row| TemplateStatusJson {
            template: &row.name,
            id: &row.id,
            status: freshness_key(&row.freshness),
            detail: freshness_detail(&row.freshness),
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(loader: &Loader, rows: Vec<TemplateStatus>) {
    let stale = rows
        .iter()
        .filter(|r| !matches!(r.freshness, Freshness::Fresh { .. }))
        .count();
    println!(
        "Stencil v{} | {} templates | {} need compiling | cache {}",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        stale,
        loader.cache_dir().display(),
    );

    if rows.is_empty() {
        println!("No templates found.");
        return;
    }

    let table_rows: Vec<StatusTableRow> = rows
        .into_iter()
        .map(|row| StatusTableRow {
            template: row.name,
            status: format!(
                "{} {}",
                freshness_indicator(&row.freshness),
                freshness_label(&row.freshness)
            ),
            detail: freshness_detail(&row.freshness),
            artifact: row.id.chars().take(12).collect(),
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if stale > 0 {
        println!("Run 'stencil warm' to compile stale templates.");
    }
}

fn freshness_key(freshness: &Freshness) -> &'static str {
    match freshness {
        Freshness::Missing => "missing",
        Freshness::NeverCompiled => "never_compiled",
        Freshness::Stale { .. } => "stale",
        Freshness::Fresh { .. } => "fresh",
    }
}

fn freshness_label(freshness: &Freshness) -> &'static str {
    match freshness {
        Freshness::Missing => "MISSING",
        Freshness::NeverCompiled => "NEVER COMPILED",
        Freshness::Stale { .. } => "STALE",
        Freshness::Fresh { .. } => "FRESH",
    }
}

fn freshness_indicator(freshness: &Freshness) -> String {
    match freshness {
        Freshness::Missing => "■".red().bold().to_string(),
        Freshness::NeverCompiled => "■".bright_black().bold().to_string(),
        Freshness::Stale { .. } => "■".yellow().bold().to_string(),
        Freshness::Fresh { .. } => "■".green().bold().to_string(),
    }
}

fn freshness_detail(freshness: &Freshness) -> String {
    match freshness {
        Freshness::Missing => "no source file".to_string(),
        Freshness::NeverCompiled => "no cached artifact".to_string(),
        Freshness::Stale {
            source_modified,
            artifact_modified,
        } => format!(
            "source edited {} ago, artifact built {} ago",
            format_system_time_age(*source_modified),
            format_system_time_age(*artifact_modified)
        ),
        Freshness::Fresh { artifact_modified } => {
            format!("built {} ago", format_system_time_age(*artifact_modified))
        }
    }
}
