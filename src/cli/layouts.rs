//! `layouts` command: list the available layouts.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CliContext, CliResult};

/// List available layouts
#[derive(Debug, Clone, Args)]
pub struct LayoutsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct LayoutSummary {
    name: String,
    title: String,
    rows: usize,
    keys: usize,
    shift: bool,
}

impl LayoutsArgs {
    /// Execute the layouts command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let config = ctx.load_config()?;
        let layouts = ctx.load_layouts(&config)?;

        let summaries: Vec<LayoutSummary> = layouts
            .layouts()
            .iter()
            .map(|layout| LayoutSummary {
                name: layout.name.clone(),
                title: layout.display_title().to_string(),
                rows: layout.default_rows.len(),
                keys: layout.key_count(),
                shift: layout.has_shift(),
            })
            .collect();

        if self.json {
            return print_json(&summaries);
        }

        println!("{:<12} {:<16} {:>4} {:>5}  SHIFT", "NAME", "TITLE", "ROWS", "KEYS");
        for summary in &summaries {
            println!(
                "{:<12} {:<16} {:>4} {:>5}  {}",
                summary.name,
                summary.title,
                summary.rows,
                summary.keys,
                if summary.shift { "yes" } else { "no" }
            );
        }

        Ok(())
    }
}
