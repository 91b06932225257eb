//! `show` command: print the rows of one layout.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CliContext, CliError, CliResult};
use crate::models::KeyRow;
use crate::services::KeyLayoutResolver;

/// Print the keys of a layout
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Layout name (see `layouts`)
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Show the row-set displayed while shift is active
    #[arg(long)]
    pub shift: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ShowResult<'a> {
    name: &'a str,
    title: &'a str,
    /// Whether the rows are the shift row-set
    shifted: bool,
    rows: &'a [KeyRow],
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        let config = ctx.load_config()?;
        let layouts = ctx.load_layouts(&config)?;

        let layout = layouts.get(&self.name).ok_or_else(|| {
            let known: Vec<_> = layouts.names().collect();
            CliError::validation(format!(
                "Unknown layout '{}'. Available layouts: {}",
                self.name,
                known.join(", ")
            ))
        })?;

        let rows = KeyLayoutResolver::rows(layout, self.shift);
        let result = ShowResult {
            name: &layout.name,
            title: layout.display_title(),
            shifted: self.shift && layout.has_shift(),
            rows,
        };

        if self.json {
            return print_json(&result);
        }

        println!("{} ({})", result.title, result.name);
        if self.shift && !result.shifted {
            println!("(no shift row-set, showing default rows)");
        }
        for row in rows {
            let keys: Vec<String> = row.iter().map(|label| format!("[{label}]")).collect();
            println!("{}", keys.join(" "));
        }

        Ok(())
    }
}
