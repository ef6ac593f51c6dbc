//! Strategy listing.

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::application::strategy::StrategyRegistry;
use crate::cli::output;
use crate::error::Result;

#[derive(Tabled, Serialize)]
struct StrategyRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

/// List registered strategies.
pub fn list() -> Result<()> {
    let rows: Vec<StrategyRow> = StrategyRegistry::builtin()
        .describe()
        .into_iter()
        .map(|(name, description)| StrategyRow { name, description })
        .collect();

    if output::is_json() {
        return output::json(&rows);
    }

    output::header();
    output::section("Available strategies");
    output::lines(&Table::new(rows).to_string());
    println!();
    output::note("Select one with [strategy] type = \"<name>\" in config.toml");
    Ok(())
}
