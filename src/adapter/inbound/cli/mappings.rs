//! Handler for the `mappings` command.

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::MappingsArgs;
use crate::adapter::inbound::cli::output;
use crate::application::resolve;
use crate::config::{Config, ScanPolicy};
use crate::domain::MarketPairMapping;
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_mapping_source, DataSource};

#[derive(Tabled)]
struct MappingRow {
    #[tabled(rename = "Tier")]
    tier: &'static str,
    #[tabled(rename = "Venue A")]
    a: String,
    #[tabled(rename = "YES A")]
    yes_a: String,
    #[tabled(rename = "Venue B")]
    b: String,
    #[tabled(rename = "YES B")]
    yes_b: String,
    #[tabled(rename = "Polarity")]
    polarity: &'static str,
}

impl From<&MarketPairMapping> for MappingRow {
    fn from(mapping: &MarketPairMapping) -> Self {
        Self {
            tier: mapping.tier.as_str(),
            a: mapping.a.to_string(),
            yes_a: mapping.a.yes_label.clone(),
            b: mapping.b.to_string(),
            yes_b: mapping.b.yes_label.clone(),
            polarity: mapping.polarity.as_str(),
        }
    }
}

/// Print the pairs a scan in the chosen mode would cover.
pub fn execute(args: &MappingsArgs) -> Result<()> {
    let mut policy = ScanPolicy::from_env()?;
    if let Some(mode) = args.mode {
        policy = policy.with_mode(mode);
    }
    let config = Config::load_or_default(&args.config)?;
    let source = if args.stub {
        DataSource::Stub
    } else {
        DataSource::Live
    };

    let table = build_mapping_source(&config, source).load_mappings()?;
    let pairs = resolve(policy.mode, table.as_ref());

    if output::is_json() {
        let rows: Vec<serde_json::Value> = pairs
            .iter()
            .map(|m| {
                json!({
                    "tier": m.tier,
                    "a": m.a,
                    "b": m.b,
                    "polarity": m.polarity,
                })
            })
            .collect();
        output::json_output(json!({
            "command": "mappings",
            "mode": policy.mode,
            "pairs": rows,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Mode", policy.mode);
    if !args.stub {
        output::field("Source", config.mappings.path.display());
    }

    if pairs.is_empty() {
        output::note("No mapped pairs.");
        return Ok(());
    }

    let rows: Vec<MappingRow> = pairs.iter().map(MappingRow::from).collect();
    output::block(&Table::new(rows).with(Style::rounded()).to_string());
    output::field("Pairs", pairs.len());
    Ok(())
}
