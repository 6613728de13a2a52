//! Compare command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use serde::Serialize;

use qctk_ir::{CircuitStats, StatsDelta};

use super::common::{load_circuit, print_delta, print_json};
use crate::config::OutputFormat;

#[derive(Serialize)]
struct Comparison<'a> {
    a: &'a CircuitStats,
    b: &'a CircuitStats,
    delta: &'a StatsDelta,
}

/// Execute the compare command.
pub fn execute(a: &Path, b: &Path, format: OutputFormat) -> Result<()> {
    let stats_a = load_circuit(a)?.circuit().stats();
    let stats_b = load_circuit(b)?.circuit().stats();
    let delta = StatsDelta::between(&stats_a, &stats_b);

    match format {
        OutputFormat::Json => print_json(&Comparison {
            a: &stats_a,
            b: &stats_b,
            delta: &delta,
        })?,
        OutputFormat::Table => {
            println!(
                "{} {} vs {}",
                style("→").cyan().bold(),
                style(a.display()).green(),
                style(b.display()).green()
            );
            print_delta(&delta, &stats_a.name, &stats_b.name);
        }
    }
    Ok(())
}
