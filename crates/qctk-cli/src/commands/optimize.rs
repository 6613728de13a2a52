//! Optimize command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qctk_compile::{CouplingMap, PassManagerBuilder};
use qctk_ir::{Circuit, CircuitStats, StatsDelta};
use qctk_qc::HeaderSection;

use super::common::{FileKind, Loaded, load_circuit, print_delta, print_json, write_output};
use super::verify::wiring_report;
use crate::config::OutputFormat;

/// Execute the optimize command.
pub fn execute(
    input: &Path,
    output: Option<&Path>,
    level: u8,
    coupling_map: Option<CouplingMap>,
    format: OutputFormat,
) -> Result<()> {
    if level > 3 {
        anyhow::bail!("Optimization level must be 0-3, got {level}");
    }
    let target = output.map(FileKind::require).transpose()?;

    let loaded = load_circuit(input)?;
    let circuit = loaded.circuit();

    let mut builder = PassManagerBuilder::new()
        .with_optimization_level(level)
        .with_name(circuit.name());
    if let Some(map) = coupling_map {
        builder = builder.with_coupling_map(map);
    }
    if let Some((initial, final_)) = loaded.wirings() {
        builder = builder.with_wirings(initial.clone(), final_.clone());
    }
    let (pm, mut props) = builder.build();
    info!(passes = ?pm.pass_names(), "optimizing {}", input.display());

    let before = circuit.stats();
    let mut dag = circuit.dag().clone();
    pm.run(&mut dag, &mut props)?;
    let optimized = circuit.with_dag(dag)?;
    let after = props.stats.take().unwrap_or_else(|| optimized.stats());

    if loaded.wirings().is_some() {
        let report = wiring_report(&props)?;
        if !report.passed() {
            anyhow::bail!("Optimized circuit fails its wiring claim: {report}");
        }
    }

    let delta = StatsDelta::between(&before, &after);
    match format {
        OutputFormat::Json => print_json(&delta)?,
        OutputFormat::Table => {
            println!(
                "{} Optimized {} (level {level}, {} passes)",
                style("✓").green().bold(),
                style(input.display()).green(),
                pm.len()
            );
            print_delta(&delta, "before", "after");
        }
    }

    if let (Some(path), Some(kind)) = (output, target) {
        let contents = render(&loaded, &optimized, kind, &before, &after)?;
        write_output(path, &contents)?;
        if format == OutputFormat::Table {
            println!("  Output: {}", style(path.display()).green());
        }
    }
    Ok(())
}

/// `.qc` output carries `Original` and `Result` header sections; `.qasm`
/// output carries the input's wiring comments.
fn render(
    loaded: &Loaded,
    optimized: &Circuit,
    kind: FileKind,
    before: &CircuitStats,
    after: &CircuitStats,
) -> Result<String> {
    match kind {
        FileKind::Qc => Ok(qctk_qc::emit_with_header(
            optimized,
            &[
                HeaderSection::from_stats("Original", before),
                HeaderSection::from_stats("Result", after),
            ],
        )),
        FileKind::Qasm => {
            let (initial, final_) = loaded.wirings().unzip();
            qctk_qasm2::emit_with_wiring(optimized, initial, final_)
                .context("Failed to emit QASM")
        }
    }
}
