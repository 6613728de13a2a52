//! Wire command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qctk_compile::{CouplingMap, PassManagerBuilder, WiringMethod, synthesize_wiring};
use qctk_ir::Wiring;

use super::common::write_output;
use super::verify::wiring_report;

/// Execute the wire command.
///
/// The QASM listing goes to `output`, or to stdout when no path is given.
pub fn execute(
    initial: &Wiring,
    final_: &Wiring,
    method: WiringMethod,
    coupling_map: Option<CouplingMap>,
    output: Option<&Path>,
) -> Result<()> {
    let network = synthesize_wiring(initial, final_, method, coupling_map.as_ref())?;
    info!(method = %method, cnots = network.num_ops(), "wiring network synthesized");

    // The emitted listing must pass the same check `verify` applies to it.
    let mut builder = PassManagerBuilder::new()
        .with_optimization_level(0)
        .with_name("wiring")
        .with_wirings(initial.clone(), final_.clone());
    if let Some(map) = coupling_map {
        builder = builder.with_coupling_map(map);
    }
    let (pm, mut props) = builder.build();
    let mut dag = network.dag().clone();
    pm.run(&mut dag, &mut props)?;
    let report = wiring_report(&props)?;
    if !report.passed() {
        anyhow::bail!("Synthesized network fails verification: {report}");
    }

    let qasm = qctk_qasm2::emit_with_wiring(&network, Some(initial), Some(final_))
        .context("Failed to emit QASM")?;

    match output {
        Some(path) => {
            write_output(path, &qasm)?;
            println!(
                "{} {} CNOTs ({method}) → {}",
                style("✓").green().bold(),
                network.num_ops(),
                style(path.display()).green()
            );
        }
        None => print!("{qasm}"),
    }
    Ok(())
}
