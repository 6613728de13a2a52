//! Verify command implementation.
//!
//! `.qc` files: the header statistics are checked against the body.
//! `.qasm` files: the wiring comments are checked against the CNOT listing.

use std::path::Path;

use anyhow::Result;
use console::style;
use tracing::info;

use qctk_compile::{CouplingMap, PassManagerBuilder, PropertySet, WiringReport};
use qctk_ir::Circuit;
use qctk_qc::QcCircuit;

use super::common::{Loaded, load_circuit};

/// Execute the verify command.
pub fn execute(path: &Path, section: Option<&str>, coupling_map: Option<CouplingMap>) -> Result<()> {
    println!(
        "{} Verifying {}",
        style("→").cyan().bold(),
        style(path.display()).green()
    );

    let loaded = load_circuit(path)?;
    let mut failures = match &loaded {
        Loaded::Qc(qc) => verify_header(qc, section)?,
        Loaded::Qasm(_) => verify_wiring(&loaded)?,
    };

    if let Some(map) = coupling_map {
        failures += verify_connectivity(loaded.circuit(), map);
    }

    if failures > 0 {
        anyhow::bail!("{failures} check(s) failed for {}", path.display());
    }
    println!("{} All checks passed", style("✓").green().bold());
    Ok(())
}

/// Check a header section against the body. Returns the number of
/// mismatched statistics; a section that states none counts as one.
fn verify_header(qc: &QcCircuit, section: Option<&str>) -> Result<usize> {
    let Some(claim) = qc.claim(section) else {
        match section {
            Some(label) => anyhow::bail!("No '{label}' section in the header"),
            None => anyhow::bail!("The header states no statistics"),
        }
    };
    let label = match section {
        Some(label) => label.to_string(),
        None => qc
            .header
            .section("Result")
            .or_else(|| qc.header.last())
            .map(|s| s.label.clone())
            .unwrap_or_default(),
    };

    if claim.is_empty() {
        println!(
            "  {} header section '{label}' states no statistics",
            style("✗").red()
        );
        return Ok(1);
    }

    let mismatches = qc.circuit.stats().check(&claim);
    info!(section = %label, mismatches = mismatches.len(), "header checked");

    if mismatches.is_empty() {
        println!("  {} header section '{label}' matches the body", style("✓").green());
    } else {
        println!("  {} header section '{label}':", style("✗").red());
        for mismatch in &mismatches {
            println!("    {mismatch}");
        }
    }
    Ok(mismatches.len())
}

/// Check the wiring comments against the CNOT listing.
fn verify_wiring(loaded: &Loaded) -> Result<usize> {
    let Some((initial, final_)) = loaded.wirings() else {
        anyhow::bail!("No 'Initial wiring' and 'Resulting wiring' comments to verify");
    };

    let (pm, mut props) = PassManagerBuilder::new()
        .with_optimization_level(0)
        .with_wirings(initial.clone(), final_.clone())
        .build();
    let mut dag = loaded.circuit().dag().clone();
    pm.run(&mut dag, &mut props)?;

    let report = wiring_report(&props)?;
    if report.passed() {
        println!("  {} {report}", style("✓").green());
        Ok(0)
    } else {
        println!("  {} {report}", style("✗").red());
        Ok(1)
    }
}

pub(crate) fn wiring_report(props: &PropertySet) -> Result<&WiringReport> {
    props
        .get::<WiringReport>()
        .ok_or_else(|| anyhow::anyhow!("Wiring check did not run"))
}

/// Check every gate against the coupling map. Returns 1 on failure.
fn verify_connectivity(circuit: &Circuit, map: CouplingMap) -> usize {
    let (pm, mut props) = PassManagerBuilder::new()
        .with_optimization_level(0)
        .with_coupling_map(map)
        .build();
    let mut dag = circuit.dag().clone();
    match pm.run(&mut dag, &mut props) {
        Ok(()) => {
            println!("  {} every gate respects the coupling map", style("✓").green());
            0
        }
        Err(e) => {
            println!("  {} {e}", style("✗").red());
            1
        }
    }
}
