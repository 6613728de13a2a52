//! Convert command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qctk_qc::HeaderSection;

use super::common::{FileKind, Loaded, load_circuit, write_output};

/// Execute the convert command.
pub fn execute(input: &Path, output: &Path, with_stats: bool) -> Result<()> {
    let loaded = load_circuit(input)?;
    let target = FileKind::require(output)?;
    let contents = render(&loaded, target, with_stats)?;
    write_output(output, &contents)?;

    println!(
        "{} {} → {}",
        style("✓").green().bold(),
        input.display(),
        style(output.display()).green()
    );
    Ok(())
}

/// Render a loaded file in the `target` format.
///
/// With `with_stats`, `.qc` output gets a `Stats` header computed from the
/// body and `.qasm` output keeps the input's wiring comments. Converting a
/// file to its own format keeps its annotations either way.
pub fn render(loaded: &Loaded, target: FileKind, with_stats: bool) -> Result<String> {
    let circuit = loaded.circuit();
    match (target, loaded) {
        (FileKind::Qc, _) if with_stats => {
            let section = HeaderSection::from_stats("Stats", &circuit.stats());
            Ok(qctk_qc::emit_with_header(circuit, &[section]))
        }
        (FileKind::Qc, Loaded::Qc(qc)) => Ok(qctk_qc::emit_qc(qc)),
        (FileKind::Qc, Loaded::Qasm(_)) => Ok(qctk_qc::emit(circuit)),
        (FileKind::Qasm, Loaded::Qasm(qasm)) => {
            qctk_qasm2::emit_program(qasm).context("Failed to emit QASM")
        }
        (FileKind::Qasm, Loaded::Qc(_)) => {
            qctk_qasm2::emit(circuit).context("Failed to emit QASM")
        }
    }
}
