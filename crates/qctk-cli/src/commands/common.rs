//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use qctk_compile::CouplingMap;
use qctk_ir::{Circuit, CircuitStats, GateFamily, StatsDelta, Wiring};
use qctk_qasm2::Qasm2Circuit;
use qctk_qc::QcCircuit;

use crate::config::{Config, OutputFormat};

/// Circuit file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Qc,
    Qasm,
}

impl FileKind {
    /// Format of `path`, or `None` for unknown extensions.
    pub fn of(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "qc" => Some(FileKind::Qc),
            "qasm" | "qasm2" => Some(FileKind::Qasm),
            _ => None,
        }
    }

    /// Like [`FileKind::of`] but fails on unknown extensions.
    pub fn require(path: &Path) -> Result<Self> {
        Self::of(path).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown file type: {} (expected .qc or .qasm)",
                path.display()
            )
        })
    }
}

/// A circuit file as read from disk.
#[derive(Debug, Clone)]
pub enum Loaded {
    Qc(QcCircuit),
    Qasm(Qasm2Circuit),
}

impl Loaded {
    pub fn circuit(&self) -> &Circuit {
        match self {
            Loaded::Qc(qc) => &qc.circuit,
            Loaded::Qasm(qasm) => &qasm.circuit,
        }
    }

    /// Initial and final wiring, when the file states both.
    pub fn wirings(&self) -> Option<(&Wiring, &Wiring)> {
        match self {
            Loaded::Qc(_) => None,
            Loaded::Qasm(qasm) => qasm.wirings(),
        }
    }
}

/// Load a `.qc` or `.qasm` file. The circuit is named after the file stem.
pub fn load_circuit(path: &Path) -> Result<Loaded> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let kind = FileKind::require(path)?;
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "circuit".into());

    let mut loaded = match kind {
        FileKind::Qc => Loaded::Qc(
            qctk_qc::parse(&source)
                .with_context(|| format!("Failed to parse {}", path.display()))?,
        ),
        FileKind::Qasm => Loaded::Qasm(
            qctk_qasm2::parse(&source)
                .with_context(|| format!("Failed to parse {}", path.display()))?,
        ),
    };
    match &mut loaded {
        Loaded::Qc(qc) => qc.circuit.set_name(name),
        Loaded::Qasm(qasm) => qasm.circuit.set_name(name),
    }
    Ok(loaded)
}

/// Write `contents` to `path`.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Parse a wiring vector such as `2,0,1` or `[2, 0, 1]`.
pub fn parse_wiring(text: &str) -> Result<Wiring> {
    let inner = text.trim().trim_start_matches('[').trim_end_matches(']');
    let entries = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("'{s}' is not a qubit index"))
        })
        .collect::<Result<Vec<_>>>()?;
    Wiring::new(entries).with_context(|| format!("Invalid wiring '{text}'"))
}

/// The coupling map from `--coupling`, else from the configuration.
pub fn resolve_coupling(flag: Option<&str>, config: &Config) -> Result<Option<CouplingMap>> {
    match flag {
        Some(spec) => Ok(Some(
            CouplingMap::parse(spec).with_context(|| format!("Invalid coupling map '{spec}'"))?,
        )),
        None => Ok(config.coupling_map()?),
    }
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print statistics as an aligned table.
pub fn print_stats(stats: &CircuitStats) {
    println!("  {:<12} {:>8}", "qubits", stats.num_qubits);
    println!("  {:<12} {:>8}", "gates", stats.total_gates);
    println!("  {:<12} {:>8}", "two-qubit", stats.two_qubit_gates);
    println!("  {:<12} {:>8}", "t-count", stats.t_count);
    println!("  {:<12} {:>8}", "depth", stats.depth);
    println!("  {:<12} {:>8}", "t-depth", stats.t_depth);
    for family in GateFamily::ALL {
        let count = stats.count(family);
        if count > 0 {
            println!("  {:<12} {:>8}", family.as_str(), count);
        }
    }
}

/// Print a before/after table with signed changes.
pub fn print_delta(delta: &StatsDelta, before: &str, after: &str) {
    println!(
        "  {:<12} {:>10} {:>10} {:>8}",
        "",
        style(before).bold(),
        style(after).bold(),
        style("change").bold()
    );
    for row in &delta.rows {
        let change = row.change();
        let shown = match change {
            0 => style("0".to_string()).dim(),
            c if c < 0 => style(c.to_string()).green(),
            c => style(format!("+{c}")).red(),
        };
        println!(
            "  {:<12} {:>10} {:>10} {:>8}",
            row.field, row.before, row.after, shown
        );
    }
}

/// Print statistics in the configured format.
pub fn report_stats(label: &str, stats: &CircuitStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(stats),
        OutputFormat::Table => {
            println!("{}", style(label).cyan().bold());
            print_stats(stats);
            Ok(())
        }
    }
}
