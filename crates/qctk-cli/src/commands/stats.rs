//! Stats command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::debug;

use qctk_ir::CircuitStats;

use super::common::{FileKind, load_circuit, print_json, print_stats};
use crate::config::OutputFormat;

#[derive(Serialize)]
struct FileStats {
    path: String,
    #[serde(flatten)]
    stats: CircuitStats,
}

/// Execute the stats command.
pub fn execute(paths: &[PathBuf], format: OutputFormat) -> Result<()> {
    let files = collect_files(paths)?;
    if files.is_empty() {
        anyhow::bail!("No .qc or .qasm files found");
    }
    debug!(files = files.len(), "computing statistics");

    let progress = if files.len() > 1 && format == OutputFormat::Table {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress template")?
                .progress_chars("=> "),
        );
        Some(pb)
    } else {
        None
    };

    let mut results = vec![];
    let mut failures = 0usize;
    for path in &files {
        if let Some(pb) = &progress {
            pb.set_message(path.display().to_string());
        }
        match load_circuit(path) {
            Ok(loaded) => results.push(FileStats {
                path: path.display().to_string(),
                stats: loaded.circuit().stats(),
            }),
            Err(e) => {
                failures += 1;
                debug!("{}: {e:#}", path.display());
                let line = format!("{} {}: {e:#}", style("✗").red().bold(), path.display());
                match &progress {
                    Some(pb) if !pb.is_hidden() => pb.println(line),
                    _ => eprintln!("{line}"),
                }
            }
        }
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match format {
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Table => {
            for (i, entry) in results.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", style(&entry.path).cyan().bold());
                print_stats(&entry.stats);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} files could not be read", files.len());
    }
    Ok(())
}

/// Expand directories into the circuit files below them, sorted by path.
/// Explicit file arguments are kept whatever their extension.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for path in paths {
        if path.is_dir() {
            let mut found = vec![];
            walk(path, &mut found)?;
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Symlinked directories are not followed.
fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            if entry.file_type()?.is_symlink() {
                debug!("skipping symlinked directory {}", path.display());
                continue;
            }
            walk(&path, found)?;
        } else if FileKind::of(&path).is_some() {
            found.push(path);
        }
    }
    Ok(())
}
