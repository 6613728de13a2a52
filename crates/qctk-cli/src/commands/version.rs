//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit toolkit",
        style("qctk").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qctk-ir       Circuit IR, statistics and wiring");
    println!("  qctk-qc       .qc gate-list reader and writer");
    println!("  qctk-qasm2    OpenQASM 2.0 reader and writer");
    println!("  qctk-compile  GF(2) synthesis and optimization passes");
    println!("  qctk-cli      Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
