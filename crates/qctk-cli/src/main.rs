//! qctk Command-Line Interface
//!
//! Reads `.qc` gate lists and OpenQASM 2.0 CNOT listings, recomputes the
//! statistics and wiring they claim, and converts, optimizes and
//! synthesizes circuits.
//!
//! ```text
//! qctk stats benchmarks/            # gate counts, depth, T-depth
//! qctk verify adder.qc              # header claims vs. body
//! qctk verify routed.qasm           # wiring comments vs. CNOTs
//! qctk convert adder.qc adder.qasm
//! qctk optimize adder.qc -o out.qc --level 3
//! qctk wire --initial 0,1,2 --final 2,1,0 --coupling linear:3
//! qctk compare before.qc after.qc
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{common, compare, convert, optimize, stats, verify, version, wire};
use config::{Config, OutputFormat};
use qctk_compile::WiringMethod;

/// qctk - statistics, verification and synthesis for quantum circuit files
#[derive(Parser)]
#[command(name = "qctk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv). `QCTK_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ~/.config/qctk/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print statistics for circuit files or directories
    Stats {
        /// Files or directories (walked for .qc and .qasm)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Check a file's recorded statistics or wiring against its body
    Verify {
        /// Input file (.qc or .qasm)
        path: PathBuf,

        /// Header section to check (default: Result, else the last one)
        #[arg(short, long)]
        section: Option<String>,

        /// Also check gates against a coupling map (e.g. linear:5, grid:3x3)
        #[arg(short, long)]
        coupling: Option<String>,
    },

    /// Convert between .qc and .qasm
    Convert {
        /// Input file
        input: PathBuf,

        /// Output file; the format follows the extension
        output: PathBuf,

        /// Write a statistics header (.qc) or keep wiring comments (.qasm)
        #[arg(long)]
        with_stats: bool,
    },

    /// Run the optimization pipeline and report before/after statistics
    Optimize {
        /// Input file
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Optimization level (0-3)
        #[arg(short, long)]
        level: Option<u8>,

        /// Coupling map to check the result against
        #[arg(short, long)]
        coupling: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Synthesize a CNOT network moving qubits between two wirings
    Wire {
        /// Initial wiring, e.g. 0,1,2
        #[arg(long)]
        initial: String,

        /// Final wiring, e.g. 2,1,0
        #[arg(long = "final")]
        final_: String,

        /// Synthesis method
        #[arg(short, long)]
        method: Option<WiringMethod>,

        /// Coupling map the network must respect
        #[arg(short, long)]
        coupling: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare the statistics of two circuit files
    Compare {
        a: PathBuf,
        b: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_env("QCTK_LOG").unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = Config::load(cli.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|config| {
            if !config.output.color {
                console::set_colors_enabled(false);
            }
            run(cli.command, &config)
        });

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Stats { paths, format } => {
            stats::execute(&paths, format.unwrap_or(config.output.format))
        }

        Commands::Verify {
            path,
            section,
            coupling,
        } => {
            let map = common::resolve_coupling(coupling.as_deref(), config)?;
            verify::execute(&path, section.as_deref(), map)
        }

        Commands::Convert {
            input,
            output,
            with_stats,
        } => convert::execute(&input, &output, with_stats),

        Commands::Optimize {
            input,
            output,
            level,
            coupling,
            format,
        } => {
            let map = common::resolve_coupling(coupling.as_deref(), config)?;
            optimize::execute(
                &input,
                output.as_deref(),
                level.unwrap_or(config.optimize.level),
                map,
                format.unwrap_or(config.output.format),
            )
        }

        Commands::Wire {
            initial,
            final_,
            method,
            coupling,
            output,
        } => {
            let initial = common::parse_wiring(&initial)?;
            let final_ = common::parse_wiring(&final_)?;
            let map = common::resolve_coupling(coupling.as_deref(), config)?;
            wire::execute(
                &initial,
                &final_,
                method.unwrap_or(config.wiring.method),
                map,
                output.as_deref(),
            )
        }

        Commands::Compare { a, b, format } => {
            compare::execute(&a, &b, format.unwrap_or(config.output.format))
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stats() {
        let cli = Cli::try_parse_from(["qctk", "stats", "a.qc", "dir", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Stats { paths, format } => {
                assert_eq!(paths, vec![PathBuf::from("a.qc"), PathBuf::from("dir")]);
                assert_eq!(format, Some(OutputFormat::Json));
            }
            _ => panic!("expected stats"),
        }
    }

    #[test]
    fn test_stats_needs_paths() {
        assert!(Cli::try_parse_from(["qctk", "stats"]).is_err());
    }

    #[test]
    fn test_parse_wire() {
        let cli = Cli::try_parse_from([
            "qctk", "wire", "--initial", "0,1,2", "--final", "2,1,0", "--method", "gauss",
        ])
        .unwrap();
        match cli.command {
            Commands::Wire {
                initial,
                final_,
                method,
                coupling,
                output,
            } => {
                assert_eq!(initial, "0,1,2");
                assert_eq!(final_, "2,1,0");
                assert_eq!(method, Some(WiringMethod::Gauss));
                assert!(coupling.is_none());
                assert!(output.is_none());
            }
            _ => panic!("expected wire"),
        }
        assert!(
            Cli::try_parse_from(["qctk", "wire", "--initial", "0,1", "--final", "1,0", "-m", "magic"])
                .is_err()
        );
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["qctk", "version", "-vv", "--config", "c.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_parse_optimize() {
        let cli =
            Cli::try_parse_from(["qctk", "optimize", "in.qc", "-o", "out.qc", "--level", "3"]).unwrap();
        match cli.command {
            Commands::Optimize {
                input,
                output,
                level,
                ..
            } => {
                assert_eq!(input, PathBuf::from("in.qc"));
                assert_eq!(output, Some(PathBuf::from("out.qc")));
                assert_eq!(level, Some(3));
            }
            _ => panic!("expected optimize"),
        }
    }
}
