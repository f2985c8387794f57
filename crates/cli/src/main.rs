mod config;
mod runner;
mod tap;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use modlog_core::{ParseOptions, ParseOutput};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Parser for the modlog clause language.
#[derive(Parser)]
#[command(name = "modlog", version, about = "Parser for the modlog clause language")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a modlog.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a source file and write the canonical form (with any syntax errors)
    Parse {
        /// Path to the source file
        file: PathBuf,
        /// Output path (default: <file>.<extension>)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },

    /// Report syntax errors; exits 1 if there are any
    Check {
        /// Path to the source file
        file: PathBuf,
    },

    /// Run the conformance test suite
    Test {
        /// Path to the conformance suite directory
        #[arg(default_value = "conformance")]
        suite_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let config = match &cli.config {
        Some(path) => match config::read_config(path) {
            Ok(c) => c,
            Err(e) => {
                report_error(&e, cli.output, cli.quiet);
                process::exit(1);
            }
        },
        None => Config::default(),
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Parse { file, out, stdout } => {
            let dest = if stdout {
                None
            } else {
                Some(out.unwrap_or_else(|| config.output_path(&file)))
            };
            cmd_parse(&file, dest.as_deref(), &config, cli.output, cli.quiet);
        }
        Commands::Check { file } => {
            cmd_check(&file, &config, cli.output, cli.quiet);
        }
        Commands::Test { suite_dir } => {
            cmd_test(&suite_dir);
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or nothing with `--quiet`.
fn init_logging(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read and parse `file`, exiting on I/O, lexical, or internal errors.
fn load_and_parse(
    file: &Path,
    options: &ParseOptions,
    output: OutputFormat,
    quiet: bool,
) -> ParseOutput {
    let src = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    match modlog_core::parse_source_with(&src, options) {
        Ok(out) => {
            info!(
                file = %file.display(),
                clauses = out.program.clauses.len(),
                errors = out.diagnostics.len(),
                "parsed"
            );
            out
        }
        Err(e) => {
            let msg = format!("{}: {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

fn cmd_parse(
    file: &Path,
    dest: Option<&Path>,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let parsed = load_and_parse(file, &config.parse_options(), output, quiet);

    let rendered = match output {
        OutputFormat::Text => parsed.render(),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "output": parsed.render(),
                "clauses": parsed.clauses_text(),
                "diagnostics": parsed.diagnostics,
            });
            serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e))
        }
    };

    match dest {
        None => println!("{}", rendered),
        Some(path) => {
            if let Err(e) = std::fs::write(path, format!("{}\n", rendered)) {
                let msg = format!("error writing file '{}': {}", path.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
            if !quiet {
                eprintln!("wrote {}", path.display());
            }
        }
    }

    if !quiet && !parsed.is_clean() {
        eprintln!(
            "{}: {} syntax error(s), parsing resumed after each",
            file.display(),
            parsed.diagnostics.len()
        );
    }
}

fn cmd_check(file: &Path, config: &Config, output: OutputFormat, quiet: bool) {
    let parsed = load_and_parse(file, &config.parse_options(), output, quiet);

    match output {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "file": file.display().to_string(),
                "clean": parsed.is_clean(),
                "module": parsed.program.module_name(),
                "clauses": parsed.program.clauses.len(),
                "diagnostics": parsed.diagnostics,
            });
            let json = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => {
            for d in &parsed.diagnostics {
                println!("{}", d);
            }
            if !quiet && parsed.is_clean() {
                println!(
                    "{}: ok ({} clauses)",
                    file.display(),
                    parsed.program.clauses.len()
                );
            }
        }
    }

    if !parsed.is_clean() {
        process::exit(1);
    }
}

fn cmd_test(suite_dir: &Path) {
    if !suite_dir.exists() {
        eprintln!(
            "error: conformance suite directory not found: {}",
            suite_dir.display()
        );
        process::exit(1);
    }

    let result = runner::run_suite(suite_dir);
    if result.failed > 0 {
        process::exit(1);
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
