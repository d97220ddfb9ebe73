//! apidiff: N-way API snapshot comparison tool
//!
//! Compares two or more snapshots of a program's public API and reports
//! every entity that is missing from some snapshots or differs between them.

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use api_diff::{
    api::AccessKind,
    cli,
    config::{AppConfig, CompareConfig, ConfigPreset},
    pipeline::{exit_codes, parse_api_arg},
    reports::ReportFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSnapshot Formats:",
        "\n  JSON, YAML (detected by extension, then content)",
        "\n\nOutput Formats:",
        "\n  summary, json"
    )
}

#[derive(Parser)]
#[command(name = "apidiff")]
#[command(version, long_version = build_long_version())]
#[command(about = "N-way API snapshot comparison tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  APIs equal (or differences without --fail-on-difference)
    1  Differences found (with --fail-on-difference)
    2  Errors were reported (bad notes lines, unreadable notes files)
    3  Fatal error

EXAMPLES:
    # Compare two releases
    apidiff compare --api v1=api-1.0.json --api v2=api-2.0.json

    # Compare three snapshots, failing CI on any difference
    apidiff compare jdk17.json jdk21.json jdk25.json --fail-on-difference

    # Only java.base, public members, with notes attached
    apidiff compare a.json b.json --include java.base --access public --notes api-notes.txt

    # Export JSON for processing
    apidiff compare a.json b.json -o json -O diff.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `compare` subcommand
#[derive(Parser)]
struct CompareArgs {
    /// Snapshot files, as PATH or NAME=PATH
    #[arg(value_name = "API")]
    apis: Vec<String>,

    /// Named snapshot, compared before positional ones (repeatable)
    #[arg(long = "api", value_name = "NAME=PATH")]
    named: Vec<String>,

    /// Only compare matching modules/packages (repeatable)
    #[arg(long, value_name = "PATTERN")]
    include: Vec<String>,

    /// Skip matching modules/packages (repeatable)
    #[arg(long, value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Least accessible members compared
    #[arg(long, value_enum)]
    access: Option<AccessKind>,

    /// Compare raw doc comments
    #[arg(long)]
    compare_doc_comments: bool,

    /// Compare rendered API descriptions
    #[arg(long)]
    compare_api_descriptions: bool,

    /// Notes file attached to reported entities (repeatable)
    #[arg(long = "notes", value_name = "FILE")]
    notes: Vec<PathBuf>,

    /// Configuration preset (default, docs, full)
    #[arg(long)]
    preset: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if the APIs differ
    #[arg(long)]
    fail_on_difference: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two or more API snapshots
    Compare(CompareArgs),

    /// Work with notes files
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `notes` command
#[derive(Subcommand)]
enum NotesAction {
    /// Parse notes files and print their diagnostics
    Check {
        /// Notes files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .apidiff.yaml in the current directory
    Init,
    /// Print the JSON Schema of the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            exit_codes::FATAL
        }
    };
    std::process::exit(code);
}

/// Dispatch to command handlers, returning the exit code.
fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Compare(args) => {
            let preset = args
                .preset
                .as_deref()
                .map(|name| {
                    ConfigPreset::from_name(name).with_context(|| {
                        let known: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                        format!("unknown preset '{name}'; expected one of {}", known.join(", "))
                    })
                })
                .transpose()?;

            let apis = args
                .named
                .iter()
                .chain(&args.apis)
                .map(String::as_str)
                .map(parse_api_arg)
                .collect::<Result<Vec<_>>>()?;

            let mut overrides = AppConfig::builder()
                .compare_doc_comments(args.compare_doc_comments)
                .compare_api_descriptions(args.compare_api_descriptions)
                .output_file(args.output_file)
                .no_color(cli.no_color)
                .fail_on_difference(args.fail_on_difference)
                .quiet(cli.quiet)
                .build();
            overrides.selection.include = args.include;
            overrides.selection.exclude = args.exclude;
            overrides.notes.files = args.notes;

            let (mut app, loaded_from) = api_diff::config::load_or_default(cli.config.as_deref())?;
            if let Some(path) = &loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }
            if let Some(preset) = preset {
                app.merge(&AppConfig::from_preset(preset));
            }
            app.merge(&overrides);
            // Explicit flags win even when they name the default.
            if let Some(access) = args.access {
                app.comparison.access = access;
            }
            if let Some(format) = args.output {
                app.output.format = format;
            }

            cli::run_compare(CompareConfig {
                apis,
                app,
                verbose: cli.verbose,
            })
        }

        Commands::Notes { action } => match action {
            NotesAction::Check { files } => cli::run_notes_check(&files),
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(cli.config.as_deref()),
            ConfigAction::Path => cli::run_config_path(cli.config.as_deref()),
            ConfigAction::Init => cli::run_config_init(),
            ConfigAction::Schema { output } => cli::run_config_schema(output.as_deref()),
        },

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "apidiff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compare_args() {
        let cli = Cli::try_parse_from([
            "apidiff",
            "compare",
            "--api",
            "v1=a.json",
            "b.json",
            "--exclude",
            "*/internal.**",
            "--access",
            "public",
            "-o",
            "json",
        ])
        .unwrap();
        let Commands::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.named, ["v1=a.json"]);
        assert_eq!(args.apis, ["b.json"]);
        assert_eq!(args.access, Some(AccessKind::Public));
        assert_eq!(args.output, Some(ReportFormat::Json));
    }
}
