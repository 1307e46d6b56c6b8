// lineage CLI - genealogy record files → node/link graph documents

mod exit_codes;
mod graph;
mod inspect;
mod options;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use lineage_engine::LineageError;
use tracing_subscriber::EnvFilter;

use exit_codes::{
    EXIT_ALIAS_COLLISION, EXIT_CONFIG, EXIT_INPUT, EXIT_OUTPUT, EXIT_SUCCESS, EXIT_USAGE,
};
use options::{InputArgs, ResolveArgs};

#[derive(Parser)]
#[command(name = "lineage")]
#[command(about = "Convert genealogy record files into node/link graph documents")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph document from a record file
    #[command(after_help = "\
Examples:
  lineage build genealogy.csv
  lineage build genealogy.csv -o graph.json
  lineage build genealogy.csv --json | jq '.connections | length'
  lineage build genealogy.csv --on-collision ambiguous --report report.json
  lineage build genealogy.csv --config lineage.toml --strict")]
    Build {
        /// Semicolon-delimited record file with a header row
        input: PathBuf,

        #[command(flatten)]
        input_args: InputArgs,

        #[command(flatten)]
        resolve_args: ResolveArgs,

        /// Output file [default: config [output] path, else kumu_data.json]
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the document to stdout instead of writing the default file
        #[arg(long)]
        json: bool,

        /// Write unresolved mentions and shared aliases as JSON
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,

        /// Exit with code 7 if any progeny mention does not resolve
        #[arg(long)]
        strict: bool,
    },

    /// Check that a record file can be read with the current settings
    #[command(after_help = "\
Examples:
  lineage validate genealogy.csv
  lineage validate export.csv --delimiter auto")]
    Validate {
        input: PathBuf,

        #[command(flatten)]
        input_args: InputArgs,
    },

    /// Show how progeny mentions resolve against a record file's names
    #[command(after_help = "\
Examples:
  lineage resolve genealogy.csv 'jan pieterzoon of amsterdam'
  lineage resolve genealogy.csv 'lady anne' 'marcus' --json
  lineage resolve genealogy.csv 'john smith' --match-order longest-first")]
    Resolve {
        input: PathBuf,

        /// Mentions to resolve (case-insensitive)
        #[arg(required = true)]
        mentions: Vec<String>,

        #[command(flatten)]
        input_args: InputArgs,

        #[command(flatten)]
        resolve_args: ResolveArgs,

        /// Output JSON to stdout instead of one line per mention
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self { code: EXIT_OUTPUT, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<LineageError> for CliError {
    fn from(err: LineageError) -> Self {
        let message = err.to_string();
        match err {
            LineageError::ConfigParse(_) | LineageError::ConfigValidation(_) => Self::config(message),
            LineageError::MissingColumn { .. } => Self {
                code: EXIT_INPUT,
                message,
                hint: Some("check --delimiter, or map columns under [input.columns] in --config".into()),
            },
            LineageError::InputParse { .. } | LineageError::Io(_) => {
                Self { code: EXIT_INPUT, message, hint: None }
            }
            LineageError::AliasCollision { .. } => Self {
                code: EXIT_ALIAS_COLLISION,
                message,
                hint: Some("use --on-collision last-wins or ambiguous to continue".into()),
            },
        }
    }
}

/// Logs go to stderr so stdout stays a clean JSON channel.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Build { input, input_args, resolve_args, output, json, report, strict } => {
            graph::cmd_build(graph::BuildRequest {
                input,
                input_args,
                resolve_args,
                output,
                json,
                report,
                strict,
            })
        }
        Commands::Validate { input, input_args } => inspect::cmd_validate(input, input_args),
        Commands::Resolve { input, mentions, input_args, resolve_args, json } => {
            inspect::cmd_resolve(input, mentions, input_args, resolve_args, json)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
