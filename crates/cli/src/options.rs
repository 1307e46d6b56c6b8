//! Config loading and command-line overrides shared by every subcommand.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use lineage_engine::config::{BuildConfig, CollisionPolicy, Delimiter, IdMode, MatchOrder};
use tracing::debug;

use crate::CliError;

#[derive(Args, Debug)]
pub struct InputArgs {
    /// TOML config file ([input], [resolve], [ids], [output] sections)
    #[arg(long, short = 'c', env = "LINEAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Field delimiter: a single character, "\t", or "auto" [default: ;]
    #[arg(long, short = 'd')]
    pub delimiter: Option<Delimiter>,

    /// Separator between a character's names in the name column [default: /]
    #[arg(long)]
    pub name_separator: Option<char>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Order in which word windows of a progeny mention are tried
    #[arg(long, value_enum)]
    pub match_order: Option<MatchOrderArg>,

    /// What to do when two characters share a name
    #[arg(long, value_enum)]
    pub on_collision: Option<CollisionArg>,

    /// How node ids are assigned
    #[arg(long, value_enum)]
    pub id_mode: Option<IdModeArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MatchOrderArg {
    /// Earliest start, then shortest window (default)
    LeftmostShortest,
    /// Longest window, then earliest start
    LongestFirst,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CollisionArg {
    /// The later character owns the shared name (default)
    LastWins,
    /// A shared name matches nobody
    Ambiguous,
    /// Fail the build
    Error,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum IdModeArg {
    /// Position in the input file (default)
    Positional,
    /// Hash of the canonical name
    Content,
}

impl From<MatchOrderArg> for MatchOrder {
    fn from(arg: MatchOrderArg) -> Self {
        match arg {
            MatchOrderArg::LeftmostShortest => MatchOrder::LeftmostShortest,
            MatchOrderArg::LongestFirst => MatchOrder::LongestFirst,
        }
    }
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::LastWins => CollisionPolicy::LastWins,
            CollisionArg::Ambiguous => CollisionPolicy::Ambiguous,
            CollisionArg::Error => CollisionPolicy::Error,
        }
    }
}

impl From<IdModeArg> for IdMode {
    fn from(arg: IdModeArg) -> Self {
        match arg {
            IdModeArg::Positional => IdMode::Positional,
            IdModeArg::Content => IdMode::Content,
        }
    }
}

/// Read the config file (if any), then apply flag overrides and re-validate.
pub fn load_config(input: &InputArgs, resolve: Option<&ResolveArgs>) -> Result<BuildConfig, CliError> {
    let mut config = match &input.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CliError::config(format!("cannot read config {}: {e}", path.display()))
            })?;
            debug!(path = %path.display(), "loaded config");
            BuildConfig::from_toml(&text)?
        }
        None => BuildConfig::default(),
    };

    if let Some(delimiter) = input.delimiter {
        config.input.delimiter = delimiter;
    }
    if let Some(sep) = input.name_separator {
        config.input.name_separator = sep;
    }
    if let Some(resolve) = resolve {
        if let Some(order) = resolve.match_order {
            config.resolve.match_order = order.into();
        }
        if let Some(policy) = resolve.on_collision {
            config.resolve.on_collision = policy.into();
        }
        if let Some(mode) = resolve.id_mode {
            config.ids.mode = mode.into();
        }
    }

    config
        .validate()
        .map_err(|e| CliError::usage(e.to_string()).with_hint("check --delimiter and --name-separator"))?;
    Ok(config)
}
