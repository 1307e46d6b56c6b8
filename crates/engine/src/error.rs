use std::fmt;

use crate::model::NodeId;

#[derive(Debug)]
pub enum LineageError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad delimiter, duplicate column, etc.).
    ConfigValidation(String),
    /// A configured column is absent from the input header row.
    MissingColumn { column: String },
    /// Malformed delimited input (framing, quoting).
    InputParse { line: Option<u64>, message: String },
    /// Two or more nodes share an alias and the collision policy is `error`.
    AliasCollision { alias: String, ids: Vec<NodeId> },
    /// IO error (file read/write).
    Io(String),
}

impl fmt::Display for LineageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { column } => {
                write!(f, "input is missing required column '{column}'")
            }
            Self::InputParse { line: Some(line), message } => {
                write!(f, "input parse error at line {line}: {message}")
            }
            Self::InputParse { line: None, message } => write!(f, "input parse error: {message}"),
            Self::AliasCollision { alias, ids } => {
                let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                write!(f, "alias '{alias}' is shared by nodes {}", ids.join(", "))
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for LineageError {}

impl From<std::io::Error> for LineageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
