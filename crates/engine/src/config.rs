use std::str::FromStr;

use serde::Deserialize;

use crate::error::LineageError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub resolve: ResolveConfig,
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    #[serde(default)]
    pub delimiter: Delimiter,
    #[serde(default = "default_name_separator")]
    pub name_separator: char,
    #[serde(default)]
    pub columns: ColumnMapping,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            name_separator: default_name_separator(),
            columns: ColumnMapping::default(),
        }
    }
}

fn default_name_separator() -> char {
    '/'
}

/// Field delimiter: a single ASCII byte, or `auto` to sniff it from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Delimiter {
    Auto,
    Byte(u8),
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::Byte(b';')
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        if s == "\\t" || s.eq_ignore_ascii_case("tab") {
            return Ok(Self::Byte(b'\t'));
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => {
                if c == '"' || c == '\n' || c == '\r' {
                    Err(format!("'{}' cannot be used as a field delimiter", c.escape_default()))
                } else {
                    Ok(Self::Byte(c as u8))
                }
            }
            _ => Err(format!(
                "delimiter must be a single ASCII character or \"auto\", got \"{s}\""
            )),
        }
    }
}

impl TryFrom<String> for Delimiter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Byte(b'\t') => write!(f, "\\t"),
            Self::Byte(b) => write!(f, "{}", *b as char),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMapping {
    pub name: String,
    pub sex: String,
    pub generation: String,
    pub dates: String,
    pub clan: String,
    pub progeny: String,
    pub references: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            name: "Name".into(),
            sex: "Sex".into(),
            generation: "Gen".into(),
            dates: "Dates".into(),
            clan: "Clan".into(),
            progeny: "Progeny".into(),
            references: "References".into(),
        }
    }
}

impl ColumnMapping {
    /// Configured header names in record field order.
    pub fn names(&self) -> [&str; 7] {
        [
            &self.name,
            &self.sex,
            &self.generation,
            &self.dates,
            &self.clan,
            &self.progeny,
            &self.references,
        ]
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveConfig {
    #[serde(default)]
    pub match_order: MatchOrder,
    #[serde(default)]
    pub on_collision: CollisionPolicy,
}

/// Order in which word windows of a mention are tried against the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrder {
    /// Start index ascending, then window end ascending. First hit wins.
    #[default]
    LeftmostShortest,
    /// Window length descending, then start index ascending.
    LongestFirst,
}

/// What to do when two nodes register the same alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later-registered node owns the alias.
    #[default]
    LastWins,
    /// The alias matches nothing; resolution keeps scanning.
    Ambiguous,
    /// Abort the build.
    Error,
}

impl std::fmt::Display for MatchOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeftmostShortest => write!(f, "leftmost_shortest"),
            Self::LongestFirst => write!(f, "longest_first"),
        }
    }
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastWins => write!(f, "last_wins"),
            Self::Ambiguous => write!(f, "ambiguous"),
            Self::Error => write!(f, "error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Ids + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdConfig {
    #[serde(default)]
    pub mode: IdMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdMode {
    /// Zero-based position in the input.
    #[default]
    Positional,
    /// Derived from the canonical label; survives reordering.
    Content,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub path: Option<String>,
}

/// Options consumed by the graph builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub match_order: MatchOrder,
    pub on_collision: CollisionPolicy,
    pub id_mode: IdMode,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl BuildConfig {
    pub fn from_toml(input: &str) -> Result<Self, LineageError> {
        let config: BuildConfig =
            toml::from_str(input).map_err(|e| LineageError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LineageError> {
        let sep = self.input.name_separator;
        if sep.is_whitespace() {
            return Err(LineageError::ConfigValidation(
                "name_separator cannot be whitespace".into(),
            ));
        }
        if let Delimiter::Byte(b) = self.input.delimiter {
            if b as char == sep {
                return Err(LineageError::ConfigValidation(format!(
                    "name_separator '{sep}' must differ from the field delimiter"
                )));
            }
        }

        let names = self.input.columns.names();
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(LineageError::ConfigValidation(
                    "column names cannot be empty".into(),
                ));
            }
            if names[..i].contains(name) {
                return Err(LineageError::ConfigValidation(format!(
                    "column '{name}' is mapped to more than one field"
                )));
            }
        }

        Ok(())
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            match_order: self.resolve.match_order,
            on_collision: self.resolve.on_collision,
            id_mode: self.ids.mode,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
