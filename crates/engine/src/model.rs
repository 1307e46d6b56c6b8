use serde::Serialize;

/// Node identity. Positional by default, content-derived when configured.
pub type NodeId = u64;

/// Relation tag carried by every parent → child connection.
pub const SIRE_CHILDE: &str = "sire-childe";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One row of the record file, fields as read (untrimmed, original case).
/// Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub name: String,
    pub sex: String,
    pub generation: String,
    pub dates: String,
    pub clan: String,
    pub progeny: String,
    pub references: String,
}

/// A normalized character. `names[0]` is the canonical label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub names: Vec<String>,
    pub sex: String,
    pub generation: String,
    pub dates: String,
    pub clan: String,
    pub progeny_mentions: Vec<String>,
    pub references: Vec<String>,
}

impl CharacterRecord {
    pub fn label(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("")
    }

    pub fn aliases(&self) -> &[String] {
        self.names.get(1..).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Graph document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub data: NodeData,
}

/// Attributes copied through from the record. Key casing follows the
/// Kumu import format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeData {
    #[serde(rename = "Aliases")]
    pub aliases: Vec<String>,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Generation")]
    pub generation: String,
    #[serde(rename = "Dates")]
    pub dates: String,
    #[serde(rename = "Clan")]
    pub clan: String,
    #[serde(rename = "References")]
    pub references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub elements: Vec<Node>,
    pub connections: Vec<Edge>,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// A progeny mention that matched no alias and produced no edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedMention {
    pub source: NodeId,
    pub source_label: String,
    pub mention: String,
}

/// An alias registered by more than one node. `ids` is in registration order;
/// under `last_wins` the final id is the one lookups return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedAlias {
    pub alias: String,
    pub ids: Vec<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub elements: usize,
    pub connections: usize,
    pub unresolved: usize,
    pub collisions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub summary: BuildSummary,
    pub unresolved: Vec<UnresolvedMention>,
    pub collisions: Vec<SharedAlias>,
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub graph: Graph,
    pub report: BuildReport,
}
