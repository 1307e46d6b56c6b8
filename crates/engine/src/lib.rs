//! `lineage-engine`: genealogy records → node/link graph.
//!
//! Pure engine crate: receives pre-loaded records, returns the graph and a
//! build report. No CLI or IO dependencies.

pub mod alias;
pub mod builder;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod normalize;
pub mod resolver;

pub use alias::AliasIndex;
pub use builder::build;
pub use config::{BuildConfig, BuildOptions, CollisionPolicy, Delimiter, IdMode, MatchOrder};
pub use error::LineageError;
pub use model::{BuildOutput, BuildReport, CharacterRecord, Edge, Graph, Node, NodeId, RawRecord};
pub use normalize::{normalize, normalize_all};
pub use resolver::resolve;
