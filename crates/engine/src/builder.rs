use tracing::{info, warn};

use crate::alias::{AliasIndex, Lookup};
use crate::config::{BuildOptions, CollisionPolicy};
use crate::error::LineageError;
use crate::ids::assign_ids;
use crate::model::{
    BuildOutput, BuildReport, BuildSummary, CharacterRecord, Edge, Graph, Node, NodeData,
    UnresolvedMention, SIRE_CHILDE,
};
use crate::resolver::resolve;

/// Build the node/link graph. One node per record, in record order; one
/// `sire-childe` connection per resolved progeny mention, in record order
/// then mention order.
pub fn build(records: &[CharacterRecord], options: &BuildOptions) -> Result<BuildOutput, LineageError> {
    let ids = assign_ids(records, options.id_mode);
    let index = build_alias_index(records, &ids, options.on_collision)?;

    let elements: Vec<Node> = records
        .iter()
        .zip(&ids)
        .map(|(record, &id)| Node {
            id,
            label: record.label().to_string(),
            data: NodeData {
                aliases: record.aliases().to_vec(),
                sex: record.sex.clone(),
                generation: record.generation.clone(),
                dates: record.dates.clone(),
                clan: record.clan.clone(),
                references: record.references.clone(),
            },
        })
        .collect();

    let mut connections = Vec::new();
    let mut unresolved = Vec::new();

    for (record, &own_id) in records.iter().zip(&ids) {
        if record.progeny_mentions.is_empty() {
            continue;
        }
        let source = source_id(record, own_id, &index);

        for mention in &record.progeny_mentions {
            match resolve(mention, &index, options.match_order) {
                Some(target) => connections.push(Edge {
                    source,
                    target,
                    kind: SIRE_CHILDE.to_string(),
                }),
                None => {
                    warn!(source, label = record.label(), mention = mention.as_str(), "unresolved progeny mention");
                    unresolved.push(UnresolvedMention {
                        source,
                        source_label: record.label().to_string(),
                        mention: mention.clone(),
                    });
                }
            }
        }
    }

    let collisions = index.collisions();
    let summary = BuildSummary {
        elements: elements.len(),
        connections: connections.len(),
        unresolved: unresolved.len(),
        collisions: collisions.len(),
    };
    info!(
        elements = summary.elements,
        connections = summary.connections,
        unresolved = summary.unresolved,
        collisions = summary.collisions,
        "graph built"
    );

    Ok(BuildOutput {
        graph: Graph { elements, connections },
        report: BuildReport {
            summary,
            unresolved,
            collisions,
        },
    })
}

/// Register every label and alias in node order.
pub fn build_alias_index(
    records: &[CharacterRecord],
    ids: &[u64],
    policy: CollisionPolicy,
) -> Result<AliasIndex, LineageError> {
    let mut index = AliasIndex::new(policy);
    for (record, &id) in records.iter().zip(ids) {
        for name in &record.names {
            if index.register(name, id) {
                let shared = index.candidates(name);
                warn!(alias = name.as_str(), ids = ?shared, %policy, "alias shared by several nodes");
                if policy == CollisionPolicy::Error {
                    return Err(LineageError::AliasCollision {
                        alias: name.clone(),
                        ids: shared.to_vec(),
                    });
                }
            }
        }
    }
    Ok(index)
}

/// The parent id is the canonical label looked up through the index. Under
/// `last_wins` a shadowed label therefore attributes edges to the node that
/// shadowed it; when the label is ambiguous the record's own id is used.
fn source_id(record: &CharacterRecord, own_id: u64, index: &AliasIndex) -> u64 {
    match index.lookup(record.label()) {
        Lookup::Unique(id) => {
            if id != own_id {
                warn!(label = record.label(), own_id, id, "canonical label shadowed; edges attributed to later node");
            }
            id
        }
        Lookup::Ambiguous(_) | Lookup::Missing => own_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IdMode, MatchOrder};

    fn record(names: &[&str], progeny: &[&str]) -> CharacterRecord {
        CharacterRecord {
            names: names.iter().map(|s| s.to_string()).collect(),
            sex: "unknown".into(),
            generation: "5".into(),
            dates: String::new(),
            clan: "tremere".into(),
            progeny_mentions: progeny.iter().map(|s| s.to_string()).collect(),
            references: vec!["lotn".into()],
        }
    }

    fn edge(source: u64, target: u64) -> Edge {
        Edge { source, target, kind: SIRE_CHILDE.into() }
    }

    #[test]
    fn sire_to_childe_edge() {
        let records = vec![record(&["john"], &["jane doe"]), record(&["jane doe"], &[])];
        let out = build(&records, &BuildOptions::default()).unwrap();
        assert_eq!(out.graph.elements.len(), 2);
        assert_eq!(out.graph.connections, vec![edge(0, 1)]);
        assert!(out.report.unresolved.is_empty());
    }

    #[test]
    fn node_carries_record_attributes() {
        let records = vec![record(&["etrius", "the councilor"], &[])];
        let out = build(&records, &BuildOptions::default()).unwrap();
        let node = &out.graph.elements[0];
        assert_eq!(node.id, 0);
        assert_eq!(node.label, "etrius");
        assert_eq!(node.data.aliases, vec!["the councilor"]);
        assert_eq!(node.data.clan, "tremere");
        assert_eq!(node.data.generation, "5");
        assert_eq!(node.data.references, vec!["lotn"]);
    }

    #[test]
    fn alias_resolves_to_owner() {
        let records = vec![
            record(&["tremere", "the founder"], &["goratrix the traitor"]),
            record(&["goratrix"], &[]),
        ];
        let out = build(&records, &BuildOptions::default()).unwrap();
        assert_eq!(out.graph.connections, vec![edge(0, 1)]);
    }

    #[test]
    fn unresolved_mentions_are_reported_not_fatal() {
        let records = vec![record(&["a"], &["nobody known", "b"]), record(&["b"], &[])];
        let out = build(&records, &BuildOptions::default()).unwrap();
        assert_eq!(out.graph.connections, vec![edge(0, 1)]);
        assert_eq!(out.report.summary.unresolved, 1);
        assert_eq!(out.report.unresolved[0].mention, "nobody known");
        assert_eq!(out.report.unresolved[0].source, 0);
        assert_eq!(out.report.unresolved[0].source_label, "a");
    }

    #[test]
    fn shadowed_alias_goes_to_later_node() {
        let records = vec![
            record(&["first", "shared"], &[]),
            record(&["second", "shared"], &[]),
            record(&["sire"], &["shared"]),
        ];
        let out = build(&records, &BuildOptions::default()).unwrap();
        assert_eq!(out.graph.connections, vec![edge(2, 1)]);
        assert_eq!(out.report.collisions.len(), 1);
        assert_eq!(out.report.collisions[0].alias, "shared");
        assert_eq!(out.report.collisions[0].ids, vec![0, 1]);
    }

    #[test]
    fn shadowed_label_attributes_edges_to_later_node() {
        // Record 0's label is also record 2's alias, so "kate" resolves to 2.
        let records = vec![
            record(&["kate"], &["tom"]),
            record(&["tom"], &[]),
            record(&["katherine", "kate"], &[]),
        ];
        let out = build(&records, &BuildOptions::default()).unwrap();
        assert_eq!(out.graph.connections, vec![edge(2, 1)]);
    }

    #[test]
    fn ambiguous_policy_skips_shared_alias() {
        let records = vec![
            record(&["first", "shared"], &[]),
            record(&["second", "shared"], &[]),
            record(&["sire"], &["shared", "shared second"]),
        ];
        let options = BuildOptions { on_collision: CollisionPolicy::Ambiguous, ..Default::default() };
        let out = build(&records, &options).unwrap();
        assert_eq!(out.graph.connections, vec![edge(2, 1)]);
        assert_eq!(out.report.unresolved.len(), 1);
        assert_eq!(out.report.unresolved[0].mention, "shared");
    }

    #[test]
    fn ambiguous_label_uses_own_id() {
        let records = vec![
            record(&["kate"], &["tom"]),
            record(&["tom"], &[]),
            record(&["katherine", "kate"], &[]),
        ];
        let options = BuildOptions { on_collision: CollisionPolicy::Ambiguous, ..Default::default() };
        let out = build(&records, &options).unwrap();
        assert_eq!(out.graph.connections, vec![edge(0, 1)]);
    }

    #[test]
    fn error_policy_aborts_on_collision() {
        let records = vec![record(&["a", "shared"], &[]), record(&["b", "shared"], &[])];
        let options = BuildOptions { on_collision: CollisionPolicy::Error, ..Default::default() };
        match build(&records, &options) {
            Err(LineageError::AliasCollision { alias, ids }) => {
                assert_eq!(alias, "shared");
                assert_eq!(ids, vec![0, 1]);
            }
            other => panic!("expected alias collision, got {other:?}"),
        }
    }

    #[test]
    fn longest_first_option_is_honored() {
        let records = vec![
            record(&["sire"], &["john smith"]),
            record(&["john"], &[]),
            record(&["john smith"], &[]),
        ];
        let shortest = build(&records, &BuildOptions::default()).unwrap();
        assert_eq!(shortest.graph.connections, vec![edge(0, 1)]);

        let options = BuildOptions { match_order: MatchOrder::LongestFirst, ..Default::default() };
        let longest = build(&records, &options).unwrap();
        assert_eq!(longest.graph.connections, vec![edge(0, 2)]);
    }

    #[test]
    fn content_ids_used_for_edges() {
        let records = vec![record(&["john"], &["jane"]), record(&["jane"], &[])];
        let options = BuildOptions { id_mode: IdMode::Content, ..Default::default() };
        let out = build(&records, &options).unwrap();
        let john = out.graph.elements[0].id;
        let jane = out.graph.elements[1].id;
        assert_eq!(out.graph.connections, vec![edge(john, jane)]);
    }

    #[test]
    fn self_mention_creates_self_loop() {
        let records = vec![record(&["ouroboros"], &["ouroboros"])];
        let out = build(&records, &BuildOptions::default()).unwrap();
        assert_eq!(out.graph.connections, vec![edge(0, 0)]);
    }

    #[test]
    fn empty_input_builds_empty_graph() {
        let out = build(&[], &BuildOptions::default()).unwrap();
        assert_eq!(out.graph, Graph::default());
        assert_eq!(out.report.summary, BuildSummary::default());
    }
}
