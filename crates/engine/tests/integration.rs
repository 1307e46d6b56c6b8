use lineage_engine::alias::AliasIndex;
use lineage_engine::builder::{build, build_alias_index};
use lineage_engine::config::{BuildOptions, CollisionPolicy, IdMode, MatchOrder};
use lineage_engine::ids::assign_ids;
use lineage_engine::model::{RawRecord, SIRE_CHILDE};
use lineage_engine::normalize::normalize_all;
use lineage_engine::resolver::{resolve, resolve_detailed};
use proptest::prelude::*;

fn raw(name: &str, progeny: &str) -> RawRecord {
    RawRecord {
        name: name.into(),
        progeny: progeny.into(),
        ..Default::default()
    }
}

/// A small Camarilla lineage with aliases, multi-word childer and one
/// mention that matches nobody.
fn lineage() -> Vec<RawRecord> {
    vec![
        RawRecord {
            name: "Hardestadt/Hardestadt the Elder".into(),
            sex: "Male".into(),
            generation: "4".into(),
            dates: "? - 1997".into(),
            clan: "Ventrue".into(),
            progeny: "Jan Pieterzoon  Lady Anne\nThe Unknown Stranger".into(),
            references: "LotN  CoS".into(),
        },
        RawRecord {
            name: "Jan Pieterzoon/Jan".into(),
            sex: "".into(),
            generation: "9".into(),
            clan: "Ventrue".into(),
            ..Default::default()
        },
        RawRecord {
            name: "Anne Bowesley/Lady Anne/Queen Anne".into(),
            sex: "female".into(),
            generation: "8".into(),
            clan: "Ventrue".into(),
            progeny: "Marcus of London".into(),
            ..Default::default()
        },
        raw("Marcus", ""),
    ]
}

// -------------------------------------------------------------------------
// Graph properties
// -------------------------------------------------------------------------

#[test]
fn one_node_per_record_in_order() {
    let records = normalize_all(&lineage(), '/');
    let out = build(&records, &BuildOptions::default()).unwrap();

    assert_eq!(out.graph.elements.len(), records.len());
    for (i, node) in out.graph.elements.iter().enumerate() {
        assert_eq!(node.id, i as u64);
        assert_eq!(node.label, records[i].names[0]);
    }
}

#[test]
fn lineage_edges_and_diagnostics() {
    let records = normalize_all(&lineage(), '/');
    let out = build(&records, &BuildOptions::default()).unwrap();

    let edges: Vec<(u64, u64)> = out
        .graph
        .connections
        .iter()
        .map(|e| (e.source, e.target))
        .collect();
    // "jan pieterzoon" → 1 via "jan", "lady anne" → 2, "marcus of london" → 3
    assert_eq!(edges, vec![(0, 1), (0, 2), (2, 3)]);
    assert!(out.graph.connections.iter().all(|e| e.kind == SIRE_CHILDE));

    assert_eq!(out.report.unresolved.len(), 1);
    assert_eq!(out.report.unresolved[0].mention, "the unknown stranger");
    assert_eq!(out.report.summary.connections, 3);

    let jan = &out.graph.elements[1];
    assert_eq!(jan.data.sex, "unknown");
    assert_eq!(jan.data.aliases, vec!["jan"]);
    assert_eq!(out.graph.elements[0].data.references, vec!["lotn", "cos"]);
}

#[test]
fn every_name_resolves_to_its_node_unless_shadowed() {
    let mut raws = lineage();
    // "jan" is now also claimed by a later record and shadows node 1
    raws.push(raw("Jan Jansen/Jan", ""));
    let records = normalize_all(&raws, '/');
    let ids = assign_ids(&records, IdMode::Positional);
    let index = build_alias_index(&records, &ids, CollisionPolicy::LastWins).unwrap();

    for (record, &id) in records.iter().zip(&ids) {
        for name in &record.names {
            if name == "jan" && id == 1 {
                assert_eq!(index.get(name), Some(4), "'jan' is shadowed by node 4");
            } else {
                assert_eq!(index.get(name), Some(id), "'{name}' should resolve to {id}");
            }
        }
    }
    assert_eq!(index.collisions().len(), 1);
}

#[test]
fn two_record_end_to_end() {
    let records = normalize_all(&[raw("john", "jane doe"), raw("jane doe", "")], '/');
    let out = build(&records, &BuildOptions::default()).unwrap();

    assert_eq!(out.graph.elements.len(), 2);
    assert_eq!(out.graph.connections.len(), 1);
    let edge = &out.graph.connections[0];
    assert_eq!((edge.source, edge.target), (0, 1));
    assert_eq!(edge.kind, "sire-childe");
}

#[test]
fn build_is_deterministic() {
    let records = normalize_all(&lineage(), '/');
    for options in [
        BuildOptions::default(),
        BuildOptions {
            match_order: MatchOrder::LongestFirst,
            on_collision: CollisionPolicy::Ambiguous,
            id_mode: IdMode::Content,
        },
    ] {
        let a = build(&records, &options).unwrap();
        let b = build(&records, &options).unwrap();
        assert_eq!(
            serde_json::to_string(&a.graph).unwrap(),
            serde_json::to_string(&b.graph).unwrap()
        );
        assert_eq!(a.report, b.report);
    }
}

#[test]
fn serialized_document_shape() {
    let records = normalize_all(&[raw("john/johnny", "jane"), raw("jane", "")], '/');
    let out = build(&records, &BuildOptions::default()).unwrap();
    let doc = serde_json::to_value(&out.graph).unwrap();

    assert_eq!(
        doc["elements"][0],
        serde_json::json!({
            "id": 0,
            "label": "john",
            "data": {
                "Aliases": ["johnny"],
                "Sex": "unknown",
                "Generation": "",
                "Dates": "",
                "Clan": "",
                "References": []
            }
        })
    );
    assert_eq!(
        doc["connections"],
        serde_json::json!([{ "source": 0, "target": 1, "type": "sire-childe" }])
    );
}

#[test]
fn content_ids_stable_across_reordering() {
    let options = BuildOptions { id_mode: IdMode::Content, ..Default::default() };
    let forward = normalize_all(&[raw("john", "jane"), raw("jane", "")], '/');
    let reversed = normalize_all(&[raw("jane", ""), raw("john", "jane")], '/');

    let a = build(&forward, &options).unwrap();
    let b = build(&reversed, &options).unwrap();
    assert_eq!(a.graph.connections, b.graph.connections);
}

// -------------------------------------------------------------------------
// Resolver properties
// -------------------------------------------------------------------------

#[test]
fn resolver_prefers_leftmost_start() {
    let index: AliasIndex = [("alice", 0), ("bob smith", 1)].into_iter().collect();
    let r = resolve_detailed("bob smith jones", &index, MatchOrder::LeftmostShortest).unwrap();
    assert_eq!(r.id, 1);
    assert_eq!(r.phrase, "bob smith");

    // "jones" alone would also match, but "bob smith" starts earlier
    let index: AliasIndex = [("jones", 2), ("bob smith", 1)].into_iter().collect();
    assert_eq!(resolve("bob smith jones", &index, MatchOrder::LeftmostShortest), Some(1));
}

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["ann", "bob", "cy", "dee", "eve", "fay"]).prop_map(str::to_string)
}

fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..4).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn resolution_is_a_window_of_the_mention(
        aliases in prop::collection::vec(phrase(), 0..8),
        mention in prop::collection::vec(word(), 0..6),
        longest in any::<bool>(),
    ) {
        let index: AliasIndex = aliases
            .iter()
            .enumerate()
            .map(|(i, a)| (a.as_str(), i as u64))
            .collect();
        let order = if longest { MatchOrder::LongestFirst } else { MatchOrder::LeftmostShortest };
        let mention = mention.join(" ");

        match resolve_detailed(&mention, &index, order) {
            Some(r) => {
                let words: Vec<&str> = mention.split_whitespace().collect();
                prop_assert_eq!(words[r.start..r.end].join(" "), r.phrase.clone());
                prop_assert_eq!(index.get(&r.phrase), Some(r.id));
            }
            None => {
                // No alias appears as a word window of the mention
                let padded = format!(" {mention} ");
                for a in &aliases {
                    let needle = format!(" {a} ");
                    prop_assert!(!padded.contains(&needle));
                }
            }
        }
    }

    #[test]
    fn leftmost_shortest_has_no_earlier_hit(
        aliases in prop::collection::vec(phrase(), 1..8),
        mention in prop::collection::vec(word(), 1..6),
    ) {
        let index: AliasIndex = aliases
            .iter()
            .enumerate()
            .map(|(i, a)| (a.as_str(), i as u64))
            .collect();
        let mention = mention.join(" ");
        if let Some(r) = resolve_detailed(&mention, &index, MatchOrder::LeftmostShortest) {
            let words: Vec<&str> = mention.split_whitespace().collect();
            for start in 0..=r.start {
                let last_end = if start == r.start { r.end } else { words.len() + 1 };
                for end in start + 1..last_end {
                    prop_assert_eq!(index.get(&words[start..end].join(" ")), None);
                }
            }
        }
    }
}
