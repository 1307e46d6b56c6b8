//! `lineage validate` and `lineage resolve`: look at a record file without
//! writing a graph.

use std::collections::HashMap;
use std::path::PathBuf;

use lineage_engine::builder::build_alias_index;
use lineage_engine::ids::assign_ids;
use lineage_engine::normalize::normalize_all;
use lineage_engine::resolver::resolve_detailed;
use lineage_engine::NodeId;
use serde::Serialize;
use tracing::warn;

use crate::options::{load_config, InputArgs, ResolveArgs};
use crate::CliError;

pub fn cmd_validate(input: PathBuf, input_args: InputArgs) -> Result<(), CliError> {
    let config = load_config(&input_args, None)?;
    let raws = lineage_io::csv::read_records(&input, &config.input)?;
    let records = normalize_all(&raws, config.input.name_separator);

    let unnamed: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.label().is_empty())
        .map(|(i, _)| i)
        .collect();
    for row in &unnamed {
        warn!(row, "record has an empty name");
    }

    let mentions: usize = records.iter().map(|r| r.progeny_mentions.len()).sum();
    println!(
        "{}: {} records, {} progeny mentions (delimiter '{}')",
        input.display(),
        records.len(),
        mentions,
        config.input.delimiter
    );
    if !unnamed.is_empty() {
        eprintln!("{} record(s) have an empty name", unnamed.len());
    }
    Ok(())
}

#[derive(Serialize)]
struct MentionResult {
    mention: String,
    id: Option<NodeId>,
    label: Option<String>,
    phrase: Option<String>,
}

pub fn cmd_resolve(
    input: PathBuf,
    mentions: Vec<String>,
    input_args: InputArgs,
    resolve_args: ResolveArgs,
    json: bool,
) -> Result<(), CliError> {
    if mentions.iter().all(|m| m.trim().is_empty()) {
        return Err(CliError::usage("no mention given"));
    }

    let config = load_config(&input_args, Some(&resolve_args))?;
    let options = config.build_options();
    let raws = lineage_io::csv::read_records(&input, &config.input)?;
    let records = normalize_all(&raws, config.input.name_separator);

    let ids = assign_ids(&records, options.id_mode);
    let index = build_alias_index(&records, &ids, options.on_collision)?;
    let labels: HashMap<NodeId, &str> = ids
        .iter()
        .copied()
        .zip(records.iter().map(|r| r.label()))
        .collect();

    let results: Vec<MentionResult> = mentions
        .iter()
        .map(|m| {
            let mention = m.trim().to_lowercase();
            let resolution = resolve_detailed(&mention, &index, options.match_order);
            MentionResult {
                id: resolution.as_ref().map(|r| r.id),
                label: resolution
                    .as_ref()
                    .and_then(|r| labels.get(&r.id))
                    .map(|l| l.to_string()),
                phrase: resolution.map(|r| r.phrase),
                mention,
            }
        })
        .collect();

    if json {
        let json_str = serde_json::to_string_pretty(&results)
            .map_err(|e| CliError::output(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        return Ok(());
    }

    for r in &results {
        match (&r.id, &r.label, &r.phrase) {
            (Some(id), Some(label), Some(phrase)) => {
                println!("{} -> {} ({}) via \"{}\"", r.mention, id, label, phrase)
            }
            _ => println!("{} -> unresolved", r.mention),
        }
    }
    Ok(())
}
