//! Raw record fields → [`CharacterRecord`].
//!
//! All text is trimmed and lowercased. Nothing here can fail: absent or
//! empty fields become empty values (or the `unknown` sentinel for sex).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{CharacterRecord, RawRecord};

/// Sex value used when the field is empty.
pub const UNKNOWN_SEX: &str = "unknown";

/// Progeny entries are separated by a run of two or more whitespace
/// characters, or by a newline. Single spaces belong to multi-word names.
static PROGENY_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}|\n").expect("static progeny separator pattern"));

pub fn normalize(raw: &RawRecord, name_separator: char) -> CharacterRecord {
    let sex = clean(&raw.sex);

    CharacterRecord {
        names: split_names(&raw.name, name_separator),
        sex: if sex.is_empty() { UNKNOWN_SEX.to_string() } else { sex },
        generation: clean(&raw.generation),
        dates: clean(&raw.dates),
        clan: clean(&raw.clan),
        progeny_mentions: split_progeny(&raw.progeny),
        references: split_references(&raw.references),
    }
}

pub fn normalize_all(raws: &[RawRecord], name_separator: char) -> Vec<CharacterRecord> {
    raws.iter().map(|r| normalize(r, name_separator)).collect()
}

fn clean(field: &str) -> String {
    field.trim().to_lowercase()
}

/// Split the name field. The first part is kept even when empty so every
/// record has a label; later duplicates of an earlier part are dropped.
pub fn split_names(field: &str, separator: char) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for part in field.split(separator).map(clean) {
        if names.is_empty() || (!part.is_empty() && !names.contains(&part)) {
            names.push(part);
        }
    }
    names
}

pub fn split_progeny(field: &str) -> Vec<String> {
    let field = clean(field);
    if field.is_empty() {
        return Vec::new();
    }
    PROGENY_SEPARATOR
        .split(&field)
        .filter(|entry| !entry.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Whitespace-separated reference tokens, first occurrence order, no repeats.
pub fn split_references(field: &str) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for token in field.split_whitespace().map(str::to_lowercase) {
        if !refs.contains(&token) {
            refs.push(token);
        }
    }
    refs
}
