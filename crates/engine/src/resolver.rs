//! Progeny mention → node resolution.
//!
//! A mention is split into words and every contiguous window of words is
//! tried as a phrase against the alias index. The first window whose phrase
//! names exactly one node wins. Window order is part of the contract:
//!
//! - `LeftmostShortest`: start ascending, then end ascending. For
//!   `"bob smith jones"` that is `bob`, `bob smith`, `bob smith jones`,
//!   `smith`, `smith jones`, `jones`.
//! - `LongestFirst`: length descending, then start ascending.
//!
//! A phrase registered by several nodes only counts as a match when the
//! index's collision policy picks one of them (`last_wins`); otherwise the
//! scan moves on to the next window.

use tracing::debug;

use crate::alias::{AliasIndex, Lookup};
use crate::config::MatchOrder;
use crate::model::NodeId;

/// A successful resolution and the window that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub id: NodeId,
    pub phrase: String,
    /// Word range `[start, end)` within the mention.
    pub start: usize,
    pub end: usize,
}

pub fn resolve(mention: &str, index: &AliasIndex, order: MatchOrder) -> Option<NodeId> {
    resolve_detailed(mention, index, order).map(|r| r.id)
}

pub fn resolve_detailed(mention: &str, index: &AliasIndex, order: MatchOrder) -> Option<Resolution> {
    let words: Vec<&str> = mention.split_whitespace().collect();

    for (start, end) in windows(words.len(), order) {
        let phrase = words[start..end].join(" ");
        match index.lookup(&phrase) {
            Lookup::Unique(id) => {
                debug!(mention, phrase = phrase.as_str(), id, "resolved progeny mention");
                return Some(Resolution { id, phrase, start, end });
            }
            Lookup::Ambiguous(ids) => {
                debug!(mention, phrase = phrase.as_str(), candidates = ids.len(), "skipping ambiguous phrase");
            }
            Lookup::Missing => {}
        }
    }

    None
}

/// Word windows `[start, end)` over `n` words in the given scan order.
pub fn windows(n: usize, order: MatchOrder) -> Box<dyn Iterator<Item = (usize, usize)>> {
    match order {
        MatchOrder::LeftmostShortest => {
            Box::new((0..n).flat_map(move |start| (start + 1..=n).map(move |end| (start, end))))
        }
        MatchOrder::LongestFirst => Box::new(
            (1..=n)
                .rev()
                .flat_map(move |len| (0..=n - len).map(move |start| (start, start + len))),
        ),
    }
}
