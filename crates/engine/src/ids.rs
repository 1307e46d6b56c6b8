use std::collections::HashSet;

use crate::config::IdMode;
use crate::model::{CharacterRecord, NodeId};

/// Content ids are kept within 53 bits so JavaScript consumers read them exactly.
const CONTENT_ID_MASK: u64 = (1 << 53) - 1;

/// One id per record, in record order.
pub fn assign_ids(records: &[CharacterRecord], mode: IdMode) -> Vec<NodeId> {
    match mode {
        IdMode::Positional => (0..records.len() as NodeId).collect(),
        IdMode::Content => {
            let mut seen = HashSet::with_capacity(records.len());
            records
                .iter()
                .map(|record| {
                    let label = record.label();
                    let mut id = content_id(label);
                    let mut occurrence = 1u32;
                    while !seen.insert(id) {
                        id = content_id(&format!("{label}#{occurrence}"));
                        occurrence += 1;
                    }
                    id
                })
                .collect()
        }
    }
}

fn content_id(key: &str) -> NodeId {
    let hash = blake3::hash(key.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes) & CONTENT_ID_MASK
}
