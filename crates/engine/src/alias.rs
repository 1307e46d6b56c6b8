use std::collections::BTreeMap;

use crate::config::CollisionPolicy;
use crate::model::{NodeId, SharedAlias};

/// Result of looking a phrase up in the [`AliasIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Unique(NodeId),
    /// More than one node registered the phrase and the policy refuses to pick.
    Ambiguous(&'a [NodeId]),
    Missing,
}

/// Every known name variant → the nodes that registered it, in
/// registration order. How a shared alias is read back depends on the
/// collision policy.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    entries: BTreeMap<String, Vec<NodeId>>,
    policy: CollisionPolicy,
}

impl AliasIndex {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            entries: BTreeMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Register `alias` for `id`. Re-registering for the same node is a no-op,
    /// except that under `last_wins` it moves the node back to the end.
    /// Returns true when the alias is now shared by more than one node.
    pub fn register(&mut self, alias: &str, id: NodeId) -> bool {
        let ids = self.entries.entry(alias.to_string()).or_default();
        if let Some(pos) = ids.iter().position(|&existing| existing == id) {
            if self.policy == CollisionPolicy::LastWins {
                ids.remove(pos);
                ids.push(id);
            }
        } else {
            ids.push(id);
        }
        ids.len() > 1
    }

    pub fn lookup(&self, phrase: &str) -> Lookup<'_> {
        match self.entries.get(phrase).map(Vec::as_slice) {
            None | Some([]) => Lookup::Missing,
            Some([id]) => Lookup::Unique(*id),
            Some(ids) => match self.policy {
                CollisionPolicy::LastWins => Lookup::Unique(ids[ids.len() - 1]),
                CollisionPolicy::Ambiguous | CollisionPolicy::Error => Lookup::Ambiguous(ids),
            },
        }
    }

    /// The single node a phrase resolves to, if any.
    pub fn get(&self, phrase: &str) -> Option<NodeId> {
        match self.lookup(phrase) {
            Lookup::Unique(id) => Some(id),
            Lookup::Ambiguous(_) | Lookup::Missing => None,
        }
    }

    pub fn candidates(&self, phrase: &str) -> &[NodeId] {
        self.entries.get(phrase).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Aliases registered by more than one node, sorted by alias.
    pub fn collisions(&self) -> Vec<SharedAlias> {
        self.entries
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(alias, ids)| SharedAlias {
                alias: alias.clone(),
                ids: ids.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, NodeId)> for AliasIndex {
    fn from_iter<I: IntoIterator<Item = (S, NodeId)>>(iter: I) -> Self {
        let mut index = AliasIndex::new(CollisionPolicy::default());
        for (alias, id) in iter {
            index.register(alias.as_ref(), id);
        }
        index
    }
}
