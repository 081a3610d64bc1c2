//! Reverse lookup from `(vertex id, depth)` to the nodes ending in that id.
//!
//! The index only holds keys; the arena in [`NodeStore`](super::NodeStore)
//! owns the nodes. Mutators are visible to the parent module only, so every
//! change to the index happens inside a node-store mutation.

use super::NodeKey;
use crate::VertexId;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub(crate) struct LinkIndex {
    buckets: BTreeMap<VertexId, BTreeMap<usize, BTreeSet<NodeKey>>>,
}

impl LinkIndex {
    pub(super) fn insert(&mut self, id: VertexId, depth: usize, key: NodeKey) -> bool {
        self.buckets
            .entry(id)
            .or_default()
            .entry(depth)
            .or_default()
            .insert(key)
    }

    /// Remove an entry, pruning buckets that become empty.
    pub(super) fn remove(&mut self, id: VertexId, depth: usize, key: NodeKey) -> bool {
        let Some(by_depth) = self.buckets.get_mut(&id) else {
            return false;
        };
        let Some(keys) = by_depth.get_mut(&depth) else {
            return false;
        };
        let removed = keys.remove(&key);
        if keys.is_empty() {
            by_depth.remove(&depth);
            if by_depth.is_empty() {
                self.buckets.remove(&id);
            }
        }
        removed
    }

    pub(crate) fn contains(&self, id: VertexId, depth: usize, key: NodeKey) -> bool {
        self.buckets
            .get(&id)
            .and_then(|by_depth| by_depth.get(&depth))
            .is_some_and(|keys| keys.contains(&key))
    }

    /// Nodes ending in `id` whose depth is at least `min_depth`, shallowest first.
    pub(crate) fn at_least(
        &self,
        id: VertexId,
        min_depth: usize,
    ) -> impl Iterator<Item = NodeKey> + '_ {
        self.buckets.get(&id).into_iter().flat_map(move |by_depth| {
            by_depth
                .range(min_depth..)
                .flat_map(|(_, keys)| keys.iter().copied())
        })
    }

    /// Nodes ending in `id` at every depth.
    pub(crate) fn all_depths(&self, id: VertexId) -> impl Iterator<Item = NodeKey> + '_ {
        self.at_least(id, 0)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (VertexId, usize, NodeKey)> + '_ {
        self.buckets.iter().flat_map(|(&id, by_depth)| {
            by_depth
                .iter()
                .flat_map(move |(&depth, keys)| keys.iter().map(move |&key| (id, depth, key)))
        })
    }

    /// Total number of indexed nodes.
    pub(crate) fn len(&self) -> usize {
        self.buckets
            .values()
            .flat_map(|by_depth| by_depth.values())
            .map(BTreeSet::len)
            .sum()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
