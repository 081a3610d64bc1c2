//! Structural invariant checks for [`SimplexTree`].

use crate::SimplexTree;
use simplexcrate_core::{Error, Result};

impl<V> SimplexTree<V> {
    /// Check every structural invariant of the tree.
    ///
    /// - each node is registered with its parent and sits one level below it
    /// - ids strictly increase along every root path
    /// - a node is in the link index under `(id, depth)` iff it is in the tree
    /// - the complex is closed under taking faces
    ///
    /// Uniqueness of simplices follows from the first two. This walks the
    /// whole complex and is meant for tests and debugging.
    pub fn validate(&self) -> Result<()> {
        let store = self.store();

        for (key, node) in store.iter() {
            let parent_key = node.parent().ok_or_else(|| {
                Error::Topology(format!("node {:?} has no parent", key))
            })?;
            let parent = store.get(parent_key).ok_or_else(|| {
                Error::Topology(format!("parent of node {:?} is not in the tree", key))
            })?;
            if parent.children().get(&node.id()) != Some(&key) {
                return Err(Error::Topology(format!(
                    "node {:?} (id {}) is not registered with its parent",
                    key,
                    node.id()
                )));
            }
            if node.depth() != parent.depth() + 1 {
                return Err(Error::Topology(format!(
                    "node {:?} has depth {} under a parent of depth {}",
                    key,
                    node.depth(),
                    parent.depth()
                )));
            }
            if parent_key != store.root() && parent.id() >= node.id() {
                return Err(Error::Topology(format!(
                    "path ids must increase, found {} above {}",
                    parent.id(),
                    node.id()
                )));
            }
            if !store.links().contains(node.id(), node.depth(), key) {
                return Err(Error::Topology(format!(
                    "node {:?} (id {}, depth {}) missing from the link index",
                    key,
                    node.id(),
                    node.depth()
                )));
            }
        }

        for (id, depth, key) in store.links().iter() {
            match store.get(key) {
                Some(node) if node.id() == id && node.depth() == depth => {}
                Some(_) => {
                    return Err(Error::Topology(format!(
                        "link index entry ({}, {}) points at a node with different id or depth",
                        id, depth
                    )))
                }
                None => {
                    return Err(Error::Topology(format!(
                        "link index entry ({}, {}) points at a removed node",
                        id, depth
                    )))
                }
            }
        }
        if store.links().len() != store.node_count() {
            return Err(Error::Topology(format!(
                "link index holds {} entries for {} nodes",
                store.links().len(),
                store.node_count()
            )));
        }

        // closure of every facet implies closure of every face
        for simplex in self.get_all_simplices() {
            if simplex.len() < 2 {
                continue;
            }
            for skip in 0..simplex.len() {
                let facet: Vec<_> = simplex
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &v)| v)
                    .collect();
                if !self.contains(&facet) {
                    return Err(Error::Topology(format!(
                        "{:?} is present but its face {:?} is not",
                        simplex, facet
                    )));
                }
            }
        }

        Ok(())
    }
}
