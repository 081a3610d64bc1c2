//! The simplex tree container

use crate::node::{NodeKey, NodeStore};
use crate::{Simplex, VertexId};
use itertools::Itertools;
use simplexcrate_core::{Error, Result};
use std::collections::BTreeSet;
use tracing::trace;

/// A simplicial complex stored as a simplex tree.
///
/// Every simplex is a root-to-node path of strictly ascending vertex ids, and
/// the complex is kept closed under taking faces. `V` is an optional payload
/// attached to vertices, e.g. coordinates.
#[derive(Debug, Clone)]
pub struct SimplexTree<V = ()> {
    store: NodeStore<V>,
}

impl<V> Default for SimplexTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SimplexTree<V> {
    /// Create an empty complex
    pub fn new() -> Self {
        Self {
            store: NodeStore::new(),
        }
    }

    /// Test whether `simplex` is present. The query is sorted first.
    pub fn contains(&self, simplex: &[VertexId]) -> bool {
        let query = sorted(simplex);
        self.store.contains(self.store.root(), &query)
    }

    /// Remove `simplex` and every simplex that has it as a face.
    ///
    /// Does nothing if `simplex` is absent.
    pub fn remove(&mut self, simplex: &[VertexId]) {
        if !self.contains(simplex) {
            return;
        }
        let (_, nodes) = self.locate_cofaces(simplex);
        for key in nodes {
            if self.store.is_live(key) {
                self.store.remove(key);
            }
        }
    }

    /// Find every simplex containing `simplex` as a face, together with the
    /// nodes that end in its largest id and head those cofaces' subtrees.
    ///
    /// The empty simplex is a face of everything, so it yields the whole
    /// complex.
    pub fn locate_cofaces(&self, simplex: &[VertexId]) -> (BTreeSet<Simplex>, Vec<NodeKey>) {
        let query = sorted(simplex);
        let Some(&last) = query.last() else {
            let all = self.get_all_simplices().into_iter().collect();
            let nodes = self.store.iter().map(|(key, _)| key).collect();
            return (all, nodes);
        };

        let nodes: Vec<NodeKey> = self
            .store
            .links()
            .at_least(last, query.len())
            .filter(|&key| self.store.is_coface(key, &query))
            .collect();

        let mut cofaces = BTreeSet::new();
        for &key in &nodes {
            let front = self.store.collect_upwards(key);
            for back in self.store.collect_downwards(key, None, false) {
                let mut coface = front.clone();
                coface.extend_from_slice(&back[1..]);
                cofaces.insert(coface);
            }
        }
        (cofaces, nodes)
    }

    /// Every simplex having `simplex` as a face, `simplex` included.
    pub fn cofaces(&self, simplex: &[VertexId]) -> BTreeSet<Simplex> {
        self.locate_cofaces(simplex).0
    }

    /// The link of `simplex`: each proper coface with the ids of `simplex`
    /// removed.
    pub fn get_link(&self, simplex: &[VertexId]) -> BTreeSet<Simplex> {
        let query = sorted(simplex);
        self.cofaces(&query)
            .into_iter()
            .filter(|coface| *coface != query)
            .map(|coface| {
                coface
                    .into_iter()
                    .filter(|v| query.binary_search(v).is_err())
                    .collect::<Simplex>()
            })
            .filter(|face| !face.is_empty() && self.store.contains(self.store.root(), face))
            .collect()
    }

    /// Link condition for the edge `{v1, v2}`:
    /// `link({v1, v2}) == link({v1}) ∩ link({v2})`.
    ///
    /// Contracting an edge that satisfies it preserves the homotopy type.
    pub fn is_link_condition_satisfied(&self, v1: VertexId, v2: VertexId) -> bool {
        let (v1, v2) = (v1.min(v2), v1.max(v2));
        let l1 = self.get_link(&[v1]);
        let l2 = self.get_link(&[v2]);
        let common: BTreeSet<Simplex> = l1.intersection(&l2).cloned().collect();
        self.get_link(&[v1, v2]) == common
    }

    /// Simplices of dimension `j`, i.e. with `j + 1` vertices, in ascending
    /// lexicographic order.
    pub fn simplices(&self, j: usize) -> impl Iterator<Item = Simplex> + '_ {
        self.store
            .collect_downwards(self.store.root(), Some(j + 1), true)
    }

    /// Collect the simplices of dimension `j`.
    pub fn get_simplices(&self, j: usize) -> Vec<Simplex> {
        self.simplices(j).collect()
    }

    /// Collect every non-empty simplex present.
    pub fn get_all_simplices(&self) -> Vec<Simplex> {
        self.store
            .collect_downwards(self.store.root(), None, false)
            .collect()
    }

    /// Maximal simplices, i.e. those that are not a face of anything else.
    pub fn facets(&self) -> Vec<Simplex> {
        self.get_all_simplices()
            .into_iter()
            .filter(|s| self.cofaces(s).len() == 1)
            .collect()
    }

    /// Ids of all vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.store
            .get(self.store.root())
            .into_iter()
            .flat_map(|root| root.children().keys().copied())
    }

    /// Payload attached to `vertex`, if any.
    pub fn value(&self, vertex: VertexId) -> Option<&V> {
        let key = self.store.child(self.store.root(), vertex)?;
        self.store.get(key)?.value()
    }

    /// Number of simplices (every node except the root).
    pub fn len(&self) -> usize {
        self.store.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimension of the largest simplex, `None` for an empty complex.
    pub fn dimension(&self) -> Option<usize> {
        self.store
            .iter()
            .map(|(_, node)| node.depth())
            .max()
            .map(|depth| depth - 1)
    }

    /// Recursive comparison of ids, depths, payloads and children.
    ///
    /// Meant for verification and tests; it walks both trees completely.
    pub fn structurally_eq(&self, other: &Self) -> bool
    where
        V: PartialEq,
    {
        self.store
            .structurally_eq(self.store.root(), &other.store, other.store.root())
    }

    pub(crate) fn store(&self) -> &NodeStore<V> {
        &self.store
    }
}

impl<V: Clone> SimplexTree<V> {
    /// Insert `simplex` and all of its faces.
    ///
    /// `simplex` must be strictly ascending; this is only checked in debug
    /// builds, use [`try_add`](Self::try_add) for untrusted input. `values[i]`
    /// becomes the payload of vertex `simplex[i]`, overwriting an existing
    /// one. Adding a present simplex again only updates payloads.
    pub fn add(&mut self, simplex: &[VertexId], values: Option<&[V]>) {
        debug_assert!(
            simplex.windows(2).all(|w| w[0] < w[1]),
            "simplex must be strictly ascending: {simplex:?}"
        );
        let root = self.store.root();
        self.store.add_simplex(root, simplex, values);
    }

    /// Validated form of [`add`](Self::add).
    ///
    /// Rejects an empty simplex, ids that are not strictly ascending and a
    /// payload slice whose length differs from the simplex.
    pub fn try_add(&mut self, simplex: &[VertexId], values: Option<&[V]>) -> Result<()> {
        if simplex.is_empty() {
            return Err(Error::InvalidSimplex("simplex is empty".to_string()));
        }
        if let Some((a, b)) = simplex.iter().tuple_windows().find(|(a, b)| a >= b) {
            return Err(Error::InvalidSimplex(format!(
                "vertex ids must be strictly ascending, found {} before {}",
                a, b
            )));
        }
        if let Some(values) = values {
            if values.len() != simplex.len() {
                return Err(Error::InvalidSimplex(format!(
                    "{} values supplied for a simplex with {} vertices",
                    values.len(),
                    simplex.len()
                )));
            }
        }
        self.add(simplex, values);
        Ok(())
    }

    /// Contract the edge `{v1, v2}`, identifying the larger id with the
    /// smaller one.
    ///
    /// Simplices containing both endpoints degenerate and are deleted; every
    /// other simplex containing the larger id is re-added with the smaller id
    /// and its cofaces are merged into the result, keeping existing payloads.
    /// With `keep_homotopy` the contraction only happens when the link
    /// condition holds.
    ///
    /// Returns whether the edge was contracted.
    pub fn edge_contract(&mut self, v1: VertexId, v2: VertexId, keep_homotopy: bool) -> bool {
        let (v1, v2) = (v1.min(v2), v1.max(v2));
        if v1 == v2 || !self.contains(&[v1, v2]) {
            trace!(v1, v2, "edge not present, skipping contraction");
            return false;
        }
        if keep_homotopy && !self.is_link_condition_satisfied(v1, v2) {
            trace!(v1, v2, "link condition failed, skipping contraction");
            return false;
        }

        let root = self.store.root();
        let affected: Vec<NodeKey> = self.store.links().all_depths(v2).collect();
        for key in affected {
            if !self.store.is_live(key) {
                continue;
            }
            let mut simplex = self.store.collect_upwards(key);
            if simplex.contains(&v1) {
                self.store.remove(key);
                continue;
            }

            simplex.retain(|&v| v != v2);
            simplex.push(v1);
            simplex.sort_unstable();
            self.store.add_simplex(root, &simplex, None);
            if let Some(target) = self.store.locate(root, &simplex) {
                self.store.merge(target, key);
            }
        }

        trace!(v1, v2, remaining = self.len(), "contracted edge");
        true
    }
}

fn sorted(simplex: &[VertexId]) -> Simplex {
    let mut query = simplex.to_vec();
    query.sort_unstable();
    query
}
