//! Node arena for the simplex tree.
//!
//! Nodes live in a [`SlotMap`] and refer to each other by [`NodeKey`]. A node
//! is identified by the path of vertex ids from the root sentinel down to it,
//! so the node at depth `k` represents a `(k - 1)`-simplex.
//!
//! [`NodeStore`] owns both the arena and the [`LinkIndex`]; its mutation
//! routines are the only code that touches the index.

mod link_index;

pub(crate) use link_index::LinkIndex;

use crate::{Simplex, VertexId};
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;

new_key_type! {
    /// Stable handle to a node of a [`SimplexTree`](crate::SimplexTree).
    ///
    /// Keys stay valid until the node is removed or merged away.
    pub struct NodeKey;
}

/// One entry of the tree. The root sentinel has depth 0 and its `id` is unused.
#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    id: VertexId,
    depth: usize,
    value: Option<V>,
    children: BTreeMap<VertexId, NodeKey>,
    parent: Option<NodeKey>,
}

impl<V> Node<V> {
    fn new(id: VertexId, depth: usize, parent: Option<NodeKey>, value: Option<V>) -> Self {
        Self {
            id,
            depth,
            value,
            children: BTreeMap::new(),
            parent,
        }
    }

    pub(crate) fn id(&self) -> VertexId {
        self.id
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub(crate) fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub(crate) fn children(&self) -> &BTreeMap<VertexId, NodeKey> {
        &self.children
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeStore<V> {
    nodes: SlotMap<NodeKey, Node<V>>,
    links: LinkIndex,
    root: NodeKey,
}

impl<V> NodeStore<V> {
    pub(crate) fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(0, 0, None, None));
        Self {
            nodes,
            links: LinkIndex::default(),
            root,
        }
    }

    pub(crate) fn root(&self) -> NodeKey {
        self.root
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<V>> {
        self.nodes.get(key)
    }

    pub(crate) fn is_live(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub(crate) fn links(&self) -> &LinkIndex {
        &self.links
    }

    /// Number of nodes excluding the root sentinel.
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Every node except the root sentinel.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node<V>)> + '_ {
        let root = self.root;
        self.nodes.iter().filter(move |(key, _)| *key != root)
    }

    pub(crate) fn child(&self, parent: NodeKey, id: VertexId) -> Option<NodeKey> {
        self.nodes.get(parent)?.children.get(&id).copied()
    }

    /// Create child `id` under `parent` if absent; a supplied value overwrites
    /// the payload of an existing child.
    pub(crate) fn add_child(&mut self, parent: NodeKey, id: VertexId, value: Option<V>) -> NodeKey {
        if let Some(existing) = self.child(parent, id) {
            if value.is_some() {
                self.nodes[existing].value = value;
            }
            return existing;
        }

        let depth = self.nodes[parent].depth + 1;
        let key = self.nodes.insert(Node::new(id, depth, Some(parent), value));
        self.nodes[parent].children.insert(id, key);
        self.links.insert(id, depth, key);
        key
    }

    /// Insert `simplex` below `start` together with every chain of its
    /// remaining ids, so each face of the simplex gets a node.
    ///
    /// `values[i]` becomes the payload of the direct child for `simplex[i]`;
    /// deeper nodes are created without payload. Missing values are treated
    /// as absent.
    pub(crate) fn add_simplex(&mut self, start: NodeKey, simplex: &[VertexId], values: Option<&[V]>)
    where
        V: Clone,
    {
        let mut work = vec![(start, simplex, values)];
        while let Some((node, rest, vals)) = work.pop() {
            for (i, &id) in rest.iter().enumerate() {
                let value = vals.and_then(|v| v.get(i)).cloned();
                let child = self.add_child(node, id, value);
                if i + 1 < rest.len() {
                    work.push((child, &rest[i + 1..], None));
                }
            }
        }
    }

    /// Follow `simplex` downwards from `start`, head first.
    pub(crate) fn locate(&self, start: NodeKey, simplex: &[VertexId]) -> Option<NodeKey> {
        simplex
            .iter()
            .try_fold(start, |node, &id| self.child(node, id))
    }

    pub(crate) fn contains(&self, start: NodeKey, simplex: &[VertexId]) -> bool {
        self.locate(start, simplex).is_some()
    }

    /// True iff the path from the root to `key` contains every id of the
    /// ascending `simplex`.
    pub(crate) fn is_coface(&self, key: NodeKey, simplex: &[VertexId]) -> bool {
        let mut remaining = simplex;
        let mut current = key;
        while let Some(node) = self.nodes.get(current) {
            let Some(parent) = node.parent else {
                break;
            };
            if let Some((&last, rest)) = remaining.split_last() {
                if last == node.id {
                    remaining = rest;
                }
            }
            current = parent;
        }
        remaining.is_empty()
    }

    /// The simplex represented by `key`.
    pub(crate) fn collect_upwards(&self, key: NodeKey) -> Simplex {
        let mut simplex = Vec::new();
        let mut current = key;
        while let Some(node) = self.nodes.get(current) {
            let Some(parent) = node.parent else {
                break;
            };
            simplex.push(node.id);
            current = parent;
        }
        simplex.reverse();
        simplex
    }

    /// Lazily enumerate the simplices rooted at `start`.
    ///
    /// Each item starts with `start`'s own id (nothing for the root). With
    /// `maximal` and a `limit`, only paths reaching exactly `limit` levels
    /// below `start` are produced; with `maximal` and no limit, only paths
    /// ending in a leaf. Otherwise every path of at most `limit` levels is
    /// produced, `start` itself included.
    pub(crate) fn collect_downwards(
        &self,
        start: NodeKey,
        limit: Option<usize>,
        maximal: bool,
    ) -> Descendants<'_, V> {
        let mut stack = Vec::new();
        if let Some(node) = self.nodes.get(start) {
            let path = if node.parent.is_some() {
                vec![node.id]
            } else {
                Vec::new()
            };
            stack.push((start, path, 0));
        }
        Descendants {
            nodes: &self.nodes,
            stack,
            limit,
            maximal,
        }
    }

    /// Detach `key` from its parent and the index, then destroy its subtree.
    pub(crate) fn remove(&mut self, key: NodeKey) {
        if key == self.root {
            return;
        }
        self.detach(key);

        let mut work = vec![key];
        while let Some(current) = work.pop() {
            if let Some(node) = self.nodes.remove(current) {
                self.links.remove(node.id, node.depth, current);
                work.extend(node.children.into_values());
            }
        }
    }

    /// Absorb `other` into `target`.
    ///
    /// Children of `other` move under `target`; when both have a child with
    /// the same id the two are merged recursively and `target`'s side keeps
    /// its payload. `other` itself is consumed.
    pub(crate) fn merge(&mut self, target: NodeKey, other: NodeKey) {
        if target == other || other == self.root || !self.is_live(target) {
            return;
        }
        self.detach(other);
        let Some(absorbed) = self.nodes.remove(other) else {
            return;
        };
        self.links.remove(absorbed.id, absorbed.depth, other);
        if self.nodes[target].value.is_none() {
            self.nodes[target].value = absorbed.value;
        }

        let mut work = vec![(target, absorbed.children)];
        while let Some((into, children)) = work.pop() {
            for (id, child) in children {
                match self.child(into, id) {
                    Some(existing) => {
                        let Some(node) = self.nodes.remove(child) else {
                            continue;
                        };
                        self.links.remove(node.id, node.depth, child);
                        if self.nodes[existing].value.is_none() {
                            self.nodes[existing].value = node.value;
                        }
                        work.push((existing, node.children));
                    }
                    None => self.reparent(child, into),
                }
            }
        }
    }

    /// Hang `key` under `parent` and re-link its whole subtree at the new depths.
    fn reparent(&mut self, key: NodeKey, parent: NodeKey) {
        let id = self.nodes[key].id;
        let depth = self.nodes[parent].depth + 1;
        self.nodes[parent].children.insert(id, key);

        let mut work = vec![(key, parent, depth)];
        while let Some((current, new_parent, new_depth)) = work.pop() {
            let node = &mut self.nodes[current];
            self.links.remove(node.id, node.depth, current);
            node.parent = Some(new_parent);
            node.depth = new_depth;
            self.links.insert(node.id, new_depth, current);
            work.extend(
                node.children
                    .values()
                    .map(|&child| (child, current, new_depth + 1)),
            );
        }
    }

    /// Unhook `key` from its parent and from the index.
    fn detach(&mut self, key: NodeKey) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        let (id, depth) = (node.id, node.depth);
        let parent = node.parent.take();
        self.links.remove(id, depth, key);
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            if parent.children.get(&id) == Some(&key) {
                parent.children.remove(&id);
            }
        }
    }

    /// Recursive comparison of id, depth, payload and children.
    pub(crate) fn structurally_eq(&self, key: NodeKey, other: &Self, other_key: NodeKey) -> bool
    where
        V: PartialEq,
    {
        let mut work = vec![(key, other_key)];
        while let Some((a, b)) = work.pop() {
            let (Some(a_node), Some(b_node)) = (self.nodes.get(a), other.nodes.get(b)) else {
                return false;
            };
            if a_node.id != b_node.id
                || a_node.depth != b_node.depth
                || a_node.value != b_node.value
                || a_node.children.len() != b_node.children.len()
            {
                return false;
            }
            for ((a_id, &a_child), (b_id, &b_child)) in
                a_node.children.iter().zip(b_node.children.iter())
            {
                if a_id != b_id {
                    return false;
                }
                work.push((a_child, b_child));
            }
        }
        true
    }
}

/// Depth-first iterator returned by [`NodeStore::collect_downwards`].
///
/// Paths come out in ascending lexicographic order.
pub(crate) struct Descendants<'a, V> {
    nodes: &'a SlotMap<NodeKey, Node<V>>,
    stack: Vec<(NodeKey, Simplex, usize)>,
    limit: Option<usize>,
    maximal: bool,
}

impl<V> Iterator for Descendants<'_, V> {
    type Item = Simplex;

    fn next(&mut self) -> Option<Simplex> {
        while let Some((key, path, level)) = self.stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            let at_limit = self.limit.is_some_and(|limit| level >= limit);
            if !at_limit {
                for (&id, &child) in node.children.iter().rev() {
                    let mut child_path = path.clone();
                    child_path.push(id);
                    self.stack.push((child, child_path, level + 1));
                }
            }

            // the root sentinel has an empty path and is never produced
            if path.is_empty() {
                continue;
            }
            let emit = match (self.maximal, self.limit) {
                (true, Some(limit)) => level == limit,
                (true, None) => node.children.is_empty(),
                (false, _) => true,
            };
            if emit {
                return Some(path);
            }
        }
        None
    }
}
