// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The multigraph store and its adjacency indices.

use alloc::vec::Vec;

use hashbrown::{DefaultHashBuilder, HashMap};
use indexmap::{IndexMap, IndexSet};

use crate::error::{DuplicateNodeError, EdgeInsertError};
use crate::ids::{EdgeId, EdgeIdSource, NodeId, SequentialEdgeIds};

/// Candidates drawn from an [`EdgeIdSource`] before a taken id is overwritten.
const MAX_FRESH_ID_ATTEMPTS: usize = 64;

type OrderedMap<K, V> = IndexMap<K, V, DefaultHashBuilder>;
type OrderedSet<K> = IndexSet<K, DefaultHashBuilder>;

/// `outer -> inner -> edge ids`, used for both directions.
type Adjacency = HashMap<NodeId, OrderedMap<NodeId, OrderedSet<EdgeId>>>;

/// A node: an id plus caller-owned payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    /// Identity of the node.
    pub id: NodeId,
    /// Opaque payload.
    pub data: T,
}

impl<T> Node<T> {
    /// Creates a node.
    pub fn new(id: impl Into<NodeId>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// A directed edge from `source` to `target` carrying a payload.
///
/// Any number of edges may connect the same ordered pair of nodes; each is
/// distinguished by its own [`EdgeId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge<W> {
    /// Identity of the edge.
    pub id: EdgeId,
    /// Node the edge leaves.
    pub source: NodeId,
    /// Node the edge enters.
    pub target: NodeId,
    /// Opaque payload.
    pub data: W,
}

impl<W> Edge<W> {
    /// Creates an edge.
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        data: W,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            data,
        }
    }
}

/// Directed multigraph with symmetric outgoing and incoming indices.
///
/// Nodes and edges are stored by id. Two indices are maintained side by side:
///
/// - `outgoing`: `source -> target -> {edge id}`
/// - `incoming`: `target -> source -> {edge id}`
///
/// They always describe exactly the same set of edges, and every collection
/// that becomes empty after a removal is pruned, so the indices never grow
/// beyond the live edges. This gives O(1) answers to "is there an edge from
/// `a` to `b`?" and O(k) enumeration of a node's neighbors in either
/// direction.
///
/// Every operation either fully applies or changes nothing. Missing ids are
/// part of the normal contract and are reported with `None` or `false`.
///
/// # Iteration order
///
/// Neighbor and edge enumeration is deterministic: neighbors come out in the
/// order they were first connected, and parallel edges in the order they were
/// added. Node and edge stores use swap-removal, so [`nodes`](Self::nodes) and
/// [`edges`](Self::edges) keep insertion order only until the first removal.
///
/// # Type Parameters
///
/// - `T`: node payload.
/// - `W`: edge payload.
/// - `G`: source of generated edge ids, see [`EdgeIdSource`].
///
/// # Example
///
/// ```
/// use understory_multigraph::{Multigraph, Node};
///
/// let mut graph = Multigraph::<&str, u32>::new();
/// graph.add_node(Node::new("a", "first"));
/// graph.add_node(Node::new("b", "second"));
///
/// // Parallel edges are fine.
/// graph.add_edge_between("a", "b", 1, None).unwrap();
/// graph.add_edge_between("a", "b", 2, None).unwrap();
/// assert_eq!(graph.edges_between("a", "b").count(), 2);
///
/// // Edges need both endpoints.
/// assert!(graph.add_edge_between("a", "missing", 3, None).is_none());
///
/// // Removing a node takes its edges with it.
/// graph.remove_node("b");
/// assert_eq!(graph.edge_count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Multigraph<T, W, G = SequentialEdgeIds> {
    nodes: OrderedMap<NodeId, Node<T>>,
    edges: OrderedMap<EdgeId, Edge<W>>,
    outgoing: Adjacency,
    incoming: Adjacency,
    ids: G,
}

impl<T, W, G: Default> Default for Multigraph<T, W, G> {
    fn default() -> Self {
        Self::with_id_source(G::default())
    }
}

impl<T, W> Multigraph<T, W> {
    /// Creates an empty graph with [`SequentialEdgeIds`] for generated edge ids.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, W, G> Multigraph<T, W, G> {
    /// Creates an empty graph that draws generated edge ids from `ids`.
    #[must_use]
    pub fn with_id_source(ids: G) -> Self {
        Self {
            nodes: OrderedMap::default(),
            edges: OrderedMap::default(),
            outgoing: Adjacency::default(),
            incoming: Adjacency::default(),
            ids,
        }
    }

    /// Returns the edge id source.
    #[must_use]
    pub fn id_source(&self) -> &G {
        &self.ids
    }

    /// Returns the edge id source mutably.
    pub fn id_source_mut(&mut self) -> &mut G {
        &mut self.ids
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no nodes (and therefore no edges).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts `node`, replacing any node with the same id.
    ///
    /// Edges touching the id are kept. Returns the replaced node, if any.
    pub fn add_node(&mut self, node: Node<T>) -> Option<Node<T>> {
        self.nodes.insert(node.id.clone(), node)
    }

    /// Shorthand for `add_node(Node::new(id, data))`.
    pub fn insert_node(&mut self, id: impl Into<NodeId>, data: T) -> Option<Node<T>> {
        self.add_node(Node::new(id, data))
    }

    /// Inserts `node` unless its id is already taken.
    pub fn try_add_node(&mut self, node: Node<T>) -> Result<(), DuplicateNodeError> {
        if self.nodes.contains_key(&node.id) {
            return Err(DuplicateNodeError { id: node.id });
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node<T>> {
        self.nodes.get(id)
    }

    /// Looks up a node's payload mutably.
    pub fn node_data_mut(&mut self, id: &str) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|node| &mut node.data)
    }

    /// Returns `true` if a node with this id exists.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns the first node in store order, if any.
    ///
    /// Used wherever "some existing node" is needed.
    #[must_use]
    pub fn first_node(&self) -> Option<&Node<T>> {
        self.nodes.first().map(|(_, node)| node)
    }

    pub(crate) fn nodes_key_value(&self, id: &str) -> Option<(&NodeId, &Node<T>)> {
        self.nodes.get_key_value(id)
    }

    /// Iterates over all nodes in store order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> + '_ {
        self.nodes.values()
    }

    /// Removes a node and every edge that enters or leaves it.
    ///
    /// Returns the removed node, or `None` if it did not exist (in which case
    /// nothing changes). Runs in O(k) for a node of total degree k.
    pub fn remove_node(&mut self, id: &str) -> Option<Node<T>> {
        let node = self.nodes.swap_remove(id)?;

        let mut incident: Vec<EdgeId> = Vec::new();
        for index in [&self.outgoing, &self.incoming] {
            if let Some(buckets) = index.get(id) {
                incident.extend(buckets.values().flatten().cloned());
            }
        }
        // Self-loops are listed twice; the second removal is a no-op.
        for edge in &incident {
            self.remove_edge(edge);
        }

        Some(node)
    }

    /// Adds `edge` if both of its endpoints exist.
    ///
    /// On success returns the stored edge. An existing edge with the same id
    /// is replaced, and its old endpoints are unindexed first. If either
    /// endpoint is missing this returns `None` and the graph is unchanged.
    pub fn add_edge(&mut self, edge: Edge<W>) -> Option<&Edge<W>> {
        if !self.contains_node(&edge.source) || !self.contains_node(&edge.target) {
            return None;
        }
        Some(self.link(edge))
    }

    /// Adds `edge` unless an endpoint is missing or its id is already taken.
    pub fn try_add_edge(&mut self, edge: Edge<W>) -> Result<&Edge<W>, EdgeInsertError> {
        if !self.contains_node(&edge.source) {
            return Err(EdgeInsertError::MissingSource(edge.source));
        }
        if !self.contains_node(&edge.target) {
            return Err(EdgeInsertError::MissingTarget(edge.target));
        }
        if self.edges.contains_key(&edge.id) {
            return Err(EdgeInsertError::DuplicateId(edge.id));
        }
        Ok(self.link(edge))
    }

    /// Removes an edge, returning it if it existed.
    pub fn remove_edge(&mut self, id: &str) -> Option<Edge<W>> {
        let edge = self.edges.swap_remove(id)?;
        self.unlink(&edge);
        Some(edge)
    }

    /// Looks up an edge.
    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&Edge<W>> {
        self.edges.get(id)
    }

    /// Looks up an edge's payload mutably.
    pub fn edge_data_mut(&mut self, id: &str) -> Option<&mut W> {
        self.edges.get_mut(id).map(|edge| &mut edge.data)
    }

    /// Returns `true` if an edge with this id exists.
    #[must_use]
    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    /// Iterates over all edges in store order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<W>> + '_ {
        self.edges.values()
    }

    /// Iterates over the edges leaving `node`.
    ///
    /// Edges are grouped by target, targets in the order they were first
    /// connected.
    pub fn edges_from<'a>(
        &'a self,
        node: &str,
    ) -> impl Iterator<Item = &'a Edge<W>> + use<'a, T, W, G> {
        self.resolve(
            self.outgoing
                .get(node)
                .into_iter()
                .flat_map(|buckets| buckets.values())
                .flatten(),
        )
    }

    /// Iterates over the edges entering `node`.
    ///
    /// Edges are grouped by source, sources in the order they were first
    /// connected.
    pub fn edges_to<'a>(
        &'a self,
        node: &str,
    ) -> impl Iterator<Item = &'a Edge<W>> + use<'a, T, W, G> {
        self.resolve(
            self.incoming
                .get(node)
                .into_iter()
                .flat_map(|buckets| buckets.values())
                .flatten(),
        )
    }

    /// Iterates over every edge from `source` to `target`, oldest first.
    pub fn edges_between<'a>(
        &'a self,
        source: &str,
        target: &str,
    ) -> impl Iterator<Item = &'a Edge<W>> + use<'a, T, W, G> {
        self.resolve(
            self.outgoing
                .get(source)
                .and_then(|buckets| buckets.get(target))
                .into_iter()
                .flatten(),
        )
    }

    /// Returns the oldest edge from `source` to `target`, if any. O(1).
    #[must_use]
    pub fn first_edge_between(&self, source: &str, target: &str) -> Option<&Edge<W>> {
        let id = self.outgoing.get(source)?.get(target)?.first()?;
        self.edges.get(id)
    }

    /// Returns `true` if at least one edge runs from `source` to `target`. O(1).
    #[must_use]
    pub fn has_edge_between(&self, source: &str, target: &str) -> bool {
        self.outgoing
            .get(source)
            .is_some_and(|buckets| buckets.contains_key(target))
    }

    /// Distinct nodes that `node` has edges to.
    pub fn target_nodes<'a>(
        &'a self,
        node: &str,
    ) -> impl Iterator<Item = &'a NodeId> + use<'a, T, W, G> {
        self.outgoing
            .get(node)
            .into_iter()
            .flat_map(|buckets| buckets.keys())
    }

    /// Distinct nodes that have edges to `node`.
    pub fn source_nodes<'a>(
        &'a self,
        node: &str,
    ) -> impl Iterator<Item = &'a NodeId> + use<'a, T, W, G> {
        self.incoming
            .get(node)
            .into_iter()
            .flat_map(|buckets| buckets.keys())
    }

    /// Number of edges leaving `node`, counting parallel edges.
    #[must_use]
    pub fn out_degree(&self, node: &str) -> usize {
        degree(&self.outgoing, node)
    }

    /// Number of edges entering `node`, counting parallel edges.
    #[must_use]
    pub fn in_degree(&self, node: &str) -> usize {
        degree(&self.incoming, node)
    }

    /// Removes all nodes and edges.
    ///
    /// The id source is left alone, so generated ids keep counting.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.outgoing.clear();
        self.incoming.clear();
    }

    /// Snapshot of store and index sizes for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> MultigraphDebugInfo {
        let (outgoing_pairs, outgoing_entries) = index_sizes(&self.outgoing);
        let (incoming_pairs, incoming_entries) = index_sizes(&self.incoming);
        MultigraphDebugInfo {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            outgoing_sources: self.outgoing.len(),
            incoming_targets: self.incoming.len(),
            outgoing_pairs,
            incoming_pairs,
            outgoing_entries,
            incoming_entries,
        }
    }

    fn resolve<'a>(
        &'a self,
        ids: impl Iterator<Item = &'a EdgeId> + 'a,
    ) -> impl Iterator<Item = &'a Edge<W>> + 'a {
        ids.filter_map(|id| self.edges.get(id))
    }

    /// Indexes `edge` in both directions and stores it.
    ///
    /// Endpoints must already be validated.
    fn link(&mut self, edge: Edge<W>) -> &Edge<W> {
        if let Some(old) = self.edges.swap_remove(&edge.id) {
            self.unlink(&old);
        }

        self.outgoing
            .entry(edge.source.clone())
            .or_default()
            .entry(edge.target.clone())
            .or_default()
            .insert(edge.id.clone());
        self.incoming
            .entry(edge.target.clone())
            .or_default()
            .entry(edge.source.clone())
            .or_default()
            .insert(edge.id.clone());

        let (index, _) = self.edges.insert_full(edge.id.clone(), edge);
        &self.edges[index]
    }

    fn unlink(&mut self, edge: &Edge<W>) {
        detach(&mut self.outgoing, &edge.source, &edge.target, &edge.id);
        detach(&mut self.incoming, &edge.target, &edge.source, &edge.id);
    }
}

impl<T, W, G: EdgeIdSource> Multigraph<T, W, G> {
    /// Adds an edge from `source` to `target` carrying `data`.
    ///
    /// When `id` is `None`, an id is drawn from the graph's [`EdgeIdSource`],
    /// skipping ids already in use. A source that keeps returning taken ids
    /// is asked a bounded number of times; after that its last id is used
    /// and the existing edge is replaced, as with [`add_edge`](Self::add_edge).
    /// Returns `None` and changes nothing when an endpoint is missing.
    pub fn add_edge_between(
        &mut self,
        source: &str,
        target: &str,
        data: W,
        id: Option<EdgeId>,
    ) -> Option<&Edge<W>> {
        // Reuse the stored keys so the indices share one allocation per id.
        let source = self.nodes.get_key_value(source)?.0.clone();
        let target = self.nodes.get_key_value(target)?.0.clone();
        let id = match id {
            Some(id) => id,
            None => self.fresh_edge_id(),
        };
        Some(self.link(Edge {
            id,
            source,
            target,
            data,
        }))
    }

    fn fresh_edge_id(&mut self) -> EdgeId {
        let mut id = self.ids.next_edge_id();
        for _ in 1..MAX_FRESH_ID_ATTEMPTS {
            if !self.edges.contains_key(&id) {
                break;
            }
            id = self.ids.next_edge_id();
        }
        id
    }
}

/// Debug snapshot of a [`Multigraph`]'s stores and indices.
///
/// With no parallel edges, `outgoing_pairs == incoming_pairs == edges`; in
/// general `outgoing_entries == incoming_entries == edges`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultigraphDebugInfo {
    /// Stored nodes.
    pub nodes: usize,
    /// Stored edges.
    pub edges: usize,
    /// Nodes with at least one outgoing edge.
    pub outgoing_sources: usize,
    /// Nodes with at least one incoming edge.
    pub incoming_targets: usize,
    /// Distinct `(source, target)` buckets in the outgoing index.
    pub outgoing_pairs: usize,
    /// Distinct `(target, source)` buckets in the incoming index.
    pub incoming_pairs: usize,
    /// Edge ids held by the outgoing index.
    pub outgoing_entries: usize,
    /// Edge ids held by the incoming index.
    pub incoming_entries: usize,
}

fn degree(index: &Adjacency, node: &str) -> usize {
    index
        .get(node)
        .map_or(0, |buckets| buckets.values().map(IndexSet::len).sum())
}

fn index_sizes(index: &Adjacency) -> (usize, usize) {
    index.values().fold((0, 0), |(pairs, entries), buckets| {
        (
            pairs + buckets.len(),
            entries + buckets.values().map(IndexSet::len).sum::<usize>(),
        )
    })
}

/// Removes `id` from `index[outer][inner]`, pruning whatever becomes empty.
fn detach(index: &mut Adjacency, outer: &str, inner: &str, id: &str) {
    let Some(buckets) = index.get_mut(outer) else {
        return;
    };
    if let Some(ids) = buckets.get_mut(inner) {
        ids.shift_remove(id);
        if ids.is_empty() {
            buckets.shift_remove(inner);
        }
    }
    if buckets.is_empty() {
        index.remove(outer);
    }
}
