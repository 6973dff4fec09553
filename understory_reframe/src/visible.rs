// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded enumeration of the nodes around the origin.

use alloc::collections::VecDeque;
use core::fmt;

use kurbo::Affine;
use understory_multigraph::{Edge, Multigraph, Node, NodeId};

/// Culling predicate that never prunes.
pub type NoCull = fn(&NodeId, Affine, Affine) -> bool;

/// A node yielded by [`VisibleNodes`], with its transform relative to the origin.
#[derive(Debug)]
pub struct VisibleNode<'a, T> {
    /// The node.
    pub node: &'a Node<T>,
    /// Product of the edge transforms along the path from the origin.
    ///
    /// The origin itself is reported with [`Affine::IDENTITY`]. To draw,
    /// compose with the navigator's origin transform:
    /// `origin_transform * transform`.
    pub transform: Affine,
}

impl<T> VisibleNode<'_, T> {
    /// Id of the node.
    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.node.id
    }
}

impl<T> Clone for VisibleNode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VisibleNode<'_, T> {}

/// Breadth-first walk outward from the origin, bounded by a node budget.
///
/// Returned by [`Navigator::visible_nodes`](crate::Navigator::visible_nodes)
/// and [`Navigator::visible_nodes_culled`](crate::Navigator::visible_nodes_culled).
///
/// # Algorithm
///
/// 1. Yield the origin with the identity transform.
/// 2. Pop the oldest pending edge `(parent_transform, edge)` and compute
///    `transform = parent_transform * edge.data`.
/// 3. If the culling predicate returns `true` for
///    `(edge.target, transform, origin_transform)`, drop it: the target is not
///    yielded and nothing beyond it is explored through this path.
/// 4. Otherwise yield the target and queue its outgoing edges.
///
/// Iteration stops after `max_visible_nodes` items or when nothing is pending.
///
/// # Repeats
///
/// Nodes are **not** deduplicated. A node reachable along several paths is
/// yielded once per path, each time with that path's transform. On a cyclic
/// graph this is what produces repeated tiles, and the node budget is what
/// keeps it finite.
///
/// # Cost
///
/// Each step does O(out-degree) work. Pending state is bounded by the node
/// budget times the largest out-degree.
pub struct VisibleNodes<'a, T, G, C = NoCull> {
    graph: &'a Multigraph<T, Affine, G>,
    origin_transform: Affine,
    cull: C,
    remaining: usize,
    origin: Option<&'a Node<T>>,
    pending: VecDeque<(Affine, &'a Edge<Affine>)>,
}

impl<'a, T, G, C> VisibleNodes<'a, T, G, C>
where
    C: FnMut(&NodeId, Affine, Affine) -> bool,
{
    pub(crate) fn new(
        graph: &'a Multigraph<T, Affine, G>,
        origin: Option<&NodeId>,
        origin_transform: Affine,
        max_visible_nodes: usize,
        cull: C,
    ) -> Self {
        Self {
            graph,
            origin_transform,
            cull,
            remaining: max_visible_nodes,
            origin: origin.and_then(|id| graph.node(id)),
            pending: VecDeque::new(),
        }
    }

    fn expand(&mut self, node: &str, transform: Affine) {
        self.pending
            .extend(self.graph.edges_from(node).map(|edge| (transform, edge)));
    }

    fn admit(&mut self, node: &'a Node<T>, transform: Affine) -> VisibleNode<'a, T> {
        self.remaining -= 1;
        // The last admitted node never needs its children.
        if self.remaining > 0 {
            self.expand(&node.id, transform);
        }
        VisibleNode { node, transform }
    }
}

impl<'a, T, G, C> Iterator for VisibleNodes<'a, T, G, C>
where
    C: FnMut(&NodeId, Affine, Affine) -> bool,
{
    type Item = VisibleNode<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if let Some(origin) = self.origin.take() {
            return Some(self.admit(origin, Affine::IDENTITY));
        }
        while let Some((parent, edge)) = self.pending.pop_front() {
            let transform = parent * edge.data;
            if (self.cull)(&edge.target, transform, self.origin_transform) {
                continue;
            }
            let Some(node) = self.graph.node(&edge.target) else {
                continue;
            };
            return Some(self.admit(node, transform));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower = usize::from(self.origin.is_some() && self.remaining > 0);
        (lower, Some(self.remaining))
    }
}

impl<T, G, C> fmt::Debug for VisibleNodes<'_, T, G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibleNodes")
            .field("origin_transform", &self.origin_transform)
            .field("remaining", &self.remaining)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}
