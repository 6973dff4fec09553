// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breadth-first and depth-first traversal along outgoing edges.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::graph::{Multigraph, Node};
use crate::ids::NodeId;

impl<T, W, G> Multigraph<T, W, G> {
    /// Returns a breadth-first iterator over the nodes reachable from `start`.
    ///
    /// `start` comes first, then nodes in level order. Within a level,
    /// siblings follow [`target_nodes`](Self::target_nodes) order. Each node
    /// is yielded once even when the graph has cycles or parallel edges.
    /// Yields nothing if `start` does not exist.
    pub fn bfs<'a>(&'a self, start: &str) -> Bfs<'a, T, W, G> {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        if let Some((id, _)) = self.nodes_key_value(start) {
            visited.insert(id);
            queue.push_back(id);
        }
        Bfs {
            graph: self,
            queue,
            visited,
        }
    }

    /// Returns a depth-first, pre-order iterator over the nodes reachable
    /// from `start`.
    ///
    /// The first unvisited target of a node is explored fully before its
    /// siblings. Uses an explicit stack, so deep or long cyclic chains do not
    /// risk overflowing the call stack. Yields nothing if `start` does not
    /// exist.
    pub fn dfs<'a>(&'a self, start: &str) -> Dfs<'a, T, W, G> {
        let mut stack = Vec::new();
        if let Some((id, _)) = self.nodes_key_value(start) {
            stack.push(id);
        }
        Dfs {
            graph: self,
            stack,
            visited: HashSet::new(),
        }
    }

    /// Calls `visit` for every node reachable from `start`, breadth first.
    ///
    /// See [`bfs`](Self::bfs) for ordering.
    pub fn breadth_first_traversal(&self, start: &str, mut visit: impl FnMut(&Node<T>)) {
        for node in self.bfs(start) {
            visit(node);
        }
    }

    /// Calls `visit` for every node reachable from `start`, depth first.
    ///
    /// See [`dfs`](Self::dfs) for ordering.
    pub fn depth_first_traversal(&self, start: &str, mut visit: impl FnMut(&Node<T>)) {
        for node in self.dfs(start) {
            visit(node);
        }
    }
}

/// Breadth-first iterator returned by [`Multigraph::bfs`].
#[derive(Debug)]
pub struct Bfs<'a, T, W, G> {
    graph: &'a Multigraph<T, W, G>,
    queue: VecDeque<&'a NodeId>,
    visited: HashSet<&'a NodeId>,
}

impl<'a, T, W, G> Iterator for Bfs<'a, T, W, G> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.queue.pop_front() {
            for target in self.graph.target_nodes(id) {
                if self.visited.insert(target) {
                    self.queue.push_back(target);
                }
            }
            if let Some(node) = self.graph.node(id) {
                return Some(node);
            }
        }
        None
    }
}

/// Depth-first iterator returned by [`Multigraph::dfs`].
#[derive(Debug)]
pub struct Dfs<'a, T, W, G> {
    graph: &'a Multigraph<T, W, G>,
    stack: Vec<&'a NodeId>,
    visited: HashSet<&'a NodeId>,
}

impl<'a, T, W, G> Iterator for Dfs<'a, T, W, G> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if !self.visited.insert(id) {
                continue;
            }
            // Push in reverse so the first target is popped next.
            let mark = self.stack.len();
            self.stack.extend(
                self.graph
                    .target_nodes(id)
                    .filter(|target| !self.visited.contains(*target)),
            );
            self.stack[mark..].reverse();
            if let Some(node) = self.graph.node(id) {
                return Some(node);
            }
        }
        None
    }
}
