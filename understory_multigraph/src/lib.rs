// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Multigraph: a directed multigraph with symmetric adjacency indices.
//!
//! This crate provides [`Multigraph`], a small store of nodes and directed
//! edges keyed by opaque string ids. It is the graph layer under
//! `understory_reframe`, but has no opinion about what nodes or edges carry.
//!
//! - **Multi-edges**: any number of edges may connect the same ordered pair
//!   of nodes, each with its own [`EdgeId`] and payload.
//! - **Bidirectional indices**: outgoing (`source -> target -> edges`) and
//!   incoming (`target -> source -> edges`) indices are kept exactly
//!   symmetric, and anything that becomes empty is pruned immediately.
//! - **Deterministic order**: neighbors and parallel edges enumerate in the
//!   order they were added, so traversals are reproducible.
//! - **Traversals**: breadth-first ([`Multigraph::bfs`]) and depth-first
//!   ([`Multigraph::dfs`]) iterators along outgoing edges, each visiting every
//!   reachable node once even on cyclic graphs.
//! - **Pluggable ids**: generated edge ids come from an [`EdgeIdSource`];
//!   the default [`SequentialEdgeIds`] is a deterministic counter.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_multigraph::{Edge, Multigraph};
//!
//! let mut graph = Multigraph::<(), &str>::new();
//! for id in ["a", "b", "c", "d"] {
//!     graph.insert_node(id, ());
//! }
//! graph.add_edge(Edge::new("ab", "a", "b", "first")).unwrap();
//! graph.add_edge(Edge::new("ac", "a", "c", "second")).unwrap();
//! graph.add_edge_between("b", "d", "generated id", None).unwrap();
//!
//! let order: Vec<&str> = graph.bfs("a").map(|node| node.id.as_str()).collect();
//! assert_eq!(order, ["a", "b", "c", "d"]);
//!
//! // Missing ids are ordinary outcomes, not panics.
//! assert!(graph.node("zzz").is_none());
//! assert!(graph.remove_edge("zzz").is_none());
//! ```
//!
//! ## Overwrite vs. reject
//!
//! [`Multigraph::add_node`] and [`Multigraph::add_edge`] replace an existing
//! entry with the same id; a replaced edge is unindexed from its old
//! endpoints first. Use [`Multigraph::try_add_node`] and
//! [`Multigraph::try_add_edge`] to reject collisions with
//! [`DuplicateNodeError`] / [`EdgeInsertError`] instead.
//!
//! ## Threading
//!
//! The graph is a plain single-owner value. Because the two indices
//! reference each other, a host that shares one across threads should guard
//! the whole graph with one lock rather than locking parts of it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod graph;
mod ids;
mod traverse;

pub use error::{DuplicateNodeError, EdgeInsertError};
pub use graph::{Edge, Multigraph, MultigraphDebugInfo, Node};
pub use ids::{EdgeId, EdgeIdSource, NodeId, SequentialEdgeIds};
pub use traverse::{Bfs, Dfs};
