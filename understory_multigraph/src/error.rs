// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by the rejecting insertion variants.
//!
//! The default insertion methods overwrite on id collision and signal missing
//! endpoints with `None`. These types back the `try_*` methods for callers
//! that prefer explicit rejection.

use core::fmt;

use crate::ids::{EdgeId, NodeId};

/// Error returned by [`Multigraph::try_add_node`](crate::Multigraph::try_add_node)
/// when a node with the same id already exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateNodeError {
    /// The id that is already in use.
    pub id: NodeId,
}

impl fmt::Display for DuplicateNodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {:?} already exists", self.id.as_str())
    }
}

impl core::error::Error for DuplicateNodeError {}

/// Error returned by [`Multigraph::try_add_edge`](crate::Multigraph::try_add_edge).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeInsertError {
    /// The edge's source node is not in the graph.
    MissingSource(NodeId),
    /// The edge's target node is not in the graph.
    MissingTarget(NodeId),
    /// An edge with the same id already exists.
    DuplicateId(EdgeId),
}

impl fmt::Display for EdgeInsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource(id) => write!(f, "source node {:?} does not exist", id.as_str()),
            Self::MissingTarget(id) => write!(f, "target node {:?} does not exist", id.as_str()),
            Self::DuplicateId(id) => write!(f, "edge {:?} already exists", id.as_str()),
        }
    }
}

impl core::error::Error for EdgeInsertError {}
