// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability hooks for re-anchoring.
//!
//! The navigator does not remember how it got to its current origin. When
//! that history matters (debug overlays, breadcrumb UIs, tests), pass a
//! [`ReanchorTrace`] sink to
//! [`Navigator::zoom_at_point_traced`](crate::Navigator::zoom_at_point_traced).
//! [`ReanchorLog`] is a minimal recorder.

use alloc::vec::Vec;

use understory_multigraph::{EdgeId, NodeId};

/// Which way the origin moved along an edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Zooming in: the origin moved from an edge's source to its target.
    Forward,
    /// Zooming out: the origin moved from an edge's target to its source.
    Backward,
}

/// One change of origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reanchor {
    /// Origin before the shift.
    pub from: NodeId,
    /// Origin after the shift.
    pub to: NodeId,
    /// Edge the shift went through.
    pub via: EdgeId,
    /// Direction of travel along `via`.
    pub direction: Direction,
}

/// A callback sink for re-anchoring events.
pub trait ReanchorTrace {
    /// Called after the origin has moved.
    fn reanchored(&mut self, event: &Reanchor);
}

impl ReanchorTrace for () {
    fn reanchored(&mut self, _event: &Reanchor) {}
}

/// Records every re-anchoring event in order.
#[derive(Clone, Debug, Default)]
pub struct ReanchorLog {
    events: Vec<Reanchor>,
}

impl ReanchorLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Reanchor] {
        &self.events
    }

    /// Most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Reanchor> {
        self.events.last()
    }

    /// Forward shifts minus backward shifts.
    ///
    /// On a tree-shaped graph this is how many levels below the starting
    /// origin the navigator now sits.
    #[must_use]
    pub fn net_depth(&self) -> i64 {
        self.events.iter().fold(0, |depth, event| match event.direction {
            Direction::Forward => depth + 1,
            Direction::Backward => depth - 1,
        })
    }

    /// Drops all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ReanchorTrace for ReanchorLog {
    fn reanchored(&mut self, event: &Reanchor) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(from: &str, to: &str, direction: Direction) -> Reanchor {
        Reanchor {
            from: from.into(),
            to: to.into(),
            via: "e".into(),
            direction,
        }
    }

    #[test]
    fn log_tracks_net_depth() {
        let mut log = ReanchorLog::new();
        assert_eq!(log.net_depth(), 0);
        assert!(log.last().is_none());

        log.reanchored(&event("a", "b", Direction::Forward));
        log.reanchored(&event("b", "c", Direction::Forward));
        log.reanchored(&event("c", "b", Direction::Backward));
        assert_eq!(log.events().len(), 3);
        assert_eq!(log.net_depth(), 1);
        assert_eq!(log.last().unwrap().to.as_str(), "b");

        log.clear();
        assert!(log.events().is_empty());
    }
}
