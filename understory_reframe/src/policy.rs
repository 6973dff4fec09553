// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Re-anchoring predicates supplied by the input layer.

use core::fmt;

use kurbo::{Affine, Size};
use understory_multigraph::NodeId;

/// Decides when a zoom gesture should move the origin.
///
/// Both methods default to `false`, so implementing only one of them gives
/// one-directional re-anchoring. Typical implementations test whether a
/// node's transformed bounds cover the canvas.
///
/// The unit type `()` never re-anchors.
pub trait ReanchorPolicy {
    /// Called while zooming in, once per outgoing edge of the origin.
    ///
    /// `combined` is `origin_transform * edge_transform`: where `target`
    /// would be drawn relative to the viewport. Returning `true` makes
    /// `target` the new origin.
    fn should_zoom_in(&mut self, combined: Affine, canvas: Size, target: &NodeId) -> bool {
        let _ = (combined, canvas, target);
        false
    }

    /// Called while zooming out, with the already-updated origin transform.
    ///
    /// Returning `true` moves the origin back to the source of its first
    /// incoming edge.
    fn should_zoom_out(&mut self, origin_transform: Affine, canvas: Size) -> bool {
        let _ = (origin_transform, canvas);
        false
    }
}

impl ReanchorPolicy for () {}

impl<P: ReanchorPolicy + ?Sized> ReanchorPolicy for &mut P {
    fn should_zoom_in(&mut self, combined: Affine, canvas: Size, target: &NodeId) -> bool {
        (**self).should_zoom_in(combined, canvas, target)
    }

    fn should_zoom_out(&mut self, origin_transform: Affine, canvas: Size) -> bool {
        (**self).should_zoom_out(origin_transform, canvas)
    }
}

/// Zoom-in predicate that always declines.
pub type NeverZoomIn = fn(Affine, Size, &NodeId) -> bool;

/// Zoom-out predicate that always declines.
pub type NeverZoomOut = fn(Affine, Size) -> bool;

/// [`ReanchorPolicy`] built from closures.
///
/// ```
/// use kurbo::{Affine, Size};
/// use understory_reframe::{ReanchorFns, ReanchorPolicy};
///
/// // Re-anchor inward once a child is drawn at least twice its natural size.
/// let mut policy = ReanchorFns::zoom_in(|combined, _canvas, _target| {
///     combined.determinant().abs() >= 4.0
/// });
/// assert!(policy.should_zoom_in(Affine::scale(2.0), Size::new(10.0, 10.0), &"b".into()));
/// assert!(!policy.should_zoom_out(Affine::IDENTITY, Size::new(10.0, 10.0)));
/// ```
pub struct ReanchorFns<I, O> {
    zoom_in: I,
    zoom_out: O,
}

impl<I, O> ReanchorFns<I, O>
where
    I: FnMut(Affine, Size, &NodeId) -> bool,
    O: FnMut(Affine, Size) -> bool,
{
    /// Uses both predicates.
    pub fn new(zoom_in: I, zoom_out: O) -> Self {
        Self { zoom_in, zoom_out }
    }
}

impl<I> ReanchorFns<I, NeverZoomOut>
where
    I: FnMut(Affine, Size, &NodeId) -> bool,
{
    /// Only re-anchors while zooming in.
    pub fn zoom_in(zoom_in: I) -> Self {
        Self {
            zoom_in,
            zoom_out: |_, _| false,
        }
    }
}

impl<O> ReanchorFns<NeverZoomIn, O>
where
    O: FnMut(Affine, Size) -> bool,
{
    /// Only re-anchors while zooming out.
    pub fn zoom_out(zoom_out: O) -> Self {
        Self {
            zoom_in: |_, _, _| false,
            zoom_out,
        }
    }
}

impl<I, O> ReanchorPolicy for ReanchorFns<I, O>
where
    I: FnMut(Affine, Size, &NodeId) -> bool,
    O: FnMut(Affine, Size) -> bool,
{
    fn should_zoom_in(&mut self, combined: Affine, canvas: Size, target: &NodeId) -> bool {
        (self.zoom_in)(combined, canvas, target)
    }

    fn should_zoom_out(&mut self, origin_transform: Affine, canvas: Size) -> bool {
        (self.zoom_out)(origin_transform, canvas)
    }
}

impl<I, O> fmt::Debug for ReanchorFns<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReanchorFns").finish_non_exhaustive()
    }
}
