// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size, Vec2};
use understory_multigraph::{EdgeId, Multigraph, Node, NodeId, SequentialEdgeIds};

use crate::policy::ReanchorPolicy;
use crate::trace::{Direction, Reanchor, ReanchorTrace};
use crate::visible::{NoCull, VisibleNodes};

/// Node budget used by [`Navigator::new`].
pub const DEFAULT_MAX_VISIBLE_NODES: usize = 1024;

/// Pan/zoom navigation through a graph of affine-linked nodes.
///
/// Each edge's payload maps the target node's local frame into the source
/// node's frame. The navigator keeps one node as the **origin**, drawn
/// through the **origin transform** (the viewport's pan and zoom relative to
/// that node). Everything else is placed relative to the origin by composing
/// edge transforms outward.
///
/// Zooming can move the origin along an edge while rewriting the origin
/// transform so that nothing moves on screen. Moving in while zooming in and
/// out while zooming out keeps the origin transform's scale close to 1 no
/// matter how far the session zooms, and since only the origin pointer and
/// one local transform change, memory stays bounded too.
///
/// The navigator owns its [`Multigraph`]. Edit the graph through
/// [`graph_mut`](Self::graph_mut).
///
/// # Example
///
/// ```
/// use kurbo::{Affine, Point, Size};
/// use understory_multigraph::Multigraph;
/// use understory_reframe::{Navigator, ReanchorFns};
///
/// let mut graph = Multigraph::<&str, Affine>::new();
/// graph.insert_node("outer", "outer");
/// graph.insert_node("inner", "inner");
/// // `inner` sits inside `outer` at a tenth of the size.
/// graph
///     .add_edge_between("outer", "inner", Affine::scale(0.1), None)
///     .unwrap();
///
/// let mut nav = Navigator::with_origin(graph, "outer");
/// let canvas = Size::new(800.0, 600.0);
///
/// // Move into `inner` once it covers at least half its natural area.
/// let mut policy = ReanchorFns::zoom_in(|combined, _canvas, _target| {
///     combined.determinant() >= 0.5
/// });
///
/// let center = Point::new(400.0, 300.0);
/// assert!(!nav.zoom_at_point_with(center, 5.0, canvas, &mut policy));
/// assert!(nav.zoom_at_point_with(center, 2.0, canvas, &mut policy));
/// assert_eq!(nav.origin().unwrap().as_str(), "inner");
/// ```
#[derive(Clone, Debug)]
pub struct Navigator<T, G = SequentialEdgeIds> {
    graph: Multigraph<T, Affine, G>,
    origin: Option<NodeId>,
    origin_transform: Affine,
    max_visible_nodes: usize,
}

impl<T, G> Navigator<T, G> {
    /// Creates a navigator whose origin is the graph's first node.
    ///
    /// The origin is `None` if the graph is empty.
    #[must_use]
    pub fn new(graph: Multigraph<T, Affine, G>) -> Self {
        let origin = graph.first_node().map(|node| node.id.clone());
        Self {
            graph,
            origin,
            origin_transform: Affine::IDENTITY,
            max_visible_nodes: DEFAULT_MAX_VISIBLE_NODES,
        }
    }

    /// Creates a navigator with an explicit origin.
    ///
    /// The id is taken as given; see [`origin_node`](Self::origin_node).
    #[must_use]
    pub fn with_origin(graph: Multigraph<T, Affine, G>, origin: impl Into<NodeId>) -> Self {
        let mut nav = Self::new(graph);
        nav.origin = Some(origin.into());
        nav
    }

    /// Returns the graph.
    #[must_use]
    pub fn graph(&self) -> &Multigraph<T, Affine, G> {
        &self.graph
    }

    /// Returns the graph for editing.
    ///
    /// Removing the origin node does not move the origin; the navigator then
    /// shows nothing until [`reset_view`](Self::reset_view) is called.
    pub fn graph_mut(&mut self) -> &mut Multigraph<T, Affine, G> {
        &mut self.graph
    }

    /// Consumes the navigator, returning the graph.
    #[must_use]
    pub fn into_graph(self) -> Multigraph<T, Affine, G> {
        self.graph
    }

    /// Id of the current origin.
    #[must_use]
    pub fn origin(&self) -> Option<&NodeId> {
        self.origin.as_ref()
    }

    /// The current origin node, or `None` if there is no origin or it is no
    /// longer in the graph.
    #[must_use]
    pub fn origin_node(&self) -> Option<&Node<T>> {
        self.graph.node(self.origin.as_deref()?)
    }

    /// Viewport transform relative to the origin node's local frame.
    #[must_use]
    pub fn origin_transform(&self) -> Affine {
        self.origin_transform
    }

    /// Maximum number of nodes one enumeration yields, origin included.
    #[must_use]
    pub fn max_visible_nodes(&self) -> usize {
        self.max_visible_nodes
    }

    /// Sets the enumeration budget. Values below 1 are raised to 1.
    pub fn set_max_visible_nodes(&mut self, max: usize) {
        self.max_visible_nodes = max.max(1);
    }

    /// Enumerates the origin and the nodes around it.
    ///
    /// See [`VisibleNodes`] for order and bounds.
    pub fn visible_nodes(&self) -> VisibleNodes<'_, T, G, NoCull> {
        let keep_all: NoCull = |_, _, _| false;
        self.visible_nodes_culled(keep_all)
    }

    /// Like [`visible_nodes`](Self::visible_nodes), with a culling predicate.
    ///
    /// `cull(id, transform, origin_transform)` is asked about every node
    /// before it is yielded. `transform` is the node's transform relative to
    /// the origin. Returning `true` skips the node along with everything
    /// reached only through it on that path.
    pub fn visible_nodes_culled<C>(&self, cull: C) -> VisibleNodes<'_, T, G, C>
    where
        C: FnMut(&NodeId, Affine, Affine) -> bool,
    {
        VisibleNodes::new(
            &self.graph,
            self.origin.as_ref(),
            self.origin_transform,
            self.max_visible_nodes,
            cull,
        )
    }

    /// Pans the view by a delta in viewport space. Never moves the origin.
    pub fn pan(&mut self, delta: Vec2) {
        self.origin_transform = Affine::translate(delta) * self.origin_transform;
    }

    /// Zooms by `factor` about `center` in viewport space, without re-anchoring.
    ///
    /// `center` stays fixed on screen.
    pub fn zoom_at_point(&mut self, center: Point, factor: f64) {
        let c = center.to_vec2();
        let zoom = Affine::translate(c) * Affine::scale(factor) * Affine::translate(-c);
        self.origin_transform = zoom * self.origin_transform;
    }

    /// Zooms like [`zoom_at_point`](Self::zoom_at_point), then tries to move
    /// the origin.
    ///
    /// - Zooming out (`factor < 1`): if `policy.should_zoom_out` accepts the
    ///   updated origin transform, the origin moves back through its first
    ///   incoming edge.
    /// - Zooming in (`factor >= 1`): the outgoing edges of the origin are
    ///   tried in order, and the first one whose combined transform
    ///   `policy.should_zoom_in` accepts moves the origin to its target.
    ///
    /// The zoom itself always applies. Returns whether the origin moved.
    pub fn zoom_at_point_with<P>(
        &mut self,
        center: Point,
        factor: f64,
        canvas: Size,
        policy: &mut P,
    ) -> bool
    where
        P: ReanchorPolicy + ?Sized,
    {
        self.zoom_at_point_traced(center, factor, canvas, policy, &mut ())
    }

    /// Like [`zoom_at_point_with`](Self::zoom_at_point_with), reporting a
    /// successful move to `trace`.
    pub fn zoom_at_point_traced<P, R>(
        &mut self,
        center: Point,
        factor: f64,
        canvas: Size,
        policy: &mut P,
        trace: &mut R,
    ) -> bool
    where
        P: ReanchorPolicy + ?Sized,
        R: ReanchorTrace + ?Sized,
    {
        self.zoom_at_point(center, factor);

        let Some(origin) = self.origin.as_deref() else {
            return false;
        };
        let transform = self.origin_transform;

        let (via, direction) = if factor < 1.0 {
            if !policy.should_zoom_out(transform, canvas) {
                return false;
            }
            let Some(edge) = self.graph.edges_to(origin).next() else {
                return false;
            };
            (edge.id.clone(), Direction::Backward)
        } else {
            let Some(edge) = self
                .graph
                .edges_from(origin)
                .find(|edge| policy.should_zoom_in(transform * edge.data, canvas, &edge.target))
            else {
                return false;
            };
            (edge.id.clone(), Direction::Forward)
        };

        self.reanchor(via, direction, trace)
    }

    /// Moves the origin forward along `edge`, from its source to its target.
    ///
    /// The origin transform becomes `origin_transform * edge_transform`, so
    /// the view does not visibly change. Returns `false` and does nothing if
    /// the edge does not exist or does not leave the current origin.
    pub fn shift_origin(&mut self, edge: &str) -> bool {
        let Some(edge) = self.graph.edge(edge) else {
            return false;
        };
        if self.origin.as_deref() != Some(edge.source.as_str()) {
            return false;
        }
        self.origin = Some(edge.target.clone());
        self.origin_transform = self.origin_transform * edge.data;
        true
    }

    /// Moves the origin backward along `edge`, from its target to its source.
    ///
    /// The exact inverse of [`shift_origin`](Self::shift_origin): the origin
    /// transform becomes `origin_transform * edge_transform.inverse()`.
    /// Returns `false` and does nothing if the edge does not exist or does
    /// not enter the current origin. A singular edge transform produces a
    /// non-finite origin transform.
    pub fn unshift_origin(&mut self, edge: &str) -> bool {
        let Some(edge) = self.graph.edge(edge) else {
            return false;
        };
        if self.origin.as_deref() != Some(edge.target.as_str()) {
            return false;
        }
        self.origin = Some(edge.source.clone());
        self.origin_transform = self.origin_transform * edge.data.inverse();
        true
    }

    /// Makes `origin` the origin and clears pan and zoom.
    ///
    /// With `None`, picks the graph's first node, or no origin at all when
    /// the graph is empty.
    pub fn reset_view(&mut self, origin: Option<NodeId>) {
        self.origin = origin.or_else(|| self.graph.first_node().map(|node| node.id.clone()));
        self.origin_transform = Affine::IDENTITY;
    }

    /// Snapshot of the current navigation state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> NavigatorDebugInfo {
        NavigatorDebugInfo {
            origin: self.origin.clone(),
            origin_present: self.origin_node().is_some(),
            origin_transform: self.origin_transform,
            origin_determinant: self.origin_transform.determinant(),
            max_visible_nodes: self.max_visible_nodes,
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
        }
    }

    fn reanchor<R>(&mut self, via: EdgeId, direction: Direction, trace: &mut R) -> bool
    where
        R: ReanchorTrace + ?Sized,
    {
        let Some(from) = self.origin.clone() else {
            return false;
        };
        let moved = match direction {
            Direction::Forward => self.shift_origin(&via),
            Direction::Backward => self.unshift_origin(&via),
        };
        if let (true, Some(to)) = (moved, self.origin.clone()) {
            trace.reanchored(&Reanchor {
                from,
                to,
                via,
                direction,
            });
        }
        moved
    }
}

/// Debug snapshot of a [`Navigator`] state.
#[derive(Clone, Debug)]
pub struct NavigatorDebugInfo {
    /// Current origin id.
    pub origin: Option<NodeId>,
    /// Whether the origin id refers to a node in the graph.
    pub origin_present: bool,
    /// Viewport transform relative to the origin.
    pub origin_transform: Affine,
    /// Determinant of the origin transform: its area scale factor.
    ///
    /// Re-anchoring keeps this near 1 over long zoom sessions.
    pub origin_determinant: f64,
    /// Enumeration budget.
    pub max_visible_nodes: usize,
    /// Nodes in the graph.
    pub nodes: usize,
    /// Edges in the graph.
    pub edges: usize,
}
