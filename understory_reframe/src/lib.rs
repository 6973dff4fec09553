// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Reframe: unbounded pan and zoom through a graph of reference frames.
//!
//! A single floating-point viewport transform loses precision after enough
//! zooming. This crate avoids that by storing content as a graph of nodes
//! linked by affine transforms ([`kurbo::Affine`] edges in an
//! [`understory_multigraph::Multigraph`]) and drawing everything relative to
//! one **origin** node. As the user zooms, the [`Navigator`] moves the origin
//! along edges and rewrites its local transform so the picture stays put.
//! Both the transform's scale and the navigator's state stay bounded.
//!
//! - **Edges**: an edge `source -> target` carries the transform from the
//!   target's local frame into the source's frame.
//! - **Enumeration**: [`Navigator::visible_nodes`] walks outward from the
//!   origin breadth-first, composing edge transforms, capped by a node budget
//!   so cycles (self-similar scenes) stay finite.
//! - **Re-anchoring**: [`Navigator::zoom_at_point_with`] asks a
//!   [`ReanchorPolicy`] whether to move the origin; [`ReanchorFns`] builds one
//!   from closures. [`Navigator::shift_origin`] and
//!   [`Navigator::unshift_origin`] do the move directly.
//! - **Explainability**: [`ReanchorTrace`] sinks such as [`ReanchorLog`]
//!   observe each change of origin, and [`Navigator::debug_info`] reports a
//!   snapshot of the navigation state.
//!
//! It does **not** render or decide what is on screen. Callers supply the
//! culling predicate and the re-anchoring policy, usually by testing each
//! node's transformed bounds against the canvas.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Vec2};
//! use understory_multigraph::Multigraph;
//! use understory_reframe::Navigator;
//!
//! // A frame that contains a half-size copy of itself.
//! let mut graph = Multigraph::<&str, Affine>::new();
//! graph.insert_node("frame", "picture");
//! graph
//!     .add_edge_between("frame", "frame", Affine::scale(0.5), None)
//!     .unwrap();
//!
//! let mut nav = Navigator::new(graph);
//! nav.set_max_visible_nodes(4);
//! nav.pan(Vec2::new(10.0, 0.0));
//!
//! let scales: Vec<f64> = nav
//!     .visible_nodes()
//!     .map(|visible| visible.transform.as_coeffs()[0])
//!     .collect();
//! assert_eq!(scales, [1.0, 0.5, 0.25, 0.125]);
//!
//! // Draw each one with `nav.origin_transform() * visible.transform`.
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwarded to `kurbo` and `understory_multigraph`.
//! - `libm`: `no_std` math for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod navigator;
mod policy;
mod trace;
mod visible;

pub use navigator::{DEFAULT_MAX_VISIBLE_NODES, Navigator, NavigatorDebugInfo};
pub use policy::{NeverZoomIn, NeverZoomOut, ReanchorFns, ReanchorPolicy};
pub use trace::{Direction, Reanchor, ReanchorLog, ReanchorTrace};
pub use visible::{NoCull, VisibleNode, VisibleNodes};
