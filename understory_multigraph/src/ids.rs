// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node and edge identifiers, and pluggable edge-id generation.

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use core::borrow::Borrow;
use core::fmt;
use core::ops::Deref;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Creates an identifier from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            #[inline]
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.into())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id.into())
            }
        }

        impl From<Arc<str>> for $name {
            fn from(id: Arc<str>) -> Self {
                Self(id)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), &*self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Identifier of a node in a [`Multigraph`](crate::Multigraph).
    ///
    /// Ids are opaque strings. Cloning is cheap (a reference count bump), and
    /// the id hashes and compares exactly like its string contents, so every
    /// lookup on the graph accepts a plain `&str`.
    NodeId
}

string_id! {
    /// Identifier of an edge in a [`Multigraph`](crate::Multigraph).
    ///
    /// See [`NodeId`] for the representation; the two types are kept distinct
    /// so the stores cannot be mixed up.
    EdgeId
}

/// Source of fresh edge ids for [`Multigraph::add_edge_between`](crate::Multigraph::add_edge_between).
///
/// The graph skips ids that are already in use, so sources need not know
/// about the graph's contents. It only asks a bounded number of times: a
/// source that keeps repeating a taken id ends up replacing that edge.
pub trait EdgeIdSource {
    /// Produces the next candidate id.
    fn next_edge_id(&mut self) -> EdgeId;
}

impl<F> EdgeIdSource for F
where
    F: FnMut() -> EdgeId,
{
    fn next_edge_id(&mut self) -> EdgeId {
        self()
    }
}

/// Monotonic counter producing `"{prefix}{n}"` ids.
///
/// This is the default id source. It is deterministic, which keeps
/// generated ids stable across runs and in tests.
#[derive(Clone, Debug)]
pub struct SequentialEdgeIds {
    prefix: Arc<str>,
    next: u64,
}

impl SequentialEdgeIds {
    /// Prefix used by [`Default`].
    pub const DEFAULT_PREFIX: &'static str = "edge-";

    /// Creates a counter starting at zero with the given prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<Arc<str>>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Returns the numeric suffix the next id will carry.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for SequentialEdgeIds {
    fn default() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }
}

impl EdgeIdSource for SequentialEdgeIds {
    fn next_edge_id(&mut self) -> EdgeId {
        let n = self.next;
        self.next = self.next.wrapping_add(1);
        EdgeId::from(format!("{}{n}", self.prefix))
    }
}
