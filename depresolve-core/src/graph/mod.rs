//! Graph Walker
//!
//! This module implements a generic depth-first traversal engine over a
//! directed (or undirected) graph of identified nodes carrying opaque
//! payloads.
//!
//! # Overview
//!
//! - Nodes live in a dense arena owned by [`GraphWalker`] and are addressed
//!   by [`NodeIndex`]. Edges are stored as indices, so graphs that are
//!   cyclic in shape never create ownership cycles.
//! - Nodes are created lazily by identifier; asking for an identifier that
//!   already exists returns the existing node. Edges and node registration
//!   can therefore happen in any order.
//! - A walk tracks white/gray/black state per node ([`NodeState`]) and
//!   classifies every edge it examines ([`EdgeKind`]), reporting node-enter,
//!   edge and node-exit events to a [`GraphObserver`].
//!
//! # Design Decisions
//!
//! 1. The walker encodes no policy. Cycles are reported, never rejected, so
//!    the same engine serves graphs that legitimately contain cycles.
//!
//! 2. Neighbors are visited in insertion order, which makes every walk
//!    reproducible from the order of registration alone.
//!
//! 3. Observers return `Result`, so a policy like "cycles are fatal" is just
//!    an observer that returns `Err` on a back edge.

mod node;
mod walker;

pub use node::{Node, NodeIndex, NodeState};
pub use walker::{EdgeKind, GraphObserver, GraphWalker};
