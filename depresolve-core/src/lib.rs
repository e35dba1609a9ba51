//! depresolve Core
//!
//! This crate provides deterministic dependency ordering for a host that
//! activates, builds or installs named entities one after another.
//! It implements:
//!
//! - A generic depth-first graph walker with edge classification
//! - A dependency resolver producing a post-order with cycle rejection
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `graph`: node arena, traversal state and the observer-driven walker
//! - `resolver`: the domain API, its error type and configuration
//!
//! The resolver is synchronous and single-threaded. Building the graph and
//! resolving it both need `&mut` or ownership, so sharing one across threads
//! requires the caller's own synchronization.
//!
//! # Example
//!
//! ```rust
//! use depresolve_core::resolver::{DependencyResolver, ResolveError};
//!
//! let mut resolver = DependencyResolver::new();
//! resolver.add_node("a", 1);
//! resolver.add_node("b", 2);
//! resolver.add_node("c", 3);
//! resolver.add_node_dependencies("a", ["b"]);
//! resolver.add_node_dependencies("b", ["c"]);
//!
//! let resolution = resolver.resolve()?;
//! assert_eq!(resolution.data_ordering(), vec![Some(&3), Some(&2), Some(&1)]);
//! # Ok::<(), ResolveError<&str>>(())
//! ```

pub mod graph;
pub mod resolver;

pub use graph::{EdgeKind, GraphObserver, GraphWalker, Node, NodeIndex, NodeState};
pub use resolver::{
    DependencyDeclaration, DependencyResolver, Resolution, ResolveError, ResolveOptions,
    ResolveResult,
};
