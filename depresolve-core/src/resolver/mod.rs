//! Dependency Resolver
//!
//! This module turns a set of named entities and their declared
//! dependencies into a deterministic activation order, rejecting any graph
//! that contains a cycle.
//!
//! # Overview
//!
//! - [`DependencyResolver`] collects nodes (`add_node`) and dependency edges
//!   (`add_node_dependencies`) in any order. Identifiers named only as
//!   dependencies are created on demand.
//! - [`DependencyResolver::resolve`] walks the graph once and produces a
//!   [`Resolution`]: every entity appears after all of its dependencies, and
//!   entities with no path between them keep their registration order.
//! - Any cycle, including a self-dependency, fails the whole resolution with
//!   [`ResolveError::Cycle`].
//!
//! # Payload gaps
//!
//! A dependency that is named but never registered with a payload still
//! constrains the order and yields `None` in the data ordering. Callers that
//! want this to be an error can query
//! [`DependencyResolver::unresolved_dependency_ids`] or resolve with
//! [`ResolveOptions::strict`].

mod declaration;
mod dependency;
mod error;
mod options;

pub use declaration::DependencyDeclaration;
pub use dependency::{DependencyResolver, Resolution};
pub use error::{ResolveError, ResolveResult};
pub use options::ResolveOptions;
