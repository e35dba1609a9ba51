//! Dependency Resolver
//!
//! Builds a graph of named entities on top of the [`GraphWalker`] and turns
//! it into a linear activation order in which every entity comes after all
//! of its dependencies.
//!
//! # Algorithm
//!
//! The order is the post-order of a depth-first walk along dependency edges.
//! An entity cannot finish until each of its dependencies has finished,
//! either because the walk descended into it (tree edge) or because it was
//! already finished via another path (forward or cross edge). Either way the
//! dependency's exit comes first. A back edge means a cycle, and the whole
//! resolution fails.
//!
//! Roots are walked in the order they were registered with
//! [`DependencyResolver::add_node`], which is what breaks ties between
//! entities that have no path between them.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use super::declaration::DependencyDeclaration;
use super::error::{ResolveError, ResolveResult};
use super::options::ResolveOptions;
use crate::graph::{EdgeKind, GraphObserver, GraphWalker, Node, NodeIndex};

/// Collects a dependency order for a set of named entities.
///
/// `resolve` consumes the resolver, so a graph is resolved exactly once and
/// the ordering can only be read from the returned [`Resolution`].
///
/// # Example
///
/// ```
/// use depresolve_core::resolver::DependencyResolver;
///
/// let mut resolver = DependencyResolver::new();
/// resolver.add_node("web", "web server");
/// resolver.add_node("db", "database");
/// resolver.add_node("cache", "cache");
/// resolver.add_node_dependencies("web", ["db", "cache"]);
/// resolver.add_node_dependencies("cache", ["db"]);
///
/// let resolution = resolver.resolve().unwrap();
/// assert_eq!(resolution.id_ordering(), vec![&"db", &"cache", &"web"]);
/// ```
#[derive(Debug, Clone)]
pub struct DependencyResolver<I, T> {
    /// Owns every node the resolver has created.
    walker: GraphWalker<I, T>,

    /// Nodes registered through `add_node`, in first-registration order.
    roots: IndexSet<NodeIndex>,

    options: ResolveOptions,
}

impl<I, T> DependencyResolver<I, T>
where
    I: Clone + Eq + Hash,
{
    /// Create an empty, lenient resolver.
    pub fn new() -> Self {
        Self::with_options(ResolveOptions::default())
    }

    /// Create an empty resolver with the given options.
    pub fn with_options(options: ResolveOptions) -> Self {
        Self {
            walker: GraphWalker::new(),
            roots: IndexSet::new(),
            options,
        }
    }

    /// Build a resolver from declarations, in order.
    pub fn from_declarations(
        declarations: impl IntoIterator<Item = DependencyDeclaration<I, T>>,
    ) -> Self {
        let mut resolver = Self::new();
        resolver.extend(declarations);
        resolver
    }

    /// Get the options this resolver was created with.
    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Register `id` with its payload.
    ///
    /// The node is created if it does not exist yet. An existing node keeps
    /// its edges and its position in the registration order; only its
    /// payload is replaced. Returns the replaced payload, if any.
    pub fn add_node(&mut self, id: I, data: T) -> Option<T> {
        let index = self.walker.get_or_create_node(id);
        self.roots.insert(index);
        self.walker.node_mut(index).set_data(data)
    }

    /// Declare that `id` depends on each of `dependencies`, in order.
    ///
    /// Any node not seen before is created without a payload. Declaring the
    /// same dependency twice has no further effect.
    pub fn add_node_dependencies(&mut self, id: I, dependencies: impl IntoIterator<Item = I>) {
        let from = self.walker.get_or_create_node(id);
        for dependency in dependencies {
            let to = self.walker.get_or_create_node(dependency);
            self.walker.add_edge(from, to);
        }
    }

    /// Register a declaration: its payload first, then its dependencies.
    pub fn add_declaration(&mut self, declaration: DependencyDeclaration<I, T>) {
        let DependencyDeclaration {
            id,
            data,
            depends_on,
        } = declaration;
        self.add_node(id.clone(), data);
        self.add_node_dependencies(id, depends_on);
    }

    /// Get the number of distinct identifiers seen so far.
    pub fn len(&self) -> usize {
        self.walker.len()
    }

    /// Check whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.walker.is_empty()
    }

    /// Check whether `id` has been referenced in any way.
    pub fn contains(&self, id: &I) -> bool {
        self.walker.find_node(id).is_some()
    }

    /// Get the direct dependencies of `id` in declaration order.
    pub fn dependencies_of(&self, id: &I) -> Option<Vec<&I>> {
        let index = self.walker.find_node(id)?;
        let dependencies = self
            .walker
            .node(index)
            .neighbors()
            .iter()
            .map(|&neighbor| self.walker.node(neighbor).id())
            .collect();
        Some(dependencies)
    }

    /// Get the identifiers that were referenced but never given a payload,
    /// in the order they were first referenced.
    ///
    /// In lenient mode these still take part in the ordering and show up as
    /// `None` in [`Resolution::data_ordering`].
    pub fn unresolved_dependency_ids(&self) -> Vec<&I> {
        self.walker
            .nodes()
            .filter(|(_, node)| !node.has_data())
            .map(|(_, node)| node.id())
            .collect()
    }

    /// Compute the dependency order.
    ///
    /// Roots are walked in registration order, then any node still unvisited
    /// (a dependent that was only ever named in
    /// [`add_node_dependencies`](Self::add_node_dependencies)) in creation
    /// order, so every referenced identifier appears exactly once.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Cycle`] for the first back edge found, naming its
    ///   two endpoints. No partial ordering is kept.
    /// - [`ResolveError::UnresolvedDependencies`] in strict mode, if any
    ///   node lacks a payload.
    pub fn resolve(mut self) -> ResolveResult<Resolution<I, T>, I>
    where
        I: fmt::Debug,
    {
        debug!(
            nodes = self.walker.len(),
            roots = self.roots.len(),
            strict = self.options.require_payloads,
            "resolving dependency order"
        );

        let unresolved = self.unresolved_dependency_ids();
        if !unresolved.is_empty() {
            if self.options.require_payloads {
                warn!(?unresolved, "rejecting dependencies without a registered payload");
                let ids = unresolved.into_iter().cloned().collect();
                return Err(ResolveError::unresolved(ids));
            }
            debug!(?unresolved, "ordering dependencies without a registered payload");
        }

        let mut collector = OrderCollector::with_capacity(self.walker.len());
        for &root in &self.roots {
            self.walker.walk_node(root, &mut collector)?;
        }
        self.walker.walk_all(&mut collector)?;

        debug!(ordered = collector.order.len(), "dependency order resolved");

        Ok(Resolution {
            walker: self.walker,
            order: collector.order,
        })
    }
}

impl<I, T> Default for DependencyResolver<I, T>
where
    I: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T> Extend<DependencyDeclaration<I, T>> for DependencyResolver<I, T>
where
    I: Clone + Eq + Hash,
{
    fn extend<D: IntoIterator<Item = DependencyDeclaration<I, T>>>(&mut self, declarations: D) {
        for declaration in declarations {
            self.add_declaration(declaration);
        }
    }
}

impl<I, T> FromIterator<DependencyDeclaration<I, T>> for DependencyResolver<I, T>
where
    I: Clone + Eq + Hash,
{
    fn from_iter<D: IntoIterator<Item = DependencyDeclaration<I, T>>>(declarations: D) -> Self {
        Self::from_declarations(declarations)
    }
}

/// Records the post-order and rejects back edges.
struct OrderCollector {
    order: Vec<NodeIndex>,
}

impl OrderCollector {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
        }
    }
}

impl<I, T> GraphObserver<I, T> for OrderCollector
where
    I: Clone + fmt::Debug,
{
    type Error = ResolveError<I>;

    fn edge(
        &mut self,
        from: &Node<I, T>,
        to: &Node<I, T>,
        kind: EdgeKind,
    ) -> Result<(), Self::Error> {
        trace!(from = ?from.id(), to = ?to.id(), %kind, "dependency edge");

        if kind.is_back() {
            warn!(from = ?from.id(), to = ?to.id(), "dependency cycle detected");
            return Err(ResolveError::cycle(from.id().clone(), to.id().clone()));
        }
        Ok(())
    }

    fn after_node(&mut self, index: NodeIndex, node: &Node<I, T>) -> Result<(), Self::Error> {
        trace!(id = ?node.id(), position = self.order.len(), "dependency ordered");
        self.order.push(index);
        Ok(())
    }
}

/// A successfully resolved dependency order.
///
/// Dependencies always come before their dependents.
#[derive(Debug, Clone)]
pub struct Resolution<I, T> {
    walker: GraphWalker<I, T>,
    order: Vec<NodeIndex>,
}

impl<I, T> Resolution<I, T> {
    /// Get the nodes in dependency order.
    pub fn node_ordering(&self) -> impl ExactSizeIterator<Item = &Node<I, T>> + '_ {
        self.order.iter().map(move |&index| self.walker.node(index))
    }

    /// Get the identifiers in dependency order.
    pub fn id_ordering(&self) -> Vec<&I> {
        self.node_ordering().map(Node::id).collect()
    }

    /// Get the payloads in dependency order.
    ///
    /// Dependencies that were never registered with a payload yield `None`.
    pub fn data_ordering(&self) -> Vec<Option<&T>> {
        self.node_ordering().map(Node::data).collect()
    }

    /// Take the payloads out in dependency order.
    pub fn into_data_ordering(self) -> Vec<Option<T>> {
        let mut walker = self.walker;
        self.order
            .iter()
            .map(|&index| walker.node_mut(index).take_data())
            .collect()
    }

    /// Get the number of ordered nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether the ordering is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<I, T> Resolution<I, T>
where
    I: Clone + Eq + Hash,
{
    /// Get the position of `id` in the ordering.
    pub fn position(&self, id: &I) -> Option<usize> {
        let index = self.walker.find_node(id)?;
        self.order.iter().position(|&ordered| ordered == index)
    }
}
