//! Graph Walker
//!
//! Depth-first traversal over the node arena, reporting structural events to
//! an observer.
//!
//! # Algorithm
//!
//! Every node starts out undiscovered. When the walk enters a node it is
//! marked discovered and stamped with the traversal clock; once all of its
//! neighbors have been handled it is marked finished and stamped again.
//! Each edge out of the current node is classified by the state of its
//! target at the moment it is examined:
//!
//! | Target state  | Directed                         | Undirected            |
//! |---------------|----------------------------------|-----------------------|
//! | Undiscovered  | Tree (descend)                   | Tree (descend)        |
//! | Discovered    | Back                             | Back, unless parent   |
//! | Finished      | Forward or Cross (by entry time) | skipped               |
//!
//! The walker takes no position on what a back edge means. Observers decide
//! whether a cycle is fatal.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::node::{Node, NodeIndex};

/// Classification of an edge relative to the current traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// The target was undiscovered; the walk descends into it.
    Tree,

    /// The target is an ancestor still on the active path. This is a cycle.
    Back,

    /// The target is a finished descendant of the source.
    Forward,

    /// The target was finished in an earlier, unrelated branch.
    Cross,
}

impl EdgeKind {
    /// Check whether this is a tree edge.
    pub fn is_tree(&self) -> bool {
        *self == EdgeKind::Tree
    }

    /// Check whether this edge closes a cycle.
    pub fn is_back(&self) -> bool {
        *self == EdgeKind::Back
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeKind::Tree => "tree",
            EdgeKind::Back => "back",
            EdgeKind::Forward => "forward",
            EdgeKind::Cross => "cross",
        };
        f.write_str(name)
    }
}

/// Receives traversal events from a [`GraphWalker`].
///
/// Every hook defaults to doing nothing. Returning an error from any hook
/// aborts the walk and the error is handed back to the caller of
/// [`GraphWalker::walk_node`] unchanged.
pub trait GraphObserver<I, T> {
    /// Error type used to abort a walk.
    type Error;

    /// Called when a node is entered, after it has been marked discovered.
    fn before_node(&mut self, _index: NodeIndex, _node: &Node<I, T>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each classified edge. Tree edges are reported before the
    /// walk descends into the target.
    fn edge(
        &mut self,
        _from: &Node<I, T>,
        _to: &Node<I, T>,
        _kind: EdgeKind,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when a node is left, after it has been marked finished.
    fn after_node(&mut self, _index: NodeIndex, _node: &Node<I, T>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Arena of identified nodes plus a depth-first traversal engine.
///
/// # Example
///
/// ```
/// use depresolve_core::graph::{EdgeKind, GraphObserver, GraphWalker, Node};
///
/// struct BackEdges(usize);
///
/// impl GraphObserver<&'static str, ()> for BackEdges {
///     type Error = std::convert::Infallible;
///
///     fn edge(
///         &mut self,
///         _from: &Node<&'static str, ()>,
///         _to: &Node<&'static str, ()>,
///         kind: EdgeKind,
///     ) -> Result<(), Self::Error> {
///         if kind.is_back() {
///             self.0 += 1;
///         }
///         Ok(())
///     }
/// }
///
/// let mut walker: GraphWalker<&str, ()> = GraphWalker::new();
/// let a = walker.get_or_create_node("a");
/// let b = walker.get_or_create_node("b");
/// walker.add_edge(a, b);
/// walker.add_edge(b, a);
///
/// let mut observer = BackEdges(0);
/// walker.walk_all(&mut observer).unwrap();
/// assert_eq!(observer.0, 1);
/// ```
#[derive(Debug, Clone)]
pub struct GraphWalker<I, T> {
    /// All nodes, in creation order.
    nodes: Vec<Node<I, T>>,

    /// Identifier to arena position.
    lookup: HashMap<I, NodeIndex>,

    /// Whether edges are one-way.
    directed: bool,

    /// Traversal clock, advanced on every enter and exit.
    time: usize,
}

impl<I, T> GraphWalker<I, T>
where
    I: Clone + Eq + Hash,
{
    /// Create an empty directed walker.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            lookup: HashMap::new(),
            directed: true,
            time: 0,
        }
    }

    /// Get the node for `id`, creating an undiscovered one without payload
    /// if it does not exist yet.
    pub fn get_or_create_node(&mut self, id: I) -> NodeIndex {
        if let Some(&index) = self.lookup.get(&id) {
            return index;
        }

        let index = NodeIndex::new(self.nodes.len());
        self.lookup.insert(id.clone(), index);
        self.nodes.push(Node::new(id));
        index
    }

    /// Look up an existing node by identifier.
    pub fn find_node(&self, id: &I) -> Option<NodeIndex> {
        self.lookup.get(id).copied()
    }
}

impl<I, T> GraphWalker<I, T> {
    /// Get a node.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not handed out by this walker.
    pub fn node(&self, index: NodeIndex) -> &Node<I, T> {
        &self.nodes[index.index()]
    }

    /// Get a node mutably, e.g. to attach a payload.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not handed out by this walker.
    pub fn node_mut(&mut self, index: NodeIndex) -> &mut Node<I, T> {
        &mut self.nodes[index.index()]
    }

    /// Iterate over all nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node<I, T>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex::new(i), node))
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the walker holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add an edge `from -> to`. Adding the same edge twice is a no-op.
    ///
    /// Returns true if the edge was new.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) -> bool {
        self.nodes[from.index()].add_neighbor(to)
    }

    /// Configure whether edges are treated as one-way.
    ///
    /// In an undirected walker the caller is expected to add both directions
    /// of every edge; the walk then skips the edge leading back to a node's
    /// tree parent and never reports forward or cross edges.
    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    /// Check whether edges are treated as one-way.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Return every node to the undiscovered state so the graph can be walked
    /// again. Edges and payloads are kept.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
        self.time = 0;
    }

    /// Walk every node in creation order, starting a new depth-first tree at
    /// each node that an earlier tree did not reach.
    pub fn walk_all<O>(&mut self, observer: &mut O) -> Result<(), O::Error>
    where
        O: GraphObserver<I, T> + ?Sized,
    {
        for i in 0..self.nodes.len() {
            self.walk_node(NodeIndex::new(i), observer)?;
        }
        Ok(())
    }

    /// Walk depth-first from `start`.
    ///
    /// Does nothing if `start` has already been discovered. Neighbors are
    /// visited in the order their edges were added, so the event sequence is
    /// fully determined by the order of registration.
    ///
    /// The walk keeps an explicit stack, so deep dependency chains cannot
    /// overflow the call stack.
    ///
    /// # Panics
    ///
    /// Panics if `start` was not handed out by this walker.
    pub fn walk_node<O>(&mut self, start: NodeIndex, observer: &mut O) -> Result<(), O::Error>
    where
        O: GraphObserver<I, T> + ?Sized,
    {
        if self.nodes[start.index()].is_discovered() {
            return Ok(());
        }

        tracing::trace!(start = %start, directed = self.directed, "walking from node");

        // Each frame is a node on the active path and the position of the
        // next neighbor to examine.
        let mut stack: Vec<(NodeIndex, usize)> = Vec::new();
        self.enter(start, observer)?;
        stack.push((start, 0));

        while let Some(&(current, cursor)) = stack.last() {
            let Some(next) = self.nodes[current.index()].neighbors().get(cursor).copied() else {
                stack.pop();
                self.exit(current, observer)?;
                continue;
            };

            if let Some(frame) = stack.last_mut() {
                frame.1 += 1;
            }

            let Some(kind) = self.classify(current, next) else {
                continue;
            };

            if kind.is_tree() {
                self.nodes[next.index()].set_parent(current);
            }

            observer.edge(&self.nodes[current.index()], &self.nodes[next.index()], kind)?;

            if kind.is_tree() {
                self.enter(next, observer)?;
                stack.push((next, 0));
            }
        }

        Ok(())
    }

    /// Classify `from -> to`, or `None` if the edge is not reported.
    fn classify(&self, from: NodeIndex, to: NodeIndex) -> Option<EdgeKind> {
        let source = &self.nodes[from.index()];
        let target = &self.nodes[to.index()];

        if !target.is_discovered() {
            return Some(EdgeKind::Tree);
        }

        if !target.is_finished() {
            if !self.directed && source.parent() == Some(to) {
                return None;
            }
            return Some(EdgeKind::Back);
        }

        if !self.directed {
            return None;
        }

        if target.entry_time() > source.entry_time() {
            Some(EdgeKind::Forward)
        } else {
            Some(EdgeKind::Cross)
        }
    }

    fn enter<O>(&mut self, index: NodeIndex, observer: &mut O) -> Result<(), O::Error>
    where
        O: GraphObserver<I, T> + ?Sized,
    {
        let time = self.tick();
        let node = &mut self.nodes[index.index()];
        node.discover(time);
        observer.before_node(index, node)
    }

    fn exit<O>(&mut self, index: NodeIndex, observer: &mut O) -> Result<(), O::Error>
    where
        O: GraphObserver<I, T> + ?Sized,
    {
        let time = self.tick();
        let node = &mut self.nodes[index.index()];
        node.finish(time);
        observer.after_node(index, node)
    }

    fn tick(&mut self) -> usize {
        let time = self.time;
        self.time += 1;
        time
    }
}

impl<I, T> Default for GraphWalker<I, T>
where
    I: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
