//! Graph Nodes
//!
//! This module defines the node types that live in the walker's arena.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Position of a node in the walker's arena.
///
/// Indices are handed out by [`GraphWalker`](super::GraphWalker) in creation
/// order and stay valid for the walker's lifetime, since nodes are never
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw arena position.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Traversal state of a node.
///
/// This is the classic white/gray/black coloring used for back-edge
/// detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// The node has not been visited yet.
    #[default]
    Undiscovered,

    /// The node has been entered and is still on the active traversal path.
    Discovered,

    /// The node and everything reachable from it has been fully processed.
    Finished,
}

/// Outgoing neighbor list. Most entities declare only a handful of
/// dependencies, so short lists stay inline.
pub(crate) type Neighbors = SmallVec<[NodeIndex; 4]>;

/// A node in the graph.
#[derive(Debug, Clone)]
pub struct Node<I, T> {
    /// Identifier, unique within one walker.
    id: I,

    /// Caller-supplied payload. Absent until explicitly attached.
    data: Option<T>,

    /// Current traversal state.
    state: NodeState,

    /// Outgoing edges in insertion order.
    neighbors: Neighbors,

    /// The node this one was reached from via a tree edge.
    parent: Option<NodeIndex>,

    /// Traversal clock value when the node was entered.
    entry_time: Option<usize>,

    /// Traversal clock value when the node was finished.
    exit_time: Option<usize>,
}

impl<I, T> Node<I, T> {
    /// Create a new undiscovered node with no payload and no edges.
    pub(crate) fn new(id: I) -> Self {
        Self {
            id,
            data: None,
            state: NodeState::Undiscovered,
            neighbors: Neighbors::new(),
            parent: None,
            entry_time: None,
            exit_time: None,
        }
    }

    /// Get the node's identifier.
    pub fn id(&self) -> &I {
        &self.id
    }

    /// Get the attached payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Get a mutable reference to the attached payload, if any.
    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    /// Attach a payload, returning the one it replaces.
    pub fn set_data(&mut self, data: T) -> Option<T> {
        self.data.replace(data)
    }

    /// Detach and return the payload.
    pub fn take_data(&mut self) -> Option<T> {
        self.data.take()
    }

    /// Check whether a payload has been attached.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Get the current traversal state.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Check whether the node has been entered (it may also be finished).
    pub fn is_discovered(&self) -> bool {
        self.state != NodeState::Undiscovered
    }

    /// Check whether traversal of the node is complete.
    pub fn is_finished(&self) -> bool {
        self.state == NodeState::Finished
    }

    /// Get the outgoing edges in the order they were added.
    pub fn neighbors(&self) -> &[NodeIndex] {
        &self.neighbors
    }

    /// Get the tree parent from the most recent traversal.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Get the traversal clock value at which the node was entered.
    pub fn entry_time(&self) -> Option<usize> {
        self.entry_time
    }

    /// Get the traversal clock value at which the node was finished.
    pub fn exit_time(&self) -> Option<usize> {
        self.exit_time
    }

    /// Add an outgoing edge. Returns false if the edge already existed.
    pub(crate) fn add_neighbor(&mut self, to: NodeIndex) -> bool {
        if self.neighbors.contains(&to) {
            return false;
        }
        self.neighbors.push(to);
        true
    }

    pub(crate) fn set_parent(&mut self, parent: NodeIndex) {
        self.parent = Some(parent);
    }

    pub(crate) fn discover(&mut self, time: usize) {
        self.state = NodeState::Discovered;
        self.entry_time = Some(time);
    }

    pub(crate) fn finish(&mut self, time: usize) {
        self.state = NodeState::Finished;
        self.exit_time = Some(time);
    }

    /// Forget everything learned during a traversal. Edges and payload stay.
    pub(crate) fn reset(&mut self) {
        self.state = NodeState::Undiscovered;
        self.parent = None;
        self.entry_time = None;
        self.exit_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_undiscovered_without_payload() {
        let node: Node<&str, u32> = Node::new("a");
        assert_eq!(*node.id(), "a");
        assert_eq!(node.state(), NodeState::Undiscovered);
        assert!(!node.has_data());
        assert!(node.neighbors().is_empty());
        assert!(node.parent().is_none());
    }

    #[test]
    fn payload_replacement() {
        let mut node: Node<&str, u32> = Node::new("a");
        assert_eq!(node.set_data(1), None);
        assert_eq!(node.set_data(2), Some(1));
        assert_eq!(node.data(), Some(&2));

        *node.data_mut().unwrap() += 1;
        assert_eq!(node.take_data(), Some(3));
        assert!(!node.has_data());
    }

    #[test]
    fn duplicate_neighbors_are_ignored() {
        let mut node: Node<&str, ()> = Node::new("a");
        assert!(node.add_neighbor(NodeIndex::new(2)));
        assert!(node.add_neighbor(NodeIndex::new(1)));
        assert!(!node.add_neighbor(NodeIndex::new(2)));

        assert_eq!(node.neighbors(), &[NodeIndex::new(2), NodeIndex::new(1)]);
    }

    #[test]
    fn state_transitions() {
        let mut node: Node<&str, ()> = Node::new("a");

        node.discover(0);
        assert_eq!(node.state(), NodeState::Discovered);
        assert!(node.is_discovered());
        assert!(!node.is_finished());

        node.finish(3);
        assert_eq!(node.state(), NodeState::Finished);
        assert_eq!(node.entry_time(), Some(0));
        assert_eq!(node.exit_time(), Some(3));

        node.reset();
        assert_eq!(node.state(), NodeState::Undiscovered);
        assert!(node.entry_time().is_none());
        assert!(node.exit_time().is_none());
    }

    #[test]
    fn node_index_display() {
        assert_eq!(NodeIndex::new(7).to_string(), "#7");
        assert_eq!(NodeIndex::new(7).index(), 7);
    }
}
