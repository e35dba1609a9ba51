//! Error types for dependency resolution

use thiserror::Error;

/// Result type for resolver operations
pub type ResolveResult<T, I> = Result<T, ResolveError<I>>;

/// Errors that can occur while resolving a dependency order
///
/// Resolution is all-or-nothing: when any of these is returned no ordering
/// exists, and retrying with the same declarations produces the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolveError<I> {
    /// A back edge was found while walking the graph
    #[error("dependency cycle detected between {from} and {to}")]
    Cycle {
        /// The dependent side of the offending edge
        from: I,
        /// The dependency side of the offending edge, an ancestor of `from`
        to: I,
    },

    /// Strict mode found dependencies that were never given a payload
    #[error("dependencies referenced but never registered: {ids:?}")]
    UnresolvedDependencies {
        /// The identifiers lacking a payload, in creation order
        ids: Vec<I>,
    },
}

impl<I> ResolveError<I> {
    /// Creates a cycle error for the edge `from -> to`
    pub fn cycle(from: I, to: I) -> Self {
        Self::Cycle { from, to }
    }

    /// Creates an unresolved dependencies error
    pub fn unresolved(ids: Vec<I>) -> Self {
        Self::UnresolvedDependencies { ids }
    }

    /// Returns true if this is a cycle error
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle { .. })
    }

    /// Returns the two endpoints of the offending edge for a cycle error
    pub fn cycle_endpoints(&self) -> Option<(&I, &I)> {
        match self {
            Self::Cycle { from, to } => Some((from, to)),
            _ => None,
        }
    }
}
