//! Declarative dependency registration
//!
//! Module loaders usually enumerate components together with the names of
//! the components they need. A [`DependencyDeclaration`] is one such entry,
//! deserializable from whatever manifest format the host uses.

use serde::{Deserialize, Serialize};

/// One entity and the identifiers it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDeclaration<I, T> {
    /// Identifier of the entity.
    pub id: I,

    /// Payload handed back in the data ordering.
    pub data: T,

    /// Identifiers this entity depends on, in declaration order.
    #[serde(default = "Vec::new")]
    pub depends_on: Vec<I>,
}

impl<I, T> DependencyDeclaration<I, T> {
    /// Declare an entity with no dependencies.
    pub fn new(id: I, data: T) -> Self {
        Self {
            id,
            data,
            depends_on: Vec::new(),
        }
    }

    /// Add dependencies, keeping declaration order.
    pub fn depends_on(mut self, dependencies: impl IntoIterator<Item = I>) -> Self {
        self.depends_on.extend(dependencies);
        self
    }
}
