//! Resolver configuration

use serde::{Deserialize, Serialize};

/// Options controlling how strictly a graph is resolved.
///
/// The lenient default lets a dependency that was named but never given a
/// payload act as a pure ordering constraint: it takes its place in the
/// ordering with an empty payload slot. Strict mode turns that into
/// [`ResolveError::UnresolvedDependencies`](super::ResolveError::UnresolvedDependencies).
///
/// Options deserialize from partial documents, so an embedding system can
/// keep them next to its module manifests:
///
/// ```
/// use depresolve_core::resolver::ResolveOptions;
///
/// let options: ResolveOptions = serde_json::from_str(r#"{"require_payloads": true}"#).unwrap();
/// assert!(options.require_payloads);
///
/// let options: ResolveOptions = serde_json::from_str("{}").unwrap();
/// assert_eq!(options, ResolveOptions::lenient());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Fail resolution if any node has no payload attached.
    pub require_payloads: bool,
}

impl ResolveOptions {
    /// Payload-less dependencies are allowed.
    pub fn lenient() -> Self {
        Self {
            require_payloads: false,
        }
    }

    /// Every node must carry a payload.
    pub fn strict() -> Self {
        Self {
            require_payloads: true,
        }
    }

    /// Set whether every node must carry a payload.
    pub fn require_payloads(mut self, require: bool) -> Self {
        self.require_payloads = require;
        self
    }
}
