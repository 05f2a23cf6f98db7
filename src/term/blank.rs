//! Blank (anonymous) node representation

use std::fmt;
use std::hash::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};

use fnv::FnvHasher;

/// Counter for generating fresh blank node IDs
static BLANK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A blank node: a locally scoped node with no global name
///
/// Two kinds exist. Fresh nodes carry a unique counter value and never
/// compare equal to any other node. Skolem nodes are derived from a label,
/// so synthesizing the same label twice yields the same node.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BlankNode {
    id: u64,
    label: Option<String>,
}

impl BlankNode {
    /// Create a fresh blank node with a unique ID
    pub fn fresh() -> Self {
        BlankNode {
            id: BLANK_COUNTER.fetch_add(1, Ordering::SeqCst),
            label: None,
        }
    }

    /// Create a blank node with a label
    pub fn labeled(label: String) -> Self {
        BlankNode {
            id: BLANK_COUNTER.fetch_add(1, Ordering::SeqCst),
            label: Some(label),
        }
    }

    /// Create a skolem node whose identity is a function of the label
    ///
    /// Re-deriving a node from the same ground sub-bindings must produce an
    /// equal node, otherwise repeated derivation would never reach a fixpoint.
    pub fn skolem(label: String) -> Self {
        let mut hasher = FnvHasher::default();
        hasher.write(label.as_bytes());
        BlankNode {
            id: hasher.finish(),
            label: Some(label),
        }
    }

    /// Get the internal ID
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the label if present
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl fmt::Debug for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "_:{}", label)
        } else {
            write!(f, "_:b{}", self.id)
        }
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_blank_nodes_are_unique() {
        let b1 = BlankNode::fresh();
        let b2 = BlankNode::fresh();
        assert_ne!(b1.id(), b2.id());
        assert_ne!(b1, b2);
    }

    #[test]
    fn test_skolem_nodes_are_stable() {
        let s1 = BlankNode::skolem("addr(alice,home)".into());
        let s2 = BlankNode::skolem("addr(alice,home)".into());
        let s3 = BlankNode::skolem("addr(bob,home)".into());
        assert_eq!(s1, s2);
        assert_ne!(s1, s3);
    }

    #[test]
    fn test_labeled_blank_node() {
        let b = BlankNode::labeled("x".into());
        assert_eq!(b.label(), Some("x"));
        assert_eq!(format!("{}", b), "_:x");
    }
}
