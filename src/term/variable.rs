//! Rule variables

use std::fmt;

/// A variable appearing in a triple pattern
///
/// A variable names a slot in an [`Environment`](crate::binding::Environment);
/// it has no meaning outside one. The slot is assigned when the owning rule is
/// built and stays below [`MAX_VARS`](crate::binding::MAX_VARS).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    slot: usize,
    name: String,
}

impl Variable {
    /// Create a variable bound to an environment slot
    pub fn new(slot: usize, name: impl Into<String>) -> Self {
        Variable {
            slot,
            name: name.into(),
        }
    }

    /// Get the environment slot index
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Get the variable name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}
