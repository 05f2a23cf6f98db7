//! Functor terms
//!
//! A functor stands for a node that has not been constructed yet: it is built
//! from sub-bindings once they are all ground. Rule heads use functors to
//! synthesize composite blank nodes (e.g. an address record keyed by its
//! owner and kind) instead of allocating an unrelated fresh node on every
//! derivation.

use std::fmt;

use super::Term;

/// A named term constructor over sub-terms
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Functor {
    name: String,
    args: Vec<Term>,
}

impl Functor {
    /// Create a new functor
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Functor {
            name: name.into(),
            args,
        }
    }

    /// Get the functor name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the argument terms
    pub fn args(&self) -> &[Term] {
        &self.args
    }

    /// A functor is ground iff all of its arguments are (transitively) ground
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(|a| a.is_ground())
    }

    /// Render the skolem label for a fully resolved functor
    ///
    /// Callers must only invoke this on ground functors; the label is the
    /// identity of the synthesized node.
    pub fn skolem_label(&self) -> String {
        let args: Vec<String> = self.args.iter().map(|a| format!("{:?}", a)).collect();
        format!("{}({})", self.name, args.join(","))
    }
}

impl fmt::Debug for Functor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{:?}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Functor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_check() {
        let ground = Functor::new("addr", vec![Term::uri("http://example.org/alice")]);
        assert!(ground.is_ground());

        let open = Functor::new("addr", vec![Term::var(0, "x")]);
        assert!(!open.is_ground());
    }

    #[test]
    fn test_skolem_label_is_stable() {
        let f1 = Functor::new("addr", vec![Term::uri("http://example.org/a")]);
        let f2 = Functor::new("addr", vec![Term::uri("http://example.org/a")]);
        assert_eq!(f1.skolem_label(), f2.skolem_label());
    }

    #[test]
    fn test_nested_functor_groundness() {
        let inner = Term::functor("key", vec![Term::var(1, "y")]);
        let outer = Functor::new("addr", vec![inner]);
        assert!(!outer.is_ground());
    }
}
