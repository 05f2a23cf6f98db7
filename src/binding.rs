//! Variable binding environment with a backtracking trail
//!
//! An [`Environment`] is the mutable state of one matching episode: a fixed
//! number of variable slots plus a trail of slot snapshots. The
//! `push`/`unwind`/`commit` trio implements a minimal backtracking stack
//! without allocating a new environment per choice point: a push snapshots
//! all [`MAX_VARS`] slots, which is cheap because the bound is small.
//!
//! An environment is owned exclusively by the matching routine that created
//! it and is never shared across concurrent matches.

use crate::error::{SemError, SemResult};
use crate::term::{BlankNode, Term, Triple};

/// Maximum number of variable slots per rule
///
/// Realistic rules bind a handful of variables; the fixed bound keeps trail
/// snapshots cheap.
pub const MAX_VARS: usize = 10;

/// A mutable variable-binding environment
#[derive(Clone, Debug)]
pub struct Environment {
    slots: Vec<Option<Term>>,
    trail: Vec<Vec<Option<Term>>>,
}

impl Environment {
    /// Create an environment with all slots unbound and an empty trail
    pub fn new() -> Self {
        Environment {
            slots: vec![None; MAX_VARS],
            trail: Vec::new(),
        }
    }

    /// Snapshot the current bindings onto the trail
    ///
    /// Called when entering a nested match alternative; a later [`unwind`]
    /// restores the snapshot, a later [`commit`] discards it.
    ///
    /// [`unwind`]: Environment::unwind
    /// [`commit`]: Environment::commit
    pub fn push(&mut self) {
        self.trail.push(self.slots.clone());
    }

    /// Discard the current bindings and restore the previous snapshot
    pub fn unwind(&mut self) -> SemResult<()> {
        match self.trail.pop() {
            Some(saved) => {
                self.slots = saved;
                Ok(())
            }
            None => Err(SemError::trail_underflow("unwind")),
        }
    }

    /// Keep the current bindings and drop the previous snapshot
    ///
    /// Accepts the current frame as the new baseline one level up; used when
    /// a nested match succeeded and its bindings should be retained.
    pub fn commit(&mut self) -> SemResult<()> {
        match self.trail.pop() {
            Some(_) => Ok(()),
            None => Err(SemError::trail_underflow("commit")),
        }
    }

    /// Number of snapshots currently on the trail
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// Bind a slot, or check compatibility with its existing binding
    ///
    /// Returns true if the slot was unbound (it is now bound to `value`) or
    /// if it was already bound to a semantically equal value. Returns false
    /// on a conflict; the caller backtracks.
    pub fn bind(&mut self, slot: usize, value: Term) -> bool {
        debug_assert!(slot < MAX_VARS);
        match &self.slots[slot] {
            None => {
                self.slots[slot] = Some(value);
                true
            }
            Some(existing) => *existing == value,
        }
    }

    /// Check whether a slot is currently bound
    pub fn is_bound(&self, slot: usize) -> bool {
        self.slots[slot].is_some()
    }

    /// Resolve a term against the current bindings
    ///
    /// Returns `None` for an unbound variable or for a functor with any
    /// unresolved argument (not yet instantiable). A fully resolved functor
    /// yields its skolem node, so identical sub-bindings always synthesize
    /// the same composite node.
    pub fn resolve(&self, term: &Term) -> Option<Term> {
        match term {
            Term::Variable(v) => {
                let bound = self.slots.get(v.slot())?.as_ref()?;
                self.resolve(bound)
            }
            Term::Functor(f) => {
                let mut args = Vec::with_capacity(f.args().len());
                for arg in f.args() {
                    args.push(self.resolve(arg)?);
                }
                let resolved = crate::term::Functor::new(f.name(), args);
                Some(Term::BlankNode(BlankNode::skolem(resolved.skolem_label())))
            }
            _ => Some(term.clone()),
        }
    }

    /// Instantiate a pattern into a ground triple
    ///
    /// Positions that resolve are substituted; an unbound variable is
    /// replaced by a freshly allocated blank node which is also bound into
    /// the environment, so an existential shared across the head patterns of
    /// one solution materializes as a single new entity.
    pub fn instantiate(&mut self, pattern: &Triple) -> Triple {
        Triple::new(
            self.instantiate_term(&pattern.subject),
            self.instantiate_term(&pattern.predicate),
            self.instantiate_term(&pattern.object),
        )
    }

    fn instantiate_term(&mut self, term: &Term) -> Term {
        if let Some(resolved) = self.resolve(term) {
            return resolved;
        }
        let fresh = Term::fresh_blank();
        if let Term::Variable(v) = term {
            self.slots[v.slot()] = Some(fresh.clone());
        }
        fresh
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
