//! Inference rules
//!
//! A rule pairs body patterns (all must match) with head patterns (each is
//! instantiated per solution). A rule with an empty body is an axiom and
//! fires exactly once, when its view is created.

mod parser;

pub use parser::{parse_rule, parse_rules, RuleParseError};

use crate::binding::MAX_VARS;
use crate::error::{SemError, SemResult};
use crate::term::{Term, Triple, Variable};

/// An inference rule: body patterns imply head patterns
#[derive(Clone, Debug)]
pub struct Rule {
    /// Name/identifier for the rule (optional)
    pub name: Option<String>,
    /// Body patterns, evaluated as a join in declaration order
    pub body: Vec<Triple>,
    /// Head patterns, instantiated once per solution
    pub heads: Vec<Triple>,
}

impl Rule {
    /// Create a new rule, validating variable slots against [`MAX_VARS`]
    pub fn new(body: Vec<Triple>, heads: Vec<Triple>) -> SemResult<Self> {
        let rule = Rule {
            name: None,
            body,
            heads,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Create a named rule
    pub fn named(
        name: impl Into<String>,
        body: Vec<Triple>,
        heads: Vec<Triple>,
    ) -> SemResult<Self> {
        let mut rule = Self::new(body, heads)?;
        rule.name = Some(name.into());
        Ok(rule)
    }

    /// Check every variable slot against [`MAX_VARS`]
    ///
    /// The fields are public, so a rule assembled without [`Rule::new`] may
    /// carry out-of-range slots; consumers that index an environment by slot
    /// re-run this check before accepting the rule.
    pub fn validate(&self) -> SemResult<()> {
        for triple in self.body.iter().chain(self.heads.iter()) {
            for term in triple.terms() {
                check_slots(term)?;
            }
        }
        Ok(())
    }

    /// An axiom has no body and fires unconditionally once
    pub fn is_axiom(&self) -> bool {
        self.body.is_empty()
    }

    /// Collect the distinct variables appearing in this rule
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = Vec::new();
        for triple in self.body.iter().chain(self.heads.iter()) {
            for term in triple.terms() {
                collect_variables(term, &mut vars);
            }
        }
        vars
    }
}

fn check_slots(term: &Term) -> SemResult<()> {
    match term {
        Term::Variable(v) if v.slot() >= MAX_VARS => {
            Err(SemError::slot_out_of_range(v.slot(), MAX_VARS)
                .with_context("variable", v.name()))
        }
        Term::Functor(f) => {
            for arg in f.args() {
                check_slots(arg)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn collect_variables(term: &Term, vars: &mut Vec<Variable>) {
    match term {
        Term::Variable(v) => {
            if !vars.contains(v) {
                vars.push(v.clone());
            }
        }
        Term::Functor(f) => {
            for arg in f.args() {
                collect_variables(arg, vars);
            }
        }
        _ => {}
    }
}
