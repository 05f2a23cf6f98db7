//! Pattern matching over a single graph
//!
//! The matcher drives rule body evaluation. It solves a conjunction of
//! triple patterns depth first against one graph, binding variables in a
//! backtracking [`Environment`]. Seeded evaluation restricts solutions to
//! those that use a given freshly inserted triple at one body position,
//! which keeps incremental propagation from re-deriving old consequences.

use crate::binding::Environment;
use crate::error::SemResult;
use crate::rule::Rule;
use crate::store::{GraphId, QuadStore};
use crate::term::{Term, Triple};

/// Matcher scoped to one graph of a store
pub struct Matcher<'a, S: QuadStore> {
    store: &'a S,
    graph: &'a GraphId,
}

impl<'a, S: QuadStore> Matcher<'a, S> {
    /// Create a matcher reading from one graph
    pub fn new(store: &'a S, graph: &'a GraphId) -> Self {
        Matcher { store, graph }
    }

    /// Triples of the graph compatible with a pattern under the current
    /// bindings. Positions that resolve to ground terms narrow the scan;
    /// unresolved positions stay open.
    fn candidates(&self, pattern: &Triple, env: &Environment) -> Vec<Triple> {
        let s = env.resolve(&pattern.subject);
        let p = env.resolve(&pattern.predicate);
        let o = env.resolve(&pattern.object);
        self.store
            .match_triples(s.as_ref(), p.as_ref(), o.as_ref(), self.graph)
    }

    /// Solve a conjunction of patterns, invoking `emit` with the
    /// environment for every complete solution
    pub fn solve<F>(&self, patterns: &[Triple], env: &mut Environment, emit: &mut F) -> SemResult<()>
    where
        F: FnMut(&mut Environment) -> SemResult<()>,
    {
        let Some((first, rest)) = patterns.split_first() else {
            return emit(env);
        };
        for candidate in self.candidates(first, env) {
            env.push();
            if bind_pattern(first, &candidate, env) {
                self.solve(rest, env, emit)?;
            }
            env.unwind()?;
        }
        Ok(())
    }

    /// Solve a rule body with the seed triple fixed at each body position
    /// in turn. Solutions that do not involve the seed are skipped, so an
    /// already steady graph only pays for the new triple's consequences.
    pub fn solve_seeded<F>(&self, rule: &Rule, seed: &Triple, emit: &mut F) -> SemResult<()>
    where
        F: FnMut(&mut Environment) -> SemResult<()>,
    {
        for position in 0..rule.body.len() {
            let mut env = Environment::new();
            env.push();
            if bind_pattern(&rule.body[position], seed, &mut env) {
                env.commit()?;
                let mut remaining: Vec<Triple> = Vec::with_capacity(rule.body.len() - 1);
                remaining.extend(rule.body[..position].iter().cloned());
                remaining.extend(rule.body[position + 1..].iter().cloned());
                self.solve(&remaining, &mut env, emit)?;
            } else {
                env.unwind()?;
            }
        }
        Ok(())
    }
}

/// Bind a pattern against a ground triple, extending the environment.
/// Returns false on a conflict; partial bindings are left for the caller's
/// trail frame to discard.
pub fn bind_pattern(pattern: &Triple, triple: &Triple, env: &mut Environment) -> bool {
    bind_term(&pattern.subject, &triple.subject, env)
        && bind_term(&pattern.predicate, &triple.predicate, env)
        && bind_term(&pattern.object, &triple.object, env)
}

fn bind_term(pattern: &Term, value: &Term, env: &mut Environment) -> bool {
    match pattern {
        Term::Variable(v) => env.bind(v.slot(), value.clone()),
        Term::Functor(_) => match env.resolve(pattern) {
            Some(resolved) => resolved == *value,
            None => false,
        },
        ground => ground == value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::parse_rule;
    use crate::store::{MemoryStore, Quad};

    fn g() -> GraphId {
        GraphId::new("http://example.org/g")
    }

    fn uri(n: &str) -> Term {
        Term::uri(format!("http://example.org/{}", n))
    }

    fn insert(store: &mut MemoryStore, s: &str, p: &str, o: &str) {
        store.insert(Quad::new(uri(s), uri(p), uri(o), g()));
    }

    fn solutions(store: &MemoryStore, patterns: &[Triple]) -> usize {
        let graph = g();
        let matcher = Matcher::new(store, &graph);
        let mut env = Environment::new();
        let mut count = 0;
        matcher
            .solve(patterns, &mut env, &mut |_| {
                count += 1;
                Ok(())
            })
            .unwrap();
        count
    }

    #[test]
    fn test_ground_pattern() {
        let mut store = MemoryStore::new();
        insert(&mut store, "a", "p", "b");

        let hit = Triple::new(uri("a"), uri("p"), uri("b"));
        let miss = Triple::new(uri("a"), uri("p"), uri("c"));
        assert_eq!(solutions(&store, &[hit]), 1);
        assert_eq!(solutions(&store, &[miss]), 0);
    }

    #[test]
    fn test_join_shares_bindings() {
        let mut store = MemoryStore::new();
        insert(&mut store, "a", "p", "b");
        insert(&mut store, "b", "p", "c");
        insert(&mut store, "c", "p", "d");

        // ?x p ?y . ?y p ?z matches the two overlapping chains
        let patterns = vec![
            Triple::new(Term::var(0, "x"), uri("p"), Term::var(1, "y")),
            Triple::new(Term::var(1, "y"), uri("p"), Term::var(2, "z")),
        ];
        assert_eq!(solutions(&store, &patterns), 2);
    }

    #[test]
    fn test_repeated_variable_must_agree() {
        let mut store = MemoryStore::new();
        insert(&mut store, "a", "p", "a");
        insert(&mut store, "a", "p", "b");

        let patterns = vec![Triple::new(Term::var(0, "x"), uri("p"), Term::var(0, "x"))];
        assert_eq!(solutions(&store, &patterns), 1);
    }

    #[test]
    fn test_seeded_only_uses_seed() {
        let mut store = MemoryStore::new();
        insert(&mut store, "a", "p", "b");
        insert(&mut store, "b", "p", "c");

        let rule = parse_rule(
            "{ ?x <http://example.org/p> ?y . ?y <http://example.org/p> ?z } \
             => { ?x <http://example.org/q> ?z } .",
        )
        .unwrap();

        let graph = g();
        let matcher = Matcher::new(&store, &graph);
        let seed = Triple::new(uri("b"), uri("p"), uri("c"));
        let mut derived = Vec::new();
        matcher
            .solve_seeded(&rule, &seed, &mut |env| {
                for head in &rule.heads {
                    derived.push(env.instantiate(head));
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(derived, vec![Triple::new(uri("a"), uri("q"), uri("c"))]);
    }

    #[test]
    fn test_seeded_at_multiple_positions() {
        let mut store = MemoryStore::new();
        insert(&mut store, "a", "p", "a");

        // A reflexive triple seeds both body positions; both yield the
        // same solution, so the caller sees it twice.
        let rule = parse_rule(
            "{ ?x <http://example.org/p> ?y . ?y <http://example.org/p> ?x } \
             => { ?x <http://example.org/q> ?y } .",
        )
        .unwrap();

        let graph = g();
        let matcher = Matcher::new(&store, &graph);
        let seed = Triple::new(uri("a"), uri("p"), uri("a"));
        let mut count = 0;
        matcher
            .solve_seeded(&rule, &seed, &mut |_| {
                count += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 2);
    }
}
