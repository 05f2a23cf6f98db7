//! In-memory quad store
//!
//! The reference [`QuadStore`] backend: one triple set per named graph,
//! insertion order preserved, duplicate inserts ignored.

use fnv::FnvHashSet;
use indexmap::IndexMap;

use crate::term::{Term, Triple};
use super::{GraphId, Quad, QuadStore};

/// A single named graph: ordered triples plus a membership set
#[derive(Clone, Default)]
struct Graph {
    triples: Vec<Triple>,
    present: FnvHashSet<Triple>,
}

impl Graph {
    fn add(&mut self, triple: Triple) -> bool {
        if self.present.contains(&triple) {
            return false;
        }
        self.present.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    fn remove(&mut self, triple: &Triple) -> bool {
        if !self.present.remove(triple) {
            return false;
        }
        if let Some(pos) = self.triples.iter().position(|t| t == triple) {
            self.triples.remove(pos);
        }
        true
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.present.contains(triple)
    }

    fn len(&self) -> usize {
        self.triples.len()
    }
}

/// In-memory store over named graphs
#[derive(Clone, Default)]
pub struct MemoryStore {
    graphs: IndexMap<GraphId, Graph>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total triple count across all graphs
    pub fn total_size(&self) -> usize {
        self.graphs.values().map(|g| g.len()).sum()
    }

    fn matches(
        triple: &Triple,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> bool {
        subject.map(|s| &triple.subject == s).unwrap_or(true)
            && predicate.map(|p| &triple.predicate == p).unwrap_or(true)
            && object.map(|o| &triple.object == o).unwrap_or(true)
    }
}

impl QuadStore for MemoryStore {
    fn insert(&mut self, quad: Quad) -> bool {
        let graph = self.graphs.entry(quad.graph.clone()).or_default();
        graph.add(quad.to_triple())
    }

    fn remove(&mut self, quad: &Quad) -> bool {
        match self.graphs.get_mut(&quad.graph) {
            Some(graph) => graph.remove(&quad.to_triple()),
            None => false,
        }
    }

    fn contains(&self, quad: &Quad) -> bool {
        self.graphs
            .get(&quad.graph)
            .map(|g| g.contains(&quad.to_triple()))
            .unwrap_or(false)
    }

    fn match_triples(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        graph: &GraphId,
    ) -> Vec<Triple> {
        match self.graphs.get(graph) {
            Some(g) => g
                .triples
                .iter()
                .filter(|t| Self::matches(t, subject, predicate, object))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    fn size(&self, graph: &GraphId) -> usize {
        self.graphs.get(graph).map(|g| g.len()).unwrap_or(0)
    }

    fn clear_graph(&mut self, graph: &GraphId) {
        if let Some(g) = self.graphs.get_mut(graph) {
            *g = Graph::default();
        }
    }

    fn drop_graph(&mut self, graph: &GraphId) -> bool {
        self.graphs.shift_remove(graph).is_some()
    }

    fn has_graph(&self, graph: &GraphId) -> bool {
        self.graphs.contains_key(graph)
    }

    fn graph_names(&self) -> Vec<GraphId> {
        self.graphs.keys().cloned().collect()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MemoryStore {{ graphs: {} }}", self.graphs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(s: &str, p: &str, o: &str, g: &str) -> Quad {
        Quad::new(
            Term::uri(format!("http://example.org/{}", s)),
            Term::uri(format!("http://example.org/{}", p)),
            Term::uri(format!("http://example.org/{}", o)),
            GraphId::new(format!("http://example.org/{}", g)),
        )
    }

    #[test]
    fn test_insert_and_contains() {
        let mut store = MemoryStore::new();
        let q = quad("s", "p", "o", "g");

        assert!(store.insert(q.clone()));
        assert!(store.contains(&q));
        assert_eq!(store.size(&q.graph), 1);
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut store = MemoryStore::new();
        let q = quad("s", "p", "o", "g");

        assert!(store.insert(q.clone()));
        assert!(!store.insert(q.clone()));
        assert_eq!(store.size(&q.graph), 1);
    }

    #[test]
    fn test_graphs_are_disjoint() {
        let mut store = MemoryStore::new();
        store.insert(quad("s", "p", "o", "g1"));
        store.insert(quad("s", "p", "o", "g2"));

        assert_eq!(store.size(&GraphId::new("http://example.org/g1")), 1);
        assert_eq!(store.size(&GraphId::new("http://example.org/g2")), 1);
        assert_eq!(store.total_size(), 2);
    }

    #[test]
    fn test_match_with_wildcards() {
        let mut store = MemoryStore::new();
        store.insert(quad("alice", "knows", "bob", "g"));
        store.insert(quad("alice", "knows", "carol", "g"));
        store.insert(quad("bob", "knows", "carol", "g"));

        let g = GraphId::new("http://example.org/g");
        let alice = Term::uri("http://example.org/alice");
        let knows = Term::uri("http://example.org/knows");

        assert_eq!(store.match_triples(Some(&alice), None, None, &g).len(), 2);
        assert_eq!(store.match_triples(None, Some(&knows), None, &g).len(), 3);
        assert_eq!(store.match_triples(None, None, None, &g).len(), 3);
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryStore::new();
        let q = quad("s", "p", "o", "g");

        store.insert(q.clone());
        assert!(store.remove(&q));
        assert!(!store.remove(&q));
        assert!(!store.contains(&q));
    }

    #[test]
    fn test_clear_and_drop_graph() {
        let mut store = MemoryStore::new();
        let q = quad("s", "p", "o", "g");
        store.insert(q.clone());

        store.clear_graph(&q.graph);
        assert!(store.has_graph(&q.graph));
        assert_eq!(store.size(&q.graph), 0);

        assert!(store.drop_graph(&q.graph));
        assert!(!store.has_graph(&q.graph));
        assert!(!store.drop_graph(&q.graph));
    }
}
