//! Inference engine
//!
//! The [`Engine`] ties the pieces together: a quad store, the view
//! registry, the union registry, and the propagation loop that keeps every
//! inference graph at its fixpoint as base graphs change.
//!
//! # Propagation model
//!
//! Every accepted insertion enters a worklist. Processing one work item
//! does two things:
//! - the triple is copied into the inference graph of every view whose
//!   base is the item's graph
//! - if the item's graph is itself a view's inference graph, the view's
//!   rules run seeded with the item, deriving only consequences that
//!   involve the new triple
//!
//! Only insertions the store reports as new re-enter the worklist, so the
//! loop reaches a fixpoint whenever derivations are idempotent. A
//! configurable step budget guards against runaway rule sets.
//!
//! Deletions do not propagate incrementally. Removing a base triple
//! rebuilds every (transitively) dependent inference graph from scratch,
//! trading deletion cost for a simple correctness argument.

use std::collections::VecDeque;

use fnv::FnvHashSet;
use serde::Serialize;

use crate::binding::Environment;
use crate::config::EngineConfig;
use crate::error::{ErrorCode, SemError, SemResult};
use crate::rule::Rule;
use crate::store::{GraphId, MemoryStore, Quad, QuadStore};
use crate::term::{Term, Triple};
use crate::union::UnionRegistry;
use crate::view::matcher::Matcher;
use crate::view::{SemanticView, ViewRegistry, ViewState};

// ============================================================================
// Statistics
// ============================================================================

/// Counters accumulated over the lifetime of one engine instance
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineStats {
    /// Quads accepted through the public insert path
    pub quads_inserted: u64,
    /// Quads produced by copying and rule derivation
    pub quads_derived: u64,
    /// Work items processed by the propagation loop
    pub propagation_steps: u64,
    /// Full view rebuilds triggered by deletions
    pub rematerializations: u64,
}

// ============================================================================
// Engine
// ============================================================================

/// Incremental semantic view engine over a quad store
pub struct Engine<S: QuadStore = MemoryStore> {
    store: S,
    views: ViewRegistry,
    unions: UnionRegistry,
    config: EngineConfig,
    stats: EngineStats,
}

impl Engine<MemoryStore> {
    /// Create an engine over a fresh in-memory store
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine over a fresh in-memory store with a configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_store(MemoryStore::new(), config)
    }
}

impl Default for Engine<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: QuadStore> Engine<S> {
    /// Create an engine over an existing store
    pub fn with_store(store: S, config: EngineConfig) -> Self {
        Engine {
            store,
            views: ViewRegistry::new(),
            unions: UnionRegistry::new(),
            config,
            stats: EngineStats::default(),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lifetime counters
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Lifecycle state of the view producing an inference graph
    pub fn view_state(&self, inference: &GraphId) -> Option<ViewState> {
        self.views.owner_of(inference).map(|v| v.state)
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    /// Insert a quad and propagate its consequences. Returns false if the
    /// quad was already present.
    ///
    /// Stored statements must be ground; variables and open functors only
    /// occur in rule patterns.
    pub fn insert(&mut self, quad: Quad) -> SemResult<bool> {
        self.check_writable(&quad.graph)?;
        if !quad.is_ground() {
            return Err(SemError::non_ground_quad(quad.graph.as_str()));
        }
        if !self.store.insert(quad.clone()) {
            return Ok(false);
        }
        self.stats.quads_inserted += 1;
        self.propagate(VecDeque::from(vec![quad]))?;
        Ok(true)
    }

    /// Remove a quad. Views depending on the quad's graph, directly or
    /// through stacking, are rebuilt. Returns false if the quad was not
    /// present.
    pub fn remove(&mut self, quad: &Quad) -> SemResult<bool> {
        self.check_writable(&quad.graph)?;
        if !quad.is_ground() {
            return Err(SemError::non_ground_quad(quad.graph.as_str()));
        }
        if !self.store.remove(quad) {
            return Ok(false);
        }
        let affected = self.views.downstream_closure(&quad.graph);
        if !affected.is_empty() {
            self.stats.rematerializations += 1;
            self.rematerialize(&affected)?;
        }
        Ok(true)
    }

    /// Check if a quad is present. Union graphs answer from their members.
    pub fn contains(&self, quad: &Quad) -> bool {
        if self.unions.is_union(&quad.graph) {
            let triple = quad.to_triple();
            self.unions
                .resolve_members(&quad.graph)
                .into_iter()
                .any(|g| self.store.contains(&Quad::from_triple(triple.clone(), g)))
        } else {
            self.store.contains(quad)
        }
    }

    /// Number of triples in a graph. A union graph reports the sum over
    /// its leaf members; a triple stored in two members counts twice.
    pub fn size(&self, graph: &GraphId) -> usize {
        if self.unions.is_union(graph) {
            self.unions
                .resolve_members(graph)
                .iter()
                .map(|g| self.store.size(g))
                .sum()
        } else {
            self.store.size(graph)
        }
    }

    /// Scan a graph for triples matching the given positions. Over a union
    /// graph the scan fans out to the leaf members, deduplicated.
    pub fn match_triples(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        graph: &GraphId,
    ) -> Vec<Triple> {
        if self.unions.is_union(graph) {
            let mut seen = FnvHashSet::default();
            let mut out = Vec::new();
            for member in self.unions.resolve_members(graph) {
                for triple in self.store.match_triples(subject, predicate, object, &member) {
                    if seen.insert(triple.clone()) {
                        out.push(triple);
                    }
                }
            }
            out
        } else {
            self.store.match_triples(subject, predicate, object, graph)
        }
    }

    // ------------------------------------------------------------------
    // Graphs
    // ------------------------------------------------------------------

    /// Delete a graph. A union name drops only the definition; an
    /// inference graph takes its view down with it. Returns true if
    /// anything was deleted.
    pub fn remove_graph(&mut self, graph: &GraphId) -> SemResult<bool> {
        if self.unions.is_union(graph) {
            self.unions.remove(graph)?;
            return Ok(true);
        }
        if self.views.is_base_in_use(graph) {
            return Err(SemError::graph_in_use(graph.as_str()));
        }
        if self.views.owner_of(graph).is_some() {
            self.remove_view(graph)?;
            self.store.drop_graph(graph);
            return Ok(true);
        }
        Ok(self.store.drop_graph(graph))
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Register a view and materialize its inference graph from the
    /// current base content
    pub fn create_view(
        &mut self,
        base: GraphId,
        inference: GraphId,
        rules: Vec<Rule>,
    ) -> SemResult<()> {
        if self.unions.is_union(&inference) {
            return Err(SemError::read_only_graph(inference.as_str()));
        }
        if self.unions.is_union(&base) {
            return Err(SemError::union_as_view_base(base.as_str()));
        }
        // Rules may arrive as bare struct literals; re-check the slot bound
        // before anything indexes an environment with them.
        for rule in &rules {
            rule.validate()?;
        }
        self.views
            .register(SemanticView::new(base, inference.clone(), rules))?;

        let mut order = vec![inference.clone()];
        order.extend(self.views.downstream_closure(&inference));
        self.rematerialize(&order)
    }

    /// Unregister the view producing an inference graph. The graph is
    /// emptied and becomes an ordinary graph; views stacked on it rebuild
    /// against the now-empty content.
    pub fn remove_view(&mut self, inference: &GraphId) -> SemResult<()> {
        if self.views.unregister(inference).is_none() {
            return Err(SemError::new(
                ErrorCode::UnknownView,
                format!("no view produces inference graph {}", inference),
            ));
        }
        self.store.clear_graph(inference);
        let downstream = self.views.downstream_closure(inference);
        if !downstream.is_empty() {
            self.stats.rematerializations += 1;
            self.rematerialize(&downstream)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Unions
    // ------------------------------------------------------------------

    /// Define a virtual union graph over the given members
    pub fn create_union(&mut self, name: GraphId, members: Vec<GraphId>) -> SemResult<()> {
        if self.store.has_graph(&name) || self.views.owner_of(&name).is_some() {
            return Err(SemError::new(
                ErrorCode::DuplicateUnion,
                format!("graph name {} is already in concrete use", name),
            ));
        }
        self.unions.create(name, members)
    }

    /// Remove a union graph definition. Member graphs are untouched.
    pub fn remove_union(&mut self, name: &GraphId) -> SemResult<()> {
        self.unions.remove(name)
    }

    /// Whether the name is a defined union graph
    pub fn is_union(&self, name: &GraphId) -> bool {
        self.unions.is_union(name)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn check_writable(&self, graph: &GraphId) -> SemResult<()> {
        if self.unions.is_union(graph) {
            return Err(SemError::read_only_graph(graph.as_str())
                .with_hint("union graphs are virtual; write to a member graph instead"));
        }
        if self.config.access.strict_inference_writes && self.views.owner_of(graph).is_some() {
            return Err(SemError::read_only_graph(graph.as_str())
                .with_hint("inference graphs are view-owned; write to the base graph instead"));
        }
        Ok(())
    }

    /// Drain the worklist to a fixpoint, enforcing the step budget
    fn propagate(&mut self, mut worklist: VecDeque<Quad>) -> SemResult<usize> {
        let max_steps = self.config.limits.max_steps;
        let mut steps = 0usize;

        while let Some(quad) = worklist.pop_front() {
            steps += 1;
            if steps > max_steps {
                self.stats.propagation_steps += steps as u64;
                return Err(SemError::fixpoint_overflow(max_steps)
                    .with_context("graph", quad.graph.as_str()));
            }

            // Copy into every view based on this graph.
            let dependents: Vec<GraphId> = self.views.views_on_base(&quad.graph).to_vec();
            for inference in dependents {
                let copy = Quad::from_triple(quad.to_triple(), inference);
                if self.store.insert(copy.clone()) {
                    self.stats.quads_derived += 1;
                    worklist.push_back(copy);
                }
            }

            // Seeded derivation inside the owning view's inference graph.
            let rules = match self.views.owner_of(&quad.graph) {
                Some(view) => view.rules.clone(),
                None => continue,
            };
            let seed = quad.to_triple();
            let mut derived: Vec<Triple> = Vec::new();
            {
                let matcher = Matcher::new(&self.store, &quad.graph);
                for rule in rules.iter().filter(|r| !r.is_axiom()) {
                    matcher.solve_seeded(rule, &seed, &mut |env| {
                        for head in &rule.heads {
                            derived.push(env.instantiate(head));
                        }
                        Ok(())
                    })?;
                }
            }
            for triple in derived {
                let out = Quad::from_triple(triple, quad.graph.clone());
                if self.store.insert(out.clone()) {
                    self.stats.quads_derived += 1;
                    worklist.push_back(out);
                }
            }
        }

        self.stats.propagation_steps += steps as u64;
        Ok(steps)
    }

    /// Rebuild the given inference graphs from scratch. `order` must list
    /// upstream graphs before the graphs stacked on them.
    ///
    /// Axiom rules fire exactly once per rebuilt view; their existential
    /// heads mint fresh nodes, so re-firing them would not be idempotent.
    /// Base copies for bases outside the rebuilt set seed the worklist
    /// directly; bases inside it refill through propagation.
    fn rematerialize(&mut self, order: &[GraphId]) -> SemResult<()> {
        for graph in order {
            self.store.clear_graph(graph);
            if let Some(view) = self.views.owner_of_mut(graph) {
                view.state = ViewState::Materializing;
            }
        }

        let mut worklist = VecDeque::new();
        for graph in order {
            let (base, rules) = match self.views.owner_of(graph) {
                Some(view) => (view.base.clone(), view.rules.clone()),
                None => continue,
            };

            for rule in rules.iter().filter(|r| r.is_axiom()) {
                let mut env = Environment::new();
                for head in &rule.heads {
                    let quad = Quad::from_triple(env.instantiate(head), graph.clone());
                    if self.store.insert(quad.clone()) {
                        self.stats.quads_derived += 1;
                        worklist.push_back(quad);
                    }
                }
            }

            if !order.contains(&base) {
                for triple in self.store.match_triples(None, None, None, &base) {
                    let quad = Quad::from_triple(triple, graph.clone());
                    if self.store.insert(quad.clone()) {
                        self.stats.quads_derived += 1;
                        worklist.push_back(quad);
                    }
                }
            }
        }

        self.propagate(worklist)?;

        for graph in order {
            if let Some(view) = self.views.owner_of_mut(graph) {
                view.state = ViewState::Steady;
            }
        }
        Ok(())
    }
}
