//! Semantic views
//!
//! A semantic view continuously derives the content of an inference graph
//! from a base graph through a rule set. The [`ViewRegistry`] is owned by one
//! engine instance and dispatches change notifications; it also backs the
//! dependency guard that keeps a base graph from being deleted while a view
//! still reads from it.
//!
//! Views may stack: a view's base graph can be another view's inference
//! graph. The resulting dependency relation must stay a DAG; registration
//! rejects a view that would (transitively) feed itself.

pub mod matcher;

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{ErrorCode, SemError, SemResult};
use crate::rule::Rule;
use crate::store::GraphId;

/// Lifecycle state of a view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Registered, initial evaluation not yet started
    Registered,
    /// Initial full evaluation over pre-existing base content
    Materializing,
    /// Incremental mode
    Steady,
}

/// A registered semantic view
#[derive(Clone, Debug)]
pub struct SemanticView {
    /// Graph the view reads from
    pub base: GraphId,
    /// Graph the view exclusively produces
    pub inference: GraphId,
    /// Rules deriving inference-graph content
    pub rules: Vec<Rule>,
    /// Current lifecycle state
    pub state: ViewState,
}

impl SemanticView {
    /// Create a view in the `Registered` state
    pub fn new(base: GraphId, inference: GraphId, rules: Vec<Rule>) -> Self {
        SemanticView {
            base,
            inference,
            rules,
            state: ViewState::Registered,
        }
    }
}

/// Registry of all views of one engine instance
///
/// Keyed by inference graph (each inference graph has exactly one producing
/// view); a secondary index maps base graphs to their dependent views.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: IndexMap<GraphId, SemanticView>,
    by_base: HashMap<GraphId, Vec<GraphId>>,
}

impl ViewRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view, enforcing inference-graph exclusivity and acyclicity
    pub fn register(&mut self, view: SemanticView) -> SemResult<()> {
        if self.views.contains_key(&view.inference) {
            return Err(SemError::new(
                ErrorCode::InferenceGraphTaken,
                format!(
                    "inference graph {} is already produced by another view",
                    view.inference
                ),
            ));
        }
        if view.base == view.inference {
            return Err(SemError::cyclic_view(view.inference.as_str()));
        }
        // Walk the stacking chain upstream from the base: if this view's
        // inference graph feeds (transitively) into its own base, reject.
        let mut current = view.base.clone();
        loop {
            if current == view.inference {
                return Err(SemError::cyclic_view(view.inference.as_str())
                    .with_context("base", view.base.as_str()));
            }
            match self.views.get(&current) {
                Some(upstream) => current = upstream.base.clone(),
                None => break,
            }
        }

        self.by_base
            .entry(view.base.clone())
            .or_default()
            .push(view.inference.clone());
        self.views.insert(view.inference.clone(), view);
        Ok(())
    }

    /// Remove the view producing the given inference graph
    pub fn unregister(&mut self, inference: &GraphId) -> Option<SemanticView> {
        let view = self.views.shift_remove(inference)?;
        if let Some(deps) = self.by_base.get_mut(&view.base) {
            deps.retain(|g| g != inference);
            if deps.is_empty() {
                self.by_base.remove(&view.base);
            }
        }
        Some(view)
    }

    /// The view producing a given inference graph, if any
    pub fn owner_of(&self, inference: &GraphId) -> Option<&SemanticView> {
        self.views.get(inference)
    }

    /// Mutable access to the view producing a given inference graph
    pub fn owner_of_mut(&mut self, inference: &GraphId) -> Option<&mut SemanticView> {
        self.views.get_mut(inference)
    }

    /// Inference graphs of the views registered on a base graph
    pub fn views_on_base(&self, base: &GraphId) -> &[GraphId] {
        self.by_base.get(base).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Whether any registered view depends on the graph as its base
    pub fn is_base_in_use(&self, graph: &GraphId) -> bool {
        self.by_base.contains_key(graph)
    }

    /// Inference graphs of all views (transitively) downstream of a graph.
    /// Every view has exactly one base, so the walk yields dependency
    /// order: a view always precedes the views stacked on it.
    pub fn downstream_closure(&self, graph: &GraphId) -> Vec<GraphId> {
        let mut order = Vec::new();
        let mut frontier = vec![graph.clone()];
        while let Some(g) = frontier.pop() {
            for inference in self.views_on_base(&g) {
                if !order.contains(inference) {
                    order.push(inference.clone());
                    frontier.push(inference.clone());
                }
            }
        }
        order
    }

    /// Number of registered views
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Check if no views are registered
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(name: &str) -> GraphId {
        GraphId::new(format!("http://example.org/{}", name))
    }

    fn view(base: &str, inference: &str) -> SemanticView {
        SemanticView::new(g(base), g(inference), Vec::new())
    }

    #[test]
    fn test_register_and_lookup() {
        let mut reg = ViewRegistry::new();
        reg.register(view("base", "inf")).unwrap();

        assert!(reg.owner_of(&g("inf")).is_some());
        assert_eq!(reg.views_on_base(&g("base")), &[g("inf")]);
        assert!(reg.is_base_in_use(&g("base")));
        assert!(!reg.is_base_in_use(&g("inf")));
    }

    #[test]
    fn test_inference_graph_exclusivity() {
        let mut reg = ViewRegistry::new();
        reg.register(view("a", "inf")).unwrap();
        let err = reg.register(view("b", "inf")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InferenceGraphTaken);
    }

    #[test]
    fn test_self_cycle_rejected() {
        let mut reg = ViewRegistry::new();
        let err = reg.register(view("same", "same")).unwrap_err();
        assert_eq!(err.code, ErrorCode::CyclicView);
    }

    #[test]
    fn test_transitive_cycle_rejected() {
        let mut reg = ViewRegistry::new();
        // a -> b, b -> c, then closing c -> a is a cycle
        reg.register(view("a", "b")).unwrap();
        reg.register(view("b", "c")).unwrap();
        let err = reg.register(view("c", "a")).unwrap_err();
        assert_eq!(err.code, ErrorCode::CyclicView);
    }

    #[test]
    fn test_stacking_allowed() {
        let mut reg = ViewRegistry::new();
        reg.register(view("base", "mid")).unwrap();
        reg.register(view("mid", "top")).unwrap();
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_unregister() {
        let mut reg = ViewRegistry::new();
        reg.register(view("base", "inf")).unwrap();
        assert!(reg.unregister(&g("inf")).is_some());
        assert!(!reg.is_base_in_use(&g("base")));
        assert!(reg.unregister(&g("inf")).is_none());
    }

    #[test]
    fn test_downstream_closure_order() {
        let mut reg = ViewRegistry::new();
        reg.register(view("base", "mid")).unwrap();
        reg.register(view("mid", "top")).unwrap();

        let order = reg.downstream_closure(&g("base"));
        assert_eq!(order, vec![g("mid"), g("top")]);
    }
}
