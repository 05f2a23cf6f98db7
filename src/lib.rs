//! semview - Incremental semantic views over RDF quads
//!
//! A quad store augmented with two virtual graph layers:
//!
//! - **Semantic views** continuously derive an inference graph from a base
//!   graph through a rule set. Insertions propagate incrementally; the
//!   inference graph holds a copy of the base plus everything the rules
//!   derive, kept at a fixpoint as the base changes. Views stack, so one
//!   view's inference graph can feed another.
//! - **Union graphs** present the set union of member graphs as a single
//!   read-only graph, resolved at query time.
//!
//! Rule bodies are solved by a backtracking binding environment; rule heads
//! may introduce existential blank nodes or skolem functors whose identity
//! is a stable function of their arguments.
//!
//! # Example
//!
//! ```rust
//! use semview::{Engine, GraphId, Quad, Term, parse_rule};
//!
//! let mut engine = Engine::new();
//! let rule = parse_rule(
//!     "{ ?x <http://example.org/knows> ?y } \
//!      => { ?y <http://example.org/knows> ?x } .",
//! ).unwrap();
//!
//! engine.create_view(
//!     GraphId::new("http://example.org/people"),
//!     GraphId::new("http://example.org/people-inferred"),
//!     vec![rule],
//! ).unwrap();
//!
//! engine.insert(Quad::new(
//!     Term::uri("http://example.org/alice"),
//!     Term::uri("http://example.org/knows"),
//!     Term::uri("http://example.org/bob"),
//!     GraphId::new("http://example.org/people"),
//! )).unwrap();
//!
//! assert!(engine.contains(&Quad::new(
//!     Term::uri("http://example.org/bob"),
//!     Term::uri("http://example.org/knows"),
//!     Term::uri("http://example.org/alice"),
//!     GraphId::new("http://example.org/people-inferred"),
//! )));
//! ```

pub mod binding;
pub mod config;
pub mod engine;
pub mod error;
pub mod rule;
pub mod store;
pub mod term;
pub mod union;
pub mod view;

pub use binding::{Environment, MAX_VARS};
pub use config::EngineConfig;
pub use engine::{Engine, EngineStats};
pub use error::{ErrorCode, SemError, SemResult};
pub use rule::{parse_rule, parse_rules, Rule, RuleParseError};
pub use store::{GraphId, MemoryStore, Quad, QuadStore};
pub use term::{BlankNode, Functor, Literal, Term, Triple, Uri, Variable};
pub use union::UnionRegistry;
pub use view::{SemanticView, ViewRegistry, ViewState};
