//! Structured error handling
//!
//! Provides a unified error type with:
//! - Error codes for programmatic handling
//! - Structured, JSON-friendly error payloads
//! - Context and hint attachment
//!
//! # Error Categories
//!
//! - `TrailUnderflow` - binding-engine misuse (programmer error)
//! - `GraphInUse` - deleting a base graph with a live dependent view
//! - `ReadOnlyGraph` - write addressed to a union or inference graph
//! - `CyclicUnion` / `CyclicView` - rejected at registration time
//! - `StoreError` / `ConfigError` / `RuleError` - ambient failures
//!
//! Binding conflicts during matching are *not* errors: they drive
//! backtracking and never surface to callers.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Binding engine (1xxx)
    /// Unwind or commit on an empty trail
    TrailUnderflow = 1000,
    /// Variable slot outside the fixed environment bound
    SlotOutOfRange = 1001,

    // View engine (2xxx)
    /// A view would depend, transitively, on its own inference graph
    CyclicView = 2000,
    /// The inference graph is already owned by another view
    InferenceGraphTaken = 2001,
    /// No view registered for the given inference graph
    UnknownView = 2002,
    /// Fixpoint computation exceeded the configured step budget
    FixpointOverflow = 2003,

    // Graph lifecycle (3xxx)
    /// Deleting a graph that a registered view depends on
    GraphInUse = 3000,
    /// Write addressed to a read-only (union or inference) graph
    ReadOnlyGraph = 3001,

    // Union graphs (4xxx)
    /// A union would (transitively) include itself
    CyclicUnion = 4000,
    /// A union with this name already exists
    DuplicateUnion = 4001,
    /// No union registered under the given name
    UnknownUnion = 4002,
    /// A union graph offered as the base of a view
    UnionAsViewBase = 4003,

    // Ambient (5xxx+)
    /// Store operation failed
    StoreError = 5000,
    /// A write carried a quad with unbound terms
    NonGroundQuad = 5001,
    /// Configuration error
    ConfigError = 6000,
    /// Rule construction error
    RuleError = 7000,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::TrailUnderflow => "Binding trail underflow",
            ErrorCode::SlotOutOfRange => "Variable slot out of range",
            ErrorCode::CyclicView => "Cyclic view dependency",
            ErrorCode::InferenceGraphTaken => "Inference graph already owned",
            ErrorCode::UnknownView => "Unknown view",
            ErrorCode::FixpointOverflow => "Fixpoint step budget exceeded",
            ErrorCode::GraphInUse => "Graph has dependent views",
            ErrorCode::ReadOnlyGraph => "Graph is read-only",
            ErrorCode::CyclicUnion => "Cyclic union membership",
            ErrorCode::DuplicateUnion => "Union already exists",
            ErrorCode::UnknownUnion => "Unknown union",
            ErrorCode::UnionAsViewBase => "Union graph cannot back a view",
            ErrorCode::StoreError => "Store error",
            ErrorCode::NonGroundQuad => "Quad contains unbound terms",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::RuleError => "Rule error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Error Context
// ============================================================================

/// Additional context information for an error
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Key-value pairs of context information
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, String>,
    /// Stack of error causes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl ErrorContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for semview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SemError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    // ========================================================================
    // Factory methods for common error types
    // ========================================================================

    /// Create a trail underflow error
    pub fn trail_underflow(op: &str) -> Self {
        Self::new(
            ErrorCode::TrailUnderflow,
            format!("{} called on an environment with an empty trail", op),
        )
    }

    /// Create a slot-out-of-range error
    pub fn slot_out_of_range(slot: usize, bound: usize) -> Self {
        Self::new(
            ErrorCode::SlotOutOfRange,
            format!("variable slot {} exceeds environment bound {}", slot, bound),
        )
    }

    /// Create a graph-in-use error
    pub fn graph_in_use(graph: &str) -> Self {
        Self::new(
            ErrorCode::GraphInUse,
            format!("graph {} is the base of a registered view", graph),
        )
        .with_hint("remove the dependent view first")
    }

    /// Create a read-only graph error
    pub fn read_only_graph(graph: &str) -> Self {
        Self::new(
            ErrorCode::ReadOnlyGraph,
            format!("graph {} is read-only", graph),
        )
        .with_hint("write to a concrete member graph instead")
    }

    /// Create a cyclic union error
    pub fn cyclic_union(name: &str) -> Self {
        Self::new(
            ErrorCode::CyclicUnion,
            format!("union {} would transitively include itself", name),
        )
    }

    /// Create a cyclic view error
    pub fn cyclic_view(inference: &str) -> Self {
        Self::new(
            ErrorCode::CyclicView,
            format!(
                "view producing {} would depend on its own inference graph",
                inference
            ),
        )
    }

    /// Create a fixpoint overflow error
    pub fn fixpoint_overflow(steps: usize) -> Self {
        Self::new(
            ErrorCode::FixpointOverflow,
            format!("fixpoint computation stopped after {} work items", steps),
        )
        .with_hint("raise max_steps in the engine configuration")
    }

    /// Create a union-as-view-base error
    pub fn union_as_view_base(name: &str) -> Self {
        Self::new(
            ErrorCode::UnionAsViewBase,
            format!("union graph {} cannot serve as a view base", name),
        )
        .with_hint("views read from concrete graphs; point the view at a member graph")
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreError, message)
    }

    /// Create a non-ground quad error
    pub fn non_ground_quad(graph: &str) -> Self {
        Self::new(
            ErrorCode::NonGroundQuad,
            format!("quad addressed to {} contains unbound terms", graph),
        )
        .with_hint("variables and open functors belong in rule patterns, not stored statements")
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Create a rule error
    pub fn rule(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RuleError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add context to the error
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.fields.insert(key.into(), value.into());
        self
    }

    /// Add a cause to the error chain
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.causes.push(cause.into());
        self
    }

    /// Add a hint for resolving the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":"STORE_ERROR","message":"{}"}}"#, self.message)
        })
    }
}

impl fmt::Display for SemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;

        if let Some(ref ctx) = self.context {
            if !ctx.causes.is_empty() {
                write!(f, "\nCaused by:")?;
                for cause in &ctx.causes {
                    write!(f, "\n  - {}", cause)?;
                }
            }
        }

        if let Some(ref hint) = self.hint {
            write!(f, "\nHint: {}", hint)?;
        }

        Ok(())
    }
}

impl std::error::Error for SemError {}

impl From<std::io::Error> for SemError {
    fn from(err: std::io::Error) -> Self {
        SemError::config(err.to_string())
    }
}

impl From<toml::de::Error> for SemError {
    fn from(err: toml::de::Error) -> Self {
        SemError::config(err.to_string())
    }
}

/// A Result type using SemError
pub type SemResult<T> = Result<T, SemError>;

// ============================================================================
// Tests
// ============================================================================
