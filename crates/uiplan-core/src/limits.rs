//! Bounds applied to plan trees.
//!
//! Three depth caps exist and must stay separate constants:
//!
//! - [`SANITIZE_MAX_DEPTH`] guards recursion over untrusted input. Nodes below
//!   it are dropped by the sanitizer.
//! - [`DEFAULT_MAX_DEPTH`] is the product shape enforced by the limiter.
//! - [`EXPLAIN_MAX_DEPTH`] caps how deep the explanation text describes a tree.
//!
//! Depth 0 is always the plan's top-level components.
//!
//! The component count has two bounds as well: the schema rejects plans with
//! more than [`SCHEMA_MAX_COMPONENTS`] top-level components, while the limiter
//! truncates to [`Limits::max_components`] without failing.

use serde::{Deserialize, Serialize};

pub const SANITIZE_MAX_DEPTH: usize = 5;
pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const EXPLAIN_MAX_DEPTH: usize = 5;

pub const SCHEMA_MAX_COMPONENTS: usize = 30;
pub const DEFAULT_MAX_COMPONENTS: usize = 20;

/// Prop values are truncated to this many characters.
pub const MAX_PROP_CHARS: usize = 100;

pub const DEFAULT_MAX_PROMPT_CHARS: usize = 1000;
pub const DEFAULT_MAX_EXPLANATION_CHARS: usize = 5000;

/// Configurable bounds for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_components: usize,
    pub max_depth: usize,
    pub explain_max_depth: usize,
    pub max_prompt_chars: usize,
    pub max_explanation_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_components: DEFAULT_MAX_COMPONENTS,
            max_depth: DEFAULT_MAX_DEPTH,
            explain_max_depth: EXPLAIN_MAX_DEPTH,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            max_explanation_chars: DEFAULT_MAX_EXPLANATION_CHARS,
        }
    }
}
