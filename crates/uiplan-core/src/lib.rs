pub mod field_path;
pub mod fingerprint;
pub mod issues;
pub mod limits;
pub mod plan;

pub use field_path::{FieldPath, FieldPathSegment};
pub use fingerprint::{plan_fingerprint, stable_hash_hex, stable_json_bytes};
pub use issues::{IssueSeverity, StructuredIssue};
pub use limits::{
    Limits, DEFAULT_MAX_COMPONENTS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPLANATION_CHARS,
    DEFAULT_MAX_PROMPT_CHARS, EXPLAIN_MAX_DEPTH, MAX_PROP_CHARS, SANITIZE_MAX_DEPTH,
    SCHEMA_MAX_COMPONENTS,
};
pub use plan::{Component, ComponentKind, Plan, Props, UnknownComponentKind, DEFAULT_LAYOUT};
