//! Error types for the component framework.
//!
//! Almost nothing in the render pipeline is an error: unresolvable template
//! paths render as nothing, unknown event methods and pipes degrade to a
//! logged warning. `ComponentError` covers the remaining genuine API
//! misuse.

use thiserror::Error;

/// Errors from the component registry and instantiation surface.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// No component definition registered under the given tag name.
    #[error("no component registered for tag <{0}>")]
    UnknownTag(String),
}

/// Result type for framework operations.
pub type Result<T> = std::result::Result<T, ComponentError>;
