//! Error types for template validation.

use thiserror::Error;

/// Errors reported by [`validate_template`](crate::validate_template).
///
/// Rendering itself never fails; these diagnostics exist so callers can
/// reject malformed templates at registration time instead of getting
/// best-effort output later.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// An opening block tag without a matching closing tag, or vice versa.
    #[error("unbalanced {{{{#{construct}}}}} block: {open} opened, {close} closed")]
    UnbalancedBlock {
        construct: &'static str,
        open: usize,
        close: usize,
    },

    /// A block of one kind opened inside another block of the same kind.
    #[error("nested {{{{#{construct}}}}} blocks are not supported")]
    NestedBlock { construct: &'static str },
}

/// Result type for template validation.
pub type Result<T> = std::result::Result<T, TemplateError>;
