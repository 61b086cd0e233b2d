//! Error types for Horizon Sortable.

use thiserror::Error;

/// The main error type for Horizon Sortable operations.
///
/// Most toolkit operations are defensive and report "not found" conditions
/// through `Option` sentinels instead of errors; this type covers the few
/// APIs where misuse is detectable and worth surfacing.
#[derive(Error, Debug)]
pub enum SortableError {
    /// No pending debounce task exists for the given signature.
    #[error("no pending debounce task for signature: {0}")]
    UnknownDebounceSignature(String),

    /// The list is no longer registered with its group.
    #[error("list is not registered with this group")]
    ListNotFound,
}

/// A specialized Result type for Horizon Sortable operations.
pub type Result<T> = std::result::Result<T, SortableError>;
