//! Logging facilities for Horizon Sortable.
//!
//! Horizon Sortable uses the `tracing` crate for instrumentation. To see
//! logs, install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Most toolkit logging is at `trace` level and scoped to a per-subsystem
//! target, so a filter directive such as
//! `horizon_sortable::group=trace` surfaces one subsystem at a time.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal emission.
    pub const SIGNAL: &str = "horizon_sortable_core::signal";
    /// Debounce scheduling and firing.
    pub const DEBOUNCE: &str = "horizon_sortable_core::debounce";
    /// Group gesture state machine.
    pub const GROUP: &str = "horizon_sortable::group";
    /// Selection set mutations.
    pub const SELECTION: &str = "horizon_sortable::selection";
    /// Move reconciliation.
    pub const RECONCILE: &str = "horizon_sortable::reconcile";
    /// Event bus publishes.
    pub const BUS: &str = "horizon_sortable::bus";
}
