//! Core systems for Horizon Sortable.
//!
//! This crate provides the foundational components of the Horizon Sortable
//! drag-and-drop toolkit:
//!
//! - **Geometry primitives**: [`Point`], [`Size`], [`Rect`]
//! - **Signal/Slot System**: Type-safe callback dispatch via [`Signal`]
//! - **Debounce Scheduler**: Signature-keyed deferred tasks via [`Debouncer`]
//! - **Error Types**: [`SortableError`] and the crate [`Result`] alias
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_sortable_core::Signal;
//!
//! // Create a signal that notifies when the selection count changes
//! let count_changed = Signal::<usize>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = count_changed.connect(|count| {
//!     println!("Selection now holds {} items", count);
//! });
//!
//! // Emit the signal
//! count_changed.emit(3);
//!
//! // Disconnect when done
//! count_changed.disconnect(conn_id);
//! ```
//!
//! # Debounce Example
//!
//! ```
//! use horizon_sortable_core::Debouncer;
//! use std::time::Duration;
//!
//! let mut debounce = Debouncer::new();
//!
//! // Re-scheduling the same signature replaces the pending task, so only
//! // the last call within the quiet period fires.
//! debounce.call("selectionChanged", Duration::ZERO, || println!("first"));
//! debounce.call("selectionChanged", Duration::ZERO, || println!("last"));
//!
//! assert_eq!(debounce.process_expired(), 1); // prints "last"
//! ```

mod debounce;
mod error;
pub mod logging;
mod signal;
mod types;

pub use debounce::Debouncer;
pub use error::{Result, SortableError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use types::{Point, Rect, Size};
