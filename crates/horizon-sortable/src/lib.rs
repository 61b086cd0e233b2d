//! Horizon Sortable - a drag-and-drop list reordering toolkit.
//!
//! The toolkit models N ordered lists of opaque application values with
//! drag and selection state layered on top: reorder items within a list,
//! move items between lists (optionally cloning them), multi-select, and
//! observe the resulting structural changes through callbacks. Rendering
//! is the host's job; the toolkit exchanges geometry and visual commands
//! with it through the [`SortableView`] trait.
//!
//! # Example
//!
//! ```
//! use horizon_sortable::{SortableGroup, SortableList};
//!
//! let mut group = SortableGroup::new();
//! let backlog = group.add_list(SortableList::new(0));
//! group.list_mut(backlog).unwrap().push("write docs".to_string());
//! group.list_mut(backlog).unwrap().push("ship it".to_string());
//!
//! // Observe selection membership.
//! group.selection().selected.connect(|handle| {
//!     println!("selected: {}", handle.item().value());
//! });
//!
//! let first = group.handle(backlog, 0).unwrap();
//! group.add_to_selection(first);
//! assert_eq!(group.selected_handles().len(), 1);
//! ```
//!
//! Driving a full gesture takes a [`SortableView`] implementation from the
//! rendering layer:
//!
//! ```ignore
//! group.pointer_down(&handle, &input);
//! group.pointer_move(&moved, &mut view);   // threshold crossed: drag starts
//! group.pointer_up(&released, &mut view);  // lists reconcile, callbacks fire
//! ```

pub use horizon_sortable_core::{
    ConnectionGuard, ConnectionId, Debouncer, Point, Rect, Result, Signal, Size, SortableError,
    logging,
};

pub mod bus;
pub mod events;
pub mod group;
pub mod model;
pub mod options;
pub mod position;
pub mod reconcile;
pub mod selection;
pub mod session;
pub mod view;

pub use bus::{EventBus, GroupCommand, GroupResponse};
pub use events::{DragEvent, GroupCallbacks, MoveArgs, MoveDestination, SourceInfo};
pub use group::{
    CLICK_THRESHOLD, DRAG_START_THRESHOLD, SELECTION_SETTLE_DELAY, SortableGroup,
};
pub use model::{Item, ItemHandle, ItemKey, ListId, ListRegistry, OverallIndex, SortableList};
pub use options::{Placeholder, SortableOptions};
pub use position::{
    Axis, ContainerPositioning, ElementOffset, ElementRect, ItemPosition, KeyboardModifiers,
    MouseButton, PointerInput, ScrollOffsets, offset,
};
pub use selection::SelectionSet;
pub use session::{DragSession, DragSource};
pub use view::{HitTarget, PlaceholderPosition, SortableView};
