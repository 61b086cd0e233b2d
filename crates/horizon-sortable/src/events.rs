//! Callback surface for a group.
//!
//! Hosts connect to these signals to observe gestures and structural
//! changes. `drag_start`/`drag_move`/`drag_end`/`drag_cancel` track the
//! gesture itself; `order_changed` and `item_moved` describe the committed
//! structural change (exactly one of them fires per commit, or neither
//! when the drop landed back where it started); `selection_changed` is
//! debounced so a burst of selection edits collapses into one
//! notification.

use std::sync::Arc;

use horizon_sortable_core::{Point, Signal};

use crate::model::{ItemHandle, ListId};
use crate::position::{KeyboardModifiers, PointerInput};

/// Pointer context delivered with gesture callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    /// Pointer position in page coordinates.
    pub position: Point,
    /// Modifier state at the time of the event.
    pub modifiers: KeyboardModifiers,
}

impl From<&PointerInput> for DragEvent {
    fn from(input: &PointerInput) -> Self {
        Self {
            position: input.page,
            modifiers: input.modifiers,
        }
    }
}

/// Where one source sat when the drop committed.
pub struct SourceInfo<T> {
    /// The dragged item's handle.
    pub handle: ItemHandle<T>,
    /// The source's index at commit time (pre-move).
    pub index: Option<usize>,
    /// The source's origin list.
    pub list: ListId,
}

impl<T> Clone for SourceInfo<T> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            index: self.index,
            list: self.list,
        }
    }
}

/// The destination a drop committed to.
///
/// Both fields are `None` for a drop that never hovered a valid target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDestination {
    pub list: Option<ListId>,
    pub index: Option<usize>,
}

/// Payload for `order_changed` and `item_moved`.
pub struct MoveArgs<T> {
    /// Every dragged source with its pre-move position.
    pub sources: Vec<SourceInfo<T>>,
    /// The committed destination.
    pub dest: MoveDestination,
}

impl<T> Clone for MoveArgs<T> {
    fn clone(&self) -> Self {
        Self {
            sources: self.sources.clone(),
            dest: self.dest,
        }
    }
}

/// The signals a group fires toward its host.
pub struct GroupCallbacks<T> {
    /// The movement threshold was crossed and a session opened.
    pub drag_start: Signal<DragEvent>,
    /// Fired on every pointer move while dragging, valid target or not.
    pub drag_move: Signal<DragEvent>,
    /// The session committed (fires after `order_changed`/`item_moved`).
    pub drag_end: Signal<DragEvent>,
    /// The session was discarded without touching any list.
    pub drag_cancel: Signal<DragEvent>,
    /// Sources stayed within one list and their position changed.
    pub order_changed: Signal<MoveArgs<T>>,
    /// Sources landed in a different list.
    pub item_moved: Signal<MoveArgs<T>>,
    /// Debounced snapshot of the selection after edits settle. Shared so
    /// the deferred task can emit after the burst that scheduled it.
    pub selection_changed: Arc<Signal<Vec<ItemHandle<T>>>>,
}

impl<T: 'static> GroupCallbacks<T> {
    /// A callback set with nothing connected.
    pub fn new() -> Self {
        Self {
            drag_start: Signal::new(),
            drag_move: Signal::new(),
            drag_end: Signal::new(),
            drag_cancel: Signal::new(),
            order_changed: Signal::new(),
            item_moved: Signal::new(),
            selection_changed: Arc::new(Signal::new()),
        }
    }
}

impl<T: 'static> Default for GroupCallbacks<T> {
    fn default() -> Self {
        Self::new()
    }
}
