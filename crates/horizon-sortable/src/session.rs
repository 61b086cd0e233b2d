//! Per-gesture drag state.
//!
//! A [`DragSession`] exists for exactly one gesture: it is created when the
//! movement threshold is crossed, mutated on every pointer move, and
//! consumed on drop or cancel. It snapshots the selection as its sources,
//! tracks the pending destination (list + index, both unset until a valid
//! drop target is hovered), and carries the rolling
//! [`ItemPosition`] for ghost placement.
//!
//! The destination index is an `Option` on purpose: index 0 is a real
//! destination and must not be conflated with "never hovered a target".

use crate::events::{MoveArgs, MoveDestination, SourceInfo};
use crate::model::{ItemHandle, ListId, ListRegistry};
use crate::position::ItemPosition;

/// One dragged item plus its resolved cloning mode.
pub struct DragSource<T> {
    handle: ItemHandle<T>,
    cloning: bool,
}

impl<T> DragSource<T> {
    /// Bind a handle with its cloning mode for this gesture.
    pub fn new(handle: ItemHandle<T>, cloning: bool) -> Self {
        Self { handle, cloning }
    }

    /// The dragged item's handle.
    pub fn handle(&self) -> &ItemHandle<T> {
        &self.handle
    }

    /// Whether this source clones instead of moving.
    pub fn is_cloning(&self) -> bool {
        self.cloning
    }
}

impl<T> Clone for DragSource<T> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            cloning: self.cloning,
        }
    }
}

/// The state of one drag gesture.
pub struct DragSession<T> {
    sources: Vec<DragSource<T>>,
    dest_list: Option<ListId>,
    dest_index: Option<usize>,
    position: ItemPosition,
}

impl<T> DragSession<T> {
    /// Open a session over the given sources.
    pub fn new(sources: Vec<DragSource<T>>, position: ItemPosition) -> Self {
        Self {
            sources,
            dest_list: None,
            dest_index: None,
            position,
        }
    }

    /// The sources being dragged, in selection order.
    pub fn sources(&self) -> &[DragSource<T>] {
        &self.sources
    }

    /// The pending destination list, if a target has been hovered.
    pub fn dest_list(&self) -> Option<ListId> {
        self.dest_list
    }

    /// The pending destination index, if a target has been hovered.
    pub fn dest_index(&self) -> Option<usize> {
        self.dest_index
    }

    /// The rolling movement state.
    pub fn position(&self) -> &ItemPosition {
        &self.position
    }

    /// Mutable access to the rolling movement state.
    pub fn position_mut(&mut self) -> &mut ItemPosition {
        &mut self.position
    }

    /// Whether a source's origin list is the pending destination.
    ///
    /// Before any target has been hovered this is vacuously true.
    pub fn is_same_list(&self, source: &DragSource<T>) -> bool {
        match self.dest_list {
            None => true,
            Some(dest) => dest == source.handle().list(),
        }
    }

    /// Whether every source originates from the pending destination list.
    pub fn all_same_list(&self) -> bool {
        self.sources.iter().all(|source| self.is_same_list(source))
    }

    /// Whether committing would change any source's position.
    ///
    /// False while no destination index has been set; a destination index
    /// of 0 is a real destination and participates in the check.
    pub fn is_order_changed(&self, lists: &ListRegistry<T>) -> bool {
        let Some(index) = self.dest_index else {
            return false;
        };
        self.sources
            .iter()
            .any(|source| source.handle().index(lists) != Some(index))
    }

    /// Set the pending destination from a raw hover index.
    ///
    /// Sources that currently sit in the destination list before the raw
    /// index and will be removed (not cloning) vacate one slot each, so the
    /// effective index shifts down by their count.
    pub fn move_to(&mut self, lists: &ListRegistry<T>, dest: ListId, index: usize) {
        self.dest_list = Some(dest);
        let vacated = self
            .sources
            .iter()
            .filter(|source| {
                self.is_same_list(source)
                    && source
                        .handle()
                        .index(lists)
                        .is_some_and(|current| current < index)
                    && !source.is_cloning()
            })
            .count();
        self.dest_index = Some(index.saturating_sub(vacated));
    }

    /// Snapshot the callback payload: per-source current position plus the
    /// pending destination. Taken before reconciliation, so indices reflect
    /// the pre-move arrangement.
    pub fn event_args(&self, lists: &ListRegistry<T>) -> MoveArgs<T> {
        MoveArgs {
            sources: self
                .sources
                .iter()
                .map(|source| SourceInfo {
                    handle: source.handle().clone(),
                    index: source.handle().index(lists),
                    list: source.handle().list(),
                })
                .collect(),
            dest: MoveDestination {
                list: self.dest_list,
                index: self.dest_index,
            },
        }
    }
}
