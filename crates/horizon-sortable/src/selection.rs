//! Ordered multi-selection over a group's lists.
//!
//! The selection set holds item handles, unique by underlying item
//! identity, kept sorted ascending by `(row, column)` overall position.
//! Membership changes surface through the [`selected`](SelectionSet::selected)
//! and [`unselected`](SelectionSet::unselected) signals so the rendering
//! layer can restyle rows without the set knowing anything about it.

use horizon_sortable_core::Signal;

use crate::model::{ItemHandle, ItemKey, ListRegistry, OverallIndex};

/// Sort key for a handle whose item has vanished from its list; such
/// handles sink to the end until the host rebinds or removes them.
const ORPHAN_INDEX: OverallIndex = OverallIndex {
    row: usize::MAX,
    column: usize::MAX,
};

/// An ordered set of selected item handles.
pub struct SelectionSet<T> {
    handles: Vec<ItemHandle<T>>,
    /// Fired when a handle joins the selection.
    pub selected: Signal<ItemHandle<T>>,
    /// Fired when a handle leaves the selection.
    pub unselected: Signal<ItemHandle<T>>,
}

impl<T: 'static> SelectionSet<T> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
            selected: Signal::new(),
            unselected: Signal::new(),
        }
    }

    /// Add a handle to the selection.
    ///
    /// A no-op if the underlying item is already selected. Otherwise the
    /// handle is appended, the set re-sorted by overall position, and the
    /// `selected` signal fired. Returns whether the set changed.
    pub fn add(&mut self, handle: ItemHandle<T>, lists: &ListRegistry<T>) -> bool {
        if self.position_of(&handle).is_some() {
            return false;
        }
        self.handles.push(handle.clone());
        self.sort(lists);
        tracing::trace!(
            target: "horizon_sortable::selection",
            count = self.handles.len(),
            "handle selected"
        );
        self.selected.emit(handle);
        true
    }

    /// Remove a handle from the selection.
    ///
    /// Fires the `unselected` signal when the item was present; a no-op
    /// otherwise. Returns whether the set changed.
    pub fn remove(&mut self, handle: &ItemHandle<T>) -> bool {
        let Some(position) = self.position_of(handle) else {
            return false;
        };
        let removed = self.handles.remove(position);
        tracing::trace!(
            target: "horizon_sortable::selection",
            count = self.handles.len(),
            "handle unselected"
        );
        self.unselected.emit(removed);
        true
    }

    /// Remove every member, one at a time, so each fires its individual
    /// `unselected` signal. Returns the number removed.
    pub fn remove_all(&mut self) -> usize {
        let mut removed = 0;
        while let Some(first) = self.handles.first().cloned() {
            self.remove(&first);
            removed += 1;
        }
        removed
    }

    /// Remove the handle if selected, add it otherwise.
    pub fn toggle(&mut self, handle: ItemHandle<T>, lists: &ListRegistry<T>) {
        if !self.remove(&handle) {
            self.add(handle, lists);
        }
    }

    /// Whether the underlying item is selected (by identity).
    pub fn is_selected(&self, handle: &ItemHandle<T>) -> bool {
        self.position_of(handle).is_some()
    }

    /// Identity check with a stable-key fallback for recreated handles.
    ///
    /// When no identity match exists but a member's item carries
    /// `fallback`, that member is replaced in place by `handle` (and the
    /// set re-sorted), accommodating hosts that rebuild handles across
    /// re-renders while the selected row persists.
    pub fn is_selected_with_fallback(
        &mut self,
        handle: &ItemHandle<T>,
        fallback: Option<ItemKey>,
        lists: &ListRegistry<T>,
    ) -> bool {
        if self.position_of(handle).is_some() {
            return true;
        }
        let Some(key) = fallback else {
            return false;
        };
        let Some(position) = self
            .handles
            .iter()
            .position(|member| member.item().key() == key)
        else {
            return false;
        };
        self.handles[position] = handle.clone();
        self.sort(lists);
        true
    }

    /// Expand the selection to a contiguous range ending at `handle`.
    ///
    /// With an empty selection this is a plain add. If `handle` is already
    /// selected, nothing happens. When every selected handle shares
    /// `handle`'s list, every item between the lowest and highest selected
    /// column in that list joins the selection; a selection spanning
    /// several lists leaves the set untouched. Returns the number of
    /// handles added.
    pub fn expand_range_to(&mut self, handle: ItemHandle<T>, lists: &ListRegistry<T>) -> usize {
        if self.handles.is_empty() {
            return usize::from(self.add(handle, lists));
        }
        if self.is_selected(&handle) {
            return 0;
        }
        let list_id = handle.list();
        if self.handles.iter().any(|member| member.list() != list_id) {
            return 0;
        }

        let mut min = usize::MAX;
        let mut max = 0;
        for member in self.handles.iter().chain(std::iter::once(&handle)) {
            match member.index(lists) {
                Some(column) => {
                    min = min.min(column);
                    max = max.max(column);
                }
                None => return 0,
            }
        }

        let Some(list) = lists.get(list_id) else {
            return 0;
        };
        let range: Vec<ItemHandle<T>> = list.items()[min..=max]
            .iter()
            .map(|item| ItemHandle::new(item.clone(), list_id))
            .collect();

        let mut added = 0;
        for member in range {
            added += usize::from(self.add(member, lists));
        }
        added
    }

    /// The selected handles in `(row, column)` order.
    pub fn handles(&self) -> &[ItemHandle<T>] {
        &self.handles
    }

    /// Iterate the selected handles in order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemHandle<T>> {
        self.handles.iter()
    }

    /// Number of selected handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    fn position_of(&self, handle: &ItemHandle<T>) -> Option<usize> {
        self.handles
            .iter()
            .position(|member| member.same_item(handle))
    }

    fn sort(&mut self, lists: &ListRegistry<T>) {
        self.handles
            .sort_by_key(|member| member.overall_index(lists).unwrap_or(ORPHAN_INDEX));
    }
}

impl<T: 'static> Default for SelectionSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
