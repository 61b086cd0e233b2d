//! The rendering-layer collaborator interface.
//!
//! The toolkit never touches a DOM, a widget tree, or a compositor; it
//! asks the host's rendering layer for geometry and hit-test answers and
//! hands back visual commands through [`SortableView`]. Hit testing is an
//! explicit resolution to a [`HitTarget`] instead of any kind of ancestor
//! walk: the renderer already knows which item or list sits under a point.
//!
//! Every visual method defaults to a no-op and every query to "nothing
//! there", so a headless host (or a test) only implements what it renders.

use horizon_sortable_core::Point;

use crate::model::{ItemHandle, ListId};
use crate::position::{ElementOffset, ElementRect, ScrollOffsets};
use crate::session::DragSource;

/// What the renderer found under a pointer position.
pub enum HitTarget<T> {
    /// An item's interactive region.
    Item(ItemHandle<T>),
    /// A list's own region, outside any item (the empty area).
    List(ListId),
}

impl<T> Clone for HitTarget<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Item(handle) => Self::Item(handle.clone()),
            Self::List(list) => Self::List(*list),
        }
    }
}

/// Where the placeholder should sit.
pub enum PlaceholderPosition<T> {
    /// Immediately before the target item.
    Before(ItemHandle<T>),
    /// Immediately after the target item.
    After(ItemHandle<T>),
    /// Appended at the end of a list.
    Append(ListId),
}

impl<T> Clone for PlaceholderPosition<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Before(handle) => Self::Before(handle.clone()),
            Self::After(handle) => Self::After(handle.clone()),
            Self::Append(list) => Self::Append(*list),
        }
    }
}

/// Geometry queries and visual commands the toolkit exchanges with the
/// rendering layer during a gesture.
pub trait SortableView<T> {
    /// Current scroll state for offset normalization.
    fn scroll_offsets(&self) -> ScrollOffsets {
        ScrollOffsets::default()
    }

    /// Bounding rect of an item's element.
    fn element_rect(&self, _handle: &ItemHandle<T>) -> ElementRect {
        ElementRect::default()
    }

    /// Bounds the ghost is confined to, if any.
    fn containment_rect(&self) -> Option<ElementOffset> {
        None
    }

    /// Current extent of the ghost container (used for clamping).
    fn ghost_rect(&self) -> ElementOffset {
        ElementOffset::default()
    }

    /// Resolve what sits under a page-coordinate point.
    fn hit_test(&self, _point: Point) -> Option<HitTarget<T>> {
        None
    }

    /// Index of the placeholder among a list's child elements, or `None`
    /// when no placeholder currently sits in that list.
    fn placeholder_index(&self, _list: ListId) -> Option<usize> {
        None
    }

    /// Build the drag ghost representation for one source.
    fn create_ghost(&mut self, _source: &DragSource<T>) {}

    /// Build the placeholder representation for one source.
    fn create_placeholder(&mut self, _source: &DragSource<T>) {}

    /// Move the placeholder to a new position.
    fn place_placeholder(&mut self, _position: PlaceholderPosition<T>) {}

    /// Move the ghost container's top-left.
    fn move_ghost(&mut self, _position: Point) {}

    /// Tear down ghost and placeholder visuals at the end of a gesture.
    fn teardown_drag(&mut self, _sources: &[DragSource<T>]) {}
}
