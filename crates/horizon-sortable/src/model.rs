//! Data model for sortable lists.
//!
//! The model is deliberately small: a group coordinates N ordered lists of
//! opaque application values. [`Item`] wraps one value behind an `Arc` so
//! the toolkit can track it by identity while the host keeps full ownership
//! of the payload type. [`ItemHandle`] is the live binding between an item
//! and the list it currently sits in; its index is always resolved against
//! the current list contents, so handles never go stale between moves.
//!
//! Hosts that rebuild their view (and therefore their handles) on every
//! render keep selection stable through [`ItemKey`]: assign a key once per
//! logical row (`Item::with_key`) and the selection set will rebind a
//! recreated handle to the surviving entry.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::{SlotMap, new_key_type};

use crate::options::SortableOptions;

new_key_type! {
    /// A unique identifier for a list registered with a group.
    pub struct ListId;
}

/// The table of lists a group coordinates.
pub type ListRegistry<T> = SlotMap<ListId, SortableList<T>>;

/// Counter backing [`ItemKey`] allocation.
static NEXT_ITEM_KEY: AtomicU64 = AtomicU64::new(1);

/// A stable identity key for an item value.
///
/// Keys survive re-renders: when the host recreates its `Item` wrappers
/// (for example after deserializing a model), constructing them with the
/// same key lets the selection set recognize them as the same logical row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey(u64);

impl ItemKey {
    /// Allocate a fresh, process-unique key.
    pub fn next() -> Self {
        Self(NEXT_ITEM_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

struct ItemInner<T> {
    key: ItemKey,
    value: T,
}

/// An opaque application value participating in drag and drop.
///
/// Identity is by reference: two `Item`s are [`same`](Self::same) only if
/// they share the underlying allocation. [`deep_copy`](Self::deep_copy)
/// produces a value-equal but reference-distinct copy with a fresh key,
/// which is what cloning drops insert.
pub struct Item<T> {
    inner: Arc<ItemInner<T>>,
}

impl<T> Item<T> {
    /// Wrap a value with a freshly allocated key.
    pub fn new(value: T) -> Self {
        Self::with_key(value, ItemKey::next())
    }

    /// Wrap a value with an explicit key.
    ///
    /// Use this when rebuilding items across re-renders so the key stays
    /// stable for the same logical row.
    pub fn with_key(value: T, key: ItemKey) -> Self {
        Self {
            inner: Arc::new(ItemInner { key, value }),
        }
    }

    /// The stable identity key.
    pub fn key(&self) -> ItemKey {
        self.inner.key
    }

    /// The wrapped application value.
    pub fn value(&self) -> &T {
        &self.inner.value
    }

    /// Reference identity: true only if both wrap the same allocation.
    pub fn same(&self, other: &Item<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> Item<T> {
    /// A value-equal, reference-distinct copy with a fresh key.
    pub fn deep_copy(&self) -> Item<T> {
        Item::new(self.inner.value.clone())
    }
}

impl<T> Clone for Item<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.inner.key)
            .field("value", &self.inner.value)
            .finish()
    }
}

/// An item's global position across a group's lists.
///
/// Lists are arranged in rows; the column is the item's index within its
/// list. The derived ordering (row first, column as tiebreak) is the
/// ordering the selection set maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverallIndex {
    pub row: usize,
    pub column: usize,
}

/// The live binding between an [`Item`] and the list it currently sits in.
///
/// Handles are cheap to clone and never cache an index; position queries
/// resolve against the current list contents.
pub struct ItemHandle<T> {
    item: Item<T>,
    list: ListId,
}

impl<T> ItemHandle<T> {
    /// Bind an item to its owning list.
    pub fn new(item: Item<T>, list: ListId) -> Self {
        Self { item, list }
    }

    /// The bound item.
    pub fn item(&self) -> &Item<T> {
        &self.item
    }

    /// The owning list.
    pub fn list(&self) -> ListId {
        self.list
    }

    /// Whether both handles bind the same underlying item.
    pub fn same_item(&self, other: &ItemHandle<T>) -> bool {
        self.item.same(&other.item)
    }

    /// The item's current index within its list, or `None` if the list is
    /// gone or no longer contains the item.
    pub fn index(&self, lists: &ListRegistry<T>) -> Option<usize> {
        lists.get(self.list)?.index_of(&self.item)
    }

    /// The item's `(row, column)` position across the group.
    pub fn overall_index(&self, lists: &ListRegistry<T>) -> Option<OverallIndex> {
        let list = lists.get(self.list)?;
        Some(OverallIndex {
            row: list.row(),
            column: list.index_of(&self.item)?,
        })
    }
}

impl<T> Clone for ItemHandle<T> {
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            list: self.list,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ItemHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemHandle")
            .field("item", &self.item)
            .field("list", &self.list)
            .finish()
    }
}

/// One ordered list participating in drag and drop.
#[derive(Debug)]
pub struct SortableList<T> {
    items: Vec<Item<T>>,
    options: SortableOptions,
    row: usize,
    disabled: bool,
}

impl<T> SortableList<T> {
    /// Create an empty list at the given row.
    pub fn new(row: usize) -> Self {
        Self::with_options(row, SortableOptions::default())
    }

    /// Create an empty list at the given row with explicit options.
    pub fn with_options(row: usize, options: SortableOptions) -> Self {
        Self {
            items: Vec::new(),
            options,
            row,
            disabled: false,
        }
    }

    /// Append a host-owned value, returning the item that now represents it.
    ///
    /// This is the population path for hosts building up their model; drops
    /// go through [`insert_item`](Self::insert_item) instead.
    pub fn push(&mut self, value: T) -> Item<T> {
        let item = Item::new(value);
        self.items.push(item.clone());
        item
    }

    /// Remove an item by identity.
    ///
    /// Returns the removed item, or `None` when the list does not contain
    /// it (a no-op, never an error).
    pub fn remove_item(&mut self, item: &Item<T>) -> Option<Item<T>> {
        let index = self.index_of(item)?;
        Some(self.items.remove(index))
    }

    /// The index of an item by identity.
    pub fn index_of(&self, item: &Item<T>) -> Option<usize> {
        self.items.iter().position(|candidate| candidate.same(item))
    }

    /// Whether the list contains an item by identity.
    pub fn contains(&self, item: &Item<T>) -> bool {
        self.index_of(item).is_some()
    }

    /// The item at `index`.
    pub fn get(&self, index: usize) -> Option<&Item<T>> {
        self.items.get(index)
    }

    /// The items in order.
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The list's options.
    pub fn options(&self) -> &SortableOptions {
        &self.options
    }

    /// Mutable access to the list's options.
    pub fn options_mut(&mut self) -> &mut SortableOptions {
        &mut self.options
    }

    /// The row this list occupies in the group's arrangement.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Move the list to a different row.
    pub fn set_row(&mut self, row: usize) {
        self.row = row;
    }

    /// Whether drags may start from this list.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable drag arming on this list.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

impl<T: Clone> SortableList<T> {
    /// Insert an item at `index` (clamped to the current length).
    ///
    /// When the list allows duplicates a deep copy is inserted, so a value
    /// dropped back onto a list that already holds it yields an
    /// independent entry.
    pub fn insert_item(&mut self, index: usize, item: Item<T>) {
        let index = index.min(self.items.len());
        if self.options.allow_duplicates {
            self.items.insert(index, item.deep_copy());
        } else {
            self.items.insert(index, item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_identity() {
        let a = Item::new("alpha");
        let b = a.clone();
        let c = Item::new("alpha");

        assert!(a.same(&b));
        assert!(!a.same(&c)); // equal values, distinct allocations
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_deep_copy_is_reference_distinct() {
        let original = Item::new(vec![1, 2, 3]);
        let copy = original.deep_copy();

        assert!(!original.same(&copy));
        assert_ne!(original.key(), copy.key());
        assert_eq!(original.value(), copy.value());
    }

    #[test]
    fn test_item_with_key_preserves_key() {
        let key = ItemKey::next();
        let first = Item::with_key("row", key);
        let rebuilt = Item::with_key("row", key);

        assert!(!first.same(&rebuilt));
        assert_eq!(first.key(), rebuilt.key());
    }

    #[test]
    fn test_remove_item_not_found() {
        let mut list = SortableList::new(0);
        list.push("a");
        let stranger = Item::new("a");

        assert!(list.remove_item(&stranger).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_item_preserves_order() {
        let mut list = SortableList::new(0);
        let _a = list.push("a");
        let b = list.push("b");
        let _c = list.push("c");

        let removed = list.remove_item(&b).unwrap();
        assert!(removed.same(&b));
        assert_eq!(
            list.items().iter().map(|i| *i.value()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
    }

    #[test]
    fn test_insert_item_clamps_index() {
        let mut list = SortableList::new(0);
        list.push("a");
        list.insert_item(100, Item::new("b"));

        assert_eq!(list.len(), 2);
        assert_eq!(*list.get(1).unwrap().value(), "b");
    }

    #[test]
    fn test_insert_with_allow_duplicates_copies() {
        let mut list = SortableList::new(0);
        list.options_mut().allow_duplicates = true;
        let item = Item::new("x");

        list.insert_item(0, item.clone());
        assert_eq!(list.len(), 1);
        // The stored entry is a copy, not the inserted reference.
        assert!(!list.get(0).unwrap().same(&item));
        assert_eq!(list.get(0).unwrap().value(), item.value());
    }

    #[test]
    fn test_handle_resolves_live_index() {
        let mut lists: ListRegistry<&str> = SlotMap::with_key();
        let id = lists.insert(SortableList::new(2));
        let a = lists[id].push("a");
        let b = lists[id].push("b");

        let handle = ItemHandle::new(b.clone(), id);
        assert_eq!(handle.index(&lists), Some(1));
        assert_eq!(
            handle.overall_index(&lists),
            Some(OverallIndex { row: 2, column: 1 })
        );

        lists[id].remove_item(&a);
        assert_eq!(handle.index(&lists), Some(0));
    }

    #[test]
    fn test_overall_index_ordering() {
        let earlier = OverallIndex { row: 0, column: 9 };
        let later = OverallIndex { row: 1, column: 0 };
        assert!(earlier < later);
        assert!(OverallIndex { row: 1, column: 0 } < OverallIndex { row: 1, column: 1 });
    }
}
