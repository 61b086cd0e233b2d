//! Move reconciliation: committing a drag session into the lists.
//!
//! Reconciliation runs exactly once, at drop, and turns the session's
//! pending destination into concrete removals and insertions. The whole
//! removal pass runs before the whole insertion pass so index arithmetic
//! for later sources is stable against earlier sources' removals.

use crate::model::ListRegistry;
use crate::session::DragSession;

/// Commit a session's pending destination into the lists.
///
/// 1. Every non-cloning source is removed from its origin list.
/// 2. Every source is inserted at the destination: the pending list (or
///    its own origin list when no destination was ever set) at the pending
///    index offset by its position in the batch (or its original index
///    when no destination was ever set, making a targetless drop a net
///    no-op).
///
/// Non-cloned inserts are skipped when the destination already holds the
/// item and duplicates are not allowed. Cloning sources insert a deep copy
/// instead, unless the destination itself is clone-configured (such lists
/// hand out copies but refuse drops).
pub fn apply<T: Clone>(session: &DragSession<T>, lists: &mut ListRegistry<T>) {
    // Original indices, captured before anything is removed.
    let original_index: Vec<Option<usize>> = session
        .sources()
        .iter()
        .map(|source| source.handle().index(lists))
        .collect();

    for source in session.sources() {
        if source.is_cloning() {
            continue;
        }
        if let Some(list) = lists.get_mut(source.handle().list()) {
            list.remove_item(source.handle().item());
        }
    }

    for (batch_position, source) in session.sources().iter().enumerate() {
        let dest_id = session.dest_list().unwrap_or(source.handle().list());
        let Some(dest) = lists.get_mut(dest_id) else {
            continue;
        };
        let index = match session.dest_index() {
            Some(index) => index + batch_position,
            None => original_index[batch_position].unwrap_or(dest.len()),
        };

        if !source.is_cloning() {
            if dest.options().allow_duplicates || !dest.contains(source.handle().item()) {
                dest.insert_item(index, source.handle().item().clone());
            }
        } else if !dest.options().clone {
            dest.insert_item(index, source.handle().item().deep_copy());
        }
    }

    tracing::debug!(
        target: "horizon_sortable::reconcile",
        sources = session.sources().len(),
        dest_set = session.dest_list().is_some(),
        "session reconciled"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemHandle, ListId, SortableList};
    use crate::position::{ElementOffset, ItemPosition, PointerInput};
    use crate::session::DragSource;
    use horizon_sortable_core::Point;
    use slotmap::SlotMap;

    fn registry_with(counts: &[usize]) -> (ListRegistry<String>, Vec<ListId>) {
        let mut lists: ListRegistry<String> = SlotMap::with_key();
        let mut ids = Vec::new();
        for (row, &count) in counts.iter().enumerate() {
            let id = lists.insert(SortableList::new(row));
            for column in 0..count {
                lists[id].push(format!("{row}-{column}"));
            }
            ids.push(id);
        }
        (lists, ids)
    }

    fn session_for(
        lists: &ListRegistry<String>,
        picks: &[(ListId, usize, bool)],
    ) -> DragSession<String> {
        let sources = picks
            .iter()
            .map(|&(list, index, cloning)| {
                DragSource::new(
                    ItemHandle::new(lists[list].get(index).unwrap().clone(), list),
                    cloning,
                )
            })
            .collect();
        DragSession::new(
            sources,
            ItemPosition::started(&PointerInput::new(Point::ZERO), &ElementOffset::default()),
        )
    }

    fn values(lists: &ListRegistry<String>, id: ListId) -> Vec<String> {
        lists[id].items().iter().map(|i| i.value().clone()).collect()
    }

    #[test]
    fn test_empty_sources_is_noop() {
        let (mut lists, ids) = registry_with(&[3]);
        let session = session_for(&lists, &[]);

        apply(&session, &mut lists);
        assert_eq!(values(&lists, ids[0]), vec!["0-0", "0-1", "0-2"]);
    }

    #[test]
    fn test_reorder_within_list_to_front() {
        let (mut lists, ids) = registry_with(&[5]);
        let mut session = session_for(&lists, &[(ids[0], 2, false)]);
        session.move_to(&lists, ids[0], 0);

        assert!(session.is_order_changed(&lists));
        apply(&session, &mut lists);

        assert_eq!(
            values(&lists, ids[0]),
            vec!["0-2", "0-0", "0-1", "0-3", "0-4"]
        );
        assert_eq!(lists[ids[0]].len(), 5);
    }

    #[test]
    fn test_move_to_empty_list() {
        let (mut lists, ids) = registry_with(&[4, 0]);
        let mut session = session_for(&lists, &[(ids[0], 1, false)]);
        session.move_to(&lists, ids[1], 0);

        apply(&session, &mut lists);

        assert_eq!(values(&lists, ids[0]), vec!["0-0", "0-2", "0-3"]);
        assert_eq!(values(&lists, ids[1]), vec!["0-1"]);
    }

    #[test]
    fn test_clone_into_other_list() {
        let (mut lists, ids) = registry_with(&[3, 1]);
        let dragged = lists[ids[0]].get(0).unwrap().clone();
        let mut session = session_for(&lists, &[(ids[0], 0, true)]);
        session.move_to(&lists, ids[1], 1);

        apply(&session, &mut lists);

        // Source list untouched.
        assert_eq!(values(&lists, ids[0]), vec!["0-0", "0-1", "0-2"]);
        // Destination got a value-equal but reference-distinct copy.
        assert_eq!(values(&lists, ids[1]), vec!["1-0", "0-0"]);
        let inserted = lists[ids[1]].get(1).unwrap();
        assert!(!inserted.same(&dragged));
        assert_eq!(inserted.value(), dragged.value());
    }

    #[test]
    fn test_clone_into_clone_configured_list_is_discarded() {
        let (mut lists, ids) = registry_with(&[3, 1]);
        lists[ids[1]].options_mut().clone = true;
        let mut session = session_for(&lists, &[(ids[0], 0, true)]);
        session.move_to(&lists, ids[1], 0);

        apply(&session, &mut lists);

        assert_eq!(values(&lists, ids[0]), vec!["0-0", "0-1", "0-2"]);
        assert_eq!(values(&lists, ids[1]), vec!["1-0"]);
    }

    #[test]
    fn test_multi_source_batch_preserves_relative_order() {
        let (mut lists, ids) = registry_with(&[4, 2]);
        let mut session = session_for(&lists, &[(ids[0], 0, false), (ids[0], 2, false)]);
        session.move_to(&lists, ids[1], 1);

        apply(&session, &mut lists);

        assert_eq!(values(&lists, ids[0]), vec!["0-1", "0-3"]);
        // Later batch members land one slot after earlier ones.
        assert_eq!(values(&lists, ids[1]), vec!["1-0", "0-0", "0-2", "1-1"]);
    }

    #[test]
    fn test_no_destination_reinserts_at_origin() {
        let (mut lists, ids) = registry_with(&[4]);
        let before = values(&lists, ids[0]);
        let session = session_for(&lists, &[(ids[0], 2, false)]);

        assert!(!session.is_order_changed(&lists));
        apply(&session, &mut lists);

        assert_eq!(values(&lists, ids[0]), before);
    }

    #[test]
    fn test_non_cloned_duplicate_insert_is_skipped() {
        // The destination already structurally contains the dragged item
        // (the same entry is shared across lists); without allow_duplicates
        // the insert must be skipped.
        let (mut lists, ids) = registry_with(&[2, 0]);
        let item = lists[ids[0]].get(0).unwrap().clone();
        lists[ids[1]].insert_item(0, item.clone());

        let mut session = session_for(&lists, &[(ids[0], 0, false)]);
        session.move_to(&lists, ids[1], 1);
        apply(&session, &mut lists);

        // Removed from the origin, but not inserted a second time.
        assert!(!lists[ids[0]].contains(&item));
        assert_eq!(lists[ids[1]].len(), 1);
        assert!(lists[ids[1]].contains(&item));
    }

    #[test]
    fn test_allow_duplicates_inserts_copy() {
        let (mut lists, ids) = registry_with(&[2, 1]);
        lists[ids[1]].options_mut().allow_duplicates = true;
        let item = lists[ids[0]].get(0).unwrap().clone();
        lists[ids[1]].insert_item(0, item.clone());
        assert_eq!(lists[ids[1]].len(), 2);

        let mut session = session_for(&lists, &[(ids[0], 0, false)]);
        session.move_to(&lists, ids[1], 2);
        apply(&session, &mut lists);

        // Duplicate allowed: the destination now holds both entries.
        assert_eq!(lists[ids[0]].len(), 1);
        assert_eq!(lists[ids[1]].len(), 3);
    }

    #[test]
    fn test_missing_destination_list_drops_nothing_else() {
        let (mut lists, ids) = registry_with(&[3, 1]);
        let mut session = session_for(&lists, &[(ids[0], 1, false)]);
        session.move_to(&lists, ids[1], 0);
        lists.remove(ids[1]);

        apply(&session, &mut lists);

        // The removal still happened; the insert had nowhere to go.
        assert_eq!(values(&lists, ids[0]), vec!["0-0", "0-2"]);
    }
}
