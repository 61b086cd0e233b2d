//! The group controller: gesture state machine and orchestration.
//!
//! A [`SortableGroup`] is the scope uniting the lists items can be dragged
//! between. It owns the list registry, the selection set, the single
//! active gesture (at most one drag session per group), the callback
//! signal set, and the debounce scheduler coalescing selection
//! notifications.
//!
//! The gesture state machine:
//!
//! ```text
//! Idle --pointer_down--> Armed --move past threshold--> Dragging
//!   Armed --pointer_up within click box--> Idle (click selection)
//!   Dragging --pointer_up--> reconcile, callbacks --> Idle
//!   Dragging --cancel--> discard visuals, no model change --> Idle
//! ```
//!
//! The host's integration layer feeds normalized pointer samples into
//! [`pointer_down`](SortableGroup::pointer_down),
//! [`pointer_move`](SortableGroup::pointer_move),
//! [`pointer_up`](SortableGroup::pointer_up), and
//! [`cancel_drag`](SortableGroup::cancel_drag), and pumps
//! [`process_pending`](SortableGroup::process_pending) for the debounced
//! notifications.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use slotmap::SlotMap;

use horizon_sortable_core::{ConnectionGuard, Debouncer, Point, Result, Signal, SortableError};

use crate::bus::{EventBus, GroupCommand, GroupResponse, channels};
use crate::events::{DragEvent, GroupCallbacks};
use crate::model::{ItemHandle, ItemKey, ListId, ListRegistry, SortableList};
use crate::position::{ContainerPositioning, ItemPosition, PointerInput, offset};
use crate::reconcile;
use crate::selection::SelectionSet;
use crate::session::{DragSession, DragSource};
use crate::view::{HitTarget, PlaceholderPosition, SortableView};

/// Manhattan distance (|dx| + |dy|) a pointer must travel from its
/// pointer-down position before a drag session opens.
pub const DRAG_START_THRESHOLD: f32 = 10.0;

/// Per-axis distance within which a down/up pair still counts as a click.
pub const CLICK_THRESHOLD: f32 = 10.0;

/// Quiet period after which coalesced selection changes are reported.
pub const SELECTION_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Debounce signature for the selection-changed notification.
const SELECTION_CHANGED_SIGNATURE: &str = "selectionChanged";

/// The group's single gesture slot.
enum Gesture<T> {
    /// No gesture in progress.
    Idle,
    /// Pointer is down over a handle; no visual or model effect yet.
    Armed { start: Point, handle: ItemHandle<T> },
    /// A drag session is active.
    Dragging { session: DragSession<T> },
}

/// The scope coordinating lists, selection, and the active drag.
pub struct SortableGroup<T> {
    lists: ListRegistry<T>,
    selection: SelectionSet<T>,
    callbacks: GroupCallbacks<T>,
    debounce: Debouncer,
    gesture: Gesture<T>,
    selection_settle_delay: Duration,
}

impl<T: Clone + Send + Sync + 'static> SortableGroup<T> {
    /// Create an empty group.
    pub fn new() -> Self {
        Self {
            lists: SlotMap::with_key(),
            selection: SelectionSet::new(),
            callbacks: GroupCallbacks::new(),
            debounce: Debouncer::new(),
            gesture: Gesture::Idle,
            selection_settle_delay: SELECTION_SETTLE_DELAY,
        }
    }

    // -------------------------------------------------------------------------
    // List management
    // -------------------------------------------------------------------------

    /// Register a list with the group.
    pub fn add_list(&mut self, list: SortableList<T>) -> ListId {
        self.lists.insert(list)
    }

    /// Unregister a list, dropping any of its entries from the selection.
    pub fn remove_list(&mut self, id: ListId) -> Result<SortableList<T>> {
        let list = self.lists.remove(id).ok_or(SortableError::ListNotFound)?;
        let orphaned: Vec<ItemHandle<T>> = self
            .selection
            .iter()
            .filter(|handle| handle.list() == id)
            .cloned()
            .collect();
        for handle in &orphaned {
            self.selection.remove(handle);
        }
        if !orphaned.is_empty() {
            self.notify_selection_changed();
        }
        Ok(list)
    }

    /// A registered list.
    pub fn list(&self, id: ListId) -> Option<&SortableList<T>> {
        self.lists.get(id)
    }

    /// Mutable access to a registered list.
    pub fn list_mut(&mut self, id: ListId) -> Option<&mut SortableList<T>> {
        self.lists.get_mut(id)
    }

    /// The full list registry.
    pub fn lists(&self) -> &ListRegistry<T> {
        &self.lists
    }

    /// Mint a handle for the item currently at `index` in `list`.
    pub fn handle(&self, list: ListId, index: usize) -> Option<ItemHandle<T>> {
        Some(ItemHandle::new(
            self.lists.get(list)?.get(index)?.clone(),
            list,
        ))
    }

    // -------------------------------------------------------------------------
    // Callbacks, selection, and state queries
    // -------------------------------------------------------------------------

    /// The group's callback signal set.
    pub fn callbacks(&self) -> &GroupCallbacks<T> {
        &self.callbacks
    }

    /// The selection set (connect to its `selected`/`unselected` signals
    /// for per-item visual effects).
    pub fn selection(&self) -> &SelectionSet<T> {
        &self.selection
    }

    /// Snapshot of the selected handles in overall order.
    pub fn selected_handles(&self) -> Vec<ItemHandle<T>> {
        self.selection.handles().to_vec()
    }

    /// Whether a drag session is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// Replace the quiet period for coalesced selection notifications.
    pub fn set_selection_settle_delay(&mut self, delay: Duration) {
        self.selection_settle_delay = delay;
    }

    // -------------------------------------------------------------------------
    // Selection operations
    // -------------------------------------------------------------------------

    /// Add a handle to the selection.
    pub fn add_to_selection(&mut self, handle: ItemHandle<T>) {
        if self.selection.add(handle, &self.lists) {
            self.notify_selection_changed();
        }
    }

    /// Remove a handle from the selection.
    pub fn remove_from_selection(&mut self, handle: &ItemHandle<T>) {
        if self.selection.remove(handle) {
            self.notify_selection_changed();
        }
    }

    /// Toggle a handle's membership.
    pub fn toggle_selection(&mut self, handle: ItemHandle<T>) {
        self.selection.toggle(handle, &self.lists);
        self.notify_selection_changed();
    }

    /// Clear the selection, unselecting members one at a time.
    pub fn deselect_all(&mut self) {
        if self.selection.remove_all() > 0 {
            self.notify_selection_changed();
        }
    }

    /// Expand the selection to a contiguous same-list range ending at
    /// `handle`.
    pub fn expand_selection_to(&mut self, handle: ItemHandle<T>) {
        if self.selection.expand_range_to(handle, &self.lists) > 0 {
            self.notify_selection_changed();
        }
    }

    /// Re-establish a recreated handle's selected state after a re-render.
    ///
    /// Checks membership by identity with `fallback` as the stable-key
    /// fallback; on a match the stored handle is rebound and the
    /// `selected` signal re-fired so the renderer can restore the visual
    /// state. Returns whether the handle is selected.
    pub fn rebind_handle(&mut self, handle: &ItemHandle<T>, fallback: Option<ItemKey>) -> bool {
        let selected = self
            .selection
            .is_selected_with_fallback(handle, fallback, &self.lists);
        if selected {
            self.selection.selected.emit(handle.clone());
        }
        selected
    }

    fn notify_selection_changed(&mut self) {
        let snapshot = self.selection.handles().to_vec();
        let signal = Arc::clone(&self.callbacks.selection_changed);
        self.debounce.call(
            SELECTION_CHANGED_SIGNATURE,
            self.selection_settle_delay,
            move || signal.emit(snapshot),
        );
    }

    // -------------------------------------------------------------------------
    // Pointer flow
    // -------------------------------------------------------------------------

    /// Pointer-down over an item's handle region.
    ///
    /// Arms a gesture and applies click-to-select: a plain press on an
    /// unselected item replaces the selection with it. Secondary buttons,
    /// multi-touch, disabled lists, and presses while a session is already
    /// active never arm.
    pub fn pointer_down(&mut self, handle: &ItemHandle<T>, input: &PointerInput) {
        if self.is_dragging() {
            tracing::trace!(
                target: "horizon_sortable::group",
                "pointer down ignored while a session is active"
            );
            return;
        }
        if !input.is_primary() || input.is_multi_touch() {
            return;
        }
        if self
            .lists
            .get(handle.list())
            .is_none_or(|list| list.is_disabled())
        {
            return;
        }

        self.gesture = Gesture::Armed {
            start: input.page,
            handle: handle.clone(),
        };

        if !input.modifiers.command_like() && !self.selection.is_selected(handle) {
            self.deselect_all();
            self.add_to_selection(handle.clone());
        }
    }

    /// Pointer movement.
    ///
    /// While armed, crossing the movement threshold opens the drag
    /// session; while dragging, the session's pending destination is
    /// re-derived from a fresh hit test.
    pub fn pointer_move(&mut self, input: &PointerInput, view: &mut dyn SortableView<T>) {
        let crossed = match &self.gesture {
            Gesture::Armed { start, handle }
                if input.page.manhattan_distance(*start) > DRAG_START_THRESHOLD =>
            {
                Some(handle.clone())
            }
            _ => None,
        };
        if let Some(origin) = crossed {
            self.start_drag(origin, input, view);
            return;
        }
        if self.is_dragging() {
            self.drag_move(input, view);
        }
    }

    /// Pointer-up: commit a drag, or complete a click.
    ///
    /// A committed drag reconciles the lists and fires exactly one of
    /// `order_changed` (sources stayed in one list and moved) or
    /// `item_moved` (sources changed list) - or neither when the drop
    /// landed back where it started - followed by `drag_end`. A release
    /// within the click box applies click selection: shift expands the
    /// range, control/meta toggles, a plain click adds.
    pub fn pointer_up(&mut self, input: &PointerInput, view: &mut dyn SortableView<T>) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {}
            Gesture::Armed { start, handle } => {
                let is_click = (input.page.x - start.x).abs() <= CLICK_THRESHOLD
                    && (input.page.y - start.y).abs() <= CLICK_THRESHOLD;
                if !is_click {
                    return;
                }
                if input.modifiers.shift {
                    self.expand_selection_to(handle);
                } else if input.modifiers.command_like() {
                    self.toggle_selection(handle);
                } else {
                    self.add_to_selection(handle);
                }
            }
            Gesture::Dragging { session } => {
                view.teardown_drag(session.sources());

                let args = session.event_args(&self.lists);
                let same_list = session.all_same_list();
                let order_changed = session.is_order_changed(&self.lists);

                reconcile::apply(&session, &mut self.lists);

                if same_list {
                    if order_changed {
                        self.callbacks.order_changed.emit(args);
                    }
                } else {
                    self.callbacks.item_moved.emit(args);
                }
                self.callbacks.drag_end.emit(DragEvent::from(input));
                tracing::debug!(
                    target: "horizon_sortable::group",
                    same_list,
                    order_changed,
                    "drag committed"
                );
            }
        }
    }

    /// Cancel the gesture (Escape or a programmatic cancel).
    ///
    /// An active session discards its visuals and fires `drag_cancel`
    /// without touching any list; an armed gesture silently disarms.
    pub fn cancel_drag(&mut self, input: &PointerInput, view: &mut dyn SortableView<T>) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle | Gesture::Armed { .. } => {}
            Gesture::Dragging { session } => {
                view.teardown_drag(session.sources());
                self.callbacks.drag_cancel.emit(DragEvent::from(input));
                tracing::debug!(target: "horizon_sortable::group", "drag cancelled");
            }
        }
    }

    /// Pointer released anywhere in the window.
    ///
    /// Clears the selection unless a modifier is held or a drag is in
    /// progress. Wire this through
    /// [`watch_pointer_releases`](Self::watch_pointer_releases) for
    /// lifecycle-scoped registration.
    pub fn global_pointer_up(&mut self, input: &PointerInput) {
        if input.modifiers.control
            || input.modifiers.meta
            || input.modifiers.shift
            || self.is_dragging()
        {
            return;
        }
        self.deselect_all();
    }

    fn start_drag(
        &mut self,
        origin: ItemHandle<T>,
        input: &PointerInput,
        view: &mut dyn SortableView<T>,
    ) {
        let sources: Vec<DragSource<T>> = self
            .selection
            .iter()
            .map(|handle| {
                let cloning = self.lists.get(handle.list()).is_some_and(|list| {
                    list.options().clone || (list.options().ctrl_clone && input.modifiers.control)
                });
                DragSource::new(handle.clone(), cloning)
            })
            .collect();

        let grab = offset(&view.element_rect(&origin), Some(&view.scroll_offsets()));
        let mut position = ItemPosition::started(input, &grab);

        for source in &sources {
            view.create_ghost(source);
            view.create_placeholder(source);
        }
        let placed = position.move_position(
            input,
            &view.ghost_rect(),
            view.containment_rect().as_ref(),
            ContainerPositioning::Absolute,
        );
        view.move_ghost(placed);

        tracing::debug!(
            target: "horizon_sortable::group",
            sources = sources.len(),
            "drag started"
        );
        self.gesture = Gesture::Dragging {
            session: DragSession::new(sources, position),
        };
        self.callbacks.drag_start.emit(DragEvent::from(input));
    }

    fn drag_move(&mut self, input: &PointerInput, view: &mut dyn SortableView<T>) {
        let Gesture::Dragging { session } = &mut self.gesture else {
            return;
        };

        let placed = session.position_mut().move_position(
            input,
            &view.ghost_rect(),
            view.containment_rect().as_ref(),
            ContainerPositioning::Absolute,
        );
        view.move_ghost(placed);

        match view.hit_test(input.page) {
            Some(HitTarget::Item(target)) => {
                if let (Some(target_index), Some(target_list)) =
                    (target.index(&self.lists), self.lists.get(target.list()))
                {
                    // Clone-configured lists hand out copies but refuse drops.
                    if !target_list.options().clone {
                        let after = view
                            .placeholder_index(target.list())
                            .is_some_and(|index| index <= target_index);
                        if after {
                            view.place_placeholder(PlaceholderPosition::After(target.clone()));
                            session.move_to(&self.lists, target.list(), target_index + 1);
                        } else {
                            view.place_placeholder(PlaceholderPosition::Before(target.clone()));
                            session.move_to(&self.lists, target.list(), target_index);
                        }
                    }
                }
            }
            Some(HitTarget::List(list_id)) => {
                if let Some(list) = self.lists.get(list_id) {
                    if view.placeholder_index(list_id).is_none() && !list.options().clone {
                        view.place_placeholder(PlaceholderPosition::Append(list_id));
                        session.move_to(&self.lists, list_id, list.len());
                    }
                }
            }
            // No valid target under the pointer: the pending destination
            // stays as it was.
            None => {}
        }

        self.callbacks.drag_move.emit(DragEvent::from(input));
    }

    // -------------------------------------------------------------------------
    // Deferred notifications
    // -------------------------------------------------------------------------

    /// Run due debounced notifications. Returns how many fired.
    pub fn process_pending(&mut self) -> usize {
        self.debounce.process_expired()
    }

    /// Duration until the next pending notification is due, if any.
    pub fn time_until_pending(&self) -> Option<Duration> {
        self.debounce.time_until_next()
    }

    /// Tear the group down: discard the active gesture and cancel pending
    /// notifications so nothing fires against destroyed state.
    pub fn teardown(&mut self) {
        self.gesture = Gesture::Idle;
        self.debounce.cancel_all();
    }

    // -------------------------------------------------------------------------
    // Shared wiring
    // -------------------------------------------------------------------------

    /// Register the group's handlers on an event bus.
    ///
    /// External code can then command or query the group over the
    /// [`channels`] without a direct reference.
    pub fn attach_event_bus(
        group: &Arc<Mutex<Self>>,
        bus: &EventBus<GroupCommand, GroupResponse<T>>,
    ) {
        let g = Arc::clone(group);
        bus.subscribe(channels::DESELECT_ALL, move |_| {
            g.lock().deselect_all();
            GroupResponse::Done
        });

        bus.subscribe(channels::DESELECT, move |_command| {
            // TODO: decide whether the index addresses the selection order
            // or a list row, then implement deselection by index.
            GroupResponse::Done
        });

        let g = Arc::clone(group);
        bus.subscribe(channels::GET_SELECTED, move |_| {
            GroupResponse::Selected(g.lock().selected_handles())
        });

        let g = Arc::clone(group);
        bus.subscribe(channels::GET_IS_DRAGGING, move |_| {
            GroupResponse::Dragging(g.lock().is_dragging())
        });
    }

    /// Subscribe the group's global deselection behavior to the host's
    /// pointer-release signal.
    ///
    /// The returned guard unregisters on drop, scoping the subscription to
    /// the group's lifetime. The host must not emit `releases` while
    /// holding the group lock.
    #[must_use]
    pub fn watch_pointer_releases(
        group: &Arc<Mutex<Self>>,
        releases: &Signal<PointerInput>,
    ) -> ConnectionGuard<PointerInput> {
        let g = Arc::clone(group);
        releases.connect_scoped(move |input| g.lock().global_pointer_up(input))
    }
}

impl<T: Clone + Send + Sync + 'static> Default for SortableGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(SortableGroup<String>: Send);
