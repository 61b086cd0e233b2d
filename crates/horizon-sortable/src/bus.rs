//! Minimal named-channel publish/subscribe.
//!
//! The bus lets external code command or query a group without holding a
//! reference to it: the group registers handlers on well-known channels
//! (see [`channels`]) and callers publish messages, collecting whatever
//! each subscriber returns.
//!
//! Subscriptions last for the life of the bus; there is deliberately no
//! unsubscribe primitive in this minimal version. Handlers run under the
//! bus's internal lock, so a handler must not subscribe or publish on the
//! same bus.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::model::ItemHandle;

/// Well-known channels a group listens on.
pub mod channels {
    /// Clear the group's selection.
    pub const DESELECT_ALL: &str = "deselectAll";
    /// Deselect one entry by index.
    pub const DESELECT: &str = "deselect";
    /// Query the current selection.
    pub const GET_SELECTED: &str = "getSelected";
    /// Query whether a drag session is active.
    pub const GET_IS_DRAGGING: &str = "getIsDragging";
}

/// Commands and queries addressed to a group over the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupCommand {
    /// Clear the selection.
    DeselectAll,
    /// Deselect one entry by index.
    Deselect { index: usize },
    /// Ask for the current selection.
    GetSelected,
    /// Ask whether a drag session is active.
    GetIsDragging,
}

/// A group's answer to a bus message.
pub enum GroupResponse<T> {
    /// The command was handled; nothing to report.
    Done,
    /// The current selection, in overall order.
    Selected(Vec<ItemHandle<T>>),
    /// Whether a drag session is active.
    Dragging(bool),
}

type Handler<M, R> = Box<dyn Fn(&M) -> R + Send + Sync>;

/// A named-channel publish/subscribe bus.
///
/// `M` is the message type shared by every channel and `R` the subscriber
/// return type; for group wiring these are [`GroupCommand`] and
/// [`GroupResponse`].
pub struct EventBus<M, R> {
    channels: Mutex<HashMap<String, Vec<Handler<M, R>>>>,
}

impl<M, R> EventBus<M, R> {
    /// Create a bus with the given channels registered up front.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let channels = names
            .into_iter()
            .map(|name| (name.into(), Vec::new()))
            .collect();
        Self {
            channels: Mutex::new(channels),
        }
    }

    /// A bus pre-registered with the group channels.
    pub fn with_group_channels() -> Self {
        Self::new([
            channels::DESELECT_ALL,
            channels::DESELECT,
            channels::GET_SELECTED,
            channels::GET_IS_DRAGGING,
        ])
    }

    /// Append a subscriber to a channel, creating the channel if needed.
    pub fn subscribe<F>(&self, channel: &str, handler: F)
    where
        F: Fn(&M) -> R + Send + Sync + 'static,
    {
        self.channels
            .lock()
            .entry(channel.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Publish a message, invoking subscribers in registration order.
    ///
    /// Returns the collected subscriber results, or `None` when the
    /// channel is unknown or has no subscribers.
    pub fn publish(&self, channel: &str, message: &M) -> Option<Vec<R>> {
        let channels = self.channels.lock();
        let handlers = channels.get(channel)?;
        if handlers.is_empty() {
            return None;
        }
        tracing::trace!(
            target: "horizon_sortable::bus",
            channel,
            subscribers = handlers.len(),
            "publishing"
        );
        Some(handlers.iter().map(|handler| handler(message)).collect())
    }

    /// Number of subscribers on a channel.
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.channels
            .lock()
            .get(channel)
            .map_or(0, |handlers| handlers.len())
    }
}

static_assertions::assert_impl_all!(EventBus<GroupCommand, GroupResponse<String>>: Send, Sync);
