//! Per-list configuration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// How the placeholder element is produced for a list.
#[derive(Clone, Default)]
pub enum Placeholder {
    /// Mirror the dragged element's tag (the renderer's default).
    #[default]
    Default,
    /// A fixed markup/tag string.
    Tag(String),
    /// A factory invoked per drag; returns the markup to use.
    Factory(Arc<dyn Fn() -> String + Send + Sync>),
}

impl fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "Placeholder::Default"),
            Self::Tag(tag) => write!(f, "Placeholder::Tag({tag:?})"),
            Self::Factory(_) => write!(f, "Placeholder::Factory(..)"),
        }
    }
}

/// Configuration for one sortable list.
///
/// Unrecognized keys supplied by the host are not rejected; they pass
/// through the [`extra`](Self::extra) map untouched so the rendering layer
/// can define additional semantics.
#[derive(Debug, Clone)]
pub struct SortableOptions {
    /// Allow a value to appear more than once in the list; inserts then
    /// store an independent copy.
    pub allow_duplicates: bool,
    /// Every drag out of this list clones instead of moving. A list
    /// configured this way also refuses drops.
    pub clone: bool,
    /// Dragging with the control modifier held clones instead of moving.
    pub ctrl_clone: bool,
    /// Extra class the renderer applies to placeholders for this list.
    pub additional_placeholder_class: Option<String>,
    /// How placeholders are produced.
    pub placeholder: Placeholder,
    /// Require a long touch before arming a drag (touch devices).
    pub long_touch: bool,
    /// Key of the scroll container the renderer resolves for offset
    /// normalization; `None` means the document root.
    pub scroll_container: Option<String>,
    /// Pixels per auto-scroll step while dragging near an edge.
    pub scroll_speed: f32,
    /// Unrecognized option keys, passed through untouched.
    extra: HashMap<String, String>,
}

impl Default for SortableOptions {
    fn default() -> Self {
        Self {
            allow_duplicates: false,
            clone: false,
            ctrl_clone: false,
            additional_placeholder_class: None,
            placeholder: Placeholder::Default,
            long_touch: false,
            scroll_container: None,
            scroll_speed: 10.0,
            extra: HashMap::new(),
        }
    }
}

impl SortableOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an option key the toolkit does not recognize.
    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extra.insert(key.into(), value.into());
    }

    /// Look up a passed-through option key.
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(|value| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SortableOptions::default();
        assert!(!options.allow_duplicates);
        assert!(!options.clone);
        assert!(!options.ctrl_clone);
        assert!(!options.long_touch);
        assert!(options.scroll_container.is_none());
    }

    #[test]
    fn test_unrecognized_keys_pass_through() {
        let mut options = SortableOptions::new();
        options.set_extra("containerPositioning", "relative");

        assert_eq!(options.extra("containerPositioning"), Some("relative"));
        assert_eq!(options.extra("missing"), None);
    }
}
