//! Pointer geometry: offsets, movement tracking, and ghost positioning.
//!
//! Everything here is pure computation over rectangles and already
//! normalized pointer samples; the rendering layer supplies both. The one
//! stateful type is [`ItemPosition`], the rolling movement tracker a drag
//! session carries from arm to drop.
//!
//! Direction and dominant-axis tracking exist so callers can implement
//! axis-locked dragging heuristics: [`ItemPosition::dist_ax_x`] /
//! [`dist_ax_y`](ItemPosition::dist_ax_y) accumulate travel along the
//! current dominant axis and reset both when the dominant axis flips and
//! individually when movement reverses direction along an axis.

use horizon_sortable_core::{Point, Rect, Size};

/// Mouse buttons the toolkit distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Primary button (usually left).
    #[default]
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

/// Keyboard modifier state accompanying a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Whether control or meta is held (the "add to selection" modifiers).
    pub fn command_like(&self) -> bool {
        self.control || self.meta
    }
}

/// One already-normalized pointer sample.
///
/// The host's input layer collapses mouse, touch, and pen events into this
/// shape; coordinates are page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Pointer position in page coordinates.
    pub page: Point,
    /// The button involved (for down/up samples).
    pub button: MouseButton,
    /// Modifier state at sample time.
    pub modifiers: KeyboardModifiers,
    /// Number of concurrent touch points (0 for mouse input).
    pub touch_count: u32,
}

impl PointerInput {
    /// A primary-button sample with no modifiers at `page`.
    pub fn new(page: Point) -> Self {
        Self {
            page,
            button: MouseButton::Left,
            modifiers: KeyboardModifiers::NONE,
            touch_count: 0,
        }
    }

    /// Replace the button.
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Replace the modifier state.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the touch point count.
    pub fn with_touches(mut self, touch_count: u32) -> Self {
        self.touch_count = touch_count;
        self
    }

    /// Whether this is a primary-button sample.
    pub fn is_primary(&self) -> bool {
        self.button == MouseButton::Left
    }

    /// Whether more than one touch point is down (never arms a drag).
    pub fn is_multi_touch(&self) -> bool {
        self.touch_count > 1
    }
}

/// A bounding rectangle as reported by the rendering layer.
///
/// `fallback_size` carries the element's explicit width/height for the
/// not-yet-laid-out case where the bounding rect reports zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementRect {
    /// Bounding rectangle in viewport coordinates.
    pub bounds: Rect,
    /// Explicit size used when `bounds` reports zero extent.
    pub fallback_size: Size,
}

impl ElementRect {
    /// An element rect with no explicit-size fallback.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            fallback_size: Size::ZERO,
        }
    }

    /// Attach an explicit-size fallback.
    pub fn with_fallback_size(mut self, size: Size) -> Self {
        self.fallback_size = size;
        self
    }
}

/// Scroll state used to normalize viewport rectangles into page space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffsets {
    /// Global page scroll offset (the window's scroll position).
    pub page: Point,
    /// The scroll container's own scroll position.
    pub scroll: Point,
    /// The scroll container's offset from its positioned ancestor.
    pub origin: Point,
}

/// A normalized element offset: page-space position plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementOffset {
    pub width: f32,
    pub height: f32,
    pub top: f32,
    pub left: f32,
}

/// Normalize a bounding rectangle into page coordinates.
///
/// The global page offset wins when non-zero; otherwise the supplied scroll
/// container's scroll position (less its own offset) compensates. With no
/// container the document root is assumed, contributing nothing. Zero-extent
/// bounds fall back to the element's explicit size.
pub fn offset(element: &ElementRect, container: Option<&ScrollOffsets>) -> ElementOffset {
    let scroll = container.copied().unwrap_or_default();
    let scroll_x = if scroll.page.x != 0.0 {
        scroll.page.x
    } else {
        scroll.scroll.x - scroll.origin.x
    };
    let scroll_y = if scroll.page.y != 0.0 {
        scroll.page.y
    } else {
        scroll.scroll.y - scroll.origin.y
    };

    ElementOffset {
        width: if element.bounds.width() != 0.0 {
            element.bounds.width()
        } else {
            element.fallback_size.width
        },
        height: if element.bounds.height() != 0.0 {
            element.bounds.height()
        } else {
            element.fallback_size.height
        },
        top: element.bounds.top() + scroll_y,
        left: element.bounds.left() + scroll_x,
    }
}

/// The axis a pointer is predominantly moving along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Mostly horizontal movement (ties count as horizontal).
    #[default]
    Horizontal,
    /// Mostly vertical movement.
    Vertical,
}

/// How ghost coordinates relate to the containment element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerPositioning {
    /// Page-absolute coordinates.
    #[default]
    Absolute,
    /// Coordinates relative to the containment element's origin.
    Relative,
}

fn direction_of(delta: f32) -> i8 {
    if delta == 0.0 {
        0
    } else if delta > 0.0 {
        1
    } else {
        -1
    }
}

/// Rolling movement state for one drag gesture.
///
/// Created at pointer-down over the grabbed element, updated on every move
/// via [`calculate`](Self::calculate) (or [`move_position`](Self::move_position),
/// which ends by calling it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPosition {
    /// Pointer offset within the grabbed element at gesture start.
    pub offset: Point,
    /// Pointer position at gesture start.
    pub start: Point,
    /// Pointer position at the previous sample.
    pub last: Point,
    /// Pointer position at the current sample.
    pub now: Point,
    /// Movement between the last two samples.
    pub delta: Point,
    /// Per-axis movement direction at the current sample (-1, 0, or 1).
    pub dir_x: i8,
    pub dir_y: i8,
    /// Per-axis movement direction at the previous sample.
    pub last_dir_x: i8,
    pub last_dir_y: i8,
    /// Accumulated travel along each axis while the dominant axis and the
    /// direction hold steady.
    pub dist_ax_x: f32,
    pub dist_ax_y: f32,
    /// The dominant movement axis.
    pub dir_ax: Axis,
}

impl ItemPosition {
    /// Capture the start of a gesture over `target`.
    ///
    /// All deltas, directions, and accumulated distances start at zero.
    pub fn started(event: &PointerInput, target: &ElementOffset) -> Self {
        Self {
            offset: Point::new(event.page.x - target.left, event.page.y - target.top),
            start: event.page,
            last: event.page,
            now: event.page,
            delta: Point::ZERO,
            dir_x: 0,
            dir_y: 0,
            last_dir_x: 0,
            last_dir_y: 0,
            dist_ax_x: 0.0,
            dist_ax_y: 0.0,
            dir_ax: Axis::Horizontal,
        }
    }

    /// Fold a pointer sample into the rolling movement state.
    ///
    /// Updates last/now positions, the per-event delta, per-axis
    /// directions, and the dominant axis, then maintains the same-axis
    /// travel accumulators: both reset when the dominant axis changes, and
    /// each resets individually when movement reverses along its axis.
    pub fn calculate(&mut self, event: &PointerInput) {
        self.last = self.now;
        self.now = event.page;

        self.delta = self.now - self.last;

        self.last_dir_x = self.dir_x;
        self.last_dir_y = self.dir_y;
        self.dir_x = direction_of(self.delta.x);
        self.dir_y = direction_of(self.delta.y);

        let new_ax = if self.delta.x.abs() >= self.delta.y.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };

        if self.dir_ax != new_ax {
            self.dist_ax_x = 0.0;
            self.dist_ax_y = 0.0;
        } else {
            self.dist_ax_x += self.delta.x.abs();
            if self.dir_x != 0 && self.dir_x != self.last_dir_x {
                self.dist_ax_x = 0.0;
            }

            self.dist_ax_y += self.delta.y.abs();
            if self.dir_y != 0 && self.dir_y != self.last_dir_y {
                self.dist_ax_y = 0.0;
            }
        }
        self.dir_ax = new_ax;
    }

    /// Compute the ghost element's new top-left for a pointer sample.
    ///
    /// The ghost follows the pointer minus the initial grab offset. When a
    /// containment is supplied the result is clamped inside it, converted
    /// to container-relative coordinates first under
    /// [`ContainerPositioning::Relative`]. Always ends by folding the
    /// sample into the rolling state via [`calculate`](Self::calculate).
    pub fn move_position(
        &mut self,
        event: &PointerInput,
        ghost: &ElementOffset,
        container: Option<&ElementOffset>,
        positioning: ContainerPositioning,
    ) -> Point {
        let mut x = event.page.x - self.offset.x;
        let mut y = event.page.y - self.offset.y;

        if let Some(bounds) = container {
            let mut bounds_left = bounds.left;
            let mut bounds_top = bounds.top;

            if positioning == ContainerPositioning::Relative {
                x -= bounds.left;
                y -= bounds.top;
                bounds_left = 0.0;
                bounds_top = 0.0;
            }

            if x < bounds_left {
                x = bounds_left;
            } else if x >= bounds.width + bounds_left - ghost.width {
                x = bounds.width + bounds_left - ghost.width;
            }
            if y < bounds_top {
                y = bounds_top;
            } else if y >= bounds.height + bounds_top - ghost.height {
                y = bounds.height + bounds_top - ghost.height;
            }
        }

        self.calculate(event);
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f32, y: f32) -> PointerInput {
        PointerInput::new(Point::new(x, y))
    }

    fn started_at(x: f32, y: f32) -> ItemPosition {
        ItemPosition::started(&sample(x, y), &ElementOffset::default())
    }

    #[test]
    fn test_offset_page_coordinates() {
        let element = ElementRect::new(Rect::new(10.0, 20.0, 100.0, 40.0));
        let scrolled = ScrollOffsets {
            page: Point::new(0.0, 300.0),
            ..Default::default()
        };

        let result = offset(&element, Some(&scrolled));
        assert_eq!(result.left, 10.0); // zero page x contributes nothing
        assert_eq!(result.top, 320.0);
        assert_eq!(result.width, 100.0);
        assert_eq!(result.height, 40.0);
    }

    #[test]
    fn test_offset_container_scroll_fallback() {
        // With no page offset, the container's scroll minus its own origin
        // provides the compensation.
        let element = ElementRect::new(Rect::new(0.0, 50.0, 10.0, 10.0));
        let container = ScrollOffsets {
            page: Point::ZERO,
            scroll: Point::new(5.0, 120.0),
            origin: Point::new(0.0, 20.0),
        };

        let result = offset(&element, Some(&container));
        assert_eq!(result.top, 150.0);
        assert_eq!(result.left, 5.0);
    }

    #[test]
    fn test_offset_zero_rect_uses_fallback_size() {
        let element = ElementRect::new(Rect::new(10.0, 10.0, 0.0, 0.0))
            .with_fallback_size(Size::new(80.0, 24.0));

        let result = offset(&element, None);
        assert_eq!(result.width, 80.0);
        assert_eq!(result.height, 24.0);
    }

    #[test]
    fn test_started_captures_grab_offset() {
        let target = ElementOffset {
            width: 100.0,
            height: 30.0,
            top: 200.0,
            left: 50.0,
        };
        let pos = ItemPosition::started(&sample(60.0, 210.0), &target);

        assert_eq!(pos.offset, Point::new(10.0, 10.0));
        assert_eq!(pos.start, Point::new(60.0, 210.0));
        assert_eq!(pos.delta, Point::ZERO);
        assert_eq!(pos.dist_ax_x, 0.0);
        assert_eq!(pos.dist_ax_y, 0.0);
        assert_eq!((pos.dir_x, pos.dir_y), (0, 0));
    }

    #[test]
    fn test_same_direction_movement_accumulates() {
        let mut pos = started_at(0.0, 0.0);

        // First rightward sample: direction goes 0 -> 1, which counts as a
        // direction change and clears the accumulator.
        pos.calculate(&sample(10.0, 0.0));
        assert_eq!(pos.dir_ax, Axis::Horizontal);
        assert_eq!(pos.dist_ax_x, 0.0);

        // Continued rightward movement accumulates without resetting.
        pos.calculate(&sample(25.0, 0.0));
        assert_eq!(pos.dist_ax_x, 15.0);
        pos.calculate(&sample(45.0, 0.0));
        assert_eq!(pos.dist_ax_x, 35.0);
    }

    #[test]
    fn test_axis_change_resets_both_accumulators() {
        let mut pos = started_at(0.0, 0.0);

        pos.calculate(&sample(10.0, 0.0));
        pos.calculate(&sample(25.0, 0.0));
        assert_eq!(pos.dist_ax_x, 15.0);

        // Right, then down, then right again: each dominant-axis flip
        // clears both accumulators.
        pos.calculate(&sample(25.0, 20.0));
        assert_eq!(pos.dir_ax, Axis::Vertical);
        assert_eq!(pos.dist_ax_x, 0.0);
        assert_eq!(pos.dist_ax_y, 0.0);

        pos.calculate(&sample(55.0, 20.0));
        assert_eq!(pos.dir_ax, Axis::Horizontal);
        assert_eq!(pos.dist_ax_x, 0.0);
        assert_eq!(pos.dist_ax_y, 0.0);
    }

    #[test]
    fn test_direction_reversal_resets_on_dominant_axis() {
        let mut pos = started_at(0.0, 0.0);

        pos.calculate(&sample(10.0, 0.0));
        pos.calculate(&sample(30.0, 0.0));
        assert_eq!(pos.dist_ax_x, 20.0);

        // Reversing along the still-dominant axis resets that axis only.
        pos.calculate(&sample(15.0, 0.0));
        assert_eq!(pos.dir_ax, Axis::Horizontal);
        assert_eq!(pos.dist_ax_x, 0.0);

        // And continued leftward movement accumulates again.
        pos.calculate(&sample(5.0, 0.0));
        assert_eq!(pos.dist_ax_x, 10.0);
    }

    #[test]
    fn test_tie_counts_as_horizontal() {
        let mut pos = started_at(0.0, 0.0);
        pos.calculate(&sample(10.0, 10.0));
        assert_eq!(pos.dir_ax, Axis::Horizontal);
    }

    #[test]
    fn test_move_position_follows_pointer() {
        let target = ElementOffset {
            width: 100.0,
            height: 30.0,
            top: 0.0,
            left: 0.0,
        };
        let mut pos = ItemPosition::started(&sample(10.0, 5.0), &target);

        let ghost = ElementOffset {
            width: 100.0,
            height: 30.0,
            ..Default::default()
        };
        let placed = pos.move_position(
            &sample(110.0, 55.0),
            &ghost,
            None,
            ContainerPositioning::Absolute,
        );

        // Pointer minus the initial grab offset.
        assert_eq!(placed, Point::new(100.0, 50.0));
        // The rolling state advanced too.
        assert_eq!(pos.now, Point::new(110.0, 55.0));
    }

    #[test]
    fn test_move_position_clamps_to_container() {
        let mut pos = started_at(0.0, 0.0);
        let ghost = ElementOffset {
            width: 50.0,
            height: 20.0,
            ..Default::default()
        };
        let container = ElementOffset {
            width: 200.0,
            height: 100.0,
            top: 10.0,
            left: 10.0,
        };

        // Far past the right/bottom edge.
        let placed = pos.move_position(
            &sample(1000.0, 1000.0),
            &ghost,
            Some(&container),
            ContainerPositioning::Absolute,
        );
        assert_eq!(placed, Point::new(160.0, 90.0));

        // Before the left/top edge.
        let placed = pos.move_position(
            &sample(-100.0, -100.0),
            &ghost,
            Some(&container),
            ContainerPositioning::Absolute,
        );
        assert_eq!(placed, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_move_position_relative_mode() {
        let mut pos = started_at(0.0, 0.0);
        let ghost = ElementOffset {
            width: 10.0,
            height: 10.0,
            ..Default::default()
        };
        let container = ElementOffset {
            width: 100.0,
            height: 100.0,
            top: 40.0,
            left: 40.0,
        };

        let placed = pos.move_position(
            &sample(60.0, 60.0),
            &ghost,
            Some(&container),
            ContainerPositioning::Relative,
        );
        // Container-relative: pointer at (60,60) lands 20px inside.
        assert_eq!(placed, Point::new(20.0, 20.0));
    }
}
