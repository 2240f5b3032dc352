//! Input model: tools, pointer events, and the drag/resize state machine.
//!
//! `Interaction` is the single gesture slot a canvas tracks between
//! pointer-down and pointer-up. It is keyed by the pointer that started it;
//! events from any other pointer are ignored until it ends.
//!
//! The free functions here are the geometry behind each gesture. They work
//! purely in page-local units and always return a rect inside the page.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coords::{Point, Rect, Size, clamp};
use crate::doc::{CreateItemInput, ItemId, PageSide};
use crate::error::ParseEnumError;
use crate::hit::ResizeHandle;

/// Which toolbar tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Clicking empty page area places a text box.
    Text,
    /// Sticker palette.
    Sticker,
    /// Photo picker.
    Image,
}

impl FromStr for Tool {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Self::Select),
            "text" => Ok(Self::Text),
            "sticker" => Ok(Self::Sticker),
            "image" => Ok(Self::Image),
            other => Err(ParseEnumError::new("tool", other)),
        }
    }
}

/// Pointer identifier as reported by the platform.
pub type PointerId = i32;

/// A pointer event in client space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pointer_id: PointerId,
    pub client: Point,
}

impl PointerInput {
    #[must_use]
    pub fn new(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self { pointer_id, client: Point::new(x, y) }
    }
}

/// Wheel delta in pixels (positive = scroll down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Inclusive bounds on item width/height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min: f64,
    pub max: f64,
}

/// The gesture currently tracked by a canvas.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving an item with the pointer.
    Dragging {
        pointer_id: PointerId,
        item_id: ItemId,
        /// Client-space pointer position at pointer-down.
        start_client: Point,
        /// Item rect at pointer-down.
        start: Rect,
        /// Pointer position relative to the item origin, fixed for the whole drag.
        offset: Point,
    },
    /// Resizing an item by one of its corner handles.
    Resizing {
        pointer_id: PointerId,
        item_id: ItemId,
        handle: ResizeHandle,
        /// Client-space pointer position at pointer-down.
        start_client: Point,
        /// Item rect at pointer-down.
        start: Rect,
    },
}

impl Interaction {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Pointer that owns the gesture.
    #[must_use]
    pub fn pointer_id(&self) -> Option<PointerId> {
        match self {
            Self::Idle => None,
            Self::Dragging { pointer_id, .. } | Self::Resizing { pointer_id, .. } => Some(*pointer_id),
        }
    }

    /// Item the gesture acts on.
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Dragging { item_id, .. } | Self::Resizing { item_id, .. } => Some(*item_id),
        }
    }

    /// Whether `pointer_id` owns this gesture.
    #[must_use]
    pub fn owned_by(&self, pointer_id: PointerId) -> bool {
        self.pointer_id() == Some(pointer_id)
    }
}

/// Next rect for a drag: the pointer minus the grab offset, kept on the page.
#[must_use]
pub fn drag_rect(start: Rect, pointer_local: Point, offset: Point, page: Size) -> Rect {
    Rect { x: pointer_local.x - offset.x, y: pointer_local.y - offset.y, ..start }.clamped_to(page)
}

/// Resize one axis. Returns `(origin, extent)`.
///
/// When the moving edge is the low one (west/north) the high edge stays put;
/// otherwise the origin stays put. The extent is bounded by `limits` and by
/// the page on the moving side.
fn resize_axis(origin: f64, extent: f64, delta: f64, moves_low_edge: bool, page_extent: f64, limits: SizeLimits) -> (f64, f64) {
    if moves_low_edge {
        let high = origin + extent;
        let next = clamp(extent - delta, limits.min, limits.max.min(high));
        (high - next, next)
    } else {
        let next = clamp(extent + delta, limits.min, limits.max.min(page_extent - origin));
        (origin, next)
    }
}

/// Next rect for a corner resize.
///
/// `delta` is the page-local pointer travel since pointer-down. The edges
/// opposite `handle` stay fixed; the result is kept on the page.
#[must_use]
pub fn resize_rect(start: Rect, handle: ResizeHandle, delta: Point, page: Size, limits: SizeLimits) -> Rect {
    let (x, width) = resize_axis(start.x, start.width, delta.x, handle.moves_west(), page.width, limits);
    let (y, height) = resize_axis(start.y, start.height, delta.y, handle.moves_north(), page.height, limits);
    Rect::new(x, y, width, height).clamped_to(page)
}

/// Next size for one wheel tick over `rect`, or `None` for a purely
/// horizontal scroll.
///
/// Scrolling down shrinks, scrolling up grows, by `step` on both axes. The
/// size never exceeds the page remaining from the item's origin.
#[must_use]
pub fn wheel_size(rect: Rect, delta: WheelDelta, step: f64, page: Size, limits: SizeLimits) -> Option<Size> {
    if delta.dy == 0.0 {
        return None;
    }
    let change = if delta.dy > 0.0 { -step } else { step };
    Some(Size::new(
        clamp(rect.width + change, limits.min, limits.max.min(page.width - rect.x)),
        clamp(rect.height + change, limits.min, limits.max.min(page.height - rect.y)),
    ))
}

/// Turn a dropped item input into an add request centered on `local`.
///
/// Missing width/height take `default_size`; `side` always overrides
/// whatever the payload said.
#[must_use]
pub fn place_dropped(input: CreateItemInput, local: Point, page: Size, default_size: f64, side: PageSide) -> CreateItemInput {
    let width = input.width.unwrap_or(default_size);
    let height = input.height.unwrap_or(default_size);
    let rect = Rect::new(local.x - width / 2.0, local.y - height / 2.0, width, height).clamped_to(page);
    input.on_side(side).at(rect.x, rect.y).sized(width, height)
}

/// Origin for a text box of size `text_box` centered on `local`, kept on the page.
#[must_use]
pub fn text_origin(local: Point, page: Size, text_box: Size) -> Point {
    let rect =
        Rect::new(local.x - text_box.width / 2.0, local.y - text_box.height / 2.0, text_box.width, text_box.height)
            .clamped_to(page);
    Point::new(rect.x, rect.y)
}
