//! Page-local geometry: points, rects, zoom and the client → page transform.
//!
//! Pointer events arrive in client space (CSS pixels of the browser
//! viewport). A page surface is drawn scaled by the zoom factor, so its
//! client-space bounding box is `zoom` times larger than the page itself.
//! Everything the store holds is in page-local units: relative to the
//! surface's top-left corner with the zoom removed.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use serde::{Deserialize, Serialize};

/// Bound `value` into `[min, max]`.
///
/// Never panics. When the range is inverted (an item wider than the page)
/// the result saturates at `min`, which keeps items pinned to the page origin.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// A point in either client or page-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a page in page-local units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned box in page-local units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shift the origin so the box lies inside `page`, keeping its size.
    #[must_use]
    pub fn clamped_to(self, page: Size) -> Self {
        Self {
            x: clamp(self.x, 0.0, page.width - self.width),
            y: clamp(self.y, 0.0, page.height - self.height),
            ..self
        }
    }
}

/// View zoom factor, always inside the configured `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    factor: f64,
    min: f64,
    max: f64,
}

impl Default for Zoom {
    fn default() -> Self {
        Self { factor: 1.0, min: crate::consts::ZOOM_MIN, max: crate::consts::ZOOM_MAX }
    }
}

impl Zoom {
    /// Build a zoom bounded to `[min, max]`; `factor` is clamped into it.
    #[must_use]
    pub fn new(factor: f64, min: f64, max: f64) -> Self {
        let mut zoom = Self { factor: min, min, max };
        zoom.set(factor);
        zoom
    }

    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Set the factor, clamped to the range and rounded to hundredths so
    /// repeated steps do not drift.
    pub fn set(&mut self, factor: f64) {
        let bounded = if factor.is_finite() { clamp(factor, self.min, self.max) } else { self.factor };
        self.factor = (bounded * 100.0).round() / 100.0;
    }

    pub fn step_in(&mut self, step: f64) {
        self.set(self.factor + step);
    }

    pub fn step_out(&mut self, step: f64) {
        self.set(self.factor - step);
    }

    /// Zoom expressed as a whole percentage, as the toolbar shows it.
    #[must_use]
    pub fn percent(&self) -> i64 {
        #[allow(clippy::cast_possible_truncation)]
        let percent = (self.factor * 100.0).round() as i64;
        percent
    }
}

/// Client-space bounding box of a rendered page surface.
///
/// `width`/`height` are the scaled on-screen size, as reported by the
/// browser's `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageSurface {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl PageSurface {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { origin: Point::new(left, top), width, height }
    }

    /// Convert a client-space point into page-local coordinates.
    #[must_use]
    pub fn to_local(&self, client: Point, zoom: Zoom) -> Point {
        Point {
            x: (client.x - self.origin.x) / zoom.factor(),
            y: (client.y - self.origin.y) / zoom.factor(),
        }
    }

    /// Page extent in page-local units.
    #[must_use]
    pub fn page_size(&self, zoom: Zoom) -> Size {
        Size::new(self.width / zoom.factor(), self.height / zoom.factor())
    }
}
