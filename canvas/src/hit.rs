#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::coords::{Point, Rect};
use crate::doc::{EditorItem, ItemId};

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(ResizeHandle),
}

/// Corner resize handle shown on the selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl ResizeHandle {
    pub const ALL: [Self; 4] = [Self::Nw, Self::Ne, Self::Sw, Self::Se];

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_west(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_north(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }

    /// Unrotated corner position of this handle on `rect`.
    #[must_use]
    pub fn corner(self, rect: Rect) -> Point {
        let x = if self.moves_west() { rect.x } else { rect.right() };
        let y = if self.moves_north() { rect.y } else { rect.bottom() };
        Point::new(x, y)
    }
}

/// An item as the hit tester sees it: its effective rect and rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: ItemId,
    pub rect: Rect,
    pub rotation: f64,
}

impl Target {
    /// Target for `item`, using `live` in place of the committed rect when given.
    #[must_use]
    pub fn of(item: &EditorItem, live: Option<Rect>) -> Self {
        Self { id: item.id, rect: live.unwrap_or_else(|| item.rect()), rotation: item.rotation }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub item_id: ItemId,
    pub part: HitPart,
}

/// Rotate `pt` by `degrees` around `center`.
fn rotate_about(pt: Point, center: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        return pt;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = pt.x - center.x;
    let dy = pt.y - center.y;
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

/// On-page position of `handle` for a rotated target.
#[must_use]
pub fn handle_position(target: &Target, handle: ResizeHandle) -> Point {
    rotate_about(handle.corner(target.rect), target.rect.center(), target.rotation)
}

fn body_contains(target: &Target, local: Point) -> bool {
    let p = rotate_about(local, target.rect.center(), -target.rotation);
    p.x >= target.rect.x && p.x <= target.rect.right() && p.y >= target.rect.y && p.y <= target.rect.bottom()
}

/// Find what lies under `local`.
///
/// `targets` must be in paint order (bottom first). Handles of the selected
/// item win over any body, then bodies are tested from the top down.
#[must_use]
pub fn hit_test(local: Point, targets: &[Target], selected: Option<ItemId>, handle_radius: f64) -> Option<Hit> {
    if let Some(target) = selected.and_then(|id| targets.iter().find(|t| t.id == id)) {
        for handle in ResizeHandle::ALL {
            let at = handle_position(target, handle);
            if (local.x - at.x).abs() <= handle_radius && (local.y - at.y).abs() <= handle_radius {
                return Some(Hit { item_id: target.id, part: HitPart::Handle(handle) });
            }
        }
    }

    targets
        .iter()
        .rev()
        .find(|t| body_contains(t, local))
        .map(|t| Hit { item_id: t.id, part: HitPart::Body })
}
