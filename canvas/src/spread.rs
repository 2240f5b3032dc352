//! Two-page spread canvas.
//!
//! Same gestures as the single page, split across a left and a right
//! surface. The left page shows `left` and `single` items, the right page
//! only `right` items. A gesture is bound to the surface it started on:
//! moves reported by the other surface are ignored, so an item never
//! changes sides by dragging. There is no live rect here; each pointer-move
//! commits directly.

#[cfg(test)]
#[path = "spread_test.rs"]
mod spread_test;

use crate::config::EditorConfig;
use crate::coords::{PageSurface, Point, Size, Zoom};
use crate::doc::{CreateItemInput, EditorItem, PageSide};
use crate::engine::{Action, RenderItem};
use crate::hit::{HitPart, Target, hit_test};
use crate::input::{
    Interaction, PointerInput, SizeLimits, Tool, WheelDelta, drag_rect, place_dropped, resize_rect, text_origin,
    wheel_size,
};
use crate::store::EditorState;

/// One page of a spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadSide {
    Left,
    Right,
}

impl SpreadSide {
    #[must_use]
    pub fn page_side(self) -> PageSide {
        match self {
            Self::Left => PageSide::Left,
            Self::Right => PageSide::Right,
        }
    }

    /// Whether `item` is drawn on this page.
    #[must_use]
    pub fn shows(self, item: &EditorItem) -> bool {
        match self {
            Self::Left => matches!(item.page_side, PageSide::Left | PageSide::Single),
            Self::Right => item.page_side == PageSide::Right,
        }
    }
}

pub struct SpreadCanvas {
    config: EditorConfig,
    left: PageSurface,
    right: PageSurface,
    zoom: Zoom,
    interaction: Interaction,
    active_side: Option<SpreadSide>,
}

impl SpreadCanvas {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let zoom = Zoom::new(config.default_zoom, config.zoom_min, config.zoom_max);
        Self {
            config,
            left: PageSurface::default(),
            right: PageSurface::default(),
            zoom,
            interaction: Interaction::Idle,
            active_side: None,
        }
    }

    pub fn set_surface(&mut self, side: SpreadSide, surface: PageSurface) {
        match side {
            SpreadSide::Left => self.left = surface,
            SpreadSide::Right => self.right = surface,
        }
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
    }

    fn surface(&self, side: SpreadSide) -> PageSurface {
        match side {
            SpreadSide::Left => self.left,
            SpreadSide::Right => self.right,
        }
    }

    #[must_use]
    pub fn page_size(&self, side: SpreadSide) -> Size {
        self.surface(side).page_size(self.zoom)
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Surface the current gesture is bound to.
    #[must_use]
    pub fn active_side(&self) -> Option<SpreadSide> {
        self.active_side
    }

    fn local(&self, side: SpreadSide, client: Point) -> Point {
        self.surface(side).to_local(client, self.zoom)
    }

    fn limits(&self) -> SizeLimits {
        SizeLimits { min: self.config.min_item_size, max: self.config.max_item_size }
    }

    fn targets(state: &EditorState, side: SpreadSide) -> Vec<Target> {
        state.sorted_items_where(|item| side.shows(item)).into_iter().map(|item| Target::of(item, None)).collect()
    }

    /// Items on `side` in paint order.
    #[must_use]
    pub fn render_list(&self, state: &EditorState, side: SpreadSide) -> Vec<RenderItem> {
        state
            .sorted_items_where(|item| side.shows(item))
            .into_iter()
            .map(|item| RenderItem::new(item, None, state.selected_item_id == Some(item.id)))
            .collect()
    }

    pub fn on_pointer_down(&mut self, state: &EditorState, side: SpreadSide, event: PointerInput) -> Vec<Action> {
        if !self.interaction.is_idle() {
            return Vec::new();
        }
        let local = self.local(side, event.client);
        let targets = Self::targets(state, side);
        let Some(hit) = hit_test(local, &targets, state.selected_item_id, self.config.handle_radius) else {
            return Vec::new();
        };
        let Some(item) = state.item(&hit.item_id) else {
            return Vec::new();
        };

        let start = item.rect();
        self.interaction = match hit.part {
            HitPart::Body => Interaction::Dragging {
                pointer_id: event.pointer_id,
                item_id: item.id,
                start_client: event.client,
                start,
                offset: Point::new(local.x - start.x, local.y - start.y),
            },
            HitPart::Handle(handle) => Interaction::Resizing {
                pointer_id: event.pointer_id,
                item_id: item.id,
                handle,
                start_client: event.client,
                start,
            },
        };
        self.active_side = Some(side);
        tracing::debug!(item_id = %item.id, ?side, part = ?hit.part, "spread gesture started");
        vec![Action::Select { id: Some(item.id) }, Action::RenderNeeded]
    }

    /// Commit the next position (and size, when resizing) straight away.
    pub fn on_pointer_move(&mut self, state: &EditorState, side: SpreadSide, event: PointerInput) -> Vec<Action> {
        if self.active_side != Some(side) || !self.interaction.owned_by(event.pointer_id) {
            return Vec::new();
        }
        let page = self.page_size(side);
        match &self.interaction {
            Interaction::Idle => Vec::new(),
            Interaction::Dragging { item_id, offset, .. } => {
                let Some(item) = state.item(item_id) else {
                    return Vec::new();
                };
                let rect = drag_rect(item.rect(), self.local(side, event.client), *offset, page);
                vec![Action::MoveItem { id: *item_id, x: rect.x, y: rect.y }, Action::RenderNeeded]
            }
            Interaction::Resizing { item_id, handle, start_client, start, .. } => {
                if state.item(item_id).is_none() {
                    return Vec::new();
                }
                let zoom = self.zoom.factor();
                let delta = Point::new((event.client.x - start_client.x) / zoom, (event.client.y - start_client.y) / zoom);
                let rect = resize_rect(*start, *handle, delta, page, self.limits());
                vec![
                    Action::MoveItem { id: *item_id, x: rect.x, y: rect.y },
                    Action::ResizeItem { id: *item_id, width: rect.width, height: rect.height },
                    Action::RenderNeeded,
                ]
            }
        }
    }

    pub fn on_pointer_up(&mut self, event: PointerInput) -> Vec<Action> {
        self.finish(event)
    }

    pub fn on_pointer_cancel(&mut self, event: PointerInput) -> Vec<Action> {
        self.finish(event)
    }

    /// Moves were committed as they happened; ending only frees the slot.
    fn finish(&mut self, event: PointerInput) -> Vec<Action> {
        if !self.interaction.owned_by(event.pointer_id) {
            return Vec::new();
        }
        if let Some(id) = self.interaction.item_id() {
            tracing::debug!(item_id = %id, "spread gesture ended");
        }
        self.abandon();
        Vec::new()
    }

    pub fn abandon(&mut self) {
        self.interaction = Interaction::Idle;
        self.active_side = None;
    }

    pub fn on_click(&mut self, state: &EditorState, side: SpreadSide, client: Point, tool: Tool) -> Vec<Action> {
        let local = self.local(side, client);
        let targets = Self::targets(state, side);
        if let Some(hit) = hit_test(local, &targets, state.selected_item_id, self.config.handle_radius) {
            return vec![Action::Select { id: Some(hit.item_id) }];
        }
        if tool == Tool::Text {
            let text_box = Size::new(self.config.text_box_width, self.config.text_box_height);
            let at = text_origin(local, self.page_size(side), text_box);
            return vec![Action::PlaceText { side: side.page_side(), x: at.x, y: at.y }];
        }
        vec![Action::Select { id: None }]
    }

    pub fn on_drop(&mut self, side: SpreadSide, client: Point, data: &str) -> Vec<Action> {
        match CreateItemInput::from_drag_data(data) {
            Ok(input) => {
                let input = place_dropped(
                    input,
                    self.local(side, client),
                    self.page_size(side),
                    self.config.default_item_size,
                    side.page_side(),
                );
                vec![Action::AddItem { input }]
            }
            Err(err) => {
                tracing::warn!(error = %err, ?side, "drop ignored");
                Vec::new()
            }
        }
    }

    pub fn on_wheel(&mut self, state: &EditorState, side: SpreadSide, client: Point, delta: WheelDelta) -> Vec<Action> {
        if !self.interaction.is_idle() {
            return Vec::new();
        }
        let targets = Self::targets(state, side);
        let Some(hit) = hit_test(self.local(side, client), &targets, None, 0.0) else {
            return Vec::new();
        };
        let Some(item) = state.item(&hit.item_id) else {
            return Vec::new();
        };
        match wheel_size(item.rect(), delta, self.config.wheel_step, self.page_size(side), self.limits()) {
            Some(size) => vec![Action::ResizeItem { id: item.id, width: size.width, height: size.height }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }
}
