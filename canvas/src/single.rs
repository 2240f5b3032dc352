//! Single-page canvas: the live-rect drag/resize engine.
//!
//! One gesture at a time, owned by the pointer that started it. While a
//! gesture runs, every pointer-move recomputes a transient live rect for the
//! item; nothing reaches the store until pointer-up (or pointer-cancel),
//! which commits the last live rect as a move, plus a resize when the
//! gesture was a resize. Wheel resizes are discrete and commit at once.
//!
//! The notebook variant also shows left-page items and never turns an
//! empty-area click into text placement.

#[cfg(test)]
#[path = "single_test.rs"]
mod single_test;

use crate::config::EditorConfig;
use crate::coords::{PageSurface, Point, Rect, Size, Zoom};
use crate::doc::{CreateItemInput, EditorItem, ItemId, PageSide};
use crate::engine::{Action, RenderItem};
use crate::hit::{HitPart, Target, hit_test};
use crate::input::{
    Interaction, PointerInput, SizeLimits, Tool, WheelDelta, drag_rect, place_dropped, resize_rect, text_origin,
    wheel_size,
};
use crate::store::EditorState;

pub struct SinglePageCanvas {
    config: EditorConfig,
    surface: PageSurface,
    zoom: Zoom,
    notebook: bool,
    interaction: Interaction,
    live: Option<(ItemId, Rect)>,
}

impl SinglePageCanvas {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        let zoom = Zoom::new(config.default_zoom, config.zoom_min, config.zoom_max);
        Self { config, surface: PageSurface::default(), zoom, notebook: false, interaction: Interaction::Idle, live: None }
    }

    /// The lined-notebook rendering of the single page.
    #[must_use]
    pub fn notebook(config: EditorConfig) -> Self {
        Self { notebook: true, ..Self::new(config) }
    }

    pub fn set_surface(&mut self, surface: PageSurface) {
        self.surface = surface;
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
    }

    #[must_use]
    pub fn is_notebook(&self) -> bool {
        self.notebook
    }

    #[must_use]
    pub fn page_size(&self) -> Size {
        self.surface.page_size(self.zoom)
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Uncommitted geometry of `id`, while it is being dragged or resized.
    #[must_use]
    pub fn live_rect(&self, id: &ItemId) -> Option<Rect> {
        self.live.filter(|(live_id, _)| live_id == id).map(|(_, rect)| rect)
    }

    /// Whether `item` is drawn on this surface.
    #[must_use]
    pub fn shows(&self, item: &EditorItem) -> bool {
        match item.page_side {
            PageSide::Single => true,
            PageSide::Left => self.notebook,
            PageSide::Right => false,
        }
    }

    fn limits(&self) -> SizeLimits {
        SizeLimits { min: self.config.min_item_size, max: self.config.max_item_size }
    }

    fn local(&self, client: Point) -> Point {
        self.surface.to_local(client, self.zoom)
    }

    fn targets(&self, state: &EditorState) -> Vec<Target> {
        state.sorted_items_where(|item| self.shows(item)).into_iter().map(|item| Target::of(item, self.live_rect(&item.id))).collect()
    }

    /// Visible items in paint order, live rects applied.
    #[must_use]
    pub fn render_list(&self, state: &EditorState) -> Vec<RenderItem> {
        state
            .sorted_items_where(|item| self.shows(item))
            .into_iter()
            .map(|item| RenderItem::new(item, self.live_rect(&item.id), state.selected_item_id == Some(item.id)))
            .collect()
    }

    /// Start a drag on an item body or a resize on a selected item's handle.
    pub fn on_pointer_down(&mut self, state: &EditorState, event: PointerInput) -> Vec<Action> {
        if !self.interaction.is_idle() {
            tracing::trace!(pointer_id = event.pointer_id, "second pointer ignored during gesture");
            return Vec::new();
        }
        let local = self.local(event.client);
        let targets = self.targets(state);
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
        self.live = Some((item.id, start));
        tracing::debug!(item_id = %item.id, pointer_id = event.pointer_id, part = ?hit.part, "gesture started");
        vec![Action::Select { id: Some(item.id) }, Action::RenderNeeded]
    }

    /// Recompute the live rect for the owning pointer.
    pub fn on_pointer_move(&mut self, state: &EditorState, event: PointerInput) -> Vec<Action> {
        if !self.interaction.owned_by(event.pointer_id) {
            return Vec::new();
        }
        let page = self.page_size();
        let (item_id, rect) = match &self.interaction {
            Interaction::Idle => return Vec::new(),
            Interaction::Dragging { item_id, offset, .. } => {
                let Some(item) = state.item(item_id) else {
                    return Vec::new();
                };
                (*item_id, drag_rect(item.rect(), self.local(event.client), *offset, page))
            }
            Interaction::Resizing { item_id, handle, start_client, start, .. } => {
                if state.item(item_id).is_none() {
                    return Vec::new();
                }
                let zoom = self.zoom.factor();
                let delta = Point::new((event.client.x - start_client.x) / zoom, (event.client.y - start_client.y) / zoom);
                (*item_id, resize_rect(*start, *handle, delta, page, self.limits()))
            }
        };
        tracing::trace!(item_id = %item_id, x = rect.x, y = rect.y, w = rect.width, h = rect.height, "live rect");
        self.live = Some((item_id, rect));
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, event: PointerInput) -> Vec<Action> {
        self.finish(event)
    }

    pub fn on_pointer_cancel(&mut self, event: PointerInput) -> Vec<Action> {
        self.finish(event)
    }

    /// End the gesture and commit the last live rect.
    fn finish(&mut self, event: PointerInput) -> Vec<Action> {
        if !self.interaction.owned_by(event.pointer_id) {
            return Vec::new();
        }
        let interaction = std::mem::take(&mut self.interaction);
        let mut actions = Vec::new();
        if let Some((id, rect)) = self.live.take() {
            actions.push(Action::MoveItem { id, x: rect.x, y: rect.y });
            if matches!(interaction, Interaction::Resizing { .. }) {
                actions.push(Action::ResizeItem { id, width: rect.width, height: rect.height });
            }
            tracing::debug!(item_id = %id, x = rect.x, y = rect.y, w = rect.width, h = rect.height, "gesture committed");
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Drop any gesture without committing it.
    pub fn abandon(&mut self) {
        self.interaction = Interaction::Idle;
        self.live = None;
    }

    /// Click on the page: select the item under the pointer, otherwise
    /// clear the selection or request text placement.
    pub fn on_click(&mut self, state: &EditorState, client: Point, tool: Tool) -> Vec<Action> {
        let local = self.local(client);
        let targets = self.targets(state);
        if let Some(hit) = hit_test(local, &targets, state.selected_item_id, self.config.handle_radius) {
            return vec![Action::Select { id: Some(hit.item_id) }];
        }
        if !self.notebook && tool == Tool::Text {
            let text_box = Size::new(self.config.text_box_width, self.config.text_box_height);
            let at = text_origin(local, self.page_size(), text_box);
            return vec![Action::PlaceText { side: PageSide::Single, x: at.x, y: at.y }];
        }
        vec![Action::Select { id: None }]
    }

    /// Drop of a serialized item input. Malformed data is logged and dropped.
    pub fn on_drop(&mut self, client: Point, data: &str) -> Vec<Action> {
        match CreateItemInput::from_drag_data(data) {
            Ok(input) => {
                let input =
                    place_dropped(input, self.local(client), self.page_size(), self.config.default_item_size, PageSide::Single);
                vec![Action::AddItem { input }]
            }
            Err(err) => {
                tracing::warn!(error = %err, "drop ignored");
                Vec::new()
            }
        }
    }

    /// Grow or shrink the item under the pointer by one wheel step.
    pub fn on_wheel(&mut self, state: &EditorState, client: Point, delta: WheelDelta) -> Vec<Action> {
        if !self.interaction.is_idle() {
            return Vec::new();
        }
        let targets = self.targets(state);
        let Some(hit) = hit_test(self.local(client), &targets, None, 0.0) else {
            return Vec::new();
        };
        let Some(item) = state.item(&hit.item_id) else {
            return Vec::new();
        };
        match wheel_size(item.rect(), delta, self.config.wheel_step, self.page_size(), self.limits()) {
            Some(size) => vec![Action::ResizeItem { id: item.id, width: size.width, height: size.height }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }
}
