use serde::Serialize;

use crate::config::EditorConfig;
use crate::consts::{PHOTO_HEIGHT, PHOTO_WIDTH, STICKER_FONT_SIZE, STICKER_SIZE};
use crate::coords::{PageSurface, Point, Rect, Zoom};
use crate::doc::{CreateItemInput, EditorItem, ItemId, ItemKind, ItemPatch, ItemPayload, PageSide, TextPayload, ViewMode};
use crate::hit::{ResizeHandle, Target, handle_position};
use crate::input::{PointerInput, Tool, WheelDelta};
use crate::single::SinglePageCanvas;
use crate::spread::{SpreadCanvas, SpreadSide};
use crate::sticker::{StickerShape, tile_data_url};
use crate::store::{CreateEditorStateInput, EditorState, EditorStore};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Mutation requests emitted by the canvases.
///
/// Canvases never touch the store; [`Editor`] applies these and hands them
/// back to the host so it can mirror or persist them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Action {
    Select { id: Option<ItemId> },
    MoveItem { id: ItemId, x: f64, y: f64 },
    ResizeItem { id: ItemId, width: f64, height: f64 },
    AddItem { input: CreateItemInput },
    PlaceText { side: PageSide, x: f64, y: f64 },
    RenderNeeded,
}

/// A corner handle and where to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandleSpot {
    pub handle: ResizeHandle,
    pub at: Point,
}

/// One item as a surface should paint it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderItem {
    /// The committed item.
    pub item: EditorItem,
    /// Geometry to draw: the live rect mid-gesture, otherwise the committed one.
    pub rect: Rect,
    /// Whether to draw the selection outline.
    pub selected: bool,
    /// Corner handles; empty unless selected.
    pub handles: Vec<HandleSpot>,
}

impl RenderItem {
    #[must_use]
    pub fn new(item: &EditorItem, live: Option<Rect>, selected: bool) -> Self {
        let target = Target::of(item, live);
        let handles = if selected {
            ResizeHandle::ALL.iter().map(|&handle| HandleSpot { handle, at: handle_position(&target, handle) }).collect()
        } else {
            Vec::new()
        };
        Self { item: item.clone(), rect: target.rect, selected, handles }
    }
}

/// Which canvas handles events for a surface under the current view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Single,
    Spread(SpreadSide),
}

/// The editor: one store, both canvases, and the view controls around them.
pub struct Editor {
    store: EditorStore,
    single: SinglePageCanvas,
    spread: SpreadCanvas,
    tool: Tool,
    zoom: Zoom,
}

impl Editor {
    /// Editor with the plain single-page canvas.
    #[must_use]
    pub fn new(input: CreateEditorStateInput, config: EditorConfig) -> Self {
        let single = SinglePageCanvas::new(config.clone());
        Self::with_single(input, config, single)
    }

    /// Editor whose single-page canvas is the lined notebook variant.
    #[must_use]
    pub fn notebook(input: CreateEditorStateInput, config: EditorConfig) -> Self {
        let single = SinglePageCanvas::notebook(config.clone());
        Self::with_single(input, config, single)
    }

    fn with_single(input: CreateEditorStateInput, config: EditorConfig, mut single: SinglePageCanvas) -> Self {
        let zoom = Zoom::new(config.default_zoom, config.zoom_min, config.zoom_max);
        let mut spread = SpreadCanvas::new(config.clone());
        single.set_zoom(zoom);
        spread.set_zoom(zoom);
        Self { store: EditorStore::new(input, config), single, spread, tool: Tool::default(), zoom }
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> &EditorState {
        self.store.state()
    }

    #[must_use]
    pub fn store(&self) -> &EditorStore {
        &self.store
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    #[must_use]
    pub fn single(&self) -> &SinglePageCanvas {
        &self.single
    }

    #[must_use]
    pub fn spread(&self) -> &SpreadCanvas {
        &self.spread
    }

    /// Paint list for `side` under the current view mode. Empty for a
    /// surface that is not on screen.
    #[must_use]
    pub fn render_list(&self, side: PageSide) -> Vec<RenderItem> {
        match self.route(side) {
            Some(Route::Single) => self.single.render_list(self.store.state()),
            Some(Route::Spread(side)) => self.spread.render_list(self.store.state(), side),
            None => Vec::new(),
        }
    }

    // --- View controls ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_zoom(&mut self, factor: f64) {
        self.zoom.set(factor);
        self.sync_zoom();
    }

    pub fn zoom_in(&mut self) {
        self.zoom.step_in(self.store.config().zoom_step);
        self.sync_zoom();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.step_out(self.store.config().zoom_step);
        self.sync_zoom();
    }

    fn sync_zoom(&mut self) {
        self.single.set_zoom(self.zoom);
        self.spread.set_zoom(self.zoom);
    }

    /// Record where a surface is on screen. `side` picks the surface:
    /// `Single` for the single-page view, `Left`/`Right` for the spread.
    pub fn set_surface(&mut self, side: PageSide, surface: PageSurface) {
        match side {
            PageSide::Single => self.single.set_surface(surface),
            PageSide::Left => self.spread.set_surface(SpreadSide::Left, surface),
            PageSide::Right => self.spread.set_surface(SpreadSide::Right, surface),
        }
    }

    /// Switch layouts. Gestures in flight on the old layout are dropped.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.single.abandon();
        self.spread.abandon();
        self.store.set_view_mode(view_mode);
    }

    fn route(&self, side: PageSide) -> Option<Route> {
        match (self.store.state().view_mode, side) {
            (ViewMode::Single, PageSide::Single) => Some(Route::Single),
            (ViewMode::Spread, PageSide::Left) => Some(Route::Spread(SpreadSide::Left)),
            (ViewMode::Spread, PageSide::Right) => Some(Route::Spread(SpreadSide::Right)),
            (mode, side) => {
                tracing::trace!(?mode, %side, "event for hidden surface ignored");
                None
            }
        }
    }

    // --- Pointer and drag events ---

    pub fn on_pointer_down(&mut self, side: PageSide, event: PointerInput) -> Vec<Action> {
        let state = self.store.snapshot();
        let actions = match self.route(side) {
            Some(Route::Single) => self.single.on_pointer_down(&state, event),
            Some(Route::Spread(side)) => self.spread.on_pointer_down(&state, side, event),
            None => Vec::new(),
        };
        self.apply(&actions);
        actions
    }

    pub fn on_pointer_move(&mut self, side: PageSide, event: PointerInput) -> Vec<Action> {
        let state = self.store.snapshot();
        let actions = match self.route(side) {
            Some(Route::Single) => self.single.on_pointer_move(&state, event),
            Some(Route::Spread(side)) => self.spread.on_pointer_move(&state, side, event),
            None => Vec::new(),
        };
        self.apply(&actions);
        actions
    }

    pub fn on_pointer_up(&mut self, side: PageSide, event: PointerInput) -> Vec<Action> {
        let actions = match self.route(side) {
            Some(Route::Single) => self.single.on_pointer_up(event),
            Some(Route::Spread(_)) => self.spread.on_pointer_up(event),
            None => Vec::new(),
        };
        self.apply(&actions);
        actions
    }

    /// Platform-interrupted gesture; ends it exactly like pointer-up.
    pub fn on_pointer_cancel(&mut self, side: PageSide, event: PointerInput) -> Vec<Action> {
        let actions = match self.route(side) {
            Some(Route::Single) => self.single.on_pointer_cancel(event),
            Some(Route::Spread(_)) => self.spread.on_pointer_cancel(event),
            None => Vec::new(),
        };
        self.apply(&actions);
        actions
    }

    pub fn on_click(&mut self, side: PageSide, client: Point) -> Vec<Action> {
        let state = self.store.snapshot();
        let actions = match self.route(side) {
            Some(Route::Single) => self.single.on_click(&state, client, self.tool),
            Some(Route::Spread(side)) => self.spread.on_click(&state, side, client, self.tool),
            None => Vec::new(),
        };
        self.apply(&actions);
        actions
    }

    /// Drop of data carried under the configured drag key.
    pub fn on_drop(&mut self, side: PageSide, client: Point, data: &str) -> Vec<Action> {
        let actions = match self.route(side) {
            Some(Route::Single) => self.single.on_drop(client, data),
            Some(Route::Spread(side)) => self.spread.on_drop(side, client, data),
            None => Vec::new(),
        };
        self.apply(&actions);
        actions
    }

    pub fn on_wheel(&mut self, side: PageSide, client: Point, delta: WheelDelta) -> Vec<Action> {
        let state = self.store.snapshot();
        let actions = match self.route(side) {
            Some(Route::Single) => self.single.on_wheel(&state, client, delta),
            Some(Route::Spread(side)) => self.spread.on_wheel(&state, side, client, delta),
            None => Vec::new(),
        };
        self.apply(&actions);
        actions
    }

    /// Apply canvas actions to the store.
    pub fn apply(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::Select { id } => {
                    self.store.select_item(*id);
                }
                Action::MoveItem { id, x, y } => {
                    self.store.update_item(id, &ItemPatch::position(*x, *y));
                }
                Action::ResizeItem { id, width, height } => {
                    self.store.update_item(id, &ItemPatch::size(*width, *height));
                }
                Action::AddItem { input } => {
                    self.store.add_item(input.clone());
                }
                Action::PlaceText { side, x, y } => {
                    let config = self.store.config();
                    let input = CreateItemInput::new(ItemKind::Text)
                        .on_side(*side)
                        .at(*x, *y)
                        .sized(config.text_box_width, config.text_box_height)
                        .with_payload(ItemPayload { text: Some(TextPayload::default()), image_url: None });
                    self.store.add_item(input);
                }
                Action::RenderNeeded => {}
            }
        }
    }

    // --- Toolbar and panel commands ---

    pub fn add_item(&mut self, input: CreateItemInput) -> ItemId {
        self.store.add_item(input)
    }

    /// Add a text box with `content` at the default position.
    pub fn add_text(&mut self, content: &str) -> ItemId {
        let config = self.store.config();
        let input = CreateItemInput::new(ItemKind::Text)
            .sized(config.text_box_width, config.text_box_height)
            .with_payload(ItemPayload { text: Some(TextPayload { content: content.to_owned(), ..Default::default() }), image_url: None });
        self.store.add_item(input)
    }

    /// Add a palette sticker: `emoji` drawn on a `color` tile.
    pub fn add_sticker(&mut self, emoji: &str, color: &str) -> ItemId {
        self.store.add_item(sticker_input(emoji, color))
    }

    /// Drag payload for a palette sticker, for hosts that let the palette
    /// be dragged onto a page.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn sticker_drag_data(emoji: &str, color: &str) -> Result<String, serde_json::Error> {
        sticker_input(emoji, color).to_drag_data()
    }

    /// Add a plain `shape` in `color`.
    pub fn add_shape(&mut self, shape: StickerShape, color: &str) -> ItemId {
        let size = shape.size();
        let input = CreateItemInput::new(ItemKind::Sticker)
            .sized(size, size)
            .with_payload(ItemPayload { text: None, image_url: Some(shape.placeholder_url(color)) });
        self.store.add_item(input)
    }

    /// Add a photo from `url`.
    pub fn add_photo(&mut self, url: &str) -> ItemId {
        let input = CreateItemInput::new(ItemKind::Image)
            .sized(PHOTO_WIDTH, PHOTO_HEIGHT)
            .with_payload(ItemPayload { text: None, image_url: Some(url.to_owned()) });
        self.store.add_item(input)
    }

    pub fn update_item(&mut self, id: &ItemId, patch: &ItemPatch) -> bool {
        self.store.update_item(id, patch)
    }

    pub fn update_selected(&mut self, patch: &ItemPatch) -> bool {
        self.store.update_selected(patch)
    }

    pub fn update_selected_text(&mut self, content: &str) -> bool {
        self.store.update_selected_text(content)
    }

    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        self.store.remove_item(id)
    }

    /// Delete the selected item, if any.
    pub fn remove_selected(&mut self) -> bool {
        match self.store.state().selected_item_id {
            Some(id) => self.store.remove_item(&id),
            None => false,
        }
    }

    pub fn select_item(&mut self, id: Option<ItemId>) -> bool {
        self.store.select_item(id)
    }

    pub fn set_background(&mut self, background: impl Into<String>) {
        self.store.set_background(background);
    }

    pub fn replace_items(&mut self, items: Vec<EditorItem>) {
        self.store.replace_items(items);
    }

    /// Acknowledge a successful save.
    pub fn mark_saved(&mut self) {
        self.store.reset_dirty();
    }
}

fn sticker_input(emoji: &str, color: &str) -> CreateItemInput {
    CreateItemInput::new(ItemKind::Sticker).sized(STICKER_SIZE, STICKER_SIZE).with_payload(ItemPayload {
        text: Some(TextPayload::new(emoji, STICKER_FONT_SIZE, color)),
        image_url: Some(tile_data_url(emoji, color)),
    })
}
