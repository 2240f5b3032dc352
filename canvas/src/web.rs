//! Browser entry points.
//!
//! The host page wires DOM events to [`DiaryEditor`] and reads back JSON:
//! action lists from event handlers, item lists for painting, and the
//! document snapshot for saving. Surfaces are identified by their
//! `pageSide` name (`"single"`, `"left"`, `"right"`).

use std::str::FromStr;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::prelude::*;
use web_sys::DomRect;

use crate::config::EditorConfig;
use crate::coords::{PageSurface, Point};
use crate::doc::{CreateItemInput, EditorItem, ItemId, ItemPatch, PageSide, ViewMode};
use crate::engine::{Action, Editor};
use crate::input::{PointerInput, Tool, WheelDelta};
use crate::sticker::StickerShape;
use crate::store::CreateEditorStateInput;

/// Route `tracing` output to the browser console. Safe to call repeatedly.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(filter: Option<String>) {
    let filter = EnvFilter::new(filter.as_deref().unwrap_or("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);
    if let Err(err) = tracing_subscriber::registry().with(fmt_layer).try_init() {
        tracing::debug!(error = %err, "logging already initialised");
    }
}

fn surface_from(rect: &DomRect) -> PageSurface {
    PageSurface::new(rect.x(), rect.y(), rect.width(), rect.height())
}

fn side_from(side: &str) -> Result<PageSide, JsError> {
    Ok(PageSide::from_str(side)?)
}

fn actions_json(actions: &[Action]) -> Result<String, JsError> {
    Ok(serde_json::to_string(actions)?)
}

/// A diary page editor bound to one document.
#[wasm_bindgen]
pub struct DiaryEditor {
    inner: Editor,
}

#[wasm_bindgen]
impl DiaryEditor {
    /// Open a document. `state_json` is a `CreateEditorStateInput`;
    /// `config_json` optionally overrides editor defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(state_json: &str, config_json: Option<String>, notebook: bool) -> Result<DiaryEditor, JsError> {
        let input: CreateEditorStateInput = serde_json::from_str(state_json)?;
        let config = match config_json {
            Some(raw) => EditorConfig::from_json(&raw).inspect_err(|err| tracing::warn!(error = %err, "editor config rejected"))?,
            None => EditorConfig::default(),
        };
        let inner = if notebook { Editor::notebook(input, config) } else { Editor::new(input, config) };
        Ok(Self { inner })
    }

    // --- Layout ---

    #[wasm_bindgen(js_name = setSurface)]
    pub fn set_surface(&mut self, side: &str, rect: &DomRect) -> Result<(), JsError> {
        self.inner.set_surface(side_from(side)?, surface_from(rect));
        Ok(())
    }

    #[wasm_bindgen(js_name = setViewMode)]
    pub fn set_view_mode(&mut self, mode: &str) -> Result<(), JsError> {
        self.inner.set_view_mode(ViewMode::from_str(mode)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, tool: &str) -> Result<(), JsError> {
        self.inner.set_tool(Tool::from_str(tool)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, factor: f64) {
        self.inner.set_zoom(factor);
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> f64 {
        self.inner.zoom_in();
        self.inner.zoom().factor()
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> f64 {
        self.inner.zoom_out();
        self.inner.zoom().factor()
    }

    // --- Events ---

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, side: &str, pointer_id: i32, client_x: f64, client_y: f64) -> Result<String, JsError> {
        let actions = self.inner.on_pointer_down(side_from(side)?, PointerInput::new(pointer_id, client_x, client_y));
        actions_json(&actions)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, side: &str, pointer_id: i32, client_x: f64, client_y: f64) -> Result<String, JsError> {
        let actions = self.inner.on_pointer_move(side_from(side)?, PointerInput::new(pointer_id, client_x, client_y));
        actions_json(&actions)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, side: &str, pointer_id: i32, client_x: f64, client_y: f64) -> Result<String, JsError> {
        let actions = self.inner.on_pointer_up(side_from(side)?, PointerInput::new(pointer_id, client_x, client_y));
        actions_json(&actions)
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self, side: &str, pointer_id: i32, client_x: f64, client_y: f64) -> Result<String, JsError> {
        let actions = self.inner.on_pointer_cancel(side_from(side)?, PointerInput::new(pointer_id, client_x, client_y));
        actions_json(&actions)
    }

    pub fn click(&mut self, side: &str, client_x: f64, client_y: f64) -> Result<String, JsError> {
        let actions = self.inner.on_click(side_from(side)?, Point::new(client_x, client_y));
        actions_json(&actions)
    }

    /// `data` is whatever the data transfer held under the drag key.
    #[wasm_bindgen(js_name = drop)]
    pub fn handle_drop(&mut self, side: &str, client_x: f64, client_y: f64, data: &str) -> Result<String, JsError> {
        let actions = self.inner.on_drop(side_from(side)?, Point::new(client_x, client_y), data);
        actions_json(&actions)
    }

    pub fn wheel(&mut self, side: &str, client_x: f64, client_y: f64, delta_y: f64) -> Result<String, JsError> {
        let delta = WheelDelta { dx: 0.0, dy: delta_y };
        let actions = self.inner.on_wheel(side_from(side)?, Point::new(client_x, client_y), delta);
        actions_json(&actions)
    }

    // --- Commands ---

    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(&mut self, input_json: &str) -> Result<String, JsError> {
        let input: CreateItemInput = serde_json::from_str(input_json)?;
        Ok(self.inner.add_item(input).to_string())
    }

    #[wasm_bindgen(js_name = addText)]
    pub fn add_text(&mut self, content: &str) -> String {
        self.inner.add_text(content).to_string()
    }

    #[wasm_bindgen(js_name = addSticker)]
    pub fn add_sticker(&mut self, emoji: &str, color: &str) -> String {
        self.inner.add_sticker(emoji, color).to_string()
    }

    /// `shape` is `"rectangle"` or `"circle"`.
    #[wasm_bindgen(js_name = addShape)]
    pub fn add_shape(&mut self, shape: &str, color: &str) -> Result<String, JsError> {
        Ok(self.inner.add_shape(StickerShape::from_str(shape)?, color).to_string())
    }

    #[wasm_bindgen(js_name = addPhoto)]
    pub fn add_photo(&mut self, url: &str) -> String {
        self.inner.add_photo(url).to_string()
    }

    #[wasm_bindgen(js_name = updateItem)]
    pub fn update_item(&mut self, id: &str, patch_json: &str) -> Result<bool, JsError> {
        let id = ItemId::parse_str(id)?;
        let patch: ItemPatch = serde_json::from_str(patch_json)?;
        Ok(self.inner.update_item(&id, &patch))
    }

    #[wasm_bindgen(js_name = updateSelected)]
    pub fn update_selected(&mut self, patch_json: &str) -> Result<bool, JsError> {
        let patch: ItemPatch = serde_json::from_str(patch_json)?;
        Ok(self.inner.update_selected(&patch))
    }

    #[wasm_bindgen(js_name = updateSelectedText)]
    pub fn update_selected_text(&mut self, content: &str) -> bool {
        self.inner.update_selected_text(content)
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&mut self, id: &str) -> Result<bool, JsError> {
        Ok(self.inner.remove_item(&ItemId::parse_str(id)?))
    }

    #[wasm_bindgen(js_name = removeSelected)]
    pub fn remove_selected(&mut self) -> bool {
        self.inner.remove_selected()
    }

    #[wasm_bindgen(js_name = selectItem)]
    pub fn select_item(&mut self, id: Option<String>) -> Result<bool, JsError> {
        let id = id.as_deref().map(ItemId::parse_str).transpose()?;
        Ok(self.inner.select_item(id))
    }

    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, background: &str) {
        self.inner.set_background(background);
    }

    #[wasm_bindgen(js_name = replaceItems)]
    pub fn replace_items(&mut self, items_json: &str) -> Result<(), JsError> {
        let items: Vec<EditorItem> = serde_json::from_str(items_json)?;
        self.inner.replace_items(items);
        Ok(())
    }

    #[wasm_bindgen(js_name = markSaved)]
    pub fn mark_saved(&mut self) {
        self.inner.mark_saved();
    }

    // --- Reads ---

    /// Data-transfer key that drag sources put item payloads under.
    #[wasm_bindgen(getter, js_name = dragMime)]
    pub fn drag_mime(&self) -> String {
        self.inner.store().config().drag_mime.clone()
    }

    /// Payload a palette sticker button sets on `dragstart`.
    #[wasm_bindgen(js_name = stickerDragData)]
    pub fn sticker_drag_data(&self, emoji: &str, color: &str) -> Result<String, JsError> {
        Ok(Editor::sticker_drag_data(emoji, color)?)
    }

    /// Whether the single page renders as the lined notebook.
    #[wasm_bindgen(getter, js_name = isNotebook)]
    pub fn is_notebook(&self) -> bool {
        self.inner.single().is_notebook()
    }

    /// Zoom as the whole percentage the toolbar shows.
    #[wasm_bindgen(js_name = zoomPercent)]
    pub fn zoom_percent(&self) -> i32 {
        i32::try_from(self.inner.zoom().percent()).unwrap_or(100)
    }

    #[wasm_bindgen(js_name = isDirty)]
    pub fn is_dirty(&self) -> bool {
        self.inner.state().is_dirty
    }

    /// The full document snapshot as JSON.
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.inner.state())?)
    }

    /// Paint list for one surface as JSON.
    #[wasm_bindgen(js_name = renderList)]
    pub fn render_list(&self, side: &str) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.render_list(side_from(side)?))?)
    }

    /// Items top layer first, as JSON.
    pub fn layers(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.state().layers())?)
    }

    /// Items assigned to `side`, bottom layer first, as JSON.
    #[wasm_bindgen(js_name = itemsOn)]
    pub fn items_on(&self, side: &str) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.state().items_on(side_from(side)?))?)
    }
}
