//! Editor state store: the single source of truth for one diary page.
//!
//! [`EditorState`] is an immutable snapshot. Every mutation is a pure
//! function from the previous snapshot to a new one, and [`EditorStore`]
//! swaps an `Arc` to publish it, so consumers can detect change with
//! `Arc::ptr_eq`. Mutations that change nothing (unknown ids) leave the
//! current snapshot in place and report `false`.
//!
//! Selection is view state: changing it never marks the document dirty.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::consts::{PANEL_FONT_SIZE, PANEL_TEXT_COLOR};
use crate::doc::{CreateItemInput, EditorItem, ItemBody, ItemId, ItemPatch, PageSide, TextPayload, ViewMode};

/// Initial contents for a store. Only `page_id` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEditorStateInput {
    pub page_id: String,
    #[serde(default)]
    pub view_mode: Option<ViewMode>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub selected_item_id: Option<ItemId>,
    #[serde(default)]
    pub items: Option<Vec<EditorItem>>,
}

impl CreateEditorStateInput {
    #[must_use]
    pub fn new(page_id: impl Into<String>) -> Self {
        Self { page_id: page_id.into(), ..Default::default() }
    }
}

/// One document's editable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    /// External key of the page this state edits.
    pub page_id: String,
    /// Which canvas layout is active.
    pub view_mode: ViewMode,
    /// Color applied to page surfaces.
    pub background: String,
    /// Items in insertion order. Paint order comes from `z_index`.
    pub items: Vec<EditorItem>,
    /// The selected item; always an id present in `items`, or `None`.
    pub selected_item_id: Option<ItemId>,
    /// True when the document changed since the last save.
    pub is_dirty: bool,
}

impl EditorState {
    /// Build the initial snapshot. Repeated ids keep their first item; a
    /// selection that names no item is dropped.
    #[must_use]
    pub fn new(input: CreateEditorStateInput, default_background: &str) -> Self {
        let items = unique_items(input.items.unwrap_or_default());
        let selected_item_id = input.selected_item_id.filter(|id| items.iter().any(|item| item.id == *id));
        Self {
            page_id: input.page_id,
            view_mode: input.view_mode.unwrap_or_default(),
            background: input.background.unwrap_or_else(|| default_background.to_owned()),
            items,
            selected_item_id,
            is_dirty: false,
        }
    }

    // --- Queries ---

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&EditorItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// The selected item, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&EditorItem> {
        self.selected_item_id.as_ref().and_then(|id| self.item(id))
    }

    /// Stacking order for the next inserted item: one above the current top,
    /// or 1. `None` when the top item already sits at `i64::MAX`.
    ///
    /// Linear in the item count, which stays small on a diary page.
    #[must_use]
    pub fn next_z_index(&self) -> Option<i64> {
        match self.items.iter().map(|item| item.z_index).max() {
            Some(top) => top.checked_add(1),
            None => Some(1),
        }
    }

    /// Items in paint order: ascending `z_index`, ties in insertion order.
    #[must_use]
    pub fn sorted_items(&self) -> Vec<&EditorItem> {
        let mut items: Vec<&EditorItem> = self.items.iter().collect();
        items.sort_by_key(|item| item.z_index);
        items
    }

    /// Paint-ordered items passing `visible`.
    #[must_use]
    pub fn sorted_items_where(&self, visible: impl Fn(&EditorItem) -> bool) -> Vec<&EditorItem> {
        let mut items: Vec<&EditorItem> = self.items.iter().filter(|item| visible(item)).collect();
        items.sort_by_key(|item| item.z_index);
        items
    }

    /// Items as a layers panel lists them: top layer first.
    #[must_use]
    pub fn layers(&self) -> Vec<&EditorItem> {
        let mut items = self.sorted_items();
        items.reverse();
        items
    }

    /// Items assigned to `side`.
    #[must_use]
    pub fn items_on(&self, side: PageSide) -> Vec<&EditorItem> {
        self.sorted_items_where(|item| item.page_side == side)
    }

    // --- Pure transitions ---

    /// New snapshot with an item built from `input` under `id`, selected.
    #[must_use]
    pub fn with_item_added(&self, id: ItemId, input: CreateItemInput, config: &EditorConfig) -> Self {
        let mut next = self.clone();
        let z_index = match self.next_z_index() {
            Some(z) => z,
            None => {
                tracing::debug!(items = next.items.len(), "z-index space exhausted, renumbering layers");
                next.renumber_layers()
            }
        };
        let item = EditorItem {
            id,
            page_side: input.page_side.unwrap_or_else(|| self.view_mode.default_side()),
            x: input.x.unwrap_or(config.default_item_x),
            y: input.y.unwrap_or(config.default_item_y),
            width: input.width.unwrap_or(config.default_item_size),
            height: input.height.unwrap_or(config.default_item_size),
            rotation: input.rotation.unwrap_or(0.0),
            z_index,
            body: ItemBody::from_parts(input.kind, input.payload.unwrap_or_default()),
        };
        next.items.push(item);
        next.selected_item_id = Some(id);
        next.is_dirty = true;
        next
    }

    /// New snapshot with `patch` merged into item `id`; `None` if no such item.
    #[must_use]
    pub fn with_item_updated(&self, id: &ItemId, patch: &ItemPatch) -> Option<Self> {
        let index = self.items.iter().position(|item| item.id == *id)?;
        let mut next = self.clone();
        next.items[index].apply_patch(patch);
        next.is_dirty = true;
        Some(next)
    }

    /// New snapshot without item `id`; `None` if no such item.
    #[must_use]
    pub fn with_item_removed(&self, id: &ItemId) -> Option<Self> {
        let index = self.items.iter().position(|item| item.id == *id)?;
        let mut next = self.clone();
        next.items.remove(index);
        if next.selected_item_id.as_ref() == Some(id) {
            next.selected_item_id = None;
        }
        next.is_dirty = true;
        Some(next)
    }

    /// New snapshot with a different selection; `None` if `id` names no item.
    #[must_use]
    pub fn with_selection(&self, id: Option<ItemId>) -> Option<Self> {
        if let Some(ref id) = id {
            self.item(id)?;
        }
        Some(Self { selected_item_id: id, ..self.clone() })
    }

    #[must_use]
    pub fn with_view_mode(&self, view_mode: ViewMode) -> Self {
        Self { view_mode, is_dirty: true, ..self.clone() }
    }

    #[must_use]
    pub fn with_background(&self, background: String) -> Self {
        Self { background, is_dirty: true, ..self.clone() }
    }

    /// New snapshot holding `items`, minus later copies of a repeated id. The
    /// selection survives only if its item is still present.
    #[must_use]
    pub fn with_items(&self, items: Vec<EditorItem>) -> Self {
        let items = unique_items(items);
        let selected_item_id = self.selected_item_id.filter(|id| items.iter().any(|item| item.id == *id));
        Self { items, selected_item_id, is_dirty: true, ..self.clone() }
    }

    #[must_use]
    pub fn with_dirty_cleared(&self) -> Self {
        Self { is_dirty: false, ..self.clone() }
    }

    /// Reassign `1..=n` in paint order and return the next free value.
    fn renumber_layers(&mut self) -> i64 {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by_key(|&index| self.items[index].z_index);
        let mut z = 0;
        for index in order {
            z += 1;
            self.items[index].z_index = z;
        }
        z + 1
    }
}

/// Keep the first item for each id.
fn unique_items(items: Vec<EditorItem>) -> Vec<EditorItem> {
    let mut seen = HashSet::with_capacity(items.len());
    let before = items.len();
    let items: Vec<EditorItem> = items.into_iter().filter(|item| seen.insert(item.id)).collect();
    if items.len() < before {
        tracing::warn!(dropped = before - items.len(), "duplicate item ids dropped");
    }
    items
}

/// Owner of the current [`EditorState`] snapshot.
pub struct EditorStore {
    state: Arc<EditorState>,
    config: EditorConfig,
}

impl EditorStore {
    /// Create a store for `input` using `config` defaults.
    #[must_use]
    pub fn new(input: CreateEditorStateInput, config: EditorConfig) -> Self {
        let state = EditorState::new(input, &config.background);
        Self { state: Arc::new(state), config }
    }

    /// Shared handle to the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<EditorState> {
        Arc::clone(&self.state)
    }

    /// Borrow the current snapshot.
    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn publish(&mut self, next: EditorState) {
        self.state = Arc::new(next);
    }

    // --- Document mutations ---

    /// Create an item from `input`, select it and return its id.
    pub fn add_item(&mut self, input: CreateItemInput) -> ItemId {
        let id = ItemId::new_v4();
        let next = self.state.with_item_added(id, input, &self.config);
        if let Some(item) = next.item(&id) {
            tracing::debug!(item_id = %id, kind = ?item.kind(), side = %item.page_side, z = item.z_index, "item added");
        }
        self.publish(next);
        id
    }

    /// Merge `patch` into item `id`. Returns `false` (and changes nothing)
    /// when the id is unknown. An empty patch publishes nothing.
    pub fn update_item(&mut self, id: &ItemId, patch: &ItemPatch) -> bool {
        if patch.is_empty() {
            return self.state.item(id).is_some();
        }
        match self.state.with_item_updated(id, patch) {
            Some(next) => {
                self.publish(next);
                true
            }
            None => {
                tracing::debug!(item_id = %id, "update ignored: unknown item");
                false
            }
        }
    }

    /// Property-panel edit of the selected item. Width and height are
    /// floored at the panel minimum. Returns `false` with no selection.
    pub fn update_selected(&mut self, patch: &ItemPatch) -> bool {
        let Some(id) = self.state.selected_item_id else {
            return false;
        };
        let floor = self.config.min_panel_size;
        let patch = ItemPatch {
            width: patch.width.map(|w| w.max(floor)),
            height: patch.height.map(|h| h.max(floor)),
            ..patch.clone()
        };
        self.update_item(&id, &patch)
    }

    /// Property-panel text edit of the selected item, keeping its font size
    /// and color. Returns `false` with no selection.
    pub fn update_selected_text(&mut self, content: &str) -> bool {
        let Some(selected) = self.state.selected_item() else {
            return false;
        };
        let id = selected.id;
        let text = match selected.body.text() {
            Some(current) => TextPayload::new(content, current.font_size, current.color.clone()),
            None => TextPayload::new(content, PANEL_FONT_SIZE, PANEL_TEXT_COLOR),
        };
        self.update_item(&id, &ItemPatch { text: Some(text), ..Default::default() })
    }

    /// Delete item `id`, clearing the selection if it pointed there.
    /// Returns `false` (and changes nothing) when the id is unknown.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        match self.state.with_item_removed(id) {
            Some(next) => {
                tracing::debug!(item_id = %id, "item removed");
                self.publish(next);
                true
            }
            None => false,
        }
    }

    /// Replace every item at once.
    pub fn replace_items(&mut self, items: Vec<EditorItem>) {
        let next = self.state.with_items(items);
        self.publish(next);
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        let next = self.state.with_view_mode(view_mode);
        self.publish(next);
    }

    pub fn set_background(&mut self, background: impl Into<String>) {
        let next = self.state.with_background(background.into());
        self.publish(next);
    }

    // --- View state ---

    /// Select `id`, or clear with `None`. Does not dirty the document.
    /// Returns `false` when `id` names no item.
    pub fn select_item(&mut self, id: Option<ItemId>) -> bool {
        if self.state.selected_item_id == id {
            return true;
        }
        match self.state.with_selection(id) {
            Some(next) => {
                self.publish(next);
                true
            }
            None => false,
        }
    }

    /// Clear the dirty flag after the document was persisted.
    pub fn reset_dirty(&mut self) {
        if self.state.is_dirty {
            let next = self.state.with_dirty_cleared();
            self.publish(next);
        }
    }
}
