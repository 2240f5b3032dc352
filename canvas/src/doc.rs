//! Item model: what can be placed on a diary page.
//!
//! An [`EditorItem`] pairs page geometry with an [`ItemBody`], a sum type
//! keyed by item kind so a text item always carries text and an image never
//! does. On the wire (drag payloads, host JSON) items keep the flat
//! `{ type, payload: { text?, imageUrl? } }` shape; [`ItemRecord`] and
//! [`ItemPayload`] are that shape, and conversion happens at the serde edge.
//!
//! Data flows into this layer from the store (creation, patches) and from
//! side panels via [`CreateItemInput`] drag payloads.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{FALLBACK_FONT_SIZE, FALLBACK_TEXT_COLOR};
use crate::coords::Rect;
use crate::error::{ParseEnumError, PayloadError};

/// Unique identifier for a placed item.
pub type ItemId = Uuid;

/// The kind of a placed item. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A free text box.
    Text,
    /// A decorative sticker, optionally labelled with an emoji or word.
    Sticker,
    /// A photo.
    Image,
}

/// Which page surface an item lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSide {
    /// The single-page view.
    #[default]
    Single,
    /// Left page of a spread.
    Left,
    /// Right page of a spread.
    Right,
}

impl FromStr for PageSide {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ParseEnumError::new("page side", other)),
        }
    }
}

impl fmt::Display for PageSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// How the document is laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One page surface.
    #[default]
    Single,
    /// Two facing page surfaces.
    Spread,
}

impl ViewMode {
    /// Side given to new items that do not name one.
    #[must_use]
    pub fn default_side(self) -> PageSide {
        match self {
            Self::Single => PageSide::Single,
            Self::Spread => PageSide::Left,
        }
    }
}

impl FromStr for ViewMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "spread" => Ok(Self::Spread),
            other => Err(ParseEnumError::new("view mode", other)),
        }
    }
}

/// Styled text carried by text items and labelled stickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPayload {
    pub content: String,
    pub font_size: f64,
    pub color: String,
}

impl TextPayload {
    #[must_use]
    pub fn new(content: impl Into<String>, font_size: f64, color: impl Into<String>) -> Self {
        Self { content: content.into(), font_size, color: color.into() }
    }
}

impl Default for TextPayload {
    fn default() -> Self {
        Self::new("", FALLBACK_FONT_SIZE, FALLBACK_TEXT_COLOR)
    }
}

/// Wire form of an item's content: every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Typed content of an item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemBody {
    /// A text box.
    Text(TextPayload),
    /// A sticker image, possibly decorated with a text label.
    Sticker { image_url: Option<String>, label: Option<TextPayload> },
    /// A photo.
    Image { image_url: Option<String> },
}

impl ItemBody {
    /// Narrow a wire payload to the shape `kind` allows.
    ///
    /// Text items without text get [`TextPayload::default`]; fields a kind
    /// cannot hold are dropped.
    #[must_use]
    pub fn from_parts(kind: ItemKind, payload: ItemPayload) -> Self {
        match kind {
            ItemKind::Text => Self::Text(payload.text.unwrap_or_default()),
            ItemKind::Sticker => Self::Sticker { image_url: payload.image_url, label: payload.text },
            ItemKind::Image => Self::Image { image_url: payload.image_url },
        }
    }

    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Text(_) => ItemKind::Text,
            Self::Sticker { .. } => ItemKind::Sticker,
            Self::Image { .. } => ItemKind::Image,
        }
    }

    /// Flatten back to the wire form.
    #[must_use]
    pub fn to_payload(&self) -> ItemPayload {
        match self {
            Self::Text(text) => ItemPayload { text: Some(text.clone()), image_url: None },
            Self::Sticker { image_url, label } => ItemPayload { text: label.clone(), image_url: image_url.clone() },
            Self::Image { image_url } => ItemPayload { text: None, image_url: image_url.clone() },
        }
    }

    /// Text shown on the item, if it has any.
    #[must_use]
    pub fn text(&self) -> Option<&TextPayload> {
        match self {
            Self::Text(text) => Some(text),
            Self::Sticker { label, .. } => label.as_ref(),
            Self::Image { .. } => None,
        }
    }
}

/// A placed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ItemRecord", from = "ItemRecord")]
pub struct EditorItem {
    /// Unique identifier, assigned at creation.
    pub id: ItemId,
    /// Surface the item belongs to.
    pub page_side: PageSide,
    /// Left edge in page-local units.
    pub x: f64,
    /// Top edge in page-local units.
    pub y: f64,
    /// Width in page-local units.
    pub width: f64,
    /// Height in page-local units.
    pub height: f64,
    /// Clockwise rotation in degrees around the center. Unbounded.
    pub rotation: f64,
    /// Stacking order; higher values paint above lower ones.
    pub z_index: i64,
    /// Kind-specific content.
    pub body: ItemBody,
}

impl EditorItem {
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.body.kind()
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Apply the fields present in `patch`. Kind-incompatible content is ignored.
    pub fn apply_patch(&mut self, patch: &ItemPatch) {
        if let Some(side) = patch.page_side {
            self.page_side = side;
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(h) = patch.height {
            self.height = h;
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
        if let Some(z) = patch.z_index {
            self.z_index = z;
        }
        if let Some(ref next) = patch.text {
            match &mut self.body {
                ItemBody::Text(text) => *text = next.clone(),
                ItemBody::Sticker { label, .. } => *label = Some(next.clone()),
                ItemBody::Image { .. } => {}
            }
        }
        if let Some(ref next) = patch.image_url {
            match &mut self.body {
                ItemBody::Sticker { image_url, .. } | ItemBody::Image { image_url } => *image_url = Some(next.clone()),
                ItemBody::Text(_) => {}
            }
        }
    }
}

/// Flat serde form of [`EditorItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub page_side: PageSide,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    pub z_index: i64,
    #[serde(default)]
    pub payload: ItemPayload,
}

impl From<EditorItem> for ItemRecord {
    fn from(item: EditorItem) -> Self {
        Self {
            id: item.id,
            kind: item.kind(),
            page_side: item.page_side,
            x: item.x,
            y: item.y,
            width: item.width,
            height: item.height,
            rotation: item.rotation,
            z_index: item.z_index,
            payload: item.body.to_payload(),
        }
    }
}

impl From<ItemRecord> for EditorItem {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: record.id,
            page_side: record.page_side,
            x: record.x,
            y: record.y,
            width: record.width,
            height: record.height,
            rotation: record.rotation,
            z_index: record.z_index,
            body: ItemBody::from_parts(record.kind, record.payload),
        }
    }
}

/// Request to create an item. Missing fields take store defaults.
///
/// This is also the drag-and-drop wire format: side panels serialize it to
/// JSON under [`crate::consts::DRAG_MIME`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemInput {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_side: Option<PageSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ItemPayload>,
}

impl CreateItemInput {
    #[must_use]
    pub fn new(kind: ItemKind) -> Self {
        Self { kind, page_side: None, x: None, y: None, width: None, height: None, rotation: None, payload: None }
    }

    #[must_use]
    pub fn on_side(mut self, side: PageSide) -> Self {
        self.page_side = Some(side);
        self
    }

    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    #[must_use]
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: ItemPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Decode a drag-and-drop payload.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Empty`] for blank data and
    /// [`PayloadError::Malformed`] when the JSON does not describe an input.
    pub fn from_drag_data(raw: &str) -> Result<Self, PayloadError> {
        if raw.trim().is_empty() {
            return Err(PayloadError::Empty);
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Encode as a drag-and-drop payload.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures (non-finite numbers).
    pub fn to_drag_data(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Sparse update for an item. Only present fields are applied.
///
/// `text` and `image_url` land on whichever part of the body can hold them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_side: Option<PageSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ItemPatch {
    /// Patch that moves an item.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    /// Patch that resizes an item.
    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Default::default() }
    }

    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
