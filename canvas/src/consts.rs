//! Shared numeric and string constants for the canvas crate.

// ── Item defaults ───────────────────────────────────────────────

/// Default x/y of an item created without an explicit position.
pub const DEFAULT_ITEM_POS: f64 = 40.0;

/// Default width and height of an item created without explicit geometry.
pub const DEFAULT_ITEM_SIZE: f64 = 120.0;

/// Page background applied when a document is opened without one.
pub const DEFAULT_BACKGROUND: &str = "#FFF8ED";

// ── Size limits ─────────────────────────────────────────────────

/// Smallest width/height reachable by handle resize or wheel.
pub const MIN_ITEM_SIZE: f64 = 48.0;

/// Smallest width/height accepted from the property panel.
pub const MIN_PANEL_SIZE: f64 = 40.0;

/// Largest width/height reachable by handle resize or wheel.
pub const MAX_ITEM_SIZE: f64 = 420.0;

/// Size change per wheel tick.
pub const WHEEL_STEP: f64 = 12.0;

// ── Text ────────────────────────────────────────────────────────

/// Width of the text box created by a text-tool click.
pub const TEXT_BOX_WIDTH: f64 = 180.0;

/// Height of the text box created by a text-tool click.
pub const TEXT_BOX_HEIGHT: f64 = 56.0;

/// Font size used when a text item carries no text payload.
pub const FALLBACK_FONT_SIZE: f64 = 16.0;

/// Text color used when a text item carries no text payload.
pub const FALLBACK_TEXT_COLOR: &str = "#111827";

/// Font size given to text edited in the property panel when none was set.
pub const PANEL_FONT_SIZE: f64 = 18.0;

/// Text color given to text edited in the property panel when none was set.
pub const PANEL_TEXT_COLOR: &str = "#1f2937";

// ── Zoom ────────────────────────────────────────────────────────

/// Lowest zoom factor the view allows.
pub const ZOOM_MIN: f64 = 0.6;

/// Highest zoom factor the view allows.
pub const ZOOM_MAX: f64 = 1.6;

/// Zoom change per zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 0.1;

// ── Hit-testing ─────────────────────────────────────────────────

/// Page-local hit slop around a corner resize handle.
pub const HANDLE_RADIUS: f64 = 8.0;

// ── Drag and drop ───────────────────────────────────────────────

/// Data-transfer key under which side panels carry a serialized item input.
pub const DRAG_MIME: &str = "application/x-dearme-item";

// ── Toolbar presets ─────────────────────────────────────────────

/// Side length of a sticker added from the sticker palette.
pub const STICKER_SIZE: f64 = 110.0;

/// Font size of the emoji label on a palette sticker.
pub const STICKER_FONT_SIZE: f64 = 48.0;

/// Width of a photo added from the photo button.
pub const PHOTO_WIDTH: f64 = 220.0;

/// Height of a photo added from the photo button.
pub const PHOTO_HEIGHT: f64 = 160.0;

/// Side length of a circle shape sticker.
pub const CIRCLE_SHAPE_PX: u32 = 100;

/// Side length of a rectangle shape sticker.
pub const RECT_SHAPE_PX: u32 = 120;

/// Image service that renders flat color placeholders for shape stickers.
pub const PLACEHOLDER_HOST: &str = "https://placehold.co";
