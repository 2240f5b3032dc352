//! Editor tunables.
//!
//! Every field has a default taken from [`crate::consts`], so a host only
//! needs to send the values it wants to change. [`EditorConfig::from_json`]
//! parses and validates a partial document in one step.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BACKGROUND, DEFAULT_ITEM_POS, DEFAULT_ITEM_SIZE, DRAG_MIME, HANDLE_RADIUS, MAX_ITEM_SIZE, MIN_ITEM_SIZE,
    MIN_PANEL_SIZE, TEXT_BOX_HEIGHT, TEXT_BOX_WIDTH, WHEEL_STEP, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use crate::error::ConfigError;

/// Tunable limits and defaults shared by the store and both canvases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// x of an item added without a position.
    pub default_item_x: f64,
    /// y of an item added without a position.
    pub default_item_y: f64,
    /// Width and height of an item added without a size.
    pub default_item_size: f64,
    /// Lower bound for handle resize and wheel resize.
    pub min_item_size: f64,
    /// Lower bound for width/height typed into the property panel.
    pub min_panel_size: f64,
    /// Upper bound for handle resize and wheel resize.
    pub max_item_size: f64,
    /// Size change per wheel tick.
    pub wheel_step: f64,
    /// Width of a text box placed with the text tool.
    pub text_box_width: f64,
    /// Height of a text box placed with the text tool.
    pub text_box_height: f64,
    /// Lowest zoom factor.
    pub zoom_min: f64,
    /// Highest zoom factor.
    pub zoom_max: f64,
    /// Zoom change per step.
    pub zoom_step: f64,
    /// Zoom factor a fresh editor starts at.
    pub default_zoom: f64,
    /// Background for documents opened without one.
    pub background: String,
    /// Data-transfer key for dropped item payloads.
    pub drag_mime: String,
    /// Page-local hit slop around corner handles.
    pub handle_radius: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_item_x: DEFAULT_ITEM_POS,
            default_item_y: DEFAULT_ITEM_POS,
            default_item_size: DEFAULT_ITEM_SIZE,
            min_item_size: MIN_ITEM_SIZE,
            min_panel_size: MIN_PANEL_SIZE,
            max_item_size: MAX_ITEM_SIZE,
            wheel_step: WHEEL_STEP,
            text_box_width: TEXT_BOX_WIDTH,
            text_box_height: TEXT_BOX_HEIGHT,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            default_zoom: 1.0,
            background: DEFAULT_BACKGROUND.to_owned(),
            drag_mime: DRAG_MIME.to_owned(),
            handle_radius: HANDLE_RADIUS,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a range check fails.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_item_size <= 0.0 || self.min_panel_size <= 0.0 {
            return Err(ConfigError::Invalid("minimum item sizes must be positive".into()));
        }
        if self.min_item_size > self.max_item_size {
            return Err(ConfigError::Invalid(format!(
                "minItemSize {} exceeds maxItemSize {}",
                self.min_item_size, self.max_item_size
            )));
        }
        if self.zoom_min <= 0.0 || self.zoom_min > self.zoom_max {
            return Err(ConfigError::Invalid(format!(
                "zoom range [{}, {}] is empty or not positive",
                self.zoom_min, self.zoom_max
            )));
        }
        if !(self.zoom_min..=self.zoom_max).contains(&self.default_zoom) {
            return Err(ConfigError::Invalid(format!("defaultZoom {} outside zoom range", self.default_zoom)));
        }
        if self.wheel_step <= 0.0 || self.zoom_step <= 0.0 {
            return Err(ConfigError::Invalid("step sizes must be positive".into()));
        }
        if self.default_item_size <= 0.0 || self.text_box_width <= 0.0 || self.text_box_height <= 0.0 {
            return Err(ConfigError::Invalid("default sizes must be positive".into()));
        }
        if self.handle_radius < 0.0 {
            return Err(ConfigError::Invalid("handleRadius must not be negative".into()));
        }
        Ok(())
    }
}
