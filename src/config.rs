//! Overlay styling and behavior settings.

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StrokeStyle {
    /// CSS color string.
    pub color: String,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

/// Two-pass route line: a wide outline stroked under a narrower fill.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathStyle {
    pub outline: StrokeStyle,
    pub fill: StrokeStyle,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            outline: StrokeStyle::new("#1e293b", 8.0),
            fill: StrokeStyle::new("#3b82f6", 5.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub origin_color: String,
    pub destination_color: String,
    pub via_color: String,
    pub text_color: String,
    /// Marker diameter in pixels, used until the element has been laid out.
    pub diameter: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            origin_color: "#16a34a".to_string(),
            destination_color: "#dc2626".to_string(),
            via_color: "#6b7280".to_string(),
            text_color: "#ffffff".to_string(),
            diameter: 28.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Padding {
    /// The right side leaves room for a details panel next to the map.
    fn default() -> Self {
        Self {
            top: 60.0,
            bottom: 60.0,
            left: 60.0,
            right: 420.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    pub padding: Padding,
    pub animation_duration_ms: u64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            animation_duration_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub path: PathStyle,
    pub markers: MarkerStyle,
    pub fit: FitOptions,
    /// Grace period before the first draw after the map becomes ready, so the
    /// host map can finish its own layout.
    pub initial_settle_ms: u64,
    pub z_index: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            path: PathStyle::default(),
            markers: MarkerStyle::default(),
            fit: FitOptions::default(),
            initial_settle_ms: 100,
            z_index: 10,
        }
    }
}

impl OverlayConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn initial_settle(&self) -> Duration {
        Duration::from_millis(self.initial_settle_ms)
    }
}
