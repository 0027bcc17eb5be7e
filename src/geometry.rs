//! Geographic and screen-space value types shared by the overlay components.

use serde::{Deserialize, Serialize};

/// A geographic coordinate as `(longitude, latitude)` in decimal degrees.
///
/// Longitude comes first to match the map-library convention used by host maps.
pub type LngLat = (f64, f64);

/// A point in screen pixels, relative to the host map container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Backing-buffer dimensions for a canvas of this size.
    pub fn to_buffer(self) -> (u32, u32) {
        (
            self.width.max(0.0).round() as u32,
            self.height.max(0.0).round() as u32,
        )
    }
}

/// Geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    /// A zero-area box around a single coordinate.
    pub fn around(point: LngLat) -> Self {
        let (lng, lat) = point;
        Self {
            west: lng,
            south: lat,
            east: lng,
            north: lat,
        }
    }

    /// Smallest box covering every point, or `None` when there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LngLat>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::around(first);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: LngLat) {
        let (lng, lat) = point;
        self.west = self.west.min(lng);
        self.east = self.east.max(lng);
        self.south = self.south.min(lat);
        self.north = self.north.max(lat);
    }
}
