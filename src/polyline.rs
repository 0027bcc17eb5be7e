//! Encoded polyline decoding for route geometries.
//!
//! Routes arrive from the routing backend as Google-style encoded polylines
//! (precision 1e5, latitude delta before longitude delta). Decoding happens
//! once per distinct input string at the overlay boundary; the rest of the
//! crate works with [`Polyline`] values holding `(lng, lat)` points.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::geometry::{Bounds, LngLat};

const PRECISION: f64 = 1e5;
const CHAR_OFFSET: u8 = 63;
const CONTINUATION: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;
/// Past this shift another 5-bit group would overflow an i64.
const MAX_SHIFT: u32 = 55;

/// A decoded route geometry.
///
/// Points are `(longitude, latitude)` tuples in stroke order: the first point
/// is the route start, the last the route end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<LngLat>,
}

impl Polyline {
    /// Creates a new Polyline from decoded `(lng, lat)` points.
    pub fn new(points: Vec<LngLat>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[LngLat] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A path needs at least two points to be stroked.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter().copied())
    }
}

/// Decode an encoded polyline into `(lng, lat)` points.
///
/// The empty string decodes to an empty polyline.
pub fn decode(encoded: &str) -> Result<Polyline, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        lat = accumulate(lat, next_value(bytes, &mut index)?, index)?;
        lng = accumulate(lng, next_value(bytes, &mut index)?, index)?;
        points.push((lng as f64 / PRECISION, lat as f64 / PRECISION));
    }

    Ok(Polyline::new(points))
}

/// Encode `(lng, lat)` points into a polyline string.
pub fn encode(points: &[LngLat]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for &(lng, lat) in points {
        let lat = (lat * PRECISION).round() as i64;
        let lng = (lng * PRECISION).round() as i64;
        push_value(lat - prev_lat, &mut out);
        push_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn accumulate(total: i64, delta: i64, position: usize) -> Result<i64, DecodeError> {
    total
        .checked_add(delta)
        .ok_or(DecodeError::Overflow { position })
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let position = *index;
        let byte = *bytes.get(position).ok_or(DecodeError::Truncated { position })?;
        if !(CHAR_OFFSET..=b'~').contains(&byte) {
            return Err(DecodeError::InvalidCharacter { position, byte });
        }
        if shift > MAX_SHIFT {
            return Err(DecodeError::Overflow { position });
        }

        let chunk = i64::from(byte - CHAR_OFFSET);
        *index += 1;
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    // zig-zag: odd values are negative
    Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}

fn push_value(value: i64, out: &mut String) {
    let mut value = if value < 0 { !(value << 1) } else { value << 1 };
    while value >= CONTINUATION {
        out.push(char::from((CONTINUATION | (value & CHUNK_MASK)) as u8 + CHAR_OFFSET));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHAR_OFFSET));
}
