//! Error types for decoding, DOM access and route fetching.

use std::fmt;

/// Failure to decode an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended while a value was still being read (continuation bit set,
    /// or a latitude without its longitude).
    Truncated { position: usize },
    /// Byte outside the `'?'..='~'` alphabet.
    InvalidCharacter { position: usize, byte: u8 },
    /// Too many 5-bit groups for a single value.
    Overflow { position: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated { position } => {
                write!(f, "polyline truncated at byte {}", position)
            }
            DecodeError::InvalidCharacter { position, byte } => {
                write!(f, "invalid polyline byte 0x{:02x} at {}", byte, position)
            }
            DecodeError::Overflow { position } => {
                write!(f, "polyline value overflows at byte {}", position)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Failure reported by an [`OverlayDom`](crate::traits::OverlayDom) backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    Dom(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::Dom(message) => write!(f, "dom error: {}", message),
        }
    }
}

impl std::error::Error for OverlayError {}

impl From<String> for OverlayError {
    fn from(message: String) -> Self {
        OverlayError::Dom(message)
    }
}

impl From<&str> for OverlayError {
    fn from(message: &str) -> Self {
        OverlayError::Dom(message.to_string())
    }
}

/// Failure to fetch route geometry from OSRM.
#[derive(Debug)]
pub enum RouteFetchError {
    #[cfg(not(target_arch = "wasm32"))]
    Http(reqwest::Error),
    /// OSRM answered with a non-`Ok` code or without any route.
    NoRoute(String),
    /// Fewer than two stops were supplied.
    TooFewStops(usize),
}

impl fmt::Display for RouteFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(not(target_arch = "wasm32"))]
            RouteFetchError::Http(err) => write!(f, "osrm request failed: {}", err),
            RouteFetchError::NoRoute(code) => write!(f, "osrm returned no route ({})", code),
            RouteFetchError::TooFewStops(count) => {
                write!(f, "a route needs at least 2 stops, got {}", count)
            }
        }
    }
}

impl std::error::Error for RouteFetchError {}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for RouteFetchError {
    fn from(err: reqwest::Error) -> Self {
        RouteFetchError::Http(err)
    }
}
