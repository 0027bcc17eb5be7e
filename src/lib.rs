//! route-overlay
//!
//! Draws a route line and waypoint markers over a host-owned interactive map,
//! re-projecting on every camera change.

pub mod config;
pub mod error;
pub mod geometry;
pub mod markers;
#[cfg(not(target_arch = "wasm32"))]
pub mod osrm;
pub mod overlay;
pub mod path_renderer;
pub mod polyline;
pub mod projector;
pub mod surface;
pub mod traits;
#[cfg(feature = "web")]
pub mod web;

pub use config::OverlayConfig;
pub use markers::{Waypoint, WaypointRole};
pub use overlay::RouteOverlay;
pub use polyline::{Polyline, decode, encode};
