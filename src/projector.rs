//! Camera-bound projection adapter over a [`HostMap`].

use crate::geometry::{LngLat, ScreenPoint};
use crate::traits::{HostMap, Projection};

/// Projects coordinates through the host map's current camera.
///
/// A projector borrows the map for the duration of one render pass. It is
/// never stored: every event builds a fresh one, so projected points always
/// reflect the camera at the time of the draw.
pub struct Projector<'a, M: HostMap> {
    map: &'a M,
}

impl<'a, M: HostMap> Projector<'a, M> {
    /// Returns `None` until the map's style is loaded.
    pub fn new(map: &'a M) -> Option<Self> {
        map.is_style_ready().then_some(Self { map })
    }
}

impl<M: HostMap> Projection for Projector<'_, M> {
    fn project(&self, coord: LngLat) -> ScreenPoint {
        self.map.project(coord)
    }
}

/// Project every coordinate in order.
pub fn project_all<P: Projection + ?Sized>(projection: &P, coords: &[LngLat]) -> Vec<ScreenPoint> {
    coords.iter().map(|coord| projection.project(*coord)).collect()
}
