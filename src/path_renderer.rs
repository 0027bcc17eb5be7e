//! Route line drawing.

use crate::config::PathStyle;
use crate::polyline::Polyline;
use crate::projector::project_all;
use crate::surface::OverlaySurface;
use crate::traits::{OverlayDom, Projection};

/// Strokes a decoded path onto the overlay canvas.
///
/// The line is drawn twice over the same projected points: a wide dark outline
/// and then the colored fill on top, which keeps the route legible on any
/// basemap.
#[derive(Debug, Clone, Default)]
pub struct PathRenderer {
    style: PathStyle,
}

impl PathRenderer {
    pub fn new(style: PathStyle) -> Self {
        Self { style }
    }

    /// Clear the canvas and draw `path` if it has at least two points.
    ///
    /// Returns whether anything was stroked.
    pub fn render<D, P>(
        &self,
        dom: &mut D,
        surface: &OverlaySurface<D::Element>,
        path: Option<&Polyline>,
        projection: &P,
    ) -> bool
    where
        D: OverlayDom,
        P: Projection + ?Sized,
    {
        dom.clear_canvas(&surface.canvas);

        let Some(path) = path.filter(|path| path.is_drawable()) else {
            return false;
        };

        let pixels = project_all(projection, path.points());
        dom.stroke_polyline(&surface.canvas, &pixels, &self.style.outline);
        dom.stroke_polyline(&surface.canvas, &pixels, &self.style.fill);
        true
    }
}
