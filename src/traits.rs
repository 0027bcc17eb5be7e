//! Collaborator interfaces for the route overlay.
//!
//! The overlay never owns the host map or the document it draws into. Embedding
//! apps implement these traits for their map library and DOM backend.

use crate::config::{FitOptions, StrokeStyle};
use crate::error::OverlayError;
use crate::geometry::{Bounds, LngLat, ScreenPoint, Size};

/// Notifications the overlay subscribes to on the host map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEvent {
    /// The map style finished loading. Fires once.
    Load,
    Move,
    Zoom,
    Resize,
}

impl MapEvent {
    /// Events that change the camera or viewport and require a redraw.
    pub const VIEWPORT: [MapEvent; 3] = [MapEvent::Move, MapEvent::Zoom, MapEvent::Resize];
}

/// Geo to pixel projection for one camera state.
pub trait Projection {
    fn project(&self, coord: LngLat) -> ScreenPoint;
}

/// The interactive map the overlay is drawn on top of.
///
/// Subscriptions are scoped resources: dropping the returned handle must
/// unsubscribe the listener, and must be a no-op once the map itself has been
/// destroyed.
pub trait HostMap {
    /// Handle to the map's container node.
    type Element: Clone;
    type Subscription;

    fn is_style_ready(&self) -> bool;

    /// Pixel position of `coord` under the current camera.
    fn project(&self, coord: LngLat) -> ScreenPoint;

    fn container(&self) -> Self::Element;

    /// Current bounding-rectangle size of the container.
    fn container_size(&self) -> Size;

    fn subscribe(&mut self, event: MapEvent) -> Self::Subscription;

    /// Animate the camera so `bounds` is visible. Fire and forget.
    fn fit_to_bounds(&mut self, bounds: Bounds, options: &FitOptions);
}

/// The document backend the overlay creates its nodes in.
pub trait OverlayDom {
    type Element: Clone;

    fn create_element(&mut self, tag: &str) -> Result<Self::Element, OverlayError>;

    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn set_text(&mut self, element: &Self::Element, text: &str);

    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element)
        -> Result<(), OverlayError>;

    /// Detach `element` from the tree. Returns `false` when it was not attached.
    fn remove_element(&mut self, element: &Self::Element) -> bool;

    fn is_connected(&self, element: &Self::Element) -> bool;

    /// Rendered size of an element after layout. Zero before first layout.
    fn rendered_size(&self, element: &Self::Element) -> Size;

    /// Resize a canvas backing buffer (not just its CSS box).
    fn set_canvas_buffer(&mut self, canvas: &Self::Element, width: u32, height: u32);

    fn clear_canvas(&mut self, canvas: &Self::Element);

    /// Stroke an open polyline with round joins and caps.
    fn stroke_polyline(
        &mut self,
        canvas: &Self::Element,
        points: &[ScreenPoint],
        style: &StrokeStyle,
    );
}
