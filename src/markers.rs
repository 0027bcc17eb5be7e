//! Waypoint markers: one absolutely positioned element per route stop.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::MarkerStyle;
use crate::geometry::LngLat;
use crate::surface::OverlaySurface;
use crate::traits::{OverlayDom, Projection};

/// A route stop supplied by the routing backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Waypoint {
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn lng_lat(&self) -> LngLat {
        (self.longitude, self.latitude)
    }
}

/// Position of a stop within the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointRole {
    Origin,
    Via,
    Destination,
}

impl WaypointRole {
    /// Role of the stop at `index` in a list of `count` stops.
    ///
    /// A single stop is an origin, never a destination.
    pub fn for_index(index: usize, count: usize) -> Self {
        if index == 0 {
            WaypointRole::Origin
        } else if index + 1 == count {
            WaypointRole::Destination
        } else {
            WaypointRole::Via
        }
    }

    pub fn label(self, index: usize) -> String {
        match self {
            WaypointRole::Origin => "A".to_string(),
            WaypointRole::Destination => "B".to_string(),
            WaypointRole::Via => index.to_string(),
        }
    }

    pub fn color(self, style: &MarkerStyle) -> &str {
        match self {
            WaypointRole::Origin => &style.origin_color,
            WaypointRole::Destination => &style.destination_color,
            WaypointRole::Via => &style.via_color,
        }
    }

    fn class_name(self) -> &'static str {
        match self {
            WaypointRole::Origin => "route-marker route-marker--origin",
            WaypointRole::Destination => "route-marker route-marker--destination",
            WaypointRole::Via => "route-marker route-marker--via",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Marker<E> {
    pub element: E,
    pub role: WaypointRole,
    pub label: String,
    pub coord: LngLat,
}

/// Owns the marker elements for the current waypoint list.
#[derive(Debug)]
pub struct MarkerManager<E> {
    style: MarkerStyle,
    markers: Vec<Marker<E>>,
}

impl<E: Clone> MarkerManager<E> {
    pub fn new(style: MarkerStyle) -> Self {
        Self {
            style,
            markers: Vec::new(),
        }
    }

    pub fn markers(&self) -> &[Marker<E>] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Replace every marker with fresh ones for `waypoints`.
    pub fn rebuild<D>(&mut self, dom: &mut D, surface: &OverlaySurface<E>, waypoints: &[Waypoint])
    where
        D: OverlayDom<Element = E>,
    {
        self.clear(dom);

        let count = waypoints.len();
        for (index, waypoint) in waypoints.iter().enumerate() {
            let role = WaypointRole::for_index(index, count);
            let label = role.label(index);
            match self.create_marker(dom, surface, waypoint, role, &label) {
                Ok(element) => self.markers.push(Marker {
                    element,
                    role,
                    label,
                    coord: waypoint.lng_lat(),
                }),
                Err(err) => warn!(id = %waypoint.id, error = %err, "failed to create waypoint marker"),
            }
        }

        debug!(count = self.markers.len(), "rebuilt waypoint markers");
    }

    /// Move each marker so its center sits on its projected coordinate.
    ///
    /// Markers are created hidden and only become visible once positioned.
    pub fn reposition<D, P>(&self, dom: &mut D, projection: &P)
    where
        D: OverlayDom<Element = E>,
        P: Projection + ?Sized,
    {
        for marker in &self.markers {
            let point = projection.project(marker.coord);
            let size = dom.rendered_size(&marker.element);
            let (width, height) = if size.is_empty() {
                (self.style.diameter, self.style.diameter)
            } else {
                (size.width, size.height)
            };
            let transform = format!(
                "translate({}px, {}px)",
                point.x - width / 2.0,
                point.y - height / 2.0
            );
            dom.set_style(&marker.element, "transform", &transform);
            dom.set_style(&marker.element, "visibility", "visible");
        }
    }

    /// Remove all marker elements. Already-detached elements are skipped.
    pub fn clear<D>(&mut self, dom: &mut D)
    where
        D: OverlayDom<Element = E>,
    {
        for marker in self.markers.drain(..) {
            if dom.is_connected(&marker.element) {
                dom.remove_element(&marker.element);
            }
        }
    }

    fn create_marker<D>(
        &self,
        dom: &mut D,
        surface: &OverlaySurface<E>,
        waypoint: &Waypoint,
        role: WaypointRole,
        label: &str,
    ) -> Result<E, crate::error::OverlayError>
    where
        D: OverlayDom<Element = E>,
    {
        let element = dom.create_element("div")?;
        let diameter = format!("{}px", self.style.diameter);
        for (property, value) in [
            ("position", "absolute"),
            ("top", "0"),
            ("left", "0"),
            ("width", diameter.as_str()),
            ("height", diameter.as_str()),
            ("line-height", diameter.as_str()),
            ("border-radius", "50%"),
            ("border", "2px solid #ffffff"),
            ("box-sizing", "border-box"),
            ("text-align", "center"),
            ("font-weight", "bold"),
            ("font-size", "13px"),
            ("background", role.color(&self.style)),
            ("color", self.style.text_color.as_str()),
            ("will-change", "transform"),
            ("visibility", "hidden"),
        ] {
            dom.set_style(&element, property, value);
        }
        dom.set_attribute(&element, "class", role.class_name());
        dom.set_attribute(&element, "title", &waypoint.name);
        dom.set_attribute(&element, "data-waypoint-id", &waypoint.id);
        dom.set_text(&element, label);
        dom.append_child(&surface.container, &element)?;
        Ok(element)
    }
}
