//! The route overlay engine: keeps the path and markers in sync with the host
//! map's camera.
//!
//! Host readiness and route data arrive independently and in any order. Both
//! triggers funnel into [`RouteOverlay::try_render`], which only draws once the
//! map is ready, the initial settle period has elapsed, and a surface exists.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::OverlayConfig;
use crate::geometry::Bounds;
use crate::markers::{MarkerManager, Waypoint};
use crate::path_renderer::PathRenderer;
use crate::polyline::{self, Polyline};
use crate::projector::Projector;
use crate::surface::SurfaceManager;
use crate::traits::{HostMap, MapEvent, OverlayDom};

pub struct RouteOverlay<M, D>
where
    M: HostMap,
    D: OverlayDom<Element = M::Element>,
{
    dom: D,
    config: OverlayConfig,
    surfaces: SurfaceManager<M::Element>,
    markers: MarkerManager<M::Element>,
    renderer: PathRenderer,
    subscriptions: Vec<M::Subscription>,
    load_subscription: Option<M::Subscription>,
    attached: bool,
    ready: bool,
    settled: bool,
    encoded_path: Option<String>,
    path: Option<Polyline>,
    waypoints: Vec<Waypoint>,
    fit_pending: bool,
}

impl<M, D> RouteOverlay<M, D>
where
    M: HostMap,
    D: OverlayDom<Element = M::Element>,
{
    pub fn new(dom: D, config: OverlayConfig) -> Self {
        Self {
            surfaces: SurfaceManager::new(config.z_index),
            markers: MarkerManager::new(config.markers.clone()),
            renderer: PathRenderer::new(config.path.clone()),
            dom,
            config,
            subscriptions: Vec::new(),
            load_subscription: None,
            attached: false,
            ready: false,
            settled: false,
            encoded_path: None,
            path: None,
            waypoints: Vec::new(),
            fit_pending: false,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn has_surface(&self) -> bool {
        self.surfaces.is_created()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn markers(&self) -> &MarkerManager<M::Element> {
        &self.markers
    }

    /// The decoded route, if the current input decoded to any points.
    pub fn path(&self) -> Option<&Polyline> {
        self.path.as_ref()
    }

    /// How long the host should wait before calling
    /// [`complete_initial_settle`](Self::complete_initial_settle), or `None`
    /// when no initial draw is outstanding.
    pub fn settle_delay(&self) -> Option<Duration> {
        (self.ready && !self.settled).then(|| self.config.initial_settle())
    }

    /// Start tracking `map`. Any previous attachment is torn down first.
    pub fn attach(&mut self, map: &mut M) {
        self.detach();
        self.attached = true;
        self.fit_pending = self.has_route_data();

        for event in MapEvent::VIEWPORT {
            self.subscriptions.push(map.subscribe(event));
        }

        if map.is_style_ready() {
            self.on_ready(map);
        } else {
            debug!("host map style not ready, waiting for load");
            self.load_subscription = Some(map.subscribe(MapEvent::Load));
        }
    }

    /// Drop every subscription and injected node. Safe to call repeatedly.
    pub fn detach(&mut self) {
        self.markers.clear(&mut self.dom);
        self.surfaces.teardown(&mut self.dom);
        self.subscriptions.clear();
        self.load_subscription = None;
        if self.attached {
            debug!("detached route overlay");
        }
        self.attached = false;
        self.ready = false;
        self.settled = false;
    }

    /// Dispatch entry point for host map notifications.
    pub fn handle_event(&mut self, map: &mut M, event: MapEvent) {
        if !self.attached {
            return;
        }
        match event {
            MapEvent::Load => {
                if !self.ready {
                    self.load_subscription = None;
                    self.on_ready(map);
                }
            }
            MapEvent::Move | MapEvent::Zoom => self.redraw(map),
            MapEvent::Resize => {
                self.surfaces.resize(&mut self.dom, map.container_size());
                self.redraw(map);
            }
        }
    }

    /// Perform the first draw once the host has waited out
    /// [`settle_delay`](Self::settle_delay).
    pub fn complete_initial_settle(&mut self, map: &mut M) {
        if self.ready && !self.settled {
            self.settled = true;
            self.try_render(map);
        }
    }

    /// Replace both route inputs.
    pub fn set_route(&mut self, map: &mut M, encoded_path: Option<&str>, waypoints: Vec<Waypoint>) {
        self.update_path(encoded_path);
        self.update_waypoints(waypoints);
        self.try_render(map);
    }

    /// Replace the encoded path. An unchanged string is not decoded again.
    pub fn set_path(&mut self, map: &mut M, encoded_path: Option<&str>) {
        self.update_path(encoded_path);
        self.try_render(map);
    }

    /// Replace the waypoint list; markers are always rebuilt from scratch and
    /// the camera is refit to the new route.
    pub fn set_waypoints(&mut self, map: &mut M, waypoints: Vec<Waypoint>) {
        self.update_waypoints(waypoints);
        self.try_render(map);
    }

    /// Draw if the map is ready and settled; a no-op otherwise.
    pub fn try_render(&mut self, map: &mut M) {
        if !(self.attached && self.ready && self.settled) {
            trace!(
                attached = self.attached,
                ready = self.ready,
                settled = self.settled,
                "skipping overlay render"
            );
            return;
        }
        self.redraw(map);
        if self.fit_pending {
            self.fit_to_route(map);
        }
    }

    fn on_ready(&mut self, map: &mut M) {
        let container = map.container();
        let size = map.container_size();
        if let Err(err) = self.surfaces.create(&mut self.dom, &container, size) {
            warn!(error = %err, "failed to create overlay surface");
            return;
        }
        self.ready = true;
        self.rebuild_markers();

        if self.config.initial_settle().is_zero() {
            self.settled = true;
            self.try_render(map);
        }
    }

    fn update_path(&mut self, encoded_path: Option<&str>) {
        if self.encoded_path.as_deref() == encoded_path {
            return;
        }
        self.encoded_path = encoded_path.map(str::to_string);
        self.path = match encoded_path.map(polyline::decode) {
            None => None,
            Some(Ok(path)) if path.is_empty() => None,
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => {
                warn!(error = %err, "ignoring undecodable route path");
                None
            }
        };
        self.fit_pending = self.has_route_data();
    }

    fn update_waypoints(&mut self, waypoints: Vec<Waypoint>) {
        self.waypoints = waypoints;
        self.fit_pending = self.has_route_data();
        self.rebuild_markers();
    }

    fn has_route_data(&self) -> bool {
        self.path.is_some() || !self.waypoints.is_empty()
    }

    fn rebuild_markers(&mut self) {
        match self.surfaces.surface() {
            Some(surface) => self.markers.rebuild(&mut self.dom, surface, &self.waypoints),
            None => self.markers.clear(&mut self.dom),
        }
    }

    fn redraw(&mut self, map: &M) {
        if !self.settled {
            return;
        }
        let Some(projector) = Projector::new(map) else {
            return;
        };
        let Some(surface) = self.surfaces.surface() else {
            return;
        };
        self.renderer
            .render(&mut self.dom, surface, self.path.as_ref(), &projector);
        self.markers.reposition(&mut self.dom, &projector);
    }

    fn fit_to_route(&mut self, map: &mut M) {
        self.fit_pending = false;
        let waypoint_coords = self.waypoints.iter().map(Waypoint::lng_lat);
        let path_coords = self.path.iter().flat_map(|path| path.points().iter().copied());
        if let Some(bounds) = Bounds::from_points(waypoint_coords.chain(path_coords)) {
            debug!(?bounds, "fitting camera to route");
            map.fit_to_bounds(bounds, &self.config.fit);
        }
    }
}

impl<M, D> Drop for RouteOverlay<M, D>
where
    M: HostMap,
    D: OverlayDom<Element = M::Element>,
{
    fn drop(&mut self) {
        self.detach();
    }
}
