//! Test doubles for route-overlay.
//!
//! Provides:
//! - `FakeMap`: a host map with a linear camera and RAII subscriptions
//! - `FakeDom`: an in-memory element tree that records canvas operations

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use route_overlay::config::{FitOptions, StrokeStyle};
use route_overlay::error::OverlayError;
use route_overlay::geometry::{Bounds, LngLat, ScreenPoint, Size};
use route_overlay::traits::{HostMap, MapEvent, OverlayDom};

pub type NodeId = usize;

/// The host map container, always present in a `FakeDom`.
pub const MAP_CONTAINER: NodeId = 0;

type Listeners = Rc<RefCell<HashMap<u64, MapEvent>>>;

pub struct FakeSubscription {
    id: u64,
    listeners: Weak<RefCell<HashMap<u64, MapEvent>>>,
}

impl Drop for FakeSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(&self.id);
        }
    }
}

pub struct FakeMap {
    pub style_ready: bool,
    pub center: LngLat,
    /// Pixels per degree.
    pub scale: f64,
    pub size: Size,
    pub fits: Vec<(Bounds, FitOptions)>,
    pub project_calls: Cell<usize>,
    listeners: Listeners,
    next_id: u64,
}

impl FakeMap {
    pub fn ready() -> Self {
        Self {
            style_ready: true,
            center: (-121.0, 40.0),
            scale: 100.0,
            size: Size::new(800.0, 600.0),
            fits: Vec::new(),
            project_calls: Cell::new(0),
            listeners: Rc::new(RefCell::new(HashMap::new())),
            next_id: 0,
        }
    }

    pub fn loading() -> Self {
        Self {
            style_ready: false,
            ..Self::ready()
        }
    }

    pub fn pan(&mut self, d_lng: f64, d_lat: f64) {
        self.center = (self.center.0 + d_lng, self.center.1 + d_lat);
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.scale *= factor;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listens_to(&self, event: MapEvent) -> bool {
        self.listeners.borrow().values().any(|e| *e == event)
    }
}

impl HostMap for FakeMap {
    type Element = NodeId;
    type Subscription = FakeSubscription;

    fn is_style_ready(&self) -> bool {
        self.style_ready
    }

    fn project(&self, coord: LngLat) -> ScreenPoint {
        self.project_calls.set(self.project_calls.get() + 1);
        ScreenPoint::new(
            (coord.0 - self.center.0) * self.scale + self.size.width / 2.0,
            (self.center.1 - coord.1) * self.scale + self.size.height / 2.0,
        )
    }

    fn container(&self) -> NodeId {
        MAP_CONTAINER
    }

    fn container_size(&self) -> Size {
        self.size
    }

    fn subscribe(&mut self, event: MapEvent) -> FakeSubscription {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.borrow_mut().insert(id, event);
        FakeSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    fn fit_to_bounds(&mut self, bounds: Bounds, options: &FitOptions) {
        self.fits.push((bounds, *options));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    Clear,
    Stroke {
        points: Vec<ScreenPoint>,
        style: StrokeStyle,
    },
}

#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    pub tag: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub styles: HashMap<String, String>,
    pub attributes: HashMap<String, String>,
    pub text: String,
}

impl FakeNode {
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

pub struct FakeDom {
    nodes: Vec<FakeNode>,
    pub canvas_ops: HashMap<NodeId, Vec<CanvasOp>>,
    pub buffers: HashMap<NodeId, (u32, u32)>,
    /// Rendered size reported for marker elements.
    pub marker_size: Size,
    /// Tag whose creation fails, for error-path tests.
    pub fail_tag: Option<String>,
}

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDom {
    pub fn new() -> Self {
        let root = FakeNode {
            tag: "map-container".to_string(),
            ..FakeNode::default()
        };
        Self {
            nodes: vec![root],
            canvas_ops: HashMap::new(),
            buffers: HashMap::new(),
            marker_size: Size::new(24.0, 24.0),
            fail_tag: None,
        }
    }

    pub fn node(&self, id: NodeId) -> &FakeNode {
        &self.nodes[id]
    }

    /// Every node currently attached under the map container, depth first.
    pub fn injected(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[MAP_CONTAINER].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        out
    }

    pub fn injected_count(&self) -> usize {
        self.injected().len()
    }

    /// Attached marker nodes in document order.
    pub fn marker_nodes(&self) -> Vec<&FakeNode> {
        self.injected()
            .into_iter()
            .map(|id| &self.nodes[id])
            .filter(|node| node.attribute("title").is_some())
            .collect()
    }

    pub fn canvases(&self) -> Vec<NodeId> {
        self.injected()
            .into_iter()
            .filter(|id| self.nodes[*id].tag == "canvas")
            .collect()
    }

    pub fn ops(&self, canvas: NodeId) -> &[CanvasOp] {
        self.canvas_ops.get(&canvas).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn strokes(&self, canvas: NodeId) -> Vec<(&[ScreenPoint], &StrokeStyle)> {
        self.ops(canvas)
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Stroke { points, style } => Some((points.as_slice(), style)),
                CanvasOp::Clear => None,
            })
            .collect()
    }

    pub fn take_ops(&mut self, canvas: NodeId) -> Vec<CanvasOp> {
        self.canvas_ops.remove(&canvas).unwrap_or_default()
    }
}

impl OverlayDom for FakeDom {
    type Element = NodeId;

    fn create_element(&mut self, tag: &str) -> Result<NodeId, OverlayError> {
        if self.fail_tag.as_deref() == Some(tag) {
            return Err(OverlayError::Dom(format!("cannot create <{}>", tag)));
        }
        self.nodes.push(FakeNode {
            tag: tag.to_string(),
            ..FakeNode::default()
        });
        Ok(self.nodes.len() - 1)
    }

    fn set_style(&mut self, element: &NodeId, property: &str, value: &str) {
        self.nodes[*element]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        self.nodes[*element]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_text(&mut self, element: &NodeId, text: &str) {
        self.nodes[*element].text = text.to_string();
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), OverlayError> {
        if let Some(old) = self.nodes[*child].parent.take() {
            self.nodes[old].children.retain(|c| c != child);
        }
        self.nodes[*child].parent = Some(*parent);
        self.nodes[*parent].children.push(*child);
        Ok(())
    }

    fn remove_element(&mut self, element: &NodeId) -> bool {
        if !self.is_connected(element) {
            return false;
        }
        if let Some(parent) = self.nodes[*element].parent.take() {
            self.nodes[parent].children.retain(|c| c != element);
        }
        true
    }

    fn is_connected(&self, element: &NodeId) -> bool {
        let mut current = *element;
        loop {
            if current == MAP_CONTAINER {
                return true;
            }
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn rendered_size(&self, element: &NodeId) -> Size {
        if self.nodes[*element].attributes.contains_key("title") && self.is_connected(element) {
            self.marker_size
        } else {
            Size::default()
        }
    }

    fn set_canvas_buffer(&mut self, canvas: &NodeId, width: u32, height: u32) {
        self.buffers.insert(*canvas, (width, height));
    }

    fn clear_canvas(&mut self, canvas: &NodeId) {
        self.canvas_ops.entry(*canvas).or_default().push(CanvasOp::Clear);
    }

    fn stroke_polyline(&mut self, canvas: &NodeId, points: &[ScreenPoint], style: &StrokeStyle) {
        self.canvas_ops.entry(*canvas).or_default().push(CanvasOp::Stroke {
            points: points.to_vec(),
            style: style.clone(),
        });
    }
}
