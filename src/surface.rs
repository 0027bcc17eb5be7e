//! The overlay container and canvas injected into the host map container.

use tracing::{debug, trace};

use crate::error::OverlayError;
use crate::geometry::Size;
use crate::traits::OverlayDom;

/// Transparent, click-through layer holding the route canvas and markers.
#[derive(Debug, Clone)]
pub struct OverlaySurface<E> {
    pub container: E,
    pub canvas: E,
    /// Last backing-buffer size applied to the canvas.
    pub buffer: (u32, u32),
}

/// Owns at most one [`OverlaySurface`] at a time.
///
/// Creation and teardown are paired: [`SurfaceManager::teardown`] may be called
/// any number of times and only the first call after a creation does work.
#[derive(Debug)]
pub struct SurfaceManager<E> {
    surface: Option<OverlaySurface<E>>,
    z_index: i32,
}

impl<E: Clone> SurfaceManager<E> {
    pub fn new(z_index: i32) -> Self {
        Self {
            surface: None,
            z_index,
        }
    }

    pub fn surface(&self) -> Option<&OverlaySurface<E>> {
        self.surface.as_ref()
    }

    pub fn is_created(&self) -> bool {
        self.surface.is_some()
    }

    /// Build the layer inside `host_container`, replacing any previous one.
    pub fn create<D>(
        &mut self,
        dom: &mut D,
        host_container: &E,
        size: Size,
    ) -> Result<&OverlaySurface<E>, OverlayError>
    where
        D: OverlayDom<Element = E>,
    {
        self.teardown(dom);

        let container = dom.create_element("div")?;
        let z_index = self.z_index.to_string();
        for (property, value) in [
            ("position", "absolute"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("overflow", "hidden"),
            ("pointer-events", "none"),
            ("z-index", z_index.as_str()),
        ] {
            dom.set_style(&container, property, value);
        }
        dom.set_attribute(&container, "class", "route-overlay");

        let canvas = match dom.create_element("canvas") {
            Ok(canvas) => canvas,
            Err(err) => {
                dom.remove_element(&container);
                return Err(err);
            }
        };
        for (property, value) in [
            ("position", "absolute"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100%"),
        ] {
            dom.set_style(&canvas, property, value);
        }

        let buffer = size.to_buffer();
        dom.set_canvas_buffer(&canvas, buffer.0, buffer.1);

        dom.append_child(&container, &canvas)?;
        dom.append_child(host_container, &container)?;

        debug!(width = buffer.0, height = buffer.1, "created overlay surface");
        Ok(&*self.surface.insert(OverlaySurface {
            container,
            canvas,
            buffer,
        }))
    }

    /// Match the canvas backing buffer to the host container's current size.
    ///
    /// Returns `true` when the buffer changed.
    pub fn resize<D>(&mut self, dom: &mut D, size: Size) -> bool
    where
        D: OverlayDom<Element = E>,
    {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let buffer = size.to_buffer();
        if surface.buffer == buffer {
            return false;
        }
        dom.set_canvas_buffer(&surface.canvas, buffer.0, buffer.1);
        surface.buffer = buffer;
        trace!(width = buffer.0, height = buffer.1, "resized overlay canvas");
        true
    }

    /// Remove the layer from the document and forget it. Idempotent.
    pub fn teardown<D>(&mut self, dom: &mut D)
    where
        D: OverlayDom<Element = E>,
    {
        if let Some(surface) = self.surface.take() {
            let removed = dom.is_connected(&surface.container) && dom.remove_element(&surface.container);
            debug!(removed, "tore down overlay surface");
        }
    }
}
