//! Browser DOM backend built on `web-sys`.

use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::config::StrokeStyle;
use crate::error::OverlayError;
use crate::geometry::{ScreenPoint, Size};
use crate::traits::OverlayDom;

fn js_message(value: JsValue) -> OverlayError {
    OverlayError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// [`OverlayDom`] over a live browser document.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn context(canvas: &HtmlElement) -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let canvas = canvas.dyn_ref::<HtmlCanvasElement>()?.clone();
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some((canvas, context))
    }
}

impl OverlayDom for WebDom {
    type Element = HtmlElement;

    fn create_element(&mut self, tag: &str) -> Result<HtmlElement, OverlayError> {
        self.document
            .create_element(tag)
            .map_err(js_message)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| OverlayError::Dom(format!("<{}> is not an HTML element", tag)))
    }

    fn set_style(&mut self, element: &HtmlElement, property: &str, value: &str) {
        if let Err(err) = element.style().set_property(property, value) {
            warn!(property, error = ?err, "failed to set style");
        }
    }

    fn set_attribute(&mut self, element: &HtmlElement, name: &str, value: &str) {
        if let Err(err) = element.set_attribute(name, value) {
            warn!(name, error = ?err, "failed to set attribute");
        }
    }

    fn set_text(&mut self, element: &HtmlElement, text: &str) {
        element.set_text_content(Some(text));
    }

    fn append_child(&mut self, parent: &HtmlElement, child: &HtmlElement) -> Result<(), OverlayError> {
        parent.append_child(child).map(|_| ()).map_err(js_message)
    }

    fn remove_element(&mut self, element: &HtmlElement) -> bool {
        if !element.is_connected() {
            return false;
        }
        element.remove();
        true
    }

    fn is_connected(&self, element: &HtmlElement) -> bool {
        element.is_connected()
    }

    fn rendered_size(&self, element: &HtmlElement) -> Size {
        let rect = element.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }

    fn set_canvas_buffer(&mut self, canvas: &HtmlElement, width: u32, height: u32) {
        match canvas.dyn_ref::<HtmlCanvasElement>() {
            Some(canvas) => {
                canvas.set_width(width);
                canvas.set_height(height);
            }
            None => warn!("overlay canvas is not a <canvas>"),
        }
    }

    fn clear_canvas(&mut self, canvas: &HtmlElement) {
        if let Some((canvas, context)) = Self::context(canvas) {
            context.clear_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
        }
    }

    fn stroke_polyline(&mut self, canvas: &HtmlElement, points: &[ScreenPoint], style: &StrokeStyle) {
        let Some((_, context)) = Self::context(canvas) else {
            return;
        };
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        context.begin_path();
        context.move_to(first.x, first.y);
        for point in rest {
            context.line_to(point.x, point.y);
        }
        context.set_line_join("round");
        context.set_line_cap("round");
        context.set_line_width(style.width);
        context.set_stroke_style_str(&style.color);
        context.stroke();
    }
}
