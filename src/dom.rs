use crate::core::{attribute_selector, EffectError, Rect, Viewport};
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            log::warn!("[dom] addEventListener({}) failed: {:?}", event, e);
        }
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

pub fn window_document() -> Result<web::Document, EffectError> {
    web::window()
        .ok_or(EffectError::NoWindow)?
        .document()
        .ok_or(EffectError::NoDocument)
}

pub fn viewport() -> Viewport {
    let Some(w) = web::window() else {
        return Viewport::default();
    };
    let inner_w = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let inner_h = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let client = w
        .document()
        .and_then(|d| d.document_element())
        .map(|root| Vec2::new(root.client_width() as f32, root.client_height() as f32))
        .unwrap_or(Vec2::ZERO);
    Viewport::from_client(
        client,
        Vec2::new(inner_w as f32, inner_h as f32),
        w.device_pixel_ratio(),
    )
}

#[inline]
pub fn element_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

/// All elements carrying `attribute`, in document order.
pub fn tagged_elements(document: &web::Document, attribute: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(&attribute_selector(attribute)) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

/// Full-viewport canvas behind page content that never takes pointer input.
pub fn create_overlay_canvas(
    document: &web::Document,
) -> Result<web::HtmlCanvasElement, EffectError> {
    let dom_err = |e: wasm_bindgen::JsValue| EffectError::Dom(format!("{:?}", e));
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(dom_err)?
        .dyn_into()
        .map_err(|e| dom_err(e.into()))?;
    _ = canvas.set_attribute(
        "style",
        "position:fixed;left:0;top:0;width:100%;height:100%;pointer-events:none;z-index:-1",
    );
    _ = canvas.set_attribute("aria-hidden", "true");
    let body = document.body().ok_or(EffectError::NoDocument)?;
    body.append_child(&canvas).map_err(dom_err)?;
    Ok(canvas)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w, h) = viewport.backing_size();
    canvas.set_width(w);
    canvas.set_height(h);
}
