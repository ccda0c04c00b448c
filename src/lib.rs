#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod assets;
mod core;
mod dom;
mod events;
mod frame;
mod render;
mod session;
mod surface;

use crate::core::EffectParams;
use assets::SharedAssets;
use frame::FrameLoop;
use render::GpuState;
use session::Session;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gradient-smudge loaded");
    Ok(())
}

/// Page-level effect session. Construct once, then call `enter()` and
/// `leave()` from the host's navigation hooks.
#[wasm_bindgen]
pub struct GradientSmudge {
    session: Rc<RefCell<Session>>,
    frame: Rc<FrameLoop>,
}

#[wasm_bindgen]
impl GradientSmudge {
    /// Creates the overlay canvas and starts loading WebGPU and both images
    /// in the background. `on_ready` is called once the effect can attach.
    #[wasm_bindgen(constructor)]
    pub fn new(
        gradient_url: String,
        noise_url: String,
        on_ready: Option<js_sys::Function>,
    ) -> Result<GradientSmudge, JsValue> {
        let document =
            dom::window_document().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let canvas = dom::create_overlay_canvas(&document)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let session = Rc::new(RefCell::new(Session::new(
            document,
            canvas.clone(),
            EffectParams::default(),
        )));
        let frame = FrameLoop::new(&session);

        let weak = Rc::downgrade(&session);
        spawn_local(async move {
            if let Err(e) = init(weak, canvas, &gradient_url, &noise_url).await {
                log::error!("init error: {:?}", e);
                return;
            }
            if let Some(cb) = on_ready {
                _ = cb.call0(&JsValue::NULL);
            }
        });

        Ok(Self { session, frame })
    }

    /// Attach a surface to every tagged element and start animating.
    /// Silently does nothing before the assets are ready or when no element
    /// is tagged.
    pub fn enter(&self) {
        let mut s = self.session.borrow_mut();
        if !s.is_ready() {
            log::debug!("[session] enter before ready; ignoring");
            return;
        }
        if !s.has_observer() {
            match events::ViewObserver::new(Rc::downgrade(&self.session)) {
                Ok(o) => s.set_observer(o),
                Err(e) => log::warn!("[session] IntersectionObserver unavailable: {:?}", e),
            }
        }
        s.attach();
        if s.surface_count() == 0 {
            return;
        }
        if !s.has_listeners() {
            let document = s.document().clone();
            s.set_listeners(events::wire_global_listeners(
                &self.session,
                &self.frame,
                &document,
            ));
        }
        let action = s.start();
        drop(s);
        self.frame.apply(action);
    }

    /// Tear down every surface and listener. Safe to call repeatedly.
    pub fn leave(&self) {
        let mut s = self.session.borrow_mut();
        if !s.is_attached() {
            return;
        }
        let action = s.detach();
        drop(s);
        self.frame.apply(action);
        log::info!("[session] left");
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.session.borrow().is_ready()
    }

    #[wasm_bindgen(js_name = surfaceCount)]
    pub fn surface_count(&self) -> usize {
        self.session.borrow().surface_count()
    }
}

impl Drop for GradientSmudge {
    fn drop(&mut self) {
        self.leave();
        self.session.borrow().canvas().remove();
    }
}

async fn init(
    session: std::rc::Weak<RefCell<Session>>,
    canvas: web_sys::HtmlCanvasElement,
    gradient_url: &str,
    noise_url: &str,
) -> anyhow::Result<()> {
    let assets = SharedAssets::load(gradient_url, noise_url).await?;
    let gpu = GpuState::new(canvas, &assets).await?;
    let session = session
        .upgrade()
        .ok_or_else(|| anyhow::anyhow!("session dropped during init"))?;
    session.borrow_mut().install_gpu(gpu);
    log::info!("[session] ready");
    Ok(())
}
