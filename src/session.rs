use crate::core::{
    EffectParams, FrameScheduler, LoopAction, Surface, SurfaceRegistry, INTERACTIVE_MIN_WIDTH,
    TARGET_ATTRIBUTE,
};
use crate::dom::{self, Listener};
use crate::events::ViewObserver;
use crate::render::GpuState;
use crate::surface::RenderSurface;
use web_sys as web;

/// All state of one page's effect: GPU context, surfaces, scheduler and the
/// listeners that feed them. Shared as `Rc<RefCell<Session>>` between the
/// exported handle and the browser callbacks.
pub struct Session {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    params: EffectParams,
    gpu: Option<GpuState>,
    registry: SurfaceRegistry<web::Element, RenderSurface>,
    scheduler: FrameScheduler,
    observer: Option<ViewObserver>,
    listeners: Vec<Listener>,
}

impl Session {
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        params: EffectParams,
    ) -> Self {
        let viewport = dom::viewport();
        dom::sync_canvas_backing_size(&canvas, &viewport);
        Self {
            document,
            canvas,
            params,
            gpu: None,
            registry: SurfaceRegistry::new(viewport, INTERACTIVE_MIN_WIDTH),
            scheduler: FrameScheduler::new(),
            observer: None,
            listeners: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn document(&self) -> &web::Document {
        &self.document
    }

    pub fn install_gpu(&mut self, gpu: GpuState) {
        self.gpu = Some(gpu);
    }

    pub fn is_ready(&self) -> bool {
        self.gpu.is_some()
    }

    pub fn surface_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_attached(&self) -> bool {
        !self.registry.is_empty() || self.observer.is_some() || !self.listeners.is_empty()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn set_listeners(&mut self, listeners: Vec<Listener>) {
        self.listeners = listeners;
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    pub fn set_observer(&mut self, observer: ViewObserver) {
        self.observer = Some(observer);
    }

    /// Create surfaces for every tagged element that has none. Returns how
    /// many were created.
    pub fn attach(&mut self) -> usize {
        let targets = dom::tagged_elements(&self.document, TARGET_ATTRIBUTE);
        let Some(gpu) = self.gpu.as_ref() else {
            return self.registry.enter(false, targets, |_, _| None);
        };
        let params = self.params;
        let observer = self.observer.as_ref();
        self.registry.enter(true, targets, |el, viewport| {
            let mut surface = RenderSurface::new(el.clone(), gpu, params, viewport);
            match observer {
                Some(o) => o.observe(el),
                // without an observer every surface counts as in view
                None => surface.on_enter_view(),
            }
            Some(surface)
        })
    }

    /// Tear everything down. Returns the scheduler action to apply.
    pub fn detach(&mut self) -> LoopAction {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.listeners.clear();
        let action = self.scheduler.stop();
        self.registry.leave();
        action
    }

    /// Start the loop. Visibility is re-read first since nobody listened
    /// for it while detached.
    pub fn start(&mut self) -> LoopAction {
        let visibility = self.scheduler.set_hidden(self.document.hidden());
        match self.scheduler.start() {
            LoopAction::Nothing => visibility,
            action => action,
        }
    }

    pub fn set_in_view(&mut self, target: &web::Element, in_view: bool) {
        self.registry.set_in_view(target, in_view);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.registry.pointer_moved(x, y);
    }

    /// Recompute the shared viewport once, then resize every surface.
    pub fn resize(&mut self) {
        let viewport = dom::viewport();
        dom::sync_canvas_backing_size(&self.canvas, &viewport);
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let (w, h) = viewport.backing_size();
        gpu.resize(w, h);
        self.registry.resize(gpu, viewport);
    }

    pub fn page_visibility_changed(&mut self) -> LoopAction {
        let hidden = self.document.hidden();
        self.scheduler.set_hidden(hidden)
    }

    /// One animation frame. Returns whether another should be requested.
    pub fn frame(&mut self) -> bool {
        if !self.scheduler.tick() {
            return false;
        }
        let Some(gpu) = self.gpu.as_mut() else {
            return true;
        };
        self.registry.update_all(gpu);
        let quads = self.registry.visible().filter_map(|s| s.quad());
        match gpu.render(quads) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }
        true
    }
}
