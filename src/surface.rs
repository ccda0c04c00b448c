use crate::core::{
    EffectParams, QuadTransform, Rect, Surface, TrailField, Viewport, TIME_WRAP,
};
use crate::dom;
use crate::render::{GpuState, QuadResources, QuadUniforms};
use web_sys as web;

/// One shader quad overlaying one tagged element.
pub struct RenderSurface {
    element: web::Element,
    trail: TrailField,
    params: EffectParams,
    visible: bool,
    rect: Rect,
    quad: QuadTransform,
    viewport: Viewport,
    time: f32,
    noise_offset: f32,
    gpu: Option<QuadResources>,
}

impl RenderSurface {
    pub fn new(
        element: web::Element,
        gpu: &GpuState,
        base_params: EffectParams,
        viewport: &Viewport,
    ) -> Self {
        let params = base_params.with_overrides(|key| element.get_attribute(key));
        let rect = dom::element_rect(&element);
        let trail = TrailField::new(rect.aspect());
        let (tw, th) = trail.size();
        let resources = QuadResources::new(gpu, tw, th);
        resources.upload_trail(gpu, trail.pixels());

        Self {
            quad: QuadTransform::from_rect(&rect, viewport),
            element,
            trail,
            params,
            visible: false,
            rect,
            viewport: *viewport,
            time: 0.0,
            noise_offset: rand::random::<f32>(),
            gpu: Some(resources),
        }
    }

    pub(crate) fn quad(&self) -> Option<&QuadResources> {
        self.gpu.as_ref()
    }

    fn uniforms(&self, image_size: glam::Vec2) -> QuadUniforms {
        QuadUniforms {
            rect: self.quad.to_array(),
            resolution: self.viewport.size().to_array(),
            mesh_size: self.rect.size().max(glam::Vec2::ONE).to_array(),
            image_size: image_size.to_array(),
            time: self.time,
            speed: self.params.speed,
            zoom: self.params.zoom,
            grain_amount: self.params.grain_amount,
            grain_speed: self.params.grain_speed,
            noise_offset: self.noise_offset,
        }
    }

    fn refresh_layout(&mut self) {
        self.rect = dom::element_rect(&self.element);
        self.quad = QuadTransform::from_rect(&self.rect, &self.viewport);
    }
}

impl Surface for RenderSurface {
    type Gpu = GpuState;

    fn on_enter_view(&mut self) {
        self.visible = true;
    }

    fn on_leave_view(&mut self) {
        self.visible = false;
        self.trail.reset();
    }

    fn is_visible(&self) -> bool {
        self.visible && self.gpu.is_some()
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.gpu.is_none() {
            return;
        }
        // Hover is decided against the live layout box, so a pointer that
        // was already over the element when it attached still counts.
        let rect = dom::element_rect(&self.element);
        if let Some(uv) = rect.local_point(x, y) {
            self.trail.add_point(uv.x, uv.y);
        }
    }

    fn update(&mut self, gpu: &GpuState) {
        // Scrolling moves elements without a resize event.
        self.refresh_layout();
        if !self.visible {
            return;
        }
        let Some(resources) = &self.gpu else {
            return;
        };
        self.time = (self.time + self.params.time_step) % TIME_WRAP;
        self.trail.update();
        if self.trail.take_dirty() {
            resources.upload_trail(gpu, self.trail.pixels());
        }
        resources.write_uniforms(gpu, &self.uniforms(gpu.image_size()));
    }

    fn resize(&mut self, gpu: &GpuState, viewport: &Viewport) {
        self.viewport = *viewport;
        self.refresh_layout();
        self.trail.resize(self.rect.aspect());
        let (tw, th) = self.trail.size();
        let uniforms = self.uniforms(gpu.image_size());
        if let Some(resources) = self.gpu.as_mut() {
            resources.recreate_trail(gpu, tw, th);
            resources.upload_trail(gpu, self.trail.pixels());
            resources.write_uniforms(gpu, &uniforms);
        }
        self.trail.take_dirty();
    }

    fn destroy(&mut self) {
        self.visible = false;
        if let Some(resources) = self.gpu.take() {
            resources.release();
        }
        self.trail.reset();
    }
}
