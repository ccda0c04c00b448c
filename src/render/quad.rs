use super::helpers;
use super::GpuState;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct QuadUniforms {
    pub(crate) rect: [f32; 4],
    pub(crate) resolution: [f32; 2],
    pub(crate) mesh_size: [f32; 2],
    pub(crate) image_size: [f32; 2],
    pub(crate) time: f32,
    pub(crate) speed: f32,
    pub(crate) zoom: f32,
    pub(crate) grain_amount: f32,
    pub(crate) grain_speed: f32,
    pub(crate) noise_offset: f32,
}

/// GPU side of one render surface: its uniform buffer and the trail
/// texture, bound together in group 1.
pub(crate) struct QuadResources {
    uniform_buffer: wgpu::Buffer,
    trail_tex: wgpu::Texture,
    trail_view: wgpu::TextureView,
    trail_size: (u32, u32),
    bind_group: wgpu::BindGroup,
}

impl QuadResources {
    pub(crate) fn new(gpu: &GpuState, trail_width: u32, trail_height: u32) -> Self {
        let uniform_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quad_uniforms"),
            size: std::mem::size_of::<QuadUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (trail_tex, trail_view) = helpers::create_sampled_texture(
            &gpu.device,
            "trail_tex",
            trail_width,
            trail_height,
            wgpu::TextureFormat::Rgba8Unorm,
        );
        let bind_group = Self::bind(gpu, &uniform_buffer, &trail_view);
        Self {
            uniform_buffer,
            trail_tex,
            trail_view,
            trail_size: (trail_width, trail_height),
            bind_group,
        }
    }

    /// Replace the trail texture with one of the new size and rebind it.
    pub(crate) fn recreate_trail(&mut self, gpu: &GpuState, width: u32, height: u32) {
        let (tex, view) = helpers::create_sampled_texture(
            &gpu.device,
            "trail_tex",
            width,
            height,
            wgpu::TextureFormat::Rgba8Unorm,
        );
        self.trail_tex.destroy();
        self.trail_tex = tex;
        self.trail_view = view;
        self.trail_size = (width, height);
        self.bind_group = Self::bind(gpu, &self.uniform_buffer, &self.trail_view);
    }

    pub(crate) fn upload_trail(&self, gpu: &GpuState, pixels: &[u8]) {
        let (w, h) = self.trail_size;
        helpers::upload_rgba8(&gpu.queue, &self.trail_tex, w, h, pixels);
    }

    pub(crate) fn write_uniforms(&self, gpu: &GpuState, uniforms: &QuadUniforms) {
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub(crate) fn release(&self) {
        self.uniform_buffer.destroy();
        self.trail_tex.destroy();
    }

    fn bind(
        gpu: &GpuState,
        uniform_buffer: &wgpu::Buffer,
        trail_view: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quad_bg"),
            layout: &gpu.smudge.quad_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(trail_view),
                },
            ],
        })
    }
}
