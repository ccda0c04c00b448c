use crate::assets::{ImagePixels, SharedAssets};
use crate::core::EffectError;
use glam::Vec2;
use web_sys as web;

mod helpers;
mod pipeline;
mod quad;

use pipeline::{create_smudge_pipeline, SmudgePipeline};
pub(crate) use quad::{QuadResources, QuadUniforms};

/// WebGPU context shared by every render surface: the overlay canvas
/// surface, the smudge pipeline and the static asset textures.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pub(crate) smudge: SmudgePipeline,
    shared_bind_group: wgpu::BindGroup,
    // kept alive for the shared bind group
    _noise_tex: wgpu::Texture,
    _gradient_tex: wgpu::Texture,
    image_size: Vec2,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: web::HtmlCanvasElement, assets: &SharedAssets) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| EffectError::Gpu("no adapter".to_string()))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        // Shader output is written as-is, so prefer a non-sRGB swapchain.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let smudge = create_smudge_pipeline(&device, format);

        let (noise_tex, noise_view) = upload_image(&device, &queue, "noise_tex", &assets.noise);
        let (gradient_tex, gradient_view) =
            upload_image(&device, &queue, "gradient_tex", &assets.gradient);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let shared_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("smudge_shared_bg"),
            layout: &smudge.shared_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Sampler(&linear_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&noise_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&gradient_view),
                },
            ],
        });

        log::info!(
            "[gpu] ready {}x{} {:?}, gradient {}x{}",
            width,
            height,
            format,
            assets.gradient.width,
            assets.gradient.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            smudge,
            shared_bind_group,
            _noise_tex: noise_tex,
            _gradient_tex: gradient_tex,
            image_size: assets.gradient.natural_size(),
            clear_color: wgpu::Color::TRANSPARENT,
        })
    }

    /// Natural size of the gradient image in pixels.
    pub fn image_size(&self) -> Vec2 {
        self.image_size
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw every given quad in one pass and submit once.
    pub(crate) fn render<'q>(
        &mut self,
        quads: impl Iterator<Item = &'q QuadResources>,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("smudge_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.smudge.pipeline);
            rpass.set_bind_group(0, &self.shared_bind_group, &[]);
            for q in quads {
                rpass.set_bind_group(1, q.bind_group(), &[]);
                rpass.draw(0..6, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn upload_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &ImagePixels,
) -> (wgpu::Texture, wgpu::TextureView) {
    let (tex, view) = helpers::create_sampled_texture(
        device,
        label,
        image.width,
        image.height,
        wgpu::TextureFormat::Rgba8Unorm,
    );
    helpers::upload_rgba8(queue, &tex, image.width, image.height, &image.rgba);
    (tex, view)
}
