use super::helpers::texture_entry;
use wgpu;

/// Bind group layouts and pipeline shared by every surface quad.
///
/// Group 0 holds the static assets (sampler, noise, gradient), group 1 the
/// per-surface uniforms and trail texture.
pub(crate) struct SmudgePipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) shared_bgl: wgpu::BindGroupLayout,
    pub(crate) quad_bgl: wgpu::BindGroupLayout,
}

pub(crate) fn create_smudge_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> SmudgePipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("smudge_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SMUDGE_WGSL.into()),
    });
    let shared_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("smudge_shared_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            texture_entry(1),
            texture_entry(2),
        ],
    });
    let quad_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("smudge_quad_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            texture_entry(1),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("smudge_pl"),
        bind_group_layouts: &[&shared_bgl, &quad_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("smudge_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_quad"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_smudge"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    SmudgePipeline {
        pipeline,
        shared_bgl,
        quad_bgl,
    }
}
