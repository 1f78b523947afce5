//! Upload the canvas to the GPU and draw it letterboxed on the surface.

use std::borrow::Cow;

use super::{gpu::Frame, letterbox::Letterbox};
use crate::image::Image;

/// Texture format of the buffer, the canvas colors are stored as sRGB.
const BUFFER_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Shader drawing a fullscreen triangle sampling the buffer texture, validated and minified by the build script.
const PRESENT_SHADER: &str = include_str!(concat!(env!("OUT_DIR"), "/present.wgsl"));

/// GPU state for presenting the buffer.
pub(crate) struct PresentState {
    /// Texture the canvas is uploaded to.
    texture: wgpu::Texture,
    /// Size of the texture.
    texture_size: wgpu::Extent3d,
    /// Binds the texture and the sampler.
    bind_group: wgpu::BindGroup,
    /// Pipeline drawing the texture.
    render_pipeline: wgpu::RenderPipeline,
}

impl PresentState {
    /// Create the texture and the pipeline for a buffer size.
    pub(crate) fn new(
        buffer_size: (u32, u32),
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let texture_size = wgpu::Extent3d {
            width: buffer_size.0.max(1),
            height: buffer_size.1.max(1),
            depth_or_array_layers: 1,
        };

        // Create the texture the canvas is copied into every frame
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Buffer Texture"),
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: BUFFER_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Create the bind group layout for the buffer texture
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Buffer Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // Pixels must stay sharp when scaled up
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Buffer Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        // Create the bind group binding the layout with the texture view
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Buffer Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Present Render Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        // Load the shaders
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Present Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(PRESENT_SHADER)),
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Present Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                buffers: &[],
                module: &shader,
                entry_point: "vs_main",
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent::REPLACE,
                        alpha: wgpu::BlendComponent::REPLACE,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Self {
            texture,
            texture_size,
            bind_group,
            render_pipeline,
        }
    }

    /// Copy the pixels of the buffer into the texture.
    pub(crate) fn upload(&self, queue: &wgpu::Queue, buffer: &Image) {
        profiling::scope!("Upload buffer");

        if buffer.size() != (self.texture_size.width, self.texture_size.height) {
            log::warn!(
                "Buffer of size {:?} doesn't match the texture, skipping upload",
                buffer.size()
            );

            return;
        }

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            buffer.as_bytes(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.texture_size.width),
                rows_per_image: Some(self.texture_size.height),
            },
            self.texture_size,
        );
    }

    /// Draw the texture on the surface of the frame.
    pub(crate) fn render(
        &self,
        frame: &mut Frame<'_>,
        letterbox: &Letterbox,
        screen_size: (u32, u32),
        viewport_color: wgpu::Color,
    ) {
        profiling::scope!("Present render pass");

        // Start the render pass
        let mut render_pass = frame
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(viewport_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        render_pass.set_pipeline(&self.render_pipeline);

        // Only draw in the calculated letterbox to get nice integer scaling
        let end = letterbox.origin + letterbox.size;
        if letterbox.size.x >= 1.0
            && letterbox.size.y >= 1.0
            && end.x <= screen_size.0 as f32
            && end.y <= screen_size.1 as f32
        {
            render_pass.set_viewport(
                letterbox.origin.x,
                letterbox.origin.y,
                letterbox.size.x,
                letterbox.size.y,
                0.0,
                1.0,
            );
        }

        // Bind the buffer texture
        render_pass.set_bind_group(0, &self.bind_group, &[]);

        // Draw the fullscreen triangle defined in the vertex shader
        render_pass.draw(0..3, 0..1);
    }
}
