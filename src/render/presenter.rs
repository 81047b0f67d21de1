//! wgpu 帧提交
//!
//! 把 CPU 画布上传到纹理，再用全屏三角形绘制到窗口表面。
//! `WindowSurface` 组合 `Canvas` 与 `GpuPresenter`，是桌面端的 `Surface` 实现。

use crate::core::error::{RenderError, RenderResult};
use crate::platform::surface::{Surface, Viewport};
use crate::render::canvas::Canvas;
use crate::render::color::Rgb;
use glam::IVec2;
use std::sync::Arc;
use winit::window::Window;

const BLIT_SHADER: &str = r#"
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VsOut {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: VsOut;
    out.pos = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(uv.x, 1.0 - uv.y);
    return out;
}

@group(0) @binding(0) var frame_tex: texture_2d<f32>;
@group(0) @binding(1) var frame_samp: sampler;

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return textureSample(frame_tex, frame_samp, in.uv);
}
"#;

/// GPU 提交器
pub struct GpuPresenter {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    frame_texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl GpuPresenter {
    /// 为窗口创建表面、设备和全屏绘制管线
    pub async fn new(window: Arc<Window>) -> RenderResult<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::SurfaceCreation(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Starburst Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .map_err(|e| RenderError::DeviceRequest(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        // 画布存放的是 sRGB 值，优先选择 sRGB 表面格式
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| RenderError::SurfaceCreation("No supported surface format".to_string()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(BLIT_SHADER)),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Canvas BGL"),
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Canvas Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Canvas Blit Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let viewport = Viewport::new(config.width, config.height);
        let (frame_texture, bind_group) =
            Self::create_frame_texture(&device, &bind_group_layout, &sampler, viewport);

        tracing::info!(
            target: "render",
            backend = ?adapter.get_info().backend,
            adapter = %adapter.get_info().name,
            ?format,
            "GPU presenter initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            sampler,
            frame_texture,
            bind_group,
        })
    }

    fn create_frame_texture(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        viewport: Viewport,
    ) -> (wgpu::Texture, wgpu::BindGroup) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Canvas Texture"),
            size: wgpu::Extent3d {
                width: viewport.width.max(1),
                height: viewport.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Canvas BG"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        (texture, bind_group)
    }

    /// 调整表面与画布纹理尺寸；零尺寸（最小化）时忽略
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.config.width = viewport.width;
        self.config.height = viewport.height;
        self.surface.configure(&self.device, &self.config);

        let (texture, bind_group) = Self::create_frame_texture(
            &self.device,
            &self.bind_group_layout,
            &self.sampler,
            viewport,
        );
        self.frame_texture = texture;
        self.bind_group = bind_group;
    }

    /// 上传画布并提交一帧
    pub fn present(&mut self, canvas: &Canvas) -> RenderResult<()> {
        if canvas.width() == 0 || canvas.height() == 0 {
            return Ok(());
        }
        let size = self.frame_texture.size();
        if size.width != canvas.width() || size.height != canvas.height() {
            self.resize(Viewport::new(canvas.width(), canvas.height()));
        }

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.frame_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            canvas.frame(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * canvas.width()),
                rows_per_image: Some(canvas.height()),
            },
            wgpu::Extent3d {
                width: canvas.width(),
                height: canvas.height(),
                depth_or_array_layers: 1,
            },
        );

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                tracing::debug!(target: "render", "Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                self.surface
                    .get_current_texture()
                    .map_err(|e| RenderError::Surface(e.to_string()))?
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!(target: "render", "Surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::Surface(e.to_string())),
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Canvas Blit Encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Blit Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// 窗口表面：画布 + GPU 提交
pub struct WindowSurface {
    canvas: Canvas,
    presenter: GpuPresenter,
}

impl WindowSurface {
    pub fn new(canvas: Canvas, presenter: GpuPresenter) -> Self {
        Self { canvas, presenter }
    }
}

impl Surface for WindowSurface {
    fn viewport(&self) -> Viewport {
        self.canvas.viewport()
    }

    fn clear(&mut self, color: Rgb) {
        self.canvas.clear(color);
    }

    fn draw_line(&mut self, from: IVec2, to: IVec2, width: u32, color: Rgb) -> RenderResult<()> {
        self.canvas.draw_line(from, to, width, color)
    }

    fn fill_circle(&mut self, center: IVec2, radius: u32, color: Rgb) -> RenderResult<()> {
        self.canvas.fill_circle(center, radius, color)
    }

    fn present(&mut self) -> RenderResult<()> {
        self.canvas.present()?;
        self.presenter.present(&self.canvas)
    }

    fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.canvas.resize(viewport);
        self.presenter.resize(viewport);
    }
}
