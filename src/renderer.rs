use anyhow::{Context, Result, ensure};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::capabilities::RenderBackend;
use crate::state::GpuContext;
use crate::view::Uniforms;

/// GPU uniform holding one model's view transform.
pub struct ViewUniform {
    buffer: wgpu::Buffer,
    queue: Arc<wgpu::Queue>,
}

impl ViewUniform {
    pub fn upload(&self, uniforms: &Uniforms) {
        self.queue
            .write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }
}

struct Frame {
    output: wgpu::SurfaceTexture,
    encoder: wgpu::CommandEncoder,
}

/// wgpu implementation of the frame hooks: `render_pre` acquires the
/// surface texture and clears it, `render_post` submits and presents.
pub struct WgpuBackend {
    gpu: GpuContext,
    clear_color: wgpu::Color,
    frame: Option<Frame>,
}

impl WgpuBackend {
    pub async fn new(window: Arc<Window>, clear_color: [f64; 4]) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        ensure!(
            !surface_caps.formats.is_empty(),
            "surface is incompatible with the adapter"
        );
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        // Prefer a compositing alpha mode so a transparent clear color shows
        // the desktop through.
        let alpha_mode = surface_caps
            .alpha_modes
            .iter()
            .find(|m| {
                matches!(
                    m,
                    wgpu::CompositeAlphaMode::PreMultiplied
                        | wgpu::CompositeAlphaMode::PostMultiplied
                )
            })
            .copied()
            .unwrap_or(surface_caps.alpha_modes[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        log::info!(
            "GPU ready: {:?}, surface {}x{} {:?}",
            adapter.get_info().backend,
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            gpu: GpuContext {
                surface,
                device,
                queue: Arc::new(queue),
                config,
            },
            clear_color: wgpu::Color {
                r: clear_color[0],
                g: clear_color[1],
                b: clear_color[2],
                a: clear_color[3],
            },
            frame: None,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.gpu.config.width = new_size.width;
            self.gpu.config.height = new_size.height;
            self.gpu
                .surface
                .configure(&self.gpu.device, &self.gpu.config);
        }
    }
}

impl RenderBackend for WgpuBackend {
    type Renderer = ViewUniform;
    type Texture = wgpu::Texture;

    fn render_pre(&mut self) {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.gpu
                    .surface
                    .configure(&self.gpu.device, &self.gpu.config);
                return;
            }
            Err(e) => {
                log::error!("failed to acquire frame: {:?}", e);
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let _render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
        }

        self.frame = Some(Frame { output, encoder });
    }

    fn render_post(&mut self) {
        // No frame when acquisition failed in `render_pre`.
        if let Some(frame) = self.frame.take() {
            self.gpu.queue.submit(std::iter::once(frame.encoder.finish()));
            frame.output.present();
        }
    }

    fn create_renderer(&mut self) -> ViewUniform {
        let buffer = self
            .gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("View Uniform Buffer"),
                contents: bytemuck::cast_slice(&[Uniforms::new()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        ViewUniform {
            buffer,
            queue: self.gpu.queue.clone(),
        }
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<wgpu::Texture> {
        ensure!(width > 0 && height > 0, "texture has no area");
        ensure!(
            rgba.len() == (width as usize) * (height as usize) * 4,
            "expected {}x{} RGBA pixels, got {} bytes",
            width,
            height,
            rgba.len()
        );

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Model Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        Ok(texture)
    }
}
