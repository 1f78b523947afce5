//! Abstractions over GPU calls which can be profiled.

use std::sync::Arc;

use miette::{Context, IntoDiagnostic, Result};
use winit::window::Window;

/// GPU state abstracted so GPU calls can be profiled if the feature flags are enabled.
pub(crate) struct Gpu {
    /// GPU device.
    pub(crate) device: wgpu::Device,
    /// GPU surface.
    pub(crate) surface: wgpu::Surface<'static>,
    /// GPU queue.
    pub(crate) queue: wgpu::Queue,
    /// GPU surface configuration.
    config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    /// Create a GPU surface on the window.
    pub(crate) async fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let window_size = window.inner_size();

        // Get a handle to our GPU
        let instance = wgpu::Instance::default();

        log::debug!("Creating GPU surface on the window");

        // Create a GPU surface on the window
        let surface = instance
            .create_surface(window)
            .into_diagnostic()
            .wrap_err("Error creating surface on window")?;

        log::debug!("Requesting adapter");

        // Request an adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptionsBase {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                // Request an adaptar which can render to our surface
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or_else(|| miette::miette!("Error getting GPU adapter for window"))?;

        log::debug!("Using adapter {:?}", adapter.get_info());

        // Get the surface capabilities
        let swapchain_capabilities = surface.get_capabilities(&adapter);

        // Prefer a sRGB surface, the buffer colors are sRGB
        let format = swapchain_capabilities
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| swapchain_capabilities.formats.first().copied())
            .ok_or_else(|| miette::miette!("GPU surface doesn't support any texture format"))?;
        let alpha_mode = swapchain_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        // Create the logical device and command queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .into_diagnostic()
            .wrap_err("Error getting logical GPU device for surface")?;

        // Configure the render surface
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            // Ensure that the render surface is at least 1 pixel big, otherwise an error would occur
            width: window_size.width.max(1),
            height: window_size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![format],
        };
        surface.configure(&device, &config);

        log::debug!("Configured surface with format {format:?}");

        Ok(Self {
            device,
            surface,
            queue,
            config,
        })
    }

    /// Start a new rendering event.
    ///
    /// Returns `None` when no surface texture could be acquired, the frame should be skipped then.
    #[inline]
    pub(crate) fn start(&mut self) -> Option<Frame<'_>> {
        profiling::scope!("Create command encoder");

        // Get the main render texture
        let surface_texture = {
            profiling::scope!("Retrieve surface texture");

            match self.surface.get_current_texture() {
                Ok(surface_texture) => surface_texture,
                Err(err) => {
                    log::warn!("Error acquiring next swap chain texture, skipping frame: {err}");

                    // Lost or outdated surfaces recover by configuring them again
                    self.surface.configure(&self.device, &self.config);

                    return None;
                }
            }
        };

        // Create the encoder
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Sprite Demo Command Encoder"),
            });

        // Create a texture view from the main render texture
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Some(Frame {
            encoder,
            surface_view,
            surface_texture,
            queue: &self.queue,
        })
    }

    /// Resize the surface.
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Resizing the surface to ({width}x{height})");

        // Ensure that the render surface is at least 1 pixel big, otherwise an error would occur
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// Size of the screen in pixels.
    #[inline]
    pub(crate) const fn screen_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Format of the surface texture.
    #[inline]
    pub(crate) const fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}

/// Rendering state for a single frame.
pub(crate) struct Frame<'gpu> {
    /// GPU command encoder.
    pub(crate) encoder: wgpu::CommandEncoder,
    /// GPU surface view.
    pub(crate) surface_view: wgpu::TextureView,
    /// GPU surface texture.
    surface_texture: wgpu::SurfaceTexture,
    /// GPU queue.
    queue: &'gpu wgpu::Queue,
}

impl<'gpu> Frame<'gpu> {
    /// Finish rendering event.
    #[inline]
    pub(crate) fn present(self) {
        // Draw to the texture
        {
            profiling::scope!("Submit queue");

            self.queue.submit(Some(self.encoder.finish()));
        }

        // Show the texture in the window
        {
            profiling::scope!("Present surface texture");

            self.surface_texture.present();
        }
    }
}
