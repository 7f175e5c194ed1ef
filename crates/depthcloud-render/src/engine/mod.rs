//! The point-cloud render engine.

mod frame;
mod pipeline;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wgpu::util::DeviceExt;

use depthcloud_core::orbit::OrbitCamera;

use crate::error::{RenderError, RenderResult};
use crate::texture_cache::TextureCache;
use crate::uniforms::FrameUniforms;

pub use frame::FrameOutcome;

/// Depth attachment format for the point pass.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// The render engine backed by wgpu.
///
/// Owns every GPU resource of the point-cloud pipeline and a shared handle
/// to the orbit camera. Frames are delivered through
/// [`render_frame`](Self::render_frame) on the capture-delivery thread;
/// camera mutation happens elsewhere through the shared [`OrbitCamera`].
pub struct RenderEngine {
    /// The wgpu instance.
    pub instance: wgpu::Instance,
    /// The wgpu adapter.
    pub adapter: wgpu::Adapter,
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The wgpu queue.
    pub queue: wgpu::Queue,
    /// The render surface (None for headless).
    pub surface: Option<wgpu::Surface<'static>>,
    /// Surface configuration.
    pub surface_config: wgpu::SurfaceConfiguration,
    /// Offscreen color target used when running headless.
    offscreen_target: Option<wgpu::Texture>,
    /// Depth attachment sized to the drawable.
    pub depth_texture: wgpu::Texture,
    /// Depth attachment view.
    pub depth_view: wgpu::TextureView,
    /// Point cloud render pipeline.
    point_pipeline: wgpu::RenderPipeline,
    /// Point cloud bind group layout.
    point_bind_group_layout: wgpu::BindGroupLayout,
    /// Per-frame uniform buffer.
    frame_uniform_buffer: wgpu::Buffer,
    /// Sampler for the color image.
    color_sampler: wgpu::Sampler,
    /// Texture cache for the depth plane (R32Float).
    depth_cache: TextureCache,
    /// Texture cache for the color plane (Rgba8Unorm).
    color_cache: TextureCache,
    /// Shared orbit camera, also driven by the input side.
    camera: Arc<OrbitCamera>,
    /// Single-slot redraw request raised by every delivered sample and
    /// consumed by the presentation thread.
    redraw_requested: AtomicBool,
    /// Current drawable width.
    width: u32,
    /// Current drawable height.
    height: u32,
}

impl RenderEngine {
    /// Creates a windowed render engine presenting to `window`.
    ///
    /// # Errors
    ///
    /// Any failure here — no adapter, no device, surface creation — is
    /// unrecoverable environment misconfiguration and aborts initialization.
    pub async fn new_windowed(
        window: Arc<winit::window::Window>,
        camera: Arc<OrbitCamera>,
    ) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let (adapter, device, queue) = request_device(&instance, Some(&surface)).await?;

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        Ok(Self::assemble(
            instance,
            adapter,
            device,
            queue,
            Some(surface),
            surface_config,
            None,
            camera,
        ))
    }

    /// Creates a headless render engine drawing into an offscreen target.
    ///
    /// # Errors
    ///
    /// Same fatal setup conditions as [`new_windowed`](Self::new_windowed).
    pub async fn new_headless(
        width: u32,
        height: u32,
        camera: Arc<OrbitCamera>,
    ) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let (adapter, device, queue) = request_device(&instance, None).await?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let offscreen = create_offscreen_target(&device, &surface_config);

        Ok(Self::assemble(
            instance,
            adapter,
            device,
            queue,
            None,
            surface_config,
            Some(offscreen),
            camera,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        instance: wgpu::Instance,
        adapter: wgpu::Adapter,
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface: Option<wgpu::Surface<'static>>,
        surface_config: wgpu::SurfaceConfiguration,
        offscreen_target: Option<wgpu::Texture>,
        camera: Arc<OrbitCamera>,
    ) -> Self {
        let width = surface_config.width;
        let height = surface_config.height;

        let (depth_texture, depth_view) = create_depth_texture(&device, width, height);
        let (point_bind_group_layout, point_pipeline) =
            pipeline::create_point_pipeline(&device, surface_config.format, DEPTH_FORMAT);

        let frame_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame uniforms"),
            contents: bytemuck::cast_slice(&[FrameUniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let color_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("color sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..wgpu::SamplerDescriptor::default()
        });

        log::info!("render engine initialized ({width}x{height})");

        Self {
            instance,
            adapter,
            device,
            queue,
            surface,
            surface_config,
            offscreen_target,
            depth_texture,
            depth_view,
            point_pipeline,
            point_bind_group_layout,
            frame_uniform_buffer,
            color_sampler,
            depth_cache: TextureCache::new("depth texture", wgpu::TextureFormat::R32Float, 4),
            color_cache: TextureCache::new("color texture", wgpu::TextureFormat::Rgba8Unorm, 4),
            camera,
            redraw_requested: AtomicBool::new(false),
            width,
            height,
        }
    }

    /// Resizes the render target.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;

        if let Some(ref surface) = self.surface {
            surface.configure(&self.device, &self.surface_config);
        }
        if self.offscreen_target.is_some() {
            self.offscreen_target = Some(create_offscreen_target(
                &self.device,
                &self.surface_config,
            ));
        }

        let (depth_texture, depth_view) = create_depth_texture(&self.device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    /// Returns the drawable dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The shared orbit camera.
    #[must_use]
    pub fn camera(&self) -> &Arc<OrbitCamera> {
        &self.camera
    }

    /// Consumes the pending redraw request, if one was raised since the
    /// last call. The presentation thread polls this; the renderer never
    /// waits on it.
    pub fn take_redraw_request(&self) -> bool {
        self.redraw_requested.swap(false, Ordering::AcqRel)
    }
}

async fn request_device(
    instance: &wgpu::Instance,
    compatible_surface: Option<&wgpu::Surface<'_>>,
) -> RenderResult<(wgpu::Adapter, wgpu::Device, wgpu::Queue)> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface,
            force_fallback_adapter: false,
        })
        .await
        .map_err(|_| RenderError::AdapterCreationFailed)?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("depthcloud device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            ..wgpu::DeviceDescriptor::default()
        })
        .await?;

    Ok((adapter, device, queue))
}

fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth attachment"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn create_offscreen_target(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen color target"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: config.format,
        usage: config.usage,
        view_formats: &[],
    })
}
