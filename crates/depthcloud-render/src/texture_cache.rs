//! Per-plane texture caches for the incoming capture buffers.

/// Wraps one stream of capture pixel buffers as a GPU texture.
///
/// The cache is created once at setup and owned by the render engine. The
/// underlying `wgpu::Texture` is allocated on first use and reused for every
/// subsequent frame of the same dimensions, so steady-state frames allocate
/// no GPU objects; only the pixel upload happens per frame. The incoming
/// buffer stays owned by the capture subsystem — the borrow ends when
/// [`acquire`](Self::acquire) returns.
///
/// Frame delivery is strictly sequential on one thread, so the cache needs
/// no locking of its own.
pub struct TextureCache {
    label: &'static str,
    format: wgpu::TextureFormat,
    bytes_per_pixel: u32,
    texture: Option<wgpu::Texture>,
    view: Option<wgpu::TextureView>,
    width: u32,
    height: u32,
}

impl TextureCache {
    /// Creates an empty cache for one pixel format.
    #[must_use]
    pub fn new(label: &'static str, format: wgpu::TextureFormat, bytes_per_pixel: u32) -> Self {
        Self {
            label,
            format,
            bytes_per_pixel,
            texture: None,
            view: None,
            width: 0,
            height: 0,
        }
    }

    /// Wraps one incoming pixel buffer as a texture for the current frame.
    ///
    /// Returns `None` when the buffer cannot be wrapped (zero-sized plane or
    /// a byte length that disagrees with the stated dimensions); the caller
    /// drops the frame in that case. No error is surfaced and nothing is
    /// retried — the next sample is processed normally.
    pub fn acquire(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        bytes: &[u8],
    ) -> Option<&wgpu::TextureView> {
        let expected = u64::from(width) * u64::from(height) * u64::from(self.bytes_per_pixel);
        if width == 0 || height == 0 || bytes.len() as u64 != expected {
            log::debug!(
                "{}: cannot wrap {} bytes as {width}x{height}, frame dropped",
                self.label,
                bytes.len()
            );
            return None;
        }

        if self.texture.is_none() || self.width != width || self.height != height {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some(self.label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: self.format,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            self.texture = Some(texture);
            self.view = Some(view);
            self.width = width;
            self.height = height;
        }

        let texture = self.texture.as_ref()?;
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * self.bytes_per_pixel),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.view.as_ref()
    }
}
