//! Per-frame orchestration: Acquire → Prepare → Submit.

use std::sync::atomic::Ordering;

use depthcloud_core::frame::DepthFrame;

use super::RenderEngine;
use crate::frame_plan::FramePlan;
use crate::uniforms::FrameUniforms;

/// What happened to one delivered sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The sample was drawn: one draw call of `vertices` points.
    Rendered {
        /// Vertex count of the draw call (depth width × height).
        vertices: u32,
    },
    /// The sample was dropped; no visual update for it. The pipeline
    /// resumes cleanly on the next sample.
    Dropped,
}

impl RenderEngine {
    /// Renders one synchronized depth + color sample.
    ///
    /// Called on the capture-delivery thread, one sample at a time. A
    /// sample that cannot be prepared or whose buffers cannot be wrapped is
    /// dropped silently; there are no retries.
    ///
    /// # Panics
    ///
    /// Panics when the sample carries no calibration data (see
    /// [`FramePlan::prepare`]).
    pub fn render_frame(&mut self, frame: &DepthFrame<'_>) -> FrameOutcome {
        // Raise the redraw request first; presentation scheduling is
        // independent of the GPU work below.
        self.redraw_requested.store(true, Ordering::Release);

        let Some(plan) = FramePlan::prepare(frame, (self.width, self.height), &self.camera) else {
            return FrameOutcome::Dropped;
        };

        // Acquire: wrap both incoming pixel buffers as textures.
        let Some(depth_view) = self.depth_cache.acquire(
            &self.device,
            &self.queue,
            frame.depth.width,
            frame.depth.height,
            bytemuck::cast_slice(frame.depth.pixels),
        ) else {
            return FrameOutcome::Dropped;
        };
        let Some(color_view) = self.color_cache.acquire(
            &self.device,
            &self.queue,
            frame.color.width,
            frame.color.height,
            frame.color.pixels,
        ) else {
            return FrameOutcome::Dropped;
        };

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("point cloud bind group"),
            layout: &self.point_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.frame_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(depth_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.color_sampler),
                },
            ],
        });

        self.queue.write_buffer(
            &self.frame_uniform_buffer,
            0,
            bytemuck::cast_slice(&[FrameUniforms::from_plan(&plan)]),
        );

        // Submit: one pass, one point-list draw.
        let (surface_texture, target_view) = if let Some(surface) = &self.surface {
            match surface.get_current_texture() {
                Ok(texture) => {
                    let view = texture
                        .texture
                        .create_view(&wgpu::TextureViewDescriptor::default());
                    (Some(texture), view)
                }
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("surface lost, reconfiguring; frame dropped");
                    surface.configure(&self.device, &self.surface_config);
                    return FrameOutcome::Dropped;
                }
                Err(err) => {
                    log::warn!("surface unavailable ({err}); frame dropped");
                    return FrameOutcome::Dropped;
                }
            }
        } else {
            let target = self
                .offscreen_target
                .as_ref()
                .expect("headless engine has an offscreen target");
            (
                None,
                target.create_view(&wgpu::TextureViewDescriptor::default()),
            )
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("point cloud frame"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("point cloud pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            render_pass.set_pipeline(&self.point_pipeline);
            render_pass.set_bind_group(0, &bind_group, &[]);
            render_pass.draw(0..plan.vertex_count, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        if let Some(texture) = surface_texture {
            texture.present();
        }

        FrameOutcome::Rendered {
            vertices: plan.vertex_count,
        }
    }
}
