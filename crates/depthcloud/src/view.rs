//! The orbit-navigable point-cloud view.

use std::sync::Arc;

use depthcloud_core::frame::DepthFrame;
use depthcloud_core::options::ViewOptions;
use depthcloud_core::orbit::OrbitCamera;
use depthcloud_render::{FrameOutcome, RenderEngine, RenderResult};

/// A live point-cloud view: the render engine plus the shared orbit camera.
///
/// One `CloudView` serves three callers:
/// - the capture-delivery thread feeds samples through
///   [`submit_frame`](Self::submit_frame);
/// - the input side drives [`yaw`](Self::yaw) / [`pitch`](Self::pitch) /
///   [`set_far_clip`](Self::set_far_clip), either directly or through a
///   camera handle cloned with [`camera`](Self::camera);
/// - the presentation thread polls
///   [`take_redraw_request`](Self::take_redraw_request).
pub struct CloudView {
    engine: RenderEngine,
    options: ViewOptions,
}

impl CloudView {
    /// Creates a view presenting to the given window.
    ///
    /// # Errors
    ///
    /// Setup failures (no adapter, no device, surface creation) are fatal
    /// and returned here; there is no degraded render path.
    pub fn windowed(window: Arc<winit::window::Window>, options: ViewOptions) -> RenderResult<Self> {
        let _ = env_logger::try_init();
        let camera = Arc::new(OrbitCamera::new(&options));
        let engine = pollster::block_on(RenderEngine::new_windowed(window, camera))?;
        log::info!("point-cloud view ready");
        Ok(Self { engine, options })
    }

    /// Creates a view rendering into an offscreen target.
    ///
    /// # Errors
    ///
    /// Same fatal setup conditions as [`windowed`](Self::windowed).
    pub fn headless(width: u32, height: u32, options: ViewOptions) -> RenderResult<Self> {
        let camera = Arc::new(OrbitCamera::new(&options));
        let engine = pollster::block_on(RenderEngine::new_headless(width, height, camera))?;
        Ok(Self { engine, options })
    }

    /// Delivers one synchronized depth + color sample.
    ///
    /// Call from the capture-delivery thread, one sample at a time. A
    /// sample whose buffers cannot be wrapped is dropped silently.
    pub fn submit_frame(&mut self, frame: &DepthFrame<'_>) -> FrameOutcome {
        self.engine.render_frame(frame)
    }

    /// Rotates the viewpoint around the target about the up axis.
    pub fn yaw(&self, angle_degrees: f32) {
        self.engine.camera().yaw(angle_degrees);
    }

    /// Rotates the viewpoint around the target about the view-right axis.
    pub fn pitch(&self, angle_degrees: f32) {
        self.engine.camera().pitch(angle_degrees);
    }

    /// Sets the far-clip distance (clamped to the configured range).
    pub fn set_far_clip(&self, value: f32) {
        self.engine.camera().set_far_clip(value);
    }

    /// Current far-clip distance.
    #[must_use]
    pub fn far_clip(&self) -> f32 {
        self.engine.camera().far_clip()
    }

    /// A shareable handle to the orbit camera, for driving yaw/pitch from
    /// another thread.
    #[must_use]
    pub fn camera(&self) -> Arc<OrbitCamera> {
        Arc::clone(self.engine.camera())
    }

    /// Consumes the pending redraw request, if any.
    pub fn take_redraw_request(&self) -> bool {
        self.engine.take_redraw_request()
    }

    /// Resizes the drawable.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
    }

    /// Drawable dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.engine.dimensions()
    }

    /// The view options this view was created with.
    #[must_use]
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }
}
