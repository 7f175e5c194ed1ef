#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
//! Live orbit demo over a synthetic depth stream.
//!
//! The capture and gesture subsystems are external collaborators of the
//! library, so this demo supplies stand-ins for both: a procedurally
//! animated depth + color pair delivered once per redraw, and winit pointer
//! drags mapped to yaw/pitch at 0.1 degrees per pixel. Arrow up/down adjust
//! the far-clip distance.
//!
//! Run with: cargo run --example orbit_demo

use std::sync::Arc;

use depthcloud_rs::{CloudView, ColorImage, DepthFrame, DepthMap, Intrinsics, ViewOptions};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

const DEPTH_WIDTH: u32 = 256;
const DEPTH_HEIGHT: u32 = 192;
const COLOR_WIDTH: u32 = 640;
const COLOR_HEIGHT: u32 = 480;

/// Stand-in for the capture subsystem: a rippling depth surface around the
/// default orbit target, with a matching color gradient.
struct SyntheticCapture {
    depth: Vec<f32>,
    color: Vec<u8>,
    intrinsics: Intrinsics,
    phase: f32,
}

impl SyntheticCapture {
    fn new() -> Self {
        let mut capture = Self {
            depth: vec![0.0; (DEPTH_WIDTH * DEPTH_HEIGHT) as usize],
            color: vec![0; (COLOR_WIDTH * COLOR_HEIGHT * 4) as usize],
            intrinsics: Intrinsics::new(580.0, 580.0, 320.0, 240.0, COLOR_WIDTH, COLOR_HEIGHT),
            phase: 0.0,
        };
        for y in 0..COLOR_HEIGHT {
            for x in 0..COLOR_WIDTH {
                let i = ((y * COLOR_WIDTH + x) * 4) as usize;
                capture.color[i] = (x * 255 / COLOR_WIDTH) as u8;
                capture.color[i + 1] = (y * 255 / COLOR_HEIGHT) as u8;
                capture.color[i + 2] = 160;
                capture.color[i + 3] = 255;
            }
        }
        capture
    }

    fn advance(&mut self) {
        self.phase += 0.04;
        for y in 0..DEPTH_HEIGHT {
            for x in 0..DEPTH_WIDTH {
                let u = x as f32 / DEPTH_WIDTH as f32 - 0.5;
                let v = y as f32 / DEPTH_HEIGHT as f32 - 0.5;
                let ripple = ((u * u + v * v).sqrt() * 40.0 - self.phase * 3.0).sin();
                self.depth[(y * DEPTH_WIDTH + x) as usize] = 500.0 + 60.0 * ripple;
            }
        }
    }

    fn frame(&self) -> DepthFrame<'_> {
        DepthFrame::new(
            DepthMap::new(DEPTH_WIDTH, DEPTH_HEIGHT, &self.depth).expect("synthetic depth plane"),
            ColorImage::new(COLOR_WIDTH, COLOR_HEIGHT, &self.color).expect("synthetic color plane"),
            Some(self.intrinsics),
        )
    }
}

struct DemoApp {
    window: Option<Arc<Window>>,
    view: Option<CloudView>,
    capture: SyntheticCapture,
    dragging: bool,
    last_cursor: (f64, f64),
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.view.is_some() {
            return;
        }
        let window = Arc::new(
            event_loop
                .create_window(Window::default_attributes().with_title("depthcloud orbit demo"))
                .expect("failed to create window"),
        );
        let view = CloudView::windowed(Arc::clone(&window), ViewOptions::default())
            .expect("failed to set up render engine");
        self.window = Some(window);
        self.view = Some(view);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => view.resize(size.width, size.height),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                let delta_x = position.x - self.last_cursor.0;
                let delta_y = position.y - self.last_cursor.1;
                self.last_cursor = (position.x, position.y);
                if self.dragging {
                    let scale = view.options().degrees_per_pixel;
                    view.yaw(delta_x as f32 * scale);
                    view.pitch(delta_y as f32 * scale);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    match event.logical_key {
                        Key::Named(NamedKey::ArrowUp) => {
                            view.set_far_clip(view.far_clip() + 50.0);
                        }
                        Key::Named(NamedKey::ArrowDown) => {
                            view.set_far_clip(view.far_clip() - 50.0);
                        }
                        Key::Named(NamedKey::Escape) => event_loop.exit(),
                        _ => {}
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                // The event loop doubles as the capture-delivery thread:
                // one synthesized sample per redraw.
                self.capture.advance();
                let _ = view.submit_frame(&self.capture.frame());
                if view.take_redraw_request() {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().expect("failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp {
        window: None,
        view: None,
        capture: SyntheticCapture::new(),
        dragging: false,
        last_cursor: (0.0, 0.0),
    };
    event_loop.run_app(&mut app).expect("event loop failed");
}
