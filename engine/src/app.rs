use std::time::{Duration, Instant};

use anyhow::Context;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{CursorGrabMode, Window, WindowBuilder},
};

use renderer::Renderer;
use shared::{sky::CubeSampler, PhysicalParams};

use crate::{cli::Args, data::orbit_controller::OrbitController, input};

pub mod conf {
    use std::time::Duration;

    pub const TITLE: &str = "Black Hole";
    pub const FPS_INTERVAL: Duration = Duration::from_secs(1);
    pub const MAX_FPS: u64 = 120;
}

pub struct App {
    // the surface must go before the window it presents to
    pixels: Pixels,
    window: Window,
    renderer: Renderer<Box<dyn CubeSampler>>,
    scale: u32,

    // state
    started: Instant,
    time_offset: f32,
    inputs: input::State,
    orbit: OrbitController,
    needs_resizing: bool,
    limiter: FrameLimiter,
    fps: FpsCounter,
}

impl App {
    pub fn window_builder(args: &Args) -> WindowBuilder {
        WindowBuilder::new()
            .with_title(conf::TITLE)
            .with_inner_size(PhysicalSize::new(args.width, args.height))
    }

    pub fn new(
        window: Window,
        args: &Args,
        params: PhysicalParams,
        sky: Box<dyn CubeSampler>,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let resolution = render_resolution(size, args.scale);

        let pixels = {
            let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), &window);
            Pixels::new(resolution.0, resolution.1, surface)
                .context("Failed to create the presentation surface")?
        };

        let orbit = args.orbit(&params);
        let renderer = Renderer::create(sky, params, resolution, orbit.camera());

        let (width, height) = renderer.resolution();
        log::info!(
            "Rendering at {width}x{height} for a {}x{} window",
            size.width,
            size.height
        );

        Ok(Self {
            pixels,
            window,
            renderer,
            scale: args.scale,

            started: Instant::now(),
            time_offset: args.time,
            inputs: input::State::default(),
            orbit,
            needs_resizing: false,
            limiter: FrameLimiter::new(Instant::now()),
            fps: FpsCounter::new(Instant::now()),
        })
    }

    fn render(&mut self) {
        firestorm::profile_method!(render);

        self.update();

        if self.needs_resizing {
            if self.resize() {
                self.needs_resizing = false;
            } else {
                return;
            }
        }

        let time = self.time_offset + self.started.elapsed().as_secs_f32();
        if let Err(err) = self.renderer.render(time, self.pixels.frame_mut()) {
            log::warn!("Skipping frame: {err}");
            self.needs_resizing = true;
            return;
        }
        if let Err(err) = self.pixels.render() {
            log::warn!("Failed to present frame: {err}");
            self.needs_resizing = true;
            return;
        }

        if let Some(fps) = self.fps.tick(Instant::now()) {
            log::info!("{fps:.1} fps, {} frames", self.renderer.frames_rendered());
            self.window.set_title(&format!("{} ({fps:.1} fps)", conf::TITLE));
        }
    }

    fn update(&mut self) {
        let mouse_delta = self.inputs.mouse_delta();
        let has_rotation = mouse_delta.length_squared() > 0.;
        if has_rotation {
            self.orbit.rotate(mouse_delta);
        }

        let scroll = self.inputs.scroll();
        let has_zoom = scroll != 0.;
        if has_zoom {
            self.orbit.zoom(scroll);
        }

        if has_rotation || has_zoom {
            self.renderer.update_camera(self.orbit.camera());
        }
    }

    /// Returns `false` while the window is minimized.
    fn resize(&mut self) -> bool {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return false;
        }

        let resolution = render_resolution(size, self.scale);
        if let Err(err) = self.pixels.resize_surface(size.width, size.height) {
            log::warn!("Failed to resize surface: {err}");
            return false;
        }
        if let Err(err) = self.pixels.resize_buffer(resolution.0, resolution.1) {
            log::warn!("Failed to resize frame buffer: {err}");
            return false;
        }
        self.renderer.resize(resolution);
        true
    }

    /// Hides and confines the cursor while the orbit is being dragged.
    fn set_dragging(&self, dragging: bool) {
        let grab = if dragging {
            self.window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Locked))
        } else {
            self.window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(err) = grab {
            log::debug!("Cursor grab unavailable: {err}");
        }
        self.window.set_cursor_visible(!dragging);
    }

    pub fn run(mut self, event_loop: EventLoop<()>) -> anyhow::Result<()> {
        event_loop
            .run(move |event, elwt| match event {
                Event::AboutToWait => {
                    if self.limiter.ready(Instant::now()) {
                        self.render();
                    }
                    elwt.set_control_flow(ControlFlow::WaitUntil(self.limiter.deadline()));
                }
                Event::WindowEvent { ref event, .. } => match event {
                    WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                        self.needs_resizing = true;
                    }
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key: Key::Named(NamedKey::Escape),
                                state: ElementState::Pressed,
                                repeat: false,
                                ..
                            },
                        ..
                    } => elwt.exit(),
                    WindowEvent::MouseInput { button, state, .. } => {
                        self.inputs.handle_button(*button, *state);
                        if *button == MouseButton::Left {
                            self.set_dragging(*state == ElementState::Pressed);
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => self.inputs.handle_scroll(*delta),
                    _ => (),
                },
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => self.inputs.handle_mouse_motion(delta),
                _ => (),
            })
            .context("Error running the event loop")
    }
}

fn render_resolution(size: PhysicalSize<u32>, scale: u32) -> (u32, u32) {
    ((size.width / scale).max(1), (size.height / scale).max(1))
}

/// Caps the frame rate at [`conf::MAX_FPS`], leaving at least one budget between frames.
struct FrameLimiter {
    next: Instant,
}

impl FrameLimiter {
    const BUDGET: Duration = Duration::from_nanos(1_000_000_000 / conf::MAX_FPS);

    const fn new(now: Instant) -> Self {
        Self { next: now }
    }

    fn ready(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + Self::BUDGET;
        true
    }

    const fn deadline(&self) -> Instant {
        self.next
    }
}

/// Frames presented per second, reported once per interval.
struct FpsCounter {
    since: Instant,
    frames: u32,
}

impl FpsCounter {
    const fn new(now: Instant) -> Self {
        Self {
            since: now,
            frames: 0,
        }
    }

    fn tick(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.since);
        if elapsed < conf::FPS_INTERVAL {
            return None;
        }

        let fps = self.frames as f32 / elapsed.as_secs_f32();
        *self = Self::new(now);
        Some(fps)
    }
}
