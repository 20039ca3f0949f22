//! Windowed run loop.
//!
//! Drives the scene at display refresh cadence: each redraw advances the
//! simulation by the measured frame delta, uploads the staged instance bytes
//! when the batch was flushed, and draws. Space toggles between scattered and
//! formed; the mouse orbits and zooms the camera.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::gpu::GpuState;
use crate::render::{Instance, InstanceBuffer};
use crate::scene::Scene;
use crate::time::Time;

/// Launch the display. Blocks until the window is closed.
pub fn run(config: SceneConfig) -> Result<(), SceneError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    scene: Scene<InstanceBuffer>,
    time: Time,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        let sink = InstanceBuffer::new(config.total_count());
        let mut scene = Scene::new(&config, sink);
        // Store is fully populated here; push colors and rest transforms
        // before the first frame callback can run.
        scene.init();

        Self {
            window: None,
            gpu: None,
            scene,
            time: Time::new(),
            mouse_pressed: false,
            last_mouse_pos: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("treelight")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                eprintln!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        // The init() flush staged the setup batch; consume it so the first
        // redraw does not re-upload what create_buffer_init already copied.
        self.scene.sink_mut().take_dirty();

        let gpu = pollster::block_on(GpuState::new(
            window,
            self.scene.sink().as_bytes(),
            self.scene.particle_count(),
            std::mem::size_of::<Instance>(),
        ));
        match gpu {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                eprintln!("GPU initialization failed: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.scene.toggle();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;

                        if let Some(gpu) = &mut self.gpu {
                            gpu.camera.yaw -= dx as f32 * 0.005;
                            gpu.camera.pitch += dy as f32 * 0.005;
                            gpu.camera.pitch = gpu.camera.pitch.clamp(-1.5, 1.5);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu) = &mut self.gpu {
                    gpu.camera.distance -= scroll * 2.0;
                    gpu.camera.distance = gpu.camera.distance.clamp(10.0, 80.0);
                }
            }
            WindowEvent::RedrawRequested => {
                let (elapsed, delta) = self.time.update();
                self.scene.frame(delta);

                if let Some(gpu) = &mut self.gpu {
                    if self.scene.sink_mut().take_dirty() {
                        gpu.upload(self.scene.sink().as_bytes());
                    }
                    match gpu.render(elapsed) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                            width: gpu.config.width,
                            height: gpu.config.height,
                        }),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
