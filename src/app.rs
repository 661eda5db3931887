use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{
        camera_controller::CameraController,
        camera_utils::{convert_matrix4_to_array, CameraManager},
        fly_camera::FlyCamera,
    },
    model::ModelGpu,
    render_engine::{GlobalsUniform, RenderEngine},
};
use crate::performance::FrameTimer;
use crate::scene::FlatScene;
use crate::ui::{lighting_panel, LightingSettings, UiManager};

/// The viewer application: owns the event loop and everything that lives
/// for the duration of the window.
///
/// Construction is cheap and GPU-free; the surface, device and model
/// upload all happen once the event loop delivers `resumed`.
pub struct ViewerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    model: Option<ModelGpu>,
    camera_manager: CameraManager,
    lighting: LightingSettings,
    frame_timer: FrameTimer,
    start_time: Instant,
    scene: FlatScene,
    images: Vec<gltf::image::Data>,
}

impl ViewerApp {
    /// Create a viewer for an already flattened scene.
    ///
    /// `images` must be the decoded images of the document the scene was
    /// flattened from; they are uploaded as textures on first resume.
    pub fn new(scene: FlatScene, images: Vec<gltf::image::Data>) -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let camera = FlyCamera::new(1.0);
        let controller = CameraController::new(0.01);
        let camera_manager = CameraManager::new(camera, controller);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                model: None,
                camera_manager,
                lighting: LightingSettings::default(),
                frame_timer: FrameTimer::new(),
                start_time: Instant::now(),
                scene,
                images,
            },
        }
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default().with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.camera_manager.camera.resize_projection(width, height);

            let window_clone = window_handle.clone();
            let renderer =
                pollster::block_on(
                    async move { RenderEngine::new(window_clone, width, height).await },
                );

            let model = ModelGpu::upload(
                renderer.device(),
                renderer.queue(),
                &self.scene,
                &self.images,
                renderer.material_layout(),
            );
            self.model = Some(model);

            // Create UI manager
            let ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_window_event(window, window_id, &event) {
                // UI consumed the event - request redraw and return early
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if let winit::keyboard::PhysicalKey::Code(key_code) = key_event.physical_key {
                    if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                        event_loop.exit();
                        return;
                    }
                }
                if let Some(ui_manager) = self.ui_manager.as_ref() {
                    if !ui_manager.wants_input() {
                        self.camera_manager.process_keyboard_event(&key_event);
                    }
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager.camera.resize_projection(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.camera_manager.update();

                let eye = self.camera_manager.eye_position();
                let globals = GlobalsUniform {
                    view_proj: convert_matrix4_to_array(
                        self.camera_manager.get_view_proj_matrix(),
                    ),
                    camera_position: [eye.x, eye.y, eye.z, 1.0],
                    ambient_strength: self.lighting.ambient_strength,
                    diffuse_reflection: self.lighting.diffuse_reflection,
                    specular_strength: self.lighting.specular_strength,
                    shininess: self.lighting.shininess,
                    light1: self.lighting.light1,
                    light2: self.lighting.light2,
                    time: self.start_time.elapsed().as_secs_f32(),
                    morph_speed: self.lighting.morph_speed,
                };
                render_engine.update(globals);
                self.frame_timer.frame();

                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    let window_clone = window.clone();
                    let lighting = &mut self.lighting;
                    let fps = self.frame_timer.fps();
                    render_engine.render_frame_with_ui(
                        self.model.as_ref(),
                        |device, queue, encoder, color_attachment| {
                            ui_manager.draw(
                                device,
                                queue,
                                encoder,
                                &window_clone,
                                color_attachment,
                                |ui| {
                                    lighting_panel(ui, lighting, fps);
                                },
                            );
                        },
                    );
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Check if UI wants to capture input before processing camera events
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_input() {
                return;
            }
        }

        self.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
