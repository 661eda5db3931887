use winit::{
    event::{DeviceEvent, ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::fly_camera::FlyCamera;

/// Translates mouse and keyboard input into camera motion.
///
/// Dragging with the left button tilts and turns the camera; held movement
/// keys are applied once per frame through [`CameraController::update_camera`],
/// so movement speed follows the frame rate rather than key repeat.
pub struct CameraController {
    pub move_speed: f32,
    pub pitch_speed: f32,
    pub yaw_speed: f32,
    is_dragging: bool,
    move_forward: bool,
    move_left: bool,
    move_back: bool,
    move_right: bool,
    move_down: bool,
    move_up: bool,
}

impl CameraController {
    pub fn new(move_speed: f32) -> Self {
        Self {
            move_speed,
            pitch_speed: 0.1,
            yaw_speed: 0.05,
            is_dragging: false,
            move_forward: false,
            move_left: false,
            move_back: false,
            move_right: false,
            move_down: false,
            move_up: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut FlyCamera,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_dragging = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_dragging {
                    self.apply_drag(camera, *delta);
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent) {
        let pressed = event.state == ElementState::Pressed;
        if let PhysicalKey::Code(code) = event.physical_key {
            match code {
                KeyCode::KeyW => self.move_forward = pressed,
                KeyCode::KeyA => self.move_left = pressed,
                KeyCode::KeyS => self.move_back = pressed,
                KeyCode::KeyD => self.move_right = pressed,
                KeyCode::ControlLeft | KeyCode::ControlRight => self.move_down = pressed,
                KeyCode::Space => self.move_up = pressed,
                _ => (),
            }
        }
    }

    /// Steps the camera along its view axes for every movement key held
    /// down. Call once per rendered frame.
    pub fn update_camera(&self, camera: &mut FlyCamera) {
        let forward = camera.forward_axis();
        let right = camera.right_axis();
        let up = cgmath::Vector3::unit_y();

        if self.move_forward {
            camera.position += forward * self.move_speed;
        }
        if self.move_back {
            camera.position -= forward * self.move_speed;
        }
        if self.move_left {
            camera.position -= right * self.move_speed;
        }
        if self.move_right {
            camera.position += right * self.move_speed;
        }
        // The translation moves against the camera, so adding the world up
        // vector lowers the viewpoint.
        if self.move_down {
            camera.position += up * self.move_speed;
        }
        if self.move_up {
            camera.position -= up * self.move_speed;
        }
    }

    fn apply_drag(&self, camera: &mut FlyCamera, delta: (f64, f64)) {
        camera.pitch += delta.1 as f32 * self.pitch_speed;
        camera.yaw += delta.0 as f32 * self.yaw_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn camera_at_origin() -> FlyCamera {
        FlyCamera {
            position: Vector3::new(0.0, 0.0, 0.0),
            pitch: 0.0,
            yaw: 0.0,
            ..FlyCamera::new(1.0)
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn held_keys_step_along_the_view_axes() {
        let mut camera = camera_at_origin();
        camera.yaw = 90.0;

        let mut controller = CameraController::new(0.01);
        controller.move_forward = true;
        controller.update_camera(&mut camera);

        // facing along -x after the quarter turn
        assert!(close(camera.position.x, -0.01));
        assert!(close(camera.position.y, 0.0));
        assert!(close(camera.position.z, 0.0));

        controller.move_forward = false;
        controller.move_right = true;
        controller.update_camera(&mut camera);
        assert!(close(camera.position.z, -0.01));
    }

    #[test]
    fn vertical_keys_move_against_world_up() {
        let mut camera = camera_at_origin();
        let mut controller = CameraController::new(0.01);

        controller.move_up = true;
        controller.update_camera(&mut camera);
        assert!(close(camera.position.y, -0.01));
        assert!(close(camera.eye_position().y, 0.01));
    }

    #[test]
    fn dragging_tilts_faster_than_it_turns() {
        let mut camera = camera_at_origin();
        let controller = CameraController::new(0.01);

        controller.apply_drag(&mut camera, (10.0, 10.0));
        assert!(close(camera.pitch, 1.0));
        assert!(close(camera.yaw, 0.5));
    }

    #[test]
    fn idle_controller_leaves_the_camera_alone() {
        let mut camera = camera_at_origin();
        let controller = CameraController::new(0.01);
        controller.update_camera(&mut camera);
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 0.0));
    }
}
