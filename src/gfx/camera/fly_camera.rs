use cgmath::{perspective, Deg, InnerSpace, Matrix4, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// First-person camera described by two rotation angles and the translation
/// term of its view matrix.
///
/// The view matrix is `Rx(pitch) * Ry(yaw) * T(position)`, so `position` is
/// not the eye point: the camera sits at `-position` in world space.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    /// Rotation around the x axis, in degrees.
    pub pitch: f32,
    /// Rotation around the y axis, in degrees.
    pub yaw: f32,
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl FlyCamera {
    /// Starting pose, framing the model from slightly above and behind.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vector3::new(0.16, -0.31, -0.81),
            pitch: 21.5,
            yaw: 13.1,
            aspect,
            fovy: Deg(60.0),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(Deg(self.pitch))
            * Matrix4::from_angle_y(Deg(self.yaw))
            * Matrix4::from_translation(self.position)
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let proj = perspective(self.fovy, self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * self.view_matrix()
    }

    /// Eye point in world space.
    pub fn eye_position(&self) -> Vector3<f32> {
        -self.position
    }

    /// World-space axis along which the camera walks forward. This is the
    /// third row of the view rotation, so it stays consistent with the view
    /// matrix for any pitch and yaw.
    pub fn forward_axis(&self) -> Vector3<f32> {
        let rot = Matrix4::from_angle_x(Deg(self.pitch)) * Matrix4::from_angle_y(Deg(self.yaw));
        Vector3::new(rot.x.z, rot.y.z, rot.z.z)
    }

    /// World-space axis for strafing, kept horizontal.
    pub fn right_axis(&self) -> Vector3<f32> {
        self.forward_axis().cross(Vector3::unit_y()).normalize()
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn eye_sits_opposite_the_translation() {
        let camera = FlyCamera::new(1.5);
        let eye = camera.eye_position();
        let mapped = camera.view_matrix() * Vector4::new(eye.x, eye.y, eye.z, 1.0);
        assert!(close(mapped.x, 0.0) && close(mapped.y, 0.0) && close(mapped.z, 0.0));
        assert!(close(mapped.w, 1.0));
    }

    #[test]
    fn zero_pose_gives_identity_view() {
        let camera = FlyCamera {
            position: Vector3::new(0.0, 0.0, 0.0),
            pitch: 0.0,
            yaw: 0.0,
            ..FlyCamera::new(1.0)
        };
        assert_eq!(camera.view_matrix(), Matrix4::identity());
    }

    #[test]
    fn forward_axis_turns_with_yaw() {
        let camera = FlyCamera {
            position: Vector3::new(0.0, 0.0, 0.0),
            pitch: 0.0,
            yaw: 90.0,
            ..FlyCamera::new(1.0)
        };
        let forward = camera.forward_axis();
        assert!(close(forward.x, -1.0) && close(forward.y, 0.0) && close(forward.z, 0.0));

        let right = camera.right_axis();
        assert!(close(right.x, 0.0) && close(right.y, 0.0) && close(right.z, -1.0));
    }

    #[test]
    fn projection_maps_the_depth_range_to_zero_one() {
        let camera = FlyCamera {
            position: Vector3::new(0.0, 0.0, 0.0),
            pitch: 0.0,
            yaw: 0.0,
            ..FlyCamera::new(1.0)
        };
        let clip = camera.build_view_projection_matrix();

        let near = clip * Vector4::new(0.0, 0.0, -camera.znear, 1.0);
        assert!(close(near.z / near.w, 0.0));

        let far = clip * Vector4::new(0.0, 0.0, -camera.zfar, 1.0);
        assert!(close(far.z / far.w, 1.0));
    }
}
