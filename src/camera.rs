//! Camera position, projection mode and the view/projection uniform.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3};

use crate::config::SceneConfig;

/// Maps OpenGL clip space (z in `[-1, 1]`) to wgpu clip space (z in `[0, 1]`).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// A camera that always looks at the origin with +Y up.
#[derive(Clone, Debug)]
pub struct Camera {
    position: Vector3<f32>,
    mode: ProjectionMode,
    projection: Matrix4<f32>,
}

impl Camera {
    /// Orthographic, sitting just in front of the origin.
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, config.orthographic_camera_z),
            mode: ProjectionMode::Orthographic,
            projection: Matrix4::identity(),
        }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.position.x,
            Axis::Y => self.position.y,
            Axis::Z => self.position.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.position.x = value,
            Axis::Y => self.position.y = value,
            Axis::Z => self.position.z = value,
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Projection in OpenGL clip convention.
    pub fn projection(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn set_orthographic(&mut self, config: &SceneConfig) {
        self.mode = ProjectionMode::Orthographic;
        self.projection = Matrix4::identity();
        self.position.z = config.orthographic_camera_z;
    }

    pub fn set_perspective(&mut self, config: &SceneConfig) {
        let p = config.perspective;
        self.mode = ProjectionMode::Perspective;
        self.projection = cgmath::perspective(p.fovy, p.aspect, p.znear, p.zfar);
        self.position.z = config.perspective_camera_z;
    }

    /// Look-at matrix from the current position toward the origin.
    ///
    /// Falls back to identity when the camera sits on the origin, where the
    /// viewing direction is undefined. Straight above or below the origin the
    /// view direction is parallel to +Y, so -Z is used as the up vector there.
    pub fn view(&self) -> Matrix4<f32> {
        let distance2 = self.position.magnitude2();
        if distance2 <= f32::EPSILON * f32::EPSILON {
            log::warn!("camera sits on its look-at target, using an identity view");
            return Matrix4::identity();
        }
        let up = if self.position.cross(Vector3::unit_y()).magnitude2() <= distance2 * 1e-10 {
            -Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        Matrix4::look_at_rh(Point3::from_vec(self.position), Point3::origin(), up)
    }

    /// Slider label text such as `Camera X: 0.00`.
    pub fn label(&self, axis: Axis) -> String {
        format!("Camera {}: {:.2}", axis.name(), self.get(axis))
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniform {
    camera: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

impl ViewUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            camera: camera.view().into(),
            projection: (OPENGL_TO_WGPU_MATRIX * camera.projection()).into(),
        }
    }
}
