//! Scene tunables.
//!
//! [`SceneConfig`] gathers every constant the animation, camera and geometry
//! code reads. The defaults reproduce the stock scene; callers may tweak any
//! field before handing the config to [`crate::flow::run`].

use cgmath::{Deg, Matrix4, Vector3};

/// Names of the OBJ resources, resolved against the `assets/` directory
/// natively and `<origin>/assets/` on the web.
#[derive(Clone, Debug)]
pub struct AssetNames {
    pub boat: String,
    pub man: String,
    pub diamond: String,
}

impl Default for AssetNames {
    fn default() -> Self {
        Self {
            boat: "airboat.obj".to_string(),
            man: "al.obj".to_string(),
            diamond: "diamond.obj".to_string(),
        }
    }
}

/// Parameters of the perspective projection. Kept in OpenGL convention.
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveConfig {
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for PerspectiveConfig {
    fn default() -> Self {
        Self {
            fovy: Deg(90.0),
            aspect: 1.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub assets: AssetNames,

    /// Boat spin in degrees per elapsed millisecond.
    pub boat_rotation_speed: f32,
    /// Added to the jump velocity once per tick, regardless of elapsed time.
    pub gravity: f32,
    pub jump_launch_velocity: f32,

    /// Orbit angle advance in radians per millisecond.
    pub diamond_orbit_speed: f32,
    /// Self rotation advance in turns per millisecond.
    pub diamond_self_rotation_speed: f32,
    pub diamond_orbit_radius: f32,
    pub diamond_orbit_height: f32,

    pub grid_row_spacing: f32,
    pub grid_column_spacing: f32,
    pub grid_color: [f32; 3],
    pub grid_y_offset: f32,

    pub perspective: PerspectiveConfig,
    pub orthographic_camera_z: f32,
    pub perspective_camera_z: f32,
    /// Step applied by keyboard camera nudges.
    pub camera_nudge: f32,

    pub clear_colour: wgpu::Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            assets: AssetNames::default(),
            boat_rotation_speed: 0.05,
            gravity: -0.01,
            jump_launch_velocity: 0.1,
            diamond_orbit_speed: 0.005,
            diamond_self_rotation_speed: 0.001,
            diamond_orbit_radius: 0.05,
            diamond_orbit_height: 0.2,
            grid_row_spacing: 1.0,
            grid_column_spacing: 1.0,
            grid_color: [0.0, 1.0, 0.0],
            grid_y_offset: -0.5,
            perspective: PerspectiveConfig::default(),
            orthographic_camera_z: 0.01,
            perspective_camera_z: 1.2,
            camera_nudge: 0.05,
            clear_colour: wgpu::Color::BLACK,
        }
    }
}

const PASSENGER_SCALE: f32 = 0.05;

impl SceneConfig {
    pub fn boat_model(&self) -> Matrix4<f32> {
        Matrix4::from_scale(0.05) * Matrix4::from_angle_y(Deg(180.0))
    }

    pub fn boat_world(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(Deg(90.0)) * Matrix4::from_translation(Vector3::new(0.0, -0.38, -0.5))
    }

    /// The passenger is mirrored along Z.
    pub fn man_model(&self) -> Matrix4<f32> {
        Matrix4::from_nonuniform_scale(PASSENGER_SCALE, PASSENGER_SCALE, -PASSENGER_SCALE)
    }

    pub fn man_world(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(
            -4.0 * PASSENGER_SCALE,
            2.0 * PASSENGER_SCALE,
            0.0,
        )) * Matrix4::from_angle_y(Deg(90.0))
    }

    pub fn diamond_model(&self) -> Matrix4<f32> {
        Matrix4::from_scale(0.0005)
    }

    pub fn grid_world(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(0.0, self.grid_y_offset, 0.0))
    }
}
