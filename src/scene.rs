//! Transform and animation state of the boat scene.
//!
//! [`Scene`] owns every mutable value the frame loop touches. All matrices are
//! `cgmath::Matrix4` values; updates build new matrices instead of mutating
//! shared ones.
//!
//! Object hierarchy used when drawing:
//!
//! ```text
//! boat ── man ── diamond
//! grid
//! ```

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};

use crate::{
    camera::Camera,
    config::SceneConfig,
    data_structures::{
        attributes::{build_color_attributes, build_grid_attributes},
        buffer::{PackedVertices, pack},
    },
    error::SceneError,
    resources::SceneMeshes,
};

/// Scene objects in draw order. The discriminant is the object's slot in the
/// vertex buffer ranges and in the per-object uniform buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneObject {
    Boat = 0,
    Man = 1,
    Diamond = 2,
    Grid = 3,
}

impl SceneObject {
    pub const ALL: [SceneObject; 4] = [
        SceneObject::Boat,
        SceneObject::Man,
        SceneObject::Diamond,
        SceneObject::Grid,
    ];

    pub fn slot(self) -> usize {
        self as usize
    }
}

/// Model matrices are fixed at startup. World matrices of the boat and the
/// man change every tick; the grid world only carries its Y offset.
#[derive(Clone, Debug)]
pub struct TransformState {
    pub boat_model: Matrix4<f32>,
    pub man_model: Matrix4<f32>,
    pub diamond_model: Matrix4<f32>,
    pub grid_model: Matrix4<f32>,
    pub boat_world: Matrix4<f32>,
    pub man_world: Matrix4<f32>,
    pub grid_world: Matrix4<f32>,
}

impl TransformState {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            boat_model: config.boat_model(),
            man_model: config.man_model(),
            diamond_model: config.diamond_model(),
            grid_model: Matrix4::identity(),
            boat_world: config.boat_world(),
            man_world: config.man_world(),
            grid_world: config.grid_world(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationState {
    pub jumping: bool,
    pub jump_velocity: f32,
    /// Man world Y translation recorded at take-off; the landing height.
    pub initial_y: f32,
    /// Radians; grows without bound.
    pub orbit_angle: f32,
    /// Turns; grows without bound.
    pub self_rotation: f32,
}

/// Model and effective world matrix of one object for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectDraw {
    pub object: SceneObject,
    pub model: Matrix4<f32>,
    pub world: Matrix4<f32>,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub config: SceneConfig,
    pub transforms: TransformState,
    pub animation: AnimationState,
    pub camera: Camera,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            transforms: TransformState::new(&config),
            animation: AnimationState::default(),
            camera: Camera::new(&config),
            config,
        }
    }

    /// Advance every animation by `delta_ms` milliseconds.
    pub fn tick(&mut self, delta_ms: f32) {
        // Pre-multiplied so the boat turns around the world Y axis.
        let turn = Matrix4::from_angle_y(Deg(delta_ms * self.config.boat_rotation_speed));
        self.transforms.boat_world = turn * self.transforms.boat_world;

        if self.animation.jumping {
            // Gravity is applied per tick, not scaled by delta_ms.
            self.animation.jump_velocity += self.config.gravity;
            let lift = Matrix4::from_translation(Vector3::new(
                0.0,
                self.animation.jump_velocity,
                0.0,
            ));
            let mut man_world = lift * self.transforms.man_world;
            if man_world.w.y <= self.animation.initial_y {
                man_world.w.y = self.animation.initial_y;
                self.animation.jumping = false;
            }
            self.transforms.man_world = man_world;
        }

        self.animation.orbit_angle += delta_ms * self.config.diamond_orbit_speed;
        self.animation.self_rotation += delta_ms * self.config.diamond_self_rotation_speed;
    }

    /// Launch the man upwards. Ignored while a jump is in progress.
    pub fn jump(&mut self) {
        if self.animation.jumping {
            return;
        }
        self.animation.jumping = true;
        self.animation.jump_velocity = self.config.jump_launch_velocity;
        self.animation.initial_y = self.transforms.man_world.w.y;
    }

    pub fn set_orthographic(&mut self) {
        self.camera.set_orthographic(&self.config);
    }

    pub fn set_perspective(&mut self) {
        self.camera.set_perspective(&self.config);
    }

    /// Diamond offset from the man's origin for the current orbit angle.
    pub fn orbit_position(&self) -> Vector3<f32> {
        let angle = self.animation.orbit_angle;
        let radius = self.config.diamond_orbit_radius;
        Vector3::new(
            angle.cos() * radius,
            self.config.diamond_orbit_height,
            angle.sin() * radius,
        )
    }

    /// Resolve the hierarchy into one draw per object, in draw order.
    pub fn draws(&self) -> [ObjectDraw; 4] {
        let t = &self.transforms;
        let boat_world = t.boat_world;
        let man_world = boat_world * t.man_world;
        let diamond_world = man_world
            * Matrix4::from_translation(self.orbit_position())
            * Matrix4::from_angle_y(Deg(self.animation.self_rotation * 360.0));

        [
            ObjectDraw {
                object: SceneObject::Boat,
                model: t.boat_model,
                world: boat_world,
            },
            ObjectDraw {
                object: SceneObject::Man,
                model: t.man_model,
                world: man_world,
            },
            ObjectDraw {
                object: SceneObject::Diamond,
                model: t.diamond_model,
                world: diamond_world,
            },
            ObjectDraw {
                object: SceneObject::Grid,
                model: t.grid_model,
                world: t.grid_world,
            },
        ]
    }
}

/// Derive colors and the grid, then pack everything in [`SceneObject::ALL`]
/// order so the draw ranges line up with the object slots.
pub fn pack_geometry(
    meshes: &SceneMeshes,
    config: &SceneConfig,
) -> Result<PackedVertices, SceneError> {
    let (grid, grid_colors) = build_grid_attributes(
        config.grid_row_spacing,
        config.grid_column_spacing,
        config.grid_color,
    )?;
    let boat_colors = build_color_attributes(meshes.boat.vertex_count());
    let man_colors = build_color_attributes(meshes.man.vertex_count());
    let diamond_colors = build_color_attributes(meshes.diamond.vertex_count());

    pack(&[
        (&meshes.boat, &boat_colors),
        (&meshes.man, &man_colors),
        (&meshes.diamond, &diamond_colors),
        (&grid, &grid_colors),
    ])
}
