#![allow(dead_code)]

use boat_scene::{
    data_structures::mesh::{Mesh, Topology},
    resources::SceneMeshes,
};
use cgmath::Matrix4;

pub const EPSILON: f32 = 1e-5;

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_matrix_close(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    let actual: [[f32; 4]; 4] = actual.into();
    let expected: [[f32; 4]; 4] = expected.into();
    for (col, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        for row in 0..4 {
            assert!(
                (a[row] - e[row]).abs() <= EPSILON,
                "column {col} row {row}: expected {:?}, got {:?}",
                expected,
                actual
            );
        }
    }
}

/// A mesh of `triangles` identical triangles.
pub fn triangles(name: &str, triangles: usize) -> Mesh {
    let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        .iter()
        .copied()
        .cycle()
        .take(triangles * 9)
        .collect();
    Mesh::new(name, positions, Topology::Triangles)
}

pub fn scene_meshes() -> SceneMeshes {
    SceneMeshes {
        boat: triangles("boat", 4),
        man: triangles("man", 2),
        diamond: triangles("diamond", 3),
    }
}
