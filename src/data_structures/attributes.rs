//! Derived vertex attributes: per-triangle shading and the ground grid.

use crate::{
    data_structures::mesh::{ColorAttribute, Mesh, Topology},
    error::SceneError,
};

/// Half extent of the grid along X.
pub const GRID_X_RANGE: f32 = 1000.0;
/// Half extent of the grid along Z.
pub const GRID_Z_RANGE: f32 = 1000.0;
/// Upper bound on grid lines along either axis.
pub const MAX_GRID_LINES: u32 = 1 << 20;

/// Shade every triangle a little bluer than the one before it.
///
/// Triangle `i` gets `(s, s, 1.0)` on all three vertices with
/// `s = 3i / vertex_count`. A trailing partial triangle (when `vertex_count`
/// is not a multiple of three) gets no color.
pub fn build_color_attributes(vertex_count: usize) -> ColorAttribute {
    let triangles = vertex_count / 3;
    let mut colors = Vec::with_capacity(triangles * 9);
    for i in 0..triangles {
        let shade = (i * 3) as f32 / vertex_count as f32;
        for _ in 0..3 {
            colors.extend_from_slice(&[shade, shade, 1.0]);
        }
    }
    ColorAttribute::new(colors)
}

/// Build the ground grid as line segments on the `y = 0` plane.
///
/// Rows run along Z at every `row_spacing` step of X in
/// `[-GRID_X_RANGE, GRID_X_RANGE)`, columns run along X at every
/// `column_spacing` step of Z in `[-GRID_Z_RANGE, GRID_Z_RANGE)`. Every vertex
/// is colored `color`.
pub fn build_grid_attributes(
    row_spacing: f32,
    column_spacing: f32,
    color: [f32; 3],
) -> Result<(Mesh, ColorAttribute), SceneError> {
    let (Some(rows), Some(columns)) = (
        line_count(GRID_X_RANGE, row_spacing),
        line_count(GRID_Z_RANGE, column_spacing),
    ) else {
        return Err(SceneError::GridSpacing {
            row: row_spacing,
            column: column_spacing,
            max_lines: MAX_GRID_LINES,
        });
    };

    let mut mesh = Vec::with_capacity((rows as usize + columns as usize) * 6);

    // Steps are computed from the index so long grids don't drift.
    for x in steps(-GRID_X_RANGE, GRID_X_RANGE, row_spacing, rows) {
        mesh.extend_from_slice(&[x, 0.0, -GRID_Z_RANGE]);
        mesh.extend_from_slice(&[x, 0.0, GRID_Z_RANGE]);
    }
    for z in steps(-GRID_Z_RANGE, GRID_Z_RANGE, column_spacing, columns) {
        mesh.extend_from_slice(&[-GRID_X_RANGE, 0.0, z]);
        mesh.extend_from_slice(&[GRID_X_RANGE, 0.0, z]);
    }

    let colors = color
        .iter()
        .copied()
        .cycle()
        .take(mesh.len())
        .collect::<Vec<_>>();

    Ok((
        Mesh::new("grid", mesh, Topology::Lines),
        ColorAttribute::new(colors),
    ))
}

/// Lines along one axis for `spacing` over `[-half_extent, half_extent)`, or
/// `None` when the spacing is not positive and finite or yields more than
/// [`MAX_GRID_LINES`].
fn line_count(half_extent: f32, spacing: f32) -> Option<u32> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return None;
    }
    let lines = (2.0 * half_extent / spacing).ceil();
    (lines <= MAX_GRID_LINES as f32).then_some(lines as u32)
}

fn steps(start: f32, end: f32, spacing: f32, count: u32) -> impl Iterator<Item = f32> {
    // One extra step absorbs rounding in the count; the bound check drops it.
    (0..=count)
        .map(move |i| start + i as f32 * spacing)
        .take_while(move |v| *v < end)
}
