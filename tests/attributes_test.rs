use boat_scene::{
    SceneError,
    data_structures::{
        attributes::{MAX_GRID_LINES, build_color_attributes, build_grid_attributes},
        mesh::Topology,
    },
};

use crate::common::test_utils::assert_close;

mod common;

#[test]
fn colors_cover_every_vertex_with_blue_gradient() {
    for vertex_count in [3, 6, 9, 30, 300] {
        let colors = build_color_attributes(vertex_count);
        assert_eq!(colors.values().len(), vertex_count * 3);

        let triples: Vec<[f32; 3]> = colors.triples().collect();
        let mut previous = f32::MIN;
        for triangle in triples.chunks(3) {
            assert_eq!(triangle[0], triangle[1]);
            assert_eq!(triangle[1], triangle[2]);
            let [r, g, b] = triangle[0];
            assert_eq!(r, g);
            assert_eq!(b, 1.0);
            assert!(r >= previous, "shade went down: {previous} -> {r}");
            previous = r;
        }
    }
}

#[test]
fn color_shade_is_triangle_start_over_vertex_count() {
    let colors = build_color_attributes(12);
    let shades: Vec<f32> = colors.triples().step_by(3).map(|c| c[0]).collect();
    assert_eq!(shades.len(), 4);
    assert_close(shades[0], 0.0);
    assert_close(shades[1], 0.25);
    assert_close(shades[2], 0.5);
    assert_close(shades[3], 0.75);
}

#[test]
fn partial_trailing_triangle_gets_no_color() {
    assert_eq!(build_color_attributes(7).vertex_count(), 6);
    assert_eq!(build_color_attributes(8).vertex_count(), 6);
    assert_eq!(build_color_attributes(2).vertex_count(), 0);
    assert_eq!(build_color_attributes(0).vertex_count(), 0);

    // Shades still divide by the full count.
    let shades: Vec<f32> = build_color_attributes(7).triples().map(|c| c[0]).collect();
    assert_close(shades[3], 3.0 / 7.0);
}

#[test]
fn unit_grid_has_eight_thousand_green_vertices() {
    let (mesh, colors) = build_grid_attributes(1.0, 1.0, [0.0, 1.0, 0.0]).unwrap();

    assert_eq!(mesh.topology(), Topology::Lines);
    assert_eq!(mesh.vertex_count(), 8000);
    assert_eq!(colors.vertex_count(), 8000);
    assert!(colors.triples().all(|c| c == [0.0, 1.0, 0.0]));
}

#[test]
fn grid_rows_then_columns_span_the_domain() {
    let (mesh, _) = build_grid_attributes(1.0, 1.0, [0.0, 1.0, 0.0]).unwrap();
    let p = mesh.positions();

    // First row: x = -1000 from z = -1000 to z = 1000.
    assert_eq!(&p[0..6], &[-1000.0, 0.0, -1000.0, -1000.0, 0.0, 1000.0]);
    // Last row stops short of the exclusive upper bound.
    let last_row = 1999 * 6;
    assert_eq!(&p[last_row..last_row + 6], &[999.0, 0.0, -1000.0, 999.0, 0.0, 1000.0]);
    // First column: z = -1000 from x = -1000 to x = 1000.
    let first_column = 2000 * 6;
    assert_eq!(
        &p[first_column..first_column + 6],
        &[-1000.0, 0.0, -1000.0, 1000.0, 0.0, -1000.0]
    );
    assert!(p.chunks(3).all(|v| v[1] == 0.0));
}

#[test]
fn grid_spacing_controls_line_counts_independently() {
    let (mesh, colors) = build_grid_attributes(10.0, 250.0, [1.0, 0.0, 0.0]).unwrap();
    // 200 rows and 8 columns, two vertices each.
    assert_eq!(mesh.vertex_count(), (200 + 8) * 2);
    assert_eq!(colors.vertex_count(), mesh.vertex_count());
}

#[test]
fn fractional_spacing_does_not_overshoot() {
    let (mesh, _) = build_grid_attributes(0.5, 1.0, [0.0, 1.0, 0.0]).unwrap();
    assert_eq!(mesh.vertex_count(), (4000 + 2000) * 2);
}

#[test]
fn non_positive_grid_spacing_is_rejected() {
    for (row, column) in [(0.0, 1.0), (1.0, -2.0), (f32::NAN, 1.0), (1.0, f32::INFINITY)] {
        let err = build_grid_attributes(row, column, [0.0, 1.0, 0.0]).unwrap_err();
        assert!(matches!(err, SceneError::GridSpacing { .. }), "{err}");
    }
}

#[test]
fn spacing_too_fine_for_the_line_limit_is_rejected() {
    for (row, column) in [(1e-6, 1.0), (1.0, 1e-6), (f32::MIN_POSITIVE, f32::MIN_POSITIVE)] {
        let err = build_grid_attributes(row, column, [0.0, 1.0, 0.0]).unwrap_err();
        assert!(
            matches!(err, SceneError::GridSpacing { max_lines, .. } if max_lines == MAX_GRID_LINES),
            "{err}"
        );
    }
}

#[test]
fn spacing_at_the_line_limit_is_accepted() {
    let spacing = 2000.0 / MAX_GRID_LINES as f32;
    let (mesh, _) = build_grid_attributes(spacing, 1000.0, [0.0, 1.0, 0.0]).unwrap();
    assert_eq!(mesh.vertex_count(), (MAX_GRID_LINES as usize + 2) * 2);
}
