use boat_scene::{
    SceneConfig, SceneError,
    data_structures::{
        attributes::build_color_attributes,
        buffer::{FLOAT_SIZE, VEC3_SIZE, check_allocation, pack},
        mesh::{ColorAttribute, Mesh, Topology},
    },
    pipelines::uniforms::{OBJECT_UNIFORM_SIZE, object_slot_stride},
    render::draw_calls,
    scene::{Scene, SceneObject, pack_geometry},
};

use crate::common::test_utils::{scene_meshes, triangles};

mod common;

#[test]
fn ranges_are_contiguous_in_pack_order() {
    let boat = triangles("boat", 4);
    let man = triangles("man", 2);
    let boat_colors = build_color_attributes(boat.vertex_count());
    let man_colors = build_color_attributes(man.vertex_count());

    let packed = pack(&[(&boat, &boat_colors), (&man, &man_colors)]).unwrap();

    assert_eq!(packed.ranges.len(), 2);
    assert_eq!(packed.ranges[0].vertices(), 0..12);
    assert_eq!(packed.ranges[1].vertices(), 12..18);
    assert_eq!(packed.vertex_count(), 18);
}

#[test]
fn colors_start_after_all_positions() {
    let boat = triangles("boat", 4);
    let man = triangles("man", 2);
    let boat_colors = build_color_attributes(boat.vertex_count());
    let man_colors = build_color_attributes(man.vertex_count());

    let packed = pack(&[(&boat, &boat_colors), (&man, &man_colors)]).unwrap();

    assert_eq!(packed.position.offset, 0);
    assert_eq!(packed.position.stride, VEC3_SIZE);
    assert_eq!(packed.color.offset, 18 * VEC3_SIZE);
    assert_eq!(packed.color.stride, VEC3_SIZE);
    assert_eq!(packed.size_in_bytes(), 2 * 18 * VEC3_SIZE);

    let color_start = (packed.color.offset / FLOAT_SIZE) as usize;
    assert_eq!(&packed.data[..boat.positions().len()], boat.positions());
    assert_eq!(
        &packed.data[boat.positions().len()..color_start],
        man.positions()
    );
    assert_eq!(
        &packed.data[color_start..color_start + boat_colors.values().len()],
        boat_colors.values()
    );
    assert_eq!(
        &packed.data[color_start + boat_colors.values().len()..],
        man_colors.values()
    );
}

#[test]
fn mismatched_colors_are_rejected() {
    let boat = triangles("boat", 2);
    let short = ColorAttribute::new(vec![1.0; 9]);

    let err = pack(&[(&boat, &short)]).unwrap_err();

    match err {
        SceneError::LayoutMismatch {
            object,
            positions,
            colors,
        } => {
            assert_eq!(object, "boat");
            assert_eq!(positions, 6);
            assert_eq!(colors, 3);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn partial_primitives_are_rejected() {
    let ragged = Mesh::new("ragged", vec![0.0; 4 * 3], Topology::Triangles);
    let colors = ColorAttribute::new(vec![1.0; 4 * 3]);

    let err = pack(&[(&ragged, &colors)]).unwrap_err();
    assert!(
        matches!(
            err,
            SceneError::IncompletePrimitive {
                vertices: 4,
                per_primitive: 3,
                ..
            }
        ),
        "{err}"
    );

    let lines = Mesh::new("lines", vec![0.0; 3 * 3], Topology::Lines);
    let err = pack(&[(&lines, &ColorAttribute::new(vec![1.0; 3 * 3]))]).unwrap_err();
    assert!(
        matches!(err, SceneError::IncompletePrimitive { per_primitive: 2, .. }),
        "{err}"
    );
}

#[test]
fn allocation_limits() {
    assert!(check_allocation(64, 1024).is_ok());
    assert!(check_allocation(1024, 1024).is_ok());
    assert!(matches!(
        check_allocation(0, 1024),
        Err(SceneError::BufferAllocation { size: 0, .. })
    ));
    assert!(matches!(
        check_allocation(2048, 1024),
        Err(SceneError::BufferAllocation {
            size: 2048,
            limit: 1024
        })
    ));
}

#[test]
fn scene_geometry_packs_in_object_order() {
    let meshes = scene_meshes();
    let packed = pack_geometry(&meshes, &SceneConfig::default()).unwrap();

    let ranges = &packed.ranges;
    assert_eq!(ranges.len(), SceneObject::ALL.len());
    assert_eq!(ranges[SceneObject::Boat.slot()].vertices(), 0..12);
    assert_eq!(ranges[SceneObject::Man.slot()].vertices(), 12..18);
    assert_eq!(ranges[SceneObject::Diamond.slot()].vertices(), 18..27);
    assert_eq!(ranges[SceneObject::Grid.slot()].vertices(), 27..8027);

    assert!(ranges[..3].iter().all(|r| r.topology == Topology::Triangles));
    assert_eq!(ranges[SceneObject::Grid.slot()].topology, Topology::Lines);
    assert_eq!(packed.color.offset, 8027 * VEC3_SIZE);
}

#[test]
fn invalid_grid_spacing_fails_packing() {
    let config = SceneConfig {
        grid_column_spacing: 0.0,
        ..SceneConfig::default()
    };
    let err = pack_geometry(&scene_meshes(), &config).unwrap_err();
    assert!(matches!(err, SceneError::GridSpacing { .. }), "{err}");
}

#[test]
fn object_slots_respect_offset_alignment() {
    assert_eq!(OBJECT_UNIFORM_SIZE, 128);
    assert_eq!(object_slot_stride(256), 256);
    assert_eq!(object_slot_stride(64), 128);
    assert_eq!(object_slot_stride(100), 200);
    assert_eq!(object_slot_stride(0), 128);
}

#[test]
fn draw_calls_pair_objects_with_ranges_and_slots() {
    let scene = Scene::new(SceneConfig::default());
    let packed = pack_geometry(&scene_meshes(), &scene.config).unwrap();
    let draws = scene.draws();

    let calls = draw_calls(&draws, &packed.ranges, 256);

    assert_eq!(calls.len(), 4);
    for (i, call) in calls.iter().enumerate() {
        assert_eq!(call.draw.object, SceneObject::ALL[i]);
        assert_eq!(call.range, packed.ranges[i]);
        assert_eq!(call.uniform_offset, 256 * i as u32);
    }
}

#[test]
fn draw_calls_skip_objects_without_ranges() {
    let scene = Scene::new(SceneConfig::default());
    let packed = pack_geometry(&scene_meshes(), &scene.config).unwrap();

    let calls = draw_calls(&scene.draws(), &packed.ranges[..2], 256);

    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].draw.object, SceneObject::Man);
}
