use std::io::{BufReader, Cursor};

use crate::{
    data_structures::mesh::{Mesh, Topology},
    error::SceneError,
};

/**
 * Turn OBJ text into a flat, non-indexed triangle list.
 *
 * Faces are triangulated by tobj and every index is expanded into its
 * position, so vertex `n` of the result is corner `n % 3` of triangle `n / 3`.
 * All objects/groups in the file are concatenated in file order. Materials are
 * ignored; a referenced `mtllib` is never fetched.
 */
pub fn parse_obj(name: &str, obj_text: &str) -> Result<Mesh, SceneError> {
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));

    let (models, _materials) = tobj::load_obj_buf(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Err(tobj::LoadError::OpenFileFailed),
    )
    .map_err(|source| SceneError::Parse {
        name: name.to_string(),
        source,
    })?;

    let mut positions = Vec::new();
    for model in &models {
        let available = model.mesh.positions.len() / 3;
        for &index in &model.mesh.indices {
            let start = index as usize * 3;
            let vertex = model
                .mesh
                .positions
                .get(start..start + 3)
                .ok_or_else(|| SceneError::FaceIndex {
                    name: name.to_string(),
                    index,
                    available,
                })?;
            positions.extend_from_slice(vertex);
        }
    }

    if positions.is_empty() {
        return Err(SceneError::EmptyMesh {
            name: name.to_string(),
        });
    }

    Ok(Mesh::new(name, positions, Topology::Triangles))
}
