use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::Context;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use itertools::Itertools;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Triangulated, single-indexed mesh ready for upload.
pub struct Model {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

impl Model {
    pub fn from_obj_file(name: impl Into<String>, path: impl AsRef<Path>) -> anyhow::Result<Model> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open OBJ file {}", path.display()))?;

        Self::from_obj_reader(name, &mut BufReader::new(file))
            .with_context(|| format!("Failed to load OBJ file {}", path.display()))
    }

    pub fn from_obj_reader<R: BufRead>(
        name: impl Into<String>,
        reader: &mut R,
    ) -> anyhow::Result<Model> {
        // Materials come from `material::MaterialType`, never from MTL files.
        let (models, _materials) =
            tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))
                .context("Failed to parse OBJ data")?;

        Self::from_obj_models(name.into(), &models)
    }

    fn from_obj_models(name: String, models: &[tobj::Model]) -> anyhow::Result<Model> {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for obj_model in models {
            let mesh = &obj_model.mesh;
            let base_vertex = vertices.len() as u32;

            let positions = mesh
                .positions
                .chunks_exact(3)
                .map(Vec3::from_slice)
                .collect::<Vec<_>>();

            let normals = if mesh.normals.len() == mesh.positions.len() {
                mesh.normals
                    .chunks_exact(3)
                    .map(Vec3::from_slice)
                    .collect::<Vec<_>>()
            } else {
                calculate_vertex_normals(&positions, &mesh.indices)
            };

            vertices.extend(
                positions
                    .into_iter()
                    .zip(normals)
                    .map(|(position, normal)| Vertex { position, normal }),
            );
            indices.extend(mesh.indices.iter().map(|index| base_vertex + index));
        }

        if indices.is_empty() {
            return Err(anyhow::anyhow!("OBJ model without faces: {}", name));
        }

        Ok(Model {
            name,
            vertices,
            indices,
        })
    }

    pub fn num_indices(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Area-weighted smooth normals for meshes that ship without `vn` records.
pub fn calculate_vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for (&a, &b, &c) in indices.iter().tuples() {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let face_normal = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face_normal;
        normals[b] += face_normal;
        normals[c] += face_normal;
    }

    normals
        .into_iter()
        .map(|normal| normal.normalize_or(Vec3::Y))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const QUAD: &str = "\
o Quad
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
f 1 2 3 4
";

    #[test]
    fn quad_is_triangulated() {
        let model = Model::from_obj_reader("Quad", &mut Cursor::new(QUAD)).unwrap();

        assert_eq!(model.name, "Quad");
        assert_eq!(model.vertices.len(), 4);
        assert_eq!(model.num_indices(), 6);
    }

    #[test]
    fn missing_normals_are_computed_from_faces() {
        let model = Model::from_obj_reader("Quad", &mut Cursor::new(QUAD)).unwrap();

        for vertex in &model.vertices {
            assert!(vertex.normal.abs_diff_eq(Vec3::Z, 1e-6));
        }
    }

    #[test]
    fn file_normals_are_kept() {
        let source = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 0.0 1.0
vn 0.0 1.0 0.0
f 1//1 3//1 2//1
";
        let model = Model::from_obj_reader("Tri", &mut Cursor::new(source)).unwrap();

        assert_eq!(model.vertices.len(), 3);
        for vertex in &model.vertices {
            assert_eq!(vertex.normal, Vec3::Y);
        }
    }

    #[test]
    fn multiple_objects_are_merged_with_offset_indices() {
        let source = "\
o A
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
o B
v 0.0 0.0 2.0
v 1.0 0.0 2.0
v 0.0 1.0 2.0
f 4 5 6
";
        let model = Model::from_obj_reader("Pair", &mut Cursor::new(source)).unwrap();

        assert_eq!(model.vertices.len(), 6);
        assert_eq!(model.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn model_without_faces_is_rejected() {
        let source = "v 0.0 0.0 0.0\n";
        assert!(Model::from_obj_reader("Empty", &mut Cursor::new(source)).is_err());
    }
}
