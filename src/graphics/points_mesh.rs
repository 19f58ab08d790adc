use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, PrimitiveTopology},
        render_asset::RenderAssetUsages,
    },
};
use galaxy_generator::PointCloud;
use rayon::prelude::*;

// Billboard corners in units of the point size, expanded in the vertex shader.
const CORNERS: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// One camera-facing quad per point: every vertex of a quad carries the point
/// center, its corner and the point color.
pub fn build_points_mesh(cloud: &PointCloud) -> Mesh {
    let positions: Vec<[f32; 3]> = cloud
        .positions()
        .par_iter()
        .flat_map_iter(|position| [*position; 4])
        .collect();
    let colors: Vec<[f32; 4]> = cloud
        .colors()
        .par_iter()
        .flat_map_iter(|&[r, g, b]| [[r, g, b, 1.0]; 4])
        .collect();
    let corners: Vec<[f32; 2]> = (0..cloud.len()).flat_map(|_| CORNERS).collect();
    let indices: Vec<u32> = (0..cloud.len() as u32)
        .flat_map(|point| QUAD_INDICES.map(|i| point * 4 + i))
        .collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(indices))
}
