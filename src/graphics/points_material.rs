use super::SceneFog;
use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypePath,
    render::{
        mesh::MeshVertexBufferLayoutRef,
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType,
            SpecializedMeshPipelineError,
        },
    },
};
use bytemuck::{Pod, Zeroable};

const SHADER_ASSET_PATH: &str = "shaders/galaxy_points.wgsl";

pub struct PointsMaterialPlugin;

impl Plugin for PointsMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<GalaxyPointsMaterial>::default());
    }
}

// Mirrors `PointsParams` in galaxy_points.wgsl
#[derive(ShaderType, Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct PointsParams {
    fog_color: Vec4,
    size: f32,
    fog_near: f32,
    fog_far: f32,
    pad: f32,
}

/// Unlit, additive, depth-write-off material for the galaxy billboards.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone, PartialEq)]
pub struct GalaxyPointsMaterial {
    #[uniform(0)]
    params: PointsParams,
}

impl GalaxyPointsMaterial {
    pub fn new(size: f32, fog: &SceneFog) -> Self {
        let mut material = Self {
            params: PointsParams {
                fog_color: Vec4::ZERO,
                size,
                fog_near: 0.0,
                fog_far: 0.0,
                pad: 0.0,
            },
        };
        material.set_fog(fog);
        material
    }

    pub fn set_fog(&mut self, fog: &SceneFog) {
        self.params.fog_color = fog.color.to_linear().to_vec4();
        self.params.fog_near = fog.near;
        self.params.fog_far = fog.far;
    }
}

impl Material for GalaxyPointsMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        descriptor.primitive.cull_mode = None;
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
