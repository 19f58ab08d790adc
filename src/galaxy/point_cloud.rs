use super::{GalaxySet, PointCount};
use crate::graphics::build_points_mesh;
use crate::prelude::*;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use rand::prelude::*;

pub struct PointCloudPlugin;

impl Plugin for PointCloudPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PointCloudControl { generation: -1 })
            .insert_resource(PointCount { count: 0, seed: 0 })
            .add_systems(Update, manage_point_cloud.in_set(GalaxySet::Regenerate));
    }
}

#[derive(Resource)]
pub struct PointCloudControl {
    generation: i32,
}

/// The displayed cloud. At most one exists at a time.
#[derive(Component)]
pub struct GalaxyPoints;

/// Regenerates the cloud when the config generation moves on.
/// The new cloud is generated before the old one is released, so rejected
/// parameters leave the current galaxy on screen.
fn manage_point_cloud(
    mut commands: Commands,
    mut control: ResMut<PointCloudControl>,
    mut point_count: ResMut<PointCount>,
    galaxy_config: Res<GalaxyConfig>,
    scene_fog: Res<SceneFog>,
    existing: Query<(Entity, &Mesh3d, &MeshMaterial3d<GalaxyPointsMaterial>), With<GalaxyPoints>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointsMaterial>>,
) {
    if control.generation == galaxy_config.generation {
        return;
    }
    control.generation = galaxy_config.generation;

    let size = galaxy_config.params.size;
    if !size.is_finite() || size <= 0.0 {
        error!("Keeping previous galaxy: point size {size} must be finite and positive");
        return;
    }

    let seed = galaxy_config
        .seed
        .unwrap_or_else(|| rand::rng().random::<u64>());
    let cloud = match generate_parallel(&galaxy_config.params, seed) {
        Ok(cloud) => cloud,
        Err(err) => {
            error!("Keeping previous galaxy: {err}");
            return;
        }
    };

    // release the previous geometry and material before replacing them
    for (entity, mesh, material) in &existing {
        meshes.remove(&mesh.0);
        materials.remove(&material.0);
        commands.entity(entity).despawn();
    }

    info!(
        "Galaxy config updated, regenerating {} points (seed {seed})",
        cloud.len()
    );
    point_count.count = cloud.len();
    point_count.seed = seed;
    if cloud.is_empty() {
        return;
    }

    let mesh = meshes.add(build_points_mesh(&cloud));
    let material = materials.add(GalaxyPointsMaterial::new(size, &scene_fog));
    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        Visibility::Inherited,
        NoFrustumCulling,
        GalaxyPoints,
    ));
}
