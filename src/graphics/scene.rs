use super::GalaxyPointsMaterial;
use crate::galaxy::GalaxySet;
use bevy::{
    pbr::{DistanceFog, FogFalloff, light_consts},
    prelude::*,
};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneFog>()
            .insert_resource(ClearColor(SceneFog::default().color))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 1000.0,
                ..default()
            })
            .add_systems(Startup, spawn_lights)
            .add_systems(Update, sync_scene_fog.after(GalaxySet::Commit));
    }
}

/// Linear fog shared by the camera and the point material.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct SceneFog {
    pub near: f32,
    pub far: f32,
    pub color: Color,
}

impl Default for SceneFog {
    fn default() -> Self {
        Self {
            near: 1.0,
            far: 100.0,
            color: Color::BLACK,
        }
    }
}

impl SceneFog {
    pub const MIN: f32 = 1.0;
    pub const MAX: f32 = 100.0;

    pub fn distance_fog(&self) -> DistanceFog {
        DistanceFog {
            color: self.color,
            falloff: FogFalloff::Linear {
                start: self.near,
                end: self.far,
            },
            ..default()
        }
    }
}

fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: light_consts::lux::OVERCAST_DAY,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn sync_scene_fog(
    scene_fog: Res<SceneFog>,
    mut fogs: Query<&mut DistanceFog>,
    mut materials: ResMut<Assets<GalaxyPointsMaterial>>,
) {
    if !scene_fog.is_changed() {
        return;
    }
    for mut fog in &mut fogs {
        *fog = scene_fog.distance_fog();
    }
    for (_, material) in materials.iter_mut() {
        material.set_fog(&scene_fog);
    }
}
