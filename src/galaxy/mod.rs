use bevy::prelude::*;

mod galaxy_config;
mod point_cloud;

pub use galaxy_config::{GalaxyConfig, GalaxyConfigPlugin};
pub use point_cloud::PointCloudPlugin;

/// Per-frame order: panel edits, binding dispatch, change detection, regeneration.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GalaxySet {
    Edit,
    Commit,
    Detect,
    Regenerate,
}

/// Size and seed of the displayed cloud.
#[derive(Resource)]
pub struct PointCount {
    pub count: usize,
    pub seed: u64,
}

pub struct GalaxyPlugin;

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GalaxySet::Edit,
                GalaxySet::Commit,
                GalaxySet::Detect,
                GalaxySet::Regenerate,
            )
                .chain(),
        )
        .add_plugins((GalaxyConfigPlugin, PointCloudPlugin));
    }
}
