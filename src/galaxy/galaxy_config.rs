use super::GalaxySet;
use bevy::prelude::*;
use galaxy_generator::GalaxyParameters;

#[derive(Resource, Clone, PartialEq, Debug)]
pub struct GalaxyConfig {
    pub generation: i32,
    pub params: GalaxyParameters,
    /// Fixed seed for reproducible clouds. `None` reseeds on every regeneration.
    pub seed: Option<u64>,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            generation: 1,
            params: GalaxyParameters::default(),
            seed: None,
        }
    }
}

#[derive(Resource)]
struct GalaxyConfigOld(GalaxyConfig);

impl Default for GalaxyConfigOld {
    fn default() -> Self {
        Self(GalaxyConfig {
            generation: -1,
            ..default()
        })
    }
}

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalaxyConfig>()
            .init_resource::<GalaxyConfigOld>()
            .add_systems(Update, apply_config_updates.in_set(GalaxySet::Detect));
    }
}

/// Bumps the generation when the config really differs from the last one seen.
fn apply_config_updates(
    mut galaxy_config_old: ResMut<GalaxyConfigOld>,
    mut galaxy_config: ResMut<GalaxyConfig>,
) {
    if galaxy_config.is_changed() && *galaxy_config != galaxy_config_old.0 {
        galaxy_config.generation += 1;
        galaxy_config_old.0 = galaxy_config.clone();
    }
}
