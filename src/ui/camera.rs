use crate::prelude::*;
use bevy::{
    input::mouse::{AccumulatedMouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};
use bevy_egui::EguiContexts;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, camera_control_system.after(GalaxySet::Edit));
    }
}

const ROTATE_SPEED: f32 = 0.005;
// fraction of the orbit velocity lost per frame
const DAMPING: f32 = 0.1;
const MAX_PITCH: f32 = 1.5;

fn spawn_camera(
    mut commands: Commands,
    scene_fog: Res<SceneFog>,
    galaxy_config: Res<GalaxyConfig>,
) {
    let camera_main = CameraMain::default();
    commands.spawn((
        Camera3d::default(),
        camera_main.transform(galaxy_scale(galaxy_config.params.radius)),
        scene_fog.distance_fog(),
        camera_main,
    ));
}

/// Orbit distance at full zoom-out for a galaxy of `radius`.
fn galaxy_scale(radius: f32) -> f32 {
    radius.max(1.0) * 2.5
}

#[derive(Component, Clone)]
pub struct CameraMain {
    target_pos: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    smooth_zoom_buffer: f32,
    orbit_velocity: Vec2,
}

impl Default for CameraMain {
    fn default() -> Self {
        Self {
            target_pos: Vec3::ZERO,
            yaw: 0.6,
            pitch: 0.5,
            zoom: 0.6,
            smooth_zoom_buffer: 0.0,
            orbit_velocity: Vec2::ZERO,
        }
    }
}

impl CameraMain {
    fn translation(&self, galaxy_scale: f32) -> Vec3 {
        let distance = galaxy_scale * (self.zoom * 0.85 + 0.15);
        orbit_translation(self.look_pos(), self.yaw, self.pitch, distance)
    }

    fn transform(&self, galaxy_scale: f32) -> Transform {
        Transform::from_translation(self.translation(galaxy_scale))
            .looking_at(self.look_pos(), Vec3::Y)
    }

    fn look_pos(&self) -> Vec3 {
        self.target_pos
    }

    fn apply_orbit(&mut self) {
        self.yaw -= self.orbit_velocity.x;
        self.pitch = (self.pitch + self.orbit_velocity.y).clamp(-MAX_PITCH, MAX_PITCH);
        self.orbit_velocity *= 1.0 - DAMPING;
    }
}

pub fn orbit_translation(target: Vec3, yaw: f32, pitch: f32, distance: f32) -> Vec3 {
    target
        + distance
            * Vec3::new(
                pitch.cos() * yaw.sin(),
                pitch.sin(),
                pitch.cos() * yaw.cos(),
            )
}

/// Moves part of the buffered scroll into the zoom each frame.
fn smooth_zoom_step(buffer: f32) -> f32 {
    let smooth_zoom_min = 0.001f32;
    let smooth_zoom_factor = 0.2f32;

    if buffer < 0.0 {
        f32::min(
            buffer * smooth_zoom_factor,
            (-smooth_zoom_min).max(buffer),
        )
    } else {
        f32::max(
            buffer * smooth_zoom_factor,
            smooth_zoom_min.min(buffer),
        )
    }
}

pub fn camera_control_system(
    mut query: Query<(&mut Transform, &mut CameraMain)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    galaxy_config: Res<GalaxyConfig>,
    mut contexts: EguiContexts,
) {
    let Ok((mut transform, mut camera_main)) = query.single_mut() else {
        return;
    };

    // input over the panel belongs to the panel
    let ctx = contexts.ctx_mut();
    let panel_has_pointer = ctx.wants_pointer_input() || ctx.is_pointer_over_area();

    if !panel_has_pointer && mouse_buttons.pressed(MouseButton::Left) {
        camera_main.orbit_velocity += mouse_motion.delta * ROTATE_SPEED;
    }
    camera_main.apply_orbit();

    // scroll delta is cached to a buffer
    // buffer is converted to actual zoom over time for a smooth zooming effect
    for ev in scroll_evr.read() {
        if panel_has_pointer {
            continue;
        }
        let step = match ev.unit {
            MouseScrollUnit::Line => 0.05,
            MouseScrollUnit::Pixel => 0.002,
        };
        camera_main.smooth_zoom_buffer += ev.y * step;
    }

    let smooth_zoom_amount = smooth_zoom_step(camera_main.smooth_zoom_buffer);
    camera_main.zoom -= smooth_zoom_amount;
    camera_main.smooth_zoom_buffer -= smooth_zoom_amount;
    camera_main.zoom = camera_main.zoom.clamp(0., 1.);

    *transform = camera_main.transform(galaxy_scale(galaxy_config.params.radius));
}
