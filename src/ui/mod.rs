use bevy::prelude::*;

mod camera;
mod config_egui;
mod panel_bindings;
mod stats_widget;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            camera::CameraPlugin,
            config_egui::ConfigEguiPlugin,
            panel_bindings::PanelBindingsPlugin,
            stats_widget::StatsWidgetPlugin,
        ));
    }
}
