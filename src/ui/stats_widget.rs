use crate::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

pub struct StatsWidgetPlugin;

impl Plugin for StatsWidgetPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_widget)
            .add_systems(Update, update_widget_system)
            .add_plugins(FrameTimeDiagnosticsPlugin::default());
    }
}

#[derive(Component)]
struct StatsWidget;

fn setup_widget(mut commands: Commands) {
    commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::FlexStart,
                width: Val::Px(240.),
                right: Val::Percent(1.),
                bottom: Val::Percent(1.),
                top: Val::Auto,
                left: Val::Auto,
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.03, 0.08, 0.5)),
            GlobalZIndex(i32::MAX - 1),
        ))
        .with_children(|parent| {
            parent.spawn((
                StatsWidget,
                Text(" N/A".to_string()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
            ));
        });
}

fn format_stats(fps: f64, frame_time: f64, point_count: &PointCount) -> String {
    let fps_str = format!("{fps:.1} ({frame_time:.2} ms)");
    format!(
        "{:>6} {:<8}\n{:>6} {}\n{:>6} {:x}",
        "FPS:", fps_str, "Points:", point_count.count, "Seed:", point_count.seed
    )
}

fn update_widget_system(
    diagnostics: Res<DiagnosticsStore>,
    point_count: Res<PointCount>,
    mut query: Query<&mut Text, With<StatsWidget>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|frame_time| frame_time.smoothed())
        .unwrap_or(0.0);

    for mut text in &mut query {
        text.0 = format_stats(fps, frame_time, &point_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stats() {
        let point_count = PointCount {
            count: 1000,
            seed: 0xbeef,
        };
        let text = format_stats(59.94, 16.684, &point_count);
        assert!(text.contains("59.9 (16.68 ms)"));
        assert!(text.contains("Points: 1000"));
        assert!(text.ends_with("Seed: beef"));
    }
}
