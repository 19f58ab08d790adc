use super::panel_bindings::{
    EditPhase, PanelDraft, PanelEdit, PanelField, sync_panel_draft,
};
use crate::galaxy::GalaxySet;
use crate::prelude::*;
use bevy::color::ColorToPacked;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, configure_visuals_system)
            .add_systems(
                Update,
                ui_system.in_set(GalaxySet::Edit).after(sync_panel_draft),
            );
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

/// Sliders report `Finished` once released; a click or typed value finishes at once.
fn edit_phase(changed: bool, dragged: bool, drag_stopped: bool) -> Option<EditPhase> {
    if drag_stopped || (changed && !dragged) {
        Some(EditPhase::Finished)
    } else if changed {
        Some(EditPhase::Changing)
    } else {
        None
    }
}

/// Color pickers report `Changing` while the pointer is held inside the popup
/// and a single `Finished` once it is released.
fn color_edit_phase(pending: &mut bool, changed: bool, pointer_down: bool) -> Option<EditPhase> {
    if pointer_down {
        if changed {
            *pending = true;
            return Some(EditPhase::Changing);
        }
        return None;
    }
    if changed || *pending {
        *pending = false;
        return Some(EditPhase::Finished);
    }
    None
}

/// Color edits started but not yet released, per color field.
#[derive(Default)]
struct PendingColorEdits {
    inside: bool,
    outside: bool,
    fog: bool,
}

fn emit(edits: &mut EventWriter<PanelEdit>, field: PanelField, phase: Option<EditPhase>) {
    if let Some(phase) = phase {
        edits.write(PanelEdit { field, phase });
    }
}

fn slider_ui(ui: &mut egui::Ui, slider: egui::Slider) -> Option<EditPhase> {
    let response = ui.add(slider);
    edit_phase(
        response.changed(),
        response.dragged(),
        response.drag_stopped(),
    )
}

fn color_ui(
    ui: &mut egui::Ui,
    label: &str,
    color: &mut Color,
    pending: &mut bool,
) -> Option<EditPhase> {
    let mut rgb = color.to_srgba().to_u8_array_no_alpha();
    let response = ui
        .horizontal(|ui| {
            let response = ui.color_edit_button_srgb(&mut rgb);
            ui.label(label);
            response
        })
        .inner;
    if response.changed() {
        *color = Color::srgb_u8(rgb[0], rgb[1], rgb[2]);
    }
    let pointer_down = ui.input(|i| i.pointer.any_down());
    color_edit_phase(pending, response.changed(), pointer_down)
}

fn particles_ui(
    params: &mut GalaxyParameters,
    pending: &mut PendingColorEdits,
    edits: &mut EventWriter<PanelEdit>,
    ui: &mut egui::Ui,
) {
    let minval = GalaxyParameters::MIN;
    let maxval = GalaxyParameters::MAX;

    egui::CollapsingHeader::new("Particles")
        .default_open(true)
        .show(ui, |ui| {
            let phase = slider_ui(
                ui,
                egui::Slider::new(&mut params.count, minval.count..=maxval.count)
                    .step_by(GalaxyParameters::COUNT_STEP as f64)
                    .text("count"),
            );
            emit(edits, PanelField::Count, phase);

            let phase = slider_ui(
                ui,
                egui::Slider::new(&mut params.size, minval.size..=maxval.size)
                    .step_by(0.001)
                    .text("size"),
            );
            emit(edits, PanelField::Size, phase);

            let phase = slider_ui(
                ui,
                egui::Slider::new(&mut params.radius, minval.radius..=maxval.radius)
                    .step_by(0.01)
                    .text("radius"),
            );
            emit(edits, PanelField::Radius, phase);

            let phase = slider_ui(
                ui,
                egui::Slider::new(&mut params.branches, minval.branches..=maxval.branches)
                    .text("branches"),
            );
            emit(edits, PanelField::Branches, phase);

            let phase = slider_ui(
                ui,
                egui::Slider::new(&mut params.spin, minval.spin..=maxval.spin)
                    .step_by(1.0)
                    .text("spin"),
            );
            emit(edits, PanelField::Spin, phase);

            let phase = slider_ui(
                ui,
                egui::Slider::new(
                    &mut params.randomness,
                    minval.randomness..=maxval.randomness,
                )
                .step_by(0.01)
                .text("randomness"),
            );
            emit(edits, PanelField::Randomness, phase);

            let phase = slider_ui(
                ui,
                egui::Slider::new(
                    &mut params.randomness_power,
                    minval.randomness_power..=maxval.randomness_power,
                )
                .step_by(0.01)
                .text("randomness power"),
            );
            emit(edits, PanelField::RandomnessPower, phase);

            let phase = color_ui(
                ui,
                "inside color",
                &mut params.inside_color,
                &mut pending.inside,
            );
            emit(edits, PanelField::InsideColor, phase);
            let phase = color_ui(
                ui,
                "outside color",
                &mut params.outside_color,
                &mut pending.outside,
            );
            emit(edits, PanelField::OutsideColor, phase);
        });
}

fn fog_ui(
    fog: &mut SceneFog,
    pending: &mut PendingColorEdits,
    edits: &mut EventWriter<PanelEdit>,
    ui: &mut egui::Ui,
) {
    egui::CollapsingHeader::new("Fog")
        .default_open(true)
        .show(ui, |ui| {
            let phase = slider_ui(
                ui,
                egui::Slider::new(&mut fog.near, SceneFog::MIN..=SceneFog::MAX)
                    .step_by(0.01)
                    .text("near"),
            );
            emit(edits, PanelField::FogNear, phase);

            let phase = slider_ui(
                ui,
                egui::Slider::new(&mut fog.far, SceneFog::MIN..=SceneFog::MAX)
                    .step_by(0.01)
                    .text("far"),
            );
            emit(edits, PanelField::FogFar, phase);

            let phase = color_ui(ui, "color", &mut fog.color, &mut pending.fog);
            emit(edits, PanelField::FogColor, phase);
        });
}

fn ui_system(
    mut contexts: EguiContexts,
    mut draft: ResMut<PanelDraft>,
    mut pending: Local<PendingColorEdits>,
    mut edits: EventWriter<PanelEdit>,
) {
    let ctx = contexts.ctx_mut();
    let draft = &mut *draft;

    egui::Window::new("Galaxy")
        .default_width(260.0)
        .resizable(false)
        .show(ctx, |ui| {
            particles_ui(&mut draft.params, &mut pending, &mut edits, ui);
            ui.separator();
            fog_ui(&mut draft.fog, &mut pending, &mut edits, ui);
        });
}
