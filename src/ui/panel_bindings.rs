use crate::galaxy::GalaxySet;
use crate::prelude::*;
use bevy::prelude::*;

pub struct PanelBindingsPlugin;

impl Plugin for PanelBindingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PanelEdit>()
            .init_resource::<PanelBindings>()
            .init_resource::<PanelDraft>()
            .add_systems(Update, sync_panel_draft.in_set(GalaxySet::Edit))
            .add_systems(Update, dispatch_panel_edits.in_set(GalaxySet::Commit));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelField {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
    InsideColor,
    OutsideColor,
    FogNear,
    FogFar,
    FogColor,
}

impl PanelField {
    /// Fields that shape the point cloud.
    pub const GALAXY: [Self; 9] = [
        Self::Count,
        Self::Size,
        Self::Radius,
        Self::Branches,
        Self::Spin,
        Self::Randomness,
        Self::RandomnessPower,
        Self::InsideColor,
        Self::OutsideColor,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditPhase {
    /// Value moved while the widget is still held.
    Changing,
    /// Widget released or value committed.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    OnChange,
    OnFinishChange,
}

impl Trigger {
    fn fires(self, phase: EditPhase) -> bool {
        match self {
            Trigger::OnChange => true,
            Trigger::OnFinishChange => phase == EditPhase::Finished,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
    Regenerate,
    UpdateFog,
    UpdateBackground,
}

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct PanelEdit {
    pub field: PanelField,
    pub phase: EditPhase,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Binding {
    field: PanelField,
    trigger: Trigger,
    action: PanelAction,
}

/// Which action each panel field triggers, and when.
#[derive(Resource, Clone, Debug)]
pub struct PanelBindings {
    bindings: Vec<Binding>,
}

impl Default for PanelBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: Vec::new(),
        };
        for field in PanelField::GALAXY {
            bindings.bind(field, Trigger::OnFinishChange, PanelAction::Regenerate);
        }
        bindings
            .bind(PanelField::FogNear, Trigger::OnChange, PanelAction::UpdateFog)
            .bind(PanelField::FogFar, Trigger::OnChange, PanelAction::UpdateFog)
            .bind(PanelField::FogColor, Trigger::OnChange, PanelAction::UpdateFog)
            .bind(
                PanelField::FogColor,
                Trigger::OnChange,
                PanelAction::UpdateBackground,
            );
        bindings
    }
}

impl PanelBindings {
    pub fn bind(&mut self, field: PanelField, trigger: Trigger, action: PanelAction) -> &mut Self {
        self.bindings.push(Binding {
            field,
            trigger,
            action,
        });
        self
    }

    /// Actions fired by `edit`, in binding order.
    pub fn actions(&self, edit: PanelEdit) -> impl Iterator<Item = PanelAction> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.field == edit.field && b.trigger.fires(edit.phase))
            .map(|b| b.action)
    }
}

/// Values shown in the panel. They only reach the scene through bindings.
#[derive(Resource, Clone, Debug, PartialEq, Default)]
pub struct PanelDraft {
    pub params: GalaxyParameters,
    pub fog: SceneFog,
}

/// Pulls values set outside the panel back into the draft, so a later
/// panel commit starts from what is on screen.
pub(super) fn sync_panel_draft(
    galaxy_config: Res<GalaxyConfig>,
    scene_fog: Res<SceneFog>,
    mut draft: ResMut<PanelDraft>,
) {
    if galaxy_config.is_changed() && draft.params != galaxy_config.params {
        draft.params = galaxy_config.params.clone();
    }
    if scene_fog.is_changed() && draft.fog != *scene_fog {
        draft.fog = *scene_fog;
    }
}

fn dispatch_panel_edits(
    mut edits: EventReader<PanelEdit>,
    bindings: Res<PanelBindings>,
    draft: Res<PanelDraft>,
    mut galaxy_config: ResMut<GalaxyConfig>,
    mut scene_fog: ResMut<SceneFog>,
    mut clear_color: ResMut<ClearColor>,
) {
    for edit in edits.read() {
        for action in bindings.actions(*edit) {
            match action {
                PanelAction::Regenerate => {
                    let params = draft.params.clamped();
                    if galaxy_config.params != params {
                        galaxy_config.params = params;
                    }
                }
                PanelAction::UpdateFog => {
                    scene_fog.set_if_neq(draft.fog);
                }
                PanelAction::UpdateBackground => {
                    clear_color.0 = draft.fog.color;
                }
            }
        }
    }
}
