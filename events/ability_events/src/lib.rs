use {ability_assets::AbilityId, bevy::prelude::*};

pub struct AbilityEventsPlugin;

impl Plugin for AbilityEventsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LearnAbilityRequest>()
            .register_type::<ActivateAbilityRequest>()
            .register_type::<AbilityLearned>()
            .register_type::<AbilityActivated>()
            .register_type::<AbilityDeactivated>()
            .register_type::<DeactivationReason>();
    }
}

/// Request to learn an ability, paid from the learner's wallet
#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct LearnAbilityRequest {
    pub learner: Entity,
    pub ability: AbilityId,
}

/// Request to activate a learned ability
#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct ActivateAbilityRequest {
    pub caster: Entity,
    pub ability: AbilityId,
}

#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct AbilityLearned {
    pub learner: Entity,
    pub ability: AbilityId,
    pub cost: i64,
}

/// Emitted after the activate hooks ran (for VFX/Audio hooks)
#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct AbilityActivated {
    pub caster: Entity,
    pub ability: AbilityId,
}

/// Emitted after the deactivate hooks ran
#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct AbilityDeactivated {
    pub caster: Entity,
    pub ability: AbilityId,
    pub reason: DeactivationReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DeactivationReason {
    /// Duration ran out
    Expired,
    /// Another ability took the active slot
    Replaced,
}
