pub mod book;
pub mod effects;
pub mod systems;

#[cfg(test)]
mod tests;

pub use {
    book::{AbilityBook, ActiveAbility, EffectHooks},
    effects::{AbilityStatus, EffectTarget},
};
use {
    ability_assets::AbilityAssetsPlugin, ability_events::AbilityEventsPlugin, bevy::prelude::*,
    system_schedule::GameSchedule,
};

pub struct AbilitiesPlugin;

impl Plugin for AbilitiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((AbilityAssetsPlugin, AbilityEventsPlugin))
            .register_type::<AbilityBook>()
            .register_type::<AbilityStatus>()
            .add_systems(
                Update,
                systems::tick_abilities.in_set(GameSchedule::FrameStart),
            )
            .add_observer(systems::learn_ability)
            .add_observer(systems::activate_ability);
    }
}
