//! Who drives a combatant. Humans and bots share one entity layout and talk
//! to combat only through [`AttackRequest`](combat_events::AttackRequest) and
//! [`ActivateAbilityRequest`](ability_events::ActivateAbilityRequest).

pub mod bots;

#[cfg(test)]
mod tests;

use {bevy::prelude::*, system_schedule::GameSchedule};

pub struct ControllersPlugin;

impl Plugin for ControllersPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Controller>()
            .register_type::<BotBrain>()
            .add_systems(Update, bots::drive_bots.in_set(GameSchedule::ResolveIntent));
    }
}

#[derive(Component, Reflect, Debug, Default, Clone, PartialEq)]
#[reflect(Component, Default)]
pub enum Controller {
    /// Driven by the input layer
    #[default]
    Human,
    Bot(BotBrain),
}

#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct BotBrain {
    /// Probability in `[0, 1]` of acting on a target in a given frame
    pub reaction_chance: f64,
    /// Target picked on the last frame the bot acted
    pub target: Option<Entity>,
}

impl BotBrain {
    pub fn new(reaction_chance: f64) -> Self {
        Self {
            reaction_chance: sanitize_chance(reaction_chance),
            target: None,
        }
    }

    /// Chance usable as a probability; NaN never acts.
    pub fn chance(&self) -> f64 {
        sanitize_chance(self.reaction_chance)
    }
}

fn sanitize_chance(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

