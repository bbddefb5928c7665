//! Round-level log lines built from gameplay notifications.

use {
    ability_events::AbilityLearned,
    bevy::prelude::*,
    combat_events::{CombatantKilled, WeaponPurchased},
    session_events::SessionEnded,
    shared_components::DisplayName,
};

fn name_of(names: &Query<&DisplayName>, entity: Entity) -> String {
    names
        .get(entity)
        .map_or_else(|_| format!("{entity:?}"), |name| name.0.clone())
}

pub(crate) fn log_kill(trigger: On<CombatantKilled>, names: Query<&DisplayName>) {
    let event = trigger.event();
    match event.killer {
        Some(killer) => info!(
            "{} was killed by {}",
            name_of(&names, event.entity),
            name_of(&names, killer)
        ),
        None => info!("{} died", name_of(&names, event.entity)),
    }
}

pub(crate) fn log_purchase(trigger: On<WeaponPurchased>, names: Query<&DisplayName>) {
    let event = trigger.event();
    info!(
        "{} bought {} for {}",
        name_of(&names, event.buyer),
        event.weapon_id,
        event.price
    );
}

pub(crate) fn log_session_end(trigger: On<SessionEnded>, names: Query<&DisplayName>) {
    let event = trigger.event();
    debug!(
        player = %name_of(&names, event.player),
        station = %name_of(&names, event.station),
        reward = event.reward,
        "session finished"
    );
}

pub(crate) fn log_ability_learned(trigger: On<AbilityLearned>, names: Query<&DisplayName>) {
    let event = trigger.event();
    info!(
        "{} learned {} for {}",
        name_of(&names, event.learner),
        event.ability,
        event.cost
    );
}
