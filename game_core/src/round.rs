//! Turns the loaded [`RoundDefinition`] into entities.

use {
    abilities::AbilityBook,
    ability_assets::{AbilityDefinition, AbilityMap},
    bevy::prelude::*,
    combatant_components::{Combatant, Health},
    controllers::{BotBrain, Controller},
    round_assets::{ControllerSpec, ParticipantSpec, RoundDefinition, RoundHandle, StationSpec},
    sessions::Station,
    shared_components::{DisplayName, Facing, Hitbox},
    wallet::Wallet,
    weapon_assets::{WeaponDefinition, WeaponMap},
    weapons::{OwnedWeapons, WeaponSlot},
};

/// Marks everything spawned from the round file.
#[derive(Component, Default)]
pub struct RoundEntity;

pub fn controller_for(spec: ControllerSpec) -> Controller {
    match spec {
        ControllerSpec::Human => Controller::Human,
        ControllerSpec::Bot { reaction_chance } => Controller::Bot(BotBrain::new(reaction_chance)),
    }
}

pub fn spawn_round(
    mut commands: Commands,
    round: Res<RoundHandle>,
    rounds: Res<Assets<RoundDefinition>>,
    weapon_map: Res<WeaponMap>,
    weapons: Res<Assets<WeaponDefinition>>,
    ability_map: Res<AbilityMap>,
    abilities: Res<Assets<AbilityDefinition>>,
) {
    let Some(def) = rounds.get(&round.0) else {
        warn!("No round definition loaded, nothing to spawn");
        return;
    };

    for spec in &def.participants {
        let weapon = spec.weapon.as_deref().and_then(|id| {
            let def = weapon_map.resolve(id, &weapons);
            if def.is_none() {
                warn!(participant = %spec.name, weapon = id, "unknown weapon, spawning unarmed");
            }
            def
        });
        let known = spec
            .abilities
            .iter()
            .filter_map(|id| {
                let def = ability_map.resolve(*id, &abilities);
                if def.is_none() {
                    warn!(participant = %spec.name, ability = %id, "unknown ability skipped");
                }
                def
            })
            .collect::<Vec<_>>();

        let entity = spawn_participant(&mut commands, def, spec, weapon, &known);
        debug!(
            ?entity,
            name = %spec.name,
            role = ?spec.role,
            weapon = ?spec.weapon,
            "participant spawned"
        );
    }

    for station in &def.stations {
        spawn_station(&mut commands, station);
    }

    info!(
        participants = def.participants.len(),
        impostors = def.impostor_count(),
        stations = def.stations.len(),
        "round spawned"
    );
}

pub fn spawn_participant(
    commands: &mut Commands,
    round: &RoundDefinition,
    spec: &ParticipantSpec,
    weapon: Option<&WeaponDefinition>,
    abilities: &[&AbilityDefinition],
) -> Entity {
    let mut owned = OwnedWeapons::default();
    let mut slot = WeaponSlot::default();
    if let Some(weapon) = weapon {
        owned.grant(weapon.clone());
        slot.equip(weapon.clone());
    }

    let mut book = AbilityBook::default();
    for ability in abilities {
        book.grant(ability);
    }

    let (x, y) = spec.position;
    commands
        .spawn((
            Combatant,
            RoundEntity,
            Name::new(spec.name.clone()),
            DisplayName::from(spec.name.as_str()),
            spec.role,
            controller_for(spec.controller),
            Transform::from_xyz(x, y, 0.0),
            Facing::from_degrees(spec.facing_degrees),
            Hitbox {
                radius: round.hitbox_radius,
            },
            Health::new(round.max_health),
            Wallet::with_balance(round.starting_balance),
            (slot, owned, book),
        ))
        .id()
}

pub fn spawn_station(commands: &mut Commands, spec: &StationSpec) -> Entity {
    let (x, y) = spec.position;
    commands
        .spawn((
            RoundEntity,
            Name::new(spec.name.clone()),
            DisplayName::from(spec.name.as_str()),
            Station {
                kind: spec.kind,
                terms: spec.terms,
            },
            Transform::from_xyz(x, y, 0.0),
        ))
        .id()
}
