use {
    crate::Controller,
    abilities::AbilityBook,
    ability_events::ActivateAbilityRequest,
    bevy::prelude::*,
    combat_events::AttackRequest,
    combatant_components::{Combatant, Dead},
    rand::Rng,
    shared_components::{Facing, Role},
    weapons::WeaponSlot,
};

/// Someone a bot could go after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec2,
    pub role: Role,
}

/// Closest candidate of another role within `range`, never `me`.
pub fn pick_target(
    me: Entity,
    position: Vec2,
    role: Role,
    range: f32,
    candidates: &[Candidate],
) -> Option<Candidate> {
    candidates
        .iter()
        .filter(|c| c.entity != me && c.role != role)
        .filter(|c| c.position.distance(position) <= range)
        .min_by(|a, b| {
            a.position
                .distance_squared(position)
                .total_cmp(&b.position.distance_squared(position))
        })
        .copied()
}

/// Turns bots towards the nearest opponent in weapon range and fires.
/// A bot that acts also opens with its first ready ability.
pub fn drive_bots(
    mut commands: Commands,
    mut bots: Query<
        (
            Entity,
            &mut Controller,
            &Transform,
            &mut Facing,
            &Role,
            &WeaponSlot,
            Option<&AbilityBook>,
        ),
        Without<Dead>,
    >,
    candidates: Query<(Entity, &Transform, &Role), (With<Combatant>, Without<Dead>)>,
) {
    let candidates: Vec<Candidate> = candidates
        .iter()
        .map(|(entity, transform, role)| Candidate {
            entity,
            position: transform.translation.truncate(),
            role: *role,
        })
        .collect();
    let mut rng = rand::rng();

    for (entity, mut controller, transform, mut facing, role, slot, book) in &mut bots {
        let Controller::Bot(brain) = controller.as_mut() else {
            continue;
        };
        let Some(weapon) = slot.weapon() else {
            continue;
        };

        let position = transform.translation.truncate();
        let Some(target) = pick_target(entity, position, *role, weapon.range, &candidates) else {
            brain.target = None;
            continue;
        };

        if !rng.random_bool(brain.chance()) {
            continue;
        }

        if brain.target != Some(target.entity) {
            debug!(bot = ?entity, victim = ?target.entity, "Bot picked a target");
        }
        brain.target = Some(target.entity);
        facing.look_along(target.position - position);

        if let Some(ability) = book.and_then(AbilityBook::first_ready) {
            commands.trigger(ActivateAbilityRequest {
                caster: entity,
                ability,
            });
        }
        commands.trigger(AttackRequest { attacker: entity });
    }
}
