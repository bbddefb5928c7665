use {
    crate::{
        book::AbilityBook,
        effects::{AbilityStatus, EffectTarget},
    },
    ability_assets::{AbilityDefinition, AbilityMap},
    ability_events::{
        AbilityActivated, AbilityDeactivated, AbilityLearned, ActivateAbilityRequest,
        DeactivationReason, LearnAbilityRequest,
    },
    bevy::prelude::*,
    bonus_stats::BonusStats,
    combatant_components::{Dead, Health},
    wallet::Wallet,
};

/// Advances every ability book by the frame delta. Expired abilities have
/// their deactivate hooks run and are announced with [`AbilityDeactivated`].
pub fn tick_abilities(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(
        Entity,
        &mut AbilityBook,
        &mut AbilityStatus,
        &mut BonusStats,
        Option<&mut Health>,
        Has<Dead>,
    )>,
) {
    let delta = time.delta_secs();

    for (entity, mut book, mut status, mut bonuses, health, dead) in &mut query {
        let mut target = EffectTarget {
            health: health.filter(|_| !dead).map(Mut::into_inner),
            bonuses: &mut bonuses,
            status: &mut status,
        };

        if let Some(ability) = book.tick(delta, &mut target) {
            debug!(?entity, %ability, "Ability expired");
            commands.trigger(AbilityDeactivated {
                caster: entity,
                ability,
                reason: DeactivationReason::Expired,
            });
        }
    }
}

pub fn learn_ability(
    trigger: On<LearnAbilityRequest>,
    mut commands: Commands,
    ability_map: Res<AbilityMap>,
    abilities: Res<Assets<AbilityDefinition>>,
    mut learners: Query<(&mut AbilityBook, &mut Wallet)>,
) {
    let request = trigger.event();
    let Some(def) = ability_map.resolve(request.ability, &abilities) else {
        warn!("Unknown ability {} requested", request.ability);
        return;
    };

    let Ok((mut book, mut wallet)) = learners.get_mut(request.learner) else {
        warn!(learner = ?request.learner, "Learn ignored: entity has no ability book");
        return;
    };

    if !book.learn(def, &mut wallet) {
        debug!(
            learner = ?request.learner,
            ability = %def.id,
            cost = def.cost,
            balance = wallet.balance(),
            "Learn rejected"
        );
        return;
    }

    debug!(learner = ?request.learner, ability = %def.id, cost = def.cost, "Ability learned");
    commands.trigger(AbilityLearned {
        learner: request.learner,
        ability: def.id,
        cost: def.cost,
    });
}

pub fn activate_ability(
    trigger: On<ActivateAbilityRequest>,
    mut commands: Commands,
    mut casters: Query<
        (
            &mut AbilityBook,
            &mut AbilityStatus,
            &mut BonusStats,
            Option<&mut Health>,
        ),
        Without<Dead>,
    >,
) {
    let request = trigger.event();
    let Ok((mut book, mut status, mut bonuses, health)) = casters.get_mut(request.caster) else {
        debug!(caster = ?request.caster, "Activation ignored: no ability book or caster is dead");
        return;
    };

    let replaced = book.active_id();
    let mut target = EffectTarget {
        health: health.map(Mut::into_inner),
        bonuses: &mut bonuses,
        status: &mut status,
    };

    if !book.activate(request.ability, &mut target) {
        trace!(
            caster = ?request.caster,
            ability = %request.ability,
            learned = book.is_learned(request.ability),
            cooldown = book.cooldown_remaining(request.ability),
            "Activation rejected"
        );
        return;
    }

    if let Some(previous) = replaced {
        commands.trigger(AbilityDeactivated {
            caster: request.caster,
            ability: previous,
            reason: DeactivationReason::Replaced,
        });
    }

    debug!(caster = ?request.caster, ability = %request.ability, "Ability activated");
    commands.trigger(AbilityActivated {
        caster: request.caster,
        ability: request.ability,
    });

    if let Some(ability) = book.expire_elapsed(&mut target) {
        debug!(caster = ?request.caster, %ability, "Instant ability finished");
        commands.trigger(AbilityDeactivated {
            caster: request.caster,
            ability,
            reason: DeactivationReason::Expired,
        });
    }
}
