use {
    crate::book::EffectHooks,
    ability_assets::AbilityEffect,
    bevy::prelude::*,
    bonus_stats::{BonusStats, StatBonus, StatMode, keys},
    combatant_components::Health,
};

/// Cancels all incoming damage while held.
pub const SHIELD_BONUS: StatBonus = StatBonus {
    value: -1.0,
    mode: StatMode::Percent,
};

/// Per-entity scratch state for effects that accumulate across ticks.
#[derive(Component, Reflect, Default, Debug, Clone, PartialEq)]
#[reflect(Component, Default)]
pub struct AbilityStatus {
    /// Healing earned by regeneration that has not yet added up to a whole point
    pub regen_carry: f32,
}

/// Applies ability effects to the components of one entity.
///
/// `health` is `None` for entities that cannot be healed, including dead ones.
pub struct EffectTarget<'a> {
    pub health: Option<&'a mut Health>,
    pub bonuses: &'a mut BonusStats,
    pub status: &'a mut AbilityStatus,
}

impl EffectHooks for EffectTarget<'_> {
    fn activate(&mut self, effect: &AbilityEffect) {
        match effect {
            AbilityEffect::StatModifier {
                stat_key,
                value,
                mode,
            } => self.bonuses.add(
                stat_key,
                StatBonus {
                    value: *value,
                    mode: *mode,
                },
            ),
            AbilityEffect::Heal { amount } => {
                if let Some(health) = self.health.as_deref_mut() {
                    health.heal(*amount);
                }
            }
            AbilityEffect::Regeneration { .. } => {}
            AbilityEffect::Shield => self.bonuses.add(keys::DAMAGE_TAKEN, SHIELD_BONUS),
        }
    }

    fn tick(&mut self, effect: &AbilityEffect, delta: f32) {
        let AbilityEffect::Regeneration { per_second } = effect else {
            return;
        };

        self.status.regen_carry += per_second * delta;
        let whole = self.status.regen_carry.floor();
        if whole < 1.0 {
            return;
        }

        self.status.regen_carry -= whole;
        if let Some(health) = self.health.as_deref_mut() {
            health.heal(whole as i32);
        }
    }

    fn deactivate(&mut self, effect: &AbilityEffect) {
        match effect {
            AbilityEffect::StatModifier {
                stat_key,
                value,
                mode,
            } => self.bonuses.remove(
                stat_key,
                StatBonus {
                    value: *value,
                    mode: *mode,
                },
            ),
            AbilityEffect::Heal { .. } => {}
            AbilityEffect::Regeneration { .. } => self.status.regen_carry = 0.0,
            AbilityEffect::Shield => self.bonuses.remove(keys::DAMAGE_TAKEN, SHIELD_BONUS),
        }
    }
}
