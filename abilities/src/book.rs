use {
    crate::effects::AbilityStatus,
    ability_assets::{AbilityDefinition, AbilityEffect, AbilityId},
    bevy::{platform::collections::HashMap, prelude::*},
    bonus_stats::BonusStats,
    wallet::Wallet,
};

/// Callbacks run for every effect of an ability, in definition order.
pub trait EffectHooks {
    fn activate(&mut self, effect: &AbilityEffect);
    fn tick(&mut self, effect: &AbilityEffect, delta: f32);
    fn deactivate(&mut self, effect: &AbilityEffect);
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct ActiveAbility {
    pub id: AbilityId,
    /// Seconds of activity left
    pub remaining: f32,
}

/// Learned abilities of one entity, their cooldowns and the single active slot.
///
/// An ability moves from learned-ready to active on [`AbilityBook::activate`],
/// back out of the active slot when its duration runs out in
/// [`AbilityBook::tick`], and is ready again once its cooldown reaches zero.
/// The cooldown starts counting at activation, not at expiry.
#[derive(Component, Reflect, Debug, Default, Clone)]
#[reflect(Component, Default)]
#[require(AbilityStatus, BonusStats)]
pub struct AbilityBook {
    learned: HashMap<AbilityId, AbilityDefinition>,
    cooldowns: HashMap<AbilityId, f32>,
    active: Option<ActiveAbility>,
}

impl AbilityBook {
    pub fn is_learned(&self, id: AbilityId) -> bool {
        self.learned.contains_key(&id)
    }

    pub fn definition(&self, id: AbilityId) -> Option<&AbilityDefinition> {
        self.learned.get(&id)
    }

    pub fn learned_ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.learned.keys().copied()
    }

    pub fn active(&self) -> Option<ActiveAbility> {
        self.active
    }

    pub fn active_id(&self) -> Option<AbilityId> {
        self.active.map(|active| active.id)
    }

    pub fn is_active(&self, id: AbilityId) -> bool {
        self.active_id() == Some(id)
    }

    /// Zero for abilities that are ready or unknown.
    pub fn cooldown_remaining(&self, id: AbilityId) -> f32 {
        self.cooldowns.get(&id).copied().unwrap_or(0.0)
    }

    pub fn is_ready(&self, id: AbilityId) -> bool {
        self.is_learned(id) && self.cooldown_remaining(id) <= 0.0
    }

    /// Lowest ready id, so callers picking "any ready ability" stay deterministic.
    pub fn first_ready(&self) -> Option<AbilityId> {
        self.learned_ids().filter(|id| self.is_ready(*id)).min()
    }

    /// Pays for and learns `def`. Already known abilities are refused for free.
    pub fn learn(&mut self, def: &AbilityDefinition, wallet: &mut Wallet) -> bool {
        if self.is_learned(def.id) || !wallet.spend_balance(def.cost, false) {
            return false;
        }

        self.learned.insert(def.id, def.clone());
        self.cooldowns.insert(def.id, 0.0);
        true
    }

    /// Learns `def` without paying, e.g. for abilities known from round start.
    pub fn grant(&mut self, def: &AbilityDefinition) {
        self.learned.insert(def.id, def.clone());
        self.cooldowns.entry(def.id).or_insert(0.0);
    }

    /// Activates a ready ability, force-deactivating whatever held the slot.
    pub fn activate(&mut self, id: AbilityId, hooks: &mut impl EffectHooks) -> bool {
        if !self.is_ready(id) {
            return false;
        }
        let Some(def) = self.learned.get(&id) else {
            return false;
        };

        if let Some(previous) = self.active.take()
            && let Some(previous_def) = self.learned.get(&previous.id)
        {
            for effect in &previous_def.effects {
                hooks.deactivate(effect);
            }
        }

        self.active = Some(ActiveAbility {
            id,
            remaining: def.duration,
        });
        self.cooldowns.insert(id, def.cooldown);
        for effect in &def.effects {
            hooks.activate(effect);
        }

        debug_assert!(self.active_id() == Some(id));
        true
    }

    /// Ends the active ability if its duration is used up, running its
    /// deactivate hooks. Zero-duration abilities end here right after
    /// activation instead of lingering until the next tick.
    pub fn expire_elapsed(&mut self, hooks: &mut impl EffectHooks) -> Option<AbilityId> {
        let active = self.active.filter(|active| active.remaining <= 0.0)?;

        if let Some(def) = self.learned.get(&active.id) {
            for effect in &def.effects {
                hooks.deactivate(effect);
            }
        }
        self.active = None;
        Some(active.id)
    }

    /// Advances the active ability and every cooldown by `delta` seconds.
    /// Returns the ability whose duration ran out during this tick.
    pub fn tick(&mut self, delta: f32, hooks: &mut impl EffectHooks) -> Option<AbilityId> {
        if let Some(active) = self.active.as_mut() {
            if let Some(def) = self.learned.get(&active.id) {
                for effect in &def.effects {
                    hooks.tick(effect, delta);
                }
            }
            active.remaining -= delta;
        }

        let expired = self.expire_elapsed(hooks);

        for cooldown in self.cooldowns.values_mut() {
            debug_assert!(cooldown.is_finite());
            *cooldown = (*cooldown - delta).max(0.0);
        }

        expired
    }
}
