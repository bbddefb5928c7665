use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
};

/// Well-known stat keys read by the combat core.
pub mod keys {
    /// Scales outgoing weapon damage of the attacker.
    pub const DAMAGE_DEALT: &str = "damage_dealt";
    /// Scales incoming damage of the target.
    pub const DAMAGE_TAKEN: &str = "damage_taken";
    /// Read by the external movement layer.
    pub const MOVE_SPEED: &str = "move_speed";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect)]
pub enum StatMode {
    #[default]
    Additive, // +10
    Percent,        // +10% (0.10)
    Multiplicative, // x2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Reflect)]
pub struct StatBonus {
    pub value: f32,
    pub mode: StatMode,
}

/// Aggregated bonuses for a specific key (e.g., "damage_dealt").
#[derive(Debug, Clone, Serialize, Deserialize, Reflect)]
pub struct BonusStat {
    pub additive: f32,
    pub percent: f32,        // Sum of percentages (e.g., 0.1 + 0.2 = 0.3)
    pub multiplicative: f32, // Product of non-zero multipliers (starts at 1.0)
    /// Number of `x0.0` multipliers currently held. Kept apart from the
    /// product so removing one restores the stat.
    #[serde(default)]
    pub zero_factors: u32,
}

impl Default for BonusStat {
    fn default() -> Self {
        Self {
            additive: 0.0,
            percent: 0.0,
            multiplicative: 1.0,
            zero_factors: 0,
        }
    }
}

impl BonusStat {
    pub fn add(&mut self, bonus: &StatBonus) {
        match bonus.mode {
            StatMode::Additive => self.additive += bonus.value,
            StatMode::Percent => self.percent += bonus.value,
            StatMode::Multiplicative if bonus.value == 0.0 => self.zero_factors += 1,
            StatMode::Multiplicative => self.multiplicative *= bonus.value,
        }
    }

    pub fn remove(&mut self, bonus: &StatBonus) {
        match bonus.mode {
            StatMode::Additive => self.additive -= bonus.value,
            StatMode::Percent => self.percent -= bonus.value,
            StatMode::Multiplicative if bonus.value == 0.0 => {
                debug_assert!(self.zero_factors > 0, "removing a zero multiplier never added");
                self.zero_factors = self.zero_factors.saturating_sub(1);
            }
            StatMode::Multiplicative => self.multiplicative /= bonus.value,
        }
    }

    /// `(base + additive) * (1 + percent) * multiplicative`, never below zero.
    pub fn apply(&self, base: f32) -> f32 {
        if self.zero_factors > 0 {
            return 0.0;
        }
        ((base + self.additive) * (1.0 + self.percent) * self.multiplicative).max(0.0)
    }
}

/// Temporary stat bonuses carried by a single entity.
///
/// Ability effects add a bonus when they activate and remove the same bonus
/// when they deactivate, so a balanced add/remove pair leaves the stat where
/// it started.
#[derive(Component, Reflect, Default, Debug, Clone)]
#[reflect(Component, Default)]
pub struct BonusStats {
    bonuses: HashMap<String, BonusStat>,
}

impl BonusStats {
    pub fn clear(&mut self) {
        self.bonuses.clear();
    }

    pub fn add(&mut self, key: &str, bonus: StatBonus) {
        self.bonuses.entry(key.to_string()).or_default().add(&bonus);
    }

    pub fn remove(&mut self, key: &str, bonus: StatBonus) {
        if let Some(stat) = self.bonuses.get_mut(key) {
            stat.remove(&bonus);
        }
    }

    pub fn get(&self, key: &str) -> Option<&BonusStat> {
        self.bonuses.get(key)
    }

    /// Applies the bonuses stored under `key` to `base`; unknown keys pass through.
    pub fn apply(&self, key: &str, base: f32) -> f32 {
        self.get(key).map_or(base, |stat| stat.apply(base))
    }

    /// Integer variant of [`BonusStats::apply`] used for damage amounts.
    pub fn apply_int(&self, key: &str, base: i32) -> i32 {
        match self.get(key) {
            Some(stat) => stat.apply(base as f32).round() as i32,
            None => base,
        }
    }
}

pub struct BonusStatsPlugin;

impl Plugin for BonusStatsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BonusStats>()
            .register_type::<StatBonus>()
            .register_type::<StatMode>();
    }
}
