use {
    bevy::prelude::*,
    bonus_stats::BonusStats,
    shared_components::{Facing, Hitbox, MovementLock, Role},
    wallet::Wallet,
};

pub struct CombatantComponentsPlugin;

impl Plugin for CombatantComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Combatant>()
            .register_type::<Health>()
            .register_type::<Dead>()
            .register_type::<Projectile>()
            .register_type::<ProjectileLifetime>()
            .register_type::<Explosive>();
    }
}

/// Marker for players and bots taking part in the round.
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
#[require(Health, Wallet, Role, Facing, Hitbox, MovementLock, BonusStats)]
pub struct Combatant;

/// Added once health reaches zero. Dead entities neither act nor get targeted.
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct Dead;

/// Damage sink shared by everything that can be hurt.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Removes `amount` hit points, clamping at zero. Negative amounts are ignored.
    pub fn take_damage(&mut self, amount: i32) {
        self.current = (self.current - amount.max(0)).max(0);
    }

    /// Restores up to `amount` hit points without exceeding `max`.
    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount.max(0)).min(self.max);
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}

/// Free-flying shot spawned by a ranged weapon with a projectile template.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct Projectile {
    pub owner: Entity,
    pub damage: i32,
    pub velocity: Vec2,
    pub radius: f32,
}

/// Despawns a projectile once it has travelled its weapon range.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct ProjectileLifetime(pub Timer);

/// Turns a projectile into a grenade that damages everything in a radius.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct Explosive {
    pub fuse: Timer,
    pub blast_radius: f32,
    pub detonate_on_contact: bool,
}
