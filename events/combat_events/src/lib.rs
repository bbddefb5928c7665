use bevy::prelude::*;

pub struct CombatEventsPlugin;

impl Plugin for CombatEventsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AttackRequest>()
            .register_type::<DamageRequest>()
            .register_type::<PurchaseWeaponRequest>()
            .register_type::<EquipWeaponRequest>()
            .register_type::<AttackPerformed>()
            .register_type::<MeleeHit>()
            .register_type::<HitscanHit>()
            .register_type::<ProjectileLaunched>()
            .register_type::<ProjectileHit>()
            .register_type::<Detonated>()
            .register_type::<CombatantKilled>()
            .register_type::<WeaponPurchased>()
            .register_type::<WeaponEquipped>();
    }
}

// === Requests ===

/// Asks the attacker's equipped weapon to fire. Rejected silently when the
/// weapon is cooling down, empty, missing, or the attacker is locked.
#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct AttackRequest {
    pub attacker: Entity,
}

/// Damage to apply to `target`'s health. `source` is the attacker or the
/// owner of the projectile, when known.
#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct DamageRequest {
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: i32,
}

/// Buys a weapon from the shop, debiting the buyer's wallet.
#[derive(Event, Debug, Clone, Reflect)]
pub struct PurchaseWeaponRequest {
    pub buyer: Entity,
    pub weapon_id: String,
    /// Equip the weapon right after a successful purchase
    pub equip: bool,
}

/// Equips a weapon the entity already owns.
#[derive(Event, Debug, Clone, Reflect)]
pub struct EquipWeaponRequest {
    pub entity: Entity,
    pub weapon_id: String,
}

// === Notifications ===
//
// Fire-and-forget signals for the presentation layer (animation, audio, hit
// flashes). Resolution never depends on anyone observing them.

#[derive(Event, Debug, Clone, Reflect)]
pub struct AttackPerformed {
    pub attacker: Entity,
    pub weapon_id: String,
}

/// Represents a melee swing that connected with one or more targets.
#[derive(Event, Debug, Clone, Reflect)]
pub struct MeleeHit {
    pub attacker: Entity,
    /// Distinct targets struck by the arc, each damaged once
    pub targets: Vec<Entity>,
    pub damage: i32,
}

#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct HitscanHit {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: i32,
}

#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct ProjectileLaunched {
    pub owner: Entity,
    pub projectile: Entity,
}

#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub target: Entity,
    pub damage: i32,
}

#[derive(Event, Debug, Clone, Reflect)]
pub struct Detonated {
    pub projectile: Entity,
    pub position: Vec2,
    pub targets: Vec<Entity>,
}

#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct CombatantKilled {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

#[derive(Event, Debug, Clone, Reflect)]
pub struct WeaponPurchased {
    pub buyer: Entity,
    pub weapon_id: String,
    pub price: i64,
}

#[derive(Event, Debug, Clone, Reflect)]
pub struct WeaponEquipped {
    pub entity: Entity,
    pub weapon_id: String,
}
