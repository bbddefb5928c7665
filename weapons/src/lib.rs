//! Weapon resolution: equipping, cooldown and ammo bookkeeping, and turning an
//! [`AttackRequest`](combat_events::AttackRequest) into damage.

pub mod armory;
pub mod engine;
pub mod geometry;
pub mod projectiles;
pub mod systems;


pub use {armory::OwnedWeapons, engine::WeaponSlot};
use {
    bevy::prelude::*, combat_events::CombatEventsPlugin, system_schedule::GameSchedule,
    weapon_assets::WeaponAssetsPlugin,
};

pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((WeaponAssetsPlugin, CombatEventsPlugin))
            .register_type::<WeaponSlot>()
            .register_type::<OwnedWeapons>()
            .add_observer(systems::perform_attack)
            .add_observer(systems::apply_damage)
            .add_observer(armory::purchase_weapon)
            .add_observer(armory::equip_weapon)
            .add_systems(
                Update,
                projectiles::advance_projectiles.in_set(GameSchedule::PerformAction),
            );
    }
}
