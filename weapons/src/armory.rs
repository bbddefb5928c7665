use {
    crate::engine::WeaponSlot,
    bevy::{platform::collections::HashMap, prelude::*},
    combat_events::{EquipWeaponRequest, PurchaseWeaponRequest, WeaponEquipped, WeaponPurchased},
    wallet::Wallet,
    weapon_assets::{WeaponDefinition, WeaponMap},
};

/// Weapons an entity has bought or was handed at round start.
#[derive(Component, Reflect, Debug, Default, Clone)]
#[reflect(Component, Default)]
pub struct OwnedWeapons {
    weapons: HashMap<String, WeaponDefinition>,
}

impl OwnedWeapons {
    pub fn owns(&self, id: &str) -> bool {
        self.weapons.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&WeaponDefinition> {
        self.weapons.get(id)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Adds a weapon for free.
    pub fn grant(&mut self, def: WeaponDefinition) {
        self.weapons.insert(def.id.clone(), def);
    }

    /// Buys `def` with the wallet. Owning it already is a refusal, not a charge.
    pub fn purchase(&mut self, def: &WeaponDefinition, wallet: &mut Wallet) -> bool {
        if self.owns(&def.id) || !wallet.spend_balance(def.price, false) {
            return false;
        }

        self.grant(def.clone());
        true
    }
}

pub fn purchase_weapon(
    trigger: On<PurchaseWeaponRequest>,
    mut commands: Commands,
    weapon_map: Res<WeaponMap>,
    weapons: Res<Assets<WeaponDefinition>>,
    mut buyers: Query<(&mut Wallet, &mut OwnedWeapons, &mut WeaponSlot)>,
) {
    let request = trigger.event();
    let Some(def) = weapon_map.resolve(&request.weapon_id, &weapons) else {
        warn!("Unknown weapon '{}' requested in shop", request.weapon_id);
        return;
    };

    let Ok((mut wallet, mut owned, mut slot)) = buyers.get_mut(request.buyer) else {
        warn!(buyer = ?request.buyer, "Purchase ignored: buyer cannot hold weapons");
        return;
    };

    if !owned.purchase(def, &mut wallet) {
        debug!(
            buyer = ?request.buyer,
            weapon = %def.id,
            price = def.price,
            balance = wallet.balance(),
            already_owned = owned.owns(&def.id),
            "Purchase rejected"
        );
        return;
    }

    debug!(buyer = ?request.buyer, weapon = %def.id, price = def.price, "Weapon purchased");
    commands.trigger(WeaponPurchased {
        buyer: request.buyer,
        weapon_id: def.id.clone(),
        price: def.price,
    });

    if request.equip {
        slot.equip(def.clone());
        commands.trigger(WeaponEquipped {
            entity: request.buyer,
            weapon_id: def.id.clone(),
        });
    }
}

pub fn equip_weapon(
    trigger: On<EquipWeaponRequest>,
    mut commands: Commands,
    mut holders: Query<(&OwnedWeapons, &mut WeaponSlot)>,
) {
    let request = trigger.event();
    let Ok((owned, mut slot)) = holders.get_mut(request.entity) else {
        warn!(entity = ?request.entity, "Equip ignored: entity cannot hold weapons");
        return;
    };

    let Some(def) = owned.get(&request.weapon_id) else {
        debug!(entity = ?request.entity, weapon = %request.weapon_id, "Equip rejected: weapon not owned");
        return;
    };

    slot.equip(def.clone());
    debug!(entity = ?request.entity, weapon = %def.id, "Weapon equipped");
    commands.trigger(WeaponEquipped {
        entity: request.entity,
        weapon_id: def.id.clone(),
    });
}
