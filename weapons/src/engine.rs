use {crate::armory::OwnedWeapons, bevy::prelude::*, weapon_assets::WeaponDefinition};

/// Weapon currently in hand, with its cooldown and ammo state.
///
/// Timestamps are seconds of elapsed game time (`Time::elapsed_secs`), passed
/// in by the caller so the slot can be driven with synthetic clocks.
#[derive(Component, Reflect, Debug, Default, Clone)]
#[reflect(Component, Default)]
#[require(OwnedWeapons)]
pub struct WeaponSlot {
    weapon: Option<WeaponDefinition>,
    last_attack_at: Option<f32>,
    ammo: u32,
}

impl WeaponSlot {
    pub fn equipped(def: WeaponDefinition) -> Self {
        let mut slot = Self::default();
        slot.equip(def);
        slot
    }

    /// Replaces the weapon, refills ammo and makes it usable right away.
    pub fn equip(&mut self, def: WeaponDefinition) {
        debug_assert!(def.defect().is_none(), "equipping {}: {:?}", def.id, def.defect());
        self.ammo = def.starting_ammo();
        self.last_attack_at = None;
        self.weapon = Some(def);
    }

    pub fn unequip(&mut self) {
        *self = Self::default();
    }

    pub fn weapon(&self) -> Option<&WeaponDefinition> {
        self.weapon.as_ref()
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    /// Seconds left until the weapon may fire again; zero when ready or unequipped.
    pub fn cooldown_remaining(&self, now: f32) -> f32 {
        match (&self.weapon, self.last_attack_at) {
            (Some(def), Some(last)) => (def.cooldown - (now - last)).max(0.0),
            _ => 0.0,
        }
    }

    /// Pure readiness check. `locked` is the owner's session lock.
    pub fn can_attack(&self, now: f32, locked: bool) -> bool {
        let Some(def) = &self.weapon else {
            return false;
        };

        if locked || (def.uses_ammo && self.ammo == 0) {
            return false;
        }

        self.last_attack_at
            .is_none_or(|last| now - last >= def.cooldown)
    }

    /// Commits an attack: stamps the cooldown and spends one round.
    /// Returns the weapon to resolve, or `None` when the attack is refused.
    pub fn begin_attack(&mut self, now: f32, locked: bool) -> Option<&WeaponDefinition> {
        if !self.can_attack(now, locked) {
            return None;
        }

        let def = self.weapon.as_ref()?;
        self.last_attack_at = Some(now);
        if def.uses_ammo {
            debug_assert!(self.ammo > 0, "attack committed with an empty magazine");
            self.ammo -= 1;
        }

        Some(def)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, weapon_assets::WeaponKind};

    fn revolver(max_ammo: u32) -> WeaponDefinition {
        WeaponDefinition {
            id: "revolver".to_string(),
            display_name: "Revolver".to_string(),
            price: 80,
            kind: WeaponKind::Ranged,
            damage: 40,
            cooldown: 0.8,
            range: 420.0,
            uses_ammo: true,
            max_ammo,
            projectile_speed: 0.0,
            projectile: None,
        }
    }

    #[test]
    fn test_unequipped_cannot_attack() {
        let mut slot = WeaponSlot::default();
        assert!(!slot.can_attack(10.0, false));
        assert!(slot.begin_attack(10.0, false).is_none());
        assert_eq!(slot.cooldown_remaining(10.0), 0.0);
    }

    #[test]
    fn test_equip_is_immediately_ready() {
        let slot = WeaponSlot::equipped(revolver(6));
        assert_eq!(slot.ammo(), 6);
        assert!(slot.can_attack(0.0, false));
    }

    #[test]
    fn test_cooldown_window() {
        let mut slot = WeaponSlot::equipped(revolver(6));
        assert!(slot.begin_attack(1.0, false).is_some());

        assert!(!slot.can_attack(1.5, false));
        assert!((slot.cooldown_remaining(1.5) - 0.3).abs() < 1e-5);

        assert!(slot.can_attack(1.8, false));
        assert_eq!(slot.cooldown_remaining(5.0), 0.0);
    }

    #[test]
    fn test_ammo_decrements_once_per_attack() {
        let mut slot = WeaponSlot::equipped(revolver(2));
        assert!(slot.begin_attack(0.0, false).is_some());
        assert_eq!(slot.ammo(), 1);

        // Refused attack does not spend ammo
        assert!(slot.begin_attack(0.1, false).is_none());
        assert_eq!(slot.ammo(), 1);

        assert!(slot.begin_attack(1.0, false).is_some());
        assert_eq!(slot.ammo(), 0);
    }

    #[test]
    fn test_empty_magazine_blocks_regardless_of_cooldown() {
        let mut slot = WeaponSlot::equipped(revolver(1));
        assert!(slot.begin_attack(0.0, false).is_some());

        assert!(!slot.can_attack(100.0, false));
        assert_eq!(slot.cooldown_remaining(100.0), 0.0);
    }

    #[test]
    fn test_session_lock_blocks_attack() {
        let mut slot = WeaponSlot::equipped(revolver(6));
        assert!(!slot.can_attack(0.0, true));
        assert!(slot.begin_attack(0.0, true).is_none());
        assert_eq!(slot.ammo(), 6);
    }

    #[test]
    fn test_reequip_resets_state() {
        let mut slot = WeaponSlot::equipped(revolver(1));
        assert!(slot.begin_attack(0.0, false).is_some());

        slot.equip(revolver(3));
        assert_eq!(slot.ammo(), 3);
        assert!(slot.can_attack(0.1, false));
    }

    #[test]
    fn test_melee_weapon_ignores_ammo() {
        let knife = WeaponDefinition {
            id: "knife".to_string(),
            display_name: "Knife".to_string(),
            price: 0,
            kind: WeaponKind::Melee {
                arc_degrees: 60.0,
                ray_count: 3,
            },
            damage: 35,
            cooldown: 0.5,
            range: 40.0,
            uses_ammo: false,
            max_ammo: 0,
            projectile_speed: 0.0,
            projectile: None,
        };
        let mut slot = WeaponSlot::equipped(knife);
        assert_eq!(slot.ammo(), 0);
        assert!(slot.begin_attack(0.0, false).is_some());
        assert!(slot.begin_attack(0.5, false).is_some());
    }
}
