//! Weapon asset definitions.
//!
//! Weapons are authored as `.weapon.ron` files and never mutated at runtime.
//! Entities copy the definition they equip, so a loaded definition can be
//! shared freely.

use {
    bevy::{platform::collections::HashMap, prelude::*},
    bevy_common_assets::ron::RonAssetPlugin,
    serde::{Deserialize, Serialize},
};

pub struct WeaponAssetsPlugin;

impl Plugin for WeaponAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<WeaponDefinition>::new(&["weapon.ron"]))
            .init_resource::<WeaponMap>()
            .register_type::<WeaponDefinition>()
            .register_type::<WeaponKind>()
            .register_type::<ProjectileTemplate>()
            .register_type::<ProjectileBehavior>();
    }
}

/// Weapon definition loaded from `.weapon.ron` asset files.
#[derive(Asset, Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDefinition {
    /// Unique identifier for the weapon (e.g., "kitchen_knife")
    pub id: String,
    /// Display name shown in the shop
    pub display_name: String,
    /// Shop price
    #[serde(default)]
    pub price: i64,
    /// Melee or ranged, with kind-specific attributes
    pub kind: WeaponKind,
    /// Damage applied to each target hit
    pub damage: i32,
    /// Seconds between two attacks
    pub cooldown: f32,
    /// Reach of melee rays, hitscan rays and bullets
    pub range: f32,
    #[serde(default)]
    pub uses_ammo: bool,
    #[serde(default)]
    pub max_ammo: u32,
    /// Units per second for projectile weapons
    #[serde(default)]
    pub projectile_speed: f32,
    /// Ranged weapons without a template resolve as hitscan
    #[serde(default)]
    pub projectile: Option<ProjectileTemplate>,
}

impl WeaponDefinition {
    /// Ammo a freshly equipped copy of this weapon starts with.
    pub fn starting_ammo(&self) -> u32 {
        if self.uses_ammo { self.max_ammo } else { 0 }
    }

    pub fn is_melee(&self) -> bool {
        matches!(self.kind, WeaponKind::Melee { .. })
    }

    /// Reason this definition cannot be equipped, if any.
    pub fn defect(&self) -> Option<&'static str> {
        if let WeaponKind::Melee { ray_count: 0, .. } = self.kind {
            return Some("melee weapon needs at least one ray");
        }
        if self.cooldown.is_nan() || self.cooldown < 0.0 {
            return Some("cooldown must be zero or positive");
        }
        if self.range.is_nan() || self.range <= 0.0 {
            return Some("range must be positive");
        }
        None
    }
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Fan of `ray_count` rays spread evenly over `arc_degrees`.
    Melee { arc_degrees: f32, ray_count: u32 },
    Ranged,
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileTemplate {
    /// Contact radius of the projectile body
    pub radius: f32,
    #[serde(default)]
    pub behavior: ProjectileBehavior,
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ProjectileBehavior {
    /// Damages the first damageable non-owner it touches.
    #[default]
    Bullet,
    /// Explodes after `fuse` seconds, or on first contact when
    /// `detonate_on_contact` is set, damaging everything within `blast_radius`.
    Grenade {
        fuse: f32,
        blast_radius: f32,
        #[serde(default)]
        detonate_on_contact: bool,
    },
}

/// Resource mapping weapon IDs to their asset handles.
/// Populated during asset loading phase.
#[derive(Resource, Default)]
pub struct WeaponMap {
    pub handles: HashMap<String, Handle<WeaponDefinition>>,
}

impl WeaponMap {
    /// Resolves a weapon id to its loaded definition.
    pub fn resolve<'a>(
        &self,
        id: &str,
        assets: &'a Assets<WeaponDefinition>,
    ) -> Option<&'a WeaponDefinition> {
        self.handles.get(id).and_then(|handle| assets.get(handle))
    }
}
