use {
    bevy::{platform::collections::HashMap, prelude::*},
    bevy_common_assets::ron::RonAssetPlugin,
    bonus_stats::StatMode,
    serde::{Deserialize, Serialize},
    std::fmt,
};

pub struct AbilityAssetsPlugin;

impl Plugin for AbilityAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<AbilityDefinition>::new(&["ability.ron"]))
            .init_resource::<AbilityMap>()
            .register_type::<AbilityDefinition>()
            .register_type::<AbilityId>()
            .register_type::<AbilityEffect>();
    }
}

/// Stable small integer naming an ability.
///
/// Cooldowns and the active slot are keyed by this id rather than by the
/// definition itself.
#[derive(
    Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AbilityId(pub u16);

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability#{}", self.0)
    }
}

/// Top-level ability definition loaded from `.ability.ron`.
#[derive(Asset, Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: AbilityId,
    /// Display name shown in UI
    pub display_name: String,
    /// Balance debited once when the ability is learned
    #[serde(default)]
    pub cost: i64,
    /// Seconds the ability stays active (0 = ends right after activating)
    #[serde(default)]
    pub duration: f32,
    /// Seconds before the ability can be activated again, counted from activation
    #[serde(default)]
    pub cooldown: f32,
    /// Ordered list of effects; hooks run in this order
    pub effects: Vec<AbilityEffect>,
}

/// Atomic ability effect. Each variant answers the same three hooks
/// (activate, tick, deactivate); variants without a use for a hook ignore it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
pub enum AbilityEffect {
    /// Stat bonus held for the whole active duration
    StatModifier {
        stat_key: String,
        value: f32,
        mode: StatMode,
    },
    /// Instant heal on activation
    Heal { amount: i32 },
    /// Continuous healing while active
    Regeneration { per_second: f32 },
    /// Blocks all incoming damage while active
    Shield,
}

/// Resource mapping ability IDs to asset handles.
#[derive(Resource, Default)]
pub struct AbilityMap {
    pub handles: HashMap<AbilityId, Handle<AbilityDefinition>>,
}

impl AbilityMap {
    pub fn resolve<'a>(
        &self,
        id: AbilityId,
        assets: &'a Assets<AbilityDefinition>,
    ) -> Option<&'a AbilityDefinition> {
        self.handles.get(&id).and_then(|handle| assets.get(handle))
    }
}
