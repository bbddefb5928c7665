use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

pub struct SharedComponentsPlugin;

impl Plugin for SharedComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<DisplayName>()
            .register_type::<Facing>()
            .register_type::<Hitbox>()
            .register_type::<MovementLock>()
            .register_type::<Role>();
    }
}

#[derive(Component, Reflect, Default, Debug, Clone, PartialEq, Deref, DerefMut)]
#[reflect(Component, Default)]
pub struct DisplayName(pub String);

impl From<&str> for DisplayName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DisplayName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Direction the entity is looking at. Melee fans and shots are centered on it.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Deref)]
#[reflect(Component, Default)]
pub struct Facing(pub Dir2);

impl Default for Facing {
    fn default() -> Self {
        Self(Dir2::X)
    }
}

impl Facing {
    /// Builds a facing from an angle in degrees, counter-clockwise from east.
    pub fn from_degrees(degrees: f32) -> Self {
        Self(Rot2::degrees(degrees) * Dir2::X)
    }

    /// Turns towards `delta`. A zero vector keeps the current facing.
    pub fn look_along(&mut self, delta: Vec2) {
        if let Ok(dir) = Dir2::new(delta) {
            self.0 = dir;
        }
    }
}

/// Circular collider used by ray casts and projectile contacts.
///
/// Anything with a hitbox blocks rays; only entities that also carry a
/// damage sink receive damage.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct Hitbox {
    pub radius: f32,
}

impl Default for Hitbox {
    fn default() -> Self {
        Self { radius: 16.0 }
    }
}

/// Set while an interaction session holds the entity in place.
/// The input/movement layer reads it to suppress input; combat reads it to
/// refuse attacks.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct MovementLock(pub bool);

impl MovementLock {
    pub fn is_locked(&self) -> bool {
        self.0
    }
}

#[derive(
    Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[reflect(Component, Default)]
pub enum Role {
    #[default]
    Crewmate,
    Impostor,
}
