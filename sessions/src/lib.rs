//! Interaction sessions at shop counters and minigame tables.
//!
//! While a session runs, the player is held in place through [`MovementLock`],
//! which also keeps their weapon from firing.
//!
//! [`MovementLock`]: shared_components::MovementLock

pub mod lifecycle;
pub mod systems;


pub use lifecycle::{SessionLifecycle, SessionTerms};
use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    session_events::SessionEventsPlugin,
};

pub struct SessionsPlugin;

impl Plugin for SessionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SessionEventsPlugin)
            .register_type::<Station>()
            .register_type::<StationKind>()
            .register_type::<SessionTerms>()
            .register_type::<ActiveSession>()
            .add_observer(systems::start_session)
            .add_observer(systems::end_session)
            .add_observer(systems::settle_reward);
    }
}

#[derive(Reflect, Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationKind {
    #[default]
    Shop,
    Minigame,
}

/// Something a player can interact with. The terms are copied into the
/// player's session when it starts.
#[derive(Component, Reflect, Debug, Default, Clone, PartialEq)]
#[reflect(Component, Default)]
pub struct Station {
    pub kind: StationKind,
    pub terms: SessionTerms,
}

/// Present on a player while they interact with `station`.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct ActiveSession {
    pub station: Entity,
    pub lifecycle: SessionLifecycle,
}
