use bevy::prelude::*;

pub struct SessionEventsPlugin;

impl Plugin for SessionEventsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<StartSessionRequest>()
            .register_type::<EndSessionRequest>()
            .register_type::<SettleSessionReward>()
            .register_type::<SessionStarted>()
            .register_type::<SessionEnded>();
    }
}

/// `player` starts interacting with `station` (shop counter, minigame table).
#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct StartSessionRequest {
    pub player: Entity,
    pub station: Entity,
}

/// `player` leaves the station they are interacting with.
#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct EndSessionRequest {
    pub player: Entity,
}

/// Sets the payout granted when the running session ends, e.g. a won wager.
#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct SettleSessionReward {
    pub player: Entity,
    pub reward: i64,
}

#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct SessionStarted {
    pub player: Entity,
    pub station: Entity,
    /// Whether the start cost was fully covered. Informational only.
    pub cost_paid: bool,
}

#[derive(Event, Debug, Clone, Copy, Reflect)]
pub struct SessionEnded {
    pub player: Entity,
    pub station: Entity,
    pub reward: i64,
}
