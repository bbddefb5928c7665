use bevy::prelude::*;

/// Per-frame ordering of gameplay systems. Configured as a chain in `Update`.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum GameSchedule {
    /// Ability durations and cooldowns advance
    FrameStart,
    /// Controllers turn intent into requests
    ResolveIntent,
    /// Projectiles move and connect
    PerformAction,
    Effect,
    FrameEnd,
}
