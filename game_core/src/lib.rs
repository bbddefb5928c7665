use {
    abilities::AbilitiesPlugin,
    bevy::prelude::*,
    bonus_stats::BonusStatsPlugin,
    combatant_components::CombatantComponentsPlugin,
    controllers::ControllersPlugin,
    loading::LoadingManagerPlugin,
    round_assets::RoundAssetsPlugin,
    sessions::SessionsPlugin,
    shared_components::SharedComponentsPlugin,
    states::GameState,
    system_schedule::GameSchedule,
    wallet::WalletPlugin,
    weapons::WeaponsPlugin,
};

pub mod round;
mod telemetry;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_plugins((
                WalletPlugin,
                BonusStatsPlugin,
                SharedComponentsPlugin,
                CombatantComponentsPlugin,
                WeaponsPlugin,
                AbilitiesPlugin,
                SessionsPlugin,
                ControllersPlugin,
                RoundAssetsPlugin,
                LoadingManagerPlugin,
            ))
            .configure_sets(
                Update,
                (
                    GameSchedule::FrameStart,
                    GameSchedule::ResolveIntent,
                    GameSchedule::PerformAction,
                    GameSchedule::Effect,
                    GameSchedule::FrameEnd,
                )
                    .chain()
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(OnEnter(GameState::Running), round::spawn_round)
            .add_observer(telemetry::log_kill)
            .add_observer(telemetry::log_purchase)
            .add_observer(telemetry::log_session_end)
            .add_observer(telemetry::log_ability_learned);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
