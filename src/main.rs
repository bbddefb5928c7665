use {
    bevy::{log::LogPlugin, prelude::*},
    game_core::CorePlugin,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(LogPlugin {
                filter: "error,loading=debug,\
                    weapons=debug,\
                    abilities=debug,\
                    sessions=debug,\
                    controllers=info,\
                    wallet=debug,\
                    game_core=info"
                    .into(),
                level: bevy::log::Level::TRACE,
                ..Default::default()
            }),
        )
        .add_plugins(CorePlugin)
        .run();
}
