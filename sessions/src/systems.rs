use {
    crate::{ActiveSession, SessionLifecycle, Station},
    bevy::prelude::*,
    session_events::{
        EndSessionRequest, SessionEnded, SessionStarted, SettleSessionReward, StartSessionRequest,
    },
    shared_components::MovementLock,
    wallet::Wallet,
};

pub fn start_session(
    trigger: On<StartSessionRequest>,
    mut commands: Commands,
    stations: Query<&Station>,
    mut players: Query<(&mut Wallet, &mut MovementLock, Has<ActiveSession>)>,
) {
    let request = trigger.event();
    let Ok(station) = stations.get(request.station) else {
        warn!(station = ?request.station, "Session start ignored: not a station");
        return;
    };

    let Ok((mut wallet, mut lock, busy)) = players.get_mut(request.player) else {
        warn!(player = ?request.player, "Session start ignored: player has no wallet");
        return;
    };

    if busy {
        debug!(player = ?request.player, "Session start ignored: already in a session");
        return;
    }

    let mut lifecycle = SessionLifecycle::new(station.terms);
    let Some(cost_paid) = lifecycle.start(&mut wallet, &mut lock) else {
        return;
    };

    if !cost_paid {
        info!(
            player = ?request.player,
            cost = station.terms.start_cost,
            balance = wallet.balance(),
            "Session started without covering its cost"
        );
    }

    debug!(player = ?request.player, kind = ?station.kind, "Session started");
    commands.entity(request.player).insert(ActiveSession {
        station: request.station,
        lifecycle,
    });
    commands.trigger(SessionStarted {
        player: request.player,
        station: request.station,
        cost_paid,
    });
}

pub fn end_session(
    trigger: On<EndSessionRequest>,
    mut commands: Commands,
    mut players: Query<(&mut Wallet, &mut MovementLock, &mut ActiveSession)>,
) {
    let player = trigger.event().player;
    let Ok((mut wallet, mut lock, mut session)) = players.get_mut(player) else {
        debug!(?player, "Session end ignored: no running session");
        return;
    };

    let Some(reward) = session.lifecycle.end(&mut wallet, &mut lock) else {
        return;
    };

    debug!(?player, reward, balance = wallet.balance(), "Session ended");
    commands.entity(player).remove::<ActiveSession>();
    commands.trigger(SessionEnded {
        player,
        station: session.station,
        reward,
    });
}

pub fn settle_reward(trigger: On<SettleSessionReward>, mut sessions: Query<&mut ActiveSession>) {
    let event = trigger.event();
    let Ok(mut session) = sessions.get_mut(event.player) else {
        warn!(player = ?event.player, "Reward settled outside of a session");
        return;
    };

    session.lifecycle.set_reward(event.reward);
}
