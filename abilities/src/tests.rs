use {
    crate::*,
    ability_assets::{AbilityDefinition, AbilityEffect, AbilityId, AbilityMap},
    ability_events::{
        AbilityActivated, AbilityDeactivated, AbilityLearned, ActivateAbilityRequest,
        DeactivationReason, LearnAbilityRequest,
    },
    bevy::prelude::*,
    bonus_stats::{BonusStats, StatMode, keys},
    combatant_components::{Dead, Health},
    std::time::Duration,
    wallet::Wallet,
};

#[derive(Resource, Default)]
struct Recorded {
    learned: Vec<AbilityId>,
    activated: Vec<AbilityId>,
    deactivated: Vec<(AbilityId, DeactivationReason)>,
}

fn setup_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .init_resource::<Recorded>()
        .init_resource::<Assets<AbilityDefinition>>()
        .init_resource::<AbilityMap>()
        .add_observer(systems::learn_ability)
        .add_observer(systems::activate_ability)
        .add_observer(|trigger: On<AbilityLearned>, mut recorded: ResMut<Recorded>| {
            recorded.learned.push(trigger.event().ability);
        })
        .add_observer(|trigger: On<AbilityActivated>, mut recorded: ResMut<Recorded>| {
            recorded.activated.push(trigger.event().ability);
        })
        .add_observer(|trigger: On<AbilityDeactivated>, mut recorded: ResMut<Recorded>| {
            let event = trigger.event();
            recorded.deactivated.push((event.ability, event.reason));
        })
        .add_systems(Update, systems::tick_abilities);
    app
}

fn register(app: &mut App, def: AbilityDefinition) {
    let id = def.id;
    let handle = app
        .world_mut()
        .resource_mut::<Assets<AbilityDefinition>>()
        .add(def);
    app.world_mut()
        .resource_mut::<AbilityMap>()
        .handles
        .insert(id, handle);
}

fn step(app: &mut App, secs: f32) {
    let mut time = app.world().resource::<Time>().clone();
    time.advance_by(Duration::from_secs_f32(secs));
    app.insert_resource(time);
    app.update();
}

fn frenzy() -> AbilityDefinition {
    AbilityDefinition {
        id: AbilityId(4),
        display_name: "Frenzy".to_string(),
        cost: 50,
        duration: 5.0,
        cooldown: 10.0,
        effects: vec![
            AbilityEffect::StatModifier {
                stat_key: keys::DAMAGE_DEALT.to_string(),
                value: 0.5,
                mode: StatMode::Percent,
            },
            AbilityEffect::Regeneration { per_second: 2.0 },
        ],
    }
}

fn mend() -> AbilityDefinition {
    AbilityDefinition {
        id: AbilityId(2),
        display_name: "Mend".to_string(),
        cost: 40,
        duration: 0.0,
        cooldown: 20.0,
        effects: vec![AbilityEffect::Heal { amount: 35 }],
    }
}

fn spawn_caster(app: &mut App, balance: i64) -> Entity {
    let mut health = Health::new(100);
    health.take_damage(60);
    app.world_mut()
        .spawn((AbilityBook::default(), Wallet::with_balance(balance), health))
        .id()
}

fn learn(app: &mut App, learner: Entity, ability: AbilityId) {
    app.world_mut()
        .trigger(LearnAbilityRequest { learner, ability });
    app.update();
}

fn activate(app: &mut App, caster: Entity, ability: AbilityId) {
    app.world_mut()
        .trigger(ActivateAbilityRequest { caster, ability });
    app.update();
}

#[test]
fn test_learn_through_observer() {
    let mut app = setup_app();
    register(&mut app, frenzy());
    let caster = spawn_caster(&mut app, 100);

    learn(&mut app, caster, AbilityId(4));
    learn(&mut app, caster, AbilityId(4));
    // Not registered
    learn(&mut app, caster, AbilityId(99));

    assert_eq!(app.world().get::<Wallet>(caster).unwrap().balance(), 50);
    assert_eq!(app.world().resource::<Recorded>().learned, vec![AbilityId(4)]);
    assert!(
        app.world()
            .get::<AbilityBook>(caster)
            .unwrap()
            .is_learned(AbilityId(4))
    );
}

#[test]
fn test_frenzy_lifecycle() {
    let mut app = setup_app();
    register(&mut app, frenzy());
    let caster = spawn_caster(&mut app, 100);
    let id = AbilityId(4);

    learn(&mut app, caster, id);
    activate(&mut app, caster, id);

    let bonus = |app: &App| {
        app.world()
            .get::<BonusStats>(caster)
            .unwrap()
            .apply_int(keys::DAMAGE_DEALT, 10)
    };
    assert_eq!(bonus(&app), 15);

    for _ in 0..4 {
        step(&mut app, 1.0);
    }
    assert!(app.world().get::<AbilityBook>(caster).unwrap().is_active(id));
    assert_eq!(app.world().get::<Health>(caster).unwrap().current, 48);

    step(&mut app, 1.0);
    let book = app.world().get::<AbilityBook>(caster).unwrap();
    assert!(!book.is_active(id));
    assert_eq!(book.cooldown_remaining(id), 5.0);
    assert_eq!(bonus(&app), 10);
    assert_eq!(app.world().get::<Health>(caster).unwrap().current, 50);

    for _ in 0..5 {
        step(&mut app, 1.0);
    }
    assert_eq!(
        app.world().resource::<Recorded>().deactivated,
        vec![(id, DeactivationReason::Expired)]
    );
    assert_eq!(
        app.world()
            .get::<AbilityBook>(caster)
            .unwrap()
            .cooldown_remaining(id),
        0.0
    );

    activate(&mut app, caster, id);
    assert_eq!(app.world().resource::<Recorded>().activated, vec![id, id]);
}

#[test]
fn test_replacement_is_announced() {
    let mut app = setup_app();
    register(&mut app, frenzy());
    register(&mut app, mend());
    let caster = spawn_caster(&mut app, 200);

    learn(&mut app, caster, AbilityId(4));
    learn(&mut app, caster, AbilityId(2));
    activate(&mut app, caster, AbilityId(4));
    activate(&mut app, caster, AbilityId(2));

    let recorded = app.world().resource::<Recorded>();
    // Mend has no duration, so it ends right after replacing frenzy
    assert_eq!(
        recorded.deactivated,
        vec![
            (AbilityId(4), DeactivationReason::Replaced),
            (AbilityId(2), DeactivationReason::Expired),
        ]
    );
    assert_eq!(recorded.activated, vec![AbilityId(4), AbilityId(2)]);

    // Frenzy's bonus is gone, mend healed instantly
    let world = app.world();
    assert_eq!(
        world
            .get::<BonusStats>(caster)
            .unwrap()
            .apply_int(keys::DAMAGE_DEALT, 10),
        10
    );
    assert_eq!(world.get::<Health>(caster).unwrap().current, 75);
}

/// Activation queued for the intent stage of the next frame.
#[derive(Resource, Default)]
struct PendingActivation(Option<ActivateAbilityRequest>);

fn request_pending(mut commands: Commands, mut pending: ResMut<PendingActivation>) {
    if let Some(request) = pending.0.take() {
        commands.trigger(request);
    }
}

#[test]
fn test_instant_ability_ends_in_the_frame_it_starts() {
    let mut app = setup_app();
    app.init_resource::<PendingActivation>().add_systems(
        Update,
        request_pending.after(systems::tick_abilities),
    );
    register(&mut app, mend());
    let caster = spawn_caster(&mut app, 100);
    learn(&mut app, caster, AbilityId(2));

    // Requested after this frame's tick already ran
    app.world_mut().resource_mut::<PendingActivation>().0 = Some(ActivateAbilityRequest {
        caster,
        ability: AbilityId(2),
    });
    step(&mut app, 0.016);

    let book = app.world().get::<AbilityBook>(caster).unwrap();
    assert_eq!(book.active_id(), None);
    assert_eq!(book.cooldown_remaining(AbilityId(2)), 20.0);
    assert_eq!(
        app.world().resource::<Recorded>().deactivated,
        vec![(AbilityId(2), DeactivationReason::Expired)]
    );
    assert_eq!(app.world().get::<Health>(caster).unwrap().current, 75);

    // Later ticks do not announce it again
    step(&mut app, 0.5);
    assert_eq!(app.world().resource::<Recorded>().deactivated.len(), 1);
}

#[test]
fn test_dead_caster_cannot_activate() {
    let mut app = setup_app();
    register(&mut app, mend());
    let caster = spawn_caster(&mut app, 100);
    learn(&mut app, caster, AbilityId(2));

    app.world_mut().entity_mut(caster).insert(Dead);
    activate(&mut app, caster, AbilityId(2));

    assert!(app.world().resource::<Recorded>().activated.is_empty());
    assert_eq!(app.world().get::<Health>(caster).unwrap().current, 40);
}
