use {
    crate::*,
    abilities::AbilityBook,
    ability_assets::{AbilityDefinition, AbilityId},
    ability_events::ActivateAbilityRequest,
    bevy::prelude::*,
    combat_events::AttackRequest,
    combatant_components::{Combatant, Dead},
    shared_components::{Facing, Role},
    weapon_assets::{WeaponDefinition, WeaponKind},
    weapons::WeaponSlot,
};

#[derive(Resource, Default)]
struct Recorded {
    attacks: Vec<Entity>,
    activations: Vec<AbilityId>,
}

fn setup_app() -> App {
    let mut app = App::new();
    app.init_resource::<Recorded>()
        .add_observer(|trigger: On<AttackRequest>, mut recorded: ResMut<Recorded>| {
            recorded.attacks.push(trigger.event().attacker);
        })
        .add_observer(
            |trigger: On<ActivateAbilityRequest>, mut recorded: ResMut<Recorded>| {
                recorded.activations.push(trigger.event().ability);
            },
        )
        .add_systems(Update, bots::drive_bots);
    app
}

fn knife() -> WeaponDefinition {
    WeaponDefinition {
        id: "knife".to_string(),
        display_name: "Knife".to_string(),
        price: 0,
        kind: WeaponKind::Melee {
            arc_degrees: 60.0,
            ray_count: 3,
        },
        damage: 35,
        cooldown: 0.6,
        range: 40.0,
        uses_ammo: false,
        max_ammo: 0,
        projectile_speed: 0.0,
        projectile: None,
    }
}

fn spawn(app: &mut App, role: Role, position: Vec2, controller: Controller) -> Entity {
    app.world_mut()
        .spawn((
            Combatant,
            role,
            controller,
            WeaponSlot::equipped(knife()),
            Transform::from_translation(position.extend(0.0)),
            Facing(Dir2::X),
        ))
        .id()
}

fn bot(reaction_chance: f64) -> Controller {
    Controller::Bot(BotBrain::new(reaction_chance))
}

#[test]
fn test_bot_turns_and_attacks_opponent() {
    let mut app = setup_app();
    let impostor = spawn(&mut app, Role::Impostor, Vec2::ZERO, bot(1.0));
    let victim = spawn(&mut app, Role::Crewmate, Vec2::new(0.0, 30.0), Controller::Human);

    app.update();

    assert_eq!(app.world().resource::<Recorded>().attacks, vec![impostor]);
    let facing = app.world().get::<Facing>(impostor).unwrap();
    assert!((facing.0.y - 1.0).abs() < 1e-5, "faces north towards the victim");
    assert_eq!(
        app.world().get::<Controller>(impostor),
        Some(&Controller::Bot(BotBrain {
            reaction_chance: 1.0,
            target: Some(victim),
        }))
    );
}

#[test]
fn test_bot_ignores_allies_and_far_opponents() {
    let mut app = setup_app();
    spawn(&mut app, Role::Impostor, Vec2::ZERO, bot(1.0));
    spawn(&mut app, Role::Impostor, Vec2::new(10.0, 0.0), Controller::Human);
    spawn(&mut app, Role::Crewmate, Vec2::new(300.0, 0.0), Controller::Human);

    app.update();

    assert!(app.world().resource::<Recorded>().attacks.is_empty());
}

#[test]
fn test_bot_with_zero_reaction_never_acts() {
    let mut app = setup_app();
    spawn(&mut app, Role::Impostor, Vec2::ZERO, bot(0.0));
    spawn(&mut app, Role::Crewmate, Vec2::new(20.0, 0.0), Controller::Human);

    for _ in 0..10 {
        app.update();
    }

    assert!(app.world().resource::<Recorded>().attacks.is_empty());
}

#[test]
fn test_humans_and_dead_bots_are_not_driven() {
    let mut app = setup_app();
    spawn(&mut app, Role::Impostor, Vec2::ZERO, Controller::Human);
    let dead_bot = spawn(&mut app, Role::Impostor, Vec2::new(0.0, 5.0), bot(1.0));
    app.world_mut().entity_mut(dead_bot).insert(Dead);
    spawn(&mut app, Role::Crewmate, Vec2::new(20.0, 0.0), Controller::Human);

    app.update();

    assert!(app.world().resource::<Recorded>().attacks.is_empty());
}

#[test]
fn test_bot_opens_with_ready_ability() {
    let mut app = setup_app();
    let impostor = spawn(&mut app, Role::Impostor, Vec2::ZERO, bot(1.0));
    spawn(&mut app, Role::Crewmate, Vec2::new(20.0, 0.0), Controller::Human);

    let mut book = AbilityBook::default();
    book.grant(&AbilityDefinition {
        id: AbilityId(1),
        display_name: "Sprint".to_string(),
        cost: 30,
        duration: 4.0,
        cooldown: 12.0,
        effects: vec![],
    });
    app.world_mut().entity_mut(impostor).insert(book);

    app.update();

    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.activations, vec![AbilityId(1)]);
    assert_eq!(recorded.attacks, vec![impostor]);
}

#[test]
fn test_reaction_chance_is_a_probability() {
    assert_eq!(BotBrain::new(1.5).reaction_chance, 1.0);
    assert_eq!(BotBrain::new(-0.2).reaction_chance, 0.0);
    assert_eq!(BotBrain::new(f64::NAN).reaction_chance, 0.0);
}

#[test]
fn test_bot_with_nan_reaction_never_acts() {
    let mut app = setup_app();
    let brain = BotBrain {
        reaction_chance: f64::NAN,
        target: None,
    };
    spawn(&mut app, Role::Impostor, Vec2::ZERO, Controller::Bot(brain));
    spawn(&mut app, Role::Crewmate, Vec2::new(20.0, 0.0), Controller::Human);

    app.update();

    assert!(app.world().resource::<Recorded>().attacks.is_empty());
}
