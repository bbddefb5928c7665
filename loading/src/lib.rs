mod resources;

use {
    crate::resources::{AbilitiesFolderHandle, WeaponsFolderHandle},
    ability_assets::{AbilityDefinition, AbilityId, AbilityMap},
    bevy::{asset::LoadedFolder, platform::collections::HashMap, prelude::*},
    round_assets::{RoundDefinition, RoundHandle},
    states::{GameState, LoadingPhase},
    std::hash::Hash,
    weapon_assets::{WeaponDefinition, WeaponMap},
};

pub const DEFAULT_ROUND: &str = "rounds/default.round.ron";

pub struct LoadingManagerPlugin;

impl Plugin for LoadingManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingStatus>()
            .init_resource::<RoundHandle>()
            .init_state::<LoadingPhase>()
            // Phase: Assets - load content folders and the round file
            .add_systems(Startup, (start_loading, load_content_folders))
            .add_systems(
                Update,
                check_assets_loaded
                    .run_if(in_state(GameState::Loading).and(in_state(LoadingPhase::Assets))),
            )
            // Phase: BuildMaps - index definitions by id
            .add_systems(
                OnEnter(LoadingPhase::BuildMaps),
                (build_weapon_map, build_ability_map, validate_round).chain(),
            )
            // Phase: Ready - transition to Running
            .add_systems(OnEnter(LoadingPhase::Ready), finish_loading)
            // Loading UI
            .add_systems(OnEnter(GameState::Loading), setup_loading_ui)
            .add_systems(
                Update,
                update_loading_ui.run_if(in_state(GameState::Loading)),
            )
            .add_systems(OnExit(GameState::Loading), cleanup_loading_ui);
    }
}

#[derive(Resource, Default)]
pub struct LoadingStatus {
    pub current_phase: String,
    pub detail: String,
}

// --- Phase: Assets ---

fn start_loading(mut round: ResMut<RoundHandle>, asset_server: Res<AssetServer>) {
    info!("started loading round '{}'", DEFAULT_ROUND);
    round.0 = asset_server.load(DEFAULT_ROUND);
}

fn load_content_folders(mut cmd: Commands, asset_server: Res<AssetServer>) {
    cmd.insert_resource(WeaponsFolderHandle(asset_server.load_folder("weapons")));
    cmd.insert_resource(AbilitiesFolderHandle(asset_server.load_folder("abilities")));
}

fn check_assets_loaded(
    mut next_phase: ResMut<NextState<LoadingPhase>>,
    mut status: ResMut<LoadingStatus>,
    asset_server: Res<AssetServer>,
    round: Res<RoundHandle>,
    weapons: Res<WeaponsFolderHandle>,
    abilities: Res<AbilitiesFolderHandle>,
) {
    status.current_phase = "Loading Assets".into();
    status.detail = "Reading weapons, abilities and round...".into();

    if asset_server.is_loaded_with_dependencies(round.0.id())
        && asset_server.is_loaded_with_dependencies(weapons.0.id())
        && asset_server.is_loaded_with_dependencies(abilities.0.id())
    {
        info!("assets loaded");
        next_phase.set(LoadingPhase::BuildMaps);
    }
}

// --- Phase: BuildMaps ---

/// Indexes typed handles by a key read from each loaded definition.
/// The first definition wins when two share a key.
pub fn index_definitions<T: Asset, K: Eq + Hash + std::fmt::Debug>(
    handles: impl IntoIterator<Item = Handle<T>>,
    assets: &Assets<T>,
    key_of: impl Fn(&T) -> K,
) -> HashMap<K, Handle<T>> {
    let mut map = HashMap::new();

    for handle in handles {
        let Some(def) = assets.get(&handle) else {
            continue;
        };

        let key = key_of(def);
        if map.contains_key(&key) {
            warn!(?key, "duplicate definition id, keeping the first one");
            continue;
        }
        map.insert(key, handle);
    }

    map
}

fn typed_handles<T: Asset>(
    folder: &Handle<LoadedFolder>,
    folders: &Assets<LoadedFolder>,
) -> Vec<Handle<T>> {
    let Some(folder) = folders.get(folder) else {
        warn!("content folder reported loaded but is missing");
        return Vec::new();
    };

    folder
        .handles
        .iter()
        .cloned()
        .filter_map(|untyped| untyped.try_typed::<T>().ok())
        .collect()
}

/// Drops weapon definitions that cannot be equipped, with a warning each.
pub fn usable_weapons(
    handles: Vec<Handle<WeaponDefinition>>,
    weapons: &Assets<WeaponDefinition>,
) -> Vec<Handle<WeaponDefinition>> {
    handles
        .into_iter()
        .filter(|handle| match weapons.get(handle) {
            Some(def) => match def.defect() {
                Some(defect) => {
                    warn!(weapon = %def.id, defect, "skipping weapon definition");
                    false
                }
                None => true,
            },
            None => false,
        })
        .collect()
}

fn build_weapon_map(
    mut map: ResMut<WeaponMap>,
    mut status: ResMut<LoadingStatus>,
    folder: Res<WeaponsFolderHandle>,
    folders: Res<Assets<LoadedFolder>>,
    weapons: Res<Assets<WeaponDefinition>>,
) {
    status.current_phase = "Indexing Content".into();
    status.detail = "Weapons...".into();

    let usable = usable_weapons(typed_handles(&folder.0, &folders), &weapons);
    map.handles = index_definitions(usable, &weapons, |def| def.id.clone());
    info!("indexed {} weapons", map.handles.len());
}

fn build_ability_map(
    mut map: ResMut<AbilityMap>,
    mut status: ResMut<LoadingStatus>,
    folder: Res<AbilitiesFolderHandle>,
    folders: Res<Assets<LoadedFolder>>,
    abilities: Res<Assets<AbilityDefinition>>,
) {
    status.detail = "Abilities...".into();

    map.handles = index_definitions(typed_handles(&folder.0, &folders), &abilities, |def| def.id);
    info!("indexed {} abilities", map.handles.len());
}

/// Content ids a round refers to that no loaded definition provides.
#[derive(Debug, Default, PartialEq)]
pub struct MissingContent {
    pub weapons: Vec<String>,
    pub abilities: Vec<AbilityId>,
}

impl MissingContent {
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.abilities.is_empty()
    }
}

pub fn find_missing_content(
    round: &RoundDefinition,
    weapons: &WeaponMap,
    abilities: &AbilityMap,
) -> MissingContent {
    let mut missing = MissingContent::default();

    for participant in &round.participants {
        if let Some(weapon) = &participant.weapon
            && !weapons.handles.contains_key(weapon)
            && !missing.weapons.contains(weapon)
        {
            missing.weapons.push(weapon.clone());
        }

        for ability in &participant.abilities {
            if !abilities.handles.contains_key(ability) && !missing.abilities.contains(ability) {
                missing.abilities.push(*ability);
            }
        }
    }

    missing
}

/// Missing content is reported but does not stop the round; participants
/// simply spawn without it.
fn validate_round(
    mut next_phase: ResMut<NextState<LoadingPhase>>,
    round: Res<RoundHandle>,
    rounds: Res<Assets<RoundDefinition>>,
    weapons: Res<WeaponMap>,
    abilities: Res<AbilityMap>,
) {
    match rounds.get(&round.0) {
        Some(def) => {
            let missing = find_missing_content(def, &weapons, &abilities);
            if !missing.is_empty() {
                warn!(
                    weapons = ?missing.weapons,
                    abilities = ?missing.abilities,
                    "round refers to unknown content"
                );
            }
        }
        None => warn!("round definition missing after load"),
    }

    next_phase.set(LoadingPhase::Ready);
}

// --- Phase: Ready ---

fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    info!("Loading complete, transitioning to Running");
    next_state.set(GameState::Running);
}

// --- Loading UI ---

#[derive(Component)]
struct LoadingUi;

fn setup_loading_ui(mut commands: Commands) {
    commands.spawn((
        Text::new("Loading..."),
        TextFont {
            font_size: 32.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            right: Val::Px(20.0),
            flex_direction: FlexDirection::Column,
            ..default()
        },
        LoadingUi,
    ));
}

fn update_loading_ui(status: Res<LoadingStatus>, mut query: Query<&mut Text, With<LoadingUi>>) {
    if let Ok(mut text) = query.single_mut() {
        *text = Text::new(format!(
            "Loading...\n{}\n{}",
            status.current_phase, status.detail
        ));
    }
}

fn cleanup_loading_ui(mut commands: Commands, query: Query<Entity, With<LoadingUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        round_assets::{ControllerSpec, ParticipantSpec},
        shared_components::Role,
        weapon_assets::WeaponKind,
    };

    fn weapon(id: &str, damage: i32) -> WeaponDefinition {
        WeaponDefinition {
            id: id.to_string(),
            display_name: id.to_string(),
            price: 0,
            kind: WeaponKind::Ranged,
            damage,
            cooldown: 1.0,
            range: 100.0,
            uses_ammo: false,
            max_ammo: 0,
            projectile_speed: 0.0,
            projectile: None,
        }
    }

    #[test]
    fn test_index_keeps_first_duplicate() {
        let mut assets = Assets::<WeaponDefinition>::default();
        let first = assets.add(weapon("knife", 10));
        let duplicate = assets.add(weapon("knife", 99));
        let revolver = assets.add(weapon("revolver", 40));

        let map = index_definitions([first.clone(), duplicate, revolver], &assets, |def| {
            def.id.clone()
        });

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("knife"), Some(&first));
    }

    #[test]
    fn test_rayless_melee_is_not_indexed() {
        let mut assets = Assets::<WeaponDefinition>::default();
        let knife = assets.add(WeaponDefinition {
            kind: WeaponKind::Melee {
                arc_degrees: 60.0,
                ray_count: 3,
            },
            ..weapon("knife", 35)
        });
        let broken = assets.add(WeaponDefinition {
            kind: WeaponKind::Melee {
                arc_degrees: 60.0,
                ray_count: 0,
            },
            ..weapon("broken", 35)
        });

        let usable = usable_weapons(vec![knife.clone(), broken], &assets);
        let map = index_definitions(usable, &assets, |def| def.id.clone());

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("knife"), Some(&knife));
        assert!(!map.contains_key("broken"));
    }

    #[test]
    fn test_missing_content_is_reported_once() {
        let mut assets = Assets::<WeaponDefinition>::default();
        let knife = assets.add(weapon("knife", 10));
        let mut weapons = WeaponMap::default();
        weapons.handles.insert("knife".to_string(), knife);

        let participant = |weapon: &str, abilities: Vec<AbilityId>| ParticipantSpec {
            name: "p".to_string(),
            role: Role::Crewmate,
            controller: ControllerSpec::Human,
            position: (0.0, 0.0),
            facing_degrees: 0.0,
            weapon: Some(weapon.to_string()),
            abilities,
        };
        let round = RoundDefinition {
            starting_balance: 0,
            max_health: 100,
            hitbox_radius: 16.0,
            participants: vec![
                participant("knife", vec![]),
                participant("laser", vec![AbilityId(9)]),
                participant("laser", vec![AbilityId(9)]),
            ],
            stations: vec![],
        };

        let missing = find_missing_content(&round, &weapons, &AbilityMap::default());
        assert_eq!(
            missing,
            MissingContent {
                weapons: vec!["laser".to_string()],
                abilities: vec![AbilityId(9)],
            }
        );
    }
}
