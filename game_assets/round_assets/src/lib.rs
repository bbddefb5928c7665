//! Round setup loaded from `.round.ron`: economy and health baselines, who
//! plays, and where the interaction stations stand.

use {
    ability_assets::AbilityId,
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    serde::{Deserialize, Serialize},
    sessions::{SessionTerms, StationKind},
    shared_components::Role,
};

pub struct RoundAssetsPlugin;

impl Plugin for RoundAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<RoundDefinition>::new(&["round.ron"]));
    }
}

#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundDefinition {
    /// Wallet balance every participant starts with
    pub starting_balance: i64,
    pub max_health: i32,
    /// Collider radius of participants
    pub hitbox_radius: f32,
    pub participants: Vec<ParticipantSpec>,
    #[serde(default)]
    pub stations: Vec<StationSpec>,
}

impl RoundDefinition {
    pub fn impostor_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.role == Role::Impostor)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSpec {
    pub name: String,
    pub role: Role,
    pub controller: ControllerSpec,
    pub position: (f32, f32),
    /// Degrees counter-clockwise from east
    #[serde(default)]
    pub facing_degrees: f32,
    /// Weapon id granted and equipped at spawn
    #[serde(default)]
    pub weapon: Option<String>,
    /// Abilities known from the start, granted for free
    #[serde(default)]
    pub abilities: Vec<AbilityId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControllerSpec {
    Human,
    Bot {
        /// Chance per frame that a bot acts on a visible target
        #[serde(default = "default_reaction_chance")]
        reaction_chance: f64,
    },
}

fn default_reaction_chance() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSpec {
    pub name: String,
    pub kind: StationKind,
    pub position: (f32, f32),
    #[serde(default)]
    pub terms: SessionTerms,
}

/// Handle to the round being played. Set by the loading phase.
#[derive(Resource, Default)]
pub struct RoundHandle(pub Handle<RoundDefinition>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_round_parses() {
        let round: RoundDefinition =
            ron::from_str(include_str!("../../../assets/rounds/default.round.ron"))
                .expect("default round should parse");

        assert_eq!(round.starting_balance, 100);
        assert_eq!(round.participants.len(), 4);
        assert_eq!(round.impostor_count(), 1);
        assert_eq!(
            round
                .participants
                .iter()
                .filter(|p| p.controller == ControllerSpec::Human)
                .count(),
            1
        );

        let table = round
            .stations
            .iter()
            .find(|s| s.kind == StationKind::Minigame)
            .expect("minigame station");
        assert_eq!(table.terms.start_cost, 20);

        let shop = round
            .stations
            .iter()
            .find(|s| s.kind == StationKind::Shop)
            .expect("shop station");
        assert_eq!(shop.terms, SessionTerms::default());
    }

    #[test]
    fn test_participant_defaults() {
        let spec: ParticipantSpec = ron::from_str(
            r#"(name: "Dave", role: Crewmate, controller: Human, position: (1.0, 2.0))"#,
        )
        .expect("participant should parse");

        assert_eq!(spec.facing_degrees, 0.0);
        assert_eq!(spec.weapon, None);
        assert!(spec.abilities.is_empty());
    }

    #[test]
    fn test_bot_spec_parses() {
        let spec: ControllerSpec =
            ron::from_str("Bot(reaction_chance: 0.25)").expect("bot spec should parse");
        assert_eq!(
            spec,
            ControllerSpec::Bot {
                reaction_chance: 0.25
            }
        );
    }
}
