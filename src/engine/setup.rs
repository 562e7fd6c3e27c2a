use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::engine::controller::GameController;
use crate::engine::llm_client::{ChatClient, HttpChatClient};
use crate::engine::player::{HumanPlayer, LlmPlayer, Player, RuleBasedPlayer};
use crate::model::battlefield::{Battlefield, CharacterId, TeamSide};
use crate::model::character::Character;
use crate::model::factory::CharacterFactory;
use crate::model::settings::{GameSettings, MemberSettings, PlayerKind, MAX_HEAL_AMOUNT};

/// Builds the chat client for one LLM-driven member; `model` overrides the configured one.
pub type ClientFactory<'a> = dyn Fn(Option<&str>) -> Result<Box<dyn ChatClient>> + 'a;

/// Builds a ready-to-play controller with HTTP clients for LLM players.
pub fn controller_from_settings(settings: &GameSettings) -> Result<GameController> {
    let make_client = |model: Option<&str>| -> Result<Box<dyn ChatClient>> {
        Ok(Box::new(HttpChatClient::from_settings(&settings.llm, model)?))
    };
    build_controller(settings, &make_client)
}

pub fn build_controller(
    settings: &GameSettings,
    make_client: &ClientFactory<'_>,
) -> Result<GameController> {
    if settings.team1.is_empty() || settings.team2.is_empty() {
        bail!("both teams need at least one member");
    }
    if !(0..=MAX_HEAL_AMOUNT).contains(&settings.heal_amount) {
        bail!(
            "heal_amount must be between 0 and {}, got {}",
            MAX_HEAL_AMOUNT,
            settings.heal_amount
        );
    }

    let mut players: HashMap<CharacterId, Box<dyn Player>> = HashMap::new();
    let mut teams: Vec<Vec<Character>> = Vec::with_capacity(2);

    for (side, members) in [(TeamSide::One, &settings.team1), (TeamSide::Two, &settings.team2)] {
        let mut team = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            team.push(CharacterFactory::create(member.class, member.name.clone()));
            players.insert(
                CharacterId::new(side, index),
                build_player(member, settings, make_client)?,
            );
        }
        teams.push(team);
    }

    let team2 = teams.pop().unwrap_or_default();
    let team1 = teams.pop().unwrap_or_default();
    Ok(GameController::new(Battlefield::new(team1, team2), players)
        .with_max_rounds(settings.max_rounds))
}

fn build_player(
    member: &MemberSettings,
    settings: &GameSettings,
    make_client: &ClientFactory<'_>,
) -> Result<Box<dyn Player>> {
    let heal = settings.heal_amount;
    let player: Box<dyn Player> = match &member.player {
        PlayerKind::Human => Box::new(HumanPlayer::stdin().with_heal_amount(heal)),
        PlayerKind::RuleBased => Box::new(RuleBasedPlayer::new().with_heal_amount(heal)),
        PlayerKind::Llm { model, label } => {
            let client = make_client(model.as_deref())?;
            let name = label
                .clone()
                .or_else(|| model.clone())
                .unwrap_or_else(|| settings.llm.model.clone());
            Box::new(LlmPlayer::new(client, name).with_heal_amount(heal))
        }
    };
    Ok(player)
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::model::character::CharacterType;

    struct Offline;

    impl ChatClient for Offline {
        fn complete(&self, _prompt: &str) -> Result<String> {
            Err(anyhow!("offline"))
        }
    }

    fn offline(_model: Option<&str>) -> Result<Box<dyn ChatClient>> {
        Ok(Box::new(Offline))
    }

    #[test]
    fn default_settings_build_two_full_teams() {
        let controller = build_controller(&GameSettings::default(), &offline).unwrap();
        let field = controller.field();
        assert_eq!(field.team(TeamSide::One).len(), 2);
        assert_eq!(field.team(TeamSide::Two)[0].kind(), CharacterType::Warrior);
        assert_eq!(field.team(TeamSide::Two)[1].name(), "Gandalf");
    }

    #[test]
    fn empty_team_is_rejected() {
        let settings = GameSettings {
            team2: Vec::new(),
            ..GameSettings::default()
        };
        assert!(build_controller(&settings, &offline).is_err());
    }

    #[test]
    fn out_of_range_heal_amount_is_rejected() {
        for raw in [r#"{"heal_amount": 2147483647}"#, r#"{"heal_amount": -5}"#] {
            let settings: GameSettings = serde_json::from_str(raw).unwrap();
            assert!(build_controller(&settings, &offline).is_err(), "{raw}");
        }

        let settings: GameSettings = serde_json::from_str(r#"{"heal_amount": 1000}"#).unwrap();
        assert!(build_controller(&settings, &offline).is_ok());
    }

    #[test]
    fn client_factory_errors_propagate() {
        let failing = |_model: Option<&str>| -> Result<Box<dyn ChatClient>> { Err(anyhow!("no client")) };
        assert!(build_controller(&GameSettings::default(), &failing).is_err());
    }
}
