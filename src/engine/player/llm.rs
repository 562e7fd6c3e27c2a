use anyhow::Result;
use log::{info, warn};

use crate::engine::command::GameCommand;
use crate::engine::llm_client::ChatClient;
use crate::engine::player::{fallback_attack, find_by_name, Player};
use crate::engine::prompt_builder::BattlePromptBuilder;
use crate::model::battlefield::Combatant;
use crate::model::decision::{decode_decision, Decision, DecisionAction};
use crate::model::game_state::GameState;
use crate::model::settings::DEFAULT_HEAL_AMOUNT;

/// Delegates each decision to a chat-completion model.
/// Any failure degrades to attacking the first enemy.
pub struct LlmPlayer {
    client: Box<dyn ChatClient>,
    model_name: String,
    heal_amount: i32,
}

impl LlmPlayer {
    pub fn new(client: Box<dyn ChatClient>, model_name: impl Into<String>) -> Self {
        Self {
            client,
            model_name: model_name.into(),
            heal_amount: DEFAULT_HEAL_AMOUNT,
        }
    }

    pub fn with_heal_amount(mut self, heal_amount: i32) -> Self {
        self.heal_amount = heal_amount;
        self
    }

    fn request_decision(&self, prompt: &str) -> Result<Decision> {
        let raw = self.client.complete(prompt)?;
        Ok(decode_decision(&raw)?)
    }

    fn command_for(
        &self,
        decision: &Decision,
        me: Combatant<'_>,
        allies: &[Combatant<'_>],
        enemies: &[Combatant<'_>],
    ) -> Option<GameCommand> {
        match decision.action_kind() {
            Ok(DecisionAction::Attack) => {
                let target = find_by_name(&decision.target, enemies)?;
                Some(GameCommand::attack(me, target))
            }
            Ok(DecisionAction::Heal) => {
                let target = find_by_name(&decision.target, allies)?;
                Some(GameCommand::heal(target, self.heal_amount))
            }
            Err(err) => {
                warn!("[{}] {}; attacking first enemy", self.model_name, err);
                fallback_attack(me, enemies)
            }
        }
    }
}

impl Player for LlmPlayer {
    fn kind(&self) -> String {
        format!("LLM ({})", self.model_name)
    }

    fn decide_action(
        &mut self,
        me: Combatant<'_>,
        allies: &[Combatant<'_>],
        enemies: &[Combatant<'_>],
        state: &GameState,
    ) -> Option<GameCommand> {
        let prompt = BattlePromptBuilder::build(&me, allies, enemies, state, self.heal_amount);

        match self.request_decision(&prompt) {
            Ok(decision) => {
                info!(
                    "[{}] Reasoning: {}",
                    self.model_name,
                    decision.reasoning.as_deref().unwrap_or("(none)")
                );
                self.command_for(&decision, me, allies, enemies)
            }
            Err(err) => {
                warn!(
                    "[{}] decision failed for {}: {:#}; attacking first enemy",
                    self.model_name,
                    me.name(),
                    err
                );
                fallback_attack(me, enemies)
            }
        }
    }
}
