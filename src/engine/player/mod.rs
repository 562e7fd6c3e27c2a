//! Decision strategies bound to characters.

pub mod human;
pub mod llm;
pub mod rule_based;

pub use human::HumanPlayer;
pub use llm::LlmPlayer;
pub use rule_based::RuleBasedPlayer;

use crate::engine::command::GameCommand;
use crate::model::battlefield::Combatant;
use crate::model::game_state::GameState;

/// Chooses the action for one character's turn.
///
/// `allies` includes `me`; both lists hold living characters only, in team order.
/// Returning `None` means no action; the controller skips the turn.
pub trait Player {
    /// Short label for team setup output, e.g. `LLM (GPT-5)`.
    fn kind(&self) -> String;

    fn decide_action(
        &mut self,
        me: Combatant<'_>,
        allies: &[Combatant<'_>],
        enemies: &[Combatant<'_>],
        state: &GameState,
    ) -> Option<GameCommand>;
}

/// Attack the first enemy in list order.
pub fn fallback_attack(me: Combatant<'_>, enemies: &[Combatant<'_>]) -> Option<GameCommand> {
    enemies
        .first()
        .map(|target| GameCommand::attack(me, *target))
}

/// Case-insensitive exact name match; anything else resolves to the first candidate.
pub fn find_by_name<'a>(name: &str, candidates: &[Combatant<'a>]) -> Option<Combatant<'a>> {
    let wanted = name.trim().to_lowercase();
    candidates
        .iter()
        .find(|c| c.name().to_lowercase() == wanted)
        .or_else(|| candidates.first())
        .copied()
}
