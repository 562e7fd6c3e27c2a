use log::debug;

use crate::engine::command::GameCommand;
use crate::engine::player::Player;
use crate::model::battlefield::Combatant;
use crate::model::game_state::GameState;
use crate::model::settings::DEFAULT_HEAL_AMOUNT;

/// Allies below this share of max health get healed first.
pub const HEAL_THRESHOLD_PERCENT: i32 = 30;

/// Deterministic if-then policy:
/// heal the most wounded ally under the threshold, otherwise hit the weakest enemy.
#[derive(Debug, Clone)]
pub struct RuleBasedPlayer {
    heal_amount: i32,
}

impl RuleBasedPlayer {
    pub fn new() -> Self {
        Self {
            heal_amount: DEFAULT_HEAL_AMOUNT,
        }
    }

    pub fn with_heal_amount(mut self, heal_amount: i32) -> Self {
        self.heal_amount = heal_amount;
        self
    }
}

impl Default for RuleBasedPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RuleBasedPlayer {
    fn kind(&self) -> String {
        "Rule-based AI".to_string()
    }

    fn decide_action(
        &mut self,
        me: Combatant<'_>,
        allies: &[Combatant<'_>],
        enemies: &[Combatant<'_>],
        _state: &GameState,
    ) -> Option<GameCommand> {
        let wounded = allies
            .iter()
            .filter(|a| a.stats().health_percent() < HEAL_THRESHOLD_PERCENT)
            .min_by_key(|a| a.stats().health_percent());

        if let Some(ally) = wounded {
            debug!("{} heals wounded ally {}", me.name(), ally.name());
            return Some(GameCommand::heal(*ally, self.heal_amount));
        }

        // min_by_key keeps the first of equal elements, so ties go to list order.
        let target = enemies.iter().min_by_key(|e| e.stats().health)?;
        Some(GameCommand::attack(me, *target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::battlefield::{Battlefield, CharacterId, TeamSide};
    use crate::model::factory::CharacterFactory;

    fn decide(field: &Battlefield) -> GameCommand {
        let allies = field.living(TeamSide::One);
        let enemies = field.living(TeamSide::Two);
        RuleBasedPlayer::new()
            .decide_action(allies[0], &allies, &enemies, &GameState::initial())
            .unwrap()
    }

    fn field() -> Battlefield {
        Battlefield::new(
            vec![
                CharacterFactory::create_mage("Healer"),
                CharacterFactory::create_warrior("Tank"),
            ],
            vec![
                CharacterFactory::create_warrior("Brute"),
                CharacterFactory::create_archer("Sniper"),
                CharacterFactory::create_archer("Scout"),
            ],
        )
    }

    #[test]
    fn attacks_lowest_health_enemy_first_on_ties() {
        let field = field();
        let command = decide(&field);
        assert!(command.is_attack());
        // Both archers sit at 100 HP; the first one in order wins.
        assert_eq!(command.target(), CharacterId::new(TeamSide::Two, 1));
    }

    #[test]
    fn heals_an_ally_below_threshold() {
        let mut field = field();
        if let Some(tank) = field.get_mut(CharacterId::new(TeamSide::One, 1)) {
            tank.take_damage(150);
        }
        assert!(field.get(CharacterId::new(TeamSide::One, 1)).unwrap().stats().health_percent() < 30);

        let command = decide(&field);
        assert!(command.is_heal());
        assert_eq!(command.target_name(), "Tank");
    }
}
