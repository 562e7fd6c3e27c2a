use anyhow::Result;
use log::debug;

use crate::engine::command::GameCommand;
use crate::model::battlefield::Battlefield;

/// Executes commands and keeps them, oldest first, so they can be undone.
#[derive(Debug, Default)]
pub struct CommandInvoker {
    history: Vec<GameCommand>,
}

impl CommandInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `command` and records it. A command that fails to run is not recorded.
    pub fn execute(
        &mut self,
        mut command: GameCommand,
        field: &mut Battlefield,
    ) -> Result<&GameCommand> {
        command.execute(field)?;
        debug!("executed: {}", command.description());
        self.history.push(command);
        Ok(&self.history[self.history.len() - 1])
    }

    /// Undoes up to `steps` commands, newest first. Returns how many were undone.
    pub fn undo_last(&mut self, steps: usize, field: &mut Battlefield) -> Result<usize> {
        let mut undone = 0;
        while undone < steps {
            let Some(mut command) = self.history.pop() else {
                break;
            };
            if let Err(err) = command.undo(field) {
                self.history.push(command);
                return Err(err);
            }
            debug!("undone: {}", command.description());
            undone += 1;
        }
        Ok(undone)
    }

    pub fn history(&self) -> &[GameCommand] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::battlefield::{CharacterId, TeamSide};
    use crate::model::factory::CharacterFactory;

    #[test]
    fn undo_walks_history_backwards() {
        let mut field = Battlefield::new(
            vec![CharacterFactory::create_archer("Legolas")],
            vec![CharacterFactory::create_rogue("Shadow")],
        );
        let archer = CharacterId::new(TeamSide::One, 0);
        let rogue = CharacterId::new(TeamSide::Two, 0);
        let mut invoker = CommandInvoker::new();

        let first = GameCommand::attack(
            field.combatant(archer).unwrap(),
            field.combatant(rogue).unwrap(),
        );
        invoker.execute(first, &mut field).unwrap();
        let after_first = field.get(rogue).unwrap().stats().health;

        let second = GameCommand::attack(
            field.combatant(archer).unwrap(),
            field.combatant(rogue).unwrap(),
        );
        invoker.execute(second, &mut field).unwrap();
        assert_eq!(invoker.len(), 2);

        assert_eq!(invoker.undo_last(1, &mut field).unwrap(), 1);
        assert_eq!(field.get(rogue).unwrap().stats().health, after_first);

        assert_eq!(invoker.undo_last(5, &mut field).unwrap(), 1);
        assert_eq!(field.get(rogue).unwrap().stats().health, 90);
        assert!(!invoker.can_undo());
    }
}
