use anyhow::{anyhow, bail, Result};

use crate::model::battlefield::{Battlefield, CharacterId, Combatant};

/// An executable, reversible game action.
#[derive(Debug, Clone)]
pub enum GameCommand {
    Attack(AttackCommand),
    Heal(HealCommand),
}

#[derive(Debug, Clone)]
pub struct AttackCommand {
    actor: CharacterId,
    actor_name: String,
    target: CharacterId,
    target_name: String,
    applied: Option<AttackApplied>,
}

#[derive(Debug, Clone, Copy)]
struct AttackApplied {
    previous_health: i32,
    previous_mana: i32,
    damage: i32,
}

#[derive(Debug, Clone)]
pub struct HealCommand {
    target: CharacterId,
    target_name: String,
    amount: i32,
    applied: Option<HealApplied>,
}

#[derive(Debug, Clone, Copy)]
struct HealApplied {
    previous_health: i32,
    restored: i32,
}

impl GameCommand {
    pub fn attack(actor: Combatant<'_>, target: Combatant<'_>) -> Self {
        GameCommand::Attack(AttackCommand {
            actor: actor.id,
            actor_name: actor.name().to_string(),
            target: target.id,
            target_name: target.name().to_string(),
            applied: None,
        })
    }

    pub fn heal(target: Combatant<'_>, amount: i32) -> Self {
        GameCommand::Heal(HealCommand {
            target: target.id,
            target_name: target.name().to_string(),
            amount,
            applied: None,
        })
    }

    pub fn is_attack(&self) -> bool {
        matches!(self, GameCommand::Attack(_))
    }

    pub fn is_heal(&self) -> bool {
        matches!(self, GameCommand::Heal(_))
    }

    pub fn target(&self) -> CharacterId {
        match self {
            GameCommand::Attack(c) => c.target,
            GameCommand::Heal(c) => c.target,
        }
    }

    pub fn target_name(&self) -> &str {
        match self {
            GameCommand::Attack(c) => &c.target_name,
            GameCommand::Heal(c) => &c.target_name,
        }
    }

    pub fn is_executed(&self) -> bool {
        match self {
            GameCommand::Attack(c) => c.applied.is_some(),
            GameCommand::Heal(c) => c.applied.is_some(),
        }
    }

    /// Applies the action. Nothing is mutated if an id does not resolve.
    pub fn execute(&mut self, field: &mut Battlefield) -> Result<()> {
        if self.is_executed() {
            bail!("command already executed: {}", self.description());
        }
        match self {
            GameCommand::Attack(c) => c.execute(field),
            GameCommand::Heal(c) => c.execute(field),
        }
    }

    /// Restores the exact stats from before `execute`.
    pub fn undo(&mut self, field: &mut Battlefield) -> Result<()> {
        match self {
            GameCommand::Attack(c) => c.undo(field),
            GameCommand::Heal(c) => c.undo(field),
        }
    }

    pub fn description(&self) -> String {
        match self {
            GameCommand::Attack(c) => match c.applied {
                Some(applied) => format!(
                    "{} attacks {} for {} damage",
                    c.actor_name, c.target_name, applied.damage
                ),
                None => format!("{} attacks {}", c.actor_name, c.target_name),
            },
            GameCommand::Heal(c) => match c.applied {
                Some(applied) => format!(
                    "Heal {} for {} HP (restored {})",
                    c.target_name, c.amount, applied.restored
                ),
                None => format!("Heal {} for {} HP", c.target_name, c.amount),
            },
        }
    }
}

impl AttackCommand {
    fn execute(&mut self, field: &mut Battlefield) -> Result<()> {
        let (raw, mana_cost, previous_mana) = {
            let actor = field
                .get(self.actor)
                .ok_or_else(|| anyhow!("unknown attacker {:?}", self.actor))?;
            let target = field
                .get(self.target)
                .ok_or_else(|| anyhow!("unknown attack target {:?}", self.target))?;
            (actor.attack(target), actor.attack_mana_cost(), actor.stats().mana)
        };

        let target = field
            .get_mut(self.target)
            .ok_or_else(|| anyhow!("unknown attack target {:?}", self.target))?;
        let previous_health = target.stats().health;
        let damage = target.take_damage(raw);

        if let Some(actor) = field.get_mut(self.actor) {
            actor.spend_mana(mana_cost);
        }

        self.applied = Some(AttackApplied {
            previous_health,
            previous_mana,
            damage,
        });
        Ok(())
    }

    fn undo(&mut self, field: &mut Battlefield) -> Result<()> {
        let applied = self
            .applied
            .ok_or_else(|| anyhow!("cannot undo an attack that never ran"))?;

        field
            .get_mut(self.target)
            .ok_or_else(|| anyhow!("unknown attack target {:?}", self.target))?
            .restore_health(applied.previous_health);
        if let Some(actor) = field.get_mut(self.actor) {
            actor.restore_mana(applied.previous_mana);
        }

        self.applied = None;
        Ok(())
    }
}

impl HealCommand {
    fn execute(&mut self, field: &mut Battlefield) -> Result<()> {
        let target = field
            .get_mut(self.target)
            .ok_or_else(|| anyhow!("unknown heal target {:?}", self.target))?;
        let previous_health = target.stats().health;
        let restored = target.heal(self.amount);

        self.applied = Some(HealApplied {
            previous_health,
            restored,
        });
        Ok(())
    }

    fn undo(&mut self, field: &mut Battlefield) -> Result<()> {
        let applied = self
            .applied
            .ok_or_else(|| anyhow!("cannot undo a heal that never ran"))?;

        field
            .get_mut(self.target)
            .ok_or_else(|| anyhow!("unknown heal target {:?}", self.target))?
            .restore_health(applied.previous_health);

        self.applied = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::battlefield::TeamSide;
    use crate::model::factory::CharacterFactory;

    fn field() -> Battlefield {
        Battlefield::new(
            vec![CharacterFactory::create_mage("Gandalf")],
            vec![CharacterFactory::create_warrior("Conan")],
        )
    }

    fn ids() -> (CharacterId, CharacterId) {
        (
            CharacterId::new(TeamSide::One, 0),
            CharacterId::new(TeamSide::Two, 0),
        )
    }

    #[test]
    fn attack_spends_mana_and_undo_restores_both() {
        let mut field = field();
        let (mage, warrior) = ids();
        let mut command = GameCommand::attack(
            field.combatant(mage).unwrap(),
            field.combatant(warrior).unwrap(),
        );

        command.execute(&mut field).unwrap();
        // 60 * 3 / 2 = 90 raw, minus 20 armour.
        assert_eq!(field.get(warrior).unwrap().stats().health, 80);
        assert_eq!(field.get(mage).unwrap().stats().mana, 90);
        assert_eq!(command.description(), "Gandalf attacks Conan for 70 damage");

        command.undo(&mut field).unwrap();
        assert_eq!(field.get(warrior).unwrap().stats().health, 150);
        assert_eq!(field.get(mage).unwrap().stats().mana, 100);
        assert!(!command.is_executed());
    }

    #[test]
    fn heal_is_capped_and_undone_exactly() {
        let mut field = field();
        let (mage, _) = ids();
        if let Some(gandalf) = field.get_mut(mage) {
            gandalf.take_damage(22);
        }
        let wounded = field.get(mage).unwrap().stats().health;

        let mut command = GameCommand::heal(field.combatant(mage).unwrap(), 30);
        command.execute(&mut field).unwrap();
        assert_eq!(field.get(mage).unwrap().stats().health, 80);
        assert!(command.description().contains("Gandalf"));

        command.undo(&mut field).unwrap();
        assert_eq!(field.get(mage).unwrap().stats().health, wounded);
    }

    #[test]
    fn executing_twice_is_rejected() {
        let mut field = field();
        let (mage, warrior) = ids();
        let mut command = GameCommand::attack(
            field.combatant(mage).unwrap(),
            field.combatant(warrior).unwrap(),
        );
        command.execute(&mut field).unwrap();
        assert!(command.execute(&mut field).is_err());
        assert_eq!(field.get(warrior).unwrap().stats().health, 80);
    }

    #[test]
    fn undo_before_execute_fails() {
        let mut field = field();
        let (mage, _) = ids();
        let mut command = GameCommand::heal(field.combatant(mage).unwrap(), 30);
        assert!(command.undo(&mut field).is_err());
    }
}
