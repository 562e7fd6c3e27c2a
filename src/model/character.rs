use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::strategy::{AttackStrategy, DefenseStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterType {
    Warrior,
    Mage,
    Archer,
    Rogue,
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CharacterType::Warrior => "Warrior",
            CharacterType::Mage => "Mage",
            CharacterType::Archer => "Archer",
            CharacterType::Rogue => "Rogue",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub attack_power: i32,
    pub defense: i32,
}

impl Stats {
    /// Current health as a whole percentage of max health.
    pub fn health_percent(&self) -> i32 {
        if self.max_health <= 0 {
            return 0;
        }
        self.health.max(0) * 100 / self.max_health
    }
}

/// A combat entity. Health stays within `[0, max_health]`.
#[derive(Debug)]
pub struct Character {
    name: String,
    kind: CharacterType,
    stats: Stats,
    attack_strategy: Box<dyn AttackStrategy>,
    defense_strategy: Box<dyn DefenseStrategy>,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        kind: CharacterType,
        stats: Stats,
        attack_strategy: Box<dyn AttackStrategy>,
        defense_strategy: Box<dyn DefenseStrategy>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            stats,
            attack_strategy,
            defense_strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CharacterType {
        self.kind
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn is_alive(&self) -> bool {
        self.stats.health > 0
    }

    /// Health for display; never below zero.
    pub fn display_health(&self) -> i32 {
        self.stats.health.max(0)
    }

    pub fn attack_strategy(&self) -> &dyn AttackStrategy {
        self.attack_strategy.as_ref()
    }

    pub fn defense_strategy(&self) -> &dyn DefenseStrategy {
        self.defense_strategy.as_ref()
    }

    pub fn set_attack_strategy(&mut self, strategy: Box<dyn AttackStrategy>) {
        self.attack_strategy = strategy;
    }

    pub fn set_defense_strategy(&mut self, strategy: Box<dyn DefenseStrategy>) {
        self.defense_strategy = strategy;
    }

    /// Raw damage this character would deal to `target`, before the target's defense.
    pub fn attack(&self, target: &Character) -> i32 {
        self.attack_strategy
            .calculate_damage(&self.stats, &target.stats)
    }

    /// Damage `target` would actually take from this character right now.
    pub fn estimate_damage(&self, target: &Character) -> i32 {
        let raw = self.attack(target);
        target
            .defense_strategy
            .calculate_damage_reduction(&target.stats, raw)
    }

    /// Mana the current attack strategy would spend.
    pub fn attack_mana_cost(&self) -> i32 {
        self.attack_strategy.mana_cost(&self.stats)
    }

    /// Runs `raw_damage` through this character's defense and subtracts it.
    /// Returns the health actually lost.
    pub fn take_damage(&mut self, raw_damage: i32) -> i32 {
        let taken = self
            .defense_strategy
            .calculate_damage_reduction(&self.stats, raw_damage);
        let before = self.stats.health;
        self.stats.health = (before - taken).max(0);
        before - self.stats.health
    }

    /// Returns the health actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.stats.health;
        self.stats.health = before.saturating_add(amount.max(0)).min(self.stats.max_health);
        self.stats.health - before
    }

    pub fn spend_mana(&mut self, amount: i32) {
        self.stats.mana = (self.stats.mana - amount.max(0)).max(0);
    }

    pub(crate) fn restore_health(&mut self, health: i32) {
        self.stats.health = health;
    }

    pub(crate) fn restore_mana(&mut self, mana: i32) {
        self.stats.mana = mana;
    }
}
