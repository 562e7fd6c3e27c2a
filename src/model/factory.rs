use crate::model::character::{Character, CharacterType, Stats};
use crate::model::strategy::{
    ArcaneWard, AttackStrategy, BackstabAttack, DefenseStrategy, Evasion, HeavyArmor, MagicAttack,
    MeleeAttack, RangedAttack,
};

/// Class presets used for every character created from settings.
pub struct CharacterFactory;

impl CharacterFactory {
    pub fn create(kind: CharacterType, name: impl Into<String>) -> Character {
        match kind {
            CharacterType::Warrior => Self::create_warrior(name),
            CharacterType::Mage => Self::create_mage(name),
            CharacterType::Archer => Self::create_archer(name),
            CharacterType::Rogue => Self::create_rogue(name),
        }
    }

    pub fn create_warrior(name: impl Into<String>) -> Character {
        CharacterBuilder::new(name, CharacterType::Warrior)
            .health(150)
            .mana(0)
            .attack_power(40)
            .defense(20)
            .attack_strategy(MeleeAttack)
            .defense_strategy(HeavyArmor)
            .build()
    }

    pub fn create_mage(name: impl Into<String>) -> Character {
        CharacterBuilder::new(name, CharacterType::Mage)
            .health(80)
            .mana(100)
            .attack_power(60)
            .defense(5)
            .attack_strategy(MagicAttack)
            .defense_strategy(ArcaneWard)
            .build()
    }

    pub fn create_archer(name: impl Into<String>) -> Character {
        CharacterBuilder::new(name, CharacterType::Archer)
            .health(100)
            .mana(50)
            .attack_power(50)
            .defense(10)
            .attack_strategy(RangedAttack)
            .defense_strategy(Evasion)
            .build()
    }

    pub fn create_rogue(name: impl Into<String>) -> Character {
        CharacterBuilder::new(name, CharacterType::Rogue)
            .health(90)
            .mana(30)
            .attack_power(45)
            .defense(12)
            .attack_strategy(BackstabAttack)
            .defense_strategy(Evasion)
            .build()
    }
}

/// Builds characters with custom stats. Unset strategies default to the class preset's.
pub struct CharacterBuilder {
    name: String,
    kind: CharacterType,
    stats: Stats,
    attack_strategy: Option<Box<dyn AttackStrategy>>,
    defense_strategy: Option<Box<dyn DefenseStrategy>>,
}

impl CharacterBuilder {
    pub fn new(name: impl Into<String>, kind: CharacterType) -> Self {
        Self {
            name: name.into(),
            kind,
            stats: Stats {
                health: 100,
                max_health: 100,
                mana: 0,
                max_mana: 0,
                attack_power: 10,
                defense: 0,
            },
            attack_strategy: None,
            defense_strategy: None,
        }
    }

    /// Sets both current and max health.
    pub fn health(mut self, health: i32) -> Self {
        self.stats.health = health;
        self.stats.max_health = health;
        self
    }

    /// Sets both current and max mana.
    pub fn mana(mut self, mana: i32) -> Self {
        self.stats.mana = mana;
        self.stats.max_mana = mana;
        self
    }

    pub fn attack_power(mut self, attack_power: i32) -> Self {
        self.stats.attack_power = attack_power;
        self
    }

    pub fn defense(mut self, defense: i32) -> Self {
        self.stats.defense = defense;
        self
    }

    pub fn attack_strategy(mut self, strategy: impl AttackStrategy + 'static) -> Self {
        self.attack_strategy = Some(Box::new(strategy));
        self
    }

    pub fn defense_strategy(mut self, strategy: impl DefenseStrategy + 'static) -> Self {
        self.defense_strategy = Some(Box::new(strategy));
        self
    }

    pub fn build(self) -> Character {
        let (default_attack, default_defense) = default_strategies(self.kind);
        Character::new(
            self.name,
            self.kind,
            self.stats,
            self.attack_strategy.unwrap_or(default_attack),
            self.defense_strategy.unwrap_or(default_defense),
        )
    }
}

fn default_strategies(kind: CharacterType) -> (Box<dyn AttackStrategy>, Box<dyn DefenseStrategy>) {
    match kind {
        CharacterType::Warrior => (Box::new(MeleeAttack), Box::new(HeavyArmor)),
        CharacterType::Mage => (Box::new(MagicAttack), Box::new(ArcaneWard)),
        CharacterType::Archer => (Box::new(RangedAttack), Box::new(Evasion)),
        CharacterType::Rogue => (Box::new(BackstabAttack), Box::new(Evasion)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_start_at_full_health() {
        for kind in [
            CharacterType::Warrior,
            CharacterType::Mage,
            CharacterType::Archer,
            CharacterType::Rogue,
        ] {
            let c = CharacterFactory::create(kind, "X");
            assert_eq!(c.kind(), kind);
            assert_eq!(c.stats().health, c.stats().max_health);
            assert_eq!(c.stats().mana, c.stats().max_mana);
            assert!(c.is_alive());
        }
    }

    #[test]
    fn builder_falls_back_to_class_strategies() {
        let mage = CharacterBuilder::new("Merlin", CharacterType::Mage)
            .health(42)
            .build();
        assert_eq!(mage.stats().max_health, 42);
        assert_eq!(mage.attack_strategy().name(), "MagicAttack");
        assert_eq!(mage.defense_strategy().name(), "ArcaneWard");
    }
}
