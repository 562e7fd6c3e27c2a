use std::fmt::Debug;

use crate::model::character::Stats;

/// Mana spent by a fully powered magic attack.
pub const MAGIC_MANA_COST: i32 = 10;

/// How a character turns its stats into raw damage.
/// Implementations are stateless; the same inputs always give the same output.
pub trait AttackStrategy: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn calculate_damage(&self, attacker: &Stats, target: &Stats) -> i32;

    /// Mana consumed when the attack is actually carried out.
    fn mana_cost(&self, _attacker: &Stats) -> i32 {
        0
    }
}

/// How a character soaks incoming damage.
/// The result is the damage actually taken: never negative, never above `raw_damage`.
pub trait DefenseStrategy: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn calculate_damage_reduction(&self, defender: &Stats, raw_damage: i32) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MeleeAttack;

impl AttackStrategy for MeleeAttack {
    fn name(&self) -> &'static str {
        "MeleeAttack"
    }

    fn calculate_damage(&self, attacker: &Stats, _target: &Stats) -> i32 {
        attacker.attack_power.max(0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MagicAttack;

impl AttackStrategy for MagicAttack {
    fn name(&self) -> &'static str {
        "MagicAttack"
    }

    fn calculate_damage(&self, attacker: &Stats, _target: &Stats) -> i32 {
        let power = attacker.attack_power.max(0);
        if attacker.mana >= MAGIC_MANA_COST {
            power * 3 / 2
        } else {
            // Out of mana: a weak staff swing.
            power / 2
        }
    }

    fn mana_cost(&self, attacker: &Stats) -> i32 {
        if attacker.mana >= MAGIC_MANA_COST {
            MAGIC_MANA_COST
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RangedAttack;

impl AttackStrategy for RangedAttack {
    fn name(&self) -> &'static str {
        "RangedAttack"
    }

    fn calculate_damage(&self, attacker: &Stats, _target: &Stats) -> i32 {
        let power = attacker.attack_power.max(0);
        power + power / 5
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BackstabAttack;

impl AttackStrategy for BackstabAttack {
    fn name(&self) -> &'static str {
        "BackstabAttack"
    }

    fn calculate_damage(&self, attacker: &Stats, target: &Stats) -> i32 {
        let power = attacker.attack_power.max(0);
        if target.health * 2 < target.max_health {
            power * 2
        } else {
            power
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeavyArmor;

impl DefenseStrategy for HeavyArmor {
    fn name(&self) -> &'static str {
        "HeavyArmor"
    }

    fn calculate_damage_reduction(&self, defender: &Stats, raw_damage: i32) -> i32 {
        let raw = raw_damage.max(0);
        (raw - defender.defense.max(0)).max(0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArcaneWard;

impl DefenseStrategy for ArcaneWard {
    fn name(&self) -> &'static str {
        "ArcaneWard"
    }

    fn calculate_damage_reduction(&self, defender: &Stats, raw_damage: i32) -> i32 {
        let raw = raw_damage.max(0);
        (raw - defender.defense.max(0) / 2).max(0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evasion;

impl DefenseStrategy for Evasion {
    fn name(&self) -> &'static str {
        "Evasion"
    }

    fn calculate_damage_reduction(&self, defender: &Stats, raw_damage: i32) -> i32 {
        let raw = i64::from(raw_damage.max(0));
        let defense = i64::from(defender.defense.max(0));
        // Percentage soak; widened so large stats cannot overflow.
        (raw * 100 / (100 + 5 * defense)) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stats(health: i32, mana: i32, attack_power: i32, defense: i32) -> Stats {
        Stats {
            health,
            max_health: 100,
            mana,
            max_mana: 100,
            attack_power,
            defense,
        }
    }

    #[test]
    fn magic_attack_needs_mana_for_full_power() {
        let target = stats(100, 0, 0, 0);
        assert_eq!(MagicAttack.calculate_damage(&stats(80, 50, 40, 0), &target), 60);
        assert_eq!(MagicAttack.mana_cost(&stats(80, 50, 40, 0)), MAGIC_MANA_COST);
        assert_eq!(MagicAttack.calculate_damage(&stats(80, 5, 40, 0), &target), 20);
        assert_eq!(MagicAttack.mana_cost(&stats(80, 5, 40, 0)), 0);
    }

    #[test]
    fn backstab_doubles_against_wounded_targets() {
        let rogue = stats(90, 0, 45, 0);
        assert_eq!(BackstabAttack.calculate_damage(&rogue, &stats(60, 0, 0, 0)), 45);
        assert_eq!(BackstabAttack.calculate_damage(&rogue, &stats(40, 0, 0, 0)), 90);
    }

    #[test]
    fn heavy_armor_can_absorb_everything() {
        assert_eq!(HeavyArmor.calculate_damage_reduction(&stats(100, 0, 0, 20), 15), 0);
        assert_eq!(HeavyArmor.calculate_damage_reduction(&stats(100, 0, 0, 20), 50), 30);
    }

    fn defenses() -> Vec<Box<dyn DefenseStrategy>> {
        vec![Box::new(HeavyArmor), Box::new(ArcaneWard), Box::new(Evasion)]
    }

    proptest! {
        #[test]
        fn damage_taken_is_bounded_by_raw(defense in -50i32..500, raw in 0i32..10_000) {
            let defender = stats(100, 0, 0, defense);
            for strategy in defenses() {
                let taken = strategy.calculate_damage_reduction(&defender, raw);
                prop_assert!(taken >= 0);
                prop_assert!(taken <= raw);
            }
        }

        #[test]
        fn damage_taken_is_monotonic(defense in 0i32..200, raw in 0i32..5_000, extra in 0i32..5_000) {
            let defender = stats(100, 0, 0, defense);
            for strategy in defenses() {
                let low = strategy.calculate_damage_reduction(&defender, raw);
                let high = strategy.calculate_damage_reduction(&defender, raw + extra);
                prop_assert!(low <= high);
            }
        }
    }
}
