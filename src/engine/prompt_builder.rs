use crate::model::battlefield::Combatant;
use crate::model::character::CharacterType;
use crate::model::game_state::GameState;

/// Builds the battle prompt sent to an LLM player.
/// Only formats text: no parsing, no networking, no engine logic.
pub struct BattlePromptBuilder;

impl BattlePromptBuilder {
    pub fn build(
        me: &Combatant<'_>,
        allies: &[Combatant<'_>],
        enemies: &[Combatant<'_>],
        state: &GameState,
        heal_amount: i32,
    ) -> String {
        let mut prompt = String::new();

        push_role(&mut prompt, me, state);
        push_self_status(&mut prompt, me);
        push_roster(&mut prompt, "YOUR TEAM (allies)", allies);
        push_roster(&mut prompt, "ENEMIES", enemies);
        push_actions(&mut prompt, me, enemies, heal_amount);
        push_guidance(&mut prompt, me.kind());
        push_output_format(&mut prompt);

        prompt
    }
}

fn push_role(prompt: &mut String, me: &Combatant<'_>, state: &GameState) {
    prompt.push_str(&format!(
        "You are {}, a {} in a tactical RPG combat.\n",
        me.name(),
        me.kind()
    ));
    prompt.push_str(&format!(
        "It is round {} (turn {}).\n\n",
        state.round_number(),
        state.turn_number() + 1
    ));
}

fn push_self_status(prompt: &mut String, me: &Combatant<'_>) {
    let stats = me.stats();
    prompt.push_str("YOUR STATUS:\n");
    prompt.push_str(&format!(
        "- HP: {}/{} ({}%)\n",
        stats.health,
        stats.max_health,
        stats.health_percent()
    ));
    prompt.push_str(&format!("- Mana: {}/{}\n", stats.mana, stats.max_mana));
    prompt.push_str(&format!(
        "- Attack Power: {}, Defense: {}\n",
        stats.attack_power, stats.defense
    ));
    prompt.push_str(&format!(
        "- Strategies: {} (attack), {} (defense)\n\n",
        me.attack_strategy().name(),
        me.defense_strategy().name()
    ));
}

fn push_roster(prompt: &mut String, label: &str, members: &[Combatant<'_>]) {
    prompt.push_str(label);
    prompt.push_str(":\n");
    if members.is_empty() {
        prompt.push_str("  (none)\n");
    }
    for member in members {
        let stats = member.stats();
        prompt.push_str(&format!(
            "  - {} ({}): {}/{} HP ({}%), {} ATK, {} DEF\n",
            member.name(),
            member.kind(),
            stats.health,
            stats.max_health,
            stats.health_percent(),
            stats.attack_power,
            stats.defense
        ));
    }
    prompt.push('\n');
}

fn push_actions(
    prompt: &mut String,
    me: &Combatant<'_>,
    enemies: &[Combatant<'_>],
    heal_amount: i32,
) {
    let estimated = enemies
        .first()
        .map(|enemy| me.estimate_damage(enemy))
        .unwrap_or(0);

    prompt.push_str("AVAILABLE ACTIONS:\n");
    prompt.push_str(&format!(
        "1. attack <enemy_name> - Estimated damage: ~{}\n",
        estimated
    ));
    prompt.push_str(&format!(
        "2. heal <ally_name> - Restores {} HP\n\n",
        heal_amount
    ));
}

fn push_guidance(prompt: &mut String, kind: CharacterType) {
    prompt.push_str(
        "TACTICAL GUIDANCE:\n\
- Focus fire: Attack wounded enemies to eliminate threats\n\
- Protect allies: Heal teammates below 30% HP\n",
    );
    prompt.push_str(&format!("- Consider your role: {}\n", role_advice(kind)));
    prompt.push_str(
        "- Prioritize finishing off low-HP enemies to reduce incoming damage\n\
- Save critically wounded allies (below 30% HP) before they fall\n\n",
    );
}

fn push_output_format(prompt: &mut String) {
    prompt.push_str(
        "Respond ONLY with JSON (no markdown, no extra text):\n\
{\n\
  \"action\": \"attack\" | \"heal\",\n\
  \"target\": \"character_name\",\n\
  \"reasoning\": \"brief tactical explanation\"\n\
}\n",
    );
}

fn role_advice(kind: CharacterType) -> &'static str {
    match kind {
        CharacterType::Warrior => {
            "As a Warrior, you have high HP and attack power. Focus on protecting allies and eliminating threats."
        }
        CharacterType::Mage => {
            "As a Mage, you have powerful attacks but low HP. Stay alive and deal maximum damage."
        }
        CharacterType::Archer => {
            "As an Archer, focus on picking off weakened enemies from a distance."
        }
        CharacterType::Rogue => {
            "As a Rogue, use your agility to strike at the most vulnerable targets."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::battlefield::{Battlefield, TeamSide};
    use crate::model::factory::CharacterFactory;

    #[test]
    fn prompt_lists_both_teams_and_the_estimate() {
        let field = Battlefield::new(
            vec![
                CharacterFactory::create_archer("Legolas"),
                CharacterFactory::create_rogue("Shadow"),
            ],
            vec![CharacterFactory::create_warrior("Conan")],
        );
        let allies = field.living(TeamSide::One);
        let enemies = field.living(TeamSide::Two);

        let prompt =
            BattlePromptBuilder::build(&allies[0], &allies, &enemies, &GameState::initial(), 30);

        assert!(prompt.starts_with("You are Legolas, a Archer"));
        assert!(prompt.contains("  - Shadow (Rogue): 90/90 HP (100%), 45 ATK, 12 DEF"));
        assert!(prompt.contains("  - Conan (Warrior): 150/150 HP"));
        assert!(prompt.contains("Estimated damage: ~40"));
        assert!(prompt.contains("Restores 30 HP"));
        assert!(prompt.contains("As an Archer"));
        assert!(prompt.contains("RangedAttack (attack), Evasion (defense)"));
    }
}
