use std::io::{self, BufRead, BufReader, Cursor, Read, Stdin, Stdout, Write};

use log::warn;

use crate::engine::command::GameCommand;
use crate::engine::player::{fallback_attack, Player};
use crate::model::battlefield::Combatant;
use crate::model::game_state::GameState;
use crate::model::settings::DEFAULT_HEAL_AMOUNT;

/// Line-oriented order source.
pub trait LineInput {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

// `Stdin` locks per call, so several human players can share the terminal.
impl LineInput for Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        Stdin::read_line(self, buf)
    }
}

impl<R: Read> LineInput for BufReader<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Reads orders like `attack Conan` or `h 2` from a line-based input.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
    heal_amount: i32,
}

impl HumanPlayer<Stdin, Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: LineInput, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            heal_amount: DEFAULT_HEAL_AMOUNT,
        }
    }

    pub fn with_heal_amount(mut self, heal_amount: i32) -> Self {
        self.heal_amount = heal_amount;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn show_menu(&mut self, me: &Combatant<'_>, allies: &[Combatant<'_>], enemies: &[Combatant<'_>]) {
        let _ = writeln!(
            self.output,
            "{} ({}) - {}/{} HP, {} mana",
            me.name(),
            me.kind(),
            me.stats().health,
            me.stats().max_health,
            me.stats().mana
        );
        let _ = writeln!(self.output, "Enemies:");
        for (i, enemy) in enemies.iter().enumerate() {
            let _ = writeln!(
                self.output,
                "  {}. {} ({}) {}/{} HP - est. damage ~{}",
                i + 1,
                enemy.name(),
                enemy.kind(),
                enemy.stats().health,
                enemy.stats().max_health,
                me.estimate_damage(enemy)
            );
        }
        let _ = writeln!(self.output, "Allies:");
        for (i, ally) in allies.iter().enumerate() {
            let _ = writeln!(
                self.output,
                "  {}. {} ({}) {}/{} HP",
                i + 1,
                ally.name(),
                ally.kind(),
                ally.stats().health,
                ally.stats().max_health
            );
        }
        let _ = writeln!(
            self.output,
            "Enter `attack <enemy>` or `heal <ally>` (+{} HP):",
            self.heal_amount
        );
        let _ = self.output.flush();
    }
}

enum Order {
    Attack,
    Heal,
}

fn parse_order(line: &str) -> Option<(Order, &str)> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let order = match verb.to_lowercase().as_str() {
        "attack" | "a" => Order::Attack,
        "heal" | "h" => Order::Heal,
        _ => return None,
    };
    Some((order, rest.trim()))
}

/// Resolves a 1-based index or a case-insensitive name. No silent fallback here:
/// a human gets asked again instead.
fn pick<'a>(name: &str, candidates: &[Combatant<'a>]) -> Option<Combatant<'a>> {
    if name.is_empty() {
        return None;
    }
    if let Ok(n) = name.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| candidates.get(i)).copied();
    }
    let wanted = name.to_lowercase();
    candidates
        .iter()
        .find(|c| c.name().to_lowercase() == wanted)
        .copied()
}

impl<R: LineInput, W: Write> Player for HumanPlayer<R, W> {
    fn kind(&self) -> String {
        "Human".to_string()
    }

    fn decide_action(
        &mut self,
        me: Combatant<'_>,
        allies: &[Combatant<'_>],
        enemies: &[Combatant<'_>],
        _state: &GameState,
    ) -> Option<GameCommand> {
        self.show_menu(&me, allies, enemies);

        loop {
            let _ = write!(self.output, "> ");
            let _ = self.output.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    warn!("input closed for {}; attacking first enemy", me.name());
                    return fallback_attack(me, enemies);
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("failed to read input for {}: {}", me.name(), err);
                    return fallback_attack(me, enemies);
                }
            }

            let command = match parse_order(&line) {
                Some((Order::Attack, name)) => {
                    pick(name, enemies).map(|target| GameCommand::attack(me, target))
                }
                Some((Order::Heal, name)) => {
                    pick(name, allies).map(|target| GameCommand::heal(target, self.heal_amount))
                }
                None => None,
            };

            match command {
                Some(command) => return Some(command),
                None => {
                    let _ = writeln!(self.output, "Unrecognised order: {}", line.trim());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::battlefield::{Battlefield, CharacterId, TeamSide};
    use crate::model::factory::CharacterFactory;

    fn field() -> Battlefield {
        Battlefield::new(
            vec![
                CharacterFactory::create_archer("Legolas"),
                CharacterFactory::create_mage("Gandalf"),
            ],
            vec![
                CharacterFactory::create_warrior("Conan"),
                CharacterFactory::create_rogue("Shadow"),
            ],
        )
    }

    fn decide(script: &str, field: &Battlefield) -> (Option<GameCommand>, String) {
        let mut player = HumanPlayer::new(Cursor::new(script.to_string()), Vec::<u8>::new());
        let allies = field.living(TeamSide::One);
        let enemies = field.living(TeamSide::Two);
        let command = player.decide_action(allies[0], &allies, &enemies, &GameState::initial());
        let output = String::from_utf8(player.into_output()).unwrap();
        (command, output)
    }

    #[test]
    fn attack_by_name_ignores_case() {
        let (command, output) = decide("ATTACK shadow\n", &field());
        let command = command.unwrap();
        assert!(command.is_attack());
        assert_eq!(command.target(), CharacterId::new(TeamSide::Two, 1));
        assert!(output.contains("1. Conan (Warrior)"));
    }

    #[test]
    fn heal_by_index_after_a_bad_line() {
        let (command, output) = decide("dance\nh 2\n", &field());
        let command = command.unwrap();
        assert!(command.is_heal());
        assert_eq!(command.target_name(), "Gandalf");
        assert!(output.contains("Unrecognised order: dance"));
    }

    #[test]
    fn closed_input_attacks_first_enemy() {
        let (command, _) = decide("", &field());
        let command = command.unwrap();
        assert!(command.is_attack());
        assert_eq!(command.target_name(), "Conan");
    }
}
