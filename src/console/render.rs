use std::collections::HashMap;
use std::io::{self, Write};

use crate::engine::player::Player;
use crate::engine::protocol::MatchOutcome;
use crate::model::battlefield::{Battlefield, CharacterId, TeamSide};
use crate::model::game_state::GameState;

const RULE_WIDTH: usize = 60;

fn rule(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn banner(out: &mut dyn Write) -> io::Result<()> {
    rule(out)?;
    writeln!(out, "ARENA TACTICS")?;
    rule(out)?;
    writeln!(out, "Players can be:")?;
    writeln!(out, "- Human (you control via console)")?;
    writeln!(out, "- LLM-based (any OpenAI-compatible chat endpoint)")?;
    writeln!(out, "- Rule-based AI (simple if-then logic)")?;
    rule(out)
}

pub fn team_setup(
    out: &mut dyn Write,
    field: &Battlefield,
    players: &HashMap<CharacterId, Box<dyn Player>>,
) -> io::Result<()> {
    writeln!(out, "\n=== Team Setup ===")?;
    for side in [TeamSide::One, TeamSide::Two] {
        writeln!(out, "{}:", side.label())?;
        for c in field.combatants(side) {
            let player = players
                .get(&c.id)
                .map(|p| p.kind())
                .unwrap_or_else(|| "(no player)".to_string());
            writeln!(out, "  - {} ({}) - {}", c.name(), c.kind(), player)?;
        }
    }
    Ok(())
}

pub fn round_header(out: &mut dyn Write, state: &GameState) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(
        out,
        "TURN {} - ROUND {}",
        state.turn_number(),
        state.round_number()
    )?;
    rule(out)
}

pub fn turn_start(out: &mut dyn Write, name: &str) -> io::Result<()> {
    writeln!(out, "\n{}'s turn...", name)
}

pub fn action(out: &mut dyn Write, description: &str) -> io::Result<()> {
    writeln!(out, "  {}", description)
}

/// Status after a completed round; `state` is already on the next round.
pub fn round_summary(out: &mut dyn Write, state: &GameState, field: &Battlefield) -> io::Result<()> {
    writeln!(
        out,
        "\n--- End of Round {} ---",
        state.round_number().saturating_sub(1)
    )?;
    for side in [TeamSide::One, TeamSide::Two] {
        writeln!(out, "\n{} Status:", side.label())?;
        for c in field.team(side) {
            if c.is_alive() {
                writeln!(
                    out,
                    "  {}: {}/{} HP",
                    c.name(),
                    c.stats().health,
                    c.stats().max_health
                )?;
            } else {
                writeln!(out, "  {}: DEFEATED", c.name())?;
            }
        }
    }
    Ok(())
}

pub fn final_result(
    out: &mut dyn Write,
    outcome: MatchOutcome,
    field: &Battlefield,
    state: &GameState,
) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "GAME OVER")?;
    rule(out)?;

    match outcome {
        MatchOutcome::Winner(side) => writeln!(out, "{} wins!", side.label())?,
        MatchOutcome::RoundLimit => writeln!(out, "No winner: round limit reached.")?,
    }

    writeln!(out, "\nFinal Status:")?;
    for side in [TeamSide::One, TeamSide::Two] {
        writeln!(out, "\n{}:", side.label())?;
        for c in field.team(side) {
            let status = if c.is_alive() { "Alive" } else { "Defeated" };
            writeln!(
                out,
                "  {} ({}): {} HP - {}",
                c.name(),
                c.kind(),
                c.display_health(),
                status
            )?;
        }
    }

    writeln!(out, "\nTotal turns played: {}", state.turn_number())?;
    writeln!(
        out,
        "Total commands executed: {}",
        state.command_history_size()
    )
}
