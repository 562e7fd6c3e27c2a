use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use log::{error, info, warn};

use crate::console::render;
use crate::engine::invoker::CommandInvoker;
use crate::engine::player::Player;
use crate::engine::protocol::{MatchOutcome, MatchPhase};
use crate::model::battlefield::{Battlefield, CharacterId, TeamSide};
use crate::model::game_state::GameState;

/// Runs the turn loop: Team 1's living members in order, then Team 2's,
/// until one side has nobody left standing.
pub struct GameController {
    field: Battlefield,
    players: HashMap<CharacterId, Box<dyn Player>>,
    invoker: CommandInvoker,
    state: GameState,
    phase: MatchPhase,
    max_rounds: Option<u32>,
}

impl GameController {
    pub fn new(field: Battlefield, players: HashMap<CharacterId, Box<dyn Player>>) -> Self {
        Self {
            field,
            players,
            invoker: CommandInvoker::new(),
            state: GameState::initial(),
            phase: MatchPhase::NotStarted,
            max_rounds: None,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn field(&self) -> &Battlefield {
        &self.field
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn invoker(&self) -> &CommandInvoker {
        &self.invoker
    }

    /// Plays the match to completion, narrating to `out`.
    pub fn play_game(&mut self, out: &mut dyn Write) -> Result<MatchOutcome> {
        render::team_setup(out, &self.field, &self.players)?;
        self.phase = MatchPhase::InRound;

        'rounds: while !self.is_game_over() {
            if let Some(limit) = self.max_rounds {
                if self.state.round_number() > limit {
                    warn!("round limit of {} reached with both teams standing", limit);
                    break;
                }
            }

            render::round_header(out, &self.state)?;

            for side in [TeamSide::One, TeamSide::Two] {
                let ids: Vec<CharacterId> = self.field.ids(side).collect();
                for id in ids {
                    if !self.is_alive(id) {
                        continue;
                    }
                    self.process_turn(id, out)?;
                    if self.is_game_over() {
                        break 'rounds;
                    }
                }
            }

            self.state = self.state.next_round();
            render::round_summary(out, &self.state, &self.field)?;
        }

        self.phase = MatchPhase::TeamOver;
        let outcome = self.outcome();
        info!(
            "match finished after {} turns: {:?}",
            self.state.turn_number(),
            outcome
        );
        Ok(outcome)
    }

    pub fn display_result(&self, out: &mut dyn Write, outcome: MatchOutcome) -> Result<()> {
        render::final_result(out, outcome, &self.field, &self.state)?;
        Ok(())
    }

    /// Undoes up to `steps` commands and refreshes the snapshot.
    pub fn undo_last(&mut self, steps: usize) -> Result<usize> {
        let undone = self.invoker.undo_last(steps, &mut self.field)?;
        self.state = self
            .state
            .with_undo(self.invoker.can_undo(), self.invoker.len());
        if self.is_game_over() {
            self.phase = MatchPhase::TeamOver;
        } else if undone > 0 {
            self.phase = MatchPhase::InRound;
        }
        Ok(undone)
    }

    pub fn is_game_over(&self) -> bool {
        !self.field.has_living(TeamSide::One) || !self.field.has_living(TeamSide::Two)
    }

    /// Team 1 is checked first, so it is reported if both sides fell together.
    pub fn outcome(&self) -> MatchOutcome {
        let team1 = self.field.has_living(TeamSide::One);
        let team2 = self.field.has_living(TeamSide::Two);
        match (team1, team2) {
            (true, true) => MatchOutcome::RoundLimit,
            (true, false) => MatchOutcome::Winner(TeamSide::One),
            (false, true) => MatchOutcome::Winner(TeamSide::Two),
            (false, false) => MatchOutcome::Winner(TeamSide::One),
        }
    }

    fn is_alive(&self, id: CharacterId) -> bool {
        self.field.get(id).is_some_and(|c| c.is_alive())
    }

    fn process_turn(&mut self, id: CharacterId, out: &mut dyn Write) -> Result<()> {
        let Some(me) = self.field.combatant(id) else {
            return Ok(());
        };
        let name = me.name().to_string();
        render::turn_start(out, &name)?;

        let Some(player) = self.players.get_mut(&id) else {
            error!("No player found for {}", name);
            return Ok(());
        };

        let allies = self.field.living(id.side);
        let enemies = self.field.living(id.side.opponent());
        let Some(command) = player.decide_action(me, &allies, &enemies, &self.state) else {
            error!("Player for {} returned no command", name);
            return Ok(());
        };

        match self.invoker.execute(command, &mut self.field) {
            Ok(executed) => render::action(out, &executed.description())?,
            Err(err) => {
                error!("Command for {} failed: {:#}", name, err);
                return Ok(());
            }
        }

        self.state = self
            .state
            .next_turn()
            .with_undo(true, self.invoker.len());
        Ok(())
    }
}
