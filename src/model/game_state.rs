/// Read-only snapshot of match progress.
/// Every change produces a new value; the controller keeps the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    turn_number: u32,
    round_number: u32,
    can_undo: bool,
    command_history_size: usize,
}

impl GameState {
    pub fn initial() -> Self {
        Self {
            turn_number: 0,
            round_number: 1,
            can_undo: false,
            command_history_size: 0,
        }
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn can_undo(&self) -> bool {
        self.can_undo
    }

    pub fn command_history_size(&self) -> usize {
        self.command_history_size
    }

    #[must_use]
    pub fn next_turn(self) -> Self {
        Self {
            turn_number: self.turn_number + 1,
            ..self
        }
    }

    #[must_use]
    pub fn next_round(self) -> Self {
        Self {
            round_number: self.round_number + 1,
            ..self
        }
    }

    #[must_use]
    pub fn with_undo(self, can_undo: bool, command_history_size: usize) -> Self {
        Self {
            can_undo,
            command_history_size,
            ..self
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
