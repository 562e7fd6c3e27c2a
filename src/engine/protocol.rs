use crate::model::battlefield::TeamSide;

/// Where the controller is in its turn loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    NotStarted,
    InRound,
    TeamOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(TeamSide),
    /// The round cap was hit with both teams still standing.
    RoundLimit,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<TeamSide> {
        match self {
            MatchOutcome::Winner(side) => Some(side),
            MatchOutcome::RoundLimit => None,
        }
    }
}
