use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::model::character::Character;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    One,
    Two,
}

impl TeamSide {
    pub fn opponent(self) -> TeamSide {
        match self {
            TeamSide::One => TeamSide::Two,
            TeamSide::Two => TeamSide::One,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamSide::One => "Team 1",
            TeamSide::Two => "Team 2",
        }
    }
}

/// Stable handle to a character: its team and position in that team's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterId {
    pub side: TeamSide,
    pub index: usize,
}

impl CharacterId {
    pub fn new(side: TeamSide, index: usize) -> Self {
        Self { side, index }
    }
}

/// A character borrowed together with its id, as handed to players.
#[derive(Debug, Clone, Copy)]
pub struct Combatant<'a> {
    pub id: CharacterId,
    pub character: &'a Character,
}

impl Deref for Combatant<'_> {
    type Target = Character;

    fn deref(&self) -> &Character {
        self.character
    }
}

/// Owns both teams for the duration of a match.
#[derive(Debug)]
pub struct Battlefield {
    team1: Vec<Character>,
    team2: Vec<Character>,
}

impl Battlefield {
    pub fn new(team1: Vec<Character>, team2: Vec<Character>) -> Self {
        Self { team1, team2 }
    }

    pub fn team(&self, side: TeamSide) -> &[Character] {
        match side {
            TeamSide::One => &self.team1,
            TeamSide::Two => &self.team2,
        }
    }

    fn team_mut(&mut self, side: TeamSide) -> &mut Vec<Character> {
        match side {
            TeamSide::One => &mut self.team1,
            TeamSide::Two => &mut self.team2,
        }
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.team(id.side).get(id.index)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.team_mut(id.side).get_mut(id.index)
    }

    pub fn combatant(&self, id: CharacterId) -> Option<Combatant<'_>> {
        self.get(id).map(|character| Combatant { id, character })
    }

    /// All members of a team, in list order, dead or alive.
    pub fn combatants(&self, side: TeamSide) -> Vec<Combatant<'_>> {
        self.team(side)
            .iter()
            .enumerate()
            .map(|(index, character)| Combatant {
                id: CharacterId::new(side, index),
                character,
            })
            .collect()
    }

    /// Living members of a team, in list order.
    pub fn living(&self, side: TeamSide) -> Vec<Combatant<'_>> {
        self.combatants(side)
            .into_iter()
            .filter(|c| c.is_alive())
            .collect()
    }

    pub fn has_living(&self, side: TeamSide) -> bool {
        self.team(side).iter().any(Character::is_alive)
    }

    pub fn ids(&self, side: TeamSide) -> impl Iterator<Item = CharacterId> {
        (0..self.team(side).len()).map(move |index| CharacterId::new(side, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::factory::CharacterFactory;

    #[test]
    fn living_skips_the_fallen_and_keeps_order() {
        let mut field = Battlefield::new(
            vec![
                CharacterFactory::create_archer("A"),
                CharacterFactory::create_rogue("B"),
                CharacterFactory::create_mage("C"),
            ],
            vec![CharacterFactory::create_warrior("D")],
        );

        if let Some(rogue) = field.get_mut(CharacterId::new(TeamSide::One, 1)) {
            rogue.take_damage(10_000);
        }

        let names: Vec<&str> = field
            .living(TeamSide::One)
            .iter()
            .map(|c| c.character.name())
            .collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(field.living(TeamSide::One)[1].id.index, 2);
        assert!(field.has_living(TeamSide::Two));
    }

    #[test]
    fn opponent_flips_sides() {
        assert_eq!(TeamSide::One.opponent(), TeamSide::Two);
        assert_eq!(TeamSide::Two.opponent(), TeamSide::One);
    }
}
