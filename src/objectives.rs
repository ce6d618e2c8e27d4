// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ObjectiveKind {
    // main word of three or more letters reads the same both ways
    Palindrome,
    // main word of seven or more letters
    LongWord,
    // two word-bonus squares covered by one placement
    TwoWordBonuses,
    // one placement forms three words or more
    ThreeCrossWords,
    // three scoring turns in a row
    ScoringStreak,
}

pub const ALL_OBJECTIVE_KINDS: [ObjectiveKind; 5] = [
    ObjectiveKind::Palindrome,
    ObjectiveKind::LongWord,
    ObjectiveKind::TwoWordBonuses,
    ObjectiveKind::ThreeCrossWords,
    ObjectiveKind::ScoringStreak,
];

const LONG_WORD_LEN: usize = 7;
const STREAK_LEN: u8 = 3;

impl ObjectiveKind {
    pub fn bonus(self) -> i32 {
        match self {
            ObjectiveKind::Palindrome => 20,
            ObjectiveKind::LongWord => 30,
            ObjectiveKind::TwoWordBonuses => 25,
            ObjectiveKind::ThreeCrossWords => 35,
            ObjectiveKind::ScoringStreak => 30,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ObjectiveKind::Palindrome => "play a palindrome of 3+ letters",
            ObjectiveKind::LongWord => "play a word of 7+ letters",
            ObjectiveKind::TwoWordBonuses => "cover two word bonuses in one turn",
            ObjectiveKind::ThreeCrossWords => "form three words in one turn",
            ObjectiveKind::ScoringStreak => "score on three turns in a row",
        }
    }

    fn is_met(self, turn: &TurnRecord, streak: u8) -> bool {
        match self {
            ObjectiveKind::Palindrome => {
                turn.main_word.len() >= 3 && turn.main_word.iter().eq(turn.main_word.iter().rev())
            }
            ObjectiveKind::LongWord => turn.main_word.len() >= LONG_WORD_LEN,
            ObjectiveKind::TwoWordBonuses => turn.num_word_bonuses >= 2,
            ObjectiveKind::ThreeCrossWords => turn.num_words >= 3,
            ObjectiveKind::ScoringStreak => streak >= STREAK_LEN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Objective {
    pub kind: ObjectiveKind,
    // None for a public objective.
    pub owner: Option<String>,
    pub completed_by: Option<String>,
}

impl Objective {
    #[inline(always)]
    pub fn is_public(&self) -> bool {
        self.owner.is_none()
    }

    fn is_open_to(&self, player: &str) -> bool {
        self.completed_by.is_none() && self.owner.as_deref().is_none_or(|owner| owner == player)
    }
}

// What one turn did, as far as objectives care. Letters are compared
// without regard to blanks.
pub struct TurnRecord<'a> {
    pub player: &'a str,
    // empty unless a word was placed
    pub main_word: &'a [u8],
    pub num_words: usize,
    pub num_word_bonuses: usize,
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub player: String,
    pub kind: ObjectiveKind,
    pub bonus: i32,
}

#[derive(Clone, Debug, Default)]
pub struct Objectives {
    objectives: Vec<Objective>,
    // (player, consecutive scoring turns)
    streaks: Vec<(String, u8)>,
}

impl Objectives {
    // Two shared objectives and one private objective per player, all distinct.
    pub fn generate(rng: &mut dyn RngCore, players: [&str; 2]) -> Self {
        let mut kinds = ALL_OBJECTIVE_KINDS;
        kinds.shuffle(rng);
        let objectives = vec![
            Objective {
                kind: kinds[0],
                owner: None,
                completed_by: None,
            },
            Objective {
                kind: kinds[1],
                owner: None,
                completed_by: None,
            },
            Objective {
                kind: kinds[2],
                owner: Some(players[0].into()),
                completed_by: None,
            },
            Objective {
                kind: kinds[3],
                owner: Some(players[1].into()),
                completed_by: None,
            },
        ];
        Self {
            objectives,
            streaks: players.iter().map(|&player| (player.into(), 0)).collect(),
        }
    }

    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, Objective> {
        self.objectives.iter()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    // Objectives the player can see: the public ones and their own.
    pub fn visible_to<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a Objective> + 'a {
        self.objectives
            .iter()
            .filter(move |objective| objective.owner.as_deref().is_none_or(|owner| owner == player))
    }

    fn streak_of(&mut self, player: &str) -> &mut u8 {
        let idx = match self.streaks.iter().position(|(name, _)| name == player) {
            Some(idx) => idx,
            None => {
                self.streaks.push((player.into(), 0));
                self.streaks.len() - 1
            }
        };
        &mut self.streaks[idx].1
    }

    // Call once per finished turn, whatever its outcome.
    pub fn record_turn(&mut self, turn: &TurnRecord) -> Vec<Completion> {
        let streak = {
            let streak = self.streak_of(turn.player);
            *streak = if turn.points > 0 {
                streak.saturating_add(1)
            } else {
                0
            };
            *streak
        };
        let mut completions = Vec::new();
        for objective in self.objectives.iter_mut() {
            if objective.is_open_to(turn.player) && objective.kind.is_met(turn, streak) {
                objective.completed_by = Some(turn.player.into());
                completions.push(Completion {
                    player: turn.player.into(),
                    kind: objective.kind,
                    bonus: objective.kind.bonus(),
                });
            }
        }
        completions
    }

    // Hands everything a departing player owned to whoever takes the seat.
    pub fn rebind(&mut self, from: &str, to: &str) {
        for objective in self.objectives.iter_mut() {
            if objective.owner.as_deref() == Some(from) {
                objective.owner = Some(to.into());
            }
            if objective.completed_by.as_deref() == Some(from) {
                objective.completed_by = Some(to.into());
            }
        }
        for (name, _) in self.streaks.iter_mut() {
            if name == from {
                *name = to.into();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha20Rng;

    fn scored<'a>(player: &'a str, main_word: &'a [u8], points: u32) -> TurnRecord<'a> {
        TurnRecord {
            player,
            main_word,
            num_words: 1,
            num_word_bonuses: 0,
            points,
        }
    }

    fn with_public(kind: ObjectiveKind) -> Objectives {
        Objectives {
            objectives: vec![Objective {
                kind,
                owner: None,
                completed_by: None,
            }],
            streaks: Vec::new(),
        }
    }

    #[test]
    fn generated_objectives_are_distinct() {
        let objectives = Objectives::generate(&mut ChaCha20Rng::seed_from_u64(7), ["ann", "bob"]);
        let kinds = objectives.iter().map(|o| o.kind).collect::<Vec<_>>();
        assert_eq!(kinds.len(), 4);
        for (i, kind) in kinds.iter().enumerate() {
            assert!(!kinds[i + 1..].contains(kind));
        }
        assert_eq!(objectives.iter().filter(|o| o.is_public()).count(), 2);
        assert_eq!(objectives.visible_to("ann").count(), 3);
        assert_eq!(objectives.visible_to("bob").count(), 3);
    }

    #[test]
    fn public_objectives_close_once_completed() {
        let mut objectives = with_public(ObjectiveKind::Palindrome);
        // "level"
        let level = [12, 5, 22, 5, 12];
        let completions = objectives.record_turn(&scored("ann", &level, 8));
        assert_eq!(
            completions,
            vec![Completion {
                player: "ann".into(),
                kind: ObjectiveKind::Palindrome,
                bonus: 20,
            }]
        );
        assert!(objectives.record_turn(&scored("bob", &level, 8)).is_empty());
    }

    #[test]
    fn streak_resets_on_a_scoreless_turn() {
        let mut objectives = with_public(ObjectiveKind::ScoringStreak);
        let cat = [3, 1, 20];
        assert!(objectives.record_turn(&scored("ann", &cat, 5)).is_empty());
        assert!(objectives.record_turn(&scored("ann", &cat, 5)).is_empty());
        assert!(objectives.record_turn(&scored("ann", &[], 0)).is_empty());
        assert!(objectives.record_turn(&scored("ann", &cat, 5)).is_empty());
        assert!(objectives.record_turn(&scored("ann", &cat, 5)).is_empty());
        assert_eq!(objectives.record_turn(&scored("ann", &cat, 5)).len(), 1);
    }

    #[test]
    fn private_objectives_follow_the_seat() {
        let mut objectives = Objectives {
            objectives: vec![Objective {
                kind: ObjectiveKind::LongWord,
                owner: Some("bob".into()),
                completed_by: None,
            }],
            streaks: Vec::new(),
        };
        let carabin = [3, 1, 18, 1, 2, 9, 14];
        assert!(objectives.record_turn(&scored("ann", &carabin, 78)).is_empty());
        objectives.rebind("bob", "virtual");
        assert_eq!(objectives.record_turn(&scored("virtual", &carabin, 78)).len(), 1);
    }
}
