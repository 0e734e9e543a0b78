//! Daily-challenge streak bookkeeping shared by Coastle and Trivia.
//!
//! The current date is always injected by the caller; the engine never
//! reads a wall clock, so day-boundary behavior is fully testable.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Games whose daily challenges feed the streak. Other games do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeGame {
    Coastle,
    Trivia,
}

/// Date-keyed streak state, evaluated once per first-completion-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakData {
    pub current_streak: u32,
    pub last_played: Option<NaiveDate>,
    pub coastle_done: bool,
    pub trivia_done: bool,
}

impl StreakData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when at least one challenge was completed on the tracked day.
    #[must_use]
    pub const fn any_done(&self) -> bool {
        self.coastle_done || self.trivia_done
    }

    /// Record a challenge completion for the injected `today`.
    ///
    /// Same day: mark the flag only. Exactly one day later: the streak
    /// continues (increments) when the prior day had a completion, else it
    /// resets, and the day rolls over. Any larger gap resets to zero. The
    /// streak is never decremented except to zero.
    pub fn complete_challenge(&mut self, game: ChallengeGame, today: NaiveDate) {
        match self.last_played {
            Some(last) if last == today => {
                self.mark(game);
            }
            Some(last) if Some(last) == today.pred_opt() => {
                if self.any_done() {
                    self.current_streak += 1;
                } else {
                    self.current_streak = 0;
                }
                self.roll_over(game, today);
            }
            Some(_) | None => {
                self.current_streak = 0;
                self.roll_over(game, today);
            }
        }
    }

    fn roll_over(&mut self, game: ChallengeGame, today: NaiveDate) {
        self.coastle_done = false;
        self.trivia_done = false;
        self.last_played = Some(today);
        self.mark(game);
    }

    fn mark(&mut self, game: ChallengeGame) {
        match game {
            ChallengeGame::Coastle => self.coastle_done = true,
            ChallengeGame::Trivia => self.trivia_done = true,
        }
    }
}
