//! Higher/Lower: rotating-stat streak comparison engine.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::SessionError;
use crate::constants::{
    HL_BASE_POINTS, HL_RECENT_WINDOW, HL_STREAK_DIVISOR, LOG_HL_GAME_OVER, LOG_HL_NEW_HIGH_SCORE,
};
use crate::data::{Coaster, CoasterTable};

/// The stat under comparison. Rotates one step per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HlStat {
    Height,
    Speed,
    Inversions,
    Year,
}

impl HlStat {
    /// Fixed rotation order.
    pub const ROTATION: [Self; 4] = [Self::Height, Self::Speed, Self::Inversions, Self::Year];

    /// Next stat in the rotation.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Height => Self::Speed,
            Self::Speed => Self::Inversions,
            Self::Inversions => Self::Year,
            Self::Year => Self::Height,
        }
    }

    /// Value of this stat for a coaster.
    #[must_use]
    pub const fn value(self, coaster: &Coaster) -> u32 {
        match self {
            Self::Height => coaster.height_m as u32,
            Self::Speed => coaster.speed_kmh as u32,
            Self::Inversions => coaster.inversions as u32,
            Self::Year => coaster.year as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Higher,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessOutcome {
    Correct,
    Incorrect,
}

/// One Higher/Lower run. The caller owns the session and drives the
/// two-phase guess/continue cycle; the reveal window between the phases is
/// a UI concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HigherLowerSession {
    pub left: Coaster,
    pub right: Coaster,
    pub stat: HlStat,
    pub streak: u32,
    pub score: u32,
    pub high_score: u32,
    /// Set after a guess resolves; cleared when the next round starts.
    pub revealed: bool,
    pub game_over: bool,
    pub last_result: Option<GuessOutcome>,
    /// Recently shown coaster ids, excluded from the next draw.
    pub recently_used: SmallVec<[u32; HL_RECENT_WINDOW]>,
    #[serde(default)]
    pub logs: Vec<String>,
}

impl HigherLowerSession {
    /// Start a new run with two distinct coasters.
    ///
    /// # Errors
    ///
    /// Returns an error when the table has fewer than two coasters.
    pub fn new(table: &CoasterTable, rng: &mut impl Rng) -> Result<Self, SessionError> {
        Self::with_high_score(table, rng, 0)
    }

    fn with_high_score(
        table: &CoasterTable,
        rng: &mut impl Rng,
        high_score: u32,
    ) -> Result<Self, SessionError> {
        if table.len() < 2 {
            return Err(SessionError::NotEnoughCoasters {
                needed: 2,
                available: table.len(),
            });
        }
        let left = table.coasters[rng.gen_range(0..table.len())].clone();
        let right = draw_coaster(table, &[], left.id, rng);
        let mut recently_used = SmallVec::new();
        recently_used.push(left.id);
        recently_used.push(right.id);
        Ok(Self {
            left,
            right,
            stat: HlStat::ROTATION[0],
            streak: 0,
            score: 0,
            high_score,
            revealed: false,
            game_over: false,
            last_result: None,
            recently_used,
            logs: Vec::new(),
        })
    }

    /// Resolve a guess against the hidden right-hand value. Equal values
    /// satisfy both directions by design. Returns `None` when the session
    /// is terminal or a reveal is already pending.
    pub fn process_guess(&mut self, direction: Direction) -> Option<GuessOutcome> {
        if self.game_over || self.revealed {
            return None;
        }
        let left_value = self.stat.value(&self.left);
        let right_value = self.stat.value(&self.right);
        let correct = match direction {
            Direction::Higher => right_value >= left_value,
            Direction::Lower => right_value <= left_value,
        };
        self.revealed = true;
        let outcome = if correct {
            // Multiplier uses the streak value from before this guess.
            self.score += HL_BASE_POINTS + (HL_BASE_POINTS / HL_STREAK_DIVISOR) * self.streak;
            self.streak += 1;
            GuessOutcome::Correct
        } else {
            self.game_over = true;
            self.logs.push(String::from(LOG_HL_GAME_OVER));
            if self.score > self.high_score {
                self.high_score = self.score;
                self.logs.push(String::from(LOG_HL_NEW_HIGH_SCORE));
            }
            GuessOutcome::Incorrect
        };
        self.last_result = Some(outcome);
        Some(outcome)
    }

    /// Advance past a correct reveal: the right coaster becomes the new
    /// left, a fresh right is drawn avoiding the recent window, and the
    /// stat rotates. No-op unless a correct reveal is pending.
    pub fn continue_round(&mut self, table: &CoasterTable, rng: &mut impl Rng) {
        if self.game_over || !self.revealed {
            return;
        }
        let new_left = self.right.clone();
        self.remember(new_left.id);
        self.right = draw_coaster(table, &self.recently_used, new_left.id, rng);
        self.remember(self.right.id);
        self.left = new_left;
        self.stat = self.stat.next();
        self.revealed = false;
    }

    /// Start over, carrying the high score into the fresh session.
    ///
    /// # Errors
    ///
    /// Returns an error when the table has fewer than two coasters.
    pub fn reset(&self, table: &CoasterTable, rng: &mut impl Rng) -> Result<Self, SessionError> {
        Self::with_high_score(table, rng, self.high_score)
    }

    fn remember(&mut self, id: u32) {
        if self.recently_used.contains(&id) {
            return;
        }
        if self.recently_used.len() == HL_RECENT_WINDOW {
            self.recently_used.remove(0);
        }
        self.recently_used.push(id);
    }
}

/// Uniform draw excluding the recent window and the anchor coaster. When
/// the window swallows the whole table, only the anchor stays excluded.
fn draw_coaster(
    table: &CoasterTable,
    recent: &[u32],
    anchor_id: u32,
    rng: &mut impl Rng,
) -> Coaster {
    let pool: Vec<&Coaster> = table
        .coasters
        .iter()
        .filter(|c| c.id != anchor_id && !recent.contains(&c.id))
        .collect();
    if let Some(pick) = pool.choose(rng) {
        return (*pick).clone();
    }
    let fallback: Vec<&Coaster> = table
        .coasters
        .iter()
        .filter(|c| c.id != anchor_id)
        .collect();
    fallback
        .choose(rng)
        .map_or_else(|| table.coasters[0].clone(), |pick| (*pick).clone())
}
