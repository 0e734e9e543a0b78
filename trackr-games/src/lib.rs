//! TrackR Games Engine
//!
//! Platform-agnostic rule engines for the TrackR mini-games: Coastle (the
//! daily guess-the-coaster game), the trading-card stat battler,
//! Higher/Lower, the trivia quiz, and the shared daily-challenge streak
//! bookkeeping. This crate provides all game rules without UI or
//! platform-specific dependencies; sessions are owned by the caller and
//! all randomness and dates are injected.

use chrono::NaiveDate;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

pub mod battle;
pub mod cards;
pub mod coastle;
pub mod constants;
pub mod data;
pub mod higher_lower;
pub mod streak;
pub mod trivia;

// Re-export commonly used types
pub use battle::{
    BattleError, BattleRound, BattleSession, BattleWinner, ROUND_STATS, Reward,
    generate_opponent_deck, overall_winner, play_battle, resolve_round, reward_for, select_deck,
};
pub use cards::{BattleStat, CardStats, CardTable, CoasterCard, Perk, Rarity};
pub use coastle::{
    ATTRIBUTE_LAYOUT, Attribute, CoastleMode, CoastleSession, CoastleStatus, Feedback,
    FeedbackRow, GridFeedback, Guess, compare, daily_index, is_won,
};
pub use constants::{ATTRIBUTE_COUNT, DECK_SIZE, MAX_GUESSES, QUESTION_TIME_LIMIT, QUESTIONS_PER_GAME};
pub use data::{Coaster, CoasterTable};
pub use higher_lower::{Direction, GuessOutcome, HigherLowerSession, HlStat};
pub use streak::{ChallengeGame, StreakData};
pub use trivia::{
    DIFFICULTY_SEQUENCE, Difficulty, QuestionBank, TriviaAnswer, TriviaQuestion, TriviaSession,
    calculate_points, performance_message, rank_for_score,
};

/// Session construction failures caused by deficient reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("coaster table is empty")]
    EmptyTable,
    #[error("need at least {needed} coasters, table has {available}")]
    NotEnoughCoasters { needed: usize, available: usize },
    #[error("question bank ran out of unused {0} questions")]
    ExhaustedDifficulty(Difficulty),
}

/// Trait for abstracting reference-table loading.
/// Platform-specific implementations should provide this.
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the coaster reference table.
    ///
    /// # Errors
    ///
    /// Returns an error if the coaster table cannot be loaded.
    fn load_coasters(&self) -> Result<CoasterTable, Self::Error>;

    /// Load the card collection table.
    ///
    /// # Errors
    ///
    /// Returns an error if the card table cannot be loaded.
    fn load_cards(&self) -> Result<CardTable, Self::Error>;

    /// Load the trivia question bank.
    ///
    /// # Errors
    ///
    /// Returns an error if the question bank cannot be loaded.
    fn load_questions(&self) -> Result<QuestionBank, Self::Error>;
}

/// Loader over the mock JSON tables embedded in the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLoader;

impl DataLoader for StaticLoader {
    type Error = serde_json::Error;

    fn load_coasters(&self) -> Result<CoasterTable, Self::Error> {
        CoasterTable::from_json(data::raw::COASTERS)
    }

    fn load_cards(&self) -> Result<CardTable, Self::Error> {
        CardTable::from_json(data::raw::CARDS)
    }

    fn load_questions(&self) -> Result<QuestionBank, Self::Error> {
        QuestionBank::from_json(data::raw::QUESTIONS)
    }
}

/// Deterministic session-scoped RNG for callers without a preferred source.
#[must_use]
pub fn session_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Facade for constructing game sessions from loaded reference tables.
pub struct GamesEngine<L>
where
    L: DataLoader,
{
    loader: L,
}

impl<L> GamesEngine<L>
where
    L: DataLoader,
{
    /// Create an engine with the provided data loader.
    pub const fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Start the deterministic daily Coastle puzzle for a calendar date.
    ///
    /// # Errors
    ///
    /// Returns an error if the coaster table cannot be loaded or is empty.
    pub fn daily_coastle(&self, date: NaiveDate) -> Result<CoastleSession, anyhow::Error> {
        let table = self.loader.load_coasters()?;
        Ok(CoastleSession::daily(&table, date)?)
    }

    /// Start a free-play Coastle session with a random target.
    ///
    /// # Errors
    ///
    /// Returns an error if the coaster table cannot be loaded or is empty.
    pub fn random_coastle(&self, rng: &mut impl Rng) -> Result<CoastleSession, anyhow::Error> {
        let table = self.loader.load_coasters()?;
        Ok(CoastleSession::random(&table, rng)?)
    }

    /// Start a Higher/Lower run.
    ///
    /// # Errors
    ///
    /// Returns an error if the coaster table cannot be loaded or holds
    /// fewer than two entries.
    pub fn higher_lower(&self, rng: &mut impl Rng) -> Result<HigherLowerSession, anyhow::Error> {
        let table = self.loader.load_coasters()?;
        Ok(HigherLowerSession::new(&table, rng)?)
    }

    /// Start a trivia quiz.
    ///
    /// # Errors
    ///
    /// Returns an error if the question bank cannot be loaded or lacks a
    /// difficulty bucket.
    pub fn trivia(&self, rng: &mut impl Rng) -> Result<TriviaSession, anyhow::Error> {
        let bank = self.loader.load_questions()?;
        Ok(TriviaSession::new(&bank, rng)?)
    }

    /// Validate the player's deck, draw an opponent deck, and resolve the
    /// battle.
    ///
    /// # Errors
    ///
    /// Returns an error if the card table cannot be loaded, the selected
    /// ids are not a valid deck, or too few opponent cards are eligible.
    pub fn battle(
        &self,
        deck_ids: &[u32],
        rng: &mut impl Rng,
    ) -> Result<BattleSession, anyhow::Error> {
        let table = self.loader.load_cards()?;
        let player_deck = select_deck(&table, deck_ids)?;
        let deck_ids: Vec<u32> = player_deck.iter().map(|c| c.id).collect();
        let opponent_deck = generate_opponent_deck(&table, &deck_ids, rng)?;
        Ok(play_battle(&player_deck, &opponent_deck))
    }
}
