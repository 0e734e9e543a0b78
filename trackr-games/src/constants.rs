//! Centralized rule and balance constants for the TrackR mini-games.
//!
//! These values define the deterministic math for the four engines.
//! Keeping them together ensures gameplay can only be adjusted via code
//! changes reviewed in version control, rather than through external
//! JSON assets.

use chrono::NaiveDate;

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_COASTLE_WON: &str = "log.coastle.won";
pub(crate) const LOG_COASTLE_LOST: &str = "log.coastle.lost";
pub(crate) const LOG_HL_GAME_OVER: &str = "log.higher-lower.game-over";
pub(crate) const LOG_HL_NEW_HIGH_SCORE: &str = "log.higher-lower.new-high-score";

// Coastle tuning -----------------------------------------------------------
/// Maximum guesses before a Coastle session is lost.
pub const MAX_GUESSES: usize = 6;
/// Number of attributes compared per guess.
pub const ATTRIBUTE_COUNT: usize = 9;
/// Day zero for the daily puzzle rotation.
pub(crate) const DAILY_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("epoch date is valid"),
};

// Higher/Lower tuning --------------------------------------------------------
/// Base points granted per correct guess before the streak multiplier.
pub(crate) const HL_BASE_POINTS: u32 = 100;
/// Streak divisor in the multiplier `1 + streak / HL_STREAK_DIVISOR`.
pub(crate) const HL_STREAK_DIVISOR: u32 = 10;
/// Entity ids remembered to avoid immediate repeats.
pub(crate) const HL_RECENT_WINDOW: usize = 10;

// Trivia tuning --------------------------------------------------------------
/// Questions per quiz session.
pub const QUESTIONS_PER_GAME: usize = 5;
/// Per-question countdown ceiling in seconds.
pub const QUESTION_TIME_LIMIT: f32 = 10.0;

// Battle tuning --------------------------------------------------------------
/// Cards per deck and rounds per battle.
pub const DECK_SIZE: usize = 3;
/// Inclusive cap applied after every perk adjustment.
pub(crate) const STAT_CAP: u8 = 10;
/// Finale-surge (GCI) intensity bonus in the last round.
pub(crate) const FINALE_SURGE_BONUS: i8 = 2;
/// Leader-amplify (Vekoma) bonus when already strictly ahead.
pub(crate) const LEADER_AMPLIFY_BONUS: i8 = 1;

// Battle rewards, keyed by overall winner ------------------------------------
pub(crate) const REWARD_WIN: (u32, u32) = (100, 50);
pub(crate) const REWARD_TIE: (u32, u32) = (50, 25);
pub(crate) const REWARD_LOSS: (u32, u32) = (25, 10);
