//! Trivia quiz: time-and-difficulty-weighted scoring and progression.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::SessionError;
use crate::constants::{QUESTION_TIME_LIMIT, QUESTIONS_PER_GAME};
use crate::data::raw;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Base point value before the time bonus.
    #[must_use]
    pub const fn base_points(self) -> u32 {
        match self {
            Self::Easy => 500,
            Self::Medium => 750,
            Self::Hard => 1000,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Difficulty ramp for one quiz, in question order.
pub const DIFFICULTY_SEQUENCE: [Difficulty; QUESTIONS_PER_GAME] = [
    Difficulty::Easy,
    Difficulty::Easy,
    Difficulty::Medium,
    Difficulty::Hard,
    Difficulty::Hard,
];

/// A static quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub id: u32,
    pub prompt: String,
    pub options: [String; 4],
    pub correct_index: u8,
    pub difficulty: Difficulty,
    pub category: String,
    pub explanation: String,
}

/// Container for the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuestionBank {
    pub questions: Vec<TriviaQuestion>,
}

impl QuestionBank {
    /// Create an empty bank (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            questions: Vec::new(),
        }
    }

    /// Load the question bank from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid questions.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the built-in bank embedded in the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(raw::QUESTIONS).unwrap_or_else(|_| Self::empty())
    }
}

/// Points for one answer. Instant answers double the difficulty base;
/// last-instant answers earn roughly the base. Wrong answers earn nothing
/// regardless of time.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn calculate_points(is_correct: bool, time_remaining: f32, difficulty: Difficulty) -> u32 {
    if !is_correct {
        return 0;
    }
    let remaining = f64::from(time_remaining.clamp(0.0, QUESTION_TIME_LIMIT));
    let base = f64::from(difficulty.base_points());
    let points = base + base * (remaining / f64::from(QUESTION_TIME_LIMIT));
    points.round() as u32
}

/// One recorded answer. Timeouts record a selected index of -1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriviaAnswer {
    pub question_id: u32,
    pub selected_index: i8,
    pub is_correct: bool,
    pub time_remaining: f32,
    pub points: u32,
}

/// One quiz play-through over exactly [`QUESTIONS_PER_GAME`] questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriviaSession {
    pub questions: Vec<TriviaQuestion>,
    pub current_index: usize,
    pub score: u32,
    pub answers: Vec<TriviaAnswer>,
}

impl TriviaSession {
    /// Draw a fresh quiz following the difficulty ramp, without repeats.
    ///
    /// # Errors
    ///
    /// Returns an error when a difficulty bucket runs out of unused
    /// questions mid-draw.
    pub fn new(bank: &QuestionBank, rng: &mut impl Rng) -> Result<Self, SessionError> {
        let mut used: Vec<u32> = Vec::with_capacity(QUESTIONS_PER_GAME);
        let mut questions = Vec::with_capacity(QUESTIONS_PER_GAME);
        for difficulty in DIFFICULTY_SEQUENCE {
            let pool: Vec<&TriviaQuestion> = bank
                .questions
                .iter()
                .filter(|q| q.difficulty == difficulty && !used.contains(&q.id))
                .collect();
            let Some(pick) = pool.choose(rng) else {
                return Err(SessionError::ExhaustedDifficulty(difficulty));
            };
            used.push(pick.id);
            questions.push((*pick).clone());
        }
        Ok(Self {
            questions,
            current_index: 0,
            score: 0,
            answers: Vec::new(),
        })
    }

    /// The question awaiting an answer, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&TriviaQuestion> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_index >= QUESTIONS_PER_GAME
    }

    /// Record an answer (or a timeout when `selected` is `None`) and
    /// advance. Always appends exactly one answer while the quiz is live;
    /// a no-op returning `None` once complete.
    pub fn process_answer(
        &mut self,
        selected: Option<u8>,
        time_remaining: f32,
    ) -> Option<&TriviaAnswer> {
        let question = self.questions.get(self.current_index)?;
        let is_correct = selected == Some(question.correct_index);
        let points = calculate_points(is_correct, time_remaining, question.difficulty);
        let answer = TriviaAnswer {
            question_id: question.id,
            selected_index: selected.map_or(-1, |i| i8::try_from(i).unwrap_or(-1)),
            is_correct,
            time_remaining,
            points,
        };
        self.score += points;
        self.answers.push(answer);
        self.current_index += 1;
        self.answers.last()
    }

    /// Number of correctly answered questions so far.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }
}

/// Rank label keyed by score-per-question thresholds.
#[must_use]
pub fn rank_for_score(score: u32) -> &'static str {
    let per_question = score / u32::try_from(QUESTIONS_PER_GAME).unwrap_or(1);
    match per_question {
        1500.. => "Coaster Legend",
        1000..=1499 => "Ride Warrior",
        600..=999 => "Park Regular",
        300..=599 => "Queue Hopper",
        _ => "First Rider",
    }
}

/// Post-game flavor line keyed by correct-answer count.
#[must_use]
pub const fn performance_message(correct: usize) -> &'static str {
    match correct {
        5 => "Flawless run. You know your coasters!",
        4 => "So close! One hill short of a perfect ride.",
        3 => "Solid track record.",
        2 => "Time to rewatch some POVs.",
        1 => "The brake run came early.",
        _ => "Everyone valleys sometimes.",
    }
}
