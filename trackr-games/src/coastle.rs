//! Coastle: daily guess-the-coaster comparison and feedback engine.
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::SessionError;
use crate::constants::{
    ATTRIBUTE_COUNT, DAILY_EPOCH, LOG_COASTLE_LOST, LOG_COASTLE_WON, MAX_GUESSES,
};
use crate::data::{Coaster, CoasterTable};

/// The fixed, ordered attribute layout compared on every guess: three
/// numeric rows, a mixed row, then the remaining categoricals.
pub const ATTRIBUTE_LAYOUT: [Attribute; ATTRIBUTE_COUNT] = [
    Attribute::Height,
    Attribute::Speed,
    Attribute::Length,
    Attribute::Year,
    Attribute::Inversions,
    Attribute::Country,
    Attribute::Manufacturer,
    Attribute::CoasterType,
    Attribute::Park,
];

/// One compared attribute of a coaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Height,
    Speed,
    Length,
    Year,
    Inversions,
    Country,
    Manufacturer,
    CoasterType,
    Park,
}

enum AttrValue<'a> {
    Numeric(i64),
    Text(&'a str),
}

impl Attribute {
    fn value(self, coaster: &Coaster) -> AttrValue<'_> {
        match self {
            Self::Height => AttrValue::Numeric(i64::from(coaster.height_m)),
            Self::Speed => AttrValue::Numeric(i64::from(coaster.speed_kmh)),
            Self::Length => AttrValue::Numeric(i64::from(coaster.length_m)),
            Self::Year => AttrValue::Numeric(i64::from(coaster.year)),
            Self::Inversions => AttrValue::Numeric(i64::from(coaster.inversions)),
            Self::Country => AttrValue::Text(&coaster.country),
            Self::Manufacturer => AttrValue::Text(&coaster.manufacturer),
            Self::CoasterType => AttrValue::Text(&coaster.coaster_type),
            Self::Park => AttrValue::Text(&coaster.park),
        }
    }

    /// Value formatted for the feedback grid.
    #[must_use]
    pub fn display_value(self, coaster: &Coaster) -> String {
        match self {
            Self::Height => format!("{} m", coaster.height_m),
            Self::Speed => format!("{} km/h", coaster.speed_kmh),
            Self::Length => format!("{} m", coaster.length_m),
            Self::Year => coaster.year.to_string(),
            Self::Inversions => coaster.inversions.to_string(),
            Self::Country => coaster.country.clone(),
            Self::Manufacturer => coaster.manufacturer.clone(),
            Self::CoasterType => coaster.coaster_type.clone(),
            Self::Park => coaster.park.clone(),
        }
    }
}

/// Per-attribute feedback kind. Directional kinds only apply to numeric
/// attributes and point toward the target ("go higher").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Correct,
    Higher,
    Lower,
    Wrong,
}

impl Feedback {
    /// Share-grid glyph for this kind.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Correct => '\u{1F7E9}',             // green square
            Self::Higher | Self::Lower => '\u{1F7E8}', // yellow square
            Self::Wrong => '\u{2B1C}',                 // white square
        }
    }
}

/// Feedback for a single attribute of a single guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFeedback {
    pub attribute: Attribute,
    pub kind: Feedback,
    pub display_value: String,
}

/// One full feedback row, inline-allocated for the fixed layout.
pub type FeedbackRow = SmallVec<[GridFeedback; ATTRIBUTE_COUNT]>;

/// Compare a guessed coaster against the hidden target across the fixed
/// attribute layout.
#[must_use]
pub fn compare(guess: &Coaster, target: &Coaster) -> FeedbackRow {
    ATTRIBUTE_LAYOUT
        .iter()
        .map(|&attribute| {
            let kind = match (attribute.value(guess), attribute.value(target)) {
                (AttrValue::Numeric(g), AttrValue::Numeric(t)) => match g.cmp(&t) {
                    std::cmp::Ordering::Equal => Feedback::Correct,
                    std::cmp::Ordering::Less => Feedback::Higher,
                    std::cmp::Ordering::Greater => Feedback::Lower,
                },
                (AttrValue::Text(g), AttrValue::Text(t)) => {
                    if g == t {
                        Feedback::Correct
                    } else {
                        Feedback::Wrong
                    }
                }
                // The layout never mixes a numeric guess with a text target.
                (AttrValue::Numeric(_), AttrValue::Text(_))
                | (AttrValue::Text(_), AttrValue::Numeric(_)) => Feedback::Wrong,
            };
            GridFeedback {
                attribute,
                kind,
                display_value: attribute.display_value(guess),
            }
        })
        .collect()
}

/// True iff every entry in a full feedback row is `Correct`.
#[must_use]
pub fn is_won(feedback: &[GridFeedback]) -> bool {
    feedback.len() == ATTRIBUTE_COUNT && feedback.iter().all(|f| f.kind == Feedback::Correct)
}

/// A submitted guess plus the feedback it produced. Append-only per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub coaster_id: u32,
    pub name: String,
    pub feedback: FeedbackRow,
    /// Caller-supplied tick; the engine never reads a wall clock.
    pub submitted_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoastleStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoastleMode {
    Daily,
    Random,
}

/// One Coastle play-through. Owned by the caller; mutated only through
/// [`CoastleSession::submit_guess`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoastleSession {
    pub target: Coaster,
    pub guesses: Vec<Guess>,
    pub status: CoastleStatus,
    pub mode: CoastleMode,
    #[serde(default)]
    pub logs: Vec<String>,
}

impl CoastleSession {
    const fn from_target(target: Coaster, mode: CoastleMode) -> Self {
        Self {
            target,
            guesses: Vec::new(),
            status: CoastleStatus::InProgress,
            mode,
            logs: Vec::new(),
        }
    }

    /// Start the daily puzzle for a calendar date. The target is
    /// deterministic per day: whole days since the epoch, modulo the table.
    ///
    /// # Errors
    ///
    /// Returns an error when the coaster table is empty.
    pub fn daily(table: &CoasterTable, date: NaiveDate) -> Result<Self, SessionError> {
        if table.is_empty() {
            return Err(SessionError::EmptyTable);
        }
        let target = table.coasters[daily_index(date, table.len())].clone();
        Ok(Self::from_target(target, CoastleMode::Daily))
    }

    /// Start a free-play session with a uniformly drawn target.
    ///
    /// # Errors
    ///
    /// Returns an error when the coaster table is empty.
    pub fn random(table: &CoasterTable, rng: &mut impl Rng) -> Result<Self, SessionError> {
        if table.is_empty() {
            return Err(SessionError::EmptyTable);
        }
        let target = table.coasters[rng.gen_range(0..table.len())].clone();
        Ok(Self::from_target(target, CoastleMode::Random))
    }

    /// Zero-based index of the next attempt.
    #[must_use]
    pub fn current_attempt(&self) -> usize {
        self.guesses.len()
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.guesses.len())
    }

    /// Hard-mode validation stub. Repeated and contradictory guesses are
    /// currently allowed; kept permissive until product intent changes.
    #[must_use]
    pub const fn is_valid_guess(&self, _guess: &Coaster) -> bool {
        true
    }

    /// Process one guess and return the resulting status. Guesses against a
    /// terminal session are a no-op.
    pub fn submit_guess(&mut self, guess: &Coaster, submitted_at: u64) -> CoastleStatus {
        if self.status != CoastleStatus::InProgress {
            return self.status;
        }
        let feedback = compare(guess, &self.target);
        let won = is_won(&feedback);
        self.guesses.push(Guess {
            coaster_id: guess.id,
            name: guess.name.clone(),
            feedback,
            submitted_at,
        });
        if won {
            self.status = CoastleStatus::Won;
            self.logs.push(String::from(LOG_COASTLE_WON));
        } else if self.guesses.len() >= MAX_GUESSES {
            self.status = CoastleStatus::Lost;
            self.logs.push(String::from(LOG_COASTLE_LOST));
        }
        self.status
    }

    /// Render the shareable result block: a header line, then each guess as
    /// a 3x3 glyph block in layout order. Reproducible bit-for-bit from the
    /// session alone.
    #[must_use]
    pub fn share_text(&self) -> String {
        let mut out = String::new();
        match self.status {
            CoastleStatus::Lost => out.push_str(&format!("Coastle X/{MAX_GUESSES}\n")),
            CoastleStatus::Won | CoastleStatus::InProgress => {
                out.push_str(&format!("Coastle {}/{MAX_GUESSES}\n", self.guesses.len()));
            }
        }
        for guess in &self.guesses {
            for (i, entry) in guess.feedback.iter().enumerate() {
                out.push(entry.kind.glyph());
                if i % 3 == 2 {
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// Deterministic daily target index: whole days elapsed since the epoch,
/// modulo the table length. Dates before the epoch wrap instead of going
/// negative.
#[must_use]
pub fn daily_index(date: NaiveDate, table_len: usize) -> usize {
    if table_len == 0 {
        return 0;
    }
    let days = date.signed_duration_since(DAILY_EPOCH).num_days();
    let len = i64::try_from(table_len).unwrap_or(i64::MAX);
    usize::try_from(days.rem_euclid(len)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn coaster(id: u32, name: &str) -> Coaster {
        Coaster {
            id,
            name: name.to_string(),
            park: "Cedar Point".to_string(),
            country: "USA".to_string(),
            manufacturer: "Intamin".to_string(),
            coaster_type: "Steel".to_string(),
            height_m: 94,
            speed_kmh: 150,
            length_m: 2010,
            year: 2000,
            inversions: 0,
        }
    }

    fn table() -> CoasterTable {
        CoasterTable::load_from_static()
    }

    #[test]
    fn numeric_comparison_points_toward_target() {
        let mut guess = coaster(1, "Guess");
        let target = coaster(2, "Target");
        guess.height_m = 50; // below target's 94 -> "go higher"
        guess.speed_kmh = 200; // above target's 150 -> "go lower"
        let feedback = compare(&guess, &target);
        assert_eq!(feedback[0].kind, Feedback::Higher);
        assert_eq!(feedback[1].kind, Feedback::Lower);
        assert_eq!(feedback[2].kind, Feedback::Correct);
    }

    #[test]
    fn categorical_comparison_has_no_direction() {
        let mut guess = coaster(1, "Guess");
        let target = coaster(2, "Target");
        guess.country = "UK".to_string();
        let feedback = compare(&guess, &target);
        assert_eq!(feedback[5].kind, Feedback::Wrong);
        assert_eq!(feedback[6].kind, Feedback::Correct);
    }

    #[test]
    fn exact_guess_is_all_correct_and_wins() {
        let target = coaster(2, "Target");
        let feedback = compare(&target, &target);
        assert!(is_won(&feedback));

        let mut session = CoastleSession::from_target(target.clone(), CoastleMode::Random);
        assert_eq!(session.submit_guess(&target, 1), CoastleStatus::Won);
        assert_eq!(session.guesses.len(), 1);
    }

    #[test]
    fn six_misses_lose_the_session() {
        let target = coaster(2, "Target");
        let mut wrong = coaster(1, "Wrong");
        wrong.height_m = 1;
        let mut session = CoastleSession::from_target(target, CoastleMode::Daily);
        for attempt in 0..MAX_GUESSES - 1 {
            assert_eq!(session.submit_guess(&wrong, 0), CoastleStatus::InProgress);
            assert_eq!(session.current_attempt(), attempt + 1);
        }
        assert_eq!(session.submit_guess(&wrong, 0), CoastleStatus::Lost);
        assert_eq!(session.attempts_remaining(), 0);
    }

    #[test]
    fn terminal_session_ignores_further_guesses() {
        let target = coaster(2, "Target");
        let mut session = CoastleSession::from_target(target.clone(), CoastleMode::Random);
        session.submit_guess(&target, 0);
        assert_eq!(session.status, CoastleStatus::Won);
        assert_eq!(session.submit_guess(&target, 1), CoastleStatus::Won);
        assert_eq!(session.guesses.len(), 1);
    }

    #[test]
    fn repeated_guesses_are_permitted() {
        let target = coaster(2, "Target");
        let mut wrong = coaster(1, "Wrong");
        wrong.year = 1990;
        let mut session = CoastleSession::from_target(target, CoastleMode::Random);
        assert!(session.is_valid_guess(&wrong));
        session.submit_guess(&wrong, 0);
        assert!(session.is_valid_guess(&wrong));
        session.submit_guess(&wrong, 1);
        assert_eq!(session.guesses.len(), 2);
    }

    #[test]
    fn daily_index_is_stable_per_day_and_wraps() {
        let table = table();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(
            daily_index(date, table.len()),
            daily_index(date, table.len())
        );
        let next = date.succ_opt().unwrap();
        assert_ne!(daily_index(date, 1000), daily_index(next, 1000));

        // Pre-epoch dates wrap instead of going negative.
        let before = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert!(daily_index(before, table.len()) < table.len());
    }

    #[test]
    fn daily_sessions_share_a_target() {
        let table = table();
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let a = CoastleSession::daily(&table, date).unwrap();
        let b = CoastleSession::daily(&table, date).unwrap();
        assert_eq!(a.target, b.target);
        assert_eq!(a.mode, CoastleMode::Daily);
    }

    #[test]
    fn random_session_rejects_empty_table() {
        let mut rng = SmallRng::seed_from_u64(3);
        let err = CoastleSession::random(&CoasterTable::empty(), &mut rng).unwrap_err();
        assert_eq!(err, SessionError::EmptyTable);
    }

    #[test]
    fn share_text_renders_three_by_three_blocks() {
        let target = coaster(2, "Target");
        let mut near = target.clone();
        near.id = 1;
        near.year = 1999; // one yellow cell in the mixed row
        let mut session = CoastleSession::from_target(target.clone(), CoastleMode::Daily);
        session.submit_guess(&near, 0);
        session.submit_guess(&target, 1);

        let expected = "Coastle 2/6\n\
            \u{1F7E9}\u{1F7E9}\u{1F7E9}\n\
            \u{1F7E8}\u{1F7E9}\u{1F7E9}\n\
            \u{1F7E9}\u{1F7E9}\u{1F7E9}\n\
            \u{1F7E9}\u{1F7E9}\u{1F7E9}\n\
            \u{1F7E9}\u{1F7E9}\u{1F7E9}\n\
            \u{1F7E9}\u{1F7E9}\u{1F7E9}\n";
        assert_eq!(session.share_text(), expected);
    }
}
