//! Best-of-three stat battle resolution for the trading-card game.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{BattleStat, CardTable, CoasterCard, Perk};
use crate::constants::{
    DECK_SIZE, FINALE_SURGE_BONUS, LEADER_AMPLIFY_BONUS, REWARD_LOSS, REWARD_TIE, REWARD_WIN,
    STAT_CAP,
};

/// Stat compared in each round, indexed by deck position.
pub const ROUND_STATS: [BattleStat; DECK_SIZE] = [
    BattleStat::Height,
    BattleStat::Speed,
    BattleStat::Intensity,
];

/// Rounds are numbered 1..=3; the finale surge keys off the last one.
const FINAL_ROUND: u8 = 3;

/// Deck and opponent-generation precondition failures. The UI disables
/// the triggering action until these hold, so hitting one is a caller bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("deck must contain exactly {expected} cards, got {actual}")]
    DeckSize { expected: usize, actual: usize },
    #[error("card {0} is not in the collection")]
    UnknownCard(u32),
    #[error("card {0} has not been unlocked")]
    LockedCard(u32),
    #[error("card {0} appears more than once in the deck")]
    DuplicateCard(u32),
    #[error("opponent deck needs {required} eligible cards, only {available} available")]
    NotEnoughOpponents { required: usize, available: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleWinner {
    Player,
    Opponent,
    Tie,
}

/// One resolved round. Scores are post-perk and clamped to 0..=10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRound {
    pub round: u8,
    pub stat: BattleStat,
    pub player_card: CoasterCard,
    pub opponent_card: CoasterCard,
    pub player_score: u8,
    pub opponent_score: u8,
    pub winner: BattleWinner,
}

/// Fixed coin/xp payout looked up by overall winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub coins: u32,
    pub xp: u32,
}

/// A completed best-of-three battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSession {
    pub rounds: Vec<BattleRound>,
    pub winner: BattleWinner,
    pub reward: Reward,
}

fn clamp_stat(value: i16) -> u8 {
    u8::try_from(value.clamp(0, i16::from(STAT_CAP))).unwrap_or(STAT_CAP)
}

/// Score for the compared stat after static perks (flat bonuses and the
/// round-conditioned finale surge), before leader amplification.
fn static_score(card: &CoasterCard, stat: BattleStat, round: u8) -> u8 {
    let bonus: i16 = match card.perk {
        Perk::None | Perk::LeaderAmplify => 0,
        Perk::StatBonus {
            stat: boosted,
            amount,
        } => {
            if boosted == stat {
                i16::from(amount)
            } else {
                0
            }
        }
        Perk::FinaleSurge => {
            if stat == BattleStat::Intensity && round == FINAL_ROUND {
                i16::from(FINALE_SURGE_BONUS)
            } else {
                0
            }
        }
    };
    clamp_stat(i16::from(card.stats.get(stat)) + bonus)
}

/// Resolve a single round. Static perks apply to both sides first; the
/// leader-amplify bonus is evaluated against that comparison and only ever
/// widens an existing lead.
#[must_use]
pub fn resolve_round(
    round: u8,
    stat: BattleStat,
    player_card: &CoasterCard,
    opponent_card: &CoasterCard,
) -> BattleRound {
    let mut player_score = static_score(player_card, stat, round);
    let mut opponent_score = static_score(opponent_card, stat, round);

    if player_score > opponent_score && player_card.perk == Perk::LeaderAmplify {
        player_score = clamp_stat(i16::from(player_score) + i16::from(LEADER_AMPLIFY_BONUS));
    } else if opponent_score > player_score && opponent_card.perk == Perk::LeaderAmplify {
        opponent_score = clamp_stat(i16::from(opponent_score) + i16::from(LEADER_AMPLIFY_BONUS));
    }

    let winner = match player_score.cmp(&opponent_score) {
        std::cmp::Ordering::Greater => BattleWinner::Player,
        std::cmp::Ordering::Less => BattleWinner::Opponent,
        std::cmp::Ordering::Equal => BattleWinner::Tie,
    };

    BattleRound {
        round,
        stat,
        player_card: player_card.clone(),
        opponent_card: opponent_card.clone(),
        player_score,
        opponent_score,
        winner,
    }
}

/// Majority of round wins; equal win counts (including all ties) draw.
#[must_use]
pub fn overall_winner(rounds: &[BattleRound]) -> BattleWinner {
    let player_wins = rounds
        .iter()
        .filter(|r| r.winner == BattleWinner::Player)
        .count();
    let opponent_wins = rounds
        .iter()
        .filter(|r| r.winner == BattleWinner::Opponent)
        .count();
    match player_wins.cmp(&opponent_wins) {
        std::cmp::Ordering::Greater => BattleWinner::Player,
        std::cmp::Ordering::Less => BattleWinner::Opponent,
        std::cmp::Ordering::Equal => BattleWinner::Tie,
    }
}

/// Payout table keyed by overall winner.
#[must_use]
pub const fn reward_for(winner: BattleWinner) -> Reward {
    let (coins, xp) = match winner {
        BattleWinner::Player => REWARD_WIN,
        BattleWinner::Tie => REWARD_TIE,
        BattleWinner::Opponent => REWARD_LOSS,
    };
    Reward { coins, xp }
}

/// Play a full battle: one round per deck position, stat fixed by position.
#[must_use]
pub fn play_battle(
    player_deck: &[CoasterCard; DECK_SIZE],
    opponent_deck: &[CoasterCard; DECK_SIZE],
) -> BattleSession {
    let rounds: Vec<BattleRound> = ROUND_STATS
        .iter()
        .enumerate()
        .map(|(i, &stat)| {
            let round = u8::try_from(i + 1).unwrap_or(FINAL_ROUND);
            resolve_round(round, stat, &player_deck[i], &opponent_deck[i])
        })
        .collect();
    let winner = overall_winner(&rounds);
    BattleSession {
        rounds,
        winner,
        reward: reward_for(winner),
    }
}

/// Resolve the player's selected card ids into a validated deck.
///
/// # Errors
///
/// Returns an error unless the ids name exactly [`DECK_SIZE`] distinct
/// unlocked cards from the collection.
pub fn select_deck(
    table: &CardTable,
    ids: &[u32],
) -> Result<[CoasterCard; DECK_SIZE], BattleError> {
    if ids.len() != DECK_SIZE {
        return Err(BattleError::DeckSize {
            expected: DECK_SIZE,
            actual: ids.len(),
        });
    }
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for (i, &id) in ids.iter().enumerate() {
        if ids[..i].contains(&id) {
            return Err(BattleError::DuplicateCard(id));
        }
        let card = table.get(id).ok_or(BattleError::UnknownCard(id))?;
        if !card.unlocked {
            return Err(BattleError::LockedCard(id));
        }
        deck.push(card.clone());
    }
    deck.try_into().map_err(|_| BattleError::DeckSize {
        expected: DECK_SIZE,
        actual: 0,
    })
}

/// Draw a uniform random opponent deck: distinct unlocked cards excluding
/// the player's picks.
///
/// # Errors
///
/// Returns an error when fewer than [`DECK_SIZE`] eligible cards exist.
pub fn generate_opponent_deck(
    table: &CardTable,
    player_ids: &[u32],
    rng: &mut impl Rng,
) -> Result<[CoasterCard; DECK_SIZE], BattleError> {
    let eligible: Vec<&CoasterCard> = table
        .cards
        .iter()
        .filter(|c| c.unlocked && !player_ids.contains(&c.id))
        .collect();
    if eligible.len() < DECK_SIZE {
        return Err(BattleError::NotEnoughOpponents {
            required: DECK_SIZE,
            available: eligible.len(),
        });
    }
    let picks: Vec<CoasterCard> = eligible
        .choose_multiple(rng, DECK_SIZE)
        .map(|card| (*card).clone())
        .collect();
    picks.try_into().map_err(|_| BattleError::NotEnoughOpponents {
        required: DECK_SIZE,
        available: 0,
    })
}
