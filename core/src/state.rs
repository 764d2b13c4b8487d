use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeSet;

use crate::*;

/// Valid transitions:
/// - Idle -> Playing (explicit start or first flip)
/// - Playing -> Completed (last pair matched)
/// - any -> Idle (reset or new game)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    #[default]
    Idle,
    Playing,
    Completed,
}

impl Lifecycle {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Why a flip was refused. Refusals never change state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipRejection {
    GameCompleted,
    OutOfRange,
    AlreadyFlipped,
    AlreadyMatched,
    PairPending,
}

/// Outcome of flipping a card
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    Rejected(FlipRejection),
    /// First card of a pair is face up
    Revealed,
    /// Second card matched the first, both stay revealed
    Matched([usize; 2]),
    /// Second card did not match, both stay face up until cleared
    Mismatched([usize; 2]),
    /// Last pair matched and the game ended
    Completed([usize; 2]),
}

impl FlipOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    /// Boolean result reported to callers of `flip_card`: a mismatch reports `false` even though the flip landed.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched(_) | Self::Completed(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub moves: u32,
    pub time: u64,
    pub difficulty: Difficulty,
}

/// Whole seconds between two markers, never negative.
pub fn elapsed_secs(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    let millis = (end - start).num_milliseconds().max(0);
    (millis / 1000) as u64
}

/// Session record of one game, everything needed to resume it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    difficulty: Difficulty,
    seed: String,
    #[serde(rename = "cards")]
    board: Board,
    #[serde(rename = "flippedCards")]
    flipped: SmallVec<[usize; 2]>,
    #[serde(rename = "matchedCards")]
    matched: BTreeSet<usize>,
    move_count: u32,
    #[serde(rename = "gameState")]
    lifecycle: Lifecycle,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    end_time: Option<DateTime<Utc>>,
}

impl GameState {
    pub fn new(difficulty: Difficulty, seed: impl Into<String>, board: Board) -> Self {
        Self {
            difficulty,
            seed: seed.into(),
            board,
            ..Default::default()
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn flipped_indices(&self) -> &[usize] {
        &self.flipped
    }

    pub fn matched_indices(&self) -> &BTreeSet<usize> {
        &self.matched
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn is_face_up(&self, index: usize) -> bool {
        self.flipped.contains(&index) || self.matched.contains(&index)
    }

    pub fn is_game_over(&self) -> bool {
        !self.board.is_empty() && self.matched.len() == self.board.len()
    }

    /// Final stats; `time` stays 0 until the game has ended.
    pub fn stats(&self) -> GameStats {
        let time = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => elapsed_secs(start, end),
            _ => 0,
        };
        GameStats {
            moves: self.move_count,
            time,
            difficulty: self.difficulty,
        }
    }

    /// How many seconds have passed since the game started, 0 if it hasn't started
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        match self.start_time {
            Some(start) => elapsed_secs(start, self.end_time.unwrap_or(now)),
            None => 0,
        }
    }

    /// Moves to playing unless a game is already running or finished, or there is no board to play on. Returns
    /// whether anything changed.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if !self.lifecycle.is_idle() || self.board.is_empty() {
            return false;
        }
        log::debug!("started at {}", now);
        self.start_time = Some(now);
        self.lifecycle = Lifecycle::Playing;
        true
    }

    pub fn check_flip(&self, index: usize) -> core::result::Result<usize, FlipRejection> {
        use FlipRejection::*;

        if self.lifecycle.is_completed() {
            Err(GameCompleted)
        } else if !self.board.contains_index(index) {
            Err(OutOfRange)
        } else if self.flipped.contains(&index) {
            Err(AlreadyFlipped)
        } else if self.matched.contains(&index) {
            Err(AlreadyMatched)
        } else if self.flipped.len() >= 2 {
            Err(PairPending)
        } else {
            Ok(index)
        }
    }

    /// Turns a card face up and resolves the pair when it is the second one.
    pub fn flip(&mut self, index: usize, now: DateTime<Utc>) -> FlipOutcome {
        let index = match self.check_flip(index) {
            Ok(index) => index,
            Err(reason) => {
                log::trace!("flip {} rejected: {:?}", index, reason);
                return FlipOutcome::Rejected(reason);
            }
        };

        self.flipped.push(index);

        if self.start_time.is_none() {
            log::debug!("started at {} by first flip", now);
            self.start_time = Some(now);
            self.lifecycle = Lifecycle::Playing;
        } else if self.lifecycle.is_idle() {
            self.lifecycle = Lifecycle::Playing;
        }

        let [first, second] = match self.flipped.as_slice() {
            &[first, second] => [first, second],
            _ => return FlipOutcome::Revealed,
        };

        self.move_count = self.move_count.saturating_add(1);

        if self.board.is_pair(first, second) {
            self.matched.extend([first, second]);
            self.flipped.clear();
            log::debug!("matched {} and {}", first, second);

            if self.matched.len() == self.board.len() {
                self.end_time = Some(now);
                self.lifecycle = Lifecycle::Completed;
                log::debug!("ended at {} after {} moves", now, self.move_count);
                FlipOutcome::Completed([first, second])
            } else {
                FlipOutcome::Matched([first, second])
            }
        } else {
            log::debug!("mismatch between {} and {}", first, second);
            FlipOutcome::Mismatched([first, second])
        }
    }

    /// Turns a mismatched pair face down again. Does nothing unless exactly that pair is still pending.
    pub fn clear_mismatch(&mut self, pair: [usize; 2]) -> bool {
        if self.flipped.as_slice() == pair.as_slice() {
            self.flipped.clear();
            true
        } else {
            false
        }
    }

    /// Structural checks applied to snapshots read back from storage.
    pub fn validate(&self) -> Result<()> {
        let len = self.board.len();

        if len % 2 != 0 {
            return Err(GameError::InvalidSnapshot("board has an odd number of cards"));
        }
        if self.flipped.len() > 2 {
            return Err(GameError::InvalidSnapshot("more than two cards pending"));
        }
        if self.flipped.len() == 2 && self.flipped[0] == self.flipped[1] {
            return Err(GameError::InvalidSnapshot("pending card flipped twice"));
        }
        if self
            .flipped
            .iter()
            .chain(self.matched.iter())
            .any(|&index| index >= len)
        {
            return Err(GameError::InvalidSnapshot("card index out of range"));
        }
        if self.flipped.iter().any(|index| self.matched.contains(index)) {
            return Err(GameError::InvalidSnapshot("pending card already matched"));
        }
        if let &[first, second] = self.flipped.as_slice() {
            if self.board.is_pair(first, second) {
                return Err(GameError::InvalidSnapshot("pending cards form an unresolved pair"));
            }
        }
        let has_matched_partner = |index: usize| {
            self.matched
                .iter()
                .any(|&other| self.board.is_pair(index, other))
        };
        if !self.matched.iter().all(|&index| has_matched_partner(index)) {
            return Err(GameError::InvalidSnapshot("matched card without its partner"));
        }
        if self.lifecycle.is_completed() && self.matched.len() != len {
            return Err(GameError::InvalidSnapshot("completed game with unmatched cards"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, two_pair_board};

    fn playing(board: Board) -> GameState {
        let mut state = GameState::new(Difficulty::Easy, "test", board);
        assert!(state.start(at(0)));
        state
    }

    #[test]
    fn first_flip_starts_idle_game() {
        let mut state = GameState::new(Difficulty::Easy, "test", two_pair_board());

        assert_eq!(state.flip(0, at(500)), FlipOutcome::Revealed);
        assert_eq!(state.lifecycle(), Lifecycle::Playing);
        assert_eq!(state.start_time(), Some(at(500)));
        assert_eq!(state.flipped_indices(), &[0]);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn explicit_start_is_idempotent() {
        let mut state = playing(two_pair_board());
        assert!(!state.start(at(9_000)));
        assert_eq!(state.start_time(), Some(at(0)));
    }

    #[test]
    fn empty_board_cannot_start() {
        let mut state = GameState::new(Difficulty::Easy, "test", Board::default());
        assert!(!state.start(at(0)));
        assert_eq!(state.lifecycle(), Lifecycle::Idle);
        assert_eq!(state.start_time(), None);
    }

    #[test]
    fn matching_pair_resolves_synchronously() {
        let mut state = playing(two_pair_board());

        state.flip(0, at(1));
        assert_eq!(state.flip(1, at(2)), FlipOutcome::Matched([0, 1]));

        assert!(state.flipped_indices().is_empty());
        assert_eq!(state.matched_indices().iter().copied().collect::<Vec<_>>(), [0, 1]);
        assert_eq!(state.move_count(), 1);
        assert!(!state.is_game_over());
    }

    #[test]
    fn mismatch_stays_face_up_until_cleared() {
        let mut state = playing(two_pair_board());

        state.flip(0, at(1));
        let outcome = state.flip(2, at(2));

        assert_eq!(outcome, FlipOutcome::Mismatched([0, 2]));
        assert!(!outcome.is_success());
        assert_eq!(state.flipped_indices(), &[0, 2]);
        assert_eq!(state.move_count(), 1);

        assert_eq!(
            state.flip(3, at(3)),
            FlipOutcome::Rejected(FlipRejection::PairPending)
        );
        assert!(!state.clear_mismatch([0, 3]));
        assert!(state.is_face_up(2));
        assert!(state.clear_mismatch([0, 2]));
        assert!(state.flipped_indices().is_empty());
        assert!(!state.is_face_up(2));
        assert!(!state.clear_mismatch([0, 2]));
    }

    #[test]
    fn rejected_flips_leave_state_untouched() {
        let mut state = playing(two_pair_board());
        state.flip(0, at(1));
        state.flip(1, at(2));
        state.flip(2, at(3));
        let before = state.clone();

        use FlipRejection::*;
        for (index, reason) in [(0, AlreadyMatched), (2, AlreadyFlipped), (4, OutOfRange)] {
            assert_eq!(state.flip(index, at(4)), FlipOutcome::Rejected(reason));
            assert_eq!(state, before);
        }
    }

    #[test]
    fn last_match_completes_game() {
        let mut state = playing(two_pair_board());

        state.flip(0, at(100));
        state.flip(1, at(200));
        state.flip(2, at(300));
        assert_eq!(state.flip(3, at(4_999)), FlipOutcome::Completed([2, 3]));

        assert_eq!(state.lifecycle(), Lifecycle::Completed);
        assert!(state.is_game_over());
        assert_eq!(state.end_time(), Some(at(4_999)));
        assert_eq!(
            state.stats(),
            GameStats {
                moves: 2,
                time: 4,
                difficulty: Difficulty::Easy,
            }
        );
        assert_eq!(
            state.flip(0, at(6_000)),
            FlipOutcome::Rejected(FlipRejection::GameCompleted)
        );
        assert!(!state.start(at(6_000)));
    }

    #[test]
    fn stats_time_is_zero_while_running() {
        let mut state = playing(two_pair_board());
        state.flip(0, at(100));
        assert_eq!(state.stats().time, 0);
        assert_eq!(state.elapsed_secs(at(2_500)), 2);
    }

    #[test]
    fn flipped_never_exceeds_two_or_overlaps_matched() {
        let mut state = playing(two_pair_board());
        for (step, index) in [0, 2, 3, 1, 0, 1, 2, 3, 3, 2].into_iter().enumerate() {
            state.flip(index, at(step as i64));
            if let &[a, b] = state.flipped_indices() {
                state.clear_mismatch([a, b]);
            }
            assert!(state.flipped_indices().len() <= 2);
            assert!(
                state
                    .flipped_indices()
                    .iter()
                    .all(|index| !state.matched_indices().contains(index))
            );
        }
        assert!(state.is_game_over());
    }

    #[test]
    fn snapshot_json_uses_document_field_names() {
        let mut state = playing(two_pair_board());
        state.flip(0, at(1));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["gameState"], "playing");
        assert_eq!(json["flippedCards"], serde_json::json!([0]));
        assert_eq!(json["matchedCards"], serde_json::json!([]));
        assert_eq!(json["moveCount"], 0);
        assert_eq!(json["startTime"], at(0).timestamp_millis());
        assert_eq!(json["cards"][0]["id"], "1-1");
    }

    #[test]
    fn snapshot_without_end_time_still_parses() {
        let json = r#"{
            "cards": [
                {"id": "1-1", "name": "AK-47", "rarity": "common", "image": "/images/ak47.png"},
                {"id": "1-2", "name": "AK-47", "rarity": "common", "image": "/images/ak47.png"}
            ],
            "flippedCards": [1],
            "matchedCards": [],
            "difficulty": "medium",
            "seed": "test-seed",
            "startTime": 1700000000000,
            "moveCount": 3,
            "gameState": "playing"
        }"#;
        let state: GameState = serde_json::from_str(json).unwrap();

        assert_eq!(state.difficulty(), Difficulty::Medium);
        assert_eq!(state.flipped_indices(), &[1]);
        assert_eq!(state.end_time(), None);
        assert_eq!(state.validate(), Ok(()));
    }

    #[test]
    fn validate_catches_inconsistent_snapshots() {
        let mut state = playing(two_pair_board());
        state.flipped.push(9);
        assert!(state.validate().is_err());

        let mut state = playing(two_pair_board());
        state.matched.insert(0);
        state.flipped.push(0);
        assert!(state.validate().is_err());

        let mut state = playing(two_pair_board());
        state.lifecycle = Lifecycle::Completed;
        assert!(state.validate().is_err());
    }

    #[test]
    fn validate_rejects_pending_pair() {
        let mut state = playing(two_pair_board());
        state.flipped.extend([0, 1]);
        assert_eq!(
            state.validate(),
            Err(GameError::InvalidSnapshot("pending cards form an unresolved pair"))
        );
    }

    #[test]
    fn validate_rejects_half_matched_pair() {
        let mut state = playing(two_pair_board());
        state.matched.extend([0, 2]);
        assert_eq!(
            state.validate(),
            Err(GameError::InvalidSnapshot("matched card without its partner"))
        );

        state.matched.extend([1, 3]);
        state.lifecycle = Lifecycle::Completed;
        assert_eq!(state.validate(), Ok(()));
    }
}
