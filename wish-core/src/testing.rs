//! Testing utilities for the wish story.
//!
//! This module provides tools for scenario testing:
//! - `TestHarness` for searching a fixed pile of presents, no randomness
//! - `ScriptedRng` for driving the corpus generator with chosen values
//! - Assertion helpers for verifying marks, cursor and outcome

use rand::{Error, RngCore};

use crate::narrative::{self, NarrativeError};
use crate::payload::DisplayPayload;
use crate::search::{Cursor, Mark, Outcome, StepStatus};
use crate::state::{SessionState, Stage, StageKind};

/// Harness that starts right at the search with known presents.
pub struct TestHarness {
    /// Current state.
    pub state: SessionState,
    /// Every payload produced so far.
    pub payloads: Vec<DisplayPayload>,
}

impl TestHarness {
    /// Start searching `presents` for `wish`.
    ///
    /// An empty pile cannot be searched and fails here.
    pub fn searching(presents: &[&str], wish: &str) -> Result<Self, NarrativeError> {
        let state = SessionState {
            stage: Stage::RevealCorpus {
                wish: wish.to_string(),
                presents: Some(presents.iter().map(|p| p.to_string()).collect()),
            },
            ..SessionState::new()
        };
        let mut harness = Self {
            state,
            payloads: Vec::new(),
        };
        harness.apply(narrative::start_search)?;
        Ok(harness)
    }

    fn apply(
        &mut self,
        handler: impl FnOnce(&SessionState) -> Result<DisplayPayload, NarrativeError>,
    ) -> Result<&DisplayPayload, NarrativeError> {
        let payload = handler(&self.state)?;
        self.state = payload.state.clone();
        self.payloads.push(payload);
        Ok(&self.payloads[self.payloads.len() - 1])
    }

    /// Check one present.
    pub fn step(&mut self) -> Result<&DisplayPayload, NarrativeError> {
        self.apply(narrative::search_step)
    }

    /// Rewind the search.
    pub fn reset(&mut self) -> Result<&DisplayPayload, NarrativeError> {
        self.apply(narrative::search_reset)
    }

    /// Step until the search finishes, returning every status seen.
    pub fn run_to_end(&mut self) -> Result<Vec<StepStatus>, NarrativeError> {
        let mut statuses = Vec::new();
        while !self.cursor().is_finished() {
            if let Some(status) = self.step()?.step {
                statuses.push(status);
            }
        }
        Ok(statuses)
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor()
    }

    pub fn marks(&self) -> Vec<Mark> {
        self.state.marks()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    /// The last payload.
    pub fn last(&self) -> Option<&DisplayPayload> {
        self.payloads.last()
    }
}

/// An RNG that replays a fixed list of words, cycling forever.
///
/// Useful when a test needs the generator to take a particular branch.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    words: Vec<u64>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(words: Vec<u64>) -> Self {
        assert!(!words.is_empty(), "ScriptedRng needs at least one word");
        Self { words, next: 0 }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let word = self.words[self.next % self.words.len()];
        self.next += 1;
        word
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the story is at the expected stage.
#[track_caller]
pub fn assert_stage(state: &SessionState, expected: StageKind) {
    assert_eq!(
        state.stage_kind(),
        expected,
        "Expected stage {expected:?}, got {:?}",
        state.stage_kind()
    );
}

/// Assert the marks of every present.
#[track_caller]
pub fn assert_marks(harness: &TestHarness, expected: &[Mark]) {
    assert_eq!(
        harness.marks(),
        expected,
        "Unexpected marks at cursor {}",
        harness.cursor()
    );
}

/// Assert the search cursor.
#[track_caller]
pub fn assert_cursor(harness: &TestHarness, expected: Cursor) {
    assert_eq!(harness.cursor(), expected, "Unexpected cursor");
}

/// Assert the search found the wish at `index`.
#[track_caller]
pub fn assert_found_at(harness: &TestHarness, index: usize) {
    assert_eq!(
        harness.outcome(),
        Some(Outcome::Found(index)),
        "Expected the wish to be found at [{index}]"
    );
}

/// Assert the search finished without finding the wish.
#[track_caller]
pub fn assert_not_found(harness: &TestHarness) {
    assert_eq!(
        harness.outcome(),
        Some(Outcome::NotFound),
        "Expected the wish to be missing"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchError;
    use rand::Rng;

    #[test]
    fn test_harness_starts_ready() {
        let harness = TestHarness::searching(&["Book", "Puzzle"], "Kite").unwrap();
        assert_stage(&harness.state, StageKind::Searching);
        assert_cursor(&harness, Cursor::NotStarted);
        assert_marks(&harness, &[Mark::Unchecked, Mark::Unchecked]);
    }

    #[test]
    fn test_harness_rejects_empty_pile() {
        let result = TestHarness::searching(&[], "Kite");
        assert!(matches!(
            result,
            Err(NarrativeError::Search(SearchError::EmptyCorpus))
        ));
    }

    #[test]
    fn test_run_to_end() {
        let mut harness = TestHarness::searching(&["Book", "Kite"], "kite").unwrap();
        let statuses = harness.run_to_end().unwrap();
        assert_eq!(statuses, vec![StepStatus::Checking(0), StepStatus::Found(1)]);
        assert_found_at(&harness, 1);
    }

    #[test]
    fn test_scripted_rng_cycles() {
        let mut rng = ScriptedRng::new(vec![1, 2]);
        assert_eq!(rng.next_u64(), 1);
        assert_eq!(rng.next_u64(), 2);
        assert_eq!(rng.next_u64(), 1);
        // Zero words always pick the lowest value of a range
        let mut zeros = ScriptedRng::new(vec![0]);
        assert_eq!(zeros.gen_range(0..10usize), 0);
    }
}
