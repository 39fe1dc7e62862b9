//! Linear search over the presents.
//!
//! The engine inspects exactly one present per [`step`], in ascending order,
//! and stops at the first present that matches the wish. How each present
//! should be drawn ([`Mark`]) is never stored; [`classify`] recomputes it from
//! the cursor alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raw cursor value for a scan that has not started.
pub const NOT_STARTED: i64 = -1;

/// Raw cursor value for a scan that has finished.
pub const FINISHED: i64 = -2;

/// Error type for search steps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("There are no presents to search")]
    EmptyCorpus,
    #[error("The search has already finished; reset or restart first")]
    AlreadyFinished,
    #[error("Cursor {cursor} is outside {len} presents")]
    CursorOutOfRange { cursor: usize, len: usize },
    #[error("Invalid raw cursor value: {0}")]
    InvalidRawCursor(i64),
}

/// Search progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cursor {
    /// Nothing inspected yet.
    #[default]
    NotStarted,
    /// The next present to inspect.
    At(usize),
    /// The scan ended, found or not.
    Finished,
}

impl Cursor {
    /// Integer form used by hosts that store the cursor as a number.
    pub fn as_raw(self) -> i64 {
        match self {
            Cursor::NotStarted => NOT_STARTED,
            Cursor::Finished => FINISHED,
            Cursor::At(index) => index as i64,
        }
    }

    pub fn from_raw(raw: i64) -> Result<Cursor, SearchError> {
        match raw {
            NOT_STARTED => Ok(Cursor::NotStarted),
            FINISHED => Ok(Cursor::Finished),
            n if n >= 0 => Ok(Cursor::At(n as usize)),
            n => Err(SearchError::InvalidRawCursor(n)),
        }
    }

    pub fn is_finished(self) -> bool {
        self == Cursor::Finished
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::NotStarted => write!(f, "not started"),
            Cursor::At(index) => write!(f, "[{index}]"),
            Cursor::Finished => write!(f, "finished"),
        }
    }
}

/// What a single step saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// The present at this index was inspected and is not the wish.
    Checking(usize),
    /// The wish is at this index.
    Found(usize),
    /// The last present was inspected and the wish was never seen.
    NotFound,
}

/// How a finished search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Found(usize),
    NotFound,
}

/// Rendering classification of one present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Unchecked,
    Checking,
    Checked,
    Found,
}

impl Mark {
    /// Short status text shown under a present.
    pub fn label(&self) -> &'static str {
        match self {
            Mark::Unchecked => "",
            Mark::Checking => "Checking...",
            Mark::Checked => "Checked",
            Mark::Found => "FOUND!",
        }
    }
}

/// Case-insensitive exact comparison of a present against the wish.
pub fn gifts_match(present: &str, wish: &str) -> bool {
    present.to_lowercase() == wish.to_lowercase()
}

/// Index of the first present matching the wish.
pub fn first_match(corpus: &[String], wish: &str) -> Option<usize> {
    corpus.iter().position(|present| gifts_match(present, wish))
}

/// Inspect one present and move the cursor.
pub fn step(corpus: &[String], wish: &str, cursor: Cursor) -> Result<(StepStatus, Cursor), SearchError> {
    if corpus.is_empty() {
        return Err(SearchError::EmptyCorpus);
    }

    let index = match cursor {
        Cursor::NotStarted => 0,
        Cursor::At(index) => index,
        Cursor::Finished => return Err(SearchError::AlreadyFinished),
    };
    if index >= corpus.len() {
        return Err(SearchError::CursorOutOfRange {
            cursor: index,
            len: corpus.len(),
        });
    }

    if gifts_match(&corpus[index], wish) {
        Ok((StepStatus::Found(index), Cursor::Finished))
    } else if index == corpus.len() - 1 {
        Ok((StepStatus::NotFound, Cursor::Finished))
    } else {
        Ok((StepStatus::Checking(index), Cursor::At(index + 1)))
    }
}

/// Put the scan back at the start. The presents are left as they are, and
/// every mark reads unchecked again through [`classify`].
pub fn reset() -> Cursor {
    Cursor::NotStarted
}

/// The present most recently inspected for a given cursor.
///
/// A finished scan points at the match, or at the last present when nothing
/// matched.
pub fn inspected_index(corpus: &[String], wish: &str, cursor: Cursor) -> Option<usize> {
    match cursor {
        Cursor::NotStarted | Cursor::At(0) => None,
        Cursor::At(next) => Some(next - 1),
        Cursor::Finished => first_match(corpus, wish).or(corpus.len().checked_sub(1)),
    }
}

/// How a finished scan ended; `None` while the scan is still running.
pub fn outcome(corpus: &[String], wish: &str, cursor: Cursor) -> Option<Outcome> {
    if !cursor.is_finished() {
        return None;
    }
    Some(match first_match(corpus, wish) {
        Some(index) => Outcome::Found(index),
        None => Outcome::NotFound,
    })
}

/// Derive the mark of every present from the cursor.
pub fn classify(corpus: &[String], wish: &str, cursor: Cursor) -> Vec<Mark> {
    let current = inspected_index(corpus, wish, cursor);
    let found = match outcome(corpus, wish, cursor) {
        Some(Outcome::Found(index)) => Some(index),
        _ => None,
    };

    (0..corpus.len())
        .map(|i| match current {
            Some(c) if i == c && found == Some(i) => Mark::Found,
            Some(c) if i == c => Mark::Checking,
            Some(c) if i < c => Mark::Checked,
            _ => Mark::Unchecked,
        })
        .collect()
}
