//! The story as a state machine.
//!
//! Every handler reads the current [`SessionState`] and returns a
//! [`DisplayPayload`] carrying the next one. Nothing is mutated in place, so a
//! rejected event leaves the caller's state exactly as it was.
//!
//! ```text
//! AwaitingWish --submit_wish--> Bedtime --confirm--> RevealCorpus
//!      ^                                              |  confirm (presents appear)
//!      |                                              |  confirm (start searching)
//!      +----------------- restart ------------------ Searching <-- step / reset
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::corpus::{CorpusConfig, CorpusError};
use crate::payload::{Action, DisplayPayload};
use crate::prompts;
use crate::search::{self, Cursor, SearchError, StepStatus};
use crate::state::{SessionState, Stage, StageKind};

/// Events a host can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SubmitWish,
    Confirm,
    Step,
    Reset,
    Restart,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::SubmitWish => "submit wish",
            EventKind::Confirm => "confirm",
            EventKind::Step => "step",
            EventKind::Reset => "reset",
            EventKind::Restart => "restart",
        };
        f.write_str(name)
    }
}

/// Errors from story transitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NarrativeError {
    #[error("Cannot {event} during {stage}")]
    IllegalEvent { event: EventKind, stage: StageKind },

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

fn illegal(event: EventKind, state: &SessionState) -> NarrativeError {
    NarrativeError::IllegalEvent {
        event,
        stage: state.stage_kind(),
    }
}

fn next_state(state: &SessionState, stage: Stage) -> SessionState {
    SessionState {
        id: state.id,
        stage,
    }
}

/// First screen of a brand new session.
pub fn welcome() -> DisplayPayload {
    DisplayPayload::new(prompts::welcome(), Action::SaveWish, SessionState::new())
}

/// Throw the session away and start over.
pub fn restart() -> DisplayPayload {
    welcome()
}

/// Accept the user's wish.
///
/// The text is trimmed; an empty wish keeps the story where it is and asks
/// again. A new session never has a wish to fall back on.
pub fn submit_wish(state: &SessionState, text: &str) -> Result<DisplayPayload, NarrativeError> {
    if state.stage_kind() != StageKind::AwaitingWish {
        return Err(illegal(EventKind::SubmitWish, state));
    }

    let wish = text.trim();
    if wish.is_empty() {
        return Ok(DisplayPayload::new(
            prompts::empty_wish(),
            Action::SaveWish,
            state.clone(),
        ));
    }

    let next = next_state(
        state,
        Stage::Bedtime {
            wish: wish.to_string(),
        },
    );
    Ok(DisplayPayload::new(prompts::bedtime(wish), Action::GoToSleep, next))
}

/// Move the story on by one confirming click.
///
/// - Bedtime: the night passes.
/// - Christmas morning, first look: presents are wrapped (the only place
///   randomness is used).
/// - Christmas morning, presents shown: the search begins.
pub fn confirm<R: Rng + ?Sized>(
    state: &SessionState,
    config: &CorpusConfig,
    rng: &mut R,
) -> Result<DisplayPayload, NarrativeError> {
    match &state.stage {
        Stage::Bedtime { wish } => {
            let next = next_state(
                state,
                Stage::RevealCorpus {
                    wish: wish.clone(),
                    presents: None,
                },
            );
            Ok(DisplayPayload::new(
                prompts::night_passes(),
                Action::WakeUp,
                next,
            ))
        }
        Stage::RevealCorpus {
            wish,
            presents: None,
        } => {
            config.validate()?;
            let count = config.sample_count_with_rng(rng);
            let presents = config.generate_with_rng(wish, count, rng)?;
            let next = next_state(
                state,
                Stage::RevealCorpus {
                    wish: wish.clone(),
                    presents: Some(presents),
                },
            );
            Ok(DisplayPayload::new(
                prompts::christmas_morning(wish),
                Action::StartSearching,
                next,
            ))
        }
        Stage::RevealCorpus {
            presents: Some(_), ..
        } => start_search(state),
        Stage::AwaitingWish | Stage::Searching { .. } => Err(illegal(EventKind::Confirm, state)),
    }
}

/// Single entry point for the story's primary control.
///
/// `input` is only read while waiting for a wish; a missing input there is
/// the same as an empty one.
pub fn advance<R: Rng + ?Sized>(
    state: &SessionState,
    input: Option<&str>,
    config: &CorpusConfig,
    rng: &mut R,
) -> Result<DisplayPayload, NarrativeError> {
    match state.stage_kind() {
        StageKind::AwaitingWish => submit_wish(state, input.unwrap_or("")),
        StageKind::Bedtime | StageKind::RevealCorpus => confirm(state, config, rng),
        StageKind::Searching => Err(illegal(EventKind::Confirm, state)),
    }
}

/// Leave Christmas morning and get ready to search.
pub fn start_search(state: &SessionState) -> Result<DisplayPayload, NarrativeError> {
    let Stage::RevealCorpus {
        wish,
        presents: Some(presents),
    } = &state.stage
    else {
        return Err(illegal(EventKind::Confirm, state));
    };
    if presents.is_empty() {
        return Err(SearchError::EmptyCorpus.into());
    }

    let message = prompts::start_search(wish, presents.len());
    let next = next_state(
        state,
        Stage::Searching {
            wish: wish.clone(),
            presents: presents.clone(),
            cursor: Cursor::NotStarted,
        },
    );
    Ok(DisplayPayload::new(message, Action::Step, next))
}

/// Check the next present.
pub fn search_step(state: &SessionState) -> Result<DisplayPayload, NarrativeError> {
    let Stage::Searching {
        wish,
        presents,
        cursor,
    } = &state.stage
    else {
        return Err(illegal(EventKind::Step, state));
    };

    let (status, cursor) = search::step(presents, wish, *cursor)?;
    let (message, action) = match status {
        StepStatus::Checking(index) => (
            prompts::checking(index, &presents[index], wish, presents.len()),
            Action::Step,
        ),
        StepStatus::Found(index) => (prompts::found(wish, index), Action::PlayAgain),
        StepStatus::NotFound => (prompts::not_found(wish, presents.len()), Action::PlayAgain),
    };

    let next = next_state(
        state,
        Stage::Searching {
            wish: wish.clone(),
            presents: presents.clone(),
            cursor,
        },
    );
    Ok(DisplayPayload::new(message, action, next).with_step(status))
}

/// Rewind the search to the first present. Allowed after the search finished.
pub fn search_reset(state: &SessionState) -> Result<DisplayPayload, NarrativeError> {
    let Stage::Searching { wish, presents, .. } = &state.stage else {
        return Err(illegal(EventKind::Reset, state));
    };

    let cursor = search::reset();
    let message = prompts::search_reset(wish, presents.len());
    let next = next_state(
        state,
        Stage::Searching {
            wish: wish.clone(),
            presents: presents.clone(),
            cursor,
        },
    );
    Ok(DisplayPayload::new(message, Action::Step, next))
}
