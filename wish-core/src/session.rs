//! WishSession - the primary public API for hosts.
//!
//! This module wraps the story state machine, the search engine and the
//! session's own random source behind the four operations a host needs:
//! submit a wish, confirm, step and reset.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::corpus::{CorpusConfig, CorpusError};
use crate::narrative::{self, EventKind, NarrativeError};
use crate::payload::DisplayPayload;
use crate::search::{Outcome, StepStatus};
use crate::state::{SessionState, StageKind};

/// Errors from WishSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Story error: {0}")]
    Narrative(#[from] NarrativeError),

    #[error("Invalid corpus configuration: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Could not seed the random source: {0}")]
    Entropy(#[from] rand::Error),
}

impl SessionError {
    /// Whether the host sent an event the current stage does not accept.
    pub fn is_illegal_event(&self) -> bool {
        matches!(
            self,
            SessionError::Narrative(NarrativeError::IllegalEvent { .. })
        )
    }
}

/// Configuration for creating a new session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// How presents are wrapped.
    pub corpus: CorpusConfig,

    /// Seed for the session's random source. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Create a config with the default presents and an OS seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the session reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the filler gifts.
    pub fn with_gift_pool<I, S>(mut self, pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.corpus.gift_pool = pool.into_iter().map(Into::into).collect();
        self
    }

    /// Set how many presents can be under the tree.
    pub fn with_gift_range(mut self, min: usize, max: usize) -> Self {
        self.corpus.min_gifts = min;
        self.corpus.max_gifts = max;
        self
    }

    /// Set the chance that Santa brings the wish.
    pub fn with_wish_chance(mut self, chance: f64) -> Self {
        self.corpus.wish_chance = chance;
        self
    }
}

/// Raw user events, for hosts that route everything through one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "text", rename_all = "snake_case")]
pub enum Event {
    SubmitWish(String),
    Confirm,
    Step,
    Reset,
    Restart,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::SubmitWish(_) => EventKind::SubmitWish,
            Event::Confirm => EventKind::Confirm,
            Event::Step => EventKind::Step,
            Event::Reset => EventKind::Reset,
            Event::Restart => EventKind::Restart,
        }
    }
}

/// One interactive session.
///
/// Owns its state and an independent random source, so any number of
/// sessions can run side by side without affecting each other.
pub struct WishSession {
    config: SessionConfig,
    rng: StdRng,
    state: SessionState,
}

impl WishSession {
    /// Create a new session and the payload for its first screen.
    pub fn new(config: SessionConfig) -> Result<(Self, DisplayPayload), SessionError> {
        config.corpus.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(rand::thread_rng())?,
        };

        let payload = narrative::welcome();
        info!(session = %payload.state.id, seeded = config.seed.is_some(), "session started");

        let session = Self {
            config,
            rng,
            state: payload.state.clone(),
        };
        Ok((session, payload))
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stage(&self) -> StageKind {
        self.state.stage_kind()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Keep the new state from a successful transition.
    fn commit(
        &mut self,
        event: EventKind,
        result: Result<DisplayPayload, NarrativeError>,
    ) -> Result<DisplayPayload, SessionError> {
        match result {
            Ok(payload) => {
                let from = self.state.stage_kind();
                let to = payload.stage();
                if from != to {
                    info!(session = %self.state.id, %event, %from, %to, "stage changed");
                }
                self.state = payload.state.clone();
                Ok(payload)
            }
            Err(e) => {
                warn!(session = %self.state.id, %event, error = %e, "event rejected");
                Err(e.into())
            }
        }
    }

    /// Save the user's wish (or ask again if it is empty).
    pub fn submit_wish(&mut self, text: &str) -> Result<DisplayPayload, SessionError> {
        let result = narrative::submit_wish(&self.state, text);
        if let Ok(payload) = &result {
            if payload.stage() == StageKind::AwaitingWish {
                debug!(session = %self.state.id, "empty wish, asking again");
            }
        }
        self.commit(EventKind::SubmitWish, result)
    }

    /// Go to sleep, look under the tree, or start searching.
    pub fn confirm(&mut self) -> Result<DisplayPayload, SessionError> {
        let result = narrative::confirm(&self.state, &self.config.corpus, &mut self.rng);
        if let Ok(payload) = &result {
            if self.state.presents().is_empty() && !payload.gifts.is_empty() {
                debug!(session = %self.state.id, count = payload.gifts.len(), "presents wrapped");
            }
        }
        self.commit(EventKind::Confirm, result)
    }

    /// Check one more present. Once the search is over this starts a new story.
    pub fn step(&mut self) -> Result<DisplayPayload, SessionError> {
        if self.state.stage_kind() == StageKind::Searching && self.state.is_finished() {
            return Ok(self.restart());
        }

        let result = narrative::search_step(&self.state);
        if let Ok(payload) = &result {
            match payload.step {
                Some(StepStatus::Checking(index)) => {
                    debug!(session = %self.state.id, index, "not a match");
                }
                Some(StepStatus::Found(index)) => {
                    info!(session = %self.state.id, index, "wish found");
                }
                Some(StepStatus::NotFound) => {
                    info!(session = %self.state.id, checked = payload.gifts.len(), "wish not found");
                }
                None => {}
            }
        }
        self.commit(EventKind::Step, result)
    }

    /// Rewind the search without touching the presents.
    pub fn reset(&mut self) -> Result<DisplayPayload, SessionError> {
        let result = narrative::search_reset(&self.state);
        self.commit(EventKind::Reset, result)
    }

    /// Discard everything and ask for a new wish.
    ///
    /// The random source keeps going, so a seeded session stays reproducible
    /// across restarts.
    pub fn restart(&mut self) -> DisplayPayload {
        let payload = narrative::restart();
        info!(previous = %self.state.id, session = %payload.state.id, "session restarted");
        self.state = payload.state.clone();
        payload
    }

    /// Route a raw event.
    pub fn handle(&mut self, event: Event) -> Result<DisplayPayload, SessionError> {
        match event {
            Event::SubmitWish(text) => self.submit_wish(&text),
            Event::Confirm => self.confirm(),
            Event::Step => self.step(),
            Event::Reset => self.reset(),
            Event::Restart => Ok(self.restart()),
        }
    }

    /// The primary control for the current stage: wish text while waiting for
    /// a wish, confirm on the way to Christmas morning, step while searching.
    pub fn primary(&mut self, text: &str) -> Result<DisplayPayload, SessionError> {
        match self.stage() {
            StageKind::AwaitingWish => self.submit_wish(text),
            StageKind::Bedtime | StageKind::RevealCorpus => self.confirm(),
            StageKind::Searching => self.step(),
        }
    }

    /// How the search ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Cursor;

    fn seeded(seed: u64) -> WishSession {
        WishSession::new(SessionConfig::new().with_seed(seed)).unwrap().0
    }

    #[test]
    fn test_new_session_welcomes() {
        let (session, payload) = WishSession::new(SessionConfig::new()).unwrap();
        assert_eq!(session.stage(), StageKind::AwaitingWish);
        assert!(payload.message.contains("Welcome"));
        assert_eq!(session.state(), &payload.state);
    }

    #[test]
    fn test_bad_config_fails_construction() {
        let result = WishSession::new(SessionConfig::new().with_gift_range(8, 3));
        assert!(matches!(result, Err(SessionError::Corpus(_))));

        let result = WishSession::new(SessionConfig::new().with_wish_chance(-0.1));
        assert!(matches!(result, Err(SessionError::Corpus(_))));
    }

    #[test]
    fn test_rejected_event_keeps_state() {
        let mut session = seeded(1);
        let before = session.state().clone();

        let err = session.reset().unwrap_err();
        assert!(err.is_illegal_event());
        assert_eq!(session.state(), &before);

        let err = session.confirm().unwrap_err();
        assert!(err.is_illegal_event());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_step_after_finish_restarts() {
        let mut session = seeded(5);
        session.submit_wish("Kite").unwrap();
        session.confirm().unwrap();
        session.confirm().unwrap();
        session.confirm().unwrap();
        let first_id = session.state().id;

        while !session.state().is_finished() {
            session.step().unwrap();
        }
        assert!(session.outcome().is_some());

        let payload = session.step().unwrap();
        assert_eq!(payload.stage(), StageKind::AwaitingWish);
        assert_ne!(payload.state.id, first_id);
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn test_presents_generated_once() {
        let mut session = seeded(9);
        session.submit_wish("Kite").unwrap();
        session.confirm().unwrap();
        let morning = session.confirm().unwrap();
        let searching = session.confirm().unwrap();
        assert_eq!(morning.state.presents(), searching.state.presents());

        session.step().unwrap();
        let reset = session.reset().unwrap();
        assert_eq!(reset.state.presents(), morning.state.presents());
        assert_eq!(reset.state.cursor(), Cursor::NotStarted);
    }

    #[test]
    fn test_handle_routes_events() {
        let mut session = seeded(2);
        let payload = session.handle(Event::SubmitWish("Kite".into())).unwrap();
        assert_eq!(payload.stage(), StageKind::Bedtime);

        let payload = session.handle(Event::Restart).unwrap();
        assert_eq!(payload.stage(), StageKind::AwaitingWish);
        assert_eq!(Event::Step.kind(), EventKind::Step);
    }

    #[test]
    fn test_primary_walks_the_story() {
        let mut session = seeded(4);
        assert_eq!(session.primary("").unwrap().stage(), StageKind::AwaitingWish);
        assert_eq!(session.primary("Kite").unwrap().stage(), StageKind::Bedtime);
        assert_eq!(session.primary("").unwrap().stage(), StageKind::RevealCorpus);
        assert_eq!(session.primary("").unwrap().stage(), StageKind::RevealCorpus);
        assert_eq!(session.primary("").unwrap().stage(), StageKind::Searching);
        let payload = session.primary("").unwrap();
        assert!(payload.step.is_some());
    }

    #[test]
    fn test_same_seed_same_story() {
        let presents = |seed| {
            let mut session = seeded(seed);
            session.submit_wish("Kite").unwrap();
            session.confirm().unwrap();
            session.confirm().unwrap().state.presents().to_vec()
        };
        assert_eq!(presents(21), presents(21));
    }
}
