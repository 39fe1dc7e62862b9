//! Headless interface for programmatic use.
//!
//! Runs the story without any UI. It's designed for:
//! - Scripted demos that play a whole story in one call
//! - Integration tests that inspect every payload along the way
//! - Line-oriented hosts
//!
//! # Example
//!
//! ```no_run
//! use wish_core::headless::{HeadlessConfig, HeadlessSession};
//!
//! let mut game = HeadlessSession::new(HeadlessConfig::quick_start().with_seed(7))?;
//! let transcript = game.play("Lego Set")?;
//! println!("{:?}", transcript.outcome());
//! # Ok::<(), wish_core::SessionError>(())
//! ```

use crate::payload::DisplayPayload;
use crate::search::{Cursor, Outcome, StepStatus};
use crate::session::{SessionConfig, SessionError, WishSession};
use crate::state::StageKind;

/// Configuration for a headless session.
#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    /// Session settings.
    pub session: SessionConfig,
}

impl HeadlessConfig {
    /// Default presents, seeded from the OS.
    pub fn quick_start() -> Self {
        Self::default()
    }

    /// Make the session reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.session = self.session.with_seed(seed);
        self
    }

    /// Use custom session settings.
    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }
}

/// Every payload produced while playing, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub payloads: Vec<DisplayPayload>,
}

impl Transcript {
    /// The step results, in order.
    pub fn steps(&self) -> Vec<StepStatus> {
        self.payloads.iter().filter_map(|p| p.step).collect()
    }

    /// Indices inspected, in the order the search looked at them.
    pub fn inspected(&self) -> Vec<usize> {
        self.payloads
            .iter()
            .filter(|p| p.step.is_some())
            .filter_map(|p| p.checking_index())
            .collect()
    }

    /// How the last search ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.payloads.last().and_then(|p| p.state.outcome())
    }

    pub fn last(&self) -> Option<&DisplayPayload> {
        self.payloads.last()
    }
}

/// A headless session.
pub struct HeadlessSession {
    session: WishSession,
    transcript: Transcript,
}

impl HeadlessSession {
    /// Create a new headless session.
    pub fn new(config: HeadlessConfig) -> Result<Self, SessionError> {
        let (session, welcome) = WishSession::new(config.session)?;
        Ok(Self {
            session,
            transcript: Transcript {
                payloads: vec![welcome],
            },
        })
    }

    fn record(&mut self, payload: DisplayPayload) -> &DisplayPayload {
        self.transcript.payloads.push(payload);
        // Just pushed
        &self.transcript.payloads[self.transcript.payloads.len() - 1]
    }

    /// Send a line as the primary action of the current stage.
    pub fn send(&mut self, line: &str) -> Result<&DisplayPayload, SessionError> {
        let payload = self.session.primary(line)?;
        Ok(self.record(payload))
    }

    pub fn confirm(&mut self) -> Result<&DisplayPayload, SessionError> {
        let payload = self.session.confirm()?;
        Ok(self.record(payload))
    }

    pub fn step(&mut self) -> Result<&DisplayPayload, SessionError> {
        let payload = self.session.step()?;
        Ok(self.record(payload))
    }

    pub fn reset(&mut self) -> Result<&DisplayPayload, SessionError> {
        let payload = self.session.reset()?;
        Ok(self.record(payload))
    }

    pub fn restart(&mut self) -> &DisplayPayload {
        let payload = self.session.restart();
        self.record(payload)
    }

    /// Play a whole story: wish, sleep, wake up, search until done.
    ///
    /// Returns only the payloads of this story. Restarts first if a story is
    /// already under way.
    pub fn play(&mut self, wish: &str) -> Result<Transcript, SessionError> {
        if self.stage() != StageKind::AwaitingWish {
            self.restart();
        }
        let start = self.transcript.payloads.len();

        self.send(wish)?;
        if self.stage() == StageKind::AwaitingWish {
            // Empty wish, nothing more to play
            return Ok(self.since(start));
        }
        while self.stage() != StageKind::Searching {
            self.confirm()?;
        }
        while !self.cursor().is_finished() {
            self.step()?;
        }

        Ok(self.since(start))
    }

    fn since(&self, start: usize) -> Transcript {
        Transcript {
            payloads: self.transcript.payloads[start..].to_vec(),
        }
    }

    // ========================================================================
    // State queries
    // ========================================================================

    pub fn stage(&self) -> StageKind {
        self.session.stage()
    }

    pub fn wish(&self) -> Option<&str> {
        self.session.state().wish()
    }

    pub fn presents(&self) -> &[String] {
        self.session.state().presents()
    }

    pub fn cursor(&self) -> Cursor {
        self.session.state().cursor()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.session.outcome()
    }

    /// The most recent payload.
    pub fn last_payload(&self) -> Option<&DisplayPayload> {
        self.transcript.last()
    }

    /// Everything since the session was created.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn session(&self) -> &WishSession {
        &self.session
    }
}
