//! Christmas wish story engine that teaches linear search.
//!
//! This crate provides:
//! - A four-stage story state machine (wish, bedtime, Christmas morning, search)
//! - Random, unsorted presents with an injectable random source
//! - A step-by-step linear search with derived per-present marks
//! - A headless driver and testing harness
//!
//! Rendering is left to the host: every event returns a [`DisplayPayload`]
//! with the story text, the presents and their marks, the next action and the
//! updated state.
//!
//! # Quick Start
//!
//! ```no_run
//! use wish_core::{SessionConfig, WishSession};
//!
//! let (mut session, welcome) = WishSession::new(SessionConfig::new())?;
//! println!("{}", welcome.message);
//!
//! session.submit_wish("Lego Set")?;
//! session.confirm()?; // go to sleep
//! session.confirm()?; // wake up, presents appear
//! session.confirm()?; // start searching
//!
//! let payload = session.step()?;
//! println!("{}", payload.message);
//! # Ok::<(), wish_core::SessionError>(())
//! ```

pub mod corpus;
pub mod headless;
pub mod narrative;
pub mod payload;
pub mod prompts;
pub mod search;
pub mod session;
pub mod state;
pub mod testing;

// Primary public API
pub use corpus::{CorpusConfig, CorpusError};
pub use headless::{HeadlessConfig, HeadlessSession, Transcript};
pub use narrative::{EventKind, NarrativeError};
pub use payload::{Action, Controls, DisplayPayload, GiftView};
pub use search::{Cursor, Mark, Outcome, SearchError, StepStatus};
pub use session::{Event, SessionConfig, SessionError, WishSession};
pub use state::{SessionId, SessionState, Stage, StageKind};
pub use testing::TestHarness;
