//! Session state threaded through every event.
//!
//! Each [`Stage`] carries exactly the data that exists at that point of the
//! story: there is no wish before the wish is made and no presents before
//! Christmas morning.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::search::{self, Cursor, Mark, Outcome};

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the story is, with the data each part owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for the user to name a gift.
    #[default]
    AwaitingWish,
    /// The wish is saved; the night has to pass.
    Bedtime { wish: String },
    /// Christmas morning. `presents` is filled in once, on the first look
    /// under the tree.
    RevealCorpus {
        wish: String,
        presents: Option<Vec<String>>,
    },
    /// Stepping through the presents.
    Searching {
        wish: String,
        presents: Vec<String>,
        cursor: Cursor,
    },
}

/// Payload-free view of [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    AwaitingWish,
    Bedtime,
    RevealCorpus,
    Searching,
}

impl StageKind {
    pub fn title(&self) -> &'static str {
        match self {
            StageKind::AwaitingWish => "Make a Wish",
            StageKind::Bedtime => "Bedtime",
            StageKind::RevealCorpus => "Christmas Morning",
            StageKind::Searching => "Linear Search",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::AwaitingWish => StageKind::AwaitingWish,
            Stage::Bedtime { .. } => StageKind::Bedtime,
            Stage::RevealCorpus { .. } => StageKind::RevealCorpus,
            Stage::Searching { .. } => StageKind::Searching,
        }
    }
}

/// The complete state of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub id: SessionId,
    pub stage: Stage,
}

impl SessionState {
    /// Fresh session: no wish, no presents, search not started.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage_kind(&self) -> StageKind {
        self.stage.kind()
    }

    /// The wish, once one has been accepted.
    pub fn wish(&self) -> Option<&str> {
        match &self.stage {
            Stage::AwaitingWish => None,
            Stage::Bedtime { wish }
            | Stage::RevealCorpus { wish, .. }
            | Stage::Searching { wish, .. } => Some(wish.as_str()),
        }
    }

    /// Presents under the tree; empty before they are generated.
    pub fn presents(&self) -> &[String] {
        match &self.stage {
            Stage::RevealCorpus {
                presents: Some(presents),
                ..
            }
            | Stage::Searching { presents, .. } => presents.as_slice(),
            _ => &[],
        }
    }

    /// Search cursor; `NotStarted` outside of the search.
    pub fn cursor(&self) -> Cursor {
        match &self.stage {
            Stage::Searching { cursor, .. } => *cursor,
            _ => Cursor::NotStarted,
        }
    }

    /// How the search ended, derived from the cursor.
    pub fn outcome(&self) -> Option<Outcome> {
        match &self.stage {
            Stage::Searching {
                wish,
                presents,
                cursor,
            } => search::outcome(presents, wish, *cursor),
            _ => None,
        }
    }

    /// Rendering classification of every present.
    pub fn marks(&self) -> Vec<Mark> {
        match &self.stage {
            Stage::Searching {
                wish,
                presents,
                cursor,
            } => search::classify(presents, wish, *cursor),
            _ => vec![Mark::Unchecked; self.presents().len()],
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor().is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = SessionState::new();
        assert_eq!(state.stage_kind(), StageKind::AwaitingWish);
        assert_eq!(state.wish(), None);
        assert!(state.presents().is_empty());
        assert_eq!(state.cursor(), Cursor::NotStarted);
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        assert_ne!(SessionState::new().id, SessionState::new().id);
    }

    #[test]
    fn test_accessors_while_searching() {
        let state = SessionState {
            id: SessionId::new(),
            stage: Stage::Searching {
                wish: "Kite".to_string(),
                presents: vec!["Book".to_string(), "Kite".to_string()],
                cursor: Cursor::Finished,
            },
        };
        assert_eq!(state.stage_kind(), StageKind::Searching);
        assert_eq!(state.wish(), Some("Kite"));
        assert_eq!(state.presents().len(), 2);
        assert_eq!(state.outcome(), Some(Outcome::Found(1)));
        assert_eq!(state.marks(), vec![Mark::Checked, Mark::Found]);
        assert!(state.is_finished());
    }

    #[test]
    fn test_presents_hidden_until_generated() {
        let state = SessionState {
            id: SessionId::new(),
            stage: Stage::RevealCorpus {
                wish: "Kite".to_string(),
                presents: None,
            },
        };
        assert!(state.presents().is_empty());
        assert!(state.marks().is_empty());
    }
}
