//! What the host renders after every event.

use serde::{Deserialize, Serialize};

use crate::search::{Mark, StepStatus};
use crate::state::{SessionState, StageKind};

/// The next thing the user is expected to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    SaveWish,
    GoToSleep,
    WakeUp,
    StartSearching,
    Step,
    PlayAgain,
}

impl Action {
    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Action::SaveWish => "Save my wish",
            Action::GoToSleep => "Go to sleep",
            Action::WakeUp => "Wake up on Christmas morning",
            Action::StartSearching => "Start searching",
            Action::Step => "Step",
            Action::PlayAgain => "Play again",
        }
    }
}

/// Which controls the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    /// The wish text box.
    pub wish_input: bool,
    /// The main story button.
    pub primary_button: bool,
    /// The Step and Reset buttons.
    pub search_controls: bool,
}

impl Controls {
    pub fn for_stage(stage: StageKind) -> Self {
        let searching = stage == StageKind::Searching;
        Self {
            wish_input: stage == StageKind::AwaitingWish,
            primary_button: !searching,
            search_controls: searching,
        }
    }
}

/// One present as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftView {
    pub index: usize,
    pub name: String,
    pub mark: Mark,
}

/// Everything the host needs to redraw after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPayload {
    /// Story text (Markdown).
    pub message: String,
    /// Presents under the tree with their marks; empty before Christmas morning.
    pub gifts: Vec<GiftView>,
    /// What the primary control should do next.
    pub action: Action,
    /// Control visibility.
    pub controls: Controls,
    /// Result of the search step that produced this payload, if any.
    pub step: Option<StepStatus>,
    /// Updated state for the host to keep until the next event.
    pub state: SessionState,
}

impl DisplayPayload {
    /// Build a payload from the new state. Gifts and marks are derived from it.
    pub fn new(message: impl Into<String>, action: Action, state: SessionState) -> Self {
        let gifts = state
            .presents()
            .iter()
            .zip(state.marks())
            .enumerate()
            .map(|(index, (name, mark))| GiftView {
                index,
                name: name.clone(),
                mark,
            })
            .collect();

        Self {
            message: message.into(),
            gifts,
            action,
            controls: Controls::for_stage(state.stage_kind()),
            step: None,
            state,
        }
    }

    /// Attach the step that produced this payload.
    pub fn with_step(mut self, step: StepStatus) -> Self {
        self.step = Some(step);
        self
    }

    pub fn stage(&self) -> StageKind {
        self.state.stage_kind()
    }

    /// Marks in present order.
    pub fn marks(&self) -> Vec<Mark> {
        self.gifts.iter().map(|g| g.mark).collect()
    }

    /// Index of the present currently being looked at, if any.
    pub fn checking_index(&self) -> Option<usize> {
        self.gifts
            .iter()
            .find(|g| matches!(g.mark, Mark::Checking | Mark::Found))
            .map(|g| g.index)
    }
}
