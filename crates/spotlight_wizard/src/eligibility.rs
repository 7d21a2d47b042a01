//! Game eligibility policy.
//!
//! A game can enter the campaign when it is a TapPlay game or a mini-game
//! and has reached test or online status. Registration status is not part
//! of this policy; see [`GameRecord::is_selectable`].

use crate::hooks::WorkflowRequest;
use crate::types::{GameRecord, GameStatus, GameType};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Returns true if the game qualifies for registration.
#[instrument(skip(game), fields(game_id = %game.id()))]
pub fn is_eligible(game: &GameRecord) -> bool {
    if game.game_type() == GameType::Other {
        return false;
    }
    matches!(game.status(), GameStatus::Online | GameStatus::Test)
}

/// Returns the reason a game cannot be registered, first match wins.
#[instrument(skip(game), fields(game_id = %game.id()))]
pub fn eligibility_issue(game: &GameRecord) -> Option<EligibilityIssue> {
    let issue = if game.game_type() == GameType::Other {
        Some(EligibilityIssue::NeedsIntegration)
    } else {
        match game.status() {
            GameStatus::Draft => Some(EligibilityIssue::Draft),
            GameStatus::Review => Some(EligibilityIssue::UnderReview),
            GameStatus::Test | GameStatus::Online => None,
        }
    };
    trace!(?issue, "Evaluated eligibility");
    issue
}

/// Why a game is not eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum EligibilityIssue {
    /// The game is neither TapPlay nor a mini-game.
    #[display("needs TapPlay or mini-game integration")]
    NeedsIntegration,
    /// The game is still a draft.
    #[display("draft status, needs submission for review")]
    Draft,
    /// The game is waiting for approval.
    #[display("under review, awaiting approval")]
    UnderReview,
}

impl EligibilityIssue {
    /// The external workflow that resolves this issue.
    ///
    /// A game under review has no remedy; the user waits.
    pub fn remedy(self) -> Option<WorkflowRequest> {
        match self {
            Self::NeedsIntegration => Some(WorkflowRequest::IntegrateGame),
            Self::Draft => Some(WorkflowRequest::SubmitForReview),
            Self::UnderReview => None,
        }
    }
}
