//! Collaborator interface for the external game workflows.
//!
//! Creating, integrating and submitting a game for review happen outside the
//! wizard. The wizard only signals that the user asked for one of them.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Fire-and-forget signals to external workflows.
pub trait WorkflowHooks {
    /// The user wants to create a new game.
    fn request_create_game(&mut self);

    /// The user wants to integrate a game as TapPlay or mini-game.
    fn request_integrate_game(&mut self);

    /// The user wants to submit a draft game for review.
    fn request_submit_for_review(&mut self);
}

impl<H: WorkflowHooks + ?Sized> WorkflowHooks for &mut H {
    fn request_create_game(&mut self) {
        (**self).request_create_game();
    }

    fn request_integrate_game(&mut self) {
        (**self).request_integrate_game();
    }

    fn request_submit_for_review(&mut self) {
        (**self).request_submit_for_review();
    }
}

impl<H: WorkflowHooks + ?Sized> WorkflowHooks for Box<H> {
    fn request_create_game(&mut self) {
        (**self).request_create_game();
    }

    fn request_integrate_game(&mut self) {
        (**self).request_integrate_game();
    }

    fn request_submit_for_review(&mut self) {
        (**self).request_submit_for_review();
    }
}

/// One of the external workflows, as a value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum WorkflowRequest {
    /// Create a new game.
    #[display("Redirecting to the game creation page")]
    CreateGame,
    /// Integrate an existing game.
    #[display("Redirecting to the game integration page")]
    IntegrateGame,
    /// Submit a game for review.
    #[display("Redirecting to the game review submission page")]
    SubmitForReview,
}

impl WorkflowRequest {
    /// Sends this request to the given hooks.
    #[instrument(skip(hooks))]
    pub fn dispatch<H: WorkflowHooks + ?Sized>(self, hooks: &mut H) {
        match self {
            Self::CreateGame => hooks.request_create_game(),
            Self::IntegrateGame => hooks.request_integrate_game(),
            Self::SubmitForReview => hooks.request_submit_for_review(),
        }
    }

    /// Short action label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Self::CreateGame => "Create game",
            Self::IntegrateGame => "Integrate game",
            Self::SubmitForReview => "Submit for review",
        }
    }
}

/// Hooks that only log the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHooks;

impl WorkflowHooks for TracingHooks {
    fn request_create_game(&mut self) {
        info!(request = %WorkflowRequest::CreateGame, "External workflow requested");
    }

    fn request_integrate_game(&mut self) {
        info!(request = %WorkflowRequest::IntegrateGame, "External workflow requested");
    }

    fn request_submit_for_review(&mut self) {
        info!(request = %WorkflowRequest::SubmitForReview, "External workflow requested");
    }
}

/// Hooks that keep every request, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingHooks {
    requests: Vec<WorkflowRequest>,
}

impl RecordingHooks {
    /// Creates empty hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far.
    pub fn requests(&self) -> &[WorkflowRequest] {
        &self.requests
    }

    /// The most recent request.
    pub fn last(&self) -> Option<WorkflowRequest> {
        self.requests.last().copied()
    }

    fn record(&mut self, request: WorkflowRequest) {
        info!(%request, "External workflow requested");
        self.requests.push(request);
    }
}

impl WorkflowHooks for RecordingHooks {
    fn request_create_game(&mut self) {
        self.record(WorkflowRequest::CreateGame);
    }

    fn request_integrate_game(&mut self) {
        self.record(WorkflowRequest::IntegrateGame);
    }

    fn request_submit_for_review(&mut self) {
        self.record(WorkflowRequest::SubmitForReview);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_dispatch_reaches_matching_hook() {
        let mut hooks = RecordingHooks::new();
        for request in WorkflowRequest::iter() {
            request.dispatch(&mut hooks);
        }
        assert_eq!(
            hooks.requests(),
            [
                WorkflowRequest::CreateGame,
                WorkflowRequest::IntegrateGame,
                WorkflowRequest::SubmitForReview,
            ]
        );
        assert_eq!(hooks.last(), Some(WorkflowRequest::SubmitForReview));
    }

    #[test]
    fn test_dispatch_through_trait_object() {
        let mut hooks: Box<dyn WorkflowHooks> = Box::new(TracingHooks);
        WorkflowRequest::CreateGame.dispatch(&mut hooks);
    }
}
