//! Wizard session: the current state plus the workflow collaborator.

use tracing::{info, instrument, warn};

use crate::action::{Registration, WizardError};
use crate::catalog::Catalog;
use crate::hooks::{TracingHooks, WorkflowHooks, WorkflowRequest};
use crate::phases::Step;
use crate::state::{Snapshot, WizardState};
use crate::types::{ContactInfo, GameRecord};
use crate::validation::RegistrationRules;

/// One registration session.
///
/// Owns the [`WizardState`] and swaps it only when a transition succeeds, so
/// every failed call leaves the session exactly as it was.
#[derive(Debug, Clone)]
pub struct Wizard<H: WorkflowHooks = TracingHooks> {
    state: WizardState,
    hooks: H,
}

impl Wizard<TracingHooks> {
    /// Starts a session whose workflow requests are only logged.
    pub fn with_tracing(catalog: Catalog, rules: RegistrationRules) -> Self {
        Self::new(catalog, rules, TracingHooks)
    }
}

impl<H: WorkflowHooks> Wizard<H> {
    /// Starts a session over the given catalog.
    pub fn new(catalog: Catalog, rules: RegistrationRules, hooks: H) -> Self {
        Self {
            state: WizardState::new(catalog, rules),
            hooks,
        }
    }

    /// Resumes a session from a previously saved state.
    ///
    /// The state is verified first; a corrupted snapshot is rejected.
    #[instrument(skip(state, hooks), fields(step = %state.step()))]
    pub fn resume(state: WizardState, hooks: H) -> Result<Self, WizardError> {
        state.verify()?;
        info!("Resuming wizard session");
        Ok(Self { state, hooks })
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Current step.
    pub fn step(&self) -> Step {
        self.state.step()
    }

    /// Recorded contact info, if any.
    pub fn contact_info(&self) -> Option<&ContactInfo> {
        self.state.contact_info()
    }

    /// The registered game, when complete.
    pub fn selected_game(&self) -> Option<&GameRecord> {
        self.state.selected_game()
    }

    /// Games in catalog order.
    pub fn games(&self) -> &[GameRecord] {
        self.state.games()
    }

    /// Games that can be registered now.
    pub fn selectable_games(&self) -> impl Iterator<Item = &GameRecord> {
        self.state.catalog().selectable()
    }

    /// Games already registered in earlier rounds.
    pub fn registered_games(&self) -> impl Iterator<Item = &GameRecord> {
        self.state.catalog().registered()
    }

    /// Campaign rules for registrations.
    pub fn rules(&self) -> &RegistrationRules {
        self.state.rules()
    }

    /// Flat view for presentation.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// The workflow collaborator.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutable access to the workflow collaborator.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Ends the session, returning its final state.
    pub fn into_state(self) -> WizardState {
        self.state
    }

    fn apply(&mut self, next: Result<WizardState, WizardError>) -> Result<(), WizardError> {
        match next {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, step = %self.state.step(), "Transition rejected");
                Err(e)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Submits or edits contact info.
    #[instrument(skip(self, contact), fields(step = %self.step()))]
    pub fn submit_contact_info(&mut self, contact: ContactInfo) -> Result<(), WizardError> {
        let next = self.state.submit_contact_info(contact);
        self.apply(next)
    }

    /// Registers a game and returns the registered record.
    #[instrument(skip(self, registration), fields(step = %self.step(), game_id = %registration.game_id))]
    pub fn register_game(&mut self, registration: Registration) -> Result<&GameRecord, WizardError> {
        let next = self.state.register_game(&registration);
        self.apply(next)?;
        self.state
            .selected_game()
            .ok_or_else(|| WizardError::InvariantViolation("Registration left no selected game".to_string()))
    }

    /// Goes back to game registration to enter another game.
    #[instrument(skip(self), fields(step = %self.step()))]
    pub fn change_game(&mut self) -> Result<(), WizardError> {
        let next = self.state.change_game();
        self.apply(next)
    }

    /// Alias of [`Wizard::change_game`].
    pub fn continue_with_another_game(&mut self) -> Result<(), WizardError> {
        self.change_game()
    }

    /// Checks a registration against the current state without applying it.
    pub fn check_registration(&self, registration: &Registration) -> Result<(), WizardError> {
        self.state.check_registration(registration)
    }

    // ─────────────────────────────────────────────────────────────
    //  External Workflows
    // ─────────────────────────────────────────────────────────────

    /// Asks the collaborator to open game creation.
    pub fn request_create_game(&mut self) {
        self.request(WorkflowRequest::CreateGame);
    }

    /// Asks the collaborator to open game integration.
    pub fn request_integrate_game(&mut self) {
        self.request(WorkflowRequest::IntegrateGame);
    }

    /// Asks the collaborator to open review submission.
    pub fn request_submit_for_review(&mut self) {
        self.request(WorkflowRequest::SubmitForReview);
    }

    /// Forwards a workflow request. The wizard state is not touched.
    #[instrument(skip(self), fields(step = %self.step()))]
    pub fn request(&mut self, request: WorkflowRequest) {
        request.dispatch(&mut self.hooks);
    }
}
