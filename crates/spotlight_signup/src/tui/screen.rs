//! Screen trait and transition type for the signup TUI.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use spotlight_wizard::{ContactInfo, RecordingHooks, Registration, Wizard, WorkflowRequest};

use crate::CampaignConfig;

/// Read-only data every screen can draw from.
#[derive(Debug, Clone, Copy)]
pub struct ScreenContext<'a> {
    /// The wizard session.
    pub wizard: &'a Wizard<RecordingHooks>,
    /// Campaign settings for the header.
    pub campaign: &'a CampaignConfig,
    /// Message from the last workflow request or rejected action.
    pub notice: Option<&'a str>,
}

/// The result of handling an input event on a screen.
///
/// Screens never touch the wizard themselves. They return one of these and
/// the [`SignupController`](crate::tui::SignupController) applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Submit the contact form.
    SubmitContact(ContactInfo),
    /// Open the contact form to edit recorded contact info.
    EditContact,
    /// Leave the contact form without saving.
    CancelEdit,
    /// Submit a game registration.
    Register(Registration),
    /// Go back and register another game.
    ChangeGame,
    /// Hand off to an external workflow.
    Request(WorkflowRequest),
    /// Exit the application.
    Quit,
}

/// Trait implemented by each screen of the wizard.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, ctx: &ScreenContext<'_>);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext<'_>) -> ScreenTransition;
}
