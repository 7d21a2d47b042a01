//! Signup controller: the event loop driving the wizard screens.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use derive_getters::Getters;
use ratatui::{Frame, Terminal, backend::Backend};
use spotlight_wizard::{RecordingHooks, Step, Wizard, WizardError};
use tracing::{debug, info, instrument, warn};

use crate::CampaignConfig;
use crate::tui::screen::{Screen, ScreenContext, ScreenTransition};
use crate::tui::screens::{CompleteScreen, ContactFormScreen, GameRegistrationScreen};

/// Active screen in the signup TUI.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Contact form, first step or editing.
    Contact(ContactFormScreen),
    /// Game registration form.
    GameRegistration(GameRegistrationScreen),
    /// Registration summary.
    Complete(CompleteScreen),
}

impl ActiveScreen {
    fn render(&self, frame: &mut Frame, ctx: &ScreenContext<'_>) {
        match self {
            Self::Contact(s) => s.render(frame, ctx),
            Self::GameRegistration(s) => s.render(frame, ctx),
            Self::Complete(s) => s.render(frame, ctx),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext<'_>) -> ScreenTransition {
        match self {
            Self::Contact(s) => s.handle_key(key, ctx),
            Self::GameRegistration(s) => s.handle_key(key, ctx),
            Self::Complete(s) => s.handle_key(key, ctx),
        }
    }
}

/// Controller that owns the wizard session and drives the screens.
///
/// Call [`SignupController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct SignupController {
    wizard: Wizard<RecordingHooks>,
    campaign: CampaignConfig,
    notice: Option<String>,
}

impl SignupController {
    /// Creates a controller over a fresh wizard session.
    #[instrument(skip(wizard, campaign))]
    pub fn new(wizard: Wizard<RecordingHooks>, campaign: CampaignConfig) -> Self {
        info!(step = %wizard.step(), "Creating SignupController");
        Self {
            wizard,
            campaign,
            notice: None,
        }
    }

    /// Read-only view handed to screens.
    pub fn context(&self) -> ScreenContext<'_> {
        ScreenContext {
            wizard: &self.wizard,
            campaign: &self.campaign,
            notice: self.notice.as_deref(),
        }
    }

    /// The screen matching the wizard's current step.
    #[instrument(skip(self), fields(step = %self.wizard.step()))]
    pub fn screen_for_step(&self) -> ActiveScreen {
        match self.wizard.step() {
            Step::NeedsContactInfo => ActiveScreen::Contact(ContactFormScreen::new()),
            Step::NeedsGameRegistration => {
                ActiveScreen::GameRegistration(GameRegistrationScreen::new(&self.context()))
            }
            Step::Complete => ActiveScreen::Complete(CompleteScreen::new()),
        }
    }

    /// Runs the event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting signup event loop");
        let mut screen = self.screen_for_step();

        loop {
            self.draw(terminal, &screen)?;

            // Poll with a short timeout to keep the loop responsive.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                screen = match self.handle_key(key, screen) {
                    Some(next) => next,
                    None => {
                        info!("Signup quitting");
                        return Ok(());
                    }
                };
            }
        }
    }

    /// Draws one frame of the given screen.
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>, screen: &ActiveScreen) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        let ctx = self.context();
        terminal.draw(|f| screen.render(f, &ctx))?;
        Ok(())
    }

    /// Feeds one key to the screen, returning the next screen or `None` to quit.
    pub fn handle_key(&mut self, key: KeyEvent, mut screen: ActiveScreen) -> Option<ActiveScreen> {
        let transition = screen.handle_key(key, &self.context());
        self.apply_transition(transition, screen)
    }

    /// Applies a screen transition to the wizard.
    #[instrument(skip(self, current))]
    fn apply_transition(&mut self, transition: ScreenTransition, current: ActiveScreen) -> Option<ActiveScreen> {
        debug!(transition = ?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::SubmitContact(contact) => match self.wizard.submit_contact_info(contact) {
                Ok(()) => {
                    self.notice = None;
                    Some(self.screen_for_step())
                }
                Err(e) => Some(self.reject(e, current)),
            },

            ScreenTransition::EditContact => match self.wizard.contact_info() {
                Some(contact) => Some(ActiveScreen::Contact(ContactFormScreen::prefilled(contact))),
                None => Some(current),
            },

            ScreenTransition::CancelEdit => Some(self.screen_for_step()),

            ScreenTransition::Register(registration) => {
                let result = self.wizard.register_game(registration).map(|g| g.id().clone());
                match result {
                    Ok(game_id) => {
                        info!(%game_id, "Registration accepted");
                        self.notice = None;
                        Some(self.screen_for_step())
                    }
                    Err(e) => Some(self.reject(e, current)),
                }
            }

            ScreenTransition::ChangeGame => match self.wizard.change_game() {
                Ok(()) => {
                    self.notice = None;
                    Some(self.screen_for_step())
                }
                Err(e) => Some(self.reject(e, current)),
            },

            ScreenTransition::Request(request) => {
                self.wizard.request(request);
                self.notice = Some(request.to_string());
                Some(current)
            }

            ScreenTransition::Quit => None,
        }
    }

    /// Routes a rejection to the screen's field errors, or to the notice.
    fn reject(&mut self, error: WizardError, mut current: ActiveScreen) -> ActiveScreen {
        warn!(error = %error, "Action rejected");
        match (error, &mut current) {
            (WizardError::Invalid(errors), ActiveScreen::Contact(screen)) => screen.show_errors(errors),
            (WizardError::Invalid(errors), ActiveScreen::GameRegistration(screen)) => screen.show_errors(errors),
            (other, _) => self.notice = Some(other.to_string()),
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use spotlight_wizard::{Catalog, Field, GameId, RegistrationRules, WorkflowRequest};

    fn controller() -> SignupController {
        let wizard = Wizard::new(Catalog::sample(), RegistrationRules::default(), RecordingHooks::new());
        SignupController::new(wizard, CampaignConfig::default())
    }

    fn press(controller: &mut SignupController, screen: ActiveScreen, code: KeyCode) -> ActiveScreen {
        controller
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE), screen)
            .expect("screen should not quit")
    }

    fn type_text(controller: &mut SignupController, mut screen: ActiveScreen, text: &str) -> ActiveScreen {
        for c in text.chars() {
            screen = press(controller, screen, KeyCode::Char(c));
        }
        screen
    }

    fn through_contact(controller: &mut SignupController) -> ActiveScreen {
        let screen = controller.screen_for_step();
        let screen = type_text(controller, screen, "13800000000");
        let screen = press(controller, screen, KeyCode::Tab);
        let screen = type_text(controller, screen, "abc");
        press(controller, screen, KeyCode::Enter)
    }

    fn screen_text(controller: &SignupController, screen: &ActiveScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).expect("test terminal");
        controller.draw(&mut terminal, screen).expect("draw");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_keyboard_flow_to_completion() {
        let mut controller = controller();
        let screen = through_contact(&mut controller);
        assert_eq!(controller.wizard().step(), Step::NeedsGameRegistration);
        assert!(matches!(screen, ActiveScreen::GameRegistration(_)));

        // game-1 is highlighted first; pick the first theme and describe it.
        let screen = press(&mut controller, screen, KeyCode::Right);
        let screen = press(&mut controller, screen, KeyCode::Tab);
        let screen = press(&mut controller, screen, KeyCode::Tab);
        let screen = type_text(&mut controller, screen, "一个关于重力玩法的创新设计");
        let screen = press(&mut controller, screen, KeyCode::Enter);

        assert_eq!(controller.wizard().step(), Step::Complete);
        assert!(matches!(screen, ActiveScreen::Complete(_)));
        let selected = controller.wizard().selected_game().expect("selected");
        assert_eq!(selected.id(), &GameId::from("game-1"));
        assert_eq!(selected.theme(), Some("重力"));

        let screen = press(&mut controller, screen, KeyCode::Char('a'));
        assert_eq!(controller.wizard().step(), Step::NeedsGameRegistration);
        assert!(screen_text(&controller, &screen).contains("registered: "));
        assert!(
            controller
                .wizard()
                .registered_games()
                .any(|g| g.id() == &GameId::from("game-1"))
        );
    }

    #[test]
    fn test_bad_contact_stays_on_form_with_errors() {
        let mut controller = controller();
        let screen = controller.screen_for_step();
        let screen = type_text(&mut controller, screen, "123");
        let screen = press(&mut controller, screen, KeyCode::Enter);

        assert_eq!(controller.wizard().step(), Step::NeedsContactInfo);
        match &screen {
            ActiveScreen::Contact(form) => {
                assert_eq!(form.errors().get(Field::Phone), Some("invalid phone format"));
                assert_eq!(form.errors().get(Field::Wechat), Some("wechat required"));
            }
            other => panic!("expected contact form, got {:?}", other),
        }
        assert!(screen_text(&controller, &screen).contains("invalid phone format"));
    }

    #[test]
    fn test_missing_theme_reported_on_form() {
        let mut controller = controller();
        let screen = through_contact(&mut controller);
        let screen = press(&mut controller, screen, KeyCode::Enter);

        assert_eq!(controller.wizard().step(), Step::NeedsGameRegistration);
        match &screen {
            ActiveScreen::GameRegistration(form) => {
                assert_eq!(form.errors().get(Field::Theme), Some("theme required"));
                assert_eq!(form.errors().get(Field::Description), Some("description required"));
            }
            other => panic!("expected registration form, got {:?}", other),
        }
    }

    #[test]
    fn test_workflow_hotkeys_set_notice() {
        let mut controller = controller();
        let screen = through_contact(&mut controller);
        let screen = press(&mut controller, screen, KeyCode::Char('n'));
        let screen = press(&mut controller, screen, KeyCode::Char('i'));

        assert_eq!(
            controller.wizard().hooks().requests(),
            [WorkflowRequest::CreateGame, WorkflowRequest::IntegrateGame]
        );
        assert_eq!(
            controller.notice().as_deref(),
            Some("Redirecting to the game integration page")
        );
        assert_eq!(controller.wizard().step(), Step::NeedsGameRegistration);
        assert!(screen_text(&controller, &screen).contains("Redirecting to the game integration page"));
    }

    #[test]
    fn test_edit_contact_and_cancel() {
        let mut controller = controller();
        let screen = through_contact(&mut controller);
        let screen = press(&mut controller, screen, KeyCode::Char('e'));
        match &screen {
            ActiveScreen::Contact(form) => {
                assert!(*form.editing());
                assert_eq!(form.phone(), "13800000000");
            }
            other => panic!("expected contact form, got {:?}", other),
        }
        let screen = press(&mut controller, screen, KeyCode::Esc);
        assert!(matches!(screen, ActiveScreen::GameRegistration(_)));
    }

    #[test]
    fn test_quit_from_first_step() {
        let mut controller = controller();
        let screen = controller.screen_for_step();
        assert!(
            controller
                .handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), screen)
                .is_none()
        );
    }

    #[test]
    fn test_header_shows_campaign_and_progress() {
        let controller = controller();
        let text = screen_text(&controller, &controller.screen_for_step());
        assert!(text.contains("Spotlight Themed Game Creation Call #1"));
        assert!(text.contains("1 contact info"));
    }
}
