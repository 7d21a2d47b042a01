//! Completion screen: summary of the registration.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::instrument;

use crate::tui::chrome;
use crate::tui::screen::{Screen, ScreenContext, ScreenTransition};

/// Shows what was registered and offers another round.
#[derive(Debug, Default)]
pub struct CompleteScreen;

impl CompleteScreen {
    /// Creates the screen.
    pub fn new() -> Self {
        Self
    }
}

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<13}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_string()),
    ])
}

impl Screen for CompleteScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &ScreenContext<'_>) {
        let [header, body, footer] = chrome::layout(frame.area());
        chrome::render_header(frame, header, ctx);

        let mut lines = vec![
            Line::from(Span::styled(
                "Registration submitted",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        if let Some(game) = ctx.wizard.selected_game() {
            lines.push(field("Game", game.name()));
            lines.push(field("Type", &game.game_type().to_string()));
            lines.push(field("Theme", game.theme().unwrap_or_default()));
            lines.push(field("Description", game.description().unwrap_or_default()));
        }
        if let Some(contact) = ctx.wizard.contact_info() {
            lines.push(Line::from(""));
            lines.push(field("Phone", contact.phone()));
            lines.push(field("WeChat", contact.wechat()));
        }
        let earlier = ctx.wizard.registered_games().count();
        if earlier > 0 {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Also registered earlier: {} game(s)", earlier)));
        }

        let summary = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Done"));
        frame.render_widget(summary, body);

        chrome::render_footer(frame, footer, "a: Register another game | e: Edit contact | q: Quit", ctx);
    }

    #[instrument(skip(self, key, _ctx))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &ScreenContext<'_>) -> ScreenTransition {
        match key.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Enter => ScreenTransition::ChangeGame,
            KeyCode::Char('e') | KeyCode::Char('E') => ScreenTransition::EditContact,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
