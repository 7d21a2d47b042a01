//! Game registration: pick a game, a theme and describe the fit.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use spotlight_wizard::{Field, FieldErrors, GameRecord, Registration, WorkflowRequest};
use tracing::{debug, instrument};

use crate::tui::chrome;
use crate::tui::screen::{Screen, ScreenContext, ScreenTransition};

/// Part of the form that receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationFocus {
    /// The game list.
    Games,
    /// The theme picker.
    Theme,
    /// The description input.
    Description,
}

impl RegistrationFocus {
    fn next(self) -> Self {
        match self {
            Self::Games => Self::Theme,
            Self::Theme => Self::Description,
            Self::Description => Self::Games,
        }
    }
}

/// State for the game registration screen.
///
/// The game list and theme set are read from the wizard on every frame; the
/// screen only keeps cursor positions and the description being typed.
#[derive(Debug, Getters)]
pub struct GameRegistrationScreen {
    list_state: ListState,
    theme_index: Option<usize>,
    description: String,
    focus: RegistrationFocus,
    errors: FieldErrors,
}

impl GameRegistrationScreen {
    /// Creates the screen with the first selectable game highlighted.
    #[instrument(skip(ctx))]
    pub fn new(ctx: &ScreenContext<'_>) -> Self {
        let games = ctx.wizard.games();
        let first = games
            .iter()
            .position(GameRecord::is_selectable)
            .or(if games.is_empty() { None } else { Some(0) });
        let mut list_state = ListState::default();
        list_state.select(first);
        debug!(games = games.len(), selected = ?first, "GameRegistrationScreen initialized");
        Self {
            list_state,
            theme_index: None,
            description: String::new(),
            focus: RegistrationFocus::Games,
            errors: FieldErrors::new(),
        }
    }

    /// Shows errors from a rejected registration.
    pub fn show_errors(&mut self, errors: FieldErrors) {
        debug!(%errors, "Registration rejected");
        self.focus = if errors.contains(Field::Game) {
            RegistrationFocus::Games
        } else if errors.contains(Field::Theme) {
            RegistrationFocus::Theme
        } else {
            RegistrationFocus::Description
        };
        self.errors = errors;
    }

    fn selected_game<'a>(&self, ctx: &ScreenContext<'a>) -> Option<&'a GameRecord> {
        self.list_state.selected().and_then(|i| ctx.wizard.games().get(i))
    }

    fn theme<'a>(&self, ctx: &ScreenContext<'a>) -> Option<&'a str> {
        self.theme_index
            .and_then(|i| ctx.wizard.rules().themes().get(i))
            .map(String::as_str)
    }

    /// Moves the list selection by `delta`, wrapping around.
    fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.list_state.select(Some(next));
    }

    /// Cycles the theme by `delta`, starting from "none chosen".
    fn cycle_theme(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.theme_index {
            None if delta < 0 => len - 1,
            None => 0,
            Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        };
        self.theme_index = Some(next);
    }

    fn registration(&self, ctx: &ScreenContext<'_>) -> Registration {
        Registration::new(
            self.selected_game(ctx).map(|g| g.id().clone()).unwrap_or_default(),
            self.theme(ctx).unwrap_or_default(),
            self.description.as_str(),
        )
    }

    fn game_item(game: &GameRecord) -> ListItem<'static> {
        let (tag, style) = if game.is_registered() {
            (
                format!("registered: {}", game.theme().unwrap_or_default()),
                Style::default().fg(Color::Green),
            )
        } else if let Some(issue) = game.eligibility_issue() {
            (issue.to_string(), Style::default().fg(Color::DarkGray))
        } else {
            ("eligible".to_string(), Style::default().fg(Color::White))
        };
        ListItem::new(Line::from(vec![
            Span::styled(format!("{} ", game.name()), style),
            Span::styled(
                format!("[{} | {}] ", game.game_type(), game.status()),
                Style::default().fg(Color::Blue),
            ),
            Span::styled(tag, style.add_modifier(Modifier::ITALIC)),
        ]))
    }

    fn block(&self, title: &'static str, focus: RegistrationFocus) -> Block<'static> {
        let style = if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        Block::default().borders(Borders::ALL).title(title).border_style(style)
    }
}

impl Screen for GameRegistrationScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &ScreenContext<'_>) {
        let [header, body, footer] = chrome::layout(frame.area());
        chrome::render_header(frame, header, ctx);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body);

        // Left: games.
        let games = ctx.wizard.games();
        let list_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(columns[0]);
        if games.is_empty() {
            let empty = Paragraph::new("No games yet. Press 'n' to create one.")
                .wrap(Wrap { trim: true })
                .block(self.block("Your games", RegistrationFocus::Games));
            frame.render_widget(empty, list_area[0]);
        } else {
            let items: Vec<ListItem> = games.iter().map(Self::game_item).collect();
            let list = List::new(items)
                .block(self.block("Your games", RegistrationFocus::Games))
                .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut list_state = self.list_state;
            frame.render_stateful_widget(list, list_area[0], &mut list_state);
        }
        frame.render_widget(Paragraph::new(chrome::error_line(self.errors.get(Field::Game))), list_area[1]);

        // Right: theme, description and the selected game's remedy.
        let form = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(2),
            ])
            .split(columns[1]);

        let theme_text = match self.theme(ctx) {
            Some(theme) => format!("◀ {} ▶", theme),
            None => "◀ choose a theme ▶".to_string(),
        };
        let theme = Paragraph::new(theme_text).block(self.block("Theme", RegistrationFocus::Theme));
        frame.render_widget(theme, form[0]);
        frame.render_widget(Paragraph::new(chrome::error_line(self.errors.get(Field::Theme))), form[1]);

        let min_chars = ctx.wizard.rules().min_description_chars();
        let description = Paragraph::new(self.description.as_str())
            .wrap(Wrap { trim: false })
            .block(self.block("How does the game express the theme?", RegistrationFocus::Description));
        frame.render_widget(description, form[2]);

        let counter = format!("{}/{} characters", self.description.chars().count(), min_chars);
        let counter_line = match self.errors.get(Field::Description) {
            Some(message) => chrome::error_line(Some(message)),
            None => Line::from(Span::styled(counter, Style::default().fg(Color::DarkGray))),
        };
        frame.render_widget(Paragraph::new(counter_line), form[3]);

        let hint = self
            .selected_game(ctx)
            .and_then(GameRecord::eligibility_issue)
            .map(|issue| match issue.remedy() {
                Some(WorkflowRequest::IntegrateGame) => format!("{}: press 'i' to integrate it", issue),
                Some(WorkflowRequest::SubmitForReview) => format!("{}: press 'r' to submit it", issue),
                _ => issue.to_string(),
            })
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(Color::Magenta))
                .wrap(Wrap { trim: true }),
            form[4],
        );

        let help = match self.focus {
            RegistrationFocus::Description => "Type description | Tab: Next field | Enter: Register | Esc: Back to games",
            _ => "↑↓: Game | ←→: Theme | Tab: Next field | Enter: Register | n: New game | i: Integrate | r: Review | e: Edit contact | q: Quit",
        };
        chrome::render_footer(frame, footer, help, ctx);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext<'_>) -> ScreenTransition {
        let games = ctx.wizard.games().len();
        let themes = ctx.wizard.rules().themes().len();

        if self.focus == RegistrationFocus::Description {
            return match key.code {
                KeyCode::Char(c) => {
                    self.description.push(c);
                    ScreenTransition::Stay
                }
                KeyCode::Backspace => {
                    self.description.pop();
                    ScreenTransition::Stay
                }
                KeyCode::Tab => {
                    self.focus = self.focus.next();
                    ScreenTransition::Stay
                }
                KeyCode::Esc => {
                    self.focus = RegistrationFocus::Games;
                    ScreenTransition::Stay
                }
                KeyCode::Enter => ScreenTransition::Register(self.registration(ctx)),
                _ => ScreenTransition::Stay,
            };
        }

        match key.code {
            KeyCode::Up => {
                self.move_selection(-1, games);
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.move_selection(1, games);
                ScreenTransition::Stay
            }
            KeyCode::Left => {
                self.cycle_theme(-1, themes);
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.cycle_theme(1, themes);
                ScreenTransition::Stay
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => ScreenTransition::Register(self.registration(ctx)),
            KeyCode::Char('n') | KeyCode::Char('N') => ScreenTransition::Request(WorkflowRequest::CreateGame),
            KeyCode::Char('i') | KeyCode::Char('I') => ScreenTransition::Request(WorkflowRequest::IntegrateGame),
            KeyCode::Char('r') | KeyCode::Char('R') => ScreenTransition::Request(WorkflowRequest::SubmitForReview),
            KeyCode::Char('e') | KeyCode::Char('E') => ScreenTransition::EditContact,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
