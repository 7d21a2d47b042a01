//! Contact form: phone and WeChat.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use spotlight_wizard::{ContactInfo, Field, FieldErrors};
use tracing::{debug, instrument};

use crate::tui::chrome;
use crate::tui::screen::{Screen, ScreenContext, ScreenTransition};

/// Input that currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFocus {
    /// The phone input.
    Phone,
    /// The WeChat input.
    Wechat,
}

impl ContactFocus {
    fn toggle(self) -> Self {
        match self {
            Self::Phone => Self::Wechat,
            Self::Wechat => Self::Phone,
        }
    }
}

/// State for the contact form.
///
/// Used for the first step and, prefilled, for editing later.
#[derive(Debug, Getters)]
pub struct ContactFormScreen {
    phone: String,
    wechat: String,
    focus: ContactFocus,
    errors: FieldErrors,
    editing: bool,
}

impl ContactFormScreen {
    /// Empty form for the first step.
    #[instrument]
    pub fn new() -> Self {
        Self {
            phone: String::new(),
            wechat: String::new(),
            focus: ContactFocus::Phone,
            errors: FieldErrors::new(),
            editing: false,
        }
    }

    /// Form prefilled with recorded contact info.
    #[instrument(skip(contact))]
    pub fn prefilled(contact: &ContactInfo) -> Self {
        Self {
            phone: contact.phone().clone(),
            wechat: contact.wechat().clone(),
            editing: true,
            ..Self::new()
        }
    }

    /// Shows errors from a rejected submission.
    pub fn show_errors(&mut self, errors: FieldErrors) {
        debug!(%errors, "Contact form rejected");
        self.focus = if errors.contains(Field::Phone) {
            ContactFocus::Phone
        } else {
            ContactFocus::Wechat
        };
        self.errors = errors;
    }

    fn input_mut(&mut self) -> &mut String {
        match self.focus {
            ContactFocus::Phone => &mut self.phone,
            ContactFocus::Wechat => &mut self.wechat,
        }
    }

    fn input_block(&self, title: &'static str, focus: ContactFocus) -> Block<'static> {
        let style = if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        Block::default().borders(Borders::ALL).title(title).border_style(style)
    }
}

impl Default for ContactFormScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ContactFormScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &ScreenContext<'_>) {
        let [header, body, footer] = chrome::layout(frame.area());
        chrome::render_header(frame, header, ctx);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(body);

        let phone = Paragraph::new(self.phone.as_str()).block(self.input_block("Phone (11 digits)", ContactFocus::Phone));
        frame.render_widget(phone, rows[0]);
        frame.render_widget(Paragraph::new(chrome::error_line(self.errors.get(Field::Phone))), rows[1]);

        let wechat = Paragraph::new(self.wechat.as_str()).block(self.input_block("WeChat", ContactFocus::Wechat));
        frame.render_widget(wechat, rows[2]);
        frame.render_widget(Paragraph::new(chrome::error_line(self.errors.get(Field::Wechat))), rows[3]);

        let intro = if self.editing {
            Line::from("Editing contact info. Your registration is kept.")
        } else {
            Line::from("We will reach you here about your submission.")
        };
        frame.render_widget(Paragraph::new(intro), rows[4]);

        let help = if self.editing {
            "Tab: Switch field | Enter: Save | Esc: Cancel"
        } else {
            "Tab: Switch field | Enter: Next | Esc: Quit"
        };
        chrome::render_footer(frame, footer, help, ctx);
    }

    #[instrument(skip(self, key, _ctx))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &ScreenContext<'_>) -> ScreenTransition {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = self.focus.toggle();
                ScreenTransition::Stay
            }
            KeyCode::Char(c) => {
                self.input_mut().push(c);
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                self.input_mut().pop();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                ScreenTransition::SubmitContact(ContactInfo::new(self.phone.as_str(), self.wechat.as_str()))
            }
            KeyCode::Esc if self.editing => ScreenTransition::CancelEdit,
            KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
