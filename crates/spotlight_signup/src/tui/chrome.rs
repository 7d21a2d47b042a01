//! Header, progress and footer shared by every screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use spotlight_wizard::Step;
use strum::IntoEnumIterator;

use crate::tui::screen::ScreenContext;

/// Height of the header block.
pub const HEADER_HEIGHT: u16 = 4;
/// Height of the footer block.
pub const FOOTER_HEIGHT: u16 = 4;

/// Splits the frame into header, body and footer.
pub fn layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Step indicator, e.g. `● 1 contact info ─ ○ 2 game registration ─ ○ 3 complete`.
pub fn progress_line(current: Step) -> Line<'static> {
    let mut spans = Vec::new();
    for step in Step::iter() {
        if !spans.is_empty() {
            spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
        }
        let (marker, style) = if step == current {
            ("●", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else if step.number() < current.number() {
            ("✓", Style::default().fg(Color::Green))
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("{} {} {}", marker, step.number(), step), style));
    }
    Line::from(spans)
}

/// Campaign title, period and progress.
pub fn render_header(frame: &mut Frame, area: Rect, ctx: &ScreenContext<'_>) {
    let lines = vec![
        Line::from(Span::styled(
            format!("{}  ({})", ctx.campaign.title(), ctx.campaign.period_label()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        progress_line(ctx.wizard.step()),
    ];
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Key help plus the current notice, if any.
pub fn render_footer(frame: &mut Frame, area: Rect, help: &str, ctx: &ScreenContext<'_>) {
    let mut lines = vec![Line::from(Span::styled(
        help.to_string(),
        Style::default().fg(Color::DarkGray),
    ))];
    if let Some(notice) = ctx.notice {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Magenta),
        )));
    }
    let footer = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// A red error line, or an empty line when there is no error.
pub fn error_line(message: Option<&str>) -> Line<'static> {
    match message {
        Some(m) => Line::from(Span::styled(m.to_string(), Style::default().fg(Color::Red))),
        None => Line::from(""),
    }
}
