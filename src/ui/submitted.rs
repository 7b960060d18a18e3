//! Confirmation shown after the listing service accepts a submission

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let [_, body, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .areas(area);

    let edited = app
        .state
        .wizard
        .as_ref()
        .and_then(|w| w.editing())
        .is_some();
    let headline = if edited {
        "✓ Listing updated"
    } else {
        "✓ Listing submitted"
    };
    let id = app
        .state
        .last_submitted
        .map(|id| id.to_string())
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Listing id ", Style::default().fg(Color::DarkGray)),
            Span::raw(id),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "n: start another listing   y: copy id   q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
}
