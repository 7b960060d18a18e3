//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::{COPY_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split the screen into header, content and status bar rows
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let [header, content, _status] = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(0),    // Content
        Constraint::Length(1), // Status bar
    ])
    .areas(area);
    (header, content)
}

/// Draw the title and, inside the wizard, the step tracker
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.state.wizard.as_ref().and_then(|w| w.editing()) {
        Some(id) => format!(" Edit listing {id} "),
        None => " New listing ".to_string(),
    };

    let mut spans = Vec::new();
    if let (View::Wizard, Some(wizard)) = (app.state.current_view, app.state.wizard.as_ref()) {
        let current = wizard.current_index();
        for (index, step) in wizard.steps().iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
            }
            let failing = wizard.errors().iter().any(|(field, _)| step.owns(field));
            let style = if failing {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else if index == current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if index < current {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let marker = if index < current { "✓" } else { "" };
            spans.push(Span::styled(
                format!("{}{} {}", marker, index + 1, step.title),
                style,
            ));
        }
    } else {
        spans.push(Span::styled(
            "List your business in a few steps",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Connection status
    let conn_status = if app.state.service_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    spans.push(Span::styled(
        get_view_hints(app),
        Style::default().fg(Color::Black),
    ));

    // Copy message
    if let Some(msg) = &app.copy_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    match app.state.current_view {
        View::TypeSelect if app.state.wizard.is_some() => {
            "j/k:nav  Enter:select  1-3:pick  Esc:back to form  q:quit".to_string()
        }
        View::TypeSelect => "j/k:nav  Enter:select  1-3:pick  q:quit".to_string(),
        View::Wizard => format!(
            "Tab:field  ^N/PgDn:next  ^P/PgUp:back  Alt+n:step  {SUBMIT_SHORTCUT}:submit  {COPY_SHORTCUT}:copy JSON  Esc:back"
        ),
        View::Submitted => "n:new listing  y:copy id  q:quit".to_string(),
    }
}
