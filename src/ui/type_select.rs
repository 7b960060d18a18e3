//! Business type picker

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::listing::BusinessKind;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const PICKER_WIDTH: u16 = 48;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let width = PICKER_WIDTH.min(area.width);
    let column = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        width,
        ..area
    };

    let mut constraints = vec![Constraint::Min(0), Constraint::Length(2)];
    constraints.extend(BusinessKind::ALL.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.extend([Constraint::Length(3), Constraint::Min(0)]);
    let chunks = Layout::vertical(constraints).split(column);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "What does your business offer?",
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        chunks[1],
    );

    for (index, kind) in BusinessKind::ALL.iter().enumerate() {
        render_button(
            frame,
            chunks[index + 2],
            &(index + 1).to_string(),
            kind.label(),
            index == app.state.kind_cursor,
        );
    }

    let selected = app.state.selected_kind();
    let mut hint = vec![Line::from(Span::styled(
        selected.description(),
        Style::default().fg(Color::Gray),
    ))];
    if app.state.wizard.is_some() {
        hint.push(Line::from(Span::styled(
            "Values already entered are kept when switching",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(hint).wrap(Wrap { trim: true }),
        chunks[BusinessKind::ALL.len() + 2],
    );
}
