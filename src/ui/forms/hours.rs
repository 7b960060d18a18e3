//! Weekly opening hours grid

use super::field_renderer::draw_field_with_value;
use crate::listing::validators::is_time_of_day;
use crate::listing::{DayOfWeek, FieldPath, Wizard};
use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const ROW_HEIGHT: u16 = 3;

/// One row per day: closed toggle, opening time, closing time, error
pub fn draw(frame: &mut Frame, area: Rect, wizard: &Wizard, app_state: &AppState) {
    let Some(product) = wizard.state().product_data.as_ref() else {
        return;
    };
    let fields = wizard.current_step().fields();
    let active = fields.get(app_state.active_field).copied();
    let active_row = app_state.active_field / 3;

    let rows_that_fit = (area.height / ROW_HEIGHT).max(1) as usize;
    let start = (active_row + 1).saturating_sub(rows_that_fit);

    for (row, day) in DayOfWeek::ALL.into_iter().enumerate().skip(start) {
        let y = area.y + (row - start) as u16 * ROW_HEIGHT;
        if y + ROW_HEIGHT > area.y + area.height {
            break;
        }
        let Some(hours) = product.hours_for(day) else {
            continue;
        };
        let row_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: ROW_HEIGHT,
        };
        let [label_area, closed_area, open_area, close_area, error_area] = Layout::horizontal([
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .areas(row_area);

        let day_style = if active_row == row {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(day.label(), day_style))),
            Rect {
                y: label_area.y + 1,
                height: 1,
                ..label_area
            },
        );

        draw_field_with_value(
            frame,
            closed_area,
            "Closed",
            if hours.closed { "[x]" } else { "[ ]" },
            active == Some(FieldPath::HoursClosed(day)),
            None,
        );

        let times = [
            (open_area, "Opens", &hours.open, FieldPath::HoursOpen(day)),
            (close_area, "Closes", &hours.close, FieldPath::HoursClose(day)),
        ];
        for (time_area, label, value, field) in times {
            let shown = if hours.closed { "--:--" } else { value.as_str() };
            let malformed = !hours.closed && !value.trim().is_empty() && !is_time_of_day(value);
            draw_field_with_value(
                frame,
                time_area,
                label,
                shown,
                active == Some(field),
                malformed.then_some("HH:MM"),
            );
        }

        if let Some(message) = wizard.errors().message_for(FieldPath::Hours(day)) {
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
                    .wrap(Wrap { trim: true }),
                Rect {
                    x: error_area.x + 1,
                    width: error_area.width.saturating_sub(1),
                    ..error_area
                },
            );
        }
    }
}
