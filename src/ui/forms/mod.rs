//! Step form rendering

mod field_renderer;
mod hours;
mod review;

use crate::app::App;
use crate::listing::{StepKind, Wizard};
use crate::state::AppState;
use field_renderer::{draw_field, field_height, FieldContext};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the current wizard step
pub fn draw_step(frame: &mut Frame, area: Rect, app: &App) {
    let Some(wizard) = app.state.wizard.as_ref() else {
        return;
    };
    let step = wizard.current_step();
    let block = Block::default()
        .title(format!(
            " Step {} of {}: {} ",
            wizard.current_index() + 1,
            wizard.steps().len(),
            step.title
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area).inner(Margin::new(1, 0));
    frame.render_widget(block, area);

    match step.kind {
        StepKind::OpeningHours => hours::draw(frame, inner, wizard, &app.state),
        StepKind::Review => review::draw(frame, inner, wizard, &app.state),
        _ => draw_fields(frame, inner, wizard, &app.state),
    }
}

/// Draw the step's fields top to bottom, scrolled so the active one shows
fn draw_fields(frame: &mut Frame, area: Rect, wizard: &Wizard, app_state: &AppState) {
    let form = wizard.state();
    let fields = wizard.current_step().fields();
    let heights: Vec<u16> = fields.iter().map(|f| field_height(*f, form)).collect();
    let start = first_visible(&heights, app_state.active_field, area.height);

    let mut y = area.y;
    for (index, field) in fields.iter().enumerate().skip(start) {
        let height = heights[index];
        if y + height > area.y + area.height {
            break;
        }
        let ctx = FieldContext {
            form,
            is_active: index == app_state.active_field,
            option_cursor: app_state.option_cursor,
            list_draft: &app_state.list_draft,
            error: wizard.errors().message_for(*field),
        };
        draw_field(
            frame,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height,
            },
            *field,
            &ctx,
        );
        y += height;
    }
}

/// Index of the first row to draw so that `active` fits in `available` rows
fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    let active = active.min(heights.len().saturating_sub(1));
    let mut start = 0;
    while start < active {
        let used: u16 = heights[start..=active].iter().sum();
        if used <= available {
            break;
        }
        start += 1;
    }
    start
}
