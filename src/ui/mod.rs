//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod submitted;
mod type_select;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    // Draw main content based on current view
    match app.state.current_view {
        View::TypeSelect => type_select::draw(frame, main_area, app),
        View::Wizard => forms::draw_step(frame, main_area, app),
        View::Submitted => submitted::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Error dialog goes over everything
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}
