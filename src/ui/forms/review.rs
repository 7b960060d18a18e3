//! Review step: summary, payload preview and the terms checkbox

use super::field_renderer::{draw_field, FieldContext};
use crate::listing::business::{label_for, CATEGORIES, REGIONS};
use crate::listing::payload::to_payload;
use crate::listing::{FieldPath, SubmissionStatus, Wizard};
use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, wizard: &Wizard, app_state: &AppState) {
    let [summary_area, preview_area, terms_area, status_area] = Layout::vertical([
        Constraint::Length(7),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(summary_lines(wizard)).wrap(Wrap { trim: true }),
        summary_area,
    );

    let preview = match serde_json::to_string_pretty(&to_payload(wizard.state())) {
        Ok(json) => json,
        Err(e) => format!("payload unavailable: {e}"),
    };
    let status = wizard.status();
    let border_color = if status.is_success() {
        Color::Green
    } else if status.is_error() {
        Color::Red
    } else {
        Color::DarkGray
    };
    frame.render_widget(
        Paragraph::new(preview)
            .style(Style::default().fg(Color::Gray))
            .scroll((app_state.scroll_offset as u16, 0))
            .block(
                Block::default()
                    .title(" Payload (↑/↓ to scroll) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            ),
        preview_area,
    );

    let ctx = FieldContext {
        form: wizard.state(),
        is_active: true,
        option_cursor: 0,
        list_draft: "",
        error: wizard.errors().message_for(FieldPath::AcceptedTerms),
    };
    draw_field(frame, terms_area, FieldPath::AcceptedTerms, &ctx);

    frame.render_widget(Paragraph::new(status_line(wizard)), status_area);
}

fn summary_lines(wizard: &Wizard) -> Vec<Line<'static>> {
    let form = wizard.state();
    let key = Style::default().fg(Color::DarkGray);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let row = |label: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), key),
            Span::styled(text, value),
        ])
    };

    let region = label_for(REGIONS, &form.region).unwrap_or("-").to_string();
    let mut categories: Vec<&str> = Vec::new();
    if let Some(product) = form.product_data.as_ref() {
        categories.push(&product.primary_category);
        categories.extend(product.categories.iter().map(String::as_str));
    }
    if let Some(service) = form.service_data.as_ref() {
        categories.extend(service.categories.iter().map(String::as_str));
    }
    categories.dedup();
    let category_labels = categories
        .iter()
        .filter_map(|c| label_for(CATEGORIES, c))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        row("Business", form.business_name.clone()),
        row("Offers", wizard.business_kind().label().to_string()),
        row("Region", region),
        row("Email", form.contact.email.clone()),
        row("Categories", category_labels),
    ];

    let errors = wizard.errors().len();
    if errors > 0 {
        lines.push(Line::from(Span::styled(
            format!("{errors} field(s) still need attention"),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

fn status_line(wizard: &Wizard) -> Line<'static> {
    match wizard.status() {
        SubmissionStatus::Idle => Line::from(Span::styled(
            match wizard.editing() {
                Some(_) => "Ready to save changes",
                None => "Ready to publish",
            },
            Style::default().fg(Color::DarkGray),
        )),
        SubmissionStatus::Pending => {
            Line::from(Span::styled("Submitting…", Style::default().fg(Color::Yellow)))
        }
        SubmissionStatus::Succeeded(id) => Line::from(Span::styled(
            format!("Saved as {id}"),
            Style::default().fg(Color::Green),
        )),
        SubmissionStatus::Failed(message) => Line::from(Span::styled(
            format!("Last attempt failed: {message}"),
            Style::default().fg(Color::Red),
        )),
    }
}
