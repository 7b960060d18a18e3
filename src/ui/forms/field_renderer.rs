//! Field rendering utilities for forms

use crate::listing::business::label_for;
use crate::listing::{FieldKind, FieldPath, FieldValue, FormState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Everything a field needs to draw itself
pub struct FieldContext<'a> {
    pub form: &'a FormState,
    pub is_active: bool,
    pub option_cursor: usize,
    pub list_draft: &'a str,
    pub error: Option<&'a str>,
}

/// Rows a field takes, borders included
pub fn field_height(field: FieldPath, form: &FormState) -> u16 {
    match field.kind() {
        FieldKind::Multiline => 6,
        FieldKind::MultiChoice(choices) if choices.len() > 4 => 5,
        FieldKind::List => {
            let items = field.read(form).as_items().len() as u16;
            (items + 3).clamp(3, 7)
        }
        _ => 3,
    }
}

/// Draw a form field from the listing state
pub fn draw_field(frame: &mut Frame, area: Rect, field: FieldPath, ctx: &FieldContext) {
    let value = field.read(ctx.form);
    let lines = match field.kind() {
        FieldKind::Text | FieldKind::Multiline => text_lines(value.as_text(), ctx.is_active),
        FieldKind::Choice(choices) => {
            let current = value.as_text();
            let label = match label_for(choices, current) {
                Some(label) => label.to_string(),
                None if current.is_empty() => "(choose)".to_string(),
                None => current.to_string(),
            };
            let mut spans = vec![Span::styled(label, value_style(ctx.is_active))];
            if ctx.is_active {
                spans.push(Span::styled(
                    "  ◀ ▶",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            vec![Line::from(spans)]
        }
        FieldKind::MultiChoice(choices) => {
            let selected = value.as_items();
            let spans = choices
                .iter()
                .enumerate()
                .flat_map(|(i, choice)| {
                    let mark = if selected.iter().any(|v| v == choice.value) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    let style = if ctx.is_active && i == ctx.option_cursor {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        value_style(ctx.is_active)
                    };
                    [
                        Span::styled(format!("{mark} {}", choice.label), style),
                        Span::raw("  "),
                    ]
                })
                .collect::<Vec<_>>();
            vec![Line::from(spans)]
        }
        FieldKind::Toggle => {
            let checked = matches!(value, FieldValue::Flag(true));
            let mark = if checked { "[x]" } else { "[ ]" };
            vec![Line::from(Span::styled(
                format!("{mark} {}", field.label()),
                value_style(ctx.is_active),
            ))]
        }
        FieldKind::List => {
            let mut lines: Vec<Line> = value
                .as_items()
                .iter()
                .map(|item| {
                    Line::from(Span::styled(format!("• {item}"), value_style(ctx.is_active)))
                })
                .collect();
            if ctx.is_active {
                lines.push(Line::from(vec![
                    Span::styled("+ ", Style::default().fg(Color::DarkGray)),
                    Span::raw(ctx.list_draft.to_string()),
                    Span::styled(CURSOR, Style::default().fg(Color::Cyan)),
                ]));
            } else if lines.is_empty() {
                lines.push(Line::from(Span::styled("(empty)", value_style(false))));
            }
            lines
        }
        FieldKind::Hours => Vec::new(),
    };

    let title = match field.kind() {
        FieldKind::Toggle => " ".to_string(),
        _ => format!(" {} ", field.label()),
    };
    render_block(frame, area, lines, &title, ctx.is_active, ctx.error);
}

/// Draw a form field with custom display value
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    error: Option<&str>,
) {
    let lines = text_lines(value, is_active);
    render_block(frame, area, lines, &format!(" {label} "), is_active, error);
}

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn text_lines(value: &str, is_active: bool) -> Vec<Line<'static>> {
    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let mut lines: Vec<Line> = display_value
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), value_style(is_active))))
        .collect();
    if is_active {
        let cursor = Span::styled(CURSOR, Style::default().fg(Color::Cyan));
        match lines.last_mut() {
            Some(last) => last.spans.push(cursor),
            None => lines.push(Line::from(cursor)),
        }
    }
    lines
}

fn render_block(
    frame: &mut Frame,
    area: Rect,
    lines: Vec<Line<'static>>,
    title: &str,
    is_active: bool,
    error: Option<&str>,
) {
    let border_style = match (is_active, error.is_some()) {
        (true, _) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Red),
        (false, false) => Style::default().fg(Color::DarkGray),
    };

    let mut block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }

    // keep the cursor line in view for long multiline values
    let inner_height = area.height.saturating_sub(2);
    let scroll = if is_active {
        (lines.len() as u16).saturating_sub(inner_height)
    } else {
        0
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(block),
        area,
    );
}
