//! Question screen rendering
//!
//! One screen serves every question: the prompt, the image line when the
//! question carries a picture, then either a row of answer buttons or the
//! typed-input fields.

use super::header;
use crate::app::{AppMode, AppState};
use crate::theme::Styles;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the current question in the given area
pub fn render_question_in_area(f: &mut Frame, state: &AppState, area: Rect) {
    let Some(prompt) = state.prompt() else {
        return;
    };

    let field_rows = state.fields.len() as u16 * 3;
    let input_height = match state.mode {
        AppMode::FieldQuestion => field_rows,
        // Buttons, then the optional typed stage field
        _ => 3 + field_rows,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Progress
            Constraint::Min(3),               // Prompt
            Constraint::Length(2),            // Image line
            Constraint::Length(input_height), // Buttons / fields
            Constraint::Length(1),            // Status
        ])
        .split(area);

    let (current, total) = state.session.progress();
    header::render_progress_bar(f, chunks[0], current, total);

    let prompt_widget = Paragraph::new(prompt.text.clone())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .style(Styles::panel_bg()),
        )
        .style(Styles::text())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(prompt_widget, chunks[1]);

    if let Some(image) = &state.image_line {
        let style = if image.starts_with("Image not found") || image.starts_with("Error") {
            Styles::warning()
        } else {
            Styles::text_muted()
        };
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Photo: ", Styles::text_muted()),
                Span::styled(image.clone(), style),
            ]))
            .alignment(Alignment::Center),
            chunks[2],
        );
    }

    match state.mode {
        AppMode::FieldQuestion => render_fields(f, state, chunks[3]),
        _ => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Length(field_rows)])
                .split(chunks[3]);
            render_buttons(f, state, parts[0]);
            // On the stage question the field accepts a typed stage
            render_fields(f, state, parts[1]);
        }
    }

    header::render_status(f, chunks[4], &state.status_message);
}

fn render_buttons(f: &mut Frame, state: &AppState, area: Rect) {
    let buttons = state.buttons();
    if buttons.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = buttons
        .iter()
        .map(|_| Constraint::Ratio(1, buttons.len() as u32))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, (label, cell)) in buttons.iter().zip(cells.iter()).enumerate() {
        let selected = i == state.selection;
        let style = if selected {
            Styles::button_active()
        } else {
            Styles::button_inactive()
        };
        let button = Paragraph::new(*label)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(if selected {
                Styles::border_active()
            } else {
                Styles::border_inactive()
            }));
        f.render_widget(button, *cell);
    }
}

fn render_fields(f: &mut Frame, state: &AppState, area: Rect) {
    let labels = state.field_labels();
    if labels.is_empty() || area.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(labels.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(area);

    for (i, (label, row)) in labels.iter().zip(rows.iter()).enumerate() {
        let value = state.fields.get(i).map(String::as_str).unwrap_or("");
        let focused = i == state.focused_field;
        let text = if focused {
            format!("{}_", value)
        } else {
            value.to_string()
        };
        let field = Paragraph::new(text)
            .style(if focused { Styles::field_focused() } else { Styles::field() })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", label))
                    .border_style(if focused {
                        Styles::border_active()
                    } else {
                        Styles::border_inactive()
                    }),
            );
        f.render_widget(field, *row);
    }
}
