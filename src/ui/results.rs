//! Diagnosis results rendering

use super::header;
use crate::app::AppState;
use crate::theme::Styles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Build the result lines: one block per diagnosis, then the plant stage
pub fn result_lines(state: &AppState) -> Vec<Line<'static>> {
    let diagnoses = state.session.diagnoses();
    let mut lines = Vec::new();

    if diagnoses.is_empty() {
        lines.push(Line::styled(
            "No problems were identified from your answers.",
            Styles::success(),
        ));
        lines.push(Line::from(""));
    }

    for (i, record) in diagnoses.iter().enumerate() {
        lines.push(Line::styled(format!("{}:", record.title), Styles::diagnosis_title()));
        lines.push(Line::styled(record.remedy.clone(), Styles::text()));
        if let Some(image) = state.result_images.get(i) {
            lines.push(Line::from(vec![
                Span::styled("  Photo: ", Styles::text_muted()),
                Span::styled(image.clone(), Styles::text_muted()),
            ]));
        }
        lines.push(Line::from(""));
    }

    let stage = state.session.stage().map(|s| s.label()).unwrap_or("Unknown");
    lines.push(Line::from(vec![
        Span::styled("Plant Stage: ", Styles::title()),
        Span::styled(stage, Styles::text()),
    ]));
    lines
}

/// Render the diagnosis list in the given area
pub fn render_results_in_area(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let results = Paragraph::new(result_lines(state))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .title(" Diagnosis ")
                .title_style(Styles::title())
                .style(Styles::panel_bg()),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.results_scroll, 0));
    f.render_widget(results, chunks[0]);

    header::render_status(f, chunks[1], &state.status_message);
}
