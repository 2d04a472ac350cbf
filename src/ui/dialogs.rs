//! Dialog rendering: notices and the email address prompt

use crate::app::{AppState, Notice};
use crate::components::floating_window::{FloatingWindow, FloatingWindowConfig};
use crate::theme::Styles;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a notice on top of everything else
pub fn render_notice(f: &mut Frame, notice: &Notice) {
    let config = FloatingWindowConfig {
        title: notice.title.clone(),
        width_percent: 50,
        height_percent: 25,
        min_width: 36,
        min_height: 6,
        max_width: 70,
        max_height: 12,
        border_style: notice.severity.style(),
    };
    let lines = vec![
        Line::from(""),
        Line::styled(notice.message.clone(), Styles::text()).alignment(Alignment::Center),
    ];
    FloatingWindow::new(config).render_lines(f, f.area(), &lines, Some("Press Enter to continue"));
}

/// Render the email address prompt
pub fn render_email_dialog(f: &mut Frame, state: &AppState) {
    let window = FloatingWindow::new(FloatingWindowConfig {
        title: "Email Results".to_string(),
        width_percent: 60,
        height_percent: 30,
        min_width: 40,
        min_height: 8,
        max_width: 72,
        max_height: 10,
        ..Default::default()
    });
    let area = window.area(f.area());
    if area.width < 6 || area.height < 6 {
        return;
    }

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .title(" Email Results ")
        .title_style(Styles::title())
        .style(Styles::panel_bg());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new("Enter the email address to send the diagnosis to:")
            .style(Styles::text_muted())
            .wrap(Wrap { trim: true }),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(format!("{}_", state.email_input))
            .style(Styles::field_focused())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active())
                    .title(" Email "),
            ),
        rows[1],
    );
}
