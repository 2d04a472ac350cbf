//! Header and common widget rendering
//!
//! Title banner, progress gauge, navigation bar and the help overlay.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::components::nav_bar::NavBar;
use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Header renderer containing the title banner
pub struct HeaderRenderer {
    header_lines: Vec<Line<'static>>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    pub fn new() -> Self {
        Self {
            header_lines: Self::create_header(),
        }
    }

    /// Height the banner needs
    pub fn height(&self) -> u16 {
        self.header_lines.len() as u16
    }

    pub fn render_header(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let header = Paragraph::new(self.header_lines.clone())
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn create_header() -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled("   \\|/   ", Styles::title())),
            Line::from(vec![
                Span::styled("  --(*)-- ", Styles::title()),
                Span::styled(" Cannabis Plant Diagnosis", Styles::title()),
            ]),
            Line::from(Span::styled(
                "   /|\\    Answer the questions to find out what ails your plant",
                Styles::text_muted(),
            )),
        ]
    }
}

/// Render the question progress gauge
pub fn render_progress_bar(f: &mut Frame, area: Rect, current: usize, total: usize) {
    let ratio = if total == 0 {
        1.0
    } else {
        (current.saturating_sub(1) as f64 / total as f64).clamp(0.0, 1.0)
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_inactive())
                .title(" Progress "),
        )
        .gauge_style(Styles::progress())
        .label(format!("Question {} of {}", current, total))
        .ratio(ratio);
    f.render_widget(gauge, area);
}

/// Render the status line
pub fn render_status(f: &mut Frame, area: Rect, message: &str) {
    let status = Paragraph::new(message.to_string())
        .style(ratatui::style::Style::default().fg(Colors::FG_SECONDARY))
        .alignment(Alignment::Center);
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let nav_items = keybinding_ctx.get_nav_items(&state.mode);
    NavBar::new(nav_items).render(f, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&state.mode, keybinding_ctx);
    help_overlay.render(f, f.area());
}
