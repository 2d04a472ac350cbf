//! Centered floating window used by overlays and dialogs

use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Size and decoration of a floating window
#[derive(Debug, Clone)]
pub struct FloatingWindowConfig {
    pub title: String,
    pub width_percent: u16,
    pub height_percent: u16,
    pub min_width: u16,
    pub min_height: u16,
    pub max_width: u16,
    pub max_height: u16,
    /// Border color; defaults to the accent color
    pub border_style: Style,
}

impl Default for FloatingWindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width_percent: 60,
            height_percent: 40,
            min_width: 30,
            min_height: 7,
            max_width: 80,
            max_height: 30,
            border_style: Styles::border_active(),
        }
    }
}

pub struct FloatingWindow {
    config: FloatingWindowConfig,
}

impl FloatingWindow {
    pub fn new(config: FloatingWindowConfig) -> Self {
        Self { config }
    }

    /// Compute the window rectangle inside `parent`.
    ///
    /// The percentage size is clamped to the min/max bounds and then to the
    /// parent itself, so the window never spills off a small terminal.
    pub fn area(&self, parent: Rect) -> Rect {
        let c = &self.config;
        let percent_of = |total: u16, percent: u16| (u32::from(total) * u32::from(percent) / 100) as u16;
        let width = percent_of(parent.width, c.width_percent)
            .clamp(c.min_width, c.max_width)
            .min(parent.width);
        let height = percent_of(parent.height, c.height_percent)
            .clamp(c.min_height, c.max_height)
            .min(parent.height);
        Rect {
            x: parent.x + (parent.width - width) / 2,
            y: parent.y + (parent.height - height) / 2,
            width,
            height,
        }
    }

    /// Render text lines inside the window, with an optional footer hint
    pub fn render_lines(
        &self,
        f: &mut Frame,
        parent: Rect,
        lines: &[Line<'static>],
        footer: Option<&str>,
    ) {
        let area = self.area(parent);
        if area.width < 3 || area.height < 3 {
            return;
        }

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.config.border_style)
            .title(format!(" {} ", self.config.title))
            .title_style(self.config.border_style)
            .style(Style::default().bg(Colors::BG_PRIMARY));
        if let Some(hint) = footer {
            block = block.title_bottom(Line::styled(format!(" {} ", hint), Styles::nav_hint()));
        }

        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(lines.to_vec())
                .block(block)
                .alignment(Alignment::Left)
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}
