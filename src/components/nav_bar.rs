//! Bottom navigation bar showing the keys the current screen accepts

use super::keybindings::NavBarItem;
use crate::theme::Styles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct NavBar {
    items: Vec<NavBarItem>,
}

impl NavBar {
    pub fn new(items: Vec<NavBarItem>) -> Self {
        Self { items }
    }

    /// Build the single line of `[Key] Label` pairs
    pub fn line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.items.len() * 3);
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Styles::nav_hint()));
            }
            spans.push(Span::styled(format!("[{}]", item.key_display), Styles::nav_key()));
            spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
        }
        Line::from(spans)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        f.render_widget(Paragraph::new(self.line()), area);
    }
}
