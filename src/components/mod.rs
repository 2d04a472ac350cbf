//! Reusable TUI components

pub mod floating_window;
pub mod help_overlay;
pub mod keybindings;
pub mod nav_bar;
