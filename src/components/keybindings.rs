//! Keybinding registry for context-aware shortcut hints
//!
//! Describes the keys each screen accepts, for the navigation bar and the help
//! overlay. `App` resolves global, results and email keys through it; question
//! screens read typed characters directly.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    NextField,
    PreviousField,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Submit,
    AnswerYes,
    AnswerNo,
    AnswerNotSure,
    AnswerNotApplicable,
    PickStage,
    SkipFields,
    Email,
    Send,
    Cancel,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self::with_modifiers(key, KeyModifiers::NONE, action, display, description)
    }

    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Available in every mode
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::F(1), KeyAction::Help, "F1", "Help"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.mode_bindings.insert(
            AppMode::ChoiceQuestion,
            vec![
                Keybinding::new(KeyCode::Left, KeyAction::NavigateUp, "Left", "Previous button"),
                Keybinding::new(KeyCode::Right, KeyAction::NavigateDown, "Right", "Next button"),
                Keybinding::new(KeyCode::Enter, KeyAction::Submit, "Enter", "Answer"),
                Keybinding::new(KeyCode::Char('y'), KeyAction::AnswerYes, "Y", "Yes"),
                Keybinding::new(KeyCode::Char('n'), KeyAction::AnswerNo, "N", "No"),
                Keybinding::new(KeyCode::Char('s'), KeyAction::AnswerNotSure, "S", "Not sure"),
                Keybinding::new(
                    KeyCode::Char('a'),
                    KeyAction::AnswerNotApplicable,
                    "A",
                    "Not applicable",
                ),
                Keybinding::new(KeyCode::Char('1'), KeyAction::PickStage, "1-3", "Pick a stage"),
                Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Quit"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::FieldQuestion,
            vec![
                Keybinding::new(KeyCode::BackTab, KeyAction::PreviousField, "S-Tab", "Previous field"),
                Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab", "Next field"),
                Keybinding::new(KeyCode::Enter, KeyAction::Submit, "Enter", "Submit"),
                Keybinding::new(KeyCode::F(2), KeyAction::SkipFields, "F2", "Not sure"),
                Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Quit"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Results,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::ScrollUp, "Up", "Scroll up"),
                Keybinding::new(KeyCode::Down, KeyAction::ScrollDown, "Down", "Scroll down"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(KeyCode::Char('e'), KeyAction::Email, "E", "Email results"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::EmailEntry,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Send, "Enter", "Send"),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Back to results"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();
        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());
        bindings
    }

    /// Action bound to a key in the given mode; global bindings win
    ///
    /// Shift is ignored so shifted symbols such as `?` match however the
    /// terminal reports them.
    pub fn action_for(&self, mode: &AppMode, key: &KeyEvent) -> Option<KeyAction> {
        let modifiers = key.modifiers.difference(KeyModifiers::SHIFT);
        self.global_bindings
            .iter()
            .chain(self.mode_bindings.get(mode).into_iter().flatten())
            .find(|b| b.key == key.code && b.modifiers == modifiers)
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions: &[KeyAction] = match mode {
            AppMode::ChoiceQuestion => &[
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Submit,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::FieldQuestion => &[
                KeyAction::NextField,
                KeyAction::Submit,
                KeyAction::SkipFields,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Results => &[
                KeyAction::ScrollUp,
                KeyAction::ScrollDown,
                KeyAction::Email,
                KeyAction::Quit,
            ],
            AppMode::EmailEntry => &[KeyAction::Send, KeyAction::Cancel],
        };

        // Combine paired movement keys into single items
        let mut items: Vec<NavBarItem> = Vec::new();
        let mut has_nav = false;
        let mut has_scroll = false;

        for &action in priority_actions {
            match action {
                KeyAction::NavigateUp | KeyAction::NavigateDown => {
                    if !has_nav {
                        items.push(NavBarItem::new("Left/Right", "Select"));
                        has_nav = true;
                    }
                }
                KeyAction::ScrollUp | KeyAction::ScrollDown => {
                    if !has_scroll {
                        items.push(NavBarItem::new("Up/Dn", "Scroll"));
                        has_scroll = true;
                    }
                }
                _ => {
                    if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                        items.push(NavBarItem::new(&binding.display, &binding.description));
                    }
                }
            }
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::NextField
                        | KeyAction::PreviousField
                        | KeyAction::ScrollUp
                        | KeyAction::ScrollDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                )
            }),
            ("Answers", |a| {
                matches!(
                    a,
                    KeyAction::Submit
                        | KeyAction::AnswerYes
                        | KeyAction::AnswerNo
                        | KeyAction::AnswerNotSure
                        | KeyAction::AnswerNotApplicable
                        | KeyAction::PickStage
                        | KeyAction::SkipFields
                        | KeyAction::Email
                        | KeyAction::Send
                        | KeyAction::Cancel
                )
            }),
            ("General", |a| matches!(a, KeyAction::Help | KeyAction::Quit)),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| belongs(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

impl NavBarItem {
    fn new(key: &str, label: &str) -> Self {
        Self {
            key_display: key.to_string(),
            action_label: label.to_string(),
        }
    }
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mode_has_nav_items() {
        let ctx = KeybindingContext::new();
        for mode in [
            AppMode::ChoiceQuestion,
            AppMode::FieldQuestion,
            AppMode::Results,
            AppMode::EmailEntry,
        ] {
            assert!(!ctx.get_nav_items(&mode).is_empty(), "{:?}", mode);
        }
    }

    #[test]
    fn test_scroll_keys_are_combined() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(&AppMode::Results);
        let scroll: Vec<_> = items.iter().filter(|i| i.action_label == "Scroll").collect();
        assert_eq!(scroll.len(), 1);
        assert!(items.iter().any(|i| i.key_display == "E"));
    }

    #[test]
    fn test_action_lookup_matches_key_and_modifiers() {
        let ctx = KeybindingContext::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(ctx.action_for(&AppMode::Results, &ctrl_c), Some(KeyAction::Quit));

        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(ctx.action_for(&AppMode::Results, &plain_c), None);

        let shifted_help = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(ctx.action_for(&AppMode::Results, &shifted_help), Some(KeyAction::Help));

        let e = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE);
        assert_eq!(ctx.action_for(&AppMode::Results, &e), Some(KeyAction::Email));
        assert_eq!(ctx.action_for(&AppMode::EmailEntry, &e), None);
    }

    #[test]
    fn test_help_groups_choice_hotkeys() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(&AppMode::ChoiceQuestion);
        let answers = sections.iter().find(|s| s.title == "Answers").unwrap();
        assert!(answers.items.iter().any(|(k, d)| k == "A" && d == "Not applicable"));
        assert!(sections.iter().any(|s| s.title == "General"));
    }
}
