//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, KeyModifiers), KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Shifted characters also match a binding registered without SHIFT,
    /// since terminals disagree on whether `?` carries the modifier.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        if let Some(action) = self.bindings.get(&(key.code, key.modifiers)) {
            return Some(*action);
        }
        match key.code {
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::SHIFT) => self
                .bindings
                .get(&(key.code, key.modifiers - KeyModifiers::SHIFT))
                .copied(),
            _ => None,
        }
    }

    /// Register or replace a binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert((code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // List selection
        keys.bind(KeyCode::Char('j'), none, KeyAction::SelectNext);
        keys.bind(KeyCode::Down, none, KeyAction::SelectNext);
        keys.bind(KeyCode::Char('k'), none, KeyAction::SelectPrev);
        keys.bind(KeyCode::Up, none, KeyAction::SelectPrev);

        // Pagination
        keys.bind(KeyCode::Char('l'), none, KeyAction::NextPage);
        keys.bind(KeyCode::Right, none, KeyAction::NextPage);
        keys.bind(KeyCode::PageDown, none, KeyAction::NextPage);
        keys.bind(KeyCode::Char('h'), none, KeyAction::PrevPage);
        keys.bind(KeyCode::Left, none, KeyAction::PrevPage);
        keys.bind(KeyCode::PageUp, none, KeyAction::PrevPage);
        keys.bind(KeyCode::Char('g'), none, KeyAction::FirstPage);
        keys.bind(KeyCode::Home, none, KeyAction::FirstPage);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::LastPage);
        keys.bind(KeyCode::End, none, KeyAction::LastPage);

        // Search
        keys.bind(KeyCode::Char('/'), none, KeyAction::FocusSearch);
        keys.bind(KeyCode::Char('f'), KeyModifiers::CONTROL, KeyAction::FocusSearch);

        // Post actions
        keys.bind(KeyCode::Enter, none, KeyAction::OpenPost);
        keys.bind(KeyCode::Char('n'), none, KeyAction::NewPost);
        keys.bind(KeyCode::Char('e'), none, KeyAction::EditPost);
        keys.bind(KeyCode::Char('d'), none, KeyAction::DeletePost);

        // Navigation
        keys.bind(KeyCode::Esc, none, KeyAction::Back);
        keys.bind(KeyCode::Backspace, none, KeyAction::Back);

        // Application controls
        keys.bind(KeyCode::Char('r'), none, KeyAction::Refresh);
        keys.bind(KeyCode::Char('?'), none, KeyAction::Help);
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}
