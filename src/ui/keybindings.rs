//! Centralized keyboard shortcuts registry.
//!
//! Single source of truth for the viewer's key handling and for the help
//! dialog.

use crossterm::event::KeyCode;

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorDown,
    CursorUp,
    /// Select the step under the cursor
    Activate,
    /// Select the nth step (0-based) directly
    SelectNth(usize),
    NextPanel,
    PrevPanel,
    ToggleHelp,
    Quit,
}

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., arrow key)
    pub alt_key: Option<KeyCode>,
    /// Display label overriding the formatted keys
    pub label: Option<&'static str>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    pub category: ShortcutCategory,
    pub action: Action,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Steps,
    Panels,
}

impl ShortcutCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutCategory::General => "General",
            ShortcutCategory::Steps => "Steps",
            ShortcutCategory::Panels => "Panels",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::Steps,
            ShortcutCategory::Panels,
            ShortcutCategory::General,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Tab", "j/↓")
    pub fn key_display(&self) -> String {
        if let Some(label) = self.label {
            return label.to_string();
        }
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    /// Format key for help dialog (left-padded to 9 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<9}", self.key_display())
    }

    fn matches(&self, key: KeyCode) -> bool {
        self.key == key || self.alt_key == Some(key)
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        other => format!("{other:?}"),
    }
}

pub static SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        key: KeyCode::Char('j'),
        alt_key: Some(KeyCode::Down),
        label: None,
        description: "Move cursor down",
        category: ShortcutCategory::Steps,
        action: Action::CursorDown,
    },
    Shortcut {
        key: KeyCode::Char('k'),
        alt_key: Some(KeyCode::Up),
        label: None,
        description: "Move cursor up",
        category: ShortcutCategory::Steps,
        action: Action::CursorUp,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: Some(KeyCode::Char(' ')),
        label: None,
        description: "Show step under cursor",
        category: ShortcutCategory::Steps,
        action: Action::Activate,
    },
    Shortcut {
        key: KeyCode::Char('1'),
        alt_key: None,
        label: Some("1-9"),
        description: "Show step by number",
        category: ShortcutCategory::Steps,
        action: Action::SelectNth(0),
    },
    Shortcut {
        key: KeyCode::Tab,
        alt_key: Some(KeyCode::Right),
        label: None,
        description: "Next info panel",
        category: ShortcutCategory::Panels,
        action: Action::NextPanel,
    },
    Shortcut {
        key: KeyCode::BackTab,
        alt_key: Some(KeyCode::Left),
        label: None,
        description: "Previous info panel",
        category: ShortcutCategory::Panels,
        action: Action::PrevPanel,
    },
    Shortcut {
        key: KeyCode::Char('?'),
        alt_key: None,
        label: None,
        description: "Toggle help",
        category: ShortcutCategory::General,
        action: Action::ToggleHelp,
    },
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: Some(KeyCode::Esc),
        label: None,
        description: "Quit",
        category: ShortcutCategory::General,
        action: Action::Quit,
    },
];

/// Resolve a key press to an action
pub fn action_for_key(key: KeyCode) -> Option<Action> {
    if let KeyCode::Char(c @ '1'..='9') = key {
        let n = c.to_digit(10).unwrap_or(1) as usize;
        return Some(Action::SelectNth(n - 1));
    }

    SHORTCUTS
        .iter()
        .find(|s| s.matches(key))
        .map(|s| s.action)
}

/// Shortcuts grouped by category, in display order
pub fn shortcuts_by_category() -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    ShortcutCategory::all()
        .iter()
        .map(|category| {
            let shortcuts = SHORTCUTS
                .iter()
                .filter(|s| s.category == *category)
                .collect();
            (*category, shortcuts)
        })
        .collect()
}
