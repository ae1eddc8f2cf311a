//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Cursor movement within the focused pane
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Pane focus
    FocusNext,
    FocusPrev,
    FocusLeft,

    /// Select the row, re-rooting the next pane when it is a directory.
    Select,
    /// Open the row with the system handler.
    Activate,

    // Clipboard
    /// Put the row in the clipboard.
    Copy,
    /// Ask for a paste target.
    Paste,

    // Drag and drop
    /// Pick the row up as drag source.
    PickUp,
    /// Drop the drag source onto the row.
    Drop,

    // Display
    Filter,
    Refresh,
    ToggleHidden,
    ToggleTheme,
    ToggleHelp,

    /// Close a prompt, release a drag or stop a transfer.
    Cancel,

    // Application
    Quit,
    ForceQuit,

    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,
            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Cursor - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,

            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), _) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::PageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyAction::PageDown,

            // Focus
            (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::FocusNext,
            (KeyCode::BackTab, _) => KeyAction::FocusPrev,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::FocusLeft,
            (KeyCode::Left, _) => KeyAction::FocusLeft,

            // Selection
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Select,
            (KeyCode::Right, _) => KeyAction::Select,
            (KeyCode::Enter, _) => KeyAction::Activate,

            // Clipboard
            (KeyCode::Char('y'), KeyModifiers::NONE) => KeyAction::Copy,
            (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::Paste,

            // Drag and drop
            (KeyCode::Char('m'), KeyModifiers::NONE) => KeyAction::PickUp,
            (KeyCode::Char('D'), _) => KeyAction::Drop,

            // Display
            (KeyCode::Char('/'), KeyModifiers::NONE) => KeyAction::Filter,
            (KeyCode::Char('R'), _) => KeyAction::Refresh,
            (KeyCode::Char('.'), KeyModifiers::NONE) => KeyAction::ToggleHidden,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,
            (KeyCode::Char('?'), _) => KeyAction::ToggleHelp,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Navigation",
            bindings: vec![
                KeyBinding { keys: "j/k ↑/↓", description: "Move up/down" },
                KeyBinding { keys: "g/G", description: "Jump to top/bottom" },
                KeyBinding { keys: "Ctrl-u/d", description: "Page up/down" },
                KeyBinding { keys: "Tab/S-Tab", description: "Next/previous pane" },
                KeyBinding { keys: "h ←", description: "Pane to the left" },
                KeyBinding { keys: "l →", description: "Select (opens folder in next pane)" },
                KeyBinding { keys: "Enter", description: "Open with system handler" },
            ],
        },
        HelpSection {
            title: "Clipboard & Drag",
            bindings: vec![
                KeyBinding { keys: "y", description: "Copy to clipboard" },
                KeyBinding { keys: "p", description: "Paste into folder..." },
                KeyBinding { keys: "m", description: "Pick up for dragging" },
                KeyBinding { keys: "D", description: "Drop onto current row" },
                KeyBinding { keys: "Esc", description: "Release drag / stop transfer" },
            ],
        },
        HelpSection {
            title: "Display",
            bindings: vec![
                KeyBinding { keys: "/", description: "Filter focused pane" },
                KeyBinding { keys: ".", description: "Toggle hidden files" },
                KeyBinding { keys: "R", description: "Refresh all panes" },
                KeyBinding { keys: "t", description: "Toggle dark/light theme" },
            ],
        },
        HelpSection {
            title: "General",
            bindings: vec![
                KeyBinding { keys: "?", description: "Show this help" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}
