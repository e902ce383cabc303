//! Central keyboard shortcut registry.
//!
//! The same table drives key dispatch in the app loop and the help overlay,
//! so a shortcut that is listed is a shortcut that works.

use crossterm::event::KeyCode;

use crate::navigation::{Action, Page};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleHelp,
    MoveUp,
    MoveDown,
    PrevVersion,
    NextVersion,
    ToggleUploadType,
    /// Mark the highlighted radio option as selected
    SelectOption,
    /// The page's primary button
    Primary,
    Press(Action),
    /// Close the modal (same as Escape)
    Close,
    SimulateFailure,
}

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: KeyCode,
    /// Alternative key (e.g., lowercase variant or arrow key)
    pub alt_key: Option<KeyCode>,
    pub description: &'static str,
    pub command: Command,
    pub context: ShortcutContext,
}

/// Where a shortcut is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Everywhere
    Global,
    ListView,
    MethodSelect,
    Review,
    /// Any other modal page
    Modal,
}

impl ShortcutContext {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::Global => "Everywhere",
            ShortcutContext::ListView => "Application List",
            ShortcutContext::MethodSelect => "Update Method",
            ShortcutContext::Review => "Review",
            ShortcutContext::Modal => "Other Dialogs",
        }
    }

    pub fn all() -> &'static [ShortcutContext] {
        &[
            ShortcutContext::Global,
            ShortcutContext::ListView,
            ShortcutContext::MethodSelect,
            ShortcutContext::Review,
            ShortcutContext::Modal,
        ]
    }

    /// Page-specific context for `page`
    pub fn for_page(page: Page) -> Self {
        match page {
            Page::ListView => ShortcutContext::ListView,
            Page::Step1 => ShortcutContext::MethodSelect,
            Page::Step2 => ShortcutContext::Review,
            Page::Step1Empty | Page::Success(_) | Page::Error => ShortcutContext::Modal,
        }
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Tab", "j/↓")
    pub fn key_display(&self) -> String {
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

fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        _ => format!("{:?}", key),
    }
}

pub static SHORTCUTS: &[Shortcut] = &[
    // === Global ===
    Shortcut {
        key: KeyCode::Char('q'),
        alt_key: None,
        description: "Quit",
        command: Command::Quit,
        context: ShortcutContext::Global,
    },
    Shortcut {
        key: KeyCode::Char('?'),
        alt_key: None,
        description: "Toggle help",
        command: Command::ToggleHelp,
        context: ShortcutContext::Global,
    },
    // === Application list ===
    Shortcut {
        key: KeyCode::Char('k'),
        alt_key: Some(KeyCode::Up),
        description: "Previous application",
        command: Command::MoveUp,
        context: ShortcutContext::ListView,
    },
    Shortcut {
        key: KeyCode::Char('j'),
        alt_key: Some(KeyCode::Down),
        description: "Next application",
        command: Command::MoveDown,
        context: ShortcutContext::ListView,
    },
    Shortcut {
        key: KeyCode::Char('h'),
        alt_key: Some(KeyCode::Left),
        description: "Older upload version",
        command: Command::PrevVersion,
        context: ShortcutContext::ListView,
    },
    Shortcut {
        key: KeyCode::Char('l'),
        alt_key: Some(KeyCode::Right),
        description: "Newer upload version",
        command: Command::NextVersion,
        context: ShortcutContext::ListView,
    },
    Shortcut {
        key: KeyCode::Char('t'),
        alt_key: None,
        description: "Toggle latest/specific upload",
        command: Command::ToggleUploadType,
        context: ShortcutContext::ListView,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        description: "Review update",
        command: Command::Primary,
        context: ShortcutContext::ListView,
    },
    // === Update method ===
    Shortcut {
        key: KeyCode::Char('k'),
        alt_key: Some(KeyCode::Up),
        description: "Previous option",
        command: Command::MoveUp,
        context: ShortcutContext::MethodSelect,
    },
    Shortcut {
        key: KeyCode::Char('j'),
        alt_key: Some(KeyCode::Down),
        description: "Next option",
        command: Command::MoveDown,
        context: ShortcutContext::MethodSelect,
    },
    Shortcut {
        key: KeyCode::Char(' '),
        alt_key: None,
        description: "Select option",
        command: Command::SelectOption,
        context: ShortcutContext::MethodSelect,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        description: "Next",
        command: Command::Primary,
        context: ShortcutContext::MethodSelect,
    },
    Shortcut {
        key: KeyCode::Char('c'),
        alt_key: None,
        description: "Cancel",
        command: Command::Press(Action::Cancel),
        context: ShortcutContext::MethodSelect,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        description: "Close",
        command: Command::Close,
        context: ShortcutContext::MethodSelect,
    },
    // === Review ===
    Shortcut {
        key: KeyCode::Enter,
        alt_key: Some(KeyCode::Char('p')),
        description: "Publish",
        command: Command::Primary,
        context: ShortcutContext::Review,
    },
    Shortcut {
        key: KeyCode::Char('b'),
        alt_key: Some(KeyCode::Backspace),
        description: "Back",
        command: Command::Press(Action::Back),
        context: ShortcutContext::Review,
    },
    Shortcut {
        key: KeyCode::Char('x'),
        alt_key: None,
        description: "Simulate a failed publish",
        command: Command::SimulateFailure,
        context: ShortcutContext::Review,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        description: "Close",
        command: Command::Close,
        context: ShortcutContext::Review,
    },
    // === Other modals ===
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        description: "Default button",
        command: Command::Primary,
        context: ShortcutContext::Modal,
    },
    Shortcut {
        key: KeyCode::Char('c'),
        alt_key: None,
        description: "Cancel",
        command: Command::Press(Action::Cancel),
        context: ShortcutContext::Modal,
    },
    Shortcut {
        key: KeyCode::Char('r'),
        alt_key: None,
        description: "Retry",
        command: Command::Press(Action::Retry),
        context: ShortcutContext::Modal,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: None,
        description: "Close",
        command: Command::Close,
        context: ShortcutContext::Modal,
    },
];

pub fn shortcuts_for_context(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// Resolve a key on `page`; page shortcuts shadow global ones
pub fn command_for(page: Page, key: KeyCode) -> Option<Command> {
    let find = |context| shortcuts_for_context(context).find(|s| s.matches(key));
    find(ShortcutContext::for_page(page))
        .or_else(|| find(ShortcutContext::Global))
        .map(|s| s.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::UpdateMethod;

    #[test]
    fn test_all_shortcuts_have_descriptions() {
        for shortcut in SHORTCUTS {
            assert!(
                !shortcut.description.is_empty(),
                "Shortcut {:?} has empty description",
                shortcut.key
            );
        }
    }

    #[test]
    fn test_key_display_with_alt() {
        let shortcut = Shortcut {
            key: KeyCode::Char('j'),
            alt_key: Some(KeyCode::Down),
            description: "Test",
            command: Command::MoveDown,
            context: ShortcutContext::ListView,
        };
        assert_eq!(shortcut.key_display(), "j/↓");
    }

    #[test]
    fn test_space_is_spelled_out() {
        assert_eq!(format_keycode(&KeyCode::Char(' ')), "Space");
    }

    #[test]
    fn test_no_duplicate_keys_within_context() {
        for context in ShortcutContext::all() {
            let shortcuts: Vec<_> = shortcuts_for_context(*context).collect();
            for (i, a) in shortcuts.iter().enumerate() {
                for b in &shortcuts[i + 1..] {
                    assert!(
                        !a.matches(b.key) && b.alt_key.is_none_or(|alt| !a.matches(alt)),
                        "{:?} and {:?} collide in {:?}",
                        a.description,
                        b.description,
                        context
                    );
                }
            }
        }
    }

    #[test]
    fn test_command_for_page_specific_keys() {
        assert_eq!(
            command_for(Page::ListView, KeyCode::Char('t')),
            Some(Command::ToggleUploadType)
        );
        assert_eq!(
            command_for(Page::Step1, KeyCode::Char(' ')),
            Some(Command::SelectOption)
        );
        assert_eq!(
            command_for(Page::Step2, KeyCode::Backspace),
            Some(Command::Press(Action::Back))
        );
        assert_eq!(
            command_for(Page::Error, KeyCode::Char('r')),
            Some(Command::Press(Action::Retry))
        );
    }

    #[test]
    fn test_command_for_falls_back_to_global() {
        assert_eq!(command_for(Page::Step2, KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(
            command_for(Page::Success(UpdateMethod::DoNothing), KeyCode::Char('?')),
            Some(Command::ToggleHelp)
        );
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(command_for(Page::ListView, KeyCode::Char('z')), None);
        assert!(command_for(Page::ListView, KeyCode::Char('t')).is_some());
        assert_eq!(command_for(Page::Step1, KeyCode::Char('t')), None);
    }

    #[test]
    fn test_every_page_has_a_context() {
        for page in Page::all() {
            assert!(shortcuts_for_context(ShortcutContext::for_page(page))
                .next()
                .is_some());
        }
    }
}
