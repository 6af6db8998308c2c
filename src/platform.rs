//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Modifier for the wizard shortcuts
/// - macOS: SUPER (Cmd key), with Ctrl still accepted
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// True if the shortcut modifier (or Ctrl) is held
pub fn has_shortcut_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.contains(SHORTCUT_MODIFIER) || modifiers.contains(KeyModifiers::CONTROL)
}

/// Next step shortcut display
#[cfg(target_os = "macos")]
pub const NEXT_SHORTCUT: &str = "Cmd+N";

#[cfg(not(target_os = "macos"))]
pub const NEXT_SHORTCUT: &str = "Ctrl+N";

/// Previous step shortcut display
#[cfg(target_os = "macos")]
pub const BACK_SHORTCUT: &str = "Cmd+B";

#[cfg(not(target_os = "macos"))]
pub const BACK_SHORTCUT: &str = "Ctrl+B";

/// Submit shortcut display
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_always_counts() {
        assert!(has_shortcut_modifier(KeyModifiers::CONTROL));
        assert!(has_shortcut_modifier(SHORTCUT_MODIFIER));
        assert!(!has_shortcut_modifier(KeyModifiers::SHIFT));
        assert!(!has_shortcut_modifier(KeyModifiers::NONE));
    }
}
