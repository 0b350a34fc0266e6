//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for the alternate save shortcut (W)
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const ALT_SAVE_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const ALT_SAVE_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Save shortcut display for form help text
/// Ctrl+S works on all platforms (Cmd+W/Ctrl+W also work as fallback)
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Schema builder row shortcuts
pub const ADD_FIELD_SHORTCUT: &str = "Ctrl+A";
pub const REMOVE_FIELD_SHORTCUT: &str = "Ctrl+D";
