//! Keybinding configuration types and parsing.
//!
//! Every overlay command can be rebound from the `[keybindings]` table. Arrow
//! keys are reserved for nudging the selection and are not listed here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All commands that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Exit,
    ClearSelection,
    ToggleTips,
    SelectAll,
    ToggleBorder,

    // Export commands, only honored while a selection is drawn
    CopySelection,
    SaveSelection,
    PrintSelection,
    EditSelection,
    ViewSelection,
}

impl Action {
    /// Short label shown in the tips panel.
    pub fn label(self) -> &'static str {
        match self {
            Action::Exit => "Exit",
            Action::ClearSelection => "Clear selection",
            Action::ToggleTips => "Show/hide tips",
            Action::SelectAll => "Select all",
            Action::ToggleBorder => "Show/hide border",
            Action::CopySelection => "Copy to clipboard",
            Action::SaveSelection => "Save to file",
            Action::PrintSelection => "Print",
            Action::EditSelection => "Open in editor",
            Action::ViewSelection => "View selection",
        }
    }
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+S" or "Escape".
    /// Modifiers can appear in any order and spaces around '+' are ignored.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into trailing empty parts; the key is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self {
            key: key.to_lowercase(),
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }

    /// Human-readable form, e.g. "Ctrl+S".
    pub fn display(&self) -> String {
        let mut out = String::new();
        if self.ctrl {
            out.push_str("Ctrl+");
        }
        if self.alt {
            out.push_str("Alt+");
        }
        if self.shift {
            out.push_str("Shift+");
        }
        let mut chars = self.key.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
        out
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// exit = ["Q", "Escape"]
/// save_selection = ["S", "Ctrl+S"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_clear_selection")]
    pub clear_selection: Vec<String>,

    #[serde(default = "default_toggle_tips")]
    pub toggle_tips: Vec<String>,

    #[serde(default = "default_select_all")]
    pub select_all: Vec<String>,

    #[serde(default = "default_toggle_border")]
    pub toggle_border: Vec<String>,

    #[serde(default = "default_copy_selection")]
    pub copy_selection: Vec<String>,

    #[serde(default = "default_save_selection")]
    pub save_selection: Vec<String>,

    #[serde(default = "default_print_selection")]
    pub print_selection: Vec<String>,

    #[serde(default = "default_edit_selection")]
    pub edit_selection: Vec<String>,

    #[serde(default = "default_view_selection")]
    pub view_selection: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: default_exit(),
            clear_selection: default_clear_selection(),
            toggle_tips: default_toggle_tips(),
            select_all: default_select_all(),
            toggle_border: default_toggle_border(),
            copy_selection: default_copy_selection(),
            save_selection: default_save_selection(),
            print_selection: default_print_selection(),
            edit_selection: default_edit_selection(),
            view_selection: default_view_selection(),
        }
    }
}

impl KeybindingsConfig {
    /// Bindings in tips-panel order.
    pub fn entries(&self) -> [(Action, &[String]); 10] {
        [
            (Action::CopySelection, &self.copy_selection),
            (Action::SaveSelection, &self.save_selection),
            (Action::PrintSelection, &self.print_selection),
            (Action::EditSelection, &self.edit_selection),
            (Action::ViewSelection, &self.view_selection),
            (Action::SelectAll, &self.select_all),
            (Action::ClearSelection, &self.clear_selection),
            (Action::ToggleBorder, &self.toggle_border),
            (Action::ToggleTips, &self.toggle_tips),
            (Action::Exit, &self.exit),
        ]
    }

    /// Build a lookup map from keybindings to actions.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let mut insert_binding = |binding_str: &str, action: Action| -> Result<(), String> {
            let binding = KeyBinding::parse(binding_str)?;
            if let Some(existing_action) = map.insert(binding.clone(), action) {
                return Err(format!(
                    "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                    binding_str, existing_action, action
                ));
            }
            Ok(())
        };

        for (action, bindings) in self.entries() {
            for binding_str in bindings {
                insert_binding(binding_str, action)?;
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_exit() -> Vec<String> {
    vec!["Q".to_string(), "Escape".to_string()]
}

fn default_clear_selection() -> Vec<String> {
    vec!["Z".to_string()]
}

fn default_toggle_tips() -> Vec<String> {
    vec!["T".to_string()]
}

fn default_select_all() -> Vec<String> {
    vec!["A".to_string()]
}

fn default_toggle_border() -> Vec<String> {
    vec!["B".to_string()]
}

fn default_copy_selection() -> Vec<String> {
    vec!["C".to_string()]
}

fn default_save_selection() -> Vec<String> {
    vec!["S".to_string()]
}

fn default_print_selection() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_edit_selection() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_view_selection() -> Vec<String> {
    vec!["V".to_string()]
}
