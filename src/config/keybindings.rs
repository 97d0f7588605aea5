//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize keyboard shortcuts for all picker actions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible picker actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Cursor movement
    MoveUp,
    MoveDown,

    // Tab cycling
    NextTab,

    // Staging
    ToggleStage,

    // File operations
    OpenExternal,
    DeleteEntry,
    NukeTab,

    // Exit
    Accept,
    Cancel,
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
    /// Parse a keybinding string like "Ctrl+D" or "Escape".
    /// Modifiers can appear in any order; spaces around '+' are allowed.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        // Normalize by removing spaces around '+'
        let s_normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let parts: Vec<&str> = s_normalized.split('+').collect();

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in parts {
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

        // Join with '+' so a literal '+' key survives parsing
        let key = key_parts.join("+");

        if key.is_empty() {
            Ok(Self {
                key: "+".to_string(),
                ctrl,
                shift,
                alt,
            })
        } else {
            Ok(Self {
                key,
                ctrl,
                shift,
                alt,
            })
        }
    }

    /// Check if this keybinding matches the given input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all picker keybindings.
///
/// Each action can have multiple keybindings. Users specify them in
/// config.toml as:
/// ```toml
/// [keybindings]
/// toggle_stage = ["Space", "S"]
/// delete_entry = ["X"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_move_up")]
    pub move_up: Vec<String>,

    #[serde(default = "default_move_down")]
    pub move_down: Vec<String>,

    #[serde(default = "default_next_tab")]
    pub next_tab: Vec<String>,

    #[serde(default = "default_toggle_stage")]
    pub toggle_stage: Vec<String>,

    #[serde(default = "default_open_external")]
    pub open_external: Vec<String>,

    #[serde(default = "default_delete_entry")]
    pub delete_entry: Vec<String>,

    #[serde(default = "default_nuke_tab")]
    pub nuke_tab: Vec<String>,

    #[serde(default = "default_accept")]
    pub accept: Vec<String>,

    #[serde(default = "default_cancel")]
    pub cancel: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            move_up: default_move_up(),
            move_down: default_move_down(),
            next_tab: default_next_tab(),
            toggle_stage: default_toggle_stage(),
            open_external: default_open_external(),
            delete_entry: default_delete_entry(),
            nuke_tab: default_nuke_tab(),
            accept: default_accept(),
            cancel: default_cancel(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or duplicated.
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

        for binding_str in &self.move_up {
            insert_binding(binding_str, Action::MoveUp)?;
        }
        for binding_str in &self.move_down {
            insert_binding(binding_str, Action::MoveDown)?;
        }
        for binding_str in &self.next_tab {
            insert_binding(binding_str, Action::NextTab)?;
        }
        for binding_str in &self.toggle_stage {
            insert_binding(binding_str, Action::ToggleStage)?;
        }
        for binding_str in &self.open_external {
            insert_binding(binding_str, Action::OpenExternal)?;
        }
        for binding_str in &self.delete_entry {
            insert_binding(binding_str, Action::DeleteEntry)?;
        }
        for binding_str in &self.nuke_tab {
            insert_binding(binding_str, Action::NukeTab)?;
        }
        for binding_str in &self.accept {
            insert_binding(binding_str, Action::Accept)?;
        }
        for binding_str in &self.cancel {
            insert_binding(binding_str, Action::Cancel)?;
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_move_up() -> Vec<String> {
    vec!["Up".to_string(), "K".to_string()]
}

fn default_move_down() -> Vec<String> {
    vec!["Down".to_string(), "J".to_string()]
}

fn default_next_tab() -> Vec<String> {
    vec!["Tab".to_string()]
}

fn default_toggle_stage() -> Vec<String> {
    vec!["Space".to_string(), "S".to_string()]
}

fn default_open_external() -> Vec<String> {
    vec!["O".to_string()]
}

fn default_delete_entry() -> Vec<String> {
    vec!["X".to_string()]
}

fn default_nuke_tab() -> Vec<String> {
    vec!["N".to_string()]
}

fn default_accept() -> Vec<String> {
    vec!["Enter".to_string()]
}

fn default_cancel() -> Vec<String> {
    vec!["Escape".to_string(), "Ctrl+C".to_string()]
}
