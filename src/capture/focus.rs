//! Focused monitor lookup through compositor IPC.
//!
//! Wayland has no notion of a focused or primary output, so the compositor's
//! own tool is asked. Hyprland and Sway both answer with a JSON array of
//! outputs carrying `name` and `focused`.

use std::process::{Command, Stdio};

use serde_json::Value;

const IPC_QUERIES: &[(&str, &[&str])] = &[
    ("hyprctl", &["monitors", "-j"]),
    ("swaymsg", &["-t", "get_outputs", "--raw"]),
];

/// Name of the focused output, if the running compositor can tell.
pub fn focused_output_name() -> Option<String> {
    IPC_QUERIES.iter().find_map(|(program, args)| {
        let output = Command::new(program)
            .args(*args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .ok()?;

        if !output.status.success() {
            log::debug!("{} exited with {}", program, output.status);
            return None;
        }

        let name = parse_focused(&output.stdout);
        log::debug!("Focused output from {}: {:?}", program, name);
        name
    })
}

/// Picks the focused entry's name from an IPC output list.
pub(crate) fn parse_focused(json: &[u8]) -> Option<String> {
    let outputs: Value = serde_json::from_slice(json).ok()?;

    outputs
        .as_array()?
        .iter()
        .find(|o| o.get("focused").and_then(Value::as_bool).unwrap_or(false))?
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_focused_hyprland_monitor() {
        let json = br#"[
            {"id": 0, "name": "DP-1", "focused": false},
            {"id": 1, "name": "HDMI-A-1", "focused": true}
        ]"#;
        assert_eq!(parse_focused(json), Some("HDMI-A-1".to_string()));
    }

    #[test]
    fn picks_focused_sway_output() {
        let json = br#"[
            {"name": "eDP-1", "active": true, "focused": true},
            {"name": "DP-2", "active": true, "focused": false}
        ]"#;
        assert_eq!(parse_focused(json), Some("eDP-1".to_string()));
    }

    #[test]
    fn unfocused_list_leaves_choice_to_caller() {
        let json = br#"[{"id": 0, "name": "eDP-1"}]"#;
        assert_eq!(parse_focused(json), None);
    }

    #[test]
    fn rejects_unexpected_json() {
        assert_eq!(parse_focused(b"{}"), None);
        assert_eq!(parse_focused(b"[]"), None);
        assert_eq!(parse_focused(b"garbage"), None);
    }
}
