//! `grim` snapshot of a single output.

use std::process::{Command, Stdio};

use tokio::task;

use crate::capture::types::CaptureError;

/// Captures one output with `grim`, returning PNG bytes.
///
/// Without an output name `grim` captures the whole layout.
pub async fn capture_output(output: Option<String>) -> Result<Vec<u8>, CaptureError> {
    task::spawn_blocking(move || run_grim(output.as_deref()))
        .await
        .map_err(|e| CaptureError::ToolFailed(format!("grim task failed to join: {}", e)))?
}

fn grim_args(output_name: Option<&str>) -> Vec<&str> {
    match output_name {
        Some(name) => vec!["-o", name, "-"],
        None => vec!["-"],
    }
}

fn run_grim(output_name: Option<&str>) -> Result<Vec<u8>, CaptureError> {
    let result = Command::new("grim")
        .args(grim_args(output_name))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| CaptureError::ToolFailed(format!("Failed to run grim: {}", e)))?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(CaptureError::ToolFailed(format!("grim failed: {}", stderr.trim())));
    }

    if result.stdout.is_empty() {
        return Err(CaptureError::ToolFailed("grim returned empty screenshot".into()));
    }

    Ok(result.stdout)
}
