//! Desktop notifications for finished exports (freedesktop D-Bus).

use crate::export::ExportOutcome;
use std::collections::HashMap;
use zbus::{Connection, proxy};

const APP_NAME: &str = "Leer Copy";
const EXPIRE_MS: i32 = 3000;

#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    #[allow(clippy::too_many_arguments)]
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Icon name for an export outcome.
pub fn outcome_icon(outcome: &ExportOutcome) -> &'static str {
    match outcome {
        ExportOutcome::Success(_) => "image-x-generic",
        ExportOutcome::Failed { .. } => "dialog-error",
    }
}

async fn send(summary: &str, body: &str, icon: &str) -> zbus::Result<u32> {
    let connection = Connection::session().await?;
    let proxy = NotificationsProxy::new(&connection).await?;
    proxy
        .notify(
            APP_NAME,
            0,
            icon,
            summary,
            body,
            Vec::new(),
            HashMap::new(),
            EXPIRE_MS,
        )
        .await
}

/// Announces an export outcome without blocking the caller.
///
/// Delivery failures are logged and otherwise ignored.
pub fn notify_outcome(runtime_handle: &tokio::runtime::Handle, outcome: &ExportOutcome) {
    let (summary, body) = outcome.notification_text();
    let icon = outcome_icon(outcome);
    runtime_handle.spawn(async move {
        if let Err(e) = send(&summary, &body, icon).await {
            log::warn!("Failed to send notification '{}': {}", summary, e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_use_error_icon() {
        let outcome = ExportOutcome::Failed {
            kind: crate::export::ExportKind::Print,
            message: "offline".to_string(),
        };
        assert_eq!(outcome_icon(&outcome), "dialog-error");
    }
}
