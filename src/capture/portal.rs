//! xdg-desktop-portal Screenshot fallback.

use super::types::CaptureError;
use futures::StreamExt;
use std::collections::HashMap;
use zbus::zvariant::{OwnedValue, Value};
use zbus::{Connection, proxy};

/// D-Bus proxy for the xdg-desktop-portal Screenshot interface.
#[proxy(
    interface = "org.freedesktop.portal.Screenshot",
    default_service = "org.freedesktop.portal.Desktop",
    default_path = "/org/freedesktop/portal/desktop"
)]
trait Screenshot {
    /// Request a screenshot; the result arrives on the returned Request object.
    async fn screenshot(
        &self,
        parent_window: &str,
        options: HashMap<String, Value<'_>>,
    ) -> zbus::Result<zbus::zvariant::OwnedObjectPath>;
}

/// D-Bus proxy for org.freedesktop.portal.Request.
#[proxy(
    interface = "org.freedesktop.portal.Request",
    default_service = "org.freedesktop.portal.Desktop"
)]
trait Request {
    /// Response code: 0 = success, 1 = cancelled, 2 = other error.
    #[zbus(signal)]
    fn response(&self, response: u32, results: HashMap<String, OwnedValue>) -> zbus::Result<()>;
}

/// Takes a full-screen screenshot through the portal and returns its file URI.
///
/// The request is non-interactive; some portals still ask for permission
/// the first time.
pub async fn screenshot_uri() -> Result<String, CaptureError> {
    let connection = Connection::session().await?;
    let proxy = ScreenshotProxy::new(&connection).await?;

    let request_path = proxy
        .screenshot("", snapshot_options())
        .await
        .map_err(|e| {
            if e.to_string().contains("Cancelled") || e.to_string().contains("denied") {
                CaptureError::PermissionDenied
            } else {
                CaptureError::DBusError(e)
            }
        })?;
    log::debug!("Portal screenshot request: {:?}", request_path);

    let request = RequestProxy::builder(&connection)
        .path(request_path)?
        .build()
        .await?;

    let mut responses = request.receive_response().await?;
    let signal = responses
        .next()
        .await
        .ok_or_else(|| CaptureError::InvalidResponse("No Response signal received".into()))?;
    let args = signal
        .args()
        .map_err(|e| CaptureError::InvalidResponse(format!("Bad response args: {}", e)))?;

    match args.response {
        0 => {
            let uri: &str = args
                .results
                .get("uri")
                .ok_or_else(|| CaptureError::InvalidResponse("No 'uri' in response".into()))?
                .downcast_ref()
                .map_err(|e| CaptureError::InvalidResponse(format!("URI is not a string: {}", e)))?;
            log::info!("Portal screenshot ready: {}", uri);
            Ok(uri.to_string())
        }
        1 => Err(CaptureError::PermissionDenied),
        code => Err(CaptureError::InvalidResponse(format!(
            "Portal returned error code {}",
            code
        ))),
    }
}

/// The overlay is the selection UI, so the portal must not show its own.
fn snapshot_options() -> HashMap<String, Value<'static>> {
    HashMap::from([
        ("modal".to_string(), Value::from(false)),
        ("interactive".to_string(), Value::from(false)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_non_interactive() {
        let options = snapshot_options();
        assert_eq!(options.get("interactive"), Some(&Value::from(false)));
        assert_eq!(options.get("modal"), Some(&Value::from(false)));
    }
}
