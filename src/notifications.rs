/// Desktop notifications
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

/// Message raised when a countdown reaches zero
pub const COUNTDOWN_DONE_MESSAGE: &str = "Congratulations on completing another focused goal!";

/// Send a notification when a task's countdown reaches zero
pub fn notify_countdown_done(task_name: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "⏰ {}" with title "Tempo - {}""#,
            COUNTDOWN_DONE_MESSAGE,
            task_name.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            log::debug!("notification failed: {}", e);
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        log::debug!(
            "countdown done for {}: {} (notifications unsupported)",
            task_name,
            COUNTDOWN_DONE_MESSAGE
        );
    }
}
