//! User notification sink for the headless agent.

use tracing::info;

use locify_common::services::UserNotifier;

/// Prints user-facing notifications to stdout, the agent's stand-in for
/// the UI toast a device app would show.
pub struct LogNotifier;

impl UserNotifier for LogNotifier {
    fn notify(&self, message: &str) {
        println!("{message}");
        info!(target: "locify::user", "{message}");
    }
}
