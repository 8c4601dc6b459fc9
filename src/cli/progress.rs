//! CLI-specific progress handling for ecoroute
//!
//! Shows a spinner while a request is in the `Loading` state.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a spinner for CLI display
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .expect("Failed to create spinner style"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Spinner bound to the submit affordance's busy state
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    /// Create and start ticking a spinner
    pub fn new(message: &str) -> Self {
        let pb = create_spinner(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// Stop the spinner, leaving `message` in place
    pub fn finish(&self, message: &str) {
        self.pb.finish_with_message(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_spinner_template() {
        let pb = create_spinner("Calculating...");
        assert_eq!(pb.message(), "Calculating...");
        pb.finish();
    }

    #[test]
    fn test_progress_manager_finish() {
        let manager = ProgressManager::new("Calculating...");
        manager.finish("Done");
        assert!(manager.pb.is_finished());
        assert_eq!(manager.pb.message(), "Done");
    }
}
