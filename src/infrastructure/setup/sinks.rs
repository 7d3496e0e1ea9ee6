//! Notifier and navigator implementations for headless use

use std::sync::RwLock;

use tracing::{error, info};

use crate::domain::{Navigator, Notifier};

/// Notifier that reports errors through the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_error(&self, message: &str) {
        error!(message = %message, "Notification");
    }
}

/// Navigator that records where it was sent
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: RwLock<Vec<Vec<String>>>,
    back_count: RwLock<usize>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent navigation target
    pub fn last(&self) -> Option<Vec<String>> {
        self.visited.read().ok()?.last().cloned()
    }

    /// Every navigation target, oldest first
    pub fn visited(&self) -> Vec<Vec<String>> {
        self.visited
            .read()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// Number of `go_back` calls
    pub fn back_count(&self) -> usize {
        self.back_count.read().map(|c| *c).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, segments: &[String]) {
        info!(path = %segments.join("/"), "Navigating");
        if let Ok(mut visited) = self.visited.write() {
            visited.push(segments.to_vec());
        }
    }

    fn go_back(&self) {
        info!("Navigating back");
        if let Ok(mut count) = self.back_count.write() {
            *count += 1;
        }
    }
}
