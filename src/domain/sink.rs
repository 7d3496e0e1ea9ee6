//! Presentation-side collaborators: notifications and navigation

#[cfg(test)]
use mockall::automock;

/// Non-blocking user notifications
#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync {
    fn show_error(&self, message: &str);
}

/// Navigation between console views
#[cfg_attr(test, automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to the view addressed by the path segments
    fn navigate(&self, segments: &[String]);

    /// Return to the previous view
    fn go_back(&self);
}
