//! Screen host collaborator
//!
//! The embedding application supplies rendering: blocking alert dialogs and
//! navigation to the terminal result views. The controller only ever calls
//! through this seam, so screen frameworks stay out of the crate.

use crate::session::types::OutcomeSummary;

/// Terminal views the controller can navigate to.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    PaymentSuccess(OutcomeSummary),
    PaymentFailure(OutcomeSummary),
}

/// Rendering surface supplied by the embedding application.
pub trait ScreenHost: Send + Sync {
    /// Show a blocking alert dialog. Alerts precede any navigation.
    fn alert(&self, title: &str, message: &str);

    /// Navigate to a terminal result view.
    fn navigate(&self, target: Navigation);
}
