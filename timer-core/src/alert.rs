use thiserror::Error;

/// Failures an alert backend may report. None of them affect timer state.
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("alert output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("notification permission not granted")]
    PermissionDenied,

    #[error("alert backend unavailable: {0}")]
    Unavailable(String),
}

/// Delivery of the countdown completion cue.
///
/// Both calls are best effort and must return promptly; the countdown
/// logs and drops any error.
pub trait AlertSink {
    /// Audible cue.
    fn play_alert(&mut self) -> Result<(), AlertError>;

    /// User-visible notification.
    fn notify(&mut self, title: &str, body: &str) -> Result<(), AlertError>;
}

/// Sink that discards every alert.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAlerts;

impl AlertSink for NoopAlerts {
    fn play_alert(&mut self) -> Result<(), AlertError> {
        Ok(())
    }

    fn notify(&mut self, _title: &str, _body: &str) -> Result<(), AlertError> {
        Ok(())
    }
}
