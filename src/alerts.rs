use std::io::Write;
use std::thread;
use std::time::Duration;

use timer_core::{AlertError, AlertSink};

const BELL: &str = "\x07";
const BEEP_GAP: Duration = Duration::from_millis(600);

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NotifyPermission {
    Default,
    Granted,
    Denied,
}

#[derive(Clone, Debug)]
pub struct AlertConfig {
    pub audio: bool,
    pub notification: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            audio: true,
            notification: true,
        }
    }
}

/// Completion alerts for a terminal: bells on stderr, banners on `out`.
pub struct TerminalAlerts<W: Write> {
    config: AlertConfig,
    permission: NotifyPermission,
    out: W,
}

impl<W: Write> TerminalAlerts<W> {
    pub fn new(config: AlertConfig, out: W) -> Self {
        Self {
            config,
            permission: NotifyPermission::Default,
            out,
        }
    }

    /// Asked once at startup. Notifications only show after a grant.
    pub fn request_permission(&mut self) -> NotifyPermission {
        if self.permission == NotifyPermission::Default {
            self.permission = if self.config.notification {
                NotifyPermission::Granted
            } else {
                NotifyPermission::Denied
            };
            log::debug!("notification permission: {:?}", self.permission);
        }
        self.permission
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> AlertSink for TerminalAlerts<W> {
    fn play_alert(&mut self) -> Result<(), AlertError> {
        if !self.config.audio {
            return Ok(());
        }
        // Two beeps a short gap apart, off the caller's thread
        thread::Builder::new()
            .name("alert-beep".into())
            .spawn(|| {
                let mut err = std::io::stderr();
                for i in 0..2 {
                    if i > 0 {
                        thread::sleep(BEEP_GAP);
                    }
                    if err.write_all(BELL.as_bytes()).and_then(|_| err.flush()).is_err() {
                        break;
                    }
                }
            })?;
        Ok(())
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<(), AlertError> {
        match self.permission {
            NotifyPermission::Granted => {}
            // The user opted out; nothing to report
            NotifyPermission::Denied => return Ok(()),
            NotifyPermission::Default => return Err(AlertError::PermissionDenied),
        }
        writeln!(self.out, "*** {} {}", title, body)?;
        self.out.flush()?;
        Ok(())
    }
}
