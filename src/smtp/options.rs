use std::time::Duration;

use super::socks::Socks5Proxy;

/// Knobs for [`probe_mailbox`](super::probe_mailbox).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpProbeOptions {
    pub helo_name: String,
    pub mail_from: String,
    pub port: u16,
    pub timeout_ms: u64,
    pub max_mx: usize,
    pub starttls: bool,
    pub proxy: Option<Socks5Proxy>,
}

impl Default for SmtpProbeOptions {
    fn default() -> Self {
        Self {
            helo_name: "localhost".to_string(),
            mail_from: String::new(),
            port: 25,
            timeout_ms: 5_000,
            max_mx: 3,
            starttls: false,
            proxy: None,
        }
    }
}

impl SmtpProbeOptions {
    /// Socket deadline for connect, read and write. A zero timeout disables it.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }

    /// `MAIL FROM` envelope; the null sender when none is configured.
    pub fn envelope(&self) -> String {
        if self.mail_from.is_empty() {
            "MAIL FROM:<>".to_string()
        } else {
            format!("MAIL FROM:<{}>", self.mail_from)
        }
    }
}
