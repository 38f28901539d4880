use serde::{Deserialize, Serialize};

/// SMTP section of a verification result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpDetails {
    /// A mail exchanger answered and completed the dialogue.
    pub host_exists: bool,
    /// The recipient was refused because the mailbox is over quota.
    pub full_inbox: bool,
    /// The server accepted a randomly generated mailbox.
    pub catch_all: bool,
    /// The recipient was accepted.
    pub deliverable: bool,
    /// The recipient exists but has been disabled or suspended.
    pub disabled: bool,
}
