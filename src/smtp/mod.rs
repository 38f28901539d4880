//! SMTP mailbox probing.
//!
//! [`probe_mailbox`] opens a dialogue with the mail exchangers of a domain
//! (directly, or through a SOCKS5 proxy), checks whether the server accepts
//! any recipient, then asks about the target mailbox with `RCPT TO`. No
//! message is ever sent.

mod error;
mod options;
mod probe;
mod reply;
mod session;
mod socks;
mod stream;
mod types;
mod util;

pub use error::SmtpError;
pub use options::SmtpProbeOptions;
pub use probe::{MailboxTarget, probe_mailbox};
pub use reply::SmtpReply;
pub use socks::Socks5Proxy;
pub use types::SmtpDetails;

#[cfg(test)]
mod tests;
