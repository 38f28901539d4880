use native_tls::TlsConnector;
use tracing::debug;

use crate::mx::MxRecord;

use super::error::SmtpError;
use super::options::SmtpProbeOptions;
use super::reply::SmtpReply;
use super::session::SmtpSession;
use super::types::SmtpDetails;
use super::util::random_local_part;

const FULL_INBOX_HINTS: &[&str] = &["full", "quota", "insufficient", "over limit"];
const DISABLED_HINTS: &[&str] = &["disabled", "suspended", "deactivated", "inactive"];

/// Mailbox being probed, already split and IDNA-encoded.
#[derive(Debug, Clone, Copy)]
pub struct MailboxTarget<'a> {
    pub local: &'a str,
    pub ascii_domain: &'a str,
}

/// Run the SMTP dialogue against `hosts` (in the given order, at most
/// `options.max_mx`) until one completes. The first host that answers
/// decides; if none does, the last transport error is returned.
pub fn probe_mailbox(
    target: &MailboxTarget<'_>,
    hosts: &[MxRecord],
    options: &SmtpProbeOptions,
) -> Result<SmtpDetails, SmtpError> {
    let connector = if options.starttls {
        Some(TlsConnector::new().map_err(|err| SmtpError::Tls(err.to_string()))?)
    } else {
        None
    };
    let catchall_local = random_local_part(target.local.len());

    let mut last_err = SmtpError::NoSmtpServers;
    for record in hosts.iter().take(options.max_mx.max(1)) {
        match probe_host(&record.exchange, target, options, connector.as_ref(), &catchall_local) {
            Ok(details) => return Ok(details),
            Err(err) => {
                debug!(host = %record.exchange, error = %err, "SMTP probe failed, trying next host");
                last_err = err;
            }
        }
    }
    Err(last_err)
}

fn probe_host(
    host: &str,
    target: &MailboxTarget<'_>,
    options: &SmtpProbeOptions,
    connector: Option<&TlsConnector>,
    catchall_local: &str,
) -> Result<SmtpDetails, SmtpError> {
    let mut session = SmtpSession::open(host, options)?;
    let ehlo = session.ehlo(&options.helo_name)?;

    if let Some(connector) = connector {
        if ehlo.has_capability("STARTTLS") {
            session.starttls(connector)?;
            session.ehlo(&options.helo_name)?;
        }
    }

    let mail = session.command(&options.envelope())?;
    if !mail.is_positive_completion() {
        let err = session.rejected("MAIL FROM", &mail);
        session.finish();
        return Err(err);
    }

    let mut details = SmtpDetails {
        host_exists: true,
        ..SmtpDetails::default()
    };

    if !catchall_local.eq_ignore_ascii_case(target.local) {
        let probe = session.command(&format!("RCPT TO:<{catchall_local}@{}>", target.ascii_domain))?;
        details.catch_all = probe.is_positive_completion();
    }

    if !details.catch_all {
        let reply = session.command(&format!("RCPT TO:<{}@{}>", target.local, target.ascii_domain))?;
        classify_recipient(&reply, &mut details);
    }

    session.finish();
    Ok(details)
}

fn classify_recipient(reply: &SmtpReply, details: &mut SmtpDetails) {
    if reply.is_positive_completion() {
        details.deliverable = true;
        return;
    }
    let text = reply.message().to_ascii_lowercase();
    if reply.code == 552 || FULL_INBOX_HINTS.iter().any(|hint| text.contains(hint)) {
        details.full_inbox = true;
    } else if reply.is_permanent_failure() && DISABLED_HINTS.iter().any(|hint| text.contains(hint)) {
        details.disabled = true;
    }
}
