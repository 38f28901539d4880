//! The verification capability: syntax, MX lookup and SMTP probe for one
//! address.
//!
//! Everything upstream (bulk dispatch, HTTP handlers) only sees the
//! [`Verifier`] trait, so the network-bound [`EmailVerifier`] can be swapped
//! for a stub.

mod error;
mod lexicon;
mod types;

use std::sync::Arc;

use tracing::debug;

pub use error::VerifyError;
pub use types::{Reachable, VerificationResult};

use crate::mx::{LookupMx, MxStatus, SystemResolver, resolve_with};
use crate::smtp::{MailboxTarget, SmtpProbeOptions, probe_mailbox};
use crate::validator::{ValidationMode, check_syntax};

/// Blocking, network-bound verification of one address.
pub trait Verifier: Send + Sync {
    fn verify(&self, email: &str) -> Result<VerificationResult, VerifyError>;
}

impl<F> Verifier for F
where
    F: Fn(&str) -> Result<VerificationResult, VerifyError> + Send + Sync,
{
    fn verify(&self, email: &str) -> Result<VerificationResult, VerifyError> {
        self(email)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifierOptions {
    pub validation_mode: ValidationMode,
    pub smtp: SmtpProbeOptions,
}

/// Production verifier: syntax → MX → SMTP.
#[derive(Clone)]
pub struct EmailVerifier {
    options: VerifierOptions,
    resolver: Arc<dyn LookupMx>,
}

impl EmailVerifier {
    pub fn new(options: VerifierOptions) -> Self {
        Self::with_resolver(options, Arc::new(SystemResolver))
    }

    pub fn with_resolver(options: VerifierOptions, resolver: Arc<dyn LookupMx>) -> Self {
        Self { options, resolver }
    }

    pub fn options(&self) -> &VerifierOptions {
        &self.options
    }
}

impl Verifier for EmailVerifier {
    fn verify(&self, email: &str) -> Result<VerificationResult, VerifyError> {
        let report = check_syntax(email, self.options.validation_mode);
        let mut result = VerificationResult::new(email.trim(), report.syntax.clone());
        if !report.is_valid() {
            debug!(email, reasons = ?report.reasons, "syntax check failed");
            return Ok(result);
        }

        result.role_account = lexicon::is_role_account(&report.syntax.username);
        result.free = lexicon::is_free_provider(&report.ascii_domain);

        let records = match resolve_with(self.resolver.as_ref(), &report.ascii_domain) {
            Ok(MxStatus::Records(records)) => records,
            Ok(MxStatus::NoRecords) => return Ok(result),
            Err(err) if err.is_local_failure() => return Err(err.into()),
            Err(err) => {
                debug!(domain = %report.ascii_domain, error = %err, "MX lookup failed");
                return Ok(result);
            }
        };
        result.has_mx_records = true;

        let target = MailboxTarget {
            local: &report.syntax.username,
            ascii_domain: &report.ascii_domain,
        };
        let smtp = probe_mailbox(&target, &records, &self.options.smtp)?;
        result.reachable = Reachable::from_smtp(&smtp);
        result.smtp = Some(smtp);
        Ok(result)
    }
}
