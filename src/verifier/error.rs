use thiserror::Error;

use crate::mx::Error as MxError;
use crate::smtp::SmtpError;

/// Failure of the verification itself (as opposed to a negative verdict,
/// which is a successful [`VerificationResult`](super::VerificationResult)).
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Dns(#[from] MxError),
    #[error(transparent)]
    Smtp(#[from] SmtpError),
}
