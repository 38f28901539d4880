#![forbid(unsafe_code)]
//! mailcheck_api: e-mail verification over HTTP (syntax, MX, SMTP probe)
//! with concurrent bulk checks.

pub mod api;
pub mod bulk;
pub mod config;
pub mod mx;
pub mod smtp;
pub mod validator;
pub mod verifier;

pub use api::{ApiError, AppState, router, serve};
pub use bulk::{Batch, BatchError, BulkRequest, Outcome, OutcomeSet, VerificationOutcome, dispatch};
pub use config::{AppConfig, ConfigError, RawConfig, SenderIdentity};
pub use mx::{Error as MxError, LookupMx, MxRecord, MxStatus, SystemResolver};
pub use smtp::{SmtpDetails, SmtpError, SmtpProbeOptions, Socks5Proxy};
pub use validator::{Syntax, SyntaxReport, ValidationMode, check_syntax};
pub use verifier::{
    EmailVerifier, Reachable, VerificationResult, Verifier, VerifierOptions, VerifyError,
};
