use serde::{Deserialize, Serialize};

use crate::smtp::SmtpDetails;
use crate::validator::Syntax;

/// Overall verdict on whether mail to the address would be received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reachable {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Reachable {
    pub fn from_smtp(smtp: &SmtpDetails) -> Self {
        if smtp.deliverable {
            Self::Yes
        } else if smtp.catch_all {
            Self::Unknown
        } else {
            Self::No
        }
    }
}

/// Structured payload returned by a successful verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub email: String,
    pub reachable: Reachable,
    pub syntax: Syntax,
    pub smtp: Option<SmtpDetails>,
    pub has_mx_records: bool,
    pub role_account: bool,
    pub free: bool,
}

impl VerificationResult {
    pub fn new(email: impl Into<String>, syntax: Syntax) -> Self {
        Self {
            email: email.into(),
            reachable: Reachable::Unknown,
            syntax,
            smtp: None,
            has_mx_records: false,
            role_account: false,
            free: false,
        }
    }
}
