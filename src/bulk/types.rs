use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::verifier::VerificationResult;

/// Default upper bound on the number of addresses in one bulk request.
pub const DEFAULT_MAX_BATCH: usize = 15;

/// JSON body of `POST /v1/bulk`. A missing or `null` list counts as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub emails: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("No emails provided")]
    Empty,
    #[error("Too many emails provided (max {max})")]
    TooLarge { len: usize, max: usize },
}

/// Addresses of one bulk request, guaranteed to hold `1..=max` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    addresses: Vec<String>,
}

impl Batch {
    pub fn new(addresses: Vec<String>, max: usize) -> Result<Self, BatchError> {
        if addresses.is_empty() {
            return Err(BatchError::Empty);
        }
        if addresses.len() > max {
            return Err(BatchError::TooLarge {
                len: addresses.len(),
                max,
            });
        }
        Ok(Self { addresses })
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    pub fn into_addresses(self) -> Vec<String> {
        self.addresses
    }
}

/// Exactly one of a verification result or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(VerificationResult),
    Error(String),
}

/// Outcome for one submitted address, serialized as
/// `{"email", "result"}` or `{"email", "error"}`. Deserialization rejects
/// objects carrying both keys or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOutcome")]
pub struct VerificationOutcome {
    pub email: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Wire form before the one-of check. `Some(None)` is an explicit `null`.
#[derive(Deserialize)]
struct RawOutcome {
    email: String,
    #[serde(default, deserialize_with = "present")]
    result: Option<Option<VerificationResult>>,
    #[serde(default, deserialize_with = "present")]
    error: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TryFrom<RawOutcome> for VerificationOutcome {
    type Error = String;

    fn try_from(raw: RawOutcome) -> Result<Self, Self::Error> {
        let outcome = match (raw.result, raw.error) {
            (Some(Some(result)), None) => Outcome::Result(result),
            (None, Some(Some(error))) => Outcome::Error(error),
            (Some(_), Some(_)) => {
                return Err(format!("outcome for {} has both result and error", raw.email));
            }
            (None, None) => {
                return Err(format!("outcome for {} has neither result nor error", raw.email));
            }
            _ => return Err(format!("outcome for {} is null", raw.email)),
        };
        Ok(Self {
            email: raw.email,
            outcome,
        })
    }
}

impl VerificationOutcome {
    pub fn success(email: impl Into<String>, result: VerificationResult) -> Self {
        Self {
            email: email.into(),
            outcome: Outcome::Result(result),
        }
    }

    pub fn failure(email: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            outcome: Outcome::Error(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Result(_))
    }

    pub fn result(&self) -> Option<&VerificationResult> {
        match &self.outcome {
            Outcome::Result(result) => Some(result),
            Outcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Result(_) => None,
            Outcome::Error(err) => Some(err),
        }
    }
}

/// Every outcome of one bulk request, one per submitted address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeSet(Vec<VerificationOutcome>);

impl OutcomeSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VerificationOutcome> {
        self.0.iter()
    }

    pub fn failures(&self) -> usize {
        self.0.iter().filter(|o| !o.is_success()).count()
    }

    pub fn into_vec(self) -> Vec<VerificationOutcome> {
        self.0
    }
}

impl From<Vec<VerificationOutcome>> for OutcomeSet {
    fn from(outcomes: Vec<VerificationOutcome>) -> Self {
        Self(outcomes)
    }
}

impl IntoIterator for OutcomeSet {
    type Item = VerificationOutcome;
    type IntoIter = std::vec::IntoIter<VerificationOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OutcomeSet {
    type Item = &'a VerificationOutcome;
    type IntoIter = std::slice::Iter<'a, VerificationOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
