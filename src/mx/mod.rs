//! DNS MX resolution for the verification pipeline.
//!
//! [`resolve_with`] queries any [`LookupMx`] implementation and returns a
//! [`MxStatus`]; [`SystemResolver`] is the blocking system resolver.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{LookupMx, SystemResolver, resolve_with};
pub use types::{MxRecord, MxStatus};
