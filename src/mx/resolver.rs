use trust_dns_resolver::Resolver;
use trust_dns_resolver::error::ResolveErrorKind;

use super::{Error, MxRecord, MxStatus};

/// Source of MX records. The system resolver in production, stubs in tests.
pub trait LookupMx: Send + Sync {
    /// Raw MX records for an ASCII domain. A domain without MX records is
    /// an empty list, not an error.
    fn lookup_mx(&self, ascii_domain: &str) -> Result<Vec<MxRecord>, Error>;
}

/// Resolver built from `/etc/resolv.conf` (or the platform equivalent).
///
/// A fresh blocking resolver is created per lookup; lookups run on the
/// caller's thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl LookupMx for SystemResolver {
    fn lookup_mx(&self, ascii_domain: &str) -> Result<Vec<MxRecord>, Error> {
        let resolver = Resolver::from_system_conf().map_err(Error::resolver_init)?;
        let lookup = match resolver.mx_lookup(ascii_domain) {
            Ok(lookup) => lookup,
            Err(err) => {
                return match err.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => Ok(Vec::new()),
                    _ => Err(Error::lookup(err)),
                };
            }
        };
        Ok(lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(&mx.exchange().to_utf8())))
            .collect())
    }
}

/// Lookup MX records for `ascii_domain` through `resolver`.
///
/// The resulting [`MxStatus`] holds the records sorted by ascending
/// preference, without duplicates and without null MX (`.`) entries.
pub fn resolve_with<R>(resolver: &R, ascii_domain: &str) -> Result<MxStatus, Error>
where
    R: LookupMx + ?Sized,
{
    let domain = ascii_domain.trim();
    if domain.is_empty() {
        return Err(Error::EmptyDomain);
    }

    let mut records = resolver.lookup_mx(domain)?;
    records.retain(|r| !r.exchange.is_empty());
    records.sort();
    records.dedup();

    if records.is_empty() {
        Ok(MxStatus::NoRecords)
    } else {
        Ok(MxStatus::Records(records))
    }
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}
