use rand::{Rng, distributions::Alphanumeric};

/// Mailbox name used to detect catch-all servers, lower case so it does not
/// trip case-sensitive filters.
pub fn random_local_part(len: usize) -> String {
    let length = len.clamp(10, 32);
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_local_part_is_clamped_alphanumeric() {
        let short = random_local_part(1);
        assert_eq!(short.len(), 10);
        assert!(short.chars().all(|c| c.is_ascii_alphanumeric() && !c.is_ascii_uppercase()));
        assert_eq!(random_local_part(200).len(), 32);
    }
}
