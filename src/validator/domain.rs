const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Valide le domaine: conversion IDNA + checks de longueur et de labels.
/// Push des raisons invalidantes dans `reasons`; renvoie la forme ASCII
/// si la conversion a réussi.
pub(crate) fn check_domain(domain: &str, reasons: &mut Vec<String>) -> Option<String> {
    let ascii = match idna::domain_to_ascii(domain) {
        Ok(d) => d,
        Err(_) => {
            reasons.push("domain punycode conversion failed".to_string());
            return None;
        }
    };

    if ascii.is_empty() {
        reasons.push("domain empty after IDNA conversion".to_string());
        return None;
    }

    if ascii.len() > MAX_DOMAIN_LEN {
        reasons.push(format!("domain length {} > {MAX_DOMAIN_LEN}", ascii.len()));
    }
    if !ascii.contains('.') {
        reasons.push("domain must contain at least one dot".to_string());
    }

    for label in ascii.split('.') {
        if label.is_empty() {
            reasons.push("empty domain label".to_string());
            continue;
        }
        if label.len() > MAX_LABEL_LEN {
            reasons.push(format!(
                "domain label '{label}' length {} > {MAX_LABEL_LEN}",
                label.len()
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            reasons.push(format!("domain label '{label}' cannot start/end with '-'"));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            reasons.push(format!("domain label '{label}' has invalid chars"));
        }
    }

    Some(ascii)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_domain_ok() {
        let mut reasons = vec![];
        let ascii = check_domain("Example.COM", &mut reasons);
        assert!(reasons.is_empty(), "{reasons:?}");
        assert_eq!(ascii.as_deref(), Some("example.com"));
    }

    #[test]
    fn idn_domain_is_punycoded() {
        let mut reasons = vec![];
        let ascii = check_domain("exämple.com", &mut reasons).expect("ascii");
        assert!(ascii.starts_with("xn--"), "{ascii}");
        assert!(reasons.is_empty(), "{reasons:?}");
    }

    #[test]
    fn label_too_long() {
        let long = "a".repeat(64);
        let mut reasons = vec![];
        check_domain(&format!("{long}.com"), &mut reasons);
        assert!(reasons.iter().any(|r| r.contains("> 63")));
    }

    #[test]
    fn dotless_domain_flagged() {
        let mut reasons = vec![];
        check_domain("localhost", &mut reasons);
        assert_eq!(reasons, vec!["domain must contain at least one dot".to_string()]);
    }
}
