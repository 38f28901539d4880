/// Règles strictes: atext ASCII, '.' jamais en tête, en fin ni doublé.
pub(crate) fn is_local_strict(s: &str) -> bool {
    if s.is_empty() || s.starts_with('.') || s.ends_with('.') || s.contains("..") {
        return false;
    }
    s.chars().all(|c| c.is_ascii_alphanumeric() || is_atext_symbol(c) || c == '.')
}

/// Règles relaxed: quoted-string simple (ASCII imprimable, sans '"' interne),
/// sinon retombe sur `is_local_strict`.
pub(crate) fn is_local_relaxed(s: &str) -> bool {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        let inner = &s[1..s.len() - 1];
        !inner.contains('"') && inner.chars().all(|c| c.is_ascii() && !c.is_ascii_control())
    } else {
        is_local_strict(s)
    }
}

fn is_atext_symbol(c: char) -> bool {
    matches!(
        c,
        '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '/' | '=' | '?' | '^' | '_' | '`'
            | '{' | '|' | '}' | '~'
    )
}
