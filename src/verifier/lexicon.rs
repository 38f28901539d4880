use phf::phf_set;

/// Mailboxes that name a function rather than a person.
static ROLE_ACCOUNTS: phf::Set<&'static str> = phf_set! {
    "abuse", "admin", "administrator", "billing", "contact", "devnull", "dns",
    "ftp", "help", "hostmaster", "hr", "info", "jobs", "mail", "marketing",
    "media", "news", "noc", "no-reply", "noreply", "office", "postmaster",
    "privacy", "root", "sales", "security", "support", "sysadmin", "team",
    "webmaster", "www",
};

static FREE_PROVIDERS: phf::Set<&'static str> = phf_set! {
    "aol.com", "fastmail.com", "free.fr", "gmail.com", "gmx.com", "gmx.de",
    "googlemail.com", "hotmail.com", "hotmail.fr", "icloud.com", "laposte.net",
    "live.com", "mail.com", "mail.ru", "me.com", "msn.com", "orange.fr",
    "outlook.com", "proton.me", "protonmail.com", "qq.com", "sfr.fr",
    "web.de", "yahoo.com", "yahoo.fr", "yandex.ru", "zoho.com",
};

pub(crate) fn is_role_account(username: &str) -> bool {
    ROLE_ACCOUNTS.contains(username.to_ascii_lowercase().as_str())
}

pub(crate) fn is_free_provider(ascii_domain: &str) -> bool {
    FREE_PROVIDERS.contains(ascii_domain.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_accounts_ignore_case() {
        assert!(is_role_account("Postmaster"));
        assert!(is_role_account("no-reply"));
        assert!(!is_role_account("alice"));
    }

    #[test]
    fn free_providers() {
        assert!(is_free_provider("gmail.com"));
        assert!(is_free_provider("Yahoo.FR"));
        assert!(!is_free_provider("example.com"));
    }
}
