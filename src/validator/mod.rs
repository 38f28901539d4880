//! Étape syntaxe de la vérification: découpe l'adresse en username/domaine
//! et la valide contre le sous-ensemble RFC 5321/5322 accepté.

mod domain;
mod local;
mod types;

pub use types::{Syntax, SyntaxReport, ValidationMode};

use domain::check_domain;
use local::{is_local_relaxed, is_local_strict};

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

/// Valide `email` et renvoie la section syntaxe + le domaine ASCII.
///
/// N'échoue jamais: une adresse mal formée donne un rapport avec
/// `syntax.valid == false` et les raisons collectées.
pub fn check_syntax(email: &str, mode: ValidationMode) -> SyntaxReport {
    let input = email.trim();
    let mut reasons = Vec::new();

    if input.len() > MAX_ADDRESS_LEN {
        reasons.push(format!("total length {} > {MAX_ADDRESS_LEN}", input.len()));
    }

    let parts: Vec<&str> = input.split('@').collect();
    let [local, domain] = parts.as_slice() else {
        reasons.push("must contain exactly one '@'".to_string());
        return SyntaxReport {
            syntax: Syntax::invalid(),
            ascii_domain: String::new(),
            reasons,
        };
    };

    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        reasons.push(format!(
            "local part length {} invalid (1..={MAX_LOCAL_LEN})",
            local.len()
        ));
    }

    let ascii_domain = check_domain(domain, &mut reasons).unwrap_or_default();

    let local_ok = match mode {
        ValidationMode::Strict => is_local_strict(local),
        ValidationMode::Relaxed => is_local_relaxed(local),
    };
    if !local_ok {
        reasons.push(match mode {
            ValidationMode::Strict => "invalid local part (strict rules)".into(),
            ValidationMode::Relaxed => "invalid local part (relaxed rules)".into(),
        });
    }

    SyntaxReport {
        syntax: Syntax {
            username: local.to_string(),
            domain: domain.to_lowercase(),
            valid: reasons.is_empty(),
        },
        ascii_domain,
        reasons,
    }
}
