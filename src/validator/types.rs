use serde::{Deserialize, Serialize};

/// Règles de local-part appliquées par [`check_syntax`](super::check_syntax).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Strict,
    Relaxed,
}

/// Section `syntax` d'un résultat de vérification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syntax {
    pub username: String,
    pub domain: String,
    pub valid: bool,
}

impl Syntax {
    pub fn invalid() -> Self {
        Self {
            username: String::new(),
            domain: String::new(),
            valid: false,
        }
    }
}

/// Sortie complète de l'étape syntaxe: la [`Syntax`] publique, le domaine
/// ASCII pour DNS/SMTP et les raisons d'un refus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxReport {
    pub syntax: Syntax,
    pub ascii_domain: String,
    pub reasons: Vec<String>,
}

impl SyntaxReport {
    pub fn is_valid(&self) -> bool {
        self.syntax.valid
    }
}
