use clap::{Args, Parser, Subcommand};
use mailcheck_api::RawConfig;

#[derive(Parser)]
#[command(name = "mailcheck-api", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    #[command(flatten)]
    pub settings: Settings,
}

#[derive(Subcommand)]
pub enum Commands {
    /// lance le serveur HTTP (par défaut)
    Serve,
    /// vérifie une adresse et affiche le résultat en JSON
    Verify { email: String },
}

#[derive(Args)]
pub struct Settings {
    /// secret partagé attendu dans l'en-tête Authorization
    #[arg(long, env = "AUTH_TOKEN", hide_env_values = true, global = true)]
    pub auth_token: Option<String>,

    /// proxy SOCKS5 pour les connexions SMTP (socks5://[user:pass@]host:port)
    #[arg(long, env = "PROXY_URL", hide_env_values = true, global = true)]
    pub proxy_url: Option<String>,

    /// enveloppe MAIL FROM
    #[arg(long, env = "FROM_EMAIL", global = true)]
    pub from_email: Option<String>,

    /// nom utilisé pour EHLO
    #[arg(long, env = "HELO_NAME", global = true)]
    pub helo_name: Option<String>,

    /// adresse d'écoute (par défaut 0.0.0.0:8080)
    #[arg(long = "listen", env = "LISTEN_ADDR", global = true)]
    pub listen_addr: Option<String>,

    /// nombre maximum d'adresses par requête bulk (par défaut 15)
    #[arg(long, env = "MAX_BATCH", global = true)]
    pub max_batch: Option<usize>,

    /// timeout des sockets SMTP en ms (par défaut 5000)
    #[arg(long, env = "SMTP_TIMEOUT_MS", global = true)]
    pub smtp_timeout_ms: Option<u64>,

    /// passe en STARTTLS si le serveur le propose
    #[arg(long, env = "SMTP_STARTTLS", global = true)]
    pub starttls: bool,
}

impl Settings {
    pub fn into_raw(self) -> RawConfig {
        RawConfig {
            auth_token: self.auth_token,
            proxy_url: self.proxy_url,
            from_email: self.from_email,
            helo_name: self.helo_name,
            listen_addr: self.listen_addr,
            max_batch: self.max_batch,
            smtp_timeout_ms: self.smtp_timeout_ms,
            starttls: self.starttls,
        }
    }
}
