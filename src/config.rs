//! Runtime configuration, loaded once at startup and shared read-only.

use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

use crate::bulk::DEFAULT_MAX_BATCH;
use crate::smtp::{SmtpError, SmtpProbeOptions, Socks5Proxy};
use crate::validator::{ValidationMode, check_syntax};
use crate::verifier::VerifierOptions;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SMTP_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("PROXY_URL is invalid: {0}")]
    InvalidProxy(#[source] SmtpError),
    #[error("FROM_EMAIL '{0}' is not a valid address")]
    InvalidFromEmail(String),
    #[error("LISTEN_ADDR '{value}' is invalid: {source}")]
    InvalidListenAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("MAX_BATCH must be at least 1")]
    ZeroBatch,
}

/// Unvalidated settings as read from flags or the environment.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub auth_token: Option<String>,
    pub proxy_url: Option<String>,
    pub from_email: Option<String>,
    pub helo_name: Option<String>,
    pub listen_addr: Option<String>,
    pub max_batch: Option<usize>,
    pub smtp_timeout_ms: Option<u64>,
    pub starttls: bool,
}

/// Envelope identity used in the SMTP dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub from_email: String,
    pub helo_name: String,
}

impl SenderIdentity {
    pub fn is_configured(&self) -> bool {
        !self.from_email.is_empty() && !self.helo_name.is_empty()
    }
}

/// Validated configuration. Built by [`AppConfig::from_raw`].
#[derive(Clone)]
pub struct AppConfig {
    pub auth_token: String,
    pub proxy: Socks5Proxy,
    pub sender: SenderIdentity,
    pub listen_addr: SocketAddr,
    pub max_batch: usize,
    pub smtp_timeout_ms: u64,
    pub starttls: bool,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("auth_token", &"<redacted>")
            .field("proxy", &self.proxy.to_string())
            .field("sender", &self.sender)
            .field("listen_addr", &self.listen_addr)
            .field("max_batch", &self.max_batch)
            .field("smtp_timeout_ms", &self.smtp_timeout_ms)
            .field("starttls", &self.starttls)
            .finish()
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    required_verbatim(value, name).map(|v| v.trim().to_string())
}

/// Blank values count as missing, but the value itself is kept untouched.
fn required_verbatim(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

impl AppConfig {
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let auth_token = required_verbatim(raw.auth_token, "AUTH_TOKEN")?;
        let proxy_url = required(raw.proxy_url, "PROXY_URL")?;
        let from_email = required(raw.from_email, "FROM_EMAIL")?;
        let helo_name = required(raw.helo_name, "HELO_NAME")?;

        let proxy = Socks5Proxy::parse(&proxy_url).map_err(ConfigError::InvalidProxy)?;

        if !check_syntax(&from_email, ValidationMode::Strict).is_valid() {
            return Err(ConfigError::InvalidFromEmail(from_email));
        }

        let listen = raw
            .listen_addr
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: listen.clone(),
                source,
            })?;

        let max_batch = raw.max_batch.unwrap_or(DEFAULT_MAX_BATCH);
        if max_batch == 0 {
            return Err(ConfigError::ZeroBatch);
        }

        Ok(Self {
            auth_token,
            proxy,
            sender: SenderIdentity {
                from_email,
                helo_name,
            },
            listen_addr,
            max_batch,
            smtp_timeout_ms: raw.smtp_timeout_ms.unwrap_or(DEFAULT_SMTP_TIMEOUT_MS),
            starttls: raw.starttls,
        })
    }

    /// Options for the production verifier derived from this configuration.
    pub fn verifier_options(&self) -> VerifierOptions {
        VerifierOptions {
            validation_mode: ValidationMode::Strict,
            smtp: SmtpProbeOptions {
                helo_name: self.sender.helo_name.clone(),
                mail_from: self.sender.from_email.clone(),
                timeout_ms: self.smtp_timeout_ms,
                starttls: self.starttls,
                proxy: Some(self.proxy.clone()),
                ..SmtpProbeOptions::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RawConfig {
        RawConfig {
            auth_token: Some("s3cret".into()),
            proxy_url: Some("socks5://user:pw@proxy.internal:1080".into()),
            from_email: Some("probe@example.org".into()),
            helo_name: Some("mx.example.org".into()),
            ..RawConfig::default()
        }
    }

    #[test]
    fn defaults_are_applied() {
        let cfg = AppConfig::from_raw(complete()).expect("valid config");
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.max_batch, 15);
        assert_eq!(cfg.smtp_timeout_ms, 5_000);
        assert!(!cfg.starttls);
        assert_eq!(cfg.proxy.host(), "proxy.internal");
        assert!(cfg.sender.is_configured());
    }

    #[test]
    fn each_required_value_is_enforced() {
        let cases: [(&str, fn(&mut RawConfig)); 4] = [
            ("AUTH_TOKEN", |r| r.auth_token = None),
            ("PROXY_URL", |r| r.proxy_url = Some("  ".into())),
            ("FROM_EMAIL", |r| r.from_email = Some(String::new())),
            ("HELO_NAME", |r| r.helo_name = None),
        ];
        for (name, unset) in cases {
            let mut raw = complete();
            unset(&mut raw);
            match AppConfig::from_raw(raw) {
                Err(ConfigError::Missing(missing)) => assert_eq!(missing, name),
                other => panic!("expected Missing({name}), got {other:?}"),
            }
        }
    }

    #[test]
    fn auth_token_is_kept_verbatim() {
        let mut raw = complete();
        raw.auth_token = Some(" s3cret\t".into());
        raw.helo_name = Some("  mx.example.org ".into());
        let cfg = AppConfig::from_raw(raw).expect("valid config");
        assert_eq!(cfg.auth_token, " s3cret\t");
        assert_eq!(cfg.sender.helo_name, "mx.example.org");

        let mut raw = complete();
        raw.auth_token = Some(" \t ".into());
        assert!(matches!(
            AppConfig::from_raw(raw),
            Err(ConfigError::Missing("AUTH_TOKEN"))
        ));
    }

    #[test]
    fn rejects_bad_values() {
        let mut raw = complete();
        raw.proxy_url = Some("http://proxy:3128".into());
        assert!(matches!(
            AppConfig::from_raw(raw),
            Err(ConfigError::InvalidProxy(_))
        ));

        let mut raw = complete();
        raw.from_email = Some("not-an-address".into());
        assert!(matches!(
            AppConfig::from_raw(raw),
            Err(ConfigError::InvalidFromEmail(_))
        ));

        let mut raw = complete();
        raw.listen_addr = Some("localhost".into());
        assert!(matches!(
            AppConfig::from_raw(raw),
            Err(ConfigError::InvalidListenAddr { .. })
        ));

        let mut raw = complete();
        raw.max_batch = Some(0);
        assert!(matches!(
            AppConfig::from_raw(raw),
            Err(ConfigError::ZeroBatch)
        ));
    }

    #[test]
    fn verifier_options_carry_sender_and_proxy() {
        let mut raw = complete();
        raw.smtp_timeout_ms = Some(1_500);
        raw.starttls = true;
        let cfg = AppConfig::from_raw(raw).expect("valid config");
        let options = cfg.verifier_options();
        assert_eq!(options.smtp.helo_name, "mx.example.org");
        assert_eq!(options.smtp.mail_from, "probe@example.org");
        assert_eq!(options.smtp.timeout_ms, 1_500);
        assert!(options.smtp.starttls);
        assert_eq!(options.smtp.proxy.as_ref().map(|p| p.port()), Some(1080));
        assert_eq!(options.smtp.port, 25);
    }

    #[test]
    fn debug_hides_the_token() {
        let cfg = AppConfig::from_raw(complete()).expect("valid config");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(!rendered.contains("pw"));
    }
}
