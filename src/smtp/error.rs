use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmtpError {
    #[error("invalid proxy URL: {0}")]
    InvalidProxy(String),
    #[error("proxy {proxy} refused the tunnel: {reason}")]
    Proxy { proxy: String, reason: String },
    #[error("no SMTP servers available for the domain")]
    NoSmtpServers,
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("TLS handshake failed: {0}")]
    Tls(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("{host} rejected {command} with {code}: {message}")]
    Rejected {
        host: String,
        command: &'static str,
        code: u16,
        message: String,
    },
}

impl SmtpError {
    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io { source }
    }

    pub(crate) fn connect(host: impl Into<String>, source: std::io::Error) -> Self {
        Self::Connect {
            host: host.into(),
            source,
        }
    }

    pub(crate) fn proxy(proxy: impl ToString, reason: impl Into<String>) -> Self {
        Self::Proxy {
            proxy: proxy.to_string(),
            reason: reason.into(),
        }
    }
}
