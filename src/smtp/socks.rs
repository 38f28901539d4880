//! Minimal SOCKS5 client (RFC 1928, username/password per RFC 1929) used to
//! tunnel SMTP probes through the configured proxy.

use std::fmt;
use std::io::{Read, Write};
use std::net::{IpAddr, TcpStream};
use std::time::Duration;

use percent_encoding::percent_decode_str;
use url::Url;

use super::error::SmtpError;
use super::stream::connect_tcp;

const VERSION: u8 = 0x05;
const NO_AUTH: u8 = 0x00;
const USER_PASS: u8 = 0x02;
const NO_ACCEPTABLE: u8 = 0xff;
const CMD_CONNECT: u8 = 0x01;
const ATYP_V4: u8 = 0x01;
const ATYP_DOMAIN: u8 = 0x03;
const ATYP_V6: u8 = 0x04;
const DEFAULT_PORT: u16 = 1080;

#[derive(Clone, PartialEq, Eq)]
struct Credentials {
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A parsed `socks5://[user:pass@]host[:port]` (or `socks5h://`) proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Socks5Proxy {
    host: String,
    port: u16,
    credentials: Option<Credentials>,
}

impl Socks5Proxy {
    pub fn parse(raw: &str) -> Result<Self, SmtpError> {
        let url = Url::parse(raw.trim())
            .map_err(|err| SmtpError::InvalidProxy(format!("{err}")))?;
        match url.scheme() {
            "socks5" | "socks5h" => {}
            other => {
                return Err(SmtpError::InvalidProxy(format!(
                    "unsupported scheme '{other}' (expected socks5 or socks5h)"
                )));
            }
        }
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| SmtpError::InvalidProxy("missing proxy host".to_string()))?
            .to_string();
        let credentials = if url.username().is_empty() {
            None
        } else {
            Some(Credentials {
                username: decode_userinfo(url.username())?,
                password: decode_userinfo(url.password().unwrap_or_default())?,
            })
        };
        if let Some(creds) = &credentials {
            if creds.username.len() > 255 || creds.password.len() > 255 {
                return Err(SmtpError::InvalidProxy(
                    "proxy credentials longer than 255 bytes".to_string(),
                ));
            }
        }
        Ok(Self {
            host,
            port: url.port().unwrap_or(DEFAULT_PORT),
            credentials,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Open a TCP connection to the proxy and ask it to `CONNECT` to
    /// `target_host:target_port`. The target name is resolved by the proxy.
    pub fn connect(
        &self,
        target_host: &str,
        target_port: u16,
        timeout: Option<Duration>,
    ) -> Result<TcpStream, SmtpError> {
        let endpoint = format!("{}:{}", self.host, self.port);
        let mut stream = connect_tcp(&endpoint, timeout)?;
        self.negotiate_auth(&mut stream)?;
        self.request_connect(&mut stream, target_host, target_port)?;
        Ok(stream)
    }

    fn negotiate_auth(&self, stream: &mut TcpStream) -> Result<(), SmtpError> {
        let greeting: &[u8] = if self.credentials.is_some() {
            &[VERSION, 2, NO_AUTH, USER_PASS]
        } else {
            &[VERSION, 1, NO_AUTH]
        };
        stream.write_all(greeting).map_err(SmtpError::io)?;

        let mut choice = [0u8; 2];
        stream.read_exact(&mut choice).map_err(SmtpError::io)?;
        if choice[0] != VERSION {
            return Err(SmtpError::proxy(self, format!("unexpected version {}", choice[0])));
        }
        match (choice[1], &self.credentials) {
            (NO_AUTH, _) => Ok(()),
            (USER_PASS, Some(creds)) => self.authenticate(stream, creds),
            (NO_ACCEPTABLE, _) => Err(SmtpError::proxy(self, "no acceptable auth method")),
            (method, _) => Err(SmtpError::proxy(self, format!("unexpected auth method {method}"))),
        }
    }

    fn authenticate(&self, stream: &mut TcpStream, creds: &Credentials) -> Result<(), SmtpError> {
        let mut msg = Vec::with_capacity(3 + creds.username.len() + creds.password.len());
        msg.push(0x01);
        msg.push(creds.username.len() as u8);
        msg.extend_from_slice(creds.username.as_bytes());
        msg.push(creds.password.len() as u8);
        msg.extend_from_slice(creds.password.as_bytes());
        stream.write_all(&msg).map_err(SmtpError::io)?;

        let mut status = [0u8; 2];
        stream.read_exact(&mut status).map_err(SmtpError::io)?;
        if status[1] != 0x00 {
            return Err(SmtpError::proxy(self, "authentication rejected"));
        }
        Ok(())
    }

    fn request_connect(
        &self,
        stream: &mut TcpStream,
        target_host: &str,
        target_port: u16,
    ) -> Result<(), SmtpError> {
        let mut req = vec![VERSION, CMD_CONNECT, 0x00];
        match target_host.parse::<IpAddr>() {
            Ok(IpAddr::V4(ip)) => {
                req.push(ATYP_V4);
                req.extend_from_slice(&ip.octets());
            }
            Ok(IpAddr::V6(ip)) => {
                req.push(ATYP_V6);
                req.extend_from_slice(&ip.octets());
            }
            Err(_) => {
                let name = target_host.as_bytes();
                if name.len() > 255 {
                    return Err(SmtpError::proxy(self, "target host name too long"));
                }
                req.push(ATYP_DOMAIN);
                req.push(name.len() as u8);
                req.extend_from_slice(name);
            }
        }
        req.extend_from_slice(&target_port.to_be_bytes());
        stream.write_all(&req).map_err(SmtpError::io)?;

        let mut head = [0u8; 4];
        stream.read_exact(&mut head).map_err(SmtpError::io)?;
        if head[0] != VERSION {
            return Err(SmtpError::proxy(self, format!("unexpected version {}", head[0])));
        }
        if head[1] != 0x00 {
            return Err(SmtpError::proxy(self, reply_reason(head[1])));
        }
        let bound_len = match head[3] {
            ATYP_V4 => 4,
            ATYP_V6 => 16,
            ATYP_DOMAIN => {
                let mut len = [0u8; 1];
                stream.read_exact(&mut len).map_err(SmtpError::io)?;
                usize::from(len[0])
            }
            other => {
                return Err(SmtpError::proxy(self, format!("unknown address type {other}")));
            }
        };
        // bound address and port, unused
        let mut bound = vec![0u8; bound_len + 2];
        stream.read_exact(&mut bound).map_err(SmtpError::io)?;
        Ok(())
    }
}

/// `Url` keeps userinfo percent-encoded; the proxy expects the raw bytes.
fn decode_userinfo(encoded: &str) -> Result<String, SmtpError> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| SmtpError::InvalidProxy("proxy credentials are not valid UTF-8".to_string()))
}

impl fmt::Display for Socks5Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "socks5://{}:{}", self.host, self.port)
    }
}

fn reply_reason(code: u8) -> String {
    match code {
        0x01 => "general SOCKS server failure".to_string(),
        0x02 => "connection not allowed by ruleset".to_string(),
        0x03 => "network unreachable".to_string(),
        0x04 => "host unreachable".to_string(),
        0x05 => "connection refused".to_string(),
        0x06 => "TTL expired".to_string(),
        0x07 => "command not supported".to_string(),
        0x08 => "address type not supported".to_string(),
        other => format!("reply code {other}"),
    }
}
