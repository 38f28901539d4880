use std::io::{BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use native_tls::{TlsConnector, TlsStream};

use super::error::SmtpError;
use super::reply::{SmtpReply, read_reply};
use super::socks::Socks5Proxy;

/// Resolve `endpoint` (`host:port`) and connect to the first address that
/// answers, applying `timeout` to connect, read and write.
pub(crate) fn connect_tcp(endpoint: &str, timeout: Option<Duration>) -> Result<TcpStream, SmtpError> {
    let addrs = endpoint
        .to_socket_addrs()
        .map_err(|err| SmtpError::connect(endpoint, err))?;

    let mut last_err = None;
    for addr in addrs {
        let attempt = match timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
            None => TcpStream::connect(addr),
        };
        match attempt {
            Ok(stream) => {
                stream.set_read_timeout(timeout).map_err(SmtpError::io)?;
                stream.set_write_timeout(timeout).map_err(SmtpError::io)?;
                return Ok(stream);
            }
            Err(err) => last_err = Some(err),
        }
    }
    Err(match last_err {
        Some(err) => SmtpError::connect(endpoint, err),
        None => SmtpError::NoSmtpServers,
    })
}

enum Transport {
    Plain(BufReader<TcpStream>),
    Tls(BufReader<TlsStream<TcpStream>>),
    Closed,
}

/// Line-oriented SMTP stream, plain or upgraded with STARTTLS.
pub(crate) struct SmtpStream {
    transport: Transport,
}

impl SmtpStream {
    pub(crate) fn connect(
        host: &str,
        port: u16,
        proxy: Option<&Socks5Proxy>,
        timeout: Option<Duration>,
    ) -> Result<Self, SmtpError> {
        let tcp = match proxy {
            Some(proxy) => proxy.connect(host, port, timeout)?,
            None => connect_tcp(&format!("{host}:{port}"), timeout)?,
        };
        Ok(Self {
            transport: Transport::Plain(BufReader::new(tcp)),
        })
    }

    pub(crate) fn write_line(&mut self, line: &str) -> Result<(), SmtpError> {
        let mut data = Vec::with_capacity(line.len() + 2);
        data.extend_from_slice(line.as_bytes());
        data.extend_from_slice(b"\r\n");
        match &mut self.transport {
            Transport::Plain(reader) => write_flush(reader.get_mut(), &data),
            Transport::Tls(reader) => write_flush(reader.get_mut(), &data),
            Transport::Closed => Err(SmtpError::Protocol("stream already closed".into())),
        }
    }

    pub(crate) fn read_reply(&mut self) -> Result<SmtpReply, SmtpError> {
        match &mut self.transport {
            Transport::Plain(reader) => read_reply(reader),
            Transport::Tls(reader) => read_reply(reader),
            Transport::Closed => Err(SmtpError::Protocol("stream already closed".into())),
        }
    }

    pub(crate) fn upgrade_tls(&mut self, domain: &str, connector: &TlsConnector) -> Result<(), SmtpError> {
        let plain = match std::mem::replace(&mut self.transport, Transport::Closed) {
            Transport::Plain(reader) => reader.into_inner(),
            tls @ Transport::Tls(_) => {
                self.transport = tls;
                return Ok(());
            }
            Transport::Closed => return Err(SmtpError::Protocol("stream already closed".into())),
        };
        let tls = connector
            .connect(domain, plain)
            .map_err(|err| SmtpError::Tls(err.to_string()))?;
        self.transport = Transport::Tls(BufReader::new(tls));
        Ok(())
    }
}

fn write_flush<W: Write>(writer: &mut W, data: &[u8]) -> Result<(), SmtpError> {
    writer.write_all(data).map_err(SmtpError::io)?;
    writer.flush().map_err(SmtpError::io)
}
