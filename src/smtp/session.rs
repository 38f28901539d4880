use native_tls::TlsConnector;
use tracing::trace;

use super::error::SmtpError;
use super::options::SmtpProbeOptions;
use super::reply::SmtpReply;
use super::stream::SmtpStream;

/// One SMTP dialogue with one mail exchanger.
pub(crate) struct SmtpSession {
    host: String,
    stream: SmtpStream,
}

impl SmtpSession {
    /// Connect (directly or through the proxy) and read a positive banner.
    pub(crate) fn open(host: &str, options: &SmtpProbeOptions) -> Result<Self, SmtpError> {
        let stream = SmtpStream::connect(host, options.port, options.proxy.as_ref(), options.timeout())?;
        let mut session = Self {
            host: host.to_string(),
            stream,
        };
        let banner = session.read()?;
        if !banner.is_positive_completion() {
            session.quit();
            return Err(session.rejected("connection", &banner));
        }
        Ok(session)
    }

    pub(crate) fn command(&mut self, command: &str) -> Result<SmtpReply, SmtpError> {
        trace!(host = %self.host, "C: {command}");
        self.stream.write_line(command)?;
        self.read()
    }

    /// `EHLO`, failing on anything but 2xx.
    pub(crate) fn ehlo(&mut self, helo_name: &str) -> Result<SmtpReply, SmtpError> {
        let reply = self.command(&format!("EHLO {helo_name}"))?;
        if !reply.is_positive_completion() {
            return Err(self.rejected("EHLO", &reply));
        }
        Ok(reply)
    }

    pub(crate) fn starttls(&mut self, connector: &TlsConnector) -> Result<(), SmtpError> {
        let reply = self.command("STARTTLS")?;
        if !reply.is_positive_completion() {
            return Err(self.rejected("STARTTLS", &reply));
        }
        let host = self.host.clone();
        self.stream.upgrade_tls(&host, connector)
    }

    /// Best-effort `RSET` + `QUIT`; the verdict is already known.
    pub(crate) fn finish(mut self) {
        let _ = self.command("RSET");
        self.quit();
    }

    pub(crate) fn rejected(&self, command: &'static str, reply: &SmtpReply) -> SmtpError {
        SmtpError::Rejected {
            host: self.host.clone(),
            command,
            code: reply.code,
            message: reply.message(),
        }
    }

    fn quit(&mut self) {
        let _ = self.command("QUIT");
    }

    fn read(&mut self) -> Result<SmtpReply, SmtpError> {
        let reply = self.stream.read_reply()?;
        trace!(host = %self.host, "S: {} {}", reply.code, reply.message());
        Ok(reply)
    }
}
