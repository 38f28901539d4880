use std::io::{self, BufRead};

use super::error::SmtpError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub lines: Vec<String>,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }

    /// EHLO keyword lookup, case-insensitive on the first token of each line.
    pub fn has_capability(&self, cap: &str) -> bool {
        self.lines.iter().any(|line| {
            line.split_whitespace()
                .next()
                .is_some_and(|token| token.eq_ignore_ascii_case(cap))
        })
    }

    pub fn message(&self) -> String {
        self.lines.join(" ")
    }
}

/// Read one (possibly multi-line) reply.
pub(crate) fn read_reply<R: BufRead>(reader: &mut R) -> Result<SmtpReply, SmtpError> {
    let mut code: Option<u16> = None;
    let mut lines = Vec::new();
    loop {
        let mut raw = String::new();
        let read = reader.read_line(&mut raw).map_err(SmtpError::io)?;
        if read == 0 {
            return Err(SmtpError::io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed while reading reply",
            )));
        }
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.len() < 3 || !line.is_char_boundary(3) {
            return Err(SmtpError::Protocol(format!("invalid reply: '{line}'")));
        }
        let parsed = line[..3]
            .parse::<u16>()
            .map_err(|_| SmtpError::Protocol(format!("invalid code in line: '{line}'")))?;
        match code {
            Some(existing) if existing != parsed => {
                return Err(SmtpError::Protocol(format!(
                    "inconsistent reply codes: {existing} vs {parsed}"
                )));
            }
            Some(_) => {}
            None => code = Some(parsed),
        }
        let continuation = line.as_bytes().get(3) == Some(&b'-');
        lines.push(line.get(4..).unwrap_or_default().to_string());
        if !continuation {
            break;
        }
    }
    Ok(SmtpReply {
        code: code.unwrap_or_default(),
        lines,
    })
}
