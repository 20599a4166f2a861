use std::{fmt, str::FromStr};

use crate::{
    error::Error,
    response::status_code::StatusClass,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    raw: String,
    version: String,
    code: u16,
    reason: String,
}

impl StatusLine {
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn class(&self) -> StatusClass {
        StatusClass::of(self.code)
    }

    /// The line exactly as received, minus terminator and trailing whitespace.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for StatusLine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(version), Some(code)) = (parts.next(), parts.next()) else {
            return Err(Error::malformed_response(format!(
                "status line lacks a status code: {s:?}"
            )));
        };
        let code: u16 = code.parse().map_err(|_| {
            Error::malformed_response(format!("status code is not a number: {s:?}"))
        })?;
        let reason = parts.collect::<Vec<_>>().join(" ");

        Ok(Self {
            raw: s.to_owned(),
            version: version.into(),
            code,
            reason,
        })
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_line() {
        let line = StatusLine::from_str("HTTP/1.1 404 Not  Found").unwrap();
        assert_eq!(line.version(), "HTTP/1.1");
        assert_eq!(line.code(), 404);
        assert_eq!(line.reason(), "Not Found");
        assert_eq!(line.class(), StatusClass::ClientError);
        assert_eq!(line.to_string(), "HTTP/1.1 404 Not  Found");
    }

    #[test]
    fn test_reason_is_optional() {
        let line = StatusLine::from_str("HTTP/1.0 200").unwrap();
        assert_eq!(line.code(), 200);
        assert_eq!(line.reason(), "");
    }

    #[test]
    fn test_missing_or_bad_code() {
        for s in ["HTTP/1.1 OK", "HTTP/1.1", "", "HTTP/1.1 -200 OK", "HTTP/1.1 70000 Big"] {
            let err = StatusLine::from_str(s).unwrap_err();
            assert!(matches!(err, Error::MalformedResponse(_)), "{s:?}: {err}");
        }
    }
}
