use core::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One `Name: value` line out of a response head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl FromStr for Header {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once(':')
            .ok_or_else(|| Error::malformed_response(format!("header without ':': {s:?}")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::malformed_response(format!("header without name: {s:?}")));
        }
        Ok(Header::new(name, value.trim()))
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let h = Header::from_str("Content-Type:  text/html; charset=utf-8 ").unwrap();
        assert_eq!(h.name(), "Content-Type");
        assert_eq!(h.value(), "text/html; charset=utf-8");
        assert!(h.is("content-type"));
        assert_eq!(h.to_string(), "Content-Type: text/html; charset=utf-8");

        let h = Header::from_str("Location: http://example.com:8080/").unwrap();
        assert_eq!(h.value(), "http://example.com:8080/");
    }

    #[test]
    fn test_parse_header_rejects_garbage() {
        assert!(Header::from_str("no colon here").is_err());
        assert!(Header::from_str(": value").is_err());
    }
}
