//! Decompose a fully-qualified `scheme://host[:port][/path]` URL into the
//! parameters needed to open a connection.

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

const SCHEME_DELIMITER: &str = "://";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("http") {
            Ok(Scheme::Http)
        } else if s.eq_ignore_ascii_case("https") {
            Ok(Scheme::Https)
        } else {
            Err(Error::UnsupportedScheme(s.to_owned()))
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

/// Where to connect and what to ask for. Built once per fetch and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    /// Always starts with `/`.
    pub path: String,
}

impl ConnectionTarget {
    pub fn parse(url: &str) -> Result<Self> {
        Self::from_str(url)
    }

    /// `host:port`, as handed to the resolver.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromStr for ConnectionTarget {
    type Err = Error;

    fn from_str(url: &str) -> Result<Self> {
        if let Some(bad) = url
            .chars()
            .find(|c| !c.is_ascii() || c.is_ascii_control() || c.is_ascii_whitespace())
        {
            return Err(Error::malformed_input(format!(
                "invalid character {bad:?} in {url:?}"
            )));
        }

        let (scheme, rest) = url
            .split_once(SCHEME_DELIMITER)
            .ok_or_else(|| Error::malformed_input(format!("missing \"://\" in {url:?}")))?;
        let scheme = Scheme::from_str(scheme)?;

        let (authority, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, "/"),
        };

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => (host, parse_port(port)?),
            None => (authority, scheme.default_port()),
        };

        if host.is_empty() {
            return Err(Error::malformed_input(format!("missing host in {url:?}")));
        }

        Ok(Self {
            scheme,
            host: host.to_owned(),
            port,
            path: path.to_owned(),
        })
    }
}

fn parse_port(digits: &str) -> Result<u16> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed_input(format!(
            "port is not a number: {digits:?}"
        )));
    }
    match digits.parse::<u16>() {
        Ok(0) | Err(_) => Err(Error::malformed_input(format!(
            "port out of range 1-65535: {digits}"
        ))),
        Ok(port) => Ok(port),
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }
}
