use std::fmt;

/// Coarse grouping of a numeric status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
    Unknown,
}

impl StatusClass {
    pub fn of(code: u16) -> Self {
        match code {
            n if n >= 600 => Self::Unknown,
            n if n >= 500 => Self::ServerError,
            n if n >= 400 => Self::ClientError,
            n if n >= 300 => Self::Redirection,
            n if n >= 200 => Self::Success,
            n if n >= 100 => Self::Informational,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Informational => "1xx informational",
            Self::Success => "2xx success",
            Self::Redirection => "3xx redirection",
            Self::ClientError => "4xx client error",
            Self::ServerError => "5xx server error",
            Self::Unknown => "unknown status class",
        };
        f.write_str(s)
    }
}
