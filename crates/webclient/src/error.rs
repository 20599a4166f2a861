use std::io;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Scheme is neither `http` nor `https`. Raised before any network I/O.
    UnsupportedScheme(String),
    /// The URL could not be decomposed (no `://`, bad port, empty host, ...).
    MalformedInput(String),
    /// DNS failure, refused connection or failed TLS handshake.
    Connection { target: String, source: io::Error },
    /// The stream ended (or grew too large) before a complete head was read.
    Protocol(String),
    /// The status line has no parseable numeric status token.
    MalformedResponse(String),
    /// Any other I/O failure: writing the request, reading the body, writing the file.
    Io { context: String, source: io::Error },
}

impl Error {
    pub fn malformed_input<S: Into<String>>(msg: S) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        Self::Protocol(msg.into())
    }

    pub fn malformed_response<S: Into<String>>(msg: S) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn connection<S: Into<String>>(target: S, source: io::Error) -> Self {
        Self::Connection {
            target: target.into(),
            source,
        }
    }

    pub fn io<S: Into<String>>(context: S, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Connection { source, .. } | Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedScheme(scheme) => write!(f, "Unsupported protocol: {scheme}"),
            Error::MalformedInput(msg) => write!(f, "Malformed URL: {msg}"),
            Error::Connection { target, source } => {
                write!(f, "Network error: failed to connect to {target}: {source}")
            }
            Error::Protocol(msg) => write!(f, "Protocol error: {msg}"),
            Error::MalformedResponse(msg) => write!(f, "Malformed response: {msg}"),
            Error::Io { context, source } => write!(f, "I/O error: {context}: {source}"),
        }
    }
}
