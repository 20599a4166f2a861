//! Split a raw response byte stream into a status line, a header block and
//! whatever is left over (the body).

mod line;
mod status_code;
mod status_line;

use std::{io::Read, str::FromStr};

pub use status_code::*;
pub use status_line::*;

use crate::{
    common::Header,
    error::{Error, Result},
    r#const::MAX_HEAD_BYTES,
};

#[derive(Debug, Clone)]
pub struct ResponseHead {
    status: StatusLine,
    header_lines: Vec<String>,
    content_length: Option<u64>,
}

impl ResponseHead {
    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn status_line(&self) -> &str {
        self.status.as_str()
    }

    pub fn status_code(&self) -> u16 {
        self.status.code()
    }

    /// Header lines in arrival order, as received.
    pub fn header_lines(&self) -> &[String] {
        &self.header_lines
    }

    /// All header lines joined, each followed by `\n`.
    pub fn header_block(&self) -> String {
        let mut block = String::new();
        for line in &self.header_lines {
            block.push_str(line);
            block.push('\n');
        }
        block
    }

    /// Lines that do not look like `Name: value` are skipped.
    pub fn headers(&self) -> impl Iterator<Item = Header> + '_ {
        self.header_lines
            .iter()
            .filter_map(|line| Header::from_str(line).ok())
    }

    /// First header with a matching (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<Header> {
        self.headers().find(|h| h.is(name))
    }

    /// `None` when absent or unparseable. Never authoritative: the body is
    /// always read to end of stream.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }
}

/// Consume the status line and header block from `stream`.
///
/// On success the stream is positioned at the first body byte. The stream is
/// only borrowed; closing it stays with the caller.
pub fn parse_head<R: Read + ?Sized>(stream: &mut R) -> Result<ResponseHead> {
    let status_line = line::read_line(stream, MAX_HEAD_BYTES)?
        .ok_or_else(|| Error::protocol("connection closed before a complete status line"))?;
    let status = StatusLine::from_str(&status_line)?;
    log::debug!("status line: {status_line}");

    let mut head_bytes = status_line.len();
    let mut header_lines = Vec::new();
    let mut content_length = None;

    loop {
        let budget = MAX_HEAD_BYTES.saturating_sub(head_bytes);
        let line = line::read_line(stream, budget)?
            .ok_or_else(|| Error::protocol("connection closed inside the header block"))?;
        if line.is_empty() {
            break;
        }
        head_bytes += line.len();

        if let Some(value) = content_length_value(&line) {
            match value.parse::<u64>() {
                Ok(n) => content_length = Some(n),
                Err(_) => log::warn!("ignoring malformed Content-Length: {value:?}"),
            }
        }
        header_lines.push(line);
    }

    Ok(ResponseHead {
        status,
        header_lines,
        content_length,
    })
}

fn content_length_value(line: &str) -> Option<&str> {
    let (name, value) = line.split_once(':')?;
    name.trim()
        .eq_ignore_ascii_case("content-length")
        .then(|| value.trim())
}
