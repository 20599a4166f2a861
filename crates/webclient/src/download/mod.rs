//! One end-to-end fetch: decompose, connect, send, parse the head, and on
//! `200` stream the body into a file.
//!
//! Every handle (socket, TLS session, output file) is owned by a local and
//! released by its drop on every exit path. A failure while writing the file
//! leaves whatever was already written on disk; partial files are not removed.

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use rustls::ClientConfig;

use crate::{
    error::{Error, Result},
    r#const::INDEX_FILE_NAME,
    request::encode_get,
    response::{ResponseHead, StatusClass, parse_head},
    transport::{Transport, default_client_config},
    url::ConnectionTarget,
};

const COPY_BUF_BYTES: usize = 8 * 1024;

#[derive(Debug)]
pub struct Download {
    pub head: ResponseHead,
    /// Only set when the status was `200`.
    pub saved: Option<SavedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    pub bytes: u64,
}

pub struct Downloader {
    output_dir: PathBuf,
    timeout: Option<Duration>,
    tls_config: Arc<ClientConfig>,
}

impl Downloader {
    pub fn new() -> Result<Self> {
        let tls_config = default_client_config()
            .map_err(|e| Error::io("failed to build the TLS client context", e))?;
        Ok(Self {
            output_dir: PathBuf::from("."),
            timeout: None,
            tls_config,
        })
    }

    /// Directory the body file is created in. Defaults to the working directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Like [`Downloader::download`], but every error is reported to `report`
    /// and logged instead of returned.
    pub fn fetch<W: Write>(&self, url: &str, report: &mut W) -> Option<Download> {
        match self.download(url, report) {
            Ok(download) => Some(download),
            Err(e) => {
                log::error!("{url}: {e}");
                let _ = writeln!(report, "{e}");
                None
            }
        }
    }

    /// Fetch `url`, writing the request, the status line and the header block
    /// to `report`.
    pub fn download<W: Write>(&self, url: &str, report: &mut W) -> Result<Download> {
        let target = ConnectionTarget::parse(url)?;
        log::debug!("target: {target}");

        let mut transport = Transport::connect(&target, &self.tls_config, self.timeout)?;

        let request = encode_get(&target.host, &target.path);
        transport
            .write_all(request.as_bytes())
            .and_then(|_| transport.flush())
            .map_err(|e| Error::io("failed to send request", e))?;
        log::debug!("sent {} request bytes", request.as_bytes().len());
        emit(report, format_args!("{}\n", request.as_str().trim_end()))?;

        let head = parse_head(&mut transport)?;
        emit(
            report,
            format_args!("{}\n{}\n", head.status_line(), head.header_block()),
        )?;

        if head.status_code() != 200 {
            match head.status().class() {
                StatusClass::Redirection => log::warn!(
                    "{}: redirects are not followed, nothing saved",
                    head.status_line()
                ),
                class => log::warn!("{}: {class}, nothing saved", head.status_line()),
            }
            return Ok(Download { head, saved: None });
        }

        let path = self.output_dir.join(file_name_for(&target.path));
        let bytes = save_body(&mut transport, &path)?;
        if let Some(expected) = head.content_length()
            && expected != bytes
        {
            log::warn!("Content-Length said {expected} bytes, received {bytes}");
        }
        log::info!("saved {bytes} bytes to {}", path.display());

        Ok(Download {
            head,
            saved: Some(SavedFile { path, bytes }),
        })
    }
}

fn emit<W: Write>(report: &mut W, args: std::fmt::Arguments<'_>) -> Result<()> {
    report
        .write_fmt(args)
        .map_err(|e| Error::io("failed to write report", e))
}

/// Copy the rest of `body` into a freshly created (or truncated) file at
/// `path` until end of stream.
fn save_body<R: Read>(body: &mut R, path: &Path) -> Result<u64> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create {}", path.display()), e))?;
    let mut sink = BufWriter::new(file);
    let write_err = |e| Error::io(format!("failed to write {}", path.display()), e);

    let mut buf = [0_u8; COPY_BUF_BYTES];
    let mut total = 0_u64;
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                // keep what already arrived; the partial file is not removed
                let _ = sink.flush();
                return Err(Error::io("failed to read response body", e));
            }
        };
        sink.write_all(&buf[..n]).map_err(write_err)?;
        total += n as u64;
    }
    sink.flush().map_err(write_err)?;

    Ok(total)
}

/// Name of the file a path is saved under: `index.html` for a path ending in
/// `/`, otherwise the last `/`-separated segment.
pub fn file_name_for(path: &str) -> &str {
    if path.is_empty() || path.ends_with('/') {
        return INDEX_FILE_NAME;
    }
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
