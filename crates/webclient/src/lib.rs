//! Fetch a single `http://` or `https://` resource over a hand-driven
//! HTTP/1.1 exchange and save its body.

use std::{io, process::ExitCode};

use anyhow::Result;

mod cmd;
mod r#const;
mod init;

pub mod common;
pub mod download;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;
pub mod url;

pub use download::{Download, Downloader, SavedFile, file_name_for};
pub use error::Error;
pub use response::{ResponseHead, parse_head};
pub use url::{ConnectionTarget, Scheme};

pub fn run() -> Result<ExitCode> {
    let options = init::cmd::init()?;

    let Some(url) = options.url.as_deref() else {
        cmd::print_help();
        return Ok(ExitCode::from(2));
    };

    let downloader = Downloader::new()?
        .output_dir(&options.output_dir)
        .timeout(options.timeout);

    let stdout = io::stdout();
    let mut report = stdout.lock();
    let code = match downloader.fetch(url, &mut report) {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    };
    Ok(code)
}
