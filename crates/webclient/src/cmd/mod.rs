use std::{path::PathBuf, time::Duration};

use sarge::prelude::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

sarge! {
    > "Fetch one http:// or https:// resource and save its body."
    > "usage: webclient [options] <scheme://host[:port][/path]>"
    Args,

    > "log level: off/error/warn/info/debug/trace, or v - info, vv - debug, vvv - trace"
    #ok 'v' log_level: String,

    > "log with color?"
    colored: bool,

    > "also append log lines to this file"
    #ok log_file: String,

    > "directory the downloaded file is written to (default: working directory)"
    #ok 'o' output_dir: String,

    > "connect/read/write timeout in seconds, 0 or absent waits forever"
    #ok 't' timeout: u64,

    > "print this help"
    'h' help: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub url: Option<String>,
    pub log_level: &'static str,
    pub colored: bool,
    pub log_file: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub timeout: Option<Duration>,
    pub help: bool,
}

/// Options come from the command line only; the environment is never read.
pub fn parse() -> Result<Options, ArgParseError> {
    parse_from(std::env::args())
}

/// `cli` starts with the executable name, like `std::env::args()`.
pub fn parse_from<A, I>(cli: I) -> Result<Options, ArgParseError>
where
    A: AsRef<str>,
    I: IntoIterator<Item = A>,
{
    let (args, remainder) = Args::parse_cli(cli)?;
    // remainder[0] is the executable path
    let mut positionals = remainder.into_iter().skip(1);

    Ok(Options {
        url: positionals.next(),
        log_level: log_level(args.log_level.as_deref()),
        colored: args.colored,
        log_file: args.log_file.map(PathBuf::from),
        output_dir: args.output_dir.map(PathBuf::from).unwrap_or_else(|| ".".into()),
        timeout: args.timeout.filter(|s| *s > 0).map(Duration::from_secs),
        help: args.help,
    })
}

pub fn print_help() {
    println!("version: {VERSION} | authors: {AUTHORS}");
    Args::print_help();
}

/// Map a user supplied level onto a `log::LevelFilter` name.
fn log_level(val: Option<&str>) -> &'static str {
    const VERBOSE_PAT: char = 'v';

    let Some(v) = val else {
        return "warn";
    };
    match v.trim().to_ascii_lowercase().as_str() {
        "off" => "off",
        "err" | "error" => "error",
        "warn" | "warning" => "warn",
        "info" => "info",
        "debug" => "debug",
        "trace" => "trace",
        s => {
            let count = s
                .chars()
                .filter(|c| c.eq_ignore_ascii_case(&VERBOSE_PAT))
                .count();
            match count {
                0 => "off",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
