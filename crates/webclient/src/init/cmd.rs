use anyhow::Result;

use crate::{
    cmd::{self, Options},
    init::logger,
};

pub fn init() -> Result<Options> {
    let options = cmd::parse()?;
    logger::init(
        options.log_level,
        options.colored,
        options.log_file.as_deref(),
    )?;
    log::debug!("{options:?}");

    if options.help {
        cmd::print_help();
        std::process::exit(0);
    }

    Ok(options)
}
