use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::display::print_tools;

pub fn run_tools() -> Result<()> {
    let mut out = io::stdout().lock();
    print_tools(&mut out).context("Failed to write tool list")?;
    out.flush().context("Failed to write tool list")
}
