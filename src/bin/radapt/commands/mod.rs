mod prepare;
mod tools;
mod unify;

use prepare::run_prepare;
use tools::run_tools;
use unify::run_unify;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Prepare(args) => run_prepare(args, ctx),
        Command::Unify(args) => run_unify(args, ctx),
        Command::Tools => run_tools(),
    }
}
