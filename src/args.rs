pub mod types;
pub mod validation;

pub use types::{Cli, Command, Config};

use clap::Parser;

#[must_use]
pub fn args_checks() -> Cli {
    Cli::parse()
}
