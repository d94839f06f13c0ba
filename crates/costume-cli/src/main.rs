use std::process::ExitCode;

use clap::Parser;
use costume_core::CostumeError;
use log::debug;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, CostumeError>;

const EXIT_IO_ERROR: u8 = 1;
const EXIT_CONTAINER_ERROR: u8 = 3;

fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();
    if !args.quiet {
        cli::print_banner();
    }
    debug!("{args:?}");

    let result = match args.command {
        Commands::Pack(args) => args.run(),
        Commands::Unpack(args) => args.run(),
        Commands::Inspect(args) => args.run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// I/O trouble and container trouble exit differently, clap keeps 2 for usage errors.
fn exit_code(e: &CostumeError) -> u8 {
    if e.is_io() {
        EXIT_IO_ERROR
    } else {
        EXIT_CONTAINER_ERROR
    }
}
