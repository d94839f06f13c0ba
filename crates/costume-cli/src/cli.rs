use clap::{Parser, Subcommand};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Do not print the program banner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Pack(pack::PackArgs),
    Unpack(unpack::UnpackArgs),
    Inspect(inspect::InspectArgs),
}

pub fn print_banner() {
    println!(
        "{} {} by {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );
    println!("Source code available at {}", env!("CARGO_PKG_REPOSITORY"));
    println!("Licensed under {}", env!("CARGO_PKG_LICENSE"));
    println!();
}
