//! `txsemantics` command-line front end
#![forbid(unsafe_code)]

mod cli;
mod config;
mod logging;
mod output;

fn main() -> anyhow::Result<()> {
    cli::Cli::execute()
}
