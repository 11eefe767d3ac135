mod app;
mod cli;
mod domain;
mod infra;
mod listener;
#[cfg(test)]
mod test_support;
mod usecases;
mod window;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    app::run(cli)
}
