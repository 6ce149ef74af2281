use anyhow::Result;
use clap::Parser;

use fieldcut::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
