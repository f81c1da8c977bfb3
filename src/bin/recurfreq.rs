use anyhow::Result;
use clap::Parser;
use recurfreq::cli::{self, Args};

fn main() -> Result<()> {
    cli::run(Args::parse())
}
