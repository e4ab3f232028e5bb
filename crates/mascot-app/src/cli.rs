use clap::Parser;

/// Mascot — animation priority scheduler demo driver.
#[derive(Parser, Debug)]
#[command(name = "mascot", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// RNG seed for reproducible demo runs.
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn parse() -> Args {
    Args::parse()
}
