mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list {
        return commands::list::run(cli.templates_dir);
    }

    commands::new::run(cli)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("bled=debug"),
        _ => EnvFilter::new("bled=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
