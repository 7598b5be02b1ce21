use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod parsing;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("ref_loader=debug,info")
    } else {
        EnvFilter::new("ref_loader=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Load(args) => {
            cli::load::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Fetch(args) => {
            cli::fetch::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Extract(args) => {
            cli::extract::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
