use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use services::config::*;
pub use services::metadata::*;
pub use services::output::*;
pub use services::release::*;

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut cfg = load_config(cli.config.as_deref())?;
    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
    if let Some(endpoint) = &cli.endpoint {
        cfg.metadata.endpoint_url = endpoint.clone();
    }

    match &cli.command {
        Commands::Run { .. } => handle_run_command(&cli, &cfg)?,
        Commands::Keywords | Commands::Config => handle_info_commands(&cli, &cfg)?,
    }

    Ok(())
}
