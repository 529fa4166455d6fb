use clap::Parser;
use log::*;

use release_roundup::{
    cli, forge::github::Github, orchestrator::Orchestrator,
    prompt::TerminalPrompt, registry::Registry, result::Result,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_roundup")
        .add_filter_allow_str("roundup")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = cli::Args::parse();

    initialize_logger(args.debug)?;

    info!("GitHub API URL: {}", cli::mask_token(args.raw_api_url()));

    let registry = match &args.registry {
        Some(path) => Registry::load(path)?,
        None => Registry::default(),
    };

    let remote_config = args.remote_config()?;
    let forge = Github::new(remote_config)?;

    let orchestrator = Orchestrator::new(
        registry,
        Box::new(forge),
        Box::new(TerminalPrompt),
    );

    match &args.command {
        cli::Command::Check { .. } => orchestrator.check().await,
        cli::Command::Release { force, .. } => {
            orchestrator.release(*force).await
        }
    }
}
