//! Process entry: load configuration, start logging, run the sampler.

use tokio::signal;
use tracing::info;

use super::command::Cli;
use crate::app::{App, Config};
use crate::error::Result;

/// Load the configuration named by the CLI.
///
/// The implicit default path may be absent; an explicit path must exist.
pub fn load_config(cli: &Cli) -> Result<Config> {
    if cli.uses_default_config() {
        Config::load_or_default(&cli.config)
    } else {
        Config::load(&cli.config)
    }
}

/// Execute the CLI.
pub async fn execute(cli: &Cli) -> Result<()> {
    cli.color.apply();

    let config = load_config(cli)?;
    config.init_logging();
    info!(version = crate::VERSION, "coinpulse starting");

    if cli.once {
        App::run_once(config).await?;
        return Ok(());
    }

    tokio::select! {
        result = App::run(config) => result?,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("coinpulse stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use clap::Parser;

    #[test]
    fn missing_default_config_falls_back_to_defaults() {
        let cli = Cli::try_parse_from(["coinpulse"]).unwrap();
        // Only holds when the working directory has no coinpulse.toml.
        if !cli.config.exists() {
            let config = load_config(&cli).unwrap();
            assert_eq!(config.sampler.interval_secs, 300);
        }
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cli = Cli::try_parse_from(["coinpulse", "--config", path.to_str().unwrap()]).unwrap();

        assert!(matches!(
            load_config(&cli),
            Err(Error::Config(ConfigError::ReadFile(_)))
        ));
    }
}
