// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::{anyhow, Error};
use clap::Arg;
use config::Config;
use recommender::RecommenderController;
use simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use std::collections::HashMap;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_CONFIG: &str = "reports.toml";

pub fn config_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("config")
        .short("c")
        .long("config")
        .value_name("FILE")
        .help("Configuration file, defaults are used if it doesn't exist")
        .takes_value(true)
        .default_value(DEFAULT_CONFIG)
}

pub fn verbose_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("verbose")
        .short("v")
        .long("verbose")
        .help("Show debug messages")
}

pub fn init_logger(verbose: bool) -> Result<(), Error> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    TermLogger::init(level, LogConfig::default(), TerminalMode::Mixed)
        .map_err(|e| anyhow!("Couldn't set up the logger: {}", e))
}

/// Read the configuration file, `DATABASE_URL` (environment or `.env`)
/// takes precedence over the configured database
pub fn load_config(path: &str) -> Result<Config, Error> {
    let vars: HashMap<String, String> = dotenv::vars().collect();
    let config = Config::load_or_default(path)?
        .with_database_url(vars.get("DATABASE_URL").cloned());

    log::debug!("Loaded configuration {:?}", config);
    Ok(config)
}

pub fn connect(config: &Config) -> Result<RecommenderController, Error> {
    log::info!("Using database {}", config.database.url);
    RecommenderController::with_url(&config.database.url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_database_fails_early() -> Result<(), Error> {
        let dir = tempfile::tempdir()?;
        let mut config = Config::default();
        config.database.url = dir.path().join("db.sqlite3").to_string_lossy().into_owned();

        assert!(connect(&config).is_err());
        Ok(())
    }

    #[test]
    fn loads_configuration_file() -> Result<(), Error> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[export]\noutput_dir = \"out\"\ntop_movies = 5")?;

        let config = load_config(&file.path().to_string_lossy())?;
        assert_eq!(config.export.output_dir, std::path::PathBuf::from("out"));
        assert_eq!(config.export.top_movies, 5);

        Ok(())
    }
}
