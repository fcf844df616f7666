use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use station_core::{
    AppState, Config, TemperatureUnit, WeatherStation, provider_from_config,
    state::normalize_query,
};

use crate::session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-station",
    version,
    about = "Current weather and 5-day forecast from OpenWeather"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print debug logs to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather and the 5-day forecast for a city.
    Show {
        /// City name, e.g. "New York".
        city: String,

        /// Display temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },

    /// Refresh a city's weather periodically until Ctrl-C.
    Watch {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        /// Refresh period in seconds; defaults to the configured interval.
        #[arg(long)]
        interval: Option<u64>,

        #[arg(long)]
        fahrenheit: bool,
    },

    /// Menu-driven session with favorites and a unit toggle (the default).
    Interactive {
        #[arg(long)]
        fahrenheit: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Interactive { fahrenheit: false });
        let config = Config::load()?;

        match command {
            Command::Configure => configure(config),
            Command::Show { city, fahrenheit } => {
                let query = required_query(&city)?;
                let (station, mut state) = session_parts(&config, fahrenheit)?;
                session::search_and_print(&station, &mut state, query).await;
                Ok(())
            }
            Command::Watch { city, interval, fahrenheit } => {
                let city = city.unwrap_or_else(|| config.default_city.clone());
                let query = required_query(&city)?;
                let (station, mut state) = session_parts(&config, fahrenheit)?;
                state.set_refresh_interval_secs(interval.unwrap_or(config.refresh_interval_secs));
                session::watch(&station, state, query).await
            }
            Command::Interactive { fahrenheit } => {
                let (station, state) = session_parts(&config, fahrenheit)?;
                session::interactive(&station, state).await
            }
        }
    }
}

/// Station and starting state for every command that fetches weather.
fn session_parts(config: &Config, fahrenheit: bool) -> anyhow::Result<(WeatherStation, AppState)> {
    let station = WeatherStation::new(provider_from_config(config)?);
    let mut state = AppState::new(&config.default_city, config.refresh_interval_secs);
    state.set_unit(unit(fahrenheit));

    Ok((station, state))
}

fn required_query(input: &str) -> anyhow::Result<&str> {
    match normalize_query(input) {
        Some(query) => Ok(query),
        None => bail!("Please enter a city name."),
    }
}

fn unit(fahrenheit: bool) -> TemperatureUnit {
    if fahrenheit { TemperatureUnit::Fahrenheit } else { TemperatureUnit::Celsius }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(key);
    if !config.is_api_key_configured() {
        bail!("The API key must not be empty or the placeholder value.");
    }

    let path = config.save()?;
    println!("Saved API key to {}", path.display());

    Ok(())
}
