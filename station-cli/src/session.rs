//! Driving the station from the terminal: one-shot, periodic and menu modes.

use std::{fmt, time::Duration};

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use station_core::{AppState, WeatherStation, state::normalize_query};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::render::{render_current, render_favorites, render_forecast};

/// Runs one search, printing current conditions before the forecast is
/// requested.
pub async fn search_and_print(station: &WeatherStation, state: &mut AppState, query: &str) {
    let ok = station.search_current(state, query).await;
    print!("{}", render_current(state));

    if ok {
        station.load_forecast(state).await;
        print!("{}", render_forecast(state));
    }
}

/// Re-runs the search at the state's refresh interval while auto-refresh is
/// on. Ctrl-C turns it off.
pub async fn watch(station: &WeatherStation, mut state: AppState, query: &str) -> Result<()> {
    state.enable_auto_refresh();
    if let Some(status) = state.status() {
        eprintln!("{status}. Press Ctrl-C to stop.");
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(state.refresh_interval_secs()));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while state.is_auto_refresh() {
        tokio::select! {
            _ = ticker.tick() => {
                debug!(query, "auto-refresh tick");
                println!("──────────");
                search_and_print(station, &mut state, query).await;
            }
            res = &mut ctrl_c => {
                res?;
                state.disable_auto_refresh();
                if let Some(status) = state.status() {
                    eprintln!("{status}");
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Favorite,
    AddFavorite,
    ToggleUnit,
    Refresh,
    Quit,
}

impl Action {
    const ALL: [Action; 6] = [
        Action::Search,
        Action::Favorite,
        Action::AddFavorite,
        Action::ToggleUnit,
        Action::Refresh,
        Action::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search a city",
            Action::Favorite => "Open a favorite",
            Action::AddFavorite => "★ Add current city to favorites",
            Action::ToggleUnit => "Toggle °C / °F",
            Action::Refresh => "Refresh",
            Action::Quit => "Quit",
        })
    }
}

/// Menu loop. Starts by loading the default city.
pub async fn interactive(station: &WeatherStation, mut state: AppState) -> Result<()> {
    let city = state.current_city().to_string();
    search_and_print(station, &mut state, &city).await;

    loop {
        println!();
        let Some(action) = skippable(Select::new("What next?", Action::ALL.to_vec()).prompt_skippable())?
        else {
            return Ok(());
        };

        match action {
            Action::Search => {
                let Some(input) = skippable(Text::new("City:").prompt_skippable())? else {
                    continue;
                };
                match normalize_query(&input) {
                    Some(query) => search_and_print(station, &mut state, query).await,
                    None => println!("Please enter a city name."),
                }
            }
            Action::Favorite => {
                println!("{}", render_favorites(&state));
                let options = state.favorites().to_vec();
                let Some(city) = skippable(Select::new("Favorite:", options).prompt_skippable())?
                else {
                    continue;
                };
                search_and_print(station, &mut state, &city).await;
            }
            Action::AddFavorite => {
                state.add_favorite();
                if let Some(status) = state.status() {
                    println!("{status}");
                }
            }
            Action::ToggleUnit => {
                state.toggle_unit();
                print!("{}", render_current(&state));
                print!("{}", render_forecast(&state));
            }
            Action::Refresh => {
                let city = state.current_city().to_string();
                search_and_print(station, &mut state, &city).await;
            }
            Action::Quit => return Ok(()),
        }
    }
}

/// Treats Ctrl-C at a prompt like Esc.
fn skippable<T>(res: Result<Option<T>, InquireError>) -> Result<Option<T>> {
    match res {
        Ok(value) => Ok(value),
        Err(InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
