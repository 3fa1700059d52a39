use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use skycast_core::config::{Config, HomeCoordinates, Units};
use skycast_core::controller::WeatherWidget;
use skycast_core::format::ClockStyle;
use skycast_core::location::StaticPosition;
use skycast_core::provider::proxy::ProxyClient;
use skycast_core::recent::RecentSearchStore;

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather widget CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a location name.
    Search {
        /// Location name, e.g. "San Francisco".
        query: String,
    },

    /// Show weather for the configured home position.
    Here,

    /// Print the recent-search list.
    Recent,

    /// Store backend and display settings.
    Configure {
        /// Base URL of the forecast backend proxy.
        url: Option<String>,

        /// Measurement system for temperatures, wind, and visibility.
        #[arg(long)]
        units: Option<UnitsArg>,

        /// Clock rendering for sunrise and sunset.
        #[arg(long)]
        clock: Option<ClockArg>,

        /// Home position as "LAT,LON", used by `skycast here`.
        #[arg(long)]
        home: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitsArg {
    Metric,
    Imperial,
}

impl From<UnitsArg> for Units {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Metric => Units::Metric,
            UnitsArg::Imperial => Units::Imperial,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ClockArg {
    #[value(name = "12")]
    TwelveHour,
    #[value(name = "24")]
    TwentyFourHour,
}

impl From<ClockArg> for ClockStyle {
    fn from(value: ClockArg) -> Self {
        match value {
            ClockArg::TwelveHour => ClockStyle::TwelveHour,
            ClockArg::TwentyFourHour => ClockStyle::TwentyFourHour,
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Search { query }) => {
                let config = Config::load()?;
                let mut widget = build_widget(&config)?;
                widget.search(&query).await;
                render::print_view(&widget.view(config.clock));
            }
            Some(Command::Here) => {
                let config = Config::load()?;
                let mut widget = build_widget(&config)?;
                let source = home_source(&config);
                widget.locate(&source).await;
                render::print_view(&widget.view(config.clock));
            }
            Some(Command::Recent) => {
                let list = RecentSearchStore::open()?.load();
                if list.is_empty() {
                    println!("No recent searches.");
                } else {
                    for (i, query) in list.iter().enumerate() {
                        println!("{}. {query}", i + 1);
                    }
                }
            }
            Some(Command::Configure { url, units, clock, home }) => {
                let mut config = Config::load()?;
                if let Some(url) = url {
                    config.proxy_url = Some(url);
                }
                if let Some(units) = units {
                    config.units = units.into();
                }
                if let Some(clock) = clock {
                    config.clock = clock.into();
                }
                if let Some(home) = home {
                    config.home = Some(parse_home(&home)?);
                }
                config.save()?;
                println!("Saved {}", Config::config_file_path()?.display());
            }
            None => interactive::run().await?,
        }

        Ok(())
    }
}

/// Wire a widget to the configured proxy and the on-disk search history.
pub fn build_widget(config: &Config) -> Result<WeatherWidget> {
    let provider = ProxyClient::new(config.proxy_url()?);
    let store = RecentSearchStore::open()?;
    Ok(WeatherWidget::with_units(Box::new(provider), store, config.units.fahrenheit()))
}

/// Position source backed by the configured home coordinates. An unset home
/// reads as an unsupported platform, matching the widget's error text.
pub fn home_source(config: &Config) -> StaticPosition {
    match config.home {
        Some(home) => StaticPosition::new(home.lat, home.lon),
        None => StaticPosition::default(),
    }
}

fn parse_home(raw: &str) -> Result<HomeCoordinates> {
    let Some((lat, lon)) = raw.split_once(',') else {
        bail!("Expected \"LAT,LON\", got: {raw}");
    };
    let lat: f64 = lat.trim().parse().with_context(|| format!("Bad latitude: {lat}"))?;
    let lon: f64 = lon.trim().parse().with_context(|| format!("Bad longitude: {lon}"))?;
    Ok(HomeCoordinates { lat, lon })
}
