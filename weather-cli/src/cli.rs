use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, Coordinates, FixedPosition, Geolocator, IpGeolocator, UiState, WeatherApp,
    provider_from_config, render_now, submit_search, view::SEARCH_PLACEHOLDER,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Real-time weather for your city")]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug). `RUST_LOG` wins if set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub location: LocationArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// How the starting city is located.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Latitude of a fixed starting position.
    #[arg(long, requires = "lon", allow_hyphen_values = true, global = true)]
    pub lat: Option<f64>,

    /// Longitude of a fixed starting position.
    #[arg(long, requires = "lat", allow_hyphen_values = true, global = true)]
    pub lon: Option<f64>,

    /// Do not look up the current position at start-up.
    #[arg(long, conflicts_with_all = ["lat", "lon"], global = true)]
    pub no_locate: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show the weather for one city and exit.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Locate, show local weather, then search cities interactively (default).
    Interactive,
}

impl LocationArgs {
    /// `None` means geolocation is off, which the app treats like a refused permission.
    fn geolocator(&self, config: &Config) -> Option<Box<dyn Geolocator>> {
        if self.no_locate || !config.location.enabled {
            return None;
        }

        let fixed = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => config.location.fixed_position(),
        };

        Some(match fixed {
            Some(coords) => Box::new(FixedPosition(coords)),
            None => Box::new(IpGeolocator::default()),
        })
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = Config::load()?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(config),
            Command::Show { city } => show(&config, &city).await,
            Command::Interactive => {
                let geolocator = self.location.geolocator(&config);
                interactive(&config, geolocator).await
            }
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<ExitCode> {
    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(&key);
    let path = config.save()?;

    match config.api_key {
        Some(_) => println!("Saved API key to {}", path.display()),
        None => println!("Cleared API key in {}", path.display()),
    }

    Ok(ExitCode::SUCCESS)
}

async fn show(config: &Config, city: &str) -> anyhow::Result<ExitCode> {
    let mut app = WeatherApp::new(provider_from_config(config), None);

    if let Some(city) = submit_search(city) {
        app.fetch_weather(&city).await;
    }

    print!("{}", render_now(app.state()));

    if app.state().error_message.is_some() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn interactive(
    config: &Config,
    geolocator: Option<Box<dyn Geolocator>>,
) -> anyhow::Result<ExitCode> {
    let mut app = WeatherApp::new(provider_from_config(config), geolocator);

    draw(app.state());
    app.subscribe(draw);
    app.mount().await;

    loop {
        let input = Text::new("City:")
            .with_placeholder(SEARCH_PLACEHOLDER)
            .with_initial_value(&app.state().city_text)
            .with_help_message("Enter to search, Esc to quit")
            .prompt();

        let text = match input {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city name"),
        };

        app.set_city_text(&text);
        if let Some(city) = submit_search(&text) {
            app.fetch_weather(&city).await;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Redraw the whole screen for `state`.
fn draw(state: &UiState) {
    let mut out = io::stdout().lock();
    let clear = out.is_terminal();
    if let Err(e) = draw_to(&mut out, clear, state) {
        tracing::debug!("Failed to draw screen: {}", e);
    }
}

fn draw_to(out: &mut impl Write, clear: bool, state: &UiState) -> io::Result<()> {
    if clear {
        // clear screen, cursor home
        write!(out, "\x1b[2J\x1b[H")?;
    }
    write!(out, "{}", render_now(state))?;
    out.flush()
}
