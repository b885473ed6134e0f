// ABOUTME: CLI argument parsing and command routing for bizauth
//
// Provides command-line interface for:
// - Launching the onboarding TUI at any route (tui, default)
// - Browsing the address reference data (locations)
// - Showing the effective configuration (config)

pub mod config;
pub mod locations;

use clap::{Parser, Subcommand, ValueEnum};

use crate::app::router::{Route, RouteParams};

/// Business onboarding and authentication flow in the terminal
#[derive(Parser)]
#[command(name = "bizauth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui(TuiArgs),

    /// List countries, states, LGAs or towns from the location table
    Locations(LocationsArgs),

    /// Print the effective configuration
    Config,
}

/// Arguments for the tui command
#[derive(clap::Args, Debug)]
pub struct TuiArgs {
    /// Route to open first (e.g. carousel, login, reset-password)
    #[arg(long, default_value = "carousel", value_parser = parse_route)]
    pub start: Route,

    /// Reset token, as delivered by a password reset link
    #[arg(long)]
    pub token: Option<String>,

    /// Email to carry into the first screen
    #[arg(long)]
    pub email: Option<String>,

    /// Skip the simulated network delays
    #[arg(long)]
    pub instant: bool,
}

/// Arguments for the locations command
#[derive(clap::Args, Debug, Default)]
pub struct LocationsArgs {
    /// List the states of this country
    #[arg(long)]
    pub country: Option<String>,

    /// List the LGAs of this state
    #[arg(long)]
    pub state: Option<String>,

    /// List the towns of this LGA
    #[arg(long)]
    pub lga: Option<String>,
}

impl TuiArgs {
    /// Parameters handed to the first screen
    pub fn route_params(&self) -> RouteParams {
        let mut params = RouteParams::new();
        if let Some(email) = &self.email {
            params.insert(crate::screens::params::EMAIL, email);
        }
        if let Some(token) = &self.token {
            params.insert(crate::screens::params::TOKEN, token);
        }
        params
    }
}

impl Default for TuiArgs {
    fn default() -> Self {
        Self {
            start: Route::Carousel,
            token: None,
            email: None,
            instant: false,
        }
    }
}

fn parse_route(value: &str) -> Result<Route, String> {
    value.parse()
}
