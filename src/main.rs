//! # Ecoroute CLI
//!
//! Command-line driver for the ecoroute-client library. Runs the same event
//! flow a graphical front end would (search, pick, submit) and prints the
//! resulting view state.

use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ecoroute_client::{
    App, ClientConfig, Event, MemoryMap, PreferenceSlider, RequestLifecycleState, Slot,
    VehicleType, BUSY_LABEL,
};
use log::error;
use tokio::sync::mpsc::UnboundedReceiver;

mod cli;

/// Range of preference sliders created from `--pref`
const PREF_MIN: f64 = 0.0;
const PREF_MAX: f64 = 10.0;

/// Command-line interface for ecoroute
#[derive(Parser)]
#[command(name = "ecoroute")]
#[command(about = "Compare eco and normal routes from an ecoroute service")]
#[command(long_about = "Talks to an ecoroute routing service:
  ecoroute search \"New Delhi\"                      # List location suggestions
  ecoroute route --from Delhi --to Gurgaon          # Eco vs normal route
  ecoroute route --from Delhi --to Agra --pref traffic=7 --vehicle bike
  ecoroute sample                                   # Sample multimodal route")]
#[command(version = env!("ECOROUTE_VERSION"))]
struct Cli {
    /// Base URL of the routing service
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000")]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List location suggestions for a query
    Search { query: String },

    /// Resolve both endpoints through search and compare routes
    Route {
        /// Origin query; the first suggestion is used
        #[arg(long)]
        from: String,

        /// Destination query; the first suggestion is used
        #[arg(long)]
        to: String,

        /// Street network: drive, bike, walk or any service-specific name
        #[arg(long, default_value = "drive")]
        vehicle: String,

        /// Routing preference as name=value (0-10), repeatable
        #[arg(long = "pref", value_parser = parse_pref)]
        prefs: Vec<(String, f64)>,
    },

    /// Render the service's sample multimodal route
    Sample,
}

fn parse_pref(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.trim().to_string(), value))
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    let config = ClientConfig {
        base_url: cli.api_url.clone(),
        request_timeout: Duration::from_secs(cli.timeout),
        ..Default::default()
    };
    let wait_limit = config.request_timeout + config.search_debounce + Duration::from_secs(1);
    let (mut app, mut rx) = App::new(config, MemoryMap::new()).context("invalid configuration")?;

    match cli.command {
        Command::Search { query } => {
            let found = search(&mut app, &mut rx, Slot::Origin, &query, wait_limit).await?;
            if found == 0 {
                eprintln!("No suggestions for '{query}'");
            } else {
                print!("{}", cli::render::suggestions(app.input(Slot::Origin).suggestions()));
            }
        }
        Command::Route { from, to, vehicle, prefs } => {
            for (slot, query) in [(Slot::Origin, &from), (Slot::Destination, &to)] {
                if search(&mut app, &mut rx, slot, query, wait_limit).await? == 0 {
                    bail!("no suggestions for {slot} '{query}'");
                }
                let picked = app.input(slot).suggestions()[0].display_address.clone();
                app.handle(Event::SuggestionSelected { slot, index: 0 });
                eprintln!("📍 {slot}: {picked}");
            }

            let vehicle: VehicleType = vehicle.parse()?;
            app.handle(Event::VehicleChanged(vehicle));
            for (name, value) in prefs {
                app.add_preference(PreferenceSlider::new(name, PREF_MIN, PREF_MAX, value)?)?;
            }

            calculate(&mut app, &mut rx, Event::Submit, wait_limit).await?;
            print_outcome(&app);
        }
        Command::Sample => {
            calculate(&mut app, &mut rx, Event::LoadSample, wait_limit).await?;
            print_outcome(&app);
        }
    }

    if app.lifecycle() == RequestLifecycleState::Failed {
        std::process::exit(2);
    }
    Ok(())
}

/// Type `query` into the `slot` input and wait for its search to complete.
/// Returns the number of suggestions shown.
async fn search(
    app: &mut App<MemoryMap>,
    rx: &mut UnboundedReceiver<Event>,
    slot: Slot,
    query: &str,
    wait_limit: Duration,
) -> anyhow::Result<usize> {
    app.handle(Event::InputChanged { slot, query: query.to_string() });
    if !app.input(slot).is_search_pending() {
        bail!("query '{query}' is too short to search");
    }

    drive_until(app, rx, wait_limit, |event| {
        matches!(event, Event::SearchCompleted { slot: s, .. } if *s == slot)
    })
    .await?;
    Ok(app.input(slot).suggestions().len())
}

/// Fire a route request and show a spinner until it completes
async fn calculate(
    app: &mut App<MemoryMap>,
    rx: &mut UnboundedReceiver<Event>,
    trigger: Event,
    wait_limit: Duration,
) -> anyhow::Result<()> {
    app.handle(trigger);
    if app.lifecycle() != RequestLifecycleState::Loading {
        // Validation failed before anything was sent
        return Ok(());
    }

    let progress = cli::ProgressManager::new(BUSY_LABEL);
    let outcome = drive_until(app, rx, wait_limit, |event| {
        matches!(event, Event::RouteCompleted(_))
    })
    .await;
    progress.finish(app.affordance().label);
    outcome
}

/// Handle events until one matching `done` has been handled
async fn drive_until<F>(
    app: &mut App<MemoryMap>,
    rx: &mut UnboundedReceiver<Event>,
    wait_limit: Duration,
    done: F,
) -> anyhow::Result<()>
where
    F: Fn(&Event) -> bool,
{
    loop {
        let event = tokio::time::timeout(wait_limit, rx.recv())
            .await
            .context("timed out waiting for the routing service")?
            .context("event channel closed")?;
        let finished = done(&event);
        app.handle(event);
        if finished {
            return Ok(());
        }
    }
}

fn print_outcome(app: &App<MemoryMap>) {
    let notification = cli::render::notification(app.notifications().current());
    if !notification.is_empty() {
        eprint!("{notification}");
    }
    if app.lifecycle() != RequestLifecycleState::Success {
        return;
    }

    println!("🗺️  Map");
    print!("{}", cli::render::map(app.map().surface()));
    println!("🌿 Eco route");
    print!("{}", cli::render::results(app.results().results()));
    println!("⚖️  Comparison");
    print!("{}", cli::render::comparison(app.results().comparison()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pref() {
        assert_eq!(parse_pref("traffic=7").unwrap(), ("traffic".to_string(), 7.0));
        assert_eq!(parse_pref(" hills = 2.5").unwrap(), ("hills".to_string(), 2.5));
        assert!(parse_pref("traffic").is_err());
        assert!(parse_pref("traffic=high").is_err());
    }

    #[test]
    fn test_cli_parses_route_command() {
        let cli = Cli::try_parse_from([
            "ecoroute", "route", "--from", "Delhi", "--to", "Agra", "--pref", "traffic=3",
            "--api-url", "http://localhost:9000",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://localhost:9000");
        match cli.command {
            Command::Route { from, to, vehicle, prefs } => {
                assert_eq!(from, "Delhi");
                assert_eq!(to, "Agra");
                assert_eq!(vehicle, "drive");
                assert_eq!(prefs, vec![("traffic".to_string(), 3.0)]);
            }
            _ => panic!("Expected route command"),
        }
    }
}
