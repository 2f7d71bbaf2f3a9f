//! `launchdash` - CLI for the launch records dashboard
//!
//! This binary loads the launch dataset and either serves the dashboard over
//! HTTP or answers one-off queries on the command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use launchdash::cli::{Cli, Command, ConfigCommand, OutputFormat, QueryCommand};
use launchdash::dashboard::DashboardView;
use launchdash::{init_logging, Config, Dashboard, Dataset, Outcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, then let flags override it
    let mut config = Config::load_from(cli.config.clone())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    match &cli.command {
        Command::Serve(_) => handle_serve(&config)?,
        Command::Sites(sites_cmd) => handle_sites(&config, sites_cmd.format)?,
        Command::Query(query_cmd) => handle_query(&config, query_cmd)?,
        Command::Config(config_cmd) => handle_config(&config, config_cmd)?,
    }
    Ok(())
}

/// Load the dataset and build the dashboard. Failure here is fatal.
fn open_dashboard(config: &Config) -> anyhow::Result<Dashboard> {
    let path = config.dataset_path();
    let dataset = Dataset::load(path)
        .with_context(|| format!("could not load launch dataset {}", path.display()))?;
    Dashboard::new(dataset, &config.dashboard).context("could not build dashboard")
}

fn handle_serve(config: &Config) -> anyhow::Result<()> {
    let dashboard = Arc::new(open_dashboard(config)?);
    let addr = config.socket_addr()?;

    let runtime = tokio::runtime::Runtime::new().context("could not start async runtime")?;
    runtime
        .block_on(launchdash::server::serve(dashboard, addr))
        .context("dashboard server failed")
}

fn handle_sites(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let dashboard = open_dashboard(config)?;
    let options = dashboard.catalog().options();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        OutputFormat::Plain => {
            for option in &options {
                if option.label == option.value {
                    println!("{}", option.value);
                } else {
                    println!("{}  ({})", option.value, option.label);
                }
            }
        }
    }
    Ok(())
}

fn handle_query(config: &Config, cmd: &QueryCommand) -> anyhow::Result<()> {
    let dashboard = open_dashboard(config)?;
    let selection = dashboard.selection(cmd.site.as_deref(), cmd.min, cmd.max)?;
    let view = dashboard.on_input_change(&selection);

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Plain => print_view(&view),
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn print_view(view: &DashboardView) {
    let range = view.selection.payload_range;
    println!(
        "Selection: {}  payload {} - {} kg  ({} launches)",
        view.selection.site, range.min_kg, range.max_kg, view.matched
    );
    println!();

    println!("{}", view.pie.title);
    if view.pie.is_empty() {
        println!("  (no launches)");
    }
    for group in &view.pie.groups {
        let share = 100.0 * group.count as f64 / view.matched as f64;
        println!("  {:<24} {:>5}  {share:>5.1}%", group.label, group.count);
    }
    println!();

    println!("{}", view.scatter.title);
    if view.scatter.is_empty() {
        println!("  (no launches)");
    }
    for point in &view.scatter.points {
        let outcome = Outcome::from_class(point.y).map_or("?", Outcome::label);
        println!(
            "  {:>8} kg  {outcome:<7}  {:<12} {}",
            point.x, point.color_group, point.tooltip
        );
    }
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Dataset]");
                println!("  Path:               {}", config.dataset_path().display());
                println!();
                println!("[Server]");
                println!("  Bind:               {}", config.server.bind);
                println!("  Port:               {}", config.server.port);
                println!();
                println!("[Dashboard]");
                println!("  Title:              {}", config.dashboard.title);
                println!("  Slider step (kg):   {}", config.dashboard.slider_step_kg);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.clone().unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
