//! Ezora - AI trip planner
//!
//! CLI entry point: terminal UI by default, `plan` and `tours` for scripting.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use ezora::catalog::{self, Tour};
use ezora::cli::{Cli, Command, OutputFormat, get_log_path};
use ezora::config::Config;
use ezora::itinerary::{ItineraryGenerator, TripRequest};
use ezora::llm::create_client;
use ezora::planner::{CompletionOutcome, PlannerController};
use ezora::prompts::PromptLoader;
use ezora::{report, tui};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Logging isn't initialized yet, so nothing here can be traced
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, "Ezora loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan {
            origin_city,
            destination,
            budget,
            days,
            travelers,
            style,
            interests,
            format,
        }) => {
            let request = TripRequest {
                origin_city,
                destination,
                days,
                travelers,
                budget_text: budget,
                style,
                interests,
            };
            cmd_plan(&config, request, format).await
        }
        Some(Command::Tours { category, format }) => cmd_tours(category.as_deref(), format),
        None => {
            debug!("main: no command specified, launching TUI");
            cmd_tui(&config).await
        }
    }
}

/// Wire config, provider client, prompts and generator into a controller
fn build_planner(config: &Config) -> Result<PlannerController> {
    debug!("build_planner: called");
    config.validate().context("Invalid configuration")?;

    let llm = create_client(&config.llm)?;
    let root = std::env::current_dir().context("Failed to read current directory")?;
    let generator = ItineraryGenerator::new(
        llm,
        PromptLoader::new(root),
        config.planner.clone(),
        config.llm.max_tokens,
    );

    Ok(PlannerController::new(Arc::new(generator)).with_max_days(config.planner.max_days))
}

/// Drive the planner headlessly and print the itinerary
async fn cmd_plan(config: &Config, request: TripRequest, format: OutputFormat) -> Result<()> {
    debug!(destination = %request.destination, %format, "cmd_plan: called");
    let mut planner = build_planner(config)?;
    planner.open();

    planner.set_origin_city(request.origin_city)?;
    planner.set_destination(request.destination)?;
    planner.set_days(request.days)?;
    planner.set_travelers(request.travelers)?;
    planner.set_budget(request.budget_text)?;
    planner.set_style(request.style)?;
    planner.set_interests(request.interests)?;

    let submission = planner.submit()?;
    eprintln!("Designing your trip to {}...", submission.request().destination);
    let completion = submission.run().await;

    match planner.complete(completion) {
        CompletionOutcome::Presented => {}
        outcome => {
            let message = planner.last_error().unwrap_or("Itinerary was not produced").to_string();
            debug!(?outcome, "cmd_plan: no itinerary");
            return Err(eyre::eyre!(message));
        }
    }

    let Some(result) = planner.result() else {
        return Err(eyre::eyre!("Itinerary was not produced"));
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => print!("{}", report::render_itinerary(result)),
    }
    Ok(())
}

/// Print the popular tours
fn cmd_tours(category: Option<&str>, format: OutputFormat) -> Result<()> {
    debug!(?category, %format, "cmd_tours: called");
    let tours: Vec<&Tour> = match category {
        Some(c) => catalog::by_category(c),
        None => catalog::all().iter().collect(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tours)?),
        OutputFormat::Text => print!("{}", report::render_tours(&tours)),
    }
    Ok(())
}

/// Launch the terminal UI
async fn cmd_tui(config: &Config) -> Result<()> {
    debug!("cmd_tui: called");
    let planner = build_planner(config)?;
    tui::run(planner).await
}

