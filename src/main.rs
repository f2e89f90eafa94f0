use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use journey_planner::input::{PlanningInput, validate_input};
use journey_planner::{Agent, JourneyPlan, Outlet, PlannerConfig, plan_journeys};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a four-week journey plan from outlet and user records
    Plan {
        /// JSON file with `outlets` and `users` arrays
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the plan (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON planner configuration; missing keys use defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Average travel speed in km/h
        #[arg(long)]
        speed: Option<f64>,

        /// Minutes spent at each outlet
        #[arg(long)]
        service_time: Option<f64>,
    },
}

/// Plan plus the records it was built from, for the route viewer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanSnapshot<'a> {
    #[serde(flatten)]
    plan: &'a JourneyPlan,
    outlets: &'a [Outlet],
    users: &'a [Agent],
    generated_at: jiff::Timestamp,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Plan {
            input,
            output,
            config,
            speed,
            service_time,
        } => {
            let mut config = match config {
                Some(path) => read_json::<PlannerConfig>(&path)?,
                None => PlannerConfig::default(),
            };
            if let Some(speed) = speed {
                config.average_speed_kmh = speed;
            }
            if let Some(service_time) = service_time {
                config.service_time_minutes = service_time;
            }

            let records = read_json::<PlanningInput>(&input)?;
            let (outlets, agents) = validate_input(&records)?;
            let plan = plan_journeys(&outlets, &agents, &config)?;

            for entry in &plan.shortfalls {
                warn!(outlet = %entry.outlet_code, missing = entry.shortfall_count, "visit shortfall");
            }

            let snapshot = PlanSnapshot {
                plan: &plan,
                outlets: &outlets,
                users: &agents,
                generated_at: jiff::Timestamp::now(),
            };
            let json = serde_json::to_string_pretty(&snapshot)?;

            match output {
                Some(path) => {
                    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), entries = plan.plan.len(), "plan written");
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, anyhow::Error> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
