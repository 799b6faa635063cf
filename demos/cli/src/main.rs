use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use ward_core::time::parse_timestamp;
use ward_core::{
    EngineConfig, HospitalSnapshot, PatientFilter, ReportRange, Selection, StatusFilter,
};
use ward_metrics::{beds_in_ward, patients_in_department, AggregationEngine};
use ward_records::load_snapshot_str;

#[derive(Parser, Debug)]
#[command(
    name = "ward-cli",
    about = "Compute hospital dashboard figures from a JSON snapshot."
)]
struct Args {
    /// Path to a `{patients, appointments, beds, staff}` JSON document.
    #[arg(short, long)]
    input: PathBuf,

    /// Reference instant (ISO-8601). Defaults to now.
    #[arg(long)]
    as_of: Option<String>,

    /// JSON file with engine settings; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    utc_offset_minutes: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline metrics, recent admissions and bed totals.
    Dashboard,
    /// Filtered patient list.
    Patients {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        #[arg(long, default_value = "all")]
        department: String,
    },
    /// Bed statistics and roster, optionally for one ward.
    Beds {
        #[arg(long, default_value = "all")]
        ward: String,
    },
    /// Statistics, trend and patients of one department.
    Department { name: String },
    /// Appointment rates and roster.
    Appointments,
    /// Reports page figures.
    Report {
        #[arg(long, default_value = "week")]
        range: ReportRange,
    },
    /// Per-department share and trend.
    Analytics,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("could not read file {:?}", args.input))?;
    let snapshot = load_snapshot_str(&data)
        .with_context(|| format!("could not load snapshot from {:?}", args.input))?;

    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(minutes) = args.utc_offset_minutes {
        config.utc_offset_minutes = minutes;
    }
    let engine = AggregationEngine::new(config)?;

    let as_of = match &args.as_of {
        Some(text) => {
            parse_timestamp(text).ok_or_else(|| anyhow!("--as-of `{text}` is not a timestamp"))?
        }
        None => Utc::now(),
    };
    tracing::debug!(%as_of, ?config, "running {:?}", args.command);

    let output = run(&engine, &snapshot, as_of, args.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read config {path:?}"))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {path:?}"))
}

fn run(
    engine: &AggregationEngine,
    snapshot: &HospitalSnapshot,
    as_of: DateTime<Utc>,
    command: Command,
) -> anyhow::Result<Value> {
    let value = match command {
        Command::Dashboard => json!({
            "metrics": engine.dashboard(snapshot, as_of),
            "recentAdmissions": engine.recent_admissions(&snapshot.patients),
            "beds": engine.compute_bed_statistics(&snapshot.beds),
            "departments": engine.departments(&snapshot.patients, &snapshot.staff),
        }),
        Command::Patients {
            search,
            status,
            department,
        } => {
            let filter = PatientFilter::search(search)
                .with_status(status)
                .with_department(Selection::from(department));
            serde_json::to_value(engine.filter_patients(&snapshot.patients, &filter))?
        }
        Command::Beds { ward } => {
            let ward = Selection::from(ward);
            let beds: Vec<_> = beds_in_ward(&snapshot.beds, &ward)
                .into_iter()
                .cloned()
                .collect();
            json!({
                "statistics": engine.ward_bed_statistics(&snapshot.beds, &ward),
                "roster": engine.bed_roster(&beds, &snapshot.patients),
            })
        }
        Command::Department { name } => {
            let statistics =
                engine.compute_department_statistics(&snapshot.patients, &snapshot.staff, &name);
            let selection = Selection::only(name.as_str());
            let members = patients_in_department(&snapshot.patients, &selection);
            json!({
                "statistics": statistics,
                "trend": engine.compute_department_trend(&snapshot.patients, &name, as_of),
                "patients": members,
            })
        }
        Command::Appointments => json!({
            "rates": engine.compute_appointment_rates(&snapshot.appointments, as_of),
            "roster": engine.appointment_roster(&snapshot.appointments, &snapshot.patients),
        }),
        Command::Report { range } => {
            serde_json::to_value(engine.compute_report_metrics(snapshot, range, as_of))?
        }
        Command::Analytics => {
            serde_json::to_value(engine.department_analytics(&snapshot.patients, as_of))?
        }
    };
    Ok(value)
}
