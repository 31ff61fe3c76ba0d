use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use roam_core::{BackendKind, PlanPolicy};

use crate::cli::Commands;

/// Command-line front end for the Roam itinerary store
///
/// Roam keeps travel itineraries: trips with a day-by-day plan of places to
/// visit. Trips live in a JSON file (or an SQLite database) under the XDG data
/// directory unless `--data-file` points elsewhere. Running `roam` without a
/// subcommand lists all trips.
#[derive(Parser)]
#[command(version, about, name = "roam")]
pub struct Args {
    /// Path to the data file. Defaults to $XDG_DATA_HOME/roam/trips.json
    /// (trips.db for the sqlite backend)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Storage backend to use
    #[arg(long, global = true, value_enum, default_value_t = BackendArg::File)]
    pub backend: BackendArg,

    /// What happens to an existing plan when an update changes the dates
    /// without sending a new plan
    #[arg(long, global = true, value_enum, default_value_t = PlanPolicyArg::Preserve)]
    pub plan_policy: PlanPolicyArg,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Storage backend selection
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BackendArg {
    /// Single JSON document, replaced atomically on every change
    File,
    /// SQLite database with one row per trip
    Sqlite,
}

impl From<BackendArg> for BackendKind {
    fn from(val: BackendArg) -> Self {
        match val {
            BackendArg::File => BackendKind::File,
            BackendArg::Sqlite => BackendKind::Sqlite,
        }
    }
}

/// Plan handling on date changes
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PlanPolicyArg {
    /// Keep the stored plan untouched
    Preserve,
    /// Rebuild the plan for the new dates, keeping items on their day
    Realign,
}

impl From<PlanPolicyArg> for PlanPolicy {
    fn from(val: PlanPolicyArg) -> Self {
        match val {
            PlanPolicyArg::Preserve => PlanPolicy::Preserve,
            PlanPolicyArg::Realign => PlanPolicy::Realign,
        }
    }
}
