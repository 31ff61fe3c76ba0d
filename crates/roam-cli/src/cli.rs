//! Subcommand definitions and their handlers.
//!
//! Each subcommand has a clap `Args` struct that converts into the core
//! parameter type, so the core crate stays free of clap attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Store
//! ```

use std::{
    fs,
    io::{self, Read},
};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use jiff::Zoned;
use roam_core::{
    CreateResult, CreateTrip, DeleteResult, Id, Preferences, Store, TripPatch, TripSummaries,
    UpdateResult,
};
use serde::Serialize;

use crate::renderer::TerminalRenderer;

/// Available commands for the Roam CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new trip
    #[command(alias = "c")]
    Create(CreateTripArgs),
    /// List all trips
    #[command(alias = "ls")]
    List,
    /// Show a trip with its full plan
    Show(TripIdArgs),
    /// Update a trip with a partial JSON object
    #[command(alias = "u")]
    Update(UpdateTripArgs),
    /// Delete a trip
    #[command(alias = "rm")]
    Delete(TripIdArgs),
}

/// Create a new trip
///
/// Either describe the trip with flags, or pass a complete JSON body with
/// `--from-json` (a file path, or `-` for stdin).
#[derive(Args)]
pub struct CreateTripArgs {
    /// Name of the trip
    #[arg(required_unless_present = "from_json")]
    pub name: Option<String>,
    /// Region or destination
    #[arg(short, long, default_value = "")]
    pub region: String,
    /// First day of the trip (YYYY-MM-DD). Defaults to today
    #[arg(short = 's', long)]
    pub start_date: Option<String>,
    /// Number of days
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub days: i64,
    /// Total budget
    #[arg(short, long, default_value_t = 0)]
    pub budget: i64,
    /// Number of travellers
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub people: i64,
    /// Hours of activities per day
    #[arg(long, default_value_t = 8, allow_negative_numbers = true)]
    pub daily_hours: i64,
    /// Travel pace, e.g. relaxed or packed
    #[arg(long, default_value = "")]
    pub pace: String,
    /// Interests, comma separated
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<String>,
    /// Preferred transport, comma separated
    #[arg(long, value_delimiter = ',')]
    pub transport: Vec<String>,
    /// Dining preferences, comma separated
    #[arg(long, value_delimiter = ',')]
    pub dining: Vec<String>,
    /// Read the whole trip from a JSON file, or `-` for stdin
    #[arg(long, conflicts_with = "name")]
    pub from_json: Option<String>,
}

impl TryFrom<CreateTripArgs> for CreateTrip {
    type Error = anyhow::Error;

    fn try_from(val: CreateTripArgs) -> Result<Self> {
        if let Some(source) = val.from_json {
            let body = read_source(&source)?;
            return Ok(CreateTrip::from_json(&body)?);
        }

        Ok(CreateTrip {
            name: val.name.unwrap_or_default(),
            region: val.region,
            start_date: val
                .start_date
                .unwrap_or_else(|| Zoned::now().date().to_string()),
            days: val.days,
            budget: val.budget,
            people: val.people,
            daily_hours: val.daily_hours,
            preferences: Preferences {
                pace: val.pace,
                types: val.types,
                transport: val.transport,
                dining: val.dining,
            },
            plan: Vec::new(),
        })
    }
}

/// Identify a single trip
#[derive(Args)]
pub struct TripIdArgs {
    /// ID of the trip
    pub id: u64,
}

impl From<TripIdArgs> for Id {
    fn from(val: TripIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a trip
///
/// Only the keys present in the JSON object are changed; `null` clears a
/// field. Sending `plan` replaces the items of the listed days.
#[derive(Args)]
pub struct UpdateTripArgs {
    /// ID of the trip to update
    pub id: u64,
    /// JSON object with the fields to change, or `-` to read it from stdin
    pub patch: String,
}

/// Reads `-` as stdin, anything else as a file path.
fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut body = String::new();
        io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read from stdin")?;
        Ok(body)
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))
    }
}

/// Runs subcommands against a store and renders the results.
pub struct Cli {
    store: Store,
    renderer: TerminalRenderer,
    json: bool,
}

impl Cli {
    pub fn new(store: Store, renderer: TerminalRenderer, json: bool) -> Self {
        Self {
            store,
            renderer,
            json,
        }
    }

    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Create(args) => self.create_trip(args).await,
            Commands::List => self.list_trips().await,
            Commands::Show(args) => self.show_trip(args.into()).await,
            Commands::Update(args) => self.update_trip(args).await,
            Commands::Delete(args) => self.delete_trip(args.into()).await,
        }
    }

    pub async fn create_trip(&self, args: CreateTripArgs) -> Result<()> {
        let params = CreateTrip::try_from(args)?;
        let trip = self
            .store
            .create(params)
            .await
            .context("Failed to create trip")?;

        if self.json {
            return self.print_json(&trip);
        }
        self.renderer.render(&CreateResult::new(trip).to_string())
    }

    pub async fn list_trips(&self) -> Result<()> {
        if self.json {
            return self.print_json(&self.store.list().await);
        }

        let summaries = TripSummaries(self.store.list_summaries().await);
        let mut output = String::from("# Trips\n\n");
        output.push_str(&summaries.to_string());
        self.renderer.render(&output)
    }

    pub async fn show_trip(&self, params: Id) -> Result<()> {
        let trip = self
            .store
            .get(params.id)
            .await
            .with_context(|| format!("Failed to load trip {}", params.id))?;

        if self.json {
            return self.print_json(&trip);
        }
        self.renderer.render(&trip.to_string())
    }

    pub async fn update_trip(&self, args: UpdateTripArgs) -> Result<()> {
        let body = if args.patch == "-" {
            read_source("-")?
        } else {
            args.patch
        };
        let patch = TripPatch::from_json(&body).context("Invalid update")?;
        let changes: Vec<String> = patch
            .present_fields()
            .into_iter()
            .map(String::from)
            .collect();

        let trip = self
            .store
            .update(args.id, patch)
            .await
            .with_context(|| format!("Failed to update trip {}", args.id))?;

        if self.json {
            return self.print_json(&trip);
        }
        self.renderer
            .render(&UpdateResult::with_changes(trip, changes).to_string())
    }

    pub async fn delete_trip(&self, params: Id) -> Result<()> {
        let trip = self
            .store
            .get(params.id)
            .await
            .with_context(|| format!("Failed to delete trip {}", params.id))?;
        self.store
            .delete(params.id)
            .await
            .with_context(|| format!("Failed to delete trip {}", params.id))?;

        if self.json {
            return self.print_json(&serde_json::json!({ "deleted": params.id }));
        }
        self.renderer.render(&DeleteResult::new(trip).to_string())
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        self.renderer.render_plain(&text)
    }
}
