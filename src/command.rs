use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::comm::{fetch_reading, lametric};
use crate::common::logging::LogLevel;
use crate::data;
use crate::model::{DbConfig, LametricConfig, SensorConfig, SensorReading};

/// A utility for performing actions with data provided by the AirSniffer.
#[derive(Parser, Debug)]
#[command(name = "airsniffer", args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Warning, global = true)]
    pub log_level: LogLevel,
    #[arg(long = "log-file", default_value = "", global = true)]
    pub log_file: String,
}

impl Cli {
    /// `store` runs when no subcommand is given.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Store(self.store))
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Store the AirSniffer values in a Postgres database.
    Store(StoreArgs),
    /// Send the air quality grade to a Lametric Time.
    Lametric(LametricArgs),
}

#[derive(clap::Args, Debug, PartialEq)]
pub struct StoreArgs {
    #[command(flatten)]
    pub sensor: SensorConfig,
    #[command(flatten)]
    pub db: DbConfig,
}

#[derive(clap::Args, Debug, PartialEq)]
pub struct LametricArgs {
    #[command(flatten)]
    pub sensor: SensorConfig,
    #[command(flatten)]
    pub lametric: LametricConfig,
}

/// Where a fetched reading ends up.
#[allow(async_fn_in_trait)]
pub trait ReadingSink {
    /// Returns the confirmation shown to the user.
    async fn deliver(&self, reading: &SensorReading) -> Result<String>;
}

pub struct DbSink<'a>(pub &'a DbConfig);

impl ReadingSink for DbSink<'_> {
    async fn deliver(&self, reading: &SensorReading) -> Result<String> {
        let entry_id = data::store(reading, self.0).await?;
        debug!("Stored reading as entry {}", entry_id);
        Ok("Successfully inserted data into database!".to_string())
    }
}

pub struct LametricSink<'a>(pub &'a LametricConfig);

impl ReadingSink for LametricSink<'_> {
    async fn deliver(&self, reading: &SensorReading) -> Result<String> {
        lametric::forward(reading, self.0).await?;
        Ok("Successfully sent data to Lametric Time!".to_string())
    }
}

/// Fetches one reading and hands it to the sink. A failed fetch never reaches
/// the sink.
pub async fn process(sensor: &SensorConfig, sink: &impl ReadingSink) -> Result<String> {
    info!("Fetching reading from {}", sensor.url);
    let reading = fetch_reading(&sensor.url).await?;
    sink.deliver(&reading).await
}

pub async fn run(command: &Command) -> Result<String> {
    match command {
        Command::Store(args) => process(&args.sensor, &DbSink(&args.db)).await,
        Command::Lametric(args) => process(&args.sensor, &LametricSink(&args.lametric)).await,
    }
}
