use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{ConnectOptions, Connection, PgConnection};
use tracing::{debug, instrument};

use crate::model::{DbConfig, SensorReading, CONTROL_VALUE_ID};

mod tables;
mod write;

const APPLICATION_NAME: &str = "airsniffer";

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub seconds_since_last_reset: i32,
    pub firmware: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntryValue {
    pub value_id: i32,
    pub value: String,
}

/// Splits a reading into the entry row and its value rows. The control value
/// is left out; every other value id has to be an integer.
pub fn build_rows(reading: &SensorReading) -> Result<(Entry, Vec<EntryValue>)> {
    let entry = Entry {
        seconds_since_last_reset: reading.system_info.seconds_since_last_reset()?,
        firmware: reading.system_info.firmware.clone(),
    };

    let mut values = vec![];
    for value in &reading.values {
        if value.id == CONTROL_VALUE_ID {
            continue;
        }

        let value_id = value
            .id
            .parse()
            .with_context(|| format!("Value id is not an integer: {:?}", value.id))?;

        values.push(EntryValue {
            value_id,
            value: value.value.clone(),
        });
    }

    Ok((entry, values))
}

pub fn connect_options(config: &DbConfig) -> PgConnectOptions {
    let ssl_mode = if config.ssl {
        PgSslMode::Require
    } else {
        PgSslMode::Disable
    };

    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.username)
        .password(&config.password)
        .application_name(APPLICATION_NAME)
        .ssl_mode(ssl_mode)
}

pub struct DbManager {
    conn: PgConnection,
}

impl DbManager {
    #[instrument(skip(config), fields(host = %config.host, database = %config.database))]
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let conn = connect_options(config).connect().await.with_context(|| {
            format!(
                "Couldn't connect to Postgres at {}:{}",
                config.host, config.port
            )
        })?;

        let mut db_manager = DbManager { conn };

        if config.create_tables {
            db_manager.create_tables().await?;
        }

        Ok(db_manager)
    }

    async fn create_tables(&mut self) -> Result<()> {
        sqlx::query(tables::ENTRY_TABLE)
            .execute(&mut self.conn)
            .await?;
        debug!("Built entry table");

        sqlx::query(tables::ENTRY_VALUE_TABLE)
            .execute(&mut self.conn)
            .await?;
        debug!("Built entry value table");

        Ok(())
    }

    /// Inserts the entry and then its values, stopping at the first failure.
    /// Rows written before a failure stay in the database.
    pub async fn insert_rows(&mut self, entry: &Entry, values: &[EntryValue]) -> Result<i64> {
        let entry_id = write::insert_entry(&mut self.conn, entry)
            .await
            .context("Couldn't insert entry")?;
        debug!("Inserted entry {}", entry_id);

        for value in values {
            write::insert_entry_value(&mut self.conn, entry_id, value)
                .await
                .with_context(|| format!("Couldn't insert value {}", value.value_id))?;
        }
        debug!("Inserted {} values for entry {}", values.len(), entry_id);

        Ok(entry_id)
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

pub async fn store(reading: &SensorReading, config: &DbConfig) -> Result<i64> {
    let (entry, values) = build_rows(reading)?;

    let mut db = DbManager::connect(config).await?;
    //Dropping the connection on an error path closes it as well
    let entry_id = db.insert_rows(&entry, &values).await?;
    db.close().await?;

    Ok(entry_id)
}
