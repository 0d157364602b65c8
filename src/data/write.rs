use anyhow::{anyhow, Result};
use sqlx::PgConnection;

use crate::data::{Entry, EntryValue};

pub async fn insert_entry(conn: &mut PgConnection, entry: &Entry) -> Result<i64> {
    //Widened so both INTEGER and BIGINT id columns decode
    let query = "INSERT INTO aq_entry (seconds_since_last_reset, firmware) VALUES ($1, $2) RETURNING id::bigint;";

    let id: Option<i64> = sqlx::query_scalar(query)
        .bind(entry.seconds_since_last_reset)
        .bind(&entry.firmware)
        .fetch_optional(&mut *conn)
        .await?;

    id.ok_or_else(|| anyhow!("No ID returned from entry INSERT..."))
}

pub async fn insert_entry_value(
    conn: &mut PgConnection,
    entry_id: i64,
    value: &EntryValue,
) -> Result<()> {
    let query = "INSERT INTO aq_entry_value (entry_id, value_id, value) VALUES ($1, $2, $3);";

    let _rows = sqlx::query(query)
        .bind(entry_id)
        .bind(value.value_id)
        .bind(&value.value)
        .execute(&mut *conn)
        .await?;

    Ok(())
}
