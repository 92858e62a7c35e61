use crate::database::AsyncDbConnection;
use anyhow::Result;

/// Append a document to a collection
pub async fn insert_record(
    conn: AsyncDbConnection,
    collection: &str,
    id: &str,
    body: &serde_json::Value,
) -> Result<()> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();
    let body_json = serde_json::to_string(body)?;

    conn.execute(
        "INSERT INTO records (collection, id, body, created_at)
         VALUES (?, ?, ?, ?)",
        rusqlite::params![collection, id, body_json, now],
    )?;

    Ok(())
}

/// Every document of a collection, oldest first
pub async fn list_records(
    conn: AsyncDbConnection,
    collection: &str,
) -> Result<Vec<(String, serde_json::Value)>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT id, body FROM records
         WHERE collection = ?
         ORDER BY seq ASC",
    )?;

    let rows = stmt
        .query_map([collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::with_capacity(rows.len());
    for (id, body) in rows {
        match serde_json::from_str(&body) {
            Ok(value) => records.push((id, value)),
            Err(e) => tracing::warn!("Skipping unreadable record {} in {}: {}", id, collection, e),
        }
    }

    Ok(records)
}

/// Whether a document with this id exists in the collection
pub async fn record_exists(conn: AsyncDbConnection, collection: &str, id: &str) -> Result<bool> {
    let conn = conn.lock().await?;

    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM records WHERE collection = ? AND id = ?",
        rusqlite::params![collection, id],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}
