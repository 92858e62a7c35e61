use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    // Documents of every collection; seq keeps insertion order
    conn.execute(
        "CREATE TABLE IF NOT EXISTS records (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            collection VARCHAR NOT NULL CHECK (collection IN ('clients', 'projects')),
            id VARCHAR NOT NULL,
            body VARCHAR NOT NULL,
            created_at BIGINT NOT NULL,
            UNIQUE (collection, id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_records_collection
            ON records(collection, seq)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email VARCHAR NOT NULL UNIQUE COLLATE NOCASE,
            password_hash VARCHAR NOT NULL,
            created_at BIGINT NOT NULL
        )",
        [],
    )?;

    Ok(())
}
