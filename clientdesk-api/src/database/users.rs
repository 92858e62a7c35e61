use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::{ErrorCode, OptionalExtension};
use shared_types::AuthUser;

pub struct StoredUser {
    pub user: AuthUser,
    pub password_hash: String,
}

/// Insert a user. Returns `None` when the email is already registered.
pub async fn insert_user(
    conn: AsyncDbConnection,
    email: &str,
    password_hash: &str,
) -> Result<Option<AuthUser>> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let inserted = conn.query_row(
        "INSERT INTO users (email, password_hash, created_at)
         VALUES (?, ?, ?)
         RETURNING id",
        rusqlite::params![email, password_hash, now],
        |row| row.get::<_, i64>(0),
    );

    match inserted {
        Ok(id) => Ok(Some(AuthUser {
            id,
            email: email.to_string(),
        })),
        // UNIQUE on users.email, hit when another sign-up won the race
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn find_user_by_email(conn: AsyncDbConnection, email: &str) -> Result<Option<StoredUser>> {
    let conn = conn.lock().await?;

    let user = conn
        .query_row(
            "SELECT id, email, password_hash FROM users WHERE email = ?",
            [email],
            |row| {
                Ok(StoredUser {
                    user: AuthUser {
                        id: row.get(0)?,
                        email: row.get(1)?,
                    },
                    password_hash: row.get(2)?,
                })
            },
        )
        .optional()?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    #[tokio::test]
    async fn test_duplicate_email_insert_reports_none() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("users.db")).unwrap();
        let conn = db.async_connection.clone();

        let first = insert_user(conn.clone(), "ana@example.com", "hash").await.unwrap();
        assert!(first.is_some());

        let second = insert_user(conn.clone(), "ANA@example.com", "hash").await.unwrap();
        assert!(second.is_none());

        let stored = find_user_by_email(conn, "ana@example.com").await.unwrap().unwrap();
        assert_eq!(stored.user.id, first.unwrap().id);
    }
}
