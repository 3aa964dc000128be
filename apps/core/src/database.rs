use crate::crisis::CrisisInteraction;
use crate::error::AppError;
use crate::models::{
    now_timestamp, CrisisInteractionRecord, JournalEntry, MoodEntry, TherapeuticResponse, User,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Open (creating if needed) the SQLite database and apply migrations.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, AppError> {
    info!("Initializing database at: {}", database_url);

    let in_memory = database_url.contains(":memory:");
    if !in_memory {
        if let Some(parent) = sqlite_file_path(database_url).and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // Every in-memory connection is its own database.
    let max_connections = if in_memory { 1 } else { 5 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    Some(Path::new(path))
}

// --- Users ---

pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let created_at = now_timestamp();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, password_hash, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, username, password_hash, created_at
        "#,
    )
    .bind(&id)
    .bind(username)
    .bind(password_hash)
    .bind(&created_at)
    .fetch_one(pool)
    .await
}

pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

// --- Journal ---

pub async fn add_journal_entry(
    pool: &SqlitePool,
    user_id: &str,
    content: &str,
    mood: &str,
) -> Result<JournalEntry, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let timestamp = now_timestamp();

    sqlx::query_as::<_, JournalEntry>(
        r#"
        INSERT INTO journal_entries (id, user_id, content, mood, timestamp)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, content, mood, timestamp
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(content)
    .bind(mood)
    .bind(&timestamp)
    .fetch_one(pool)
    .await
}

/// Newest first.
pub async fn get_journal_entries(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<JournalEntry>, sqlx::Error> {
    sqlx::query_as::<_, JournalEntry>(
        r#"
        SELECT id, user_id, content, mood, timestamp
        FROM journal_entries
        WHERE user_id = ?
        ORDER BY timestamp DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

// --- Mood ---

pub async fn add_mood_entry(
    pool: &SqlitePool,
    user_id: &str,
    mood: &str,
    note: &str,
) -> Result<MoodEntry, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let timestamp = now_timestamp();

    sqlx::query_as::<_, MoodEntry>(
        r#"
        INSERT INTO mood_entries (id, user_id, mood, note, timestamp)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, mood, note, timestamp
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(mood)
    .bind(note)
    .bind(&timestamp)
    .fetch_one(pool)
    .await
}

/// Newest first.
pub async fn get_mood_entries(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<MoodEntry>, sqlx::Error> {
    sqlx::query_as::<_, MoodEntry>(
        r#"
        SELECT id, user_id, mood, note, timestamp
        FROM mood_entries
        WHERE user_id = ?
        ORDER BY timestamp DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

// --- Therapeutic responses ---

pub async fn add_therapeutic_response(
    pool: &SqlitePool,
    journal_entry: &str,
    therapeutic_response: &str,
    timestamp: &str,
) -> Result<TherapeuticResponse, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query_as::<_, TherapeuticResponse>(
        r#"
        INSERT INTO therapeutic_responses (id, journal_entry, therapeutic_response, timestamp)
        VALUES (?, ?, ?, ?)
        RETURNING id, journal_entry, therapeutic_response, timestamp
        "#,
    )
    .bind(&id)
    .bind(journal_entry)
    .bind(therapeutic_response)
    .bind(timestamp)
    .fetch_one(pool)
    .await
}

// --- Crisis interactions ---

pub async fn add_crisis_interaction(
    pool: &SqlitePool,
    interaction: &CrisisInteraction,
) -> Result<CrisisInteractionRecord, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query_as::<_, CrisisInteractionRecord>(
        r#"
        INSERT INTO crisis_interactions (id, user_id, keywords_detected, exercises_recommended, timestamp)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, keywords_detected, exercises_recommended, timestamp
        "#,
    )
    .bind(&id)
    .bind(&interaction.user_id)
    .bind(Json(&interaction.keywords_detected))
    .bind(Json(&interaction.exercises_recommended))
    .bind(&interaction.timestamp)
    .fetch_one(pool)
    .await
}

/// Oldest first.
pub async fn get_crisis_interactions(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<CrisisInteractionRecord>, sqlx::Error> {
    sqlx::query_as::<_, CrisisInteractionRecord>(
        r#"
        SELECT id, user_id, keywords_detected, exercises_recommended, timestamp
        FROM crisis_interactions
        WHERE user_id = ?
        ORDER BY timestamp ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path("sqlite://data/calmjournal.sqlite"),
            Some(Path::new("data/calmjournal.sqlite"))
        );
        assert_eq!(
            sqlite_file_path("sqlite:/tmp/x.db?mode=rwc"),
            Some(Path::new("/tmp/x.db"))
        );
        assert_eq!(sqlite_file_path("postgres://nope"), None);
    }
}
