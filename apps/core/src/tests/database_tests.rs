//! Database Module Tests
//!
//! CRUD operations for users, journal entries, mood entries, therapeutic
//! responses and crisis interactions.

use crate::crisis::CrisisInteraction;
use crate::database;
use sqlx::sqlite::SqlitePool;
use tempfile::tempdir;

/// Fresh in-memory database with migrations applied
async fn create_test_pool() -> SqlitePool {
    database::init_db("sqlite::memory:")
        .await
        .expect("Failed to create test pool")
}

async fn create_test_user(pool: &SqlitePool, username: &str) -> String {
    database::create_user(pool, username, "$argon2id$placeholder")
        .await
        .expect("Failed to create user")
        .id
}

#[cfg(test)]
mod init_tests {
    use super::*;

    #[tokio::test]
    async fn test_init_db_creates_parent_directory() {
        let dir = tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("nested").join("calmjournal.sqlite");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = database::init_db(&db_url).await.expect("init_db failed");
        create_test_user(&pool, "alice").await;
        pool.close().await;

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_init_db_is_rerunnable() {
        let dir = tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", dir.path().join("db.sqlite").display());

        let first = database::init_db(&db_url).await.expect("first init failed");
        create_test_user(&first, "alice").await;
        first.close().await;

        let second = database::init_db(&db_url).await.expect("second init failed");
        let user = database::find_user_by_username(&second, "alice")
            .await
            .unwrap();
        assert!(user.is_some());
    }
}

#[cfg(test)]
mod user_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find_user() {
        let pool = create_test_pool().await;

        let created = database::create_user(&pool, "alice", "hash")
            .await
            .expect("Failed to create user");
        assert!(!created.id.is_empty());
        assert_eq!(created.username, "alice");
        assert_eq!(created.password_hash, "hash");

        let by_name = database::find_user_by_username(&pool, "alice")
            .await
            .unwrap()
            .expect("user should exist");
        assert_eq!(by_name.id, created.id);

        let by_id = database::get_user(&pool, &created.id)
            .await
            .unwrap()
            .expect("user should exist");
        assert_eq!(by_id.username, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_unique_violation() {
        let pool = create_test_pool().await;
        create_test_user(&pool, "alice").await;

        let err = database::create_user(&pool, "alice", "other")
            .await
            .expect_err("duplicate username should fail");
        match err {
            sqlx::Error::Database(db) => assert!(db.is_unique_violation()),
            other => panic!("Expected database error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_user_is_none() {
        let pool = create_test_pool().await;

        assert!(database::get_user(&pool, "missing").await.unwrap().is_none());
        assert!(database::find_user_by_username(&pool, "missing")
            .await
            .unwrap()
            .is_none());
    }
}

#[cfg(test)]
mod journal_tests {
    use super::*;

    #[tokio::test]
    async fn test_journal_entries_are_per_user() {
        let pool = create_test_pool().await;
        let alice = create_test_user(&pool, "alice").await;
        let bob = create_test_user(&pool, "bob").await;

        database::add_journal_entry(&pool, &alice, "first", "happy")
            .await
            .unwrap();
        database::add_journal_entry(&pool, &alice, "second", "neutral")
            .await
            .unwrap();
        database::add_journal_entry(&pool, &bob, "bob's", "sad")
            .await
            .unwrap();

        let entries = database::get_journal_entries(&pool, &alice).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.user_id == alice));
        assert!(entries[0].timestamp >= entries[1].timestamp);
    }

    #[tokio::test]
    async fn test_mood_entries_roundtrip() {
        let pool = create_test_pool().await;
        let alice = create_test_user(&pool, "alice").await;

        let saved = database::add_mood_entry(&pool, &alice, "anxious", "exam tomorrow")
            .await
            .unwrap();

        let moods = database::get_mood_entries(&pool, &alice).await.unwrap();
        assert_eq!(moods.len(), 1);
        assert_eq!(moods[0].id, saved.id);
        assert_eq!(moods[0].mood, "anxious");
        assert_eq!(moods[0].note, "exam tomorrow");
    }

    #[tokio::test]
    async fn test_therapeutic_response_stored() {
        let pool = create_test_pool().await;

        let saved = database::add_therapeutic_response(
            &pool,
            "rough day",
            "That sounds hard.",
            "2024-01-01T00:00:00.000000Z",
        )
        .await
        .unwrap();

        assert_eq!(saved.journal_entry, "rough day");
        assert_eq!(saved.therapeutic_response, "That sounds hard.");
        assert_eq!(saved.timestamp, "2024-01-01T00:00:00.000000Z");
    }
}

#[cfg(test)]
mod crisis_interaction_tests {
    use super::*;

    #[tokio::test]
    async fn test_interaction_lists_survive_storage() {
        let pool = create_test_pool().await;
        let alice = create_test_user(&pool, "alice").await;

        let interaction = CrisisInteraction {
            user_id: alice.clone(),
            keywords_detected: vec!["overwhelmed".to_string(), "hopeless".to_string()],
            exercises_recommended: vec!["Body Scan".to_string(), "Gratitude List".to_string()],
            timestamp: "2024-01-01T00:00:00.000000Z".to_string(),
        };
        database::add_crisis_interaction(&pool, &interaction)
            .await
            .unwrap();

        let stored = database::get_crisis_interactions(&pool, &alice).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].keywords_detected.0, vec!["overwhelmed", "hopeless"]);
        assert_eq!(
            stored[0].exercises_recommended.0,
            vec!["Body Scan", "Gratitude List"]
        );
        assert_eq!(stored[0].timestamp, interaction.timestamp);
    }

    #[tokio::test]
    async fn test_interaction_for_unknown_user_rejected() {
        let pool = create_test_pool().await;

        let interaction = CrisisInteraction {
            user_id: "ghost".to_string(),
            keywords_detected: vec!["panic".to_string()],
            exercises_recommended: vec![],
            timestamp: "2024-01-01T00:00:00.000000Z".to_string(),
        };

        assert!(database::add_crisis_interaction(&pool, &interaction)
            .await
            .is_err());
    }
}
