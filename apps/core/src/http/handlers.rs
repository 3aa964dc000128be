use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use super::extract::AuthUser;
use super::AppState;
use crate::auth;
use crate::crisis::{CrisisInteraction, CrisisReport};
use crate::database;
use crate::error::AppError;
use crate::models::{
    now_timestamp, ChatMessage, Credentials, JournalContent, JournalEntry, MoodEntry,
    NewJournalEntry, NewMoodEntry, PublicUser,
};
use crate::prompts;

const NO_JOURNAL_ENTRY: &str = "No journal entry provided";

/// Entry text from a journal body. Unreadable bodies count as missing text.
fn journal_text(payload: Result<Json<JournalContent>, JsonRejection>) -> Result<String, AppError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!("Rejected journal body: {}", rejection);
        AppError::Validation(NO_JOURNAL_ENTRY.to_string())
    })?;
    body.text()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(NO_JOURNAL_ENTRY.to_string()))
}

pub async fn health() -> impl IntoResponse {
    "ok"
}

// --- Accounts ---

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload
        .validate()
        .map_err(|_| AppError::Validation("Username and password are required".to_string()))?;

    if database::find_user_by_username(&state.pool, &payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::Validation("Username already exists".to_string()));
    }

    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let user = database::create_user(&state.pool, &payload.username, &password_hash)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Validation("Username already exists".to_string())
            }
            other => AppError::Database(other),
        })?;

    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": PublicUser::from(&user),
        })),
    ))
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<Value>, AppError> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = database::find_user_by_username(&state.pool, &payload.username)
        .await?
        .ok_or_else(invalid)?;

    let password = payload.password;
    let stored_hash = user.password_hash.clone();
    let verified =
        tokio::task::spawn_blocking(move || auth::verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    if !verified {
        warn!(username = %user.username, "Failed login attempt");
        return Err(invalid());
    }

    let token = state.tokens.issue(&user.id)?;

    Ok(Json(json!({
        "token": token,
        "user": PublicUser {
            id: user.id,
            username: user.username,
            created_at: None,
        },
    })))
}

// --- Journal & mood ---

pub async fn create_journal_entry(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewJournalEntry>,
) -> Result<Json<Value>, AppError> {
    let mood = payload.mood.as_deref().unwrap_or("neutral");
    let entry = database::add_journal_entry(&state.pool, &user.id, &payload.content, mood).await?;
    Ok(Json(json!({ "id": entry.id, "status": "success" })))
}

pub async fn get_journal_entries(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    Ok(Json(database::get_journal_entries(&state.pool, &user.id).await?))
}

pub async fn record_mood(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<NewMoodEntry>,
) -> Result<Json<Value>, AppError> {
    payload
        .validate()
        .map_err(|_| AppError::Validation("Mood is required".to_string()))?;
    let entry = database::add_mood_entry(&state.pool, &user.id, &payload.mood, &payload.note).await?;
    Ok(Json(json!({ "id": entry.id, "status": "success" })))
}

pub async fn get_mood_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<MoodEntry>>, AppError> {
    Ok(Json(database::get_mood_entries(&state.pool, &user.id).await?))
}

pub async fn chat(AuthUser(_user): AuthUser, Json(_payload): Json<ChatMessage>) -> Json<Value> {
    Json(json!({
        "message": prompts::CHAT_PLACEHOLDER_REPLY,
        "timestamp": now_timestamp(),
    }))
}

// --- Feedback ---

#[instrument(skip_all)]
pub async fn therapeutic_response(
    State(state): State<AppState>,
    payload: Result<Json<JournalContent>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let content = journal_text(payload)?;

    let reply = state
        .llm
        .generate_with_params(
            prompts::therapeutic_user_prompt(&content),
            Some(prompts::DBT_SYSTEM_PROMPT.to_string()),
            None,
        )
        .await?;

    let timestamp = now_timestamp();
    database::add_therapeutic_response(&state.pool, &content, &reply, &timestamp).await?;

    Ok(Json(json!({ "response": reply, "timestamp": timestamp })))
}

/// Runs the crisis pipeline. The interaction write is queued, never awaited.
#[instrument(skip_all)]
pub async fn crisis_check(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<JournalContent>, JsonRejection>,
) -> Result<Json<CrisisReport>, AppError> {
    let content = journal_text(payload)?;

    let analysis = state.analyzer.analyze(&content);

    if let Some(interaction) = CrisisInteraction::from_detection(&user.id, &analysis.detection) {
        info!(
            user_id = %user.id,
            keywords = ?interaction.keywords_detected,
            "Crisis keywords detected"
        );
        state.recorder.dispatch(interaction);
    }

    Ok(Json(analysis.report))
}
