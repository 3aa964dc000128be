// CalmJournal Backend Entry Point

use calmjournal_core::actors::{LlmActorHandle, RecorderHandle, SqliteInteractionStore};
use calmjournal_core::auth::TokenIssuer;
use calmjournal_core::config::AppConfig;
use calmjournal_core::crisis::CrisisAnalyzer;
use calmjournal_core::http::{self, AppState};
use calmjournal_core::{database, telemetry};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    // Dropping the guard stops the log file writer.
    let _log_guard = telemetry::init_tracing(&config)?;

    if config.uses_default_jwt_secret() {
        warn!("JWT_SECRET_KEY is not set; tokens are signed with the default secret");
    }

    let analyzer = CrisisAnalyzer::default();
    for dangling in analyzer.lexicon().dangling_references(analyzer.catalog()) {
        warn!(
            keyword = %dangling.keyword,
            exercise = %dangling.exercise,
            "Keyword maps to an exercise missing from the catalog"
        );
    }

    let pool = database::init_db(&config.database_url).await?;

    let llm = LlmActorHandle::new(config.llm.clone());
    let recorder = RecorderHandle::new(
        Arc::new(SqliteInteractionStore::new(pool.clone())),
        config.recorder_queue_capacity,
    );

    let state = AppState {
        pool: pool.clone(),
        tokens: TokenIssuer::new(&config.jwt_secret, config.token_ttl_hours),
        analyzer,
        recorder: recorder.clone(),
        llm: Arc::new(llm),
    };

    let served = http::serve(&config, state).await;

    // Drain queued crisis interactions before the pool goes away.
    if let Err(e) = recorder.flush().await {
        error!("Failed to flush crisis recorder: {}", e);
    }
    pool.close().await;
    info!("CalmJournal stopped");

    served.map_err(Into::into)
}
