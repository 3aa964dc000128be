use crate::actors::messages::{AppError, RecorderMessage};
use crate::actors::traits::InteractionStore;
use crate::crisis::CrisisInteraction;
use crate::database;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{debug, error, info, warn};

const FLUSH_TIMEOUT: Duration = Duration::from_secs(30);

/// A handle to the crisis interaction recorder.
///
/// Writes are queued and performed by a background task; `dispatch` never waits on
/// storage, so a slow or failing database cannot hold up a crisis check response.
#[derive(Clone)]
pub struct RecorderHandle {
    sender: mpsc::Sender<RecorderMessage>,
}

impl RecorderHandle {
    /// Spawns the recorder task with a queue of `capacity` pending writes.
    pub fn new<S: InteractionStore>(store: Arc<S>, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let actor = RecorderRunner { receiver, store };
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }

    /// Queue an interaction for persistence. Returns whether it was queued.
    ///
    /// A full queue drops the interaction with a warning.
    pub fn dispatch(&self, interaction: CrisisInteraction) -> bool {
        match self.sender.try_send(RecorderMessage::Record(interaction)) {
            Ok(()) => true,
            Err(TrySendError::Full(RecorderMessage::Record(dropped))) => {
                warn!(
                    user_id = %dropped.user_id,
                    "Crisis recorder queue is full, interaction dropped"
                );
                false
            }
            Err(TrySendError::Full(_)) => false,
            Err(TrySendError::Closed(_)) => {
                error!("Crisis recorder is not running, interaction dropped");
                false
            }
        }
    }

    /// Wait until every interaction queued so far has been handled.
    pub async fn flush(&self) -> Result<(), AppError> {
        self.flush_within(FLUSH_TIMEOUT).await
    }

    /// Like `flush`, giving up after `limit`. The limit covers queueing the
    /// barrier as well as waiting for it.
    pub async fn flush_within(&self, limit: Duration) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        timeout(limit, async {
            self.sender
                .send(RecorderMessage::Flush { responder: send })
                .await
                .map_err(|e| AppError::Actor(e.to_string()))?;
            recv.await.map_err(|e| AppError::Actor(e.to_string()))
        })
        .await?
    }
}

// --- Actor Runner ---
struct RecorderRunner<S: InteractionStore> {
    receiver: mpsc::Receiver<RecorderMessage>,
    store: Arc<S>,
}

impl<S: InteractionStore> RecorderRunner<S> {
    async fn run(mut self) {
        info!("Crisis recorder started");
        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }
        info!("Crisis recorder stopped");
    }

    async fn handle_message(&mut self, msg: RecorderMessage) {
        match msg {
            RecorderMessage::Record(interaction) => {
                match self.store.record(&interaction).await {
                    Ok(()) => debug!(
                        user_id = %interaction.user_id,
                        keywords = ?interaction.keywords_detected,
                        "Crisis interaction recorded"
                    ),
                    Err(e) => error!(
                        user_id = %interaction.user_id,
                        "Failed to record crisis interaction: {}",
                        e
                    ),
                }
            }
            RecorderMessage::Flush { responder } => {
                let _ = responder.send(());
            }
        }
    }
}

/// Stores interactions in the `crisis_interactions` table.
pub struct SqliteInteractionStore {
    pool: SqlitePool,
}

impl SqliteInteractionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionStore for SqliteInteractionStore {
    async fn record(&self, interaction: &CrisisInteraction) -> Result<(), AppError> {
        database::add_crisis_interaction(&self.pool, interaction).await?;
        Ok(())
    }
}
