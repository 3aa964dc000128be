use tokio::sync::oneshot;

use crate::crisis::CrisisInteraction;

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the `LlmActor`.
#[derive(Debug)]
pub enum LlmMessage {
    /// A request to generate a complete chat response.
    Generate {
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
        /// A channel to send the final `String` result back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
}

/// Messages that can be sent to the crisis interaction recorder.
#[derive(Debug)]
pub enum RecorderMessage {
    /// Persist one interaction. Nobody waits for the outcome.
    Record(CrisisInteraction),
    /// Answered once every message queued before it has been handled.
    Flush { responder: oneshot::Sender<()> },
}
