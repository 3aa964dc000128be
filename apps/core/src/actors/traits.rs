use crate::actors::messages::AppError;
use crate::crisis::CrisisInteraction;
use async_trait::async_trait;

/// Defines the public interface for an LLM (Large Language Model) actor.
///
/// This trait abstracts the specific implementation of the LLM, allowing a remote API
/// or a test double to be used interchangeably.
#[async_trait]
pub trait LlmActor: Send + Sync + 'static {
    /// Generates a complete text response based on a prompt and optional parameters.
    async fn generate_with_params(
        &self,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
    ) -> Result<String, AppError>;
}

/// Storage behind the crisis interaction recorder.
#[async_trait]
pub trait InteractionStore: Send + Sync + 'static {
    async fn record(&self, interaction: &CrisisInteraction) -> Result<(), AppError>;
}
