//! Background actors: the language model client and the crisis interaction recorder.

pub mod llm;
pub mod messages;
pub mod recorder;
pub mod traits;

pub use llm::LlmActorHandle;
pub use recorder::{RecorderHandle, SqliteInteractionStore};
pub use traits::{InteractionStore, LlmActor};
