use repwatch_core::CoreError;
use thiserror::Error;

/// Reasons the engine refuses an input. Empty input and zero divisors are
/// not errors; they resolve to documented zero-state values.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid mention {mention_id}: {source}")]
    InvalidMention {
        mention_id: String,
        #[source]
        source: CoreError,
    },

    #[error("mention {mention_id} belongs to product '{found}', expected '{expected}'")]
    ProductMismatch {
        mention_id: String,
        expected: String,
        found: String,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
