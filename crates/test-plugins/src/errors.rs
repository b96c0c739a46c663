use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Failed to lock call trace mutex: {message}")]
    LockPoisoned { message: String },
}
