use thiserror::Error;

/// Typed failures a store reports through `anyhow::Error`; callers
/// recover them with `downcast_ref`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conflict: {0}")]
    Conflict(String),
}

pub fn is_conflict(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Conflict(_)))
}
