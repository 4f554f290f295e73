//! Lifecycle error types.

use std::time::Duration;
use thiserror::Error;

/// Failure to bring a preset's container to a usable state.
#[derive(Error, Debug)]
pub enum LifecycleError<E: std::error::Error + 'static> {
    /// The healthcheck never succeeded within the wait budget.
    #[error("container not healthy after {waited:?}{}", last_error_suffix(.last_error))]
    Timeout {
        waited: Duration,
        #[source]
        last_error: Option<E>,
    },

    /// The init routine failed. Never retried.
    #[error("container init failed: {0}")]
    Init(#[source] E),
}

fn last_error_suffix<E: std::fmt::Display>(last_error: &Option<E>) -> String {
    match last_error {
        Some(e) => format!(": {}", e),
        None => String::new(),
    }
}

impl<E: std::error::Error + 'static> LifecycleError<E> {
    /// The preset error behind this failure, if any.
    pub fn preset_error(&self) -> Option<&E> {
        match self {
            LifecycleError::Timeout { last_error, .. } => last_error.as_ref(),
            LifecycleError::Init(e) => Some(e),
        }
    }
}
