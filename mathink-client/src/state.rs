//! Per-screen request state.

use crate::error::{ClientError, ClientResult};

/// Lifecycle of a single user-initiated request.
///
/// A screen holds one of these per action. `begin` refuses to start while a
/// request is loading, so repeated taps never issue duplicate calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState<T> {
    /// Nothing requested yet, or reset.
    #[default]
    Idle,
    /// A request is running.
    Loading,
    /// The last request succeeded.
    Ready(T),
    /// The last request failed with this user-facing message.
    Failed(String),
}

impl<T> RequestState<T> {
    /// Move to `Loading`, discarding any previous result or error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InProgress`] and changes nothing if a request
    /// is already loading.
    pub fn begin(&mut self) -> ClientResult<()> {
        if self.is_loading() {
            tracing::debug!("Ignoring request: one is already loading");
            return Err(ClientError::InProgress);
        }
        *self = Self::Loading;
        Ok(())
    }

    /// Record the outcome of the running request.
    pub fn finish(&mut self, outcome: ClientResult<T>) {
        *self = match outcome {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                tracing::warn!("Request failed: {e}");
                Self::Failed(e.user_message())
            }
        };
    }

    /// Whether a request is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The last successful result.
    #[must_use]
    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The last error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Return to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
