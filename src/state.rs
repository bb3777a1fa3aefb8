//! Page load state and request generation tracking.

use crate::error::ShopError;

/// Why a page could not show its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// The request succeeded but carried no record.
    NotFound,
    /// Transport, HTTP status, or decoding failure.
    Failed(String),
}

/// Every error is a failed load. Not-found comes from an empty `Ok`
/// response, never from an error.
impl From<&ShopError> for LoadFailure {
    fn from(e: &ShopError) -> Self {
        LoadFailure::Failed(e.to_string())
    }
}

/// Single tagged state consumed by every page renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Error(LoadFailure),
    Ready(T),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Error(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LoadFailure> {
        match self {
            LoadState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LoadState<U> {
        match self {
            LoadState::Loading => LoadState::Loading,
            LoadState::Error(e) => LoadState::Error(e),
            LoadState::Ready(v) => LoadState::Ready(f(v)),
        }
    }
}

impl<T> From<crate::error::Result<T>> for LoadState<T> {
    fn from(result: crate::error::Result<T>) -> Self {
        match result {
            Ok(v) => LoadState::Ready(v),
            Err(e) => LoadState::Error(LoadFailure::from(&e)),
        }
    }
}

// ---------------------------------------------------------------------------
// Request generations
// ---------------------------------------------------------------------------

/// Handle for one outstanding load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub key: String,
}

/// Hands out increasing generations so only the latest response is applied.
#[derive(Debug, Default)]
pub struct RequestTracker {
    current: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn begin(&mut self, key: impl Into<String>) -> LoadTicket {
        self.current += 1;
        LoadTicket {
            generation: self.current,
            key: key.into(),
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.current
    }

    pub fn current(&self) -> u64 {
        self.current
    }
}
