// Shared call trace for asserting which resolver saw which URI, and how
// often, across a resolution run.

use std::sync::{Arc, Mutex};

use crate::errors::TraceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub resolver_id: String,
    pub uri: String,
}

/// Clonable recorder shared between test plugins and assertions.
#[derive(Debug, Clone, Default)]
pub struct CallTrace {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl CallTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, resolver_id: &str, uri: &str) -> Result<(), TraceError> {
        let mut calls = self.calls.lock().map_err(|e| TraceError::LockPoisoned {
            message: e.to_string(),
        })?;
        calls.push(RecordedCall {
            resolver_id: resolver_id.to_string(),
            uri: uri.to_string(),
        });
        Ok(())
    }

    pub fn calls(&self) -> Result<Vec<RecordedCall>, TraceError> {
        let calls = self.calls.lock().map_err(|e| TraceError::LockPoisoned {
            message: e.to_string(),
        })?;
        Ok(calls.clone())
    }

    /// Number of invocations recorded for one resolver id.
    pub fn count_for(&self, resolver_id: &str) -> Result<usize, TraceError> {
        Ok(self
            .calls()?
            .iter()
            .filter(|call| call.resolver_id == resolver_id)
            .count())
    }
}
