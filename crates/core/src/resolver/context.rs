// Resolution context types
// Defines the ResolutionRequest input and per-call engine state

use crate::model::uri::Uri;

/// Input to the resolution engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub uri: Uri,
    /// URIs already visited by an earlier engine run. Carried across a
    /// resolver-set swap so cycle detection spans the whole redirect chain,
    /// not just the current registry's portion of it.
    pub prior_visited: Vec<Uri>,
}

impl ResolutionRequest {
    pub fn new(uri: Uri) -> Self {
        Self {
            uri,
            prior_visited: Vec::new(),
        }
    }

    /// Re-enter resolution after a resolver-set swap, keeping the visited
    /// log from the interrupted run.
    pub fn resumed(uri: Uri, prior_visited: Vec<Uri>) -> Self {
        Self { uri, prior_visited }
    }
}

/// Engine state for one resolution call. Never shared between calls.
#[derive(Debug)]
pub(crate) struct EngineState {
    pub current_uri: Uri,
    pub cursor: usize,
    pub visited: Vec<Uri>,
}

impl EngineState {
    pub fn from_request(request: &ResolutionRequest) -> Self {
        let mut visited = request.prior_visited.clone();
        if !visited.contains(&request.uri) {
            visited.push(request.uri.clone());
        }
        Self {
            current_uri: request.uri.clone(),
            cursor: 0,
            visited,
        }
    }

    /// Record a redirect hop. Returns false when `new_uri` was already
    /// visited; the hop is still appended to the log so the full travel
    /// sequence, including the offending revisit, is observable.
    pub fn record_redirect(&mut self, new_uri: Uri) -> bool {
        if self.visited.contains(&new_uri) {
            self.visited.push(new_uri);
            return false;
        }
        self.visited.push(new_uri.clone());
        self.current_uri = new_uri;
        self.cursor = 0;
        true
    }
}
