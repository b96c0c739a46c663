// Diagnostic types for resolution tracing
// Every resolution returns a step-by-step record of which resolver saw
// which URI and what it answered, for diagnosing misbehaving resolvers.

use serde::{Deserialize, Serialize};

use crate::model::uri::Uri;
use crate::resolver::plugin::PluginError;

/// Full trail of one resolution call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionDiagnostic {
    pub input_uri: Uri,
    pub steps: Vec<StepDiagnostic>,
    /// Travel log of visited URIs, including the offending revisit when a
    /// cycle is detected.
    pub visited: Vec<Uri>,
    pub outcome: DiagnosticOutcome,
}

/// One resolver invocation's contribution to the trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepDiagnostic {
    pub resolver_id: String,
    pub uri: Uri,
    pub action: StepAction,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    NoOpinion,
    PluginFault,
    Redirect,
    ManifestFound,
    ResolverSetChanged,
}

/// Terminal state of the resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticOutcome {
    Found,
    Exhausted,
    ResolverSetSwapped,
    CycleDetected,
    Cancelled,
}

impl ResolutionDiagnostic {
    pub fn new(input_uri: Uri) -> Self {
        Self {
            input_uri,
            steps: Vec::new(),
            visited: Vec::new(),
            outcome: DiagnosticOutcome::Exhausted,
        }
    }

    /// Add a step record to the trail
    pub fn add_step(&mut self, step: StepDiagnostic) {
        self.steps.push(step);
    }

    /// Set the terminal outcome
    pub fn set_outcome(&mut self, outcome: DiagnosticOutcome) {
        self.outcome = outcome;
    }

    /// Set the visited URI log
    pub fn set_visited(&mut self, visited: Vec<Uri>) {
        self.visited = visited;
    }
}

impl StepDiagnostic {
    pub fn no_opinion(resolver_id: &str, uri: Uri) -> Self {
        Self {
            resolver_id: resolver_id.to_string(),
            uri,
            action: StepAction::NoOpinion,
            reason: "no opinion".to_string(),
        }
    }

    pub fn fault(resolver_id: &str, uri: Uri, error: &PluginError) -> Self {
        Self {
            resolver_id: resolver_id.to_string(),
            uri,
            action: StepAction::PluginFault,
            reason: format!("absorbed as no-opinion: {error}"),
        }
    }

    pub fn redirect(resolver_id: &str, uri: Uri, new_uri: &Uri) -> Self {
        Self {
            resolver_id: resolver_id.to_string(),
            uri,
            action: StepAction::Redirect,
            reason: format!("redirected to {new_uri}"),
        }
    }

    pub fn manifest_found(resolver_id: &str, uri: Uri) -> Self {
        Self {
            resolver_id: resolver_id.to_string(),
            uri,
            action: StepAction::ManifestFound,
            reason: "manifest found".to_string(),
        }
    }

    pub fn resolver_set_changed(resolver_id: &str, uri: Uri, new_resolver_uri: &Uri) -> Self {
        Self {
            resolver_id: resolver_id.to_string(),
            uri,
            action: StepAction::ResolverSetChanged,
            reason: format!("resolver set changes via {new_resolver_uri}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(text: &str) -> Uri {
        Uri::parse(text).unwrap()
    }

    #[test]
    fn diagnostic_accumulates_steps_in_order() {
        let mut diagnostic = ResolutionDiagnostic::new(uri("w3://a/1"));
        diagnostic.add_step(StepDiagnostic::no_opinion("r1", uri("w3://a/1")));
        diagnostic.add_step(StepDiagnostic::redirect(
            "r2",
            uri("w3://a/1"),
            &uri("w3://b/1"),
        ));
        diagnostic.set_outcome(DiagnosticOutcome::Found);
        diagnostic.set_visited(vec![uri("w3://a/1"), uri("w3://b/1")]);

        assert_eq!(diagnostic.steps.len(), 2);
        assert_eq!(diagnostic.steps[0].action, StepAction::NoOpinion);
        assert_eq!(diagnostic.steps[1].reason, "redirected to w3://b/1");
        assert_eq!(diagnostic.outcome, DiagnosticOutcome::Found);
    }

    #[test]
    fn diagnostic_serializes_with_snake_case_tags() {
        let step = StepDiagnostic::manifest_found("r1", uri("w3://a/1"));
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["action"], "manifest_found");
        assert_eq!(json["uri"], "w3://a/1");
    }
}
