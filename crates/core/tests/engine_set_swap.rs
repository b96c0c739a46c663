// Resolver-set swap flow
// The engine hands control back on ResolverSetChanged; the caller rebuilds
// a registry from the aggregator manifest and re-enters with the visited
// log seeded, so cycle detection spans the whole chain.

use pretty_assertions::assert_eq;

use reso_core::model::manifest;
use reso_core::model::uri::Uri;
use reso_core::registry::{RegistryError, RegistrySource, ResolverRegistry};
use reso_core::resolver::context::ResolutionRequest;
use reso_core::resolver::diagnostics::DiagnosticOutcome;
use reso_core::resolver::engine::{resolve, Resolution, ResolutionError};
use test_plugins::{manifest_json, ScriptedResolver, StaticRegistrySource};

fn uri(text: &str) -> Uri {
    Uri::parse(text).unwrap()
}

#[tokio::test]
async fn set_change_hands_control_back_with_uri_unchanged() {
    let gate = ScriptedResolver::new("gate")
        .set_change("w3://a/pkg", "w3://ens/new-agg.eth")
        .into_handle();
    let registry = ResolverRegistry::new(vec![gate]).unwrap();

    let outcome = resolve(ResolutionRequest::new(uri("w3://a/pkg")), &registry)
        .await
        .unwrap();

    match outcome {
        Resolution::ResolverSetSwapped {
            current_uri,
            new_resolver_uri,
            visited,
            diagnostic,
        } => {
            assert_eq!(current_uri, uri("w3://a/pkg"));
            assert_eq!(new_resolver_uri, uri("w3://ens/new-agg.eth"));
            assert_eq!(visited, vec![uri("w3://a/pkg")]);
            assert_eq!(diagnostic.outcome, DiagnosticOutcome::ResolverSetSwapped);
        }
        other => panic!("expected ResolverSetSwapped, got {other:?}"),
    }
}

#[tokio::test]
async fn swap_then_resume_completes_resolution() {
    // First registry: only a gate that demands a new resolver set.
    let gate = ScriptedResolver::new("gate")
        .set_change("w3://a/pkg", "w3://ens/new-agg.eth")
        .into_handle();
    let first = ResolverRegistry::new(vec![gate]).unwrap();

    // The replacement set, staged behind the registry construction boundary.
    let replacement = ResolverRegistry::new(vec![ScriptedResolver::new("fresh")
        .manifest("w3://a/pkg", r#"{"name":"pkg"}"#)
        .into_handle()])
    .unwrap();
    let source = StaticRegistrySource::new().with_registry("new-agg", replacement);

    let (current_uri, visited) =
        match resolve(ResolutionRequest::new(uri("w3://a/pkg")), &first)
            .await
            .unwrap()
        {
            Resolution::ResolverSetSwapped {
                current_uri,
                visited,
                ..
            } => (current_uri, visited),
            other => panic!("expected ResolverSetSwapped, got {other:?}"),
        };

    // Caller-side: fetch and validate the aggregator manifest, then build
    // the wholesale-replacement registry from it.
    let agg_manifest =
        manifest::deserialize(&manifest_json("new-agg", "1.0.0", &["w3://ipfs/QmFresh"])).unwrap();
    let rebuilt = source.registry_for(&agg_manifest).unwrap();

    let outcome = resolve(ResolutionRequest::resumed(current_uri, visited), &rebuilt)
        .await
        .unwrap();

    match outcome {
        Resolution::Found {
            uri: found_uri,
            resolver_id,
            ..
        } => {
            assert_eq!(found_uri, uri("w3://a/pkg"));
            assert_eq!(resolver_id, "fresh");
        }
        other => panic!("expected Found, got {other:?}"),
    }
}

#[tokio::test]
async fn cycle_detection_spans_the_swap() {
    // Before the swap: a/1 redirected to a/2, then the set changes.
    let first = ResolverRegistry::new(vec![
        ScriptedResolver::new("hop")
            .redirect("w3://a/1", "w3://a/2")
            .into_handle(),
        ScriptedResolver::new("gate")
            .set_change("w3://a/2", "w3://ens/new-agg.eth")
            .into_handle(),
    ])
    .unwrap();

    let (current_uri, visited) = match resolve(ResolutionRequest::new(uri("w3://a/1")), &first)
        .await
        .unwrap()
    {
        Resolution::ResolverSetSwapped {
            current_uri,
            visited,
            ..
        } => (current_uri, visited),
        other => panic!("expected ResolverSetSwapped, got {other:?}"),
    };
    assert_eq!(visited, vec![uri("w3://a/1"), uri("w3://a/2")]);

    // After the swap: the new set redirects back to a URI visited before it.
    let rebuilt = ResolverRegistry::new(vec![ScriptedResolver::new("back")
        .redirect("w3://a/2", "w3://a/1")
        .into_handle()])
    .unwrap();

    let error = resolve(ResolutionRequest::resumed(current_uri, visited), &rebuilt)
        .await
        .unwrap_err();

    match error {
        ResolutionError::CycleDetected { uri: cycle_uri, .. } => {
            assert_eq!(cycle_uri, uri("w3://a/1"));
        }
        other => panic!("expected CycleDetected, got {other:?}"),
    }
}

#[tokio::test]
async fn manifest_without_resolvers_cannot_build_a_registry() {
    let source = StaticRegistrySource::new();
    let empty = manifest::deserialize(&manifest_json("bare", "1.0.0", &[])).unwrap();

    let error = source.registry_for(&empty).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<RegistryError>(),
        Some(RegistryError::EmptyResolverList { name }) if name.as_str() == "bare"
    ));
}
