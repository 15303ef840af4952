//! # Envelope Integrity
//!
//! Hash determinism, tamper sensitivity and hash exclusion across the
//! builder, the validator and the router's ingress stage.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use mcp_01_envelope::{
        compute_envelope_hash, validate_envelope, EnvelopeApi, EnvelopeError, EnvelopeParams,
        EnvelopeVerifier, NodeVerifier,
    };
    use mcp_02_routing::RouteTable;
    use mcp_05_router::{RouterApi, RouterStage};
    use shared_types::{
        Envelope, ErrorClass, ErrorCode, Identity, Intent, Layer, RiskLevel, RouteHop,
        SnapshotScope, Subsystem,
    };

    use crate::integration::fixtures::{
        envelope_service, fixed_time, params, router, Recorder, NODE,
    };

    async fn build(params: &EnvelopeParams) -> Envelope {
        let (_, service) = envelope_service();
        service.build(params).await.unwrap()
    }

    fn mutation(f: impl Fn(&mut Envelope) + 'static) -> Box<dyn Fn(&mut Envelope)> {
        Box::new(f)
    }

    fn record_params() -> EnvelopeParams {
        params(
            Layer::Io,
            Subsystem::Landing,
            "LDS.RECORD",
            json!({ "source": "sensor-a", "rows": [1, 2, 3] }),
        )
    }

    // =========================================================================
    // HASH DETERMINISM
    // =========================================================================

    #[tokio::test]
    async fn test_identical_inputs_hash_identically() {
        // Separate engines hold separate keys: signatures differ, hashes do not.
        let first = build(&record_params()).await;
        let second = build(&record_params()).await;

        assert_eq!(first.hash(), second.hash());
        assert_eq!(first.id(), second.id());
        assert_eq!(first.id(), first.hash());
        assert_ne!(first.provenance.signature, second.provenance.signature);
    }

    #[tokio::test]
    async fn test_key_order_does_not_matter() {
        let mut a = record_params();
        a.payload = serde_json::from_str(r#"{"b":1,"a":{"y":2,"x":3}}"#).unwrap();
        let mut b = record_params();
        b.payload = serde_json::from_str(r#"{"a":{"x":3,"y":2},"b":1}"#).unwrap();

        assert_eq!(build(&a).await.hash(), build(&b).await.hash());
    }

    #[tokio::test]
    async fn test_explicit_identifier_keeps_content_hash() {
        let derived = build(&record_params()).await;
        let mut named = record_params();
        named.envelope_id = Some("trace-42".into());
        let named = build(&named).await;

        assert_eq!(named.id(), "trace-42");
        assert_eq!(named.hash(), derived.hash());
    }

    // =========================================================================
    // TAMPER SENSITIVITY
    // =========================================================================

    #[tokio::test]
    async fn test_every_content_mutation_changes_hash() {
        let original = build(&record_params()).await;
        let mutations = vec![
            ("body.payload", mutation(|e| e.body.payload["rows"] = json!([1, 2]))),
            ("body.payloadType", mutation(|e| e.body.payload_type = "LDS.OTHER".into())),
            (
                "header.timestamp",
                mutation(|e| e.header.timestamp += chrono::Duration::seconds(1)),
            ),
            ("header.layer", mutation(|e| e.header.layer = Layer::Agent)),
            ("header.target", mutation(|e| e.header.target = Identity::node("node-2"))),
            (
                "provenance.route",
                mutation(|e| {
                    let hop = RouteHop::from_identity(&Identity::node("node-2"), fixed_time());
                    e.provenance.route.push(hop);
                }),
            ),
            ("safety.riskLevel", mutation(|e| e.safety.risk_level = Some(RiskLevel::High))),
            (
                "safety.snapshotScope",
                mutation(|e| e.safety.snapshot_scope = SnapshotScope::Snapshot("s-1".into())),
            ),
        ];

        for (field, mutate) in mutations {
            let mut tampered = original.clone();
            mutate(&mut tampered);
            assert_ne!(
                compute_envelope_hash(&tampered).unwrap(),
                original.hash(),
                "mutating {field} left the hash unchanged"
            );
            assert!(
                matches!(
                    validate_envelope(&tampered, None),
                    Err(EnvelopeError::HashMismatch { .. })
                ),
                "mutating {field} was not detected"
            );
        }
    }

    // =========================================================================
    // HASH EXCLUSION
    // =========================================================================

    #[tokio::test]
    async fn test_integrity_fields_excluded_from_hash() {
        let original = build(&record_params()).await;

        let mut changed = original.clone();
        changed.header.envelope_id = "renamed".into();
        changed.provenance.hash = "ff".repeat(32);
        changed.provenance.signature = "00".repeat(64);

        assert_eq!(compute_envelope_hash(&changed).unwrap(), original.hash());
    }

    // =========================================================================
    // INGRESS
    // =========================================================================

    #[tokio::test]
    async fn test_ping_without_route_fails_with_no_route() {
        let mut ping = params(Layer::Agent, Subsystem::Router, "TEST.PING", json!({ "n": 1 }));
        ping.route.clear();
        let first = build(&ping).await;
        let second = build(&ping).await;
        assert_eq!(first.hash(), second.hash());

        let recorder = Arc::new(Recorder::default());
        let result = router(&recorder)
            .with_route_table(Arc::new(RouteTable::new()))
            .route_envelope(&first, Subsystem::Router)
            .await;

        assert!(!result.success && !result.halted);
        assert_eq!(result.stage, RouterStage::Ingress);
        let err = result.error.unwrap();
        assert_eq!(err.error_code, ErrorCode::NO_ROUTE);
        assert_eq!(err.error_class, ErrorClass::Routing);
        assert_eq!(err.correlation_id, first.id());
        assert!(recorder.destinations().is_empty());
    }

    #[tokio::test]
    async fn test_foreign_signature_rejected_at_ingress() {
        // Signed by a keyring that does not hold the router's view of NODE.
        let forged = build(&record_params()).await;
        let (keyring, _) = envelope_service();
        let verifier: Arc<dyn EnvelopeVerifier> = Arc::new(NodeVerifier::new(keyring));

        let recorder = Arc::new(Recorder::default());
        let table = RouteTable::new().with_route(
            Layer::Io,
            "LDS.RECORD",
            Subsystem::Transform,
            Intent::DataIngest,
        );
        let result = router(&recorder)
            .with_route_table(Arc::new(table))
            .with_verifier(verifier)
            .route_envelope(&forged, Subsystem::Landing)
            .await;

        assert_eq!(result.stage, RouterStage::Ingress);
        assert_eq!(result.error.unwrap().error_code, ErrorCode::SIGNATURE_INVALID);
        assert!(recorder.destinations().is_empty());
    }

    #[tokio::test]
    async fn test_verified_envelope_routes_and_carries_source() {
        let (keyring, service) = envelope_service();
        let envelope = service.build(&record_params()).await.unwrap();
        let verifier: Arc<dyn EnvelopeVerifier> = Arc::new(NodeVerifier::new(keyring));

        let recorder = Arc::new(Recorder::default());
        let table = RouteTable::new().with_route(
            Layer::Io,
            "LDS.RECORD",
            Subsystem::Transform,
            Intent::DataIngest,
        );
        let result = router(&recorder)
            .with_route_table(Arc::new(table))
            .with_verifier(verifier)
            .route_envelope(&envelope, Subsystem::Landing)
            .await;

        assert!(result.success, "{:?}", result.error);
        assert_eq!(recorder.destinations(), vec![Subsystem::Transform]);
        let delivered = recorder.last().unwrap();
        assert_eq!(delivered.context.caller.node_id, NODE);
        assert_eq!(delivered.context.session_id, envelope.id());
        assert_eq!(delivered.intent, Intent::DataIngest);
    }
}
