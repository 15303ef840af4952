//! # Federation
//!
//! Handshake negotiation on its own, and carried end to end as a signed
//! federation-layer envelope.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mcp_01_envelope::EnvelopeApi;
    use mcp_02_routing::RouteTable;
    use mcp_05_router::{RouterApi, RouterStage, RoutingResult};
    use mcp_06_federation::{
        handshake_envelope_params, perform_handshake, AgreedSyncType, AutonomyLevel,
        FederationError, FederationService, HandshakeRequest, NodeCapabilities, NodeRole,
        SyncCapability, SyncType, HANDSHAKE_PAYLOAD_TYPE,
    };
    use node_runtime::adapters::LoopbackFederation;
    use shared_types::{ErrorCode, Identity, Intent, Layer, RouteHop, Subsystem};

    use crate::integration::fixtures::{
        envelope_service, fixed_time, module, ports, router_over, Recorder, NODE,
    };

    const PEER: &str = "node-2";

    fn declaration(node: &str, intents: &[Intent], autonomy: AutonomyLevel) -> NodeCapabilities {
        NodeCapabilities {
            node_id: node.into(),
            supported_intents: intents.to_vec(),
            alignment_compatible: true,
            autonomy_level: autonomy,
            sync_capabilities: vec![
                SyncCapability::new("patterns", SyncType::Full),
                SyncCapability::new("rules", SyncType::Partial),
                SyncCapability::new("notes", SyncType::Voluntary),
            ],
        }
    }

    fn request(requesting: NodeCapabilities) -> HandshakeRequest {
        HandshakeRequest {
            requesting_node: Identity::node(requesting.node_id.clone()),
            requesting_capabilities: requesting,
            target_node: Identity::node(PEER),
        }
    }

    fn ours() -> NodeCapabilities {
        declaration(
            NODE,
            &[Intent::Update, Intent::Query, Intent::FederationHandshake],
            AutonomyLevel::Full,
        )
    }

    fn peer() -> NodeCapabilities {
        declaration(
            PEER,
            &[Intent::FederationHandshake, Intent::Query],
            AutonomyLevel::Partial,
        )
    }

    // =========================================================================
    // NEGOTIATION
    // =========================================================================

    #[test]
    fn test_full_sync_excluded_even_when_both_offer_it() {
        let outcome = perform_handshake(&request(ours()), &peer()).unwrap();

        let agreed = &outcome.negotiated_capabilities;
        assert_eq!(
            agreed.supported_intents,
            vec![Intent::Query, Intent::FederationHandshake]
        );
        assert_eq!(agreed.autonomy_level, AutonomyLevel::Partial);
        let sync: Vec<(&str, AgreedSyncType)> = agreed
            .sync_capabilities
            .iter()
            .map(|s| (s.resource.as_str(), s.sync_type))
            .collect();
        assert_eq!(
            sync,
            vec![("rules", AgreedSyncType::Partial), ("notes", AgreedSyncType::Voluntary)]
        );
        assert_eq!(outcome.sync_agreement.resources, vec!["rules", "notes"]);
        assert!(outcome.sync_agreement.voluntary);
    }

    #[test]
    fn test_surrendered_autonomy_refused() {
        let mut captive = ours();
        captive.autonomy_level = AutonomyLevel::None;

        let err = perform_handshake(&request(captive), &peer()).unwrap_err();
        assert_eq!(err, FederationError::AutonomySurrendered);
        assert_eq!(err.code(), ErrorCode::FEDERATION_INCOMPATIBLE);
    }

    #[test]
    fn test_reserved_identity_refused() {
        let mut req = request(ours());
        req.requesting_node = Identity::node("local");

        let err = perform_handshake(&req, &peer()).unwrap_err();
        assert!(matches!(
            err,
            FederationError::IdentityRejected {
                role: NodeRole::Requesting,
                ..
            }
        ));
        assert_eq!(err.code(), ErrorCode::IDENTITY_REJECTED);
    }

    // =========================================================================
    // OVER THE ROUTER
    // =========================================================================

    async fn route_handshake(
        peer_declaration: NodeCapabilities,
    ) -> (Arc<LoopbackFederation>, RoutingResult) {
        let loopback = Arc::new(LoopbackFederation::new(FederationService::new(
            peer_declaration,
        )));
        let recorder = Arc::new(Recorder::default());
        let mut wired = ports(&recorder);
        wired.federation = loopback.clone();

        let table = RouteTable::new().with_route(
            Layer::Federation,
            HANDSHAKE_PAYLOAD_TYPE,
            Subsystem::Federation,
            Intent::FederationHandshake,
        );
        let router = router_over(wired).with_route_table(Arc::new(table));

        let source = module(Subsystem::Router);
        let mut params = handshake_envelope_params(&request(ours()), source.clone(), fixed_time())
            .unwrap();
        params.route.push(RouteHop::from_identity(&source, fixed_time()));
        let (_, service) = envelope_service();
        let envelope = service.build(&params).await.unwrap();
        assert_eq!(envelope.header.layer, Layer::Federation);

        let result = router.route_envelope(&envelope, Subsystem::Router).await;
        (loopback, result)
    }

    #[tokio::test]
    async fn test_handshake_envelope_reaches_peer() {
        let (loopback, result) = route_handshake(peer()).await;

        assert!(result.success, "{:?}", result.error);
        let agreements = loopback.agreements();
        assert_eq!(agreements.len(), 1);
        assert_eq!(agreements[0].negotiated_capabilities.node_id, NODE);
        assert_eq!(agreements[0].sync_agreement.resources, vec!["rules", "notes"]);
    }

    #[tokio::test]
    async fn test_incompatible_peer_fails_dispatch() {
        let mut unaligned = peer();
        unaligned.alignment_compatible = false;

        let (loopback, result) = route_handshake(unaligned).await;

        assert!(!result.success && !result.halted);
        assert_eq!(result.stage, RouterStage::Dispatch);
        let err = result.error.unwrap();
        assert_eq!(err.error_code, ErrorCode::DISPATCH_FAILED);
        assert!(err.message.contains("Alignment compatibility"), "{}", err.message);
        assert!(loopback.agreements().is_empty());
    }
}
