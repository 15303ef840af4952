//! # Routing Policy
//!
//! The legal routing graph and the constitutional constraints, checked
//! directly and through the router.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use mcp_02_routing::{is_legal_route, legal_route, LEGAL_ROUTES};
    use mcp_03_constraints::{ConstraintPolicy, ConstraintRules, ConstraintValidator, ViolationKind};
    use mcp_05_router::{RouterApi, RouterStage};
    use shared_types::{ErrorCode, Identity, Intent, RouteHop, Subsystem};

    use crate::integration::fixtures::{fixed_time, message, router, Recorder, NODE};

    fn validator() -> ConstraintValidator {
        ConstraintValidator::new(ConstraintRules::default().with_local_node(NODE))
    }

    // =========================================================================
    // LEGAL ROUTING GRAPH
    // =========================================================================

    #[test]
    fn test_only_listed_routes_are_legal() {
        for from in Subsystem::ALL {
            for to in Subsystem::ALL {
                for intent in Intent::ALL {
                    let listed = LEGAL_ROUTES
                        .iter()
                        .any(|r| r.from == from && r.to == to && r.intents.contains(&intent));
                    assert_eq!(
                        is_legal_route(from, to, intent),
                        listed,
                        "{from} -> {to} ({intent})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_agents_never_reach_graph() {
        assert!(legal_route(Subsystem::Agents, Subsystem::KnowledgeGraph).is_none());
        for intent in Intent::ALL {
            assert!(!is_legal_route(Subsystem::Agents, Subsystem::KnowledgeGraph, intent));
        }
    }

    #[test]
    fn test_routes_are_asymmetric() {
        assert!(is_legal_route(Subsystem::Landing, Subsystem::Transform, Intent::DataIngest));
        assert!(!is_legal_route(Subsystem::Transform, Subsystem::Landing, Intent::DataIngest));
    }

    #[tokio::test]
    async fn test_router_refuses_every_unlisted_route() {
        let recorder = Arc::new(Recorder::default());
        let router = router(&recorder);

        for from in Subsystem::ALL {
            for to in Subsystem::ALL {
                for intent in Intent::ALL {
                    if is_legal_route(from, to, intent) {
                        continue;
                    }
                    let result = router
                        .route_message(message(intent, json!({ "reversible": true })), from, to)
                        .await;
                    assert_eq!(result.stage, RouterStage::RouteCheck, "{from} -> {to}");
                    assert!(!result.halted);
                    assert_eq!(result.error.unwrap().error_code, ErrorCode::ILLEGAL_ROUTE);
                }
            }
        }
        assert!(recorder.destinations().is_empty());
    }

    // =========================================================================
    // CONSTITUTIONAL CONSTRAINTS
    // =========================================================================

    #[tokio::test]
    async fn test_all_violations_reported_together() {
        let mut msg = message(
            Intent::Update,
            json!({ "force": true, "override": "policy", "reversible": false }),
        );
        msg.context.caller = Identity::module("node-9", "FEDERATION");
        msg.context.provenance.clear();

        let report = validator().evaluate(&msg, Subsystem::Federation, Subsystem::Router);
        assert!(!report.valid);
        assert_eq!(
            report.violations,
            vec![
                ViolationKind::NonCoercion,
                ViolationKind::Locality,
                ViolationKind::Reversibility,
                ViolationKind::Observability,
            ]
        );

        let recorder = Arc::new(Recorder::default());
        let result = router(&recorder)
            .route_message(msg, Subsystem::Federation, Subsystem::Router)
            .await;
        assert!(result.halted);
        assert_eq!(result.stage, RouterStage::ConstraintCheck);
        assert_eq!(result.constraints.unwrap().violations.len(), 4);
        let err = result.error.unwrap();
        assert_eq!(err.error_code, ErrorCode::NON_COERCION);
        assert_eq!(err.details.unwrap()["violations"].as_array().unwrap().len(), 4);
        assert!(recorder.destinations().is_empty());
    }

    #[test]
    fn test_local_caller_may_override() {
        let msg = message(Intent::Update, json!({ "override": "policy", "reversible": true }));
        let report = validator().evaluate(&msg, Subsystem::Federation, Subsystem::Router);
        assert!(report.valid, "{:?}", report.violations);
    }

    #[test]
    fn test_constitutional_change_exempt_from_reversibility() {
        let validator = validator();
        let check = |content| {
            let msg = message(Intent::KgMutationProposal, content);
            validator.evaluate(&msg, Subsystem::Router, Subsystem::KnowledgeGraph)
        };

        assert!(check(json!({ "constitutional": true })).valid);
        assert!(check(json!({ "reversible": true })).valid);
        assert!(check(json!({})).has(ViolationKind::Reversibility));
        // Only a literal boolean counts.
        assert!(check(json!({ "reversible": "true" })).has(ViolationKind::Reversibility));
    }

    #[tokio::test]
    async fn test_missing_provenance_halts_routing() {
        let mut msg = message(Intent::Query, json!({ "q": "nodes" }));
        msg.context.provenance.clear();

        let report = validator().evaluate(&msg, Subsystem::Router, Subsystem::KnowledgeGraph);
        assert_eq!(report.violations, vec![ViolationKind::Observability]);

        let recorder = Arc::new(Recorder::default());
        let result = router(&recorder)
            .route_message(msg.clone(), Subsystem::Router, Subsystem::KnowledgeGraph)
            .await;
        assert!(result.halted);
        assert_eq!(result.stage, RouterStage::ConstraintCheck);
        assert_eq!(result.error.unwrap().error_code, ErrorCode::OBSERVABILITY);
        assert!(recorder.destinations().is_empty());

        // The same message with a hop goes through.
        msg.context
            .provenance
            .push(RouteHop::from_identity(&msg.context.caller, fixed_time()));
        let result = router(&recorder)
            .route_message(msg, Subsystem::Router, Subsystem::KnowledgeGraph)
            .await;
        assert!(result.success, "{:?}", result.error);
        assert_eq!(recorder.destinations(), vec![Subsystem::KnowledgeGraph]);
    }
}
