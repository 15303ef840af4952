//! # Alignment Review
//!
//! Ruling precedence as seen from the router: what gets dispatched, and
//! what stops.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use mcp_04_alignment::{AlignmentActor, ReviewResult};
    use mcp_05_router::{RouterApi, RouterStage, RoutingResult};
    use shared_types::{ErrorCode, Intent, Message, MessagePatch, MessagePayload, Subsystem};

    use crate::integration::fixtures::{message, reviewed_router, router, Recorder};

    fn agent_task() -> Message {
        message(
            Intent::AgentExecution,
            json!({ "taskScope": "wide", "reversible": true }),
        )
    }

    fn narrowing_patch() -> MessagePatch {
        MessagePatch {
            payload: Some(MessagePayload {
                schema: "test.schema".into(),
                schema_version: "1.1.0".into(),
                content: json!({ "taskScope": "narrow", "reversible": true }),
            }),
            ..MessagePatch::default()
        }
    }

    async fn route_task(recorder: &Arc<Recorder>, ruling: ReviewResult) -> RoutingResult {
        reviewed_router(recorder, ruling)
            .route_message(agent_task(), Subsystem::Router, Subsystem::Agents)
            .await
    }

    fn dispatched_scope(recorder: &Recorder) -> Option<Value> {
        recorder
            .last()
            .map(|m| m.payload.content["taskScope"].clone())
    }

    #[tokio::test]
    async fn test_halt_wins_over_modifications() {
        let recorder = Arc::new(Recorder::default());
        let ruling = ReviewResult {
            modifications: Some(narrowing_patch()),
            ..ReviewResult::halt("unsafe task")
        };

        let result = route_task(&recorder, ruling).await;

        assert!(result.halted && !result.success);
        assert_eq!(result.stage, RouterStage::AlignmentReview);
        assert_eq!(result.error.unwrap().error_code, ErrorCode::MEDIATOR_HALT);
        assert_eq!(result.alignment.unwrap().actor, AlignmentActor::Mediator);
        assert!(recorder.destinations().is_empty());
    }

    #[tokio::test]
    async fn test_judge_modification_dispatched() {
        let recorder = Arc::new(Recorder::default());
        let result = route_task(
            &recorder,
            ReviewResult::modify(narrowing_patch(), "scope too wide").with_ruling("narrowed"),
        )
        .await;

        assert!(result.success, "{:?}", result.error);
        assert_eq!(recorder.destinations(), vec![Subsystem::Agents]);
        assert_eq!(dispatched_scope(&recorder), Some(json!("narrow")));
        assert_eq!(
            result.message.unwrap().payload.content["taskScope"],
            json!("narrow")
        );
        let review = result.alignment.unwrap();
        assert_eq!(review.actor, AlignmentActor::Judge);
        assert_eq!(review.ruling.as_deref(), Some("narrowed"));
    }

    #[tokio::test]
    async fn test_judge_rejection_halts() {
        let recorder = Arc::new(Recorder::default());
        let result = route_task(&recorder, ReviewResult::reject("not today")).await;

        assert!(result.halted);
        assert_eq!(result.stage, RouterStage::AlignmentReview);
        assert_eq!(result.error.unwrap().error_code, ErrorCode::JUDGE_REJECTED);
        assert!(recorder.destinations().is_empty());
    }

    #[tokio::test]
    async fn test_empty_patch_counts_as_rejection() {
        let recorder = Arc::new(Recorder::default());
        let result =
            route_task(&recorder, ReviewResult::modify(MessagePatch::default(), "no-op")).await;

        assert!(result.halted);
        assert_eq!(result.error.unwrap().error_code, ErrorCode::JUDGE_REJECTED);
    }

    #[tokio::test]
    async fn test_approval_dispatches_unchanged() {
        let recorder = Arc::new(Recorder::default());
        let result = route_task(&recorder, ReviewResult::approve("fine")).await;

        assert!(result.success);
        assert_eq!(dispatched_scope(&recorder), Some(json!("wide")));
        assert_eq!(recorder.last().unwrap(), agent_task());
    }

    #[tokio::test]
    async fn test_unreviewed_route_skips_reviewer() {
        let recorder = Arc::new(Recorder::default());
        let result = reviewed_router(&recorder, ReviewResult::halt("never consulted"))
            .route_message(
                message(Intent::ProjectionGeneration, json!({ "view": "summary" })),
                Subsystem::Router,
                Subsystem::Projections,
            )
            .await;

        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.alignment.unwrap().actor, AlignmentActor::Actor);
        assert_eq!(recorder.destinations(), vec![Subsystem::Projections]);
    }

    #[tokio::test]
    async fn test_default_reviewer_fails_closed() {
        let recorder = Arc::new(Recorder::default());
        let result = router(&recorder)
            .route_message(agent_task(), Subsystem::Router, Subsystem::Agents)
            .await;

        assert!(result.halted);
        assert_eq!(result.stage, RouterStage::AlignmentReview);
        assert!(recorder.destinations().is_empty());
    }
}
