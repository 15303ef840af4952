//! # Node Flow
//!
//! A fully wired node writing to a file log: sample traffic, restart, and
//! the persisted chain surviving the restart.

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use mcp_01_envelope::EnvelopeApi;
    use mcp_05_router::{RouterApi, RouterStage};
    use mcp_07_log_store::{EnvelopeLog, LogCursor};
    use node_runtime::{NodeConfig, NodeRuntime};
    use shared_types::{ErrorCode, Layer, Subsystem, ERROR_PAYLOAD_TYPE};

    fn config(log_path: &Path) -> NodeConfig {
        NodeConfig {
            node_id: "node-7".into(),
            log_path: log_path.to_path_buf(),
            ..NodeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_sample_traffic_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("envelopes.jsonl");

        let logged_ids: Vec<String> = {
            let runtime = NodeRuntime::new(config(&path)).unwrap();
            let deliveries = runtime.run_sample_traffic().await.unwrap();
            runtime.shutdown().unwrap();

            deliveries
                .iter()
                .filter(|d| d.result.success)
                .map(|d| d.envelope.id().to_string())
                .collect()
        };
        assert_eq!(logged_ids.len(), 3);

        let runtime = NodeRuntime::new(config(&path)).unwrap();
        let log = runtime.container().log.clone();
        assert_eq!(log.len(), 3);
        assert!(log.verify().is_ok());
        let persisted: Vec<String> = log
            .get_since(LogCursor::default())
            .iter()
            .map(|e| e.envelope.id().to_string())
            .collect();
        assert_eq!(persisted, logged_ids);
    }

    #[tokio::test]
    async fn test_restarted_node_rejects_stale_signatures() {
        // Keys are generated per process start, so an envelope signed before
        // a restart no longer verifies afterwards.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.jsonl");

        let stale = {
            let runtime = NodeRuntime::new(config(&path)).unwrap();
            let delivery = runtime
                .submit(
                    runtime.params(
                        Layer::Io,
                        Subsystem::Landing,
                        Subsystem::Transform,
                        "LDS.RECORD",
                        json!({ "rows": 1 }),
                    ),
                    Subsystem::Landing,
                )
                .await
                .unwrap();
            assert!(delivery.result.success);
            delivery.envelope
        };

        let runtime = NodeRuntime::new(config(&path)).unwrap();
        let container = runtime.container();
        let result = container
            .router
            .route_envelope(&stale, Subsystem::Landing)
            .await;

        assert_eq!(result.stage, RouterStage::Ingress);
        assert_eq!(result.error.unwrap().error_code, ErrorCode::SIGNATURE_INVALID);
        assert_eq!(container.log.len(), 1);
    }

    #[tokio::test]
    async fn test_seeded_node_key_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.jsonl");
        let key_file = dir.path().join("node.key");
        std::fs::write(&key_file, "07".repeat(32)).unwrap();
        let seeded = NodeConfig {
            node_key_file: Some(key_file),
            ..config(&path)
        };

        let earlier = {
            let runtime = NodeRuntime::new(seeded.clone()).unwrap();
            let delivery = runtime
                .submit(
                    runtime.params(
                        Layer::Io,
                        Subsystem::Landing,
                        Subsystem::Transform,
                        "LDS.RECORD",
                        json!({ "rows": 2 }),
                    ),
                    Subsystem::Landing,
                )
                .await
                .unwrap();
            assert!(delivery.result.success);
            delivery.envelope
        };

        let runtime = NodeRuntime::new(seeded).unwrap();
        let container = runtime.container();
        assert!(container.envelopes.validate(&earlier).is_ok());
        let result = container
            .router
            .route_envelope(&earlier, Subsystem::Landing)
            .await;
        assert!(result.success, "{:?}", result.error);
        assert_eq!(container.log.len(), 2);
    }

    #[tokio::test]
    async fn test_every_failure_gets_a_verifiable_reply() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = NodeRuntime::new(config(&dir.path().join("envelopes.jsonl"))).unwrap();
        let deliveries = runtime.run_sample_traffic().await.unwrap();
        let envelopes = runtime.container().envelopes.clone();

        for delivery in deliveries.iter().filter(|d| !d.result.success) {
            let reply = delivery.reply.as_ref().unwrap();
            assert_eq!(reply.body.payload_type, ERROR_PAYLOAD_TYPE);
            assert_eq!(
                reply.body.payload["correlationId"],
                json!(delivery.envelope.id())
            );
            assert!(envelopes.validate(reply).is_ok());
        }
        assert_eq!(deliveries.iter().filter(|d| d.reply.is_some()).count(), 2);
    }

    #[tokio::test]
    async fn test_second_node_on_same_log_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.jsonl");

        let _first = NodeRuntime::new(config(&path)).unwrap();
        assert!(NodeRuntime::new(config(&path)).is_err());
    }
}
