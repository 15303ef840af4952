//! # Log Chain
//!
//! Routed envelopes land in a file-backed, hash-chained log that refuses to
//! reopen over any edit to its history.

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use serde_json::{json, Value};

    use mcp_01_envelope::{parse_envelope, EnvelopeApi};
    use mcp_02_routing::RouteTable;
    use mcp_05_router::{Router, RouterApi};
    use mcp_07_log_store::{compute_entry_hash, EnvelopeLog, LogCursor, LogError, LogStore};
    use shared_types::{Envelope, Intent, Layer, Subsystem};

    use crate::integration::fixtures::{envelope_service, params, router, Recorder};

    fn logged_router(recorder: &Arc<Recorder>, log: Arc<LogStore>) -> Router {
        let table = RouteTable::new().with_route(
            Layer::Io,
            "LDS.RECORD",
            Subsystem::Transform,
            Intent::DataIngest,
        );
        router(recorder)
            .with_route_table(Arc::new(table))
            .with_log(log)
    }

    async fn record(n: u64) -> Envelope {
        let (_, service) = envelope_service();
        service
            .build(&params(
                Layer::Io,
                Subsystem::Landing,
                "LDS.RECORD",
                json!({ "batch": n }),
            ))
            .await
            .unwrap()
    }

    /// Routes three records into a log at `path` and closes it.
    async fn seed(path: &Path) -> Vec<Envelope> {
        let log = Arc::new(LogStore::open_file(path).unwrap());
        let recorder = Arc::new(Recorder::default());
        let router = logged_router(&recorder, log);

        let mut sent = Vec::new();
        for n in 0..3 {
            let envelope = record(n).await;
            let result = router.route_envelope(&envelope, Subsystem::Landing).await;
            assert!(result.success, "{:?}", result.error);
            assert_eq!(result.receipt.unwrap().index, n);
            sent.push(envelope);
        }
        sent
    }

    fn field_edit(f: impl Fn(&mut Value) + 'static) -> Box<dyn Fn(&mut Value)> {
        Box::new(f)
    }

    fn rewrite_line(path: &Path, line: usize, edit: impl Fn(&mut Value)) -> PathBuf {
        let text = std::fs::read_to_string(path).unwrap();
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        let mut entry: Value = serde_json::from_str(&lines[line]).unwrap();
        edit(&mut entry);
        lines[line] = serde_json::to_string(&entry).unwrap();

        let copy = path.with_extension("tampered.jsonl");
        std::fs::write(&copy, lines.join("\n") + "\n").unwrap();
        copy
    }

    #[tokio::test]
    async fn test_routed_envelopes_form_a_chain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.jsonl");
        let sent = seed(&path).await;

        let log = LogStore::open_file(&path).unwrap();
        let entries = log.entries();
        assert_eq!(entries.len(), 3);

        let mut prev: Option<String> = None;
        for (entry, envelope) in entries.iter().zip(&sent) {
            assert_eq!(&entry.envelope, envelope);
            assert_eq!(entry.prev_hash, prev);
            let recomputed = compute_entry_hash(
                entry.index,
                &entry.timestamp,
                &entry.envelope,
                entry.prev_hash.as_deref(),
            )
            .unwrap();
            assert_eq!(recomputed, entry.hash);
            prev = Some(entry.hash.clone());
        }
        assert_eq!(log.head_hash(), prev);
        assert_eq!(log.get_by_envelope_id(sent[1].id()).unwrap().index, 1);
    }

    #[tokio::test]
    async fn test_reopened_log_continues_chain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.jsonl");
        seed(&path).await;

        let log = Arc::new(LogStore::open_file(&path).unwrap());
        let head = log.head_hash();
        let recorder = Arc::new(Recorder::default());
        let result = logged_router(&recorder, Arc::clone(&log))
            .route_envelope(&record(7).await, Subsystem::Landing)
            .await;

        assert_eq!(result.receipt.unwrap().index, 3);
        let tail = log.get_since(LogCursor::at(3));
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].prev_hash, head);
        assert!(log.verify().is_ok());
    }

    #[tokio::test]
    async fn test_float_payload_survives_reopen_and_reparse() {
        // Shortest-form floats that only parse back exactly with a correctly
        // rounding decoder.
        let readings = [1.0715660391465826e-75, 0.1 + 0.2, 2.2250738585072014e-308];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.jsonl");

        let (_, service) = envelope_service();
        let envelope = service
            .build(&params(
                Layer::Io,
                Subsystem::Landing,
                "LDS.RECORD",
                json!({ "readings": readings }),
            ))
            .await
            .unwrap();
        {
            let log = Arc::new(LogStore::open_file(&path).unwrap());
            let recorder = Arc::new(Recorder::default());
            let result = logged_router(&recorder, log)
                .route_envelope(&envelope, Subsystem::Landing)
                .await;
            assert!(result.success, "{:?}", result.error);
        }

        let log = Arc::new(LogStore::open_file(&path).unwrap());
        assert_eq!(log.entries()[0].envelope, envelope);

        let wire: Value = serde_json::from_str(&serde_json::to_string(&envelope).unwrap()).unwrap();
        let reparsed = parse_envelope(&wire).unwrap();
        assert_eq!(reparsed, envelope);
        assert!(service.validate(&reparsed).is_ok());

        let recorder = Arc::new(Recorder::default());
        let result = logged_router(&recorder, Arc::clone(&log))
            .route_envelope(&reparsed, Subsystem::Landing)
            .await;
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.receipt.unwrap().index, 1);
        assert!(log.verify().is_ok());
    }

    #[tokio::test]
    async fn test_failed_routing_not_logged() {
        let log = Arc::new(LogStore::in_memory());
        let recorder = Arc::new(Recorder::default());
        let router = logged_router(&recorder, Arc::clone(&log));

        let (_, service) = envelope_service();
        let unrouted = service
            .build(&params(Layer::Io, Subsystem::Landing, "TEST.PING", json!({})))
            .await
            .unwrap();
        let result = router.route_envelope(&unrouted, Subsystem::Landing).await;

        assert!(!result.success);
        assert!(result.receipt.is_none());
        assert!(log.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_routing_keeps_chain_sequential() {
        const SENDERS: u64 = 24;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.jsonl");

        let mut sent = Vec::new();
        {
            let log = Arc::new(LogStore::open_file(&path).unwrap());
            let recorder = Arc::new(Recorder::default());
            let router = Arc::new(logged_router(&recorder, Arc::clone(&log)));

            let mut tasks = tokio::task::JoinSet::new();
            for n in 0..SENDERS {
                let envelope = record(n).await;
                sent.push(envelope.id().to_string());
                let router = Arc::clone(&router);
                tasks.spawn(async move {
                    router.route_envelope(&envelope, Subsystem::Landing).await
                });
            }

            let mut indices = Vec::new();
            while let Some(joined) = tasks.join_next().await {
                let result = joined.unwrap();
                assert!(result.success, "{:?}", result.error);
                indices.push(result.receipt.unwrap().index);
            }
            indices.sort_unstable();
            assert_eq!(indices, (0..SENDERS).collect::<Vec<_>>());
            assert!(log.verify().is_ok());
        }

        let log = LogStore::open_file(&path).unwrap();
        assert_eq!(log.len(), SENDERS);
        let mut persisted: Vec<String> = log
            .entries()
            .iter()
            .map(|e| e.envelope.id().to_string())
            .collect();
        persisted.sort();
        sent.sort();
        assert_eq!(persisted, sent);
    }

    #[tokio::test]
    async fn test_any_edit_to_history_refuses_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.jsonl");
        seed(&path).await;

        let edits = vec![
            ("index", field_edit(|e| e["index"] = json!(5))),
            (
                "timestamp",
                field_edit(|e| e["timestamp"] = json!("2030-01-01T00:00:00Z")),
            ),
            (
                "envelope payload",
                field_edit(|e| e["envelope"]["body"]["payload"]["batch"] = json!(99)),
            ),
            (
                "envelope signature",
                field_edit(|e| {
                    e["envelope"]["provenance"]["signature"] = json!("00".repeat(64))
                }),
            ),
            ("hash", field_edit(|e| e["hash"] = json!("ab".repeat(32)))),
            ("prevHash", field_edit(|e| e["prevHash"] = Value::Null)),
        ];

        for (field, edit) in edits {
            let copy = rewrite_line(&path, 1, edit);
            let err = LogStore::open_file(&copy)
                .err()
                .unwrap_or_else(|| panic!("edit to {field} went unnoticed"));
            assert!(err.is_integrity(), "{field}: {err}");
        }
    }

    #[tokio::test]
    async fn test_dropped_line_refuses_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.jsonl");
        seed(&path).await;

        let text = std::fs::read_to_string(&path).unwrap();
        let kept: Vec<&str> = text
            .lines()
            .enumerate()
            .filter(|(i, _)| *i != 1)
            .map(|(_, line)| line)
            .collect();
        std::fs::write(&path, kept.join("\n") + "\n").unwrap();

        assert!(matches!(
            LogStore::open_file(&path),
            Err(LogError::IndexOutOfSequence { position: 1, found: 2 })
        ));
    }

    #[tokio::test]
    async fn test_second_writer_locked_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envelopes.jsonl");

        let first = LogStore::open_file(&path).unwrap();
        assert!(matches!(LogStore::open_file(&path), Err(LogError::Locked { .. })));

        drop(first);
        assert!(LogStore::open_file(&path).is_ok());
    }
}
