use chrono::TimeZone;
use serde_json::json;
use shared_types::{
    Body, CapabilitySet, Envelope, Header, Identity, Layer, MessageType, Provenance, Safety,
    Timestamp, PROTOCOL_VERSION,
};

pub fn time(offset_secs: u64) -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
        + chrono::Duration::seconds(offset_secs as i64)
}

/// Envelope with a fixed body; `id` doubles as hash and signature filler.
pub fn envelope(id: &str) -> Envelope {
    Envelope {
        header: Header {
            envelope_id: id.to_owned(),
            timestamp: time(0),
            version: PROTOCOL_VERSION.into(),
            layer: Layer::Io,
            message_type: MessageType::Event,
            priority: None,
            source: Identity::module("local", "LDS"),
            target: Identity::module("local", "TKD"),
            capabilities: CapabilitySet::default(),
        },
        body: Body {
            payload_type: "LDS.INGEST".into(),
            payload: json!({ "record": id }),
        },
        provenance: Provenance {
            hash: format!("hash-{id}"),
            signature: format!("sig-{id}"),
            ..Provenance::unsigned(vec![])
        },
        safety: Safety::default(),
    }
}
