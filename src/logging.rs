//! Log forwarding to an optional remote HTTP sink.
//!
//! Every event is serialized to a flat JSON object (the field names the
//! downstream log pipeline expects: `timestamp`, `level`, `message`,
//! `caller`) tagged with a fixed `stream_name`, and POSTed to the
//! configured URL by a background task. The layer is only installed when
//! `logging_url` is set; delivery is best-effort and never blocks the
//! logging call site.

use serde_json::{Map, Value, json};
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Stream tag attached to every forwarded entry.
const STREAM_NAME: &str = "key-manager";

/// A `tracing` layer that forwards events to an HTTP endpoint.
pub struct HttpSinkLayer {
    tx: mpsc::UnboundedSender<Value>,
}

impl HttpSinkLayer {
    /// Create the layer and spawn the forwarding task.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(url: String) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Value>();

        tokio::spawn(async move {
            let client = reqwest::Client::new();
            while let Some(entry) = rx.recv().await {
                // A dead sink must not take the service down, and reporting
                // the failure through tracing would recurse into this layer.
                let _ = client.post(&url).json(&entry).send().await;
            }
        });

        Self { tx }
    }

    #[cfg(test)]
    fn with_sender(tx: mpsc::UnboundedSender<Value>) -> Self {
        Self { tx }
    }
}

impl<S: Subscriber> Layer<S> for HttpSinkLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut entry = visitor.fields;
        entry.insert("timestamp".to_string(), json!(chrono::Utc::now().to_rfc3339()));
        entry.insert(
            "level".to_string(),
            json!(event.metadata().level().to_string()),
        );
        entry.insert("caller".to_string(), json!(event.metadata().target()));
        entry.insert("stream_name".to_string(), json!(STREAM_NAME));

        let _ = self.tx.send(Value::Object(entry));
    }
}

/// Collects event fields into a JSON map. The implicit `message` field keeps
/// its name, matching what the downstream pipeline expects.
#[derive(Default)]
struct JsonVisitor {
    fields: Map<String, Value>,
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), json!(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), json!(value));
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    #[test]
    fn events_are_forwarded_as_tagged_json() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscriber =
            tracing_subscriber::registry().with(HttpSinkLayer::with_sender(tx));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(key_name = "app-key", attempt = 2u64, "key created");
        });

        let entry = rx.try_recv().expect("one forwarded entry");
        assert_eq!(entry["message"], "key created");
        assert_eq!(entry["key_name"], "app-key");
        assert_eq!(entry["attempt"], 2);
        assert_eq!(entry["level"], "INFO");
        assert_eq!(entry["stream_name"], "key-manager");
        assert!(entry["timestamp"].is_string());
    }
}
