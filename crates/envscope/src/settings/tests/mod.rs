//! Tests for settings ingestion and lookup.
//!
//! Responsibilities:
//! - Test prefix filtering/stripping and JSON coercion of loaded values.
//! - Test dotenv file loading, including error and no-leak behavior.
//! - Test override extraction, ordering, and the non-fatal warning paths.
//!
//! Invariants:
//! - Tests touching the process environment use `serial_test` plus the
//!   crate-global lock to prevent cross-test contamination.
//! - Warning assertions go through `capture_warn_messages`, which installs a
//!   thread-local capturing subscriber.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Minimal in-test tracing subscriber to capture WARN messages without adding
/// dependencies.
#[derive(Clone, Default)]
struct CapturingSubscriber {
    events: Arc<Mutex<Vec<String>>>,
    next_id: Arc<AtomicU64>,
}

impl CapturingSubscriber {
    fn take_messages(&self) -> Vec<String> {
        std::mem::take(&mut *self.events.lock().expect("lock poisoned"))
    }
}

struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }
}

impl tracing::Subscriber for CapturingSubscriber {
    fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _attrs: &tracing::span::Attributes<'_>) -> tracing::span::Id {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::span::Id::from_u64(id)
    }

    fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

    fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

    fn event(&self, event: &tracing::Event<'_>) {
        let mut visitor = MessageVisitor { message: None };
        event.record(&mut visitor);
        if let Some(msg) = visitor.message {
            self.events.lock().expect("lock poisoned").push(msg);
        }
    }

    fn enter(&self, _span: &tracing::span::Id) {}

    fn exit(&self, _span: &tracing::span::Id) {}

    fn register_callsite(
        &self,
        _metadata: &'static tracing::Metadata<'static>,
    ) -> tracing::subscriber::Interest {
        tracing::subscriber::Interest::always()
    }

    fn clone_span(&self, id: &tracing::span::Id) -> tracing::span::Id {
        tracing::span::Id::from_u64(id.into_u64())
    }

    fn try_close(&self, _id: tracing::span::Id) -> bool {
        true
    }
}

/// Run `f` with a capturing subscriber installed and return the WARN-and-above
/// messages it emitted.
pub fn capture_warn_messages<F: FnOnce()>(f: F) -> Vec<String> {
    let subscriber = CapturingSubscriber {
        events: Arc::new(Mutex::new(Vec::new())),
        next_id: Arc::new(AtomicU64::new(1)),
    };

    let dispatch = tracing::Dispatch::new(subscriber.clone());
    tracing::dispatcher::with_default(&dispatch, f);
    subscriber.take_messages()
}
