//! Event sinks — where the loop's events go.
//!
//! The loop calls [`EventSink::emit`] synchronously, in emission order, and
//! expects it to be cheap. Anything slow (network pushes, disk writes) must
//! buffer or forward; a sink that blocks stalls the run.

use std::sync::{Arc, Mutex};

use authproof_core::error::StoreError;
use authproof_core::message::Conversation;
use authproof_core::store::ConversationStore;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::event::AgentEvent;

/// Receives events from the agent loop as they happen.
pub trait EventSink: Send + Sync {
    /// Handle one event. Must not block.
    fn emit(&self, event: AgentEvent);
}

/// Forwards events into an unbounded channel.
///
/// The send never blocks the loop; if the receiving half is gone the event
/// is dropped and the run continues to completion regardless.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<AgentEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<AgentEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink together with its receiving half.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<AgentEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: AgentEvent) {
        if self.tx.send(event).is_err() {
            debug!("Event subscriber dropped; discarding event");
        }
    }
}

/// Buffers every event in memory. Used by tests and batch callers that
/// inspect the full sequence after the run.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<AgentEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the events emitted so far.
    pub fn events(&self) -> Vec<AgentEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<AgentEvent> {
        self.events
            .lock()
            .map(|mut e| std::mem::take(&mut *e))
            .unwrap_or_default()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: AgentEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Decorator that forwards to an inner sink and, once the run ends, persists
/// the conversation to a [`ConversationStore`].
///
/// Persistence lives here, on the subscriber side, not inside the loop: the
/// loop emits pure events and the caller decides what survives. `emit` only
/// records an audit trail; the store write happens in [`finish`], after the
/// run has returned and the conversation holds the full transcript.
///
/// [`finish`]: PersistingSink::finish
pub struct PersistingSink<S> {
    inner: S,
    store: Arc<dyn ConversationStore>,
    tool_audit: Mutex<Vec<String>>,
}

impl<S: EventSink> PersistingSink<S> {
    pub fn new(inner: S, store: Arc<dyn ConversationStore>) -> Self {
        Self {
            inner,
            store,
            tool_audit: Mutex::new(Vec::new()),
        }
    }

    /// Tool names seen during the run, in invocation order.
    pub fn tool_audit(&self) -> Vec<String> {
        self.tool_audit.lock().map(|a| a.clone()).unwrap_or_default()
    }

    /// Persist the finished conversation.
    pub async fn finish(&self, conversation: &Conversation) -> Result<(), StoreError> {
        let tools = self.tool_audit();
        debug!(
            conversation_id = %conversation.id,
            messages = conversation.messages.len(),
            tools_invoked = tools.len(),
            "Persisting conversation"
        );
        if let Err(e) = self.store.save(conversation).await {
            warn!(error = %e, "Failed to persist conversation");
            return Err(e);
        }
        Ok(())
    }
}

impl<S: EventSink> EventSink for PersistingSink<S> {
    fn emit(&self, event: AgentEvent) {
        if let AgentEvent::ToolCall { tool_name, .. } = &event {
            if let Ok(mut audit) = self.tool_audit.lock() {
                audit.push(tool_name.clone());
            }
        }
        self.inner.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_preserves_order() {
        let sink = CollectingSink::new();
        sink.emit(AgentEvent::ToolCall {
            tool_name: "a".into(),
            parameters: serde_json::json!({}),
        });
        sink.emit(AgentEvent::Complete);

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "tool_call");
        assert_eq!(events[1].event_type(), "complete");
    }

    #[test]
    fn collecting_sink_take_drains() {
        let sink = CollectingSink::new();
        sink.emit(AgentEvent::Complete);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn channel_sink_forwards() {
        let (sink, mut rx) = ChannelSink::pair();
        sink.emit(AgentEvent::Error {
            message: "boom".into(),
        });
        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type(), "error");
    }

    #[test]
    fn channel_sink_survives_dropped_receiver() {
        let (sink, rx) = ChannelSink::pair();
        drop(rx);
        sink.emit(AgentEvent::Complete);
    }

    #[tokio::test]
    async fn persisting_sink_records_audit_and_saves() {
        use authproof_store::InMemoryStore;

        let store = Arc::new(InMemoryStore::new());
        let sink = PersistingSink::new(CollectingSink::new(), store.clone());

        sink.emit(AgentEvent::ToolCall {
            tool_name: "check_device_connection".into(),
            parameters: serde_json::json!({}),
        });
        sink.emit(AgentEvent::Complete);

        assert_eq!(sink.tool_audit(), vec!["check_device_connection"]);

        let conversation = Conversation::new();
        sink.finish(&conversation).await.unwrap();
        assert!(store.load(&conversation.id).await.unwrap().is_some());
    }
}
