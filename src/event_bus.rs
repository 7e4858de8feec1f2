use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

/// Execution events, published for the external scheduler and monitors.
#[derive(Clone, Debug, Serialize)]
pub enum ExecutionEvent {
    /// Component execution started
    ComponentBegin {
        component: String,
        timestamp: DateTime<Utc>,
    },

    /// Component finished successfully
    ComponentFinished {
        component: String,
        timestamp: DateTime<Utc>,
    },

    /// Component failed; `error` holds the rendered cause chain
    ComponentFailed {
        component: String,
        error: String,
        timestamp: DateTime<Utc>,
    },

    /// Component was mapped from a previous execution
    ComponentMapped {
        component: String,
        timestamp: DateTime<Utc>,
    },

    /// Component was skipped
    ComponentSkipped {
        component: String,
        timestamp: DateTime<Utc>,
    },

    ProgressStart {
        component: String,
        total: u64,
        timestamp: DateTime<Utc>,
    },

    ProgressUpdate {
        component: String,
        current: u64,
        total: u64,
        timestamp: DateTime<Utc>,
    },

    ProgressDone {
        component: String,
        timestamp: DateTime<Utc>,
    },
}

impl ExecutionEvent {
    pub fn component(&self) -> &str {
        match self {
            ExecutionEvent::ComponentBegin { component, .. }
            | ExecutionEvent::ComponentFinished { component, .. }
            | ExecutionEvent::ComponentFailed { component, .. }
            | ExecutionEvent::ComponentMapped { component, .. }
            | ExecutionEvent::ComponentSkipped { component, .. }
            | ExecutionEvent::ProgressStart { component, .. }
            | ExecutionEvent::ProgressUpdate { component, .. }
            | ExecutionEvent::ProgressDone { component, .. } => component,
        }
    }
}

/// Event sender
pub type EventSender = mpsc::UnboundedSender<ExecutionEvent>;

/// Event receiver
pub type EventReceiver = mpsc::UnboundedReceiver<ExecutionEvent>;

/// Create an event channel
pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Send an event, ignoring a closed receiver.
pub(crate) fn publish(events: Option<&EventSender>, event: ExecutionEvent) {
    if let Some(sender) = events {
        if sender.send(event).is_err() {
            tracing::trace!("Event receiver dropped");
        }
    }
}
