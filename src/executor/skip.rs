use async_trait::async_trait;
use chrono::Utc;

use super::model::{ExecutionStatus, SharedRecord};
use super::ComponentExecutor;
use crate::event_bus::{publish, EventSender, ExecutionEvent};

/// Marks the component skipped without running anything.
pub struct SkipComponent {
    record: SharedRecord,
    events: Option<EventSender>,
}

impl SkipComponent {
    pub fn new(record: SharedRecord, events: Option<EventSender>) -> Self {
        Self { record, events }
    }
}

#[async_trait]
impl ComponentExecutor for SkipComponent {
    async fn execute(&mut self) {
        let component = {
            let mut record = self.record.lock();
            record.status = ExecutionStatus::Skipped;
            record.component.clone()
        };
        tracing::info!(component = %component, "Component skipped");
        publish(
            self.events.as_ref(),
            ExecutionEvent::ComponentSkipped {
                component,
                timestamp: Utc::now(),
            },
        );
    }

    fn unexpected_termination(&self) -> bool {
        false
    }
}
