use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::model::{ExecutionStatus, SharedRecord};
use super::ComponentExecutor;
use crate::component::DataUnit;
use crate::event_bus::{publish, EventSender, ExecutionEvent};

/// Reuses the channels of a previous run instead of executing the component.
///
/// Every channel of the record is replaced by the mapped channel with the
/// same binding; a channel without a mapped counterpart fails the record.
pub struct MapComponent {
    record: SharedRecord,
    events: Option<EventSender>,
}

impl MapComponent {
    pub fn new(record: SharedRecord, events: Option<EventSender>) -> Self {
        Self { record, events }
    }
}

#[async_trait]
impl ComponentExecutor for MapComponent {
    async fn execute(&mut self) {
        let (component, missing) = {
            let mut record = self.record.lock();
            let mut missing = Vec::new();
            let channels: Vec<Arc<dyn DataUnit>> = record
                .channels
                .iter()
                .map(|channel| {
                    match record
                        .mapped
                        .iter()
                        .rev()
                        .find(|mapped| mapped.binding() == channel.binding())
                    {
                        Some(mapped) => mapped.clone(),
                        None => {
                            missing.push(channel.binding().to_string());
                            channel.clone()
                        }
                    }
                })
                .collect();
            if missing.is_empty() {
                record.channels = channels;
                record.status = ExecutionStatus::Mapped;
            } else {
                record.fail(format!("No mapped data for: {}", missing.join(", ")));
            }
            (record.component.clone(), missing)
        };

        let event = if missing.is_empty() {
            tracing::info!(component = %component, "Component mapped");
            ExecutionEvent::ComponentMapped {
                component,
                timestamp: Utc::now(),
            }
        } else {
            tracing::error!(component = %component, missing = ?missing, "Component mapping failed");
            ExecutionEvent::ComponentFailed {
                error: format!("No mapped data for: {}", missing.join(", ")),
                component,
                timestamp: Utc::now(),
            }
        };
        publish(self.events.as_ref(), event);
    }

    fn unexpected_termination(&self) -> bool {
        false
    }
}
