use async_trait::async_trait;
use chrono::Utc;

use super::model::{ExecutionStatus, SharedRecord};
use super::ComponentExecutor;
use crate::component::SequentialComponent;
use crate::error::error_chain;
use crate::event_bus::{publish, EventSender, ExecutionEvent};

/// Initializes and runs the component on its own task.
pub struct ExecuteComponent {
    instance: Option<Box<dyn SequentialComponent>>,
    record: SharedRecord,
    events: Option<EventSender>,
    unexpected_termination: bool,
}

impl ExecuteComponent {
    pub fn new(
        instance: Box<dyn SequentialComponent>,
        record: SharedRecord,
        events: Option<EventSender>,
    ) -> Self {
        Self {
            instance: Some(instance),
            record,
            events,
            unexpected_termination: false,
        }
    }
}

#[async_trait]
impl ComponentExecutor for ExecuteComponent {
    async fn execute(&mut self) {
        let Some(mut instance) = self.instance.take() else {
            tracing::warn!("Component executor already used");
            return;
        };
        let (component, channels) = {
            let mut record = self.record.lock();
            record.status = ExecutionStatus::Running;
            (record.component.clone(), record.channels.clone())
        };
        tracing::info!(component = %component, "Component execution begin");
        publish(
            self.events.as_ref(),
            ExecutionEvent::ComponentBegin {
                component: component.clone(),
                timestamp: Utc::now(),
            },
        );

        let task = tokio::spawn(async move {
            instance.initialize(&channels)?;
            instance.execute().await
        });

        match task.await {
            Ok(Ok(())) => {
                self.record.lock().status = ExecutionStatus::Finished;
                tracing::info!(component = %component, "Component execution end");
                publish(
                    self.events.as_ref(),
                    ExecutionEvent::ComponentFinished {
                        component,
                        timestamp: Utc::now(),
                    },
                );
            }
            Ok(Err(err)) => {
                let message = error_chain(&err);
                self.record.lock().fail(message.clone());
                tracing::error!(component = %component, error = %message, "Component execution failed");
                publish(
                    self.events.as_ref(),
                    ExecutionEvent::ComponentFailed {
                        component,
                        error: message,
                        timestamp: Utc::now(),
                    },
                );
            }
            Err(join_error) => {
                // The task died outside the lifecycle's own fault handling;
                // the record is left as it was.
                self.unexpected_termination = true;
                tracing::error!(
                    component = %component,
                    error = %join_error,
                    "Component task terminated unexpectedly"
                );
            }
        }
    }

    fn unexpected_termination(&self) -> bool {
        self.unexpected_termination
    }
}
