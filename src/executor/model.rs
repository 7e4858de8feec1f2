use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::component::DataUnit;
use crate::event_bus::EventSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Queued,
    Running,
    Finished,
    Mapped,
    Skipped,
    Failed,
}

impl ExecutionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExecutionStatus::Queued | ExecutionStatus::Running)
    }
}

/// Per-run state of one component, shared between scheduler and executor.
pub struct ExecutionRecord {
    pub component: String,
    pub status: ExecutionStatus,
    /// Channels handed to the component for this run.
    pub channels: Vec<Arc<dyn DataUnit>>,
    /// Channels of a previous run, used by mapped execution.
    pub mapped: Vec<Arc<dyn DataUnit>>,
    pub failure: Option<String>,
}

impl fmt::Debug for ExecutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = |units: &[Arc<dyn DataUnit>]| {
            units.iter().map(|unit| unit.binding().to_string()).collect::<Vec<_>>()
        };
        f.debug_struct("ExecutionRecord")
            .field("component", &self.component)
            .field("status", &self.status)
            .field("channels", &bindings(&self.channels))
            .field("mapped", &bindings(&self.mapped))
            .field("failure", &self.failure)
            .finish()
    }
}

impl ExecutionRecord {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: ExecutionStatus::Queued,
            channels: Vec::new(),
            mapped: Vec::new(),
            failure: None,
        }
    }

    pub fn with_channels(mut self, channels: Vec<Arc<dyn DataUnit>>) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_mapped(mut self, mapped: Vec<Arc<dyn DataUnit>>) -> Self {
        self.mapped = mapped;
        self
    }

    pub(crate) fn fail(&mut self, failure: impl Into<String>) {
        self.status = ExecutionStatus::Failed;
        self.failure = Some(failure.into());
    }
}

pub type SharedRecord = Arc<Mutex<ExecutionRecord>>;

/// State of one pipeline execution, keyed by component IRI.
#[derive(Default)]
pub struct ExecutionModel {
    pub iri: String,
    components: HashMap<String, SharedRecord>,
    events: Option<EventSender>,
}

impl ExecutionModel {
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            components: HashMap::new(),
            events: None,
        }
    }

    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Add a record, returning the shared handle.
    pub fn add(&mut self, record: ExecutionRecord) -> SharedRecord {
        let shared = Arc::new(Mutex::new(record));
        let component = shared.lock().component.clone();
        self.components.insert(component, shared.clone());
        shared
    }

    pub fn component(&self, iri: &str) -> Option<SharedRecord> {
        self.components.get(iri).cloned()
    }

    pub fn events(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }
}
