//! Executors wrap one component instance according to its execution type.

mod execute;
mod map;
pub mod model;
mod skip;

use async_trait::async_trait;

pub use execute::ExecuteComponent;
pub use map::MapComponent;
pub use model::{ExecutionModel, ExecutionRecord, ExecutionStatus, SharedRecord};
pub use skip::SkipComponent;

use crate::component::SequentialComponent;
use crate::pipeline::{ExecutionType, PipelineDefinition};

#[async_trait]
pub trait ComponentExecutor: Send {
    /// Run the strategy. Outcomes are recorded on the execution record and
    /// published as events.
    async fn execute(&mut self);

    /// True when the executor's task ended without recording a terminal
    /// state. The scheduler should then fail the whole pipeline run.
    fn unexpected_termination(&self) -> bool;
}

/// Build the executor for `component_iri`.
///
/// Returns `None` when the pipeline has no such component, the execution has
/// no record for it, or its execution type is not known.
pub fn create(
    pipeline: &PipelineDefinition,
    execution: &ExecutionModel,
    component_iri: &str,
    instance: Box<dyn SequentialComponent>,
) -> Option<Box<dyn ComponentExecutor>> {
    let descriptor = pipeline.component(component_iri)?;
    let record = execution.component(component_iri)?;
    let events = execution.events().cloned();
    match &descriptor.execution_type {
        ExecutionType::Execute => Some(Box::new(ExecuteComponent::new(instance, record, events))),
        ExecutionType::Map => Some(Box::new(MapComponent::new(record, events))),
        ExecutionType::Skip => Some(Box::new(SkipComponent::new(record, events))),
        ExecutionType::Unrecognized(iri) => {
            tracing::warn!(
                component = %component_iri,
                execution_type = %iri,
                "Unknown execution type, no executor created"
            );
            None
        }
    }
}
