use std::sync::Arc;

use async_trait::async_trait;

use super::data_unit::DataUnit;
use super::slots::SlotTable;
use crate::error::ComponentResult;

/// A pipeline component type. Implementors declare their slots and provide
/// the domain logic; the lifecycle does the rest.
#[async_trait]
pub trait Component: Send + 'static {
    /// Ports, capabilities and configuration this type exposes.
    fn slots() -> SlotTable<Self>
    where
        Self: Sized;

    async fn execute(&mut self) -> ComponentResult<()>;
}

/// The surface the scheduler drives: one component instance prepared and run
/// once.
#[async_trait]
pub trait SequentialComponent: Send {
    /// IRI of the component resource.
    fn component(&self) -> &str;

    fn initialize(&mut self, channels: &[Arc<dyn DataUnit>]) -> ComponentResult<()>;

    async fn execute(&mut self) -> ComponentResult<()>;

    /// Metadata value for `key`, see [`headers`](super::headers).
    fn header(&self, key: &str) -> Option<String>;
}
