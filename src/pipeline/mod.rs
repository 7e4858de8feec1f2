//! Static pipeline model: component descriptors and their configuration
//! references, as read from the pipeline definition graph.

pub mod definition;

pub use definition::{ComponentDescriptor, ConfigurationReference, ExecutionType, PipelineDefinition};
