//! # graphetl: component execution core of a graph-data ETL pipeline
//!
//! `graphetl` prepares and runs single pipeline components. The pipeline
//! scheduler around it decides what runs when; this crate covers what happens
//! to one component instance:
//!
//! - **Port binding**: channels supplied for an execution are matched to the
//!   ports a component declares in its [`SlotTable`](component::SlotTable).
//! - **Capability injection**: progress reporting, definition access, working
//!   directories, after-execution hooks and error factories.
//! - **Layered configuration**: static layers from the pipeline definition and
//!   an optional runtime layer, each filtered by the merge policy computed from
//!   the configuration description of the value's type.
//! - **Guarded execution**: domain failures are classified, panics are caught,
//!   and after-execution hooks always run.
//! - **Templates**: chains of reference templates are resolved to their
//!   concrete template for configuration defaults and assets.
//!
//! Graph data is reached only through the [`SparqlSelect`](rdf::SparqlSelect)
//! boundary; [`MemoryStore`](rdf::MemoryStore) implements it in memory.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use graphetl::component::{Component, ComponentContext, ComponentLifecycle, SlotTable};
//! use graphetl::error::ComponentError;
//! use graphetl::executor::{self, ExecutionModel, ExecutionRecord};
//! use graphetl::pipeline::{ComponentDescriptor, ExecutionType, PipelineDefinition};
//! use graphetl::rdf::MemoryStore;
//!
//! struct Noop;
//!
//! #[async_trait]
//! impl Component for Noop {
//!     fn slots() -> SlotTable<Self> {
//!         SlotTable::<Self>::new()
//!     }
//!
//!     async fn execute(&mut self) -> Result<(), ComponentError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ComponentError> {
//!     let iri = "http://example.com/pipeline/component/1";
//!     let mut pipeline = PipelineDefinition::new(
//!         "http://example.com/pipeline",
//!         "http://example.com/pipeline/graph",
//!     );
//!     let descriptor = ComponentDescriptor::new(iri, ExecutionType::Execute);
//!     pipeline.add_component(descriptor.clone());
//!
//!     let mut execution = ExecutionModel::new("http://example.com/execution/1");
//!     let record = execution.add(ExecutionRecord::new(iri));
//!
//!     let context = ComponentContext::new(
//!         descriptor,
//!         Arc::new(MemoryStore::new()),
//!         pipeline.graph.clone(),
//!     );
//!     let lifecycle = ComponentLifecycle::new(Noop, context)?;
//!     if let Some(mut executor) = executor::create(&pipeline, &execution, iri, Box::new(lifecycle)) {
//!         executor.execute().await;
//!     }
//!     println!("{:?}", record.lock().status);
//!     Ok(())
//! }
//! ```

pub mod component;
pub mod config;
pub mod configuration;
pub mod dataunit;
pub mod error;
pub mod event_bus;
pub mod executor;
pub mod logging;
pub mod paths;
pub mod pipeline;
pub mod rdf;
pub mod template;

pub use crate::component::{
    Component, ComponentContext, ComponentLifecycle, DataUnit, LifecycleState,
    SequentialComponent, SlotTable,
};
pub use crate::config::{ConfigFormat, CoreConfig};
pub use crate::configuration::{ConfigurationDescription, ConfigurationLoader, MergePolicy, MergeResolver};
pub use crate::error::{ComponentError, LoadError, TemplateError};
pub use crate::event_bus::{create_event_channel, EventReceiver, EventSender, ExecutionEvent};
pub use crate::executor::{ComponentExecutor, ExecutionModel, ExecutionRecord, ExecutionStatus};
pub use crate::pipeline::{ComponentDescriptor, ConfigurationReference, ExecutionType, PipelineDefinition};
pub use crate::rdf::{MemoryStore, Quad, RdfLoadable, SparqlSelect, Term};
pub use crate::template::{
    InMemoryTemplateRegistry, Template, TemplateFacade, TemplateHierarchy, TemplateRegistry,
};
