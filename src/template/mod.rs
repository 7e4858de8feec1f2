//! Component templates: the registry boundary, chain resolution and the
//! read-only facade used by the scheduler.

pub mod facade;
pub mod hierarchy;
pub mod registry;
pub mod types;

pub use facade::TemplateFacade;
pub use hierarchy::{TemplateConfig, TemplateHierarchy, DEFAULT_MAX_DEPTH};
pub use registry::{InMemoryTemplateRegistry, TemplateRegistry};
pub use types::{ConcreteTemplate, ReferenceTemplate, Template, TemplateGraphs};
