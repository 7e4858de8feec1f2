//! Component lifecycle: port binding, capability injection, configuration
//! loading and guarded execution of one component instance.

pub mod binder;
pub mod capabilities;
pub mod context;
pub mod data_unit;
pub mod injector;
pub mod lifecycle;
pub mod slots;
pub mod traits;

pub use binder::PortBinder;
pub use capabilities::{
    AfterExecution, Capability, CapabilityKind, DefinitionReader, ExceptionFactory, ProgressReport,
    WorkingDirectory,
};
pub use context::{BundleInformation, ComponentContext};
pub use data_unit::{downcast_unit, DataUnit, IntoAnyArc};
pub use injector::CapabilityInjector;
pub use lifecycle::{ComponentLifecycle, LifecycleState};
pub use slots::{ConfigurationSlot, PortDeclaration, PortDirection, SlotTable};
pub use traits::{Component, SequentialComponent};

/// Metadata keys answered by [`SequentialComponent::header`].
pub mod headers {
    /// Comma separated code modules whose logs belong to the component.
    pub const LOG_PACKAGES: &str = "log-packages";
}
