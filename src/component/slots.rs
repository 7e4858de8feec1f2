//! Explicit slot declarations: each component type lists its ports,
//! capabilities and configuration slots in a [`SlotTable`].

use std::any::type_name;
use std::collections::HashSet;
use std::sync::Arc;

use super::capabilities::{
    AfterExecution, Capability, CapabilityKind, DefinitionReader, ExceptionFactory, ProgressReport,
    WorkingDirectory,
};
use super::data_unit::{downcast_unit, DataUnit};
use crate::error::{ComponentError, ComponentResult};
use crate::rdf::RdfLoadable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

/// Metadata of one port. Outputs are never optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDeclaration {
    pub binding: String,
    pub direction: PortDirection,
    pub optional: bool,
}

impl PortDeclaration {
    /// Whether an absent channel for this port is a failure.
    pub fn is_required(&self) -> bool {
        self.direction == PortDirection::Output || !self.optional
    }
}

type PortSetter<C> = Box<dyn Fn(&mut C, Arc<dyn DataUnit>) -> bool + Send + Sync>;

/// A port declaration together with the typed assignment into the component.
pub struct PortSlot<C> {
    pub declaration: PortDeclaration,
    expected: &'static str,
    set: PortSetter<C>,
}

impl<C: 'static> PortSlot<C> {
    fn typed<T: DataUnit + 'static>(
        binding: &str,
        direction: PortDirection,
        optional: bool,
        set: fn(&mut C, Arc<T>),
    ) -> Self {
        Self {
            declaration: PortDeclaration {
                binding: binding.to_string(),
                direction,
                optional,
            },
            expected: type_name::<T>(),
            set: Box::new(move |component, unit| match downcast_unit::<T>(unit) {
                Some(unit) => {
                    set(component, unit);
                    true
                }
                None => false,
            }),
        }
    }

    /// Concrete type name the port accepts.
    pub fn expected(&self) -> &'static str {
        self.expected
    }

    /// Assign `unit`; `false` when its type is not the port's type.
    pub(crate) fn assign(&self, component: &mut C, unit: Arc<dyn DataUnit>) -> bool {
        (self.set)(component, unit)
    }
}

enum CapabilitySetter<C> {
    Progress(fn(&mut C, ProgressReport)),
    Definition(fn(&mut C, DefinitionReader)),
    AfterExecution(fn(&mut C, AfterExecution)),
    WorkingDirectory(fn(&mut C, WorkingDirectory)),
    ExceptionFactory(fn(&mut C, ExceptionFactory)),
}

/// A named capability slot.
pub struct CapabilitySlot<C> {
    pub name: String,
    setter: CapabilitySetter<C>,
}

impl<C> CapabilitySlot<C> {
    pub fn kind(&self) -> CapabilityKind {
        match self.setter {
            CapabilitySetter::Progress(_) => CapabilityKind::ProgressReport,
            CapabilitySetter::Definition(_) => CapabilityKind::DefinitionReader,
            CapabilitySetter::AfterExecution(_) => CapabilityKind::AfterExecution,
            CapabilitySetter::WorkingDirectory(_) => CapabilityKind::WorkingDirectory,
            CapabilitySetter::ExceptionFactory(_) => CapabilityKind::ExceptionFactory,
        }
    }

    /// Place `capability` into the component. A capability of another kind
    /// than the slot's is rejected.
    pub(crate) fn inject(&self, component: &mut C, capability: Capability) -> ComponentResult<()> {
        match (&self.setter, capability) {
            (CapabilitySetter::Progress(set), Capability::ProgressReport(value)) => {
                set(component, value)
            }
            (CapabilitySetter::Definition(set), Capability::DefinitionReader(value)) => {
                set(component, value)
            }
            (CapabilitySetter::AfterExecution(set), Capability::AfterExecution(value)) => {
                set(component, value)
            }
            (CapabilitySetter::WorkingDirectory(set), Capability::WorkingDirectory(value)) => {
                set(component, value)
            }
            (CapabilitySetter::ExceptionFactory(set), Capability::ExceptionFactory(value)) => {
                set(component, value)
            }
            (_, other) => {
                return Err(ComponentError::initialization(format!(
                    "Capability {} can't fill slot '{}' of kind {}",
                    other.kind(),
                    self.name,
                    self.kind()
                )))
            }
        }
        Ok(())
    }
}

type ConfigurationFactory = Box<dyn Fn() -> Result<Box<dyn RdfLoadable>, String> + Send + Sync>;
type ConfigurationSetter<C> =
    Box<dyn Fn(&mut C, Box<dyn RdfLoadable>) -> ComponentResult<()> + Send + Sync>;

/// A configuration slot: how to build a fresh value and where to put it.
pub struct ConfigurationSlot<C> {
    pub name: String,
    factory: ConfigurationFactory,
    set: ConfigurationSetter<C>,
}

impl<C: 'static> ConfigurationSlot<C> {
    pub fn new<T: RdfLoadable + 'static>(
        name: &str,
        factory: fn() -> Result<T, String>,
        set: fn(&mut C, T),
    ) -> Self {
        let slot = name.to_string();
        Self {
            name: name.to_string(),
            factory: Box::new(move || {
                factory().map(|value| Box::new(value) as Box<dyn RdfLoadable>)
            }),
            set: Box::new(move |component, value| {
                let value = value.into_any().downcast::<T>().map_err(|_| {
                    ComponentError::initialization(format!(
                        "Configuration value for '{}' is not a {}",
                        slot,
                        type_name::<T>()
                    ))
                })?;
                set(component, *value);
                Ok(())
            }),
        }
    }

    /// Slot whose value starts from `T::default()`.
    pub fn with_default<T: RdfLoadable + Default + 'static>(name: &str, set: fn(&mut C, T)) -> Self {
        Self::new(name, || Ok(T::default()), set)
    }

    pub(crate) fn create(&self) -> ComponentResult<Box<dyn RdfLoadable>> {
        (self.factory)().map_err(|message| {
            ComponentError::initialization(format!(
                "Can't create configuration '{}': {}",
                self.name, message
            ))
        })
    }

    pub(crate) fn assign(
        &self,
        component: &mut C,
        value: Box<dyn RdfLoadable>,
    ) -> ComponentResult<()> {
        (self.set)(component, value)
    }
}

/// Every slot a component type exposes.
pub struct SlotTable<C> {
    ports: Vec<PortSlot<C>>,
    capabilities: Vec<CapabilitySlot<C>>,
    configuration: Option<ConfigurationSlot<C>>,
    runtime_configuration: Option<String>,
}

impl<C> Default for SlotTable<C> {
    fn default() -> Self {
        Self {
            ports: Vec::new(),
            capabilities: Vec::new(),
            configuration: None,
            runtime_configuration: None,
        }
    }
}

impl<C: 'static> SlotTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input<T: DataUnit + 'static>(mut self, binding: &str, set: fn(&mut C, Arc<T>)) -> Self {
        self.ports
            .push(PortSlot::typed(binding, PortDirection::Input, false, set));
        self
    }

    pub fn optional_input<T: DataUnit + 'static>(
        mut self,
        binding: &str,
        set: fn(&mut C, Arc<T>),
    ) -> Self {
        self.ports
            .push(PortSlot::typed(binding, PortDirection::Input, true, set));
        self
    }

    pub fn output<T: DataUnit + 'static>(mut self, binding: &str, set: fn(&mut C, Arc<T>)) -> Self {
        self.ports
            .push(PortSlot::typed(binding, PortDirection::Output, false, set));
        self
    }

    /// Declare the optional input port whose channel carries runtime
    /// configuration. The bound unit must be queryable.
    pub fn runtime_configuration(mut self, binding: &str) -> Self {
        self.ports.push(PortSlot {
            declaration: PortDeclaration {
                binding: binding.to_string(),
                direction: PortDirection::Input,
                optional: true,
            },
            expected: "queryable data unit",
            set: Box::new(|_, _| true),
        });
        self.runtime_configuration = Some(binding.to_string());
        self
    }

    pub fn progress(self, name: &str, set: fn(&mut C, ProgressReport)) -> Self {
        self.capability(name, CapabilitySetter::Progress(set))
    }

    pub fn definition(self, name: &str, set: fn(&mut C, DefinitionReader)) -> Self {
        self.capability(name, CapabilitySetter::Definition(set))
    }

    pub fn after_execution(self, name: &str, set: fn(&mut C, AfterExecution)) -> Self {
        self.capability(name, CapabilitySetter::AfterExecution(set))
    }

    pub fn working_directory(self, name: &str, set: fn(&mut C, WorkingDirectory)) -> Self {
        self.capability(name, CapabilitySetter::WorkingDirectory(set))
    }

    pub fn exception_factory(self, name: &str, set: fn(&mut C, ExceptionFactory)) -> Self {
        self.capability(name, CapabilitySetter::ExceptionFactory(set))
    }

    fn capability(mut self, name: &str, setter: CapabilitySetter<C>) -> Self {
        self.capabilities.push(CapabilitySlot {
            name: name.to_string(),
            setter,
        });
        self
    }

    pub fn configuration(mut self, slot: ConfigurationSlot<C>) -> Self {
        self.configuration = Some(slot);
        self
    }

    pub fn ports(&self) -> &[PortSlot<C>] {
        &self.ports
    }

    pub fn declarations(&self) -> impl Iterator<Item = &PortDeclaration> {
        self.ports.iter().map(|slot| &slot.declaration)
    }

    pub fn capabilities(&self) -> &[CapabilitySlot<C>] {
        &self.capabilities
    }

    pub fn configuration_slot(&self) -> Option<&ConfigurationSlot<C>> {
        self.configuration.as_ref()
    }

    pub fn runtime_configuration_binding(&self) -> Option<&str> {
        self.runtime_configuration.as_deref()
    }

    /// Reject tables that declare the same binding twice.
    pub fn validate(&self) -> ComponentResult<()> {
        let mut seen = HashSet::new();
        for declaration in self.declarations() {
            if !seen.insert(declaration.binding.as_str()) {
                return Err(ComponentError::initialization(format!(
                    "Port '{}' is declared more than once",
                    declaration.binding
                )));
            }
        }
        if self.runtime_configuration.is_some() && self.configuration.is_none() {
            return Err(ComponentError::initialization(
                "Runtime configuration port declared without a configuration slot",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;

    struct Unit;

    impl DataUnit for Unit {
        fn iri(&self) -> &str {
            "http://ex/unit"
        }

        fn binding(&self) -> &str {
            "Input"
        }

        fn kind(&self) -> &'static str {
            "test"
        }
    }

    #[derive(Default)]
    struct Settings {
        value: Option<String>,
    }

    impl RdfLoadable for Settings {
        fn load(&mut self, _predicate: &str, value: &str) -> Result<(), LoadError> {
            self.value = Some(value.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct Host {
        input: Option<Arc<Unit>>,
        settings: Option<Settings>,
        errors: Option<ExceptionFactory>,
    }

    #[test]
    fn test_required_ports() {
        let table = SlotTable::<Host>::new()
            .input::<Unit>("Input", |c, u| c.input = Some(u))
            .optional_input::<Unit>("Extra", |_, _| {})
            .output::<Unit>("Output", |_, _| {});
        let required: Vec<bool> = table.declarations().map(|d| d.is_required()).collect();
        assert_eq!(required, vec![true, false, true]);
    }

    #[test]
    fn test_port_assign_checks_type() {
        struct Other;
        impl DataUnit for Other {
            fn iri(&self) -> &str {
                "http://ex/other"
            }
            fn binding(&self) -> &str {
                "Input"
            }
            fn kind(&self) -> &'static str {
                "other"
            }
        }

        let table = SlotTable::<Host>::new().input::<Unit>("Input", |c, u| c.input = Some(u));
        let mut host = Host::default();
        assert!(!table.ports()[0].assign(&mut host, Arc::new(Other)));
        assert!(host.input.is_none());
        assert!(table.ports()[0].assign(&mut host, Arc::new(Unit)));
        assert!(host.input.is_some());
    }

    #[test]
    fn test_duplicate_binding_is_rejected() {
        let table = SlotTable::<Host>::new()
            .input::<Unit>("Input", |_, _| {})
            .output::<Unit>("Input", |_, _| {});
        assert!(matches!(
            table.validate(),
            Err(ComponentError::Initialization { .. })
        ));
    }

    #[test]
    fn test_runtime_configuration_requires_slot() {
        let table = SlotTable::<Host>::new().runtime_configuration("Configuration");
        assert!(table.validate().is_err());

        let table = SlotTable::<Host>::new()
            .runtime_configuration("Configuration")
            .configuration(ConfigurationSlot::with_default("settings", |c, s: Settings| {
                c.settings = Some(s)
            }));
        assert!(table.validate().is_ok());
        assert_eq!(table.runtime_configuration_binding(), Some("Configuration"));
    }

    #[test]
    fn test_configuration_slot_create_and_assign() {
        let slot = ConfigurationSlot::<Host>::with_default("settings", |c, s: Settings| {
            c.settings = Some(s)
        });
        let mut value = slot.create().unwrap();
        value.load("http://ex/p", "v").unwrap();
        let mut host = Host::default();
        slot.assign(&mut host, value).unwrap();
        assert_eq!(
            host.settings.and_then(|s| s.value).as_deref(),
            Some("v")
        );
    }

    #[test]
    fn test_configuration_factory_failure() {
        let slot = ConfigurationSlot::<Host>::new(
            "settings",
            || Err::<Settings, _>("no defaults".to_string()),
            |c, s| c.settings = Some(s),
        );
        let err = slot.create().err().unwrap();
        assert!(err.to_string().contains("no defaults"));
    }

    #[test]
    fn test_capability_inject_matching_kind() {
        let table =
            SlotTable::<Host>::new().exception_factory("errors", |c, v| c.errors = Some(v));
        let mut host = Host::default();
        table.capabilities()[0]
            .inject(&mut host, Capability::ExceptionFactory(ExceptionFactory::new("http://ex/c")))
            .unwrap();
        assert!(host.errors.is_some());
    }

    #[test]
    fn test_capability_of_other_kind_is_rejected() {
        let table =
            SlotTable::<Host>::new().exception_factory("errors", |c, v| c.errors = Some(v));
        let mut host = Host::default();
        let err = table.capabilities()[0]
            .inject(&mut host, Capability::AfterExecution(AfterExecution::new()))
            .unwrap_err();
        assert!(matches!(err, ComponentError::Initialization { .. }));
        assert!(err.to_string().contains("after-execution"));
        assert!(host.errors.is_none());
    }
}
