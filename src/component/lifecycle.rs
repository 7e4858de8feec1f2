use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use super::binder::PortBinder;
use super::capabilities::AfterExecution;
use super::context::ComponentContext;
use super::data_unit::DataUnit;
use super::headers;
use super::injector::CapabilityInjector;
use super::slots::SlotTable;
use super::traits::{Component, SequentialComponent};
use crate::configuration::ConfigurationLoader;
use crate::error::{ComponentError, ComponentResult};
use crate::rdf::SparqlSelect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Initialized,
    Executed,
    Finalized,
    Failed,
}

/// Drives one component instance: bind, inject, configure, execute, finalize.
pub struct ComponentLifecycle<C> {
    component: C,
    slots: SlotTable<C>,
    context: ComponentContext,
    state: LifecycleState,
    after_execution: Option<AfterExecution>,
}

impl<C: Component> ComponentLifecycle<C> {
    /// Wrap `component`; its slot table is validated here.
    pub fn new(component: C, context: ComponentContext) -> ComponentResult<Self> {
        let slots = C::slots();
        slots.validate()?;
        Ok(Self {
            component,
            slots,
            context,
            state: LifecycleState::Created,
            after_execution: None,
        })
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn inner(&self) -> &C {
        &self.component
    }

    pub fn context(&self) -> &ComponentContext {
        &self.context
    }

    fn prepare(&mut self, channels: &[Arc<dyn DataUnit>]) -> ComponentResult<()> {
        let bound = PortBinder::bind(&mut self.component, &self.slots, channels)?;
        self.after_execution =
            CapabilityInjector::inject(&mut self.component, &self.slots, &self.context)?;

        let Some(slot) = self.slots.configuration_slot() else {
            return Ok(());
        };
        let runtime: Option<Arc<dyn SparqlSelect>> = match self
            .slots
            .runtime_configuration_binding()
            .and_then(|binding| bound.get(binding))
        {
            Some(unit) => Some(unit.clone().as_sparql_select().ok_or_else(|| {
                ComponentError::initialization(format!(
                    "Runtime configuration unit {} ({}) is not queryable",
                    unit.iri(),
                    unit.kind()
                ))
            })?),
            None => None,
        };
        let loader = ConfigurationLoader::new(
            self.context.definition.as_ref(),
            &self.context.definition_graph,
            &self.context.descriptor.iri,
        );
        loader.load_slot(
            &mut self.component,
            slot,
            &self.context.descriptor.configurations,
            runtime.as_deref(),
        )
    }

    fn finalize(&mut self) -> ComponentResult<()> {
        match &self.after_execution {
            Some(after) => after.post_execution(),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<C: Component> SequentialComponent for ComponentLifecycle<C> {
    fn component(&self) -> &str {
        &self.context.descriptor.iri
    }

    fn initialize(&mut self, channels: &[Arc<dyn DataUnit>]) -> ComponentResult<()> {
        if self.state != LifecycleState::Created {
            return Err(ComponentError::initialization(format!(
                "Component {} can't be initialized in state {:?}",
                self.context.descriptor.iri, self.state
            )));
        }
        tracing::debug!(component = %self.context.descriptor.iri, "Initializing component");
        match self.prepare(channels) {
            Ok(()) => {
                self.state = LifecycleState::Initialized;
                Ok(())
            }
            Err(err) => {
                self.state = LifecycleState::Failed;
                tracing::error!(
                    component = %self.context.descriptor.iri,
                    error = %err,
                    "Component initialization failed"
                );
                Err(err)
            }
        }
    }

    async fn execute(&mut self) -> ComponentResult<()> {
        let iri = self.context.descriptor.iri.clone();
        if self.state != LifecycleState::Initialized {
            return Err(ComponentError::initialization(format!(
                "Component {} must be initialized before execution (state {:?})",
                iri, self.state
            )));
        }
        tracing::info!(component = %iri, "Executing component");

        let outcome = AssertUnwindSafe(self.component.execute())
            .catch_unwind()
            .await;
        let primary = match outcome {
            Ok(result) => result,
            Err(panic) => Err(ComponentError::Execution {
                component: Some(iri.clone()),
                message: "failure on uncaught fault".to_string(),
                cause: Some(panic_message(panic).into()),
            }),
        };
        if primary.is_ok() {
            self.state = LifecycleState::Executed;
        }

        let finalized = self.finalize();
        let result = match (primary, finalized) {
            (Ok(()), Ok(())) => {
                self.state = LifecycleState::Finalized;
                Ok(())
            }
            (Ok(()), Err(err)) => Err(ComponentError::Execution {
                component: Some(iri.clone()),
                message: "after-execution hook failed".to_string(),
                cause: Some(Box::new(err)),
            }),
            (Err(primary), Ok(())) => Err(primary),
            (Err(primary), Err(finalizer)) => {
                tracing::warn!(
                    component = %iri,
                    error = %finalizer,
                    "After-execution hook failed after a component failure"
                );
                Err(primary)
            }
        };
        match &result {
            Ok(()) => tracing::info!(component = %iri, "Component finished"),
            Err(err) => {
                self.state = LifecycleState::Failed;
                tracing::error!(component = %iri, error = %err, "Component failed");
            }
        }
        result
    }

    fn header(&self, key: &str) -> Option<String> {
        match key {
            headers::LOG_PACKAGES => {
                let packages = &self.context.bundle.packages;
                if packages.is_empty() {
                    return None;
                }
                let value = packages.join(",");
                tracing::debug!(packages = %value, "Log packages");
                Some(value)
            }
            _ => None,
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(panic) => match panic.downcast_ref::<&str>() {
            Some(message) => (*message).to_string(),
            None => "component panicked".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::capabilities::ExceptionFactory;
    use crate::component::context::BundleInformation;
    use crate::component::slots::ConfigurationSlot;
    use crate::error::LoadError;
    use crate::pipeline::{ComponentDescriptor, ConfigurationReference, ExecutionType};
    use crate::rdf::{MemoryStore, Quad, RdfLoadable, Term};
    use parking_lot::Mutex;

    const IRI: &str = "http://ex/c/1";
    const GRAPH: &str = "http://ex/def";
    const LIMIT: &str = "http://ex/limit";

    #[derive(Debug, Default)]
    struct Settings {
        limit: Option<String>,
    }

    impl RdfLoadable for Settings {
        fn load(&mut self, predicate: &str, value: &str) -> Result<(), LoadError> {
            if predicate == LIMIT {
                self.limit = Some(value.to_string());
            }
            Ok(())
        }
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Behaviour {
        Succeed,
        Fail,
        Panic,
    }

    struct Host {
        behaviour: Behaviour,
        settings: Option<Settings>,
        after: Option<AfterExecution>,
        errors: Option<ExceptionFactory>,
        finalized: Arc<Mutex<u32>>,
        hook_fails: bool,
    }

    impl Host {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                behaviour,
                settings: None,
                after: None,
                errors: None,
                finalized: Arc::new(Mutex::new(0)),
                hook_fails: false,
            }
        }

        fn with_failing_hook(mut self) -> Self {
            self.hook_fails = true;
            self
        }
    }

    #[async_trait]
    impl Component for Host {
        fn slots() -> SlotTable<Self> {
            SlotTable::<Self>::new()
                .after_execution("after", |c, v| c.after = Some(v))
                .exception_factory("errors", |c, v| c.errors = Some(v))
                .configuration(ConfigurationSlot::with_default("settings", |c, s: Settings| {
                    c.settings = Some(s)
                }))
        }

        async fn execute(&mut self) -> ComponentResult<()> {
            let counter = self.finalized.clone();
            let hook_fails = self.hook_fails;
            if let Some(after) = &self.after {
                after.register(move || {
                    *counter.lock() += 1;
                    if hook_fails {
                        return Err(ComponentError::execution(None, "hook broke"));
                    }
                    Ok(())
                });
            }
            match self.behaviour {
                Behaviour::Succeed => Ok(()),
                Behaviour::Fail => Err(self
                    .errors
                    .as_ref()
                    .map(|factory| factory.failure("bad input"))
                    .unwrap_or_else(|| ComponentError::execution(None, "bad input"))),
                Behaviour::Panic => panic!("boom"),
            }
        }
    }

    fn context() -> ComponentContext {
        let store = MemoryStore::from_quads([Quad::new(
            Term::iri(IRI),
            LIMIT,
            Term::literal("10"),
            Some(GRAPH),
        )]);
        let descriptor = ComponentDescriptor::new(IRI, ExecutionType::Execute)
            .with_configuration(ConfigurationReference::default());
        ComponentContext::new(descriptor, Arc::new(store), GRAPH)
    }

    #[tokio::test]
    async fn test_success_path() {
        let mut lifecycle = ComponentLifecycle::new(Host::new(Behaviour::Succeed), context()).unwrap();
        lifecycle.initialize(&[]).unwrap();
        assert_eq!(lifecycle.state(), LifecycleState::Initialized);
        assert_eq!(
            lifecycle.inner().settings.as_ref().and_then(|s| s.limit.as_deref()),
            Some("10")
        );
        lifecycle.execute().await.unwrap();
        assert_eq!(lifecycle.state(), LifecycleState::Finalized);
        assert_eq!(*lifecycle.inner().finalized.lock(), 1);
    }

    #[tokio::test]
    async fn test_domain_failure_is_rethrown_and_finalized() {
        let mut lifecycle = ComponentLifecycle::new(Host::new(Behaviour::Fail), context()).unwrap();
        lifecycle.initialize(&[]).unwrap();
        let err = lifecycle.execute().await.unwrap_err();
        assert_eq!(err.to_string(), "Execution failed: bad input");
        assert_eq!(err.component(), Some(IRI));
        assert_eq!(lifecycle.state(), LifecycleState::Failed);
        assert_eq!(*lifecycle.inner().finalized.lock(), 1);
    }

    #[tokio::test]
    async fn test_panic_is_wrapped_and_finalized() {
        let mut lifecycle = ComponentLifecycle::new(Host::new(Behaviour::Panic), context()).unwrap();
        lifecycle.initialize(&[]).unwrap();
        let err = lifecycle.execute().await.unwrap_err();
        match &err {
            ComponentError::Execution { message, cause, .. } => {
                assert_eq!(message, "failure on uncaught fault");
                assert_eq!(cause.as_ref().map(|c| c.to_string()).as_deref(), Some("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(*lifecycle.inner().finalized.lock(), 1);
    }

    #[tokio::test]
    async fn test_hook_failure_after_success_surfaces() {
        let host = Host::new(Behaviour::Succeed).with_failing_hook();
        let mut lifecycle = ComponentLifecycle::new(host, context()).unwrap();
        lifecycle.initialize(&[]).unwrap();
        let err = lifecycle.execute().await.unwrap_err();
        match &err {
            ComponentError::Execution {
                component, message, ..
            } => {
                assert_eq!(component.as_deref(), Some(IRI));
                assert_eq!(message, "after-execution hook failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(crate::error::error_chain(&err).ends_with("hook broke"));
        assert_eq!(lifecycle.state(), LifecycleState::Failed);
        assert_eq!(*lifecycle.inner().finalized.lock(), 1);
    }

    #[tokio::test]
    async fn test_domain_failure_wins_over_hook_failure() {
        let host = Host::new(Behaviour::Fail).with_failing_hook();
        let mut lifecycle = ComponentLifecycle::new(host, context()).unwrap();
        lifecycle.initialize(&[]).unwrap();
        let err = lifecycle.execute().await.unwrap_err();
        assert_eq!(err.to_string(), "Execution failed: bad input");
        assert_eq!(lifecycle.state(), LifecycleState::Failed);
        assert_eq!(*lifecycle.inner().finalized.lock(), 1);
    }

    #[tokio::test]
    async fn test_execute_requires_initialize() {
        let mut lifecycle = ComponentLifecycle::new(Host::new(Behaviour::Succeed), context()).unwrap();
        let err = lifecycle.execute().await.unwrap_err();
        assert!(matches!(err, ComponentError::Initialization { .. }));
        assert_eq!(lifecycle.state(), LifecycleState::Created);
    }

    #[tokio::test]
    async fn test_initialize_twice_fails() {
        let mut lifecycle = ComponentLifecycle::new(Host::new(Behaviour::Succeed), context()).unwrap();
        lifecycle.initialize(&[]).unwrap();
        assert!(lifecycle.initialize(&[]).is_err());
    }

    #[test]
    fn test_log_packages_header() {
        let lifecycle = ComponentLifecycle::new(
            Host::new(Behaviour::Succeed),
            context().with_bundle(BundleInformation {
                packages: vec!["loader".into(), "loader::io".into()],
            }),
        )
        .unwrap();
        assert_eq!(
            lifecycle.header(headers::LOG_PACKAGES).as_deref(),
            Some("loader,loader::io")
        );
        assert_eq!(lifecycle.header("unknown"), None);

        let plain = ComponentLifecycle::new(Host::new(Behaviour::Succeed), context()).unwrap();
        assert_eq!(plain.header(headers::LOG_PACKAGES), None);
    }
}
