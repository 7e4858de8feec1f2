use super::capabilities::{
    AfterExecution, Capability, CapabilityKind, DefinitionReader, ExceptionFactory, ProgressReport,
    WorkingDirectory,
};
use super::context::ComponentContext;
use super::slots::SlotTable;
use crate::error::{ComponentError, ComponentResult};

/// Fills a component's capability slots with runtime services.
pub struct CapabilityInjector;

impl CapabilityInjector {
    /// Inject every declared capability. All after-execution slots share one
    /// collector, which is returned so the lifecycle can run it.
    pub fn inject<C: 'static>(
        component: &mut C,
        table: &SlotTable<C>,
        context: &ComponentContext,
    ) -> ComponentResult<Option<AfterExecution>> {
        let iri = context.component();
        let mut collector: Option<AfterExecution> = None;
        for slot in table.capabilities() {
            let capability = match slot.kind() {
                CapabilityKind::ProgressReport => Capability::ProgressReport(ProgressReport::new(
                    iri,
                    context.events.clone(),
                )),
                CapabilityKind::DefinitionReader => {
                    Capability::DefinitionReader(DefinitionReader::new(
                        context.definition.clone(),
                        context.definition_graph.as_str(),
                        iri,
                    ))
                }
                CapabilityKind::AfterExecution => Capability::AfterExecution(
                    collector.get_or_insert_with(AfterExecution::new).clone(),
                ),
                CapabilityKind::WorkingDirectory => {
                    let path = context.descriptor.working_directory.as_ref().ok_or_else(|| {
                        ComponentError::initialization(format!(
                            "No working directory for capability '{}' of {}",
                            slot.name, iri
                        ))
                    })?;
                    Capability::WorkingDirectory(WorkingDirectory::new(path.clone()))
                }
                CapabilityKind::ExceptionFactory => {
                    Capability::ExceptionFactory(ExceptionFactory::new(iri))
                }
            };
            slot.inject(component, capability)?;
            tracing::debug!(component = %iri, capability = %slot.kind(), "Capability injected");
        }
        Ok(collector)
    }
}
