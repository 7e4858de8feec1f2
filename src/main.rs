use std::sync::Arc;

use async_trait::async_trait;
use graphetl::component::{
    AfterExecution, Component, ComponentContext, ComponentLifecycle, ConfigurationSlot, DataUnit,
    ProgressReport, SequentialComponent, SlotTable,
};
use graphetl::dataunit::GraphDataUnit;
use graphetl::error::{ComponentError, LoadError};
use graphetl::executor::{self, ExecutionModel, ExecutionRecord};
use graphetl::pipeline::PipelineDefinition;
use graphetl::rdf::vocabulary::{execution_type, lp};
use graphetl::rdf::{MemoryStore, Quad, RdfLoadable, Term, RDF_TYPE};
use graphetl::{create_event_channel, CoreConfig};

const PIPELINE: &str = "http://localhost/pipeline/demo";
const GRAPH: &str = "http://localhost/pipeline/demo/graph";
const CONFIG_GRAPH: &str = "http://localhost/pipeline/demo/config/1";
const COUNTER_CONFIG: &str = "http://localhost/ontology/CounterConfiguration";
const COUNT: &str = "http://localhost/ontology/count";
const LABEL: &str = "http://localhost/ontology/label";

#[derive(Debug, Default)]
struct CounterConfiguration {
    count: u64,
    label: String,
}

impl RdfLoadable for CounterConfiguration {
    fn rdf_type(&self) -> Option<&str> {
        Some(COUNTER_CONFIG)
    }

    fn load(&mut self, predicate: &str, value: &str) -> Result<(), LoadError> {
        match predicate {
            COUNT => {
                self.count = value
                    .parse()
                    .map_err(|_| LoadError::invalid_value(predicate, value, "expected integer"))?
            }
            LABEL => self.label = value.to_string(),
            _ => {}
        }
        Ok(())
    }
}

/// Writes `count` labelled resources into its output.
#[derive(Default)]
struct Counter {
    output: Option<Arc<GraphDataUnit>>,
    configuration: CounterConfiguration,
    progress: Option<ProgressReport>,
    after: Option<AfterExecution>,
}

#[async_trait]
impl Component for Counter {
    fn slots() -> SlotTable<Self> {
        SlotTable::<Self>::new()
            .output::<GraphDataUnit>("Output", |c, unit| c.output = Some(unit))
            .runtime_configuration("Configuration")
            .progress("progress", |c, progress| c.progress = Some(progress))
            .after_execution("after", |c, after| c.after = Some(after))
            .configuration(ConfigurationSlot::with_default(
                "configuration",
                |c, configuration: CounterConfiguration| c.configuration = configuration,
            ))
    }

    async fn execute(&mut self) -> Result<(), ComponentError> {
        let output = self
            .output
            .clone()
            .ok_or_else(|| ComponentError::execution(None, "output not bound"))?;
        if let Some(after) = &self.after {
            let written = output.clone();
            after.register(move || {
                tracing::info!(quads = written.len(), "Counter output closed");
                Ok(())
            });
        }
        if let Some(progress) = &self.progress {
            progress.start(self.configuration.count);
        }
        for index in 0..self.configuration.count {
            output.insert(Quad::new(
                Term::iri(format!("http://localhost/resource/{}", index)),
                LABEL,
                Term::literal(format!("{} #{}", self.configuration.label, index)),
                None,
            ));
            if let Some(progress) = &self.progress {
                progress.entry_processed();
            }
        }
        if let Some(progress) = &self.progress {
            progress.done();
        }
        Ok(())
    }
}

fn definition() -> MemoryStore {
    let quad = |s: &str, p: &str, o: Term, g: &str| Quad::new(Term::iri(s), p, o, Some(g));
    MemoryStore::from_quads([
        quad(PIPELINE, RDF_TYPE, Term::iri(lp::PIPELINE), GRAPH),
        quad(PIPELINE, lp::HAS_COMPONENT, Term::iri("http://localhost/component/counter"), GRAPH),
        quad(PIPELINE, lp::HAS_COMPONENT, Term::iri("http://localhost/component/skipped"), GRAPH),
        quad(
            "http://localhost/component/skipped",
            lp::EXECUTION_TYPE,
            Term::iri(execution_type::SKIP),
            GRAPH,
        ),
        quad(
            "http://localhost/component/counter",
            lp::CONFIGURATION,
            Term::iri("http://localhost/component/counter/configuration/1"),
            GRAPH,
        ),
        quad(
            "http://localhost/component/counter/configuration/1",
            lp::ORDER,
            Term::literal("1"),
            GRAPH,
        ),
        quad(
            "http://localhost/component/counter/configuration/1",
            lp::CONFIGURATION_GRAPH,
            Term::iri(CONFIG_GRAPH),
            GRAPH,
        ),
        quad("http://localhost/config/1", RDF_TYPE, Term::iri(COUNTER_CONFIG), CONFIG_GRAPH),
        quad("http://localhost/config/1", COUNT, Term::literal("3"), CONFIG_GRAPH),
        quad("http://localhost/config/1", LABEL, Term::literal("demo"), CONFIG_GRAPH),
    ])
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::default();
    graphetl::logging::init(&config.logging);

    println!("=== graphetl component execution ===\n");

    let definition: Arc<MemoryStore> = Arc::new(definition());
    let pipeline = PipelineDefinition::load(
        definition.as_ref(),
        PIPELINE,
        GRAPH,
        config.working_root.as_deref(),
    )?;

    let (sender, mut receiver) = create_event_channel();
    let mut execution =
        ExecutionModel::new("http://localhost/execution/1").with_events(sender.clone());
    let output = Arc::new(GraphDataUnit::new("http://localhost/dataunit/output", "Output"));
    let mut iris: Vec<String> = pipeline.components().map(|c| c.iri.clone()).collect();
    iris.sort();
    let channel: Arc<dyn DataUnit> = output.clone();
    for iri in &iris {
        execution.add(ExecutionRecord::new(iri.as_str()).with_channels(vec![channel.clone()]));
    }

    for iri in &iris {
        let Some(descriptor) = pipeline.component(iri) else {
            continue;
        };
        let context = ComponentContext::new(descriptor.clone(), definition.clone(), GRAPH)
            .with_events(sender.clone());
        let lifecycle: Box<dyn SequentialComponent> =
            Box::new(ComponentLifecycle::new(Counter::default(), context)?);
        let Some(mut component_executor) = executor::create(&pipeline, &execution, iri, lifecycle)
        else {
            println!("No executor for {}", iri);
            continue;
        };
        component_executor.execute().await;
        if component_executor.unexpected_termination() {
            println!("Execution of {} terminated unexpectedly", iri);
        }
    }
    drop(sender);
    drop(execution);

    while let Some(event) = receiver.recv().await {
        println!("{}", serde_json::to_string(&event)?);
    }
    println!("\nOutput holds {} quads", output.len());
    Ok(())
}
