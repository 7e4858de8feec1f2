//! Runtime services injected into a component's capability slots.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::error::{BoxError, ComponentError};
use crate::event_bus::{publish, EventSender, ExecutionEvent};
use crate::paths::guarded_join;
use crate::rdf::{property_values, SparqlSelect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    ProgressReport,
    DefinitionReader,
    AfterExecution,
    WorkingDirectory,
    ExceptionFactory,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapabilityKind::ProgressReport => "progress-report",
            CapabilityKind::DefinitionReader => "definition-reader",
            CapabilityKind::AfterExecution => "after-execution",
            CapabilityKind::WorkingDirectory => "working-directory",
            CapabilityKind::ExceptionFactory => "exception-factory",
        };
        f.write_str(name)
    }
}

/// A runtime service ready to be placed into a slot of the matching kind.
pub enum Capability {
    ProgressReport(ProgressReport),
    DefinitionReader(DefinitionReader),
    AfterExecution(AfterExecution),
    WorkingDirectory(WorkingDirectory),
    ExceptionFactory(ExceptionFactory),
}

impl Capability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::ProgressReport(_) => CapabilityKind::ProgressReport,
            Capability::DefinitionReader(_) => CapabilityKind::DefinitionReader,
            Capability::AfterExecution(_) => CapabilityKind::AfterExecution,
            Capability::WorkingDirectory(_) => CapabilityKind::WorkingDirectory,
            Capability::ExceptionFactory(_) => CapabilityKind::ExceptionFactory,
        }
    }
}

/// Progress of one component, published as execution events.
#[derive(Clone)]
pub struct ProgressReport {
    component: String,
    events: Option<EventSender>,
    total: Arc<AtomicU64>,
    current: Arc<AtomicU64>,
}

impl ProgressReport {
    pub fn new(component: impl Into<String>, events: Option<EventSender>) -> Self {
        Self {
            component: component.into(),
            events,
            total: Arc::new(AtomicU64::new(0)),
            current: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn start(&self, total: u64) {
        self.total.store(total, Ordering::SeqCst);
        self.current.store(0, Ordering::SeqCst);
        tracing::debug!(component = %self.component, total, "Progress started");
        publish(
            self.events.as_ref(),
            ExecutionEvent::ProgressStart {
                component: self.component.clone(),
                total,
                timestamp: Utc::now(),
            },
        );
    }

    pub fn entry_processed(&self) {
        let current = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        publish(
            self.events.as_ref(),
            ExecutionEvent::ProgressUpdate {
                component: self.component.clone(),
                current,
                total: self.total.load(Ordering::SeqCst),
                timestamp: Utc::now(),
            },
        );
    }

    pub fn done(&self) {
        tracing::debug!(component = %self.component, "Progress done");
        publish(
            self.events.as_ref(),
            ExecutionEvent::ProgressDone {
                component: self.component.clone(),
                timestamp: Utc::now(),
            },
        );
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Read-only access to the component's own resource in the pipeline
/// definition.
#[derive(Clone)]
pub struct DefinitionReader {
    source: Arc<dyn SparqlSelect>,
    graph: String,
    component: String,
}

impl DefinitionReader {
    pub fn new(
        source: Arc<dyn SparqlSelect>,
        graph: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            source,
            graph: graph.into(),
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn graph(&self) -> &str {
        &self.graph
    }

    /// All values of `predicate` on the component resource.
    pub fn properties(&self, predicate: &str) -> Result<Vec<String>, ComponentError> {
        Ok(property_values(
            self.source.as_ref(),
            Some(&self.graph),
            &self.component,
            predicate,
        )?)
    }
}

type Hook = Box<dyn FnOnce() -> Result<(), ComponentError> + Send>;

/// Collector of callbacks run once after the component's logic, on both the
/// success and the failure path.
#[derive(Clone, Default)]
pub struct AfterExecution {
    hooks: Arc<Mutex<Vec<Hook>>>,
}

impl AfterExecution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, hook: F)
    where
        F: FnOnce() -> Result<(), ComponentError> + Send + 'static,
    {
        self.hooks.lock().push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.lock().is_empty()
    }

    /// Run and drop every registered hook in registration order. All hooks run
    /// even when one fails; the first failure is returned.
    pub(crate) fn post_execution(&self) -> Result<(), ComponentError> {
        let hooks: Vec<Hook> = std::mem::take(&mut *self.hooks.lock());
        let mut first = None;
        for hook in hooks {
            if let Err(err) = hook() {
                if first.is_none() {
                    first = Some(err);
                } else {
                    tracing::warn!(error = %err, "Additional after-execution hook failed");
                }
            }
        }
        first.map_or(Ok(()), Err)
    }
}

/// The component's private working directory.
#[derive(Debug, Clone)]
pub struct WorkingDirectory {
    root: PathBuf,
}

impl WorkingDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of `relative` inside the directory; escapes are refused.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, ComponentError> {
        guarded_join(&self.root, relative).ok_or_else(|| {
            ComponentError::execution(
                None,
                format!("Path escapes the working directory: {}", relative),
            )
        })
    }

    /// Create the directory (and parents) when missing.
    pub fn ensure(&self) -> Result<&Path, ComponentError> {
        std::fs::create_dir_all(&self.root).map_err(|err| ComponentError::Execution {
            component: None,
            message: format!("Can't create working directory {}", self.root.display()),
            cause: Some(Box::new(err)),
        })?;
        Ok(&self.root)
    }
}

/// Builds execution errors attributed to one component.
#[derive(Debug, Clone)]
pub struct ExceptionFactory {
    component: String,
}

impl ExceptionFactory {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    pub fn failure(&self, message: impl Into<String>) -> ComponentError {
        ComponentError::execution(Some(&self.component), message)
    }

    pub fn failure_with(
        &self,
        message: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> ComponentError {
        ComponentError::Execution {
            component: Some(self.component.clone()),
            message: message.into(),
            cause: Some(cause.into()),
        }
    }
}
