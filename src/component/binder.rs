use std::collections::HashMap;
use std::sync::Arc;

use super::data_unit::DataUnit;
use super::slots::SlotTable;
use crate::error::{ComponentError, ComponentResult};

/// Assigns the channels supplied for one execution to a component's ports.
pub struct PortBinder;

impl PortBinder {
    /// Bind every declared port of `table` from `channels`.
    ///
    /// When several channels share a binding the last one wins. Returns the
    /// bound channels keyed by binding.
    pub fn bind<C: 'static>(
        component: &mut C,
        table: &SlotTable<C>,
        channels: &[Arc<dyn DataUnit>],
    ) -> ComponentResult<HashMap<String, Arc<dyn DataUnit>>> {
        let mut bound = HashMap::new();
        for port in table.ports() {
            let binding = port.declaration.binding.as_str();
            let Some(unit) = channels.iter().rev().find(|unit| unit.binding() == binding) else {
                if port.declaration.is_required() {
                    return Err(ComponentError::MissingChannel {
                        binding: binding.to_string(),
                    });
                }
                tracing::debug!(binding = %binding, "Optional port left unbound");
                continue;
            };
            if !port.assign(component, unit.clone()) {
                return Err(ComponentError::TypeMismatch {
                    binding: binding.to_string(),
                    found: unit.kind().to_string(),
                    expected: port.expected().to_string(),
                });
            }
            tracing::debug!(binding = %binding, unit = %unit.iri(), "Port bound");
            bound.insert(binding.to_string(), unit.clone());
        }
        Ok(bound)
    }
}
