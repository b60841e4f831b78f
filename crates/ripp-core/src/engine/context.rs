use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::enzymes::registry::EnzymeRegistry;
use crate::core::models::enzyme::Enzyme;

/// Read-only collaborators shared by every task of a design run.
pub struct Context<'a> {
    pub registry: &'a EnzymeRegistry,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a EnzymeRegistry, reporter: &'a ProgressReporter<'a>) -> Self {
        Self { registry, reporter }
    }

    pub fn enzyme(&self, name: &str) -> Result<&'a Enzyme, EngineError> {
        Ok(self.registry.require(name)?)
    }
}
