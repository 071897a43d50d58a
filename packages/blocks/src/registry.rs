//! Block definition registry.
//!
//! Built once from a list of definitions and read-only afterwards.
//! Registering the same type twice is rejected.

use crate::definition::BlockDefinition;
use crate::error::{BlockError, BlockResult};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Definitions in registration order
    definitions: Vec<BlockDefinition>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn register(definitions: Vec<BlockDefinition>) -> BlockResult<Self> {
        let mut index = HashMap::with_capacity(definitions.len());

        for (position, def) in definitions.iter().enumerate() {
            if def.block_type.is_empty() {
                return Err(BlockError::EmptyType);
            }
            if index.insert(def.block_type.clone(), position).is_some() {
                return Err(BlockError::DuplicateType(def.block_type.clone()));
            }
            debug!(block_type = %def.block_type, category = %def.category, "Registering block");
        }

        info!(blocks = definitions.len(), "Block registry built");

        Ok(Self { definitions, index })
    }

    pub fn lookup(&self, block_type: &str) -> Option<&BlockDefinition> {
        self.index.get(block_type).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.index.contains_key(block_type)
    }

    pub fn definitions(&self) -> &[BlockDefinition] {
        &self.definitions
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.block_type.as_str())
    }

    /// Definitions grouped by category, each group in registration order
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&BlockDefinition>> {
        let mut groups: BTreeMap<&str, Vec<&BlockDefinition>> = BTreeMap::new();
        for def in &self.definitions {
            groups.entry(def.category.as_str()).or_default().push(def);
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
