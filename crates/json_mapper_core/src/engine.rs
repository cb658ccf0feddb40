//! Recursive configuration walker.

use serde_json::{Map, Value};
use tracing::debug;

use crate::dispatcher::MapperDispatcher;
use crate::mapping::{MappingConfiguration, MappingNode};
use crate::Result;

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

/// Builds the target tree by walking a parsed configuration.
pub struct MappingEngine<'a> {
    dispatcher: MapperDispatcher<'a>,
}

impl<'a> MappingEngine<'a> {
    pub fn new(dispatcher: MapperDispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Processes every entry of `config` against `source`.
    ///
    /// Output keys follow the configuration's declaration order. A rule that
    /// yields nothing leaves its key out entirely; a nested block always
    /// produces an object, even an empty one. The first error aborts the
    /// whole call.
    pub fn process(
        &self,
        source: &Value,
        config: &MappingConfiguration,
    ) -> Result<Map<String, Value>> {
        let mut target = Map::new();

        for (key, node) in config.iter() {
            match node {
                MappingNode::Rule(rule) => match self.dispatcher.dispatch(rule, source)? {
                    Some(value) => {
                        target.insert(key.to_string(), value);
                    }
                    None => debug!(key, "Rule produced no value, omitting key"),
                },
                MappingNode::Nested(nested) => {
                    let nested_target = self.process(source, nested)?;
                    target.insert(key.to_string(), Value::Object(nested_target));
                }
            }
        }

        Ok(target)
    }
}
