//! Compile-time table of command types, keyed by class name.

use std::collections::BTreeMap;

use crate::shell::builtins::builtin_types;
use crate::shell::CommandType;

/// Name → type table plus the resources shipped alongside it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    types: BTreeMap<String, CommandType>,
    resources: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in commands, listed by a built-in copy of `resource`.
    pub fn builtin(resource: &str) -> Self {
        let mut catalog = Self::new();
        let mut listing = String::from("# Built-in shell commands\n");
        for ty in builtin_types() {
            listing.push_str(ty.class_name());
            listing.push('\n');
            catalog.insert(ty);
        }
        catalog.add_resource(resource, listing);
        catalog
    }

    pub fn insert(&mut self, ty: CommandType) -> &mut Self {
        self.types.insert(ty.class_name().to_string(), ty);
        self
    }

    pub fn add_resource(&mut self, name: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.resources.insert(name.into(), text.into());
        self
    }

    pub fn resolve(&self, class_name: &str) -> Option<CommandType> {
        self.types.get(class_name).cloned()
    }

    pub fn resource(&self, name: &str) -> Option<&str> {
        self.resources.get(name).map(String::as_str)
    }
}
