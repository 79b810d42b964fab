//! Command registry with parent fallback.
//!
//! Session registries fall back to the factory registry, so commands
//! registered at the factory level are visible from every session.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::shell::command::{Command, CommandType};

/// How a command ended up in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Registered in code.
    Programmatic,
    /// Registered by scanning a discovery resource.
    Discovered,
}

/// A live registry entry.
#[derive(Clone)]
pub struct RegisteredCommand {
    pub class_name: String,
    pub scope: String,
    pub name: String,
    pub description: String,
    pub origin: Origin,
    pub command: Arc<dyn Command>,
}

impl RegisteredCommand {
    pub fn from_type(ty: &CommandType, origin: Origin) -> Self {
        Self {
            class_name: ty.class_name().to_string(),
            scope: ty.scope().to_string(),
            name: ty.name().to_string(),
            description: ty.description().to_string(),
            origin,
            command: ty.instantiate(),
        }
    }

    pub fn key(&self) -> String {
        format!("{}:{}", self.scope, self.name)
    }
}

/// Thread-safe registry handle. Clones share storage.
#[derive(Clone, Default)]
pub struct Registry {
    commands: Arc<RwLock<BTreeMap<String, RegisteredCommand>>>,
    parent: Option<Box<Registry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry that falls back to `parent` on lookup.
    pub fn with_parent(parent: Registry) -> Self {
        Self {
            commands: Arc::default(),
            parent: Some(Box::new(parent)),
        }
    }

    /// Insert or replace the entry under `scope:name`. Returns the replaced entry.
    pub fn register(&self, entry: RegisteredCommand) -> Option<RegisteredCommand> {
        self.commands.write().insert(entry.key(), entry)
    }

    /// Exact `scope:name` lookup, own entries first, then the parent chain.
    pub fn get(&self, key: &str) -> Option<RegisteredCommand> {
        if let Some(entry) = self.commands.read().get(key) {
            return Some(entry.clone());
        }
        self.parent.as_ref().and_then(|p| p.get(key))
    }

    /// All visible entries whose bare name matches, any scope.
    pub fn find_by_name(&self, name: &str) -> Vec<RegisteredCommand> {
        self.commands()
            .into_iter()
            .filter(|entry| entry.name == name)
            .collect()
    }

    /// Snapshot of every visible entry sorted by key; own entries shadow the parent's.
    pub fn commands(&self) -> Vec<RegisteredCommand> {
        let mut merged: BTreeMap<String, RegisteredCommand> = match &self.parent {
            Some(parent) => parent
                .commands()
                .into_iter()
                .map(|entry| (entry.key(), entry))
                .collect(),
            None => BTreeMap::new(),
        };
        for (key, entry) in self.commands.read().iter() {
            merged.insert(key.clone(), entry.clone());
        }
        merged.into_values().collect()
    }

    /// Number of entries held directly (parent excluded).
    pub fn len(&self) -> usize {
        self.commands.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::session::Session;

    struct Noop;

    impl Command for Noop {
        fn execute(&self, _session: &mut Session, _args: &[String]) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn entry(scope: &str, name: &str, description: &str) -> RegisteredCommand {
        let ty = CommandType::new(
            format!("test.{}", name),
            scope,
            name,
            description,
            || Arc::new(Noop) as Arc<dyn Command>,
        );
        RegisteredCommand::from_type(&ty, Origin::Programmatic)
    }

    #[test]
    fn child_falls_back_to_parent() {
        let parent = Registry::new();
        parent.register(entry("shell", "echo", "parent"));
        let child = Registry::with_parent(parent.clone());

        assert!(child.get("shell:echo").is_some());
        assert_eq!(child.len(), 0);
        assert!(child.get("shell:missing").is_none());
    }

    #[test]
    fn child_entries_shadow_parent_in_listing() {
        let parent = Registry::new();
        parent.register(entry("shell", "echo", "parent"));
        parent.register(entry("shell", "help", "parent"));
        let child = Registry::with_parent(parent);
        child.register(entry("shell", "echo", "child"));

        let commands = child.commands();
        assert_eq!(commands.len(), 2);
        let echo = commands.iter().find(|c| c.name == "echo").unwrap();
        assert_eq!(echo.description, "child");
    }

    #[test]
    fn register_replaces_same_key() {
        let registry = Registry::new();
        assert!(registry.register(entry("a", "x", "one")).is_none());
        let previous = registry.register(entry("a", "x", "two"));
        assert_eq!(previous.map(|p| p.description), Some("one".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn find_by_name_spans_scopes() {
        let registry = Registry::new();
        registry.register(entry("a", "list", ""));
        registry.register(entry("b", "list", ""));
        registry.register(entry("b", "other", ""));
        assert_eq!(registry.find_by_name("list").len(), 2);
        assert_eq!(registry.find_by_name("other").len(), 1);
        assert!(registry.find_by_name("missing").is_empty());
    }
}
