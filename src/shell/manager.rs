//! Lifecycle manager binding two registries.
//!
//! `dependencies` is the registry the manager resolves against (usually the
//! session's), `registrations` is where registered commands land (usually the
//! factory's). Lookups consult both, so a command registered against either
//! is visible through the manager.

use crate::shell::command::CommandType;
use crate::shell::registry::{Origin, RegisteredCommand, Registry};

#[derive(Clone)]
pub struct Manager {
    dependencies: Registry,
    registrations: Registry,
    origin: Origin,
}

impl Manager {
    /// Manager for programmatic registration.
    pub fn new(dependencies: Registry, registrations: Registry) -> Self {
        Self {
            dependencies,
            registrations,
            origin: Origin::Programmatic,
        }
    }

    /// Manager whose registrations are marked as discovery-sourced.
    pub fn for_discovery(dependencies: Registry, registrations: Registry) -> Self {
        Self {
            dependencies,
            registrations,
            origin: Origin::Discovered,
        }
    }

    /// Instantiate `ty` and register it. Re-registering the same type replaces
    /// the earlier instance.
    pub fn register(&self, ty: &CommandType) -> RegisteredCommand {
        let entry = RegisteredCommand::from_type(ty, self.origin);
        if let Some(previous) = self.registrations.register(entry.clone()) {
            tracing::debug!(
                key = %entry.key(),
                previous = %previous.class_name,
                "Replaced registered command"
            );
        } else {
            tracing::debug!(
                key = %entry.key(),
                class = %entry.class_name,
                origin = ?self.origin,
                "Registered command"
            );
        }
        entry
    }

    /// Look a `scope:name` key up in the dependency side first, then in the
    /// registration side.
    pub fn lookup(&self, key: &str) -> Option<RegisteredCommand> {
        self.dependencies
            .get(key)
            .or_else(|| self.registrations.get(key))
    }
}
