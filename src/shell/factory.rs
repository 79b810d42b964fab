use crate::shell::manager::Manager;
use crate::shell::registry::Registry;
use crate::shell::session::{Input, Output, Session};
use crate::terminal::TerminalHandle;

/// Creates sessions that share one factory-level registry.
pub struct SessionFactory {
    registry: Registry,
    manager: Manager,
}

impl SessionFactory {
    pub fn new() -> Self {
        let registry = Registry::new();
        let manager = Manager::new(registry.clone(), registry.clone());
        Self { registry, manager }
    }

    /// Registry shared by every session this factory creates.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Manager bound to the factory registry on both sides.
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    /// Wire a new session to the given streams and terminal.
    ///
    /// `input` is `None` when the session will only execute a batch command.
    /// No commands are registered here.
    pub fn create_session(
        &self,
        input: Option<Input>,
        out: Output,
        err: Output,
        terminal: TerminalHandle,
    ) -> Session {
        Session::new(input, out, err, terminal, self.registry.clone())
    }
}

impl Default for SessionFactory {
    fn default() -> Self {
        Self::new()
    }
}
