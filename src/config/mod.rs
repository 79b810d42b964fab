//! Shell configuration: identity, discovery settings and prompt.

mod loader;
mod types;

pub use loader::{ConfigError, CONFIG_ENV, NAME_ENV};
pub use types::{
    DiscoveryPolicy, ShellConfig, DEFAULT_APPLICATION, DEFAULT_DISCOVERY_RESOURCE, DEFAULT_USER,
};
