use serde::{Deserialize, Serialize};

/// What discovery does with a class name no location can resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoveryPolicy {
    /// Abort the whole discovery pass.
    #[default]
    FailFast,
    /// Warn, skip the entry and keep going.
    BestEffort,
}

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Application identity exported as `APPLICATION`.
    pub application: String,
    /// User identity exported as `USER`.
    pub user: String,
    /// Resource name scanned for command class names.
    pub discovery_resource: String,
    pub discovery_policy: DiscoveryPolicy,
    /// Address commands as `scope:name` in batch runs.
    pub multi_scope: bool,
    /// Interactive prompt; `{USER}` and `{APPLICATION}` are expanded.
    pub prompt: String,
}

pub const DEFAULT_APPLICATION: &str = "root";
pub const DEFAULT_USER: &str = "shell";
pub const DEFAULT_DISCOVERY_RESOURCE: &str = "shell/commands";

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            application: DEFAULT_APPLICATION.to_string(),
            user: DEFAULT_USER.to_string(),
            discovery_resource: DEFAULT_DISCOVERY_RESOURCE.to_string(),
            discovery_policy: DiscoveryPolicy::FailFast,
            multi_scope: true,
            prompt: crate::shell::DEFAULT_PROMPT.to_string(),
        }
    }
}
