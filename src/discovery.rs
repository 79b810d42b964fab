//! Command discovery: register every command type listed in the discovery
//! resources visible through a loading context.
//!
//! Resource format: one class name per line; surrounding whitespace is
//! ignored, and empty lines or lines starting with `#` are skipped.

use crate::config::DiscoveryPolicy;
use crate::error::{BootstrapError, Result};
use crate::loader::LoadingContext;
use crate::shell::{Manager, Session};

/// An entry that could not be resolved under [`DiscoveryPolicy::BestEffort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub class_name: String,
    /// Location whose resource listed it.
    pub origin: String,
}

/// Outcome of a discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Registry keys (`scope:name`) registered, in resource order.
    pub registered: Vec<String>,
    pub skipped: Vec<SkippedEntry>,
}

/// Class names listed by one resource text, comments and blanks removed.
pub fn listed_class_names(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Scan every copy of `resource` in `context` and register what it lists.
///
/// Registrations go through a discovery-scoped [`Manager`] bound to the
/// session registry and the factory registry.
pub fn discover_commands(
    session: &Session,
    context: &LoadingContext,
    resource: &str,
    policy: DiscoveryPolicy,
) -> Result<DiscoveryReport> {
    let manager = Manager::for_discovery(
        session.registry().clone(),
        session.factory_registry().clone(),
    );
    let mut report = DiscoveryReport::default();

    for found in context.resources(resource) {
        tracing::debug!(resource, origin = %found.origin, "Reading discovery resource");
        for class_name in listed_class_names(&found.text) {
            match context.resolve(class_name) {
                Some(ty) => {
                    let entry = manager.register(&ty);
                    report.registered.push(entry.key());
                }
                None => match policy {
                    DiscoveryPolicy::FailFast => {
                        return Err(BootstrapError::Unresolvable {
                            class_name: class_name.to_string(),
                            resource: found.origin.clone(),
                        });
                    }
                    DiscoveryPolicy::BestEffort => {
                        tracing::warn!(
                            class = class_name,
                            origin = %found.origin,
                            "Skipping unresolvable command type"
                        );
                        report.skipped.push(SkippedEntry {
                            class_name: class_name.to_string(),
                            origin: found.origin.clone(),
                        });
                    }
                },
            }
        }
    }

    tracing::info!(
        registered = report.registered.len(),
        skipped = report.skipped.len(),
        "Command discovery finished"
    );
    Ok(report)
}
