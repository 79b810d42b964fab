//! Argument handling for the shell bootstrap.
//!
//! ```text
//! Raw args → Classify → Fold → BootstrapConfig
//! ```
//!
//! Each stage is a pure function that can be unit-tested independently.

mod bootstrap_config;
mod classifier;
mod registry;

pub use bootstrap_config::{parse_args, BootstrapConfig};
pub use classifier::{classify, ClassifiedArg};
pub use registry::{flag_registry, usage, FlagArity, FlagDef, FlagTarget};
