//! Argument classifier: raw args → classified args.

use crate::args::registry::{FlagArity, FlagDef, FlagTarget};
use crate::error::{BootstrapError, Result};

/// A classified argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedArg {
    /// Known bootstrap flag with its value, if it takes one.
    Flag {
        target: FlagTarget,
        flag: String, // normalized to long form
        value: Option<String>,
    },
    /// Anything else, part of the inline command.
    Positional(String),
}

/// Classify raw args against the registry.
///
/// Single left-to-right pass. A value-taking flag in its two-token form
/// consumes the next argument unconditionally, even if it looks like a flag;
/// in last position it is a usage error.
pub fn classify(raw_args: &[String], registry: &[FlagDef]) -> Result<Vec<ClassifiedArg>> {
    let mut args = Vec::with_capacity(raw_args.len());
    let mut iter = raw_args.iter();

    while let Some(arg) = iter.next() {
        if let Some((def, value)) = registry
            .iter()
            .find_map(|d| d.inline_value(arg).map(|v| (d, v)))
        {
            args.push(ClassifiedArg::Flag {
                target: def.target,
                flag: def.long.to_string(),
                value: Some(value.to_string()),
            });
            continue;
        }

        let Some(def) = registry.iter().find(|d| d.matches(arg)) else {
            args.push(ClassifiedArg::Positional(arg.clone()));
            continue;
        };

        let value = match def.arity {
            FlagArity::NoValue => None,
            FlagArity::RequiresValue => match iter.next() {
                Some(next) => Some(next.clone()),
                None => {
                    return Err(BootstrapError::MissingValue {
                        flag: arg.clone(),
                    })
                }
            },
        };

        args.push(ClassifiedArg::Flag {
            target: def.target,
            flag: def.long.to_string(),
            value,
        });
    }

    Ok(args)
}
