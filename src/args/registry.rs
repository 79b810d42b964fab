//! Flag registry, the single source of truth for bootstrap flags.

/// Which bootstrap setting a flag writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagTarget {
    /// Root directory scanned for command archives.
    Classpath,
    /// Read the command text from standard input.
    Batch,
    /// Read the command text from a file.
    File,
}

/// Whether a flag takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagArity {
    /// Boolean flag, no value (e.g., --batch).
    NoValue,
    /// Requires exactly one value, inline (`--file=x`) or as the next token.
    RequiresValue,
}

/// A single flag definition.
#[derive(Debug, Clone)]
pub struct FlagDef {
    /// Primary long form (e.g., "--classpath").
    pub long: &'static str,
    /// Short form (e.g., "-c").
    pub short: &'static str,
    /// Does it take a value?
    pub arity: FlagArity,
    /// Setting the flag writes.
    pub target: FlagTarget,
    /// Human-readable description (for usage text).
    pub description: &'static str,
}

/// Build the complete flag registry.
pub fn flag_registry() -> Vec<FlagDef> {
    vec![
        FlagDef {
            long: "--classpath",
            short: "-c",
            arity: FlagArity::RequiresValue,
            target: FlagTarget::Classpath,
            description: "Directory scanned recursively for command archives",
        },
        FlagDef {
            long: "--batch",
            short: "-b",
            arity: FlagArity::NoValue,
            target: FlagTarget::Batch,
            description: "Read commands from standard input until end of stream",
        },
        FlagDef {
            long: "--file",
            short: "-f",
            arity: FlagArity::RequiresValue,
            target: FlagTarget::File,
            description: "Read commands from a file",
        },
    ]
}

impl FlagDef {
    /// Check if this definition matches the bare flag (no inline value).
    pub fn matches(&self, arg: &str) -> bool {
        arg == self.long || arg == self.short
    }

    /// Extract the inline value from `--flag=value` or `-f=value`.
    ///
    /// Only flags that take a value accept the inline form.
    pub fn inline_value<'a>(&self, arg: &'a str) -> Option<&'a str> {
        if self.arity != FlagArity::RequiresValue {
            return None;
        }
        [self.long, self.short].iter().find_map(|form| {
            arg.strip_prefix(form)
                .and_then(|rest| rest.strip_prefix('='))
        })
    }
}

/// Render the usage text from the registry.
pub fn usage() -> String {
    let mut text = String::from("Usage: shellboot [OPTIONS] [COMMAND...]\n\nOptions:\n");
    for def in flag_registry() {
        let form = match def.arity {
            FlagArity::NoValue => format!("{}, {}", def.short, def.long),
            FlagArity::RequiresValue => format!("{0}, {1} <PATH>, {1}=<PATH>", def.short, def.long),
        };
        text.push_str(&format!("  {:<36} {}\n", form, def.description));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_value_accepts_both_forms() {
        let registry = flag_registry();
        let file = registry
            .iter()
            .find(|d| d.target == FlagTarget::File)
            .unwrap();
        assert_eq!(file.inline_value("--file=a.txt"), Some("a.txt"));
        assert_eq!(file.inline_value("-f=a.txt"), Some("a.txt"));
        assert_eq!(file.inline_value("-f="), Some(""));
        assert_eq!(file.inline_value("--filex=a.txt"), None);
        assert_eq!(file.inline_value("--file"), None);
    }

    #[test]
    fn batch_has_no_inline_form() {
        let registry = flag_registry();
        let batch = registry
            .iter()
            .find(|d| d.target == FlagTarget::Batch)
            .unwrap();
        assert!(batch.matches("-b"));
        assert!(batch.matches("--batch"));
        assert_eq!(batch.inline_value("--batch=yes"), None);
    }

    #[test]
    fn usage_lists_every_flag() {
        let text = usage();
        for def in flag_registry() {
            assert!(text.contains(def.long));
            assert!(text.contains(def.description));
        }
    }
}
