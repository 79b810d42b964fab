//! Commands compiled into the shell.

use std::sync::Arc;

use anyhow::bail;

use crate::shell::command::{Command, CommandType};
use crate::shell::session::Session;

pub const SCOPE: &str = "shell";

/// Every built-in command type, in catalog order.
pub fn builtin_types() -> Vec<CommandType> {
    vec![
        CommandType::new("shell.builtin.Echo", SCOPE, "echo", "Print the arguments", || {
            Arc::new(Echo) as Arc<dyn Command>
        }),
        CommandType::new("shell.builtin.Help", SCOPE, "help", "List available commands", || {
            Arc::new(Help) as Arc<dyn Command>
        }),
        CommandType::new(
            "shell.builtin.Set",
            SCOPE,
            "set",
            "Show session variables or set one",
            || Arc::new(Set) as Arc<dyn Command>,
        ),
        CommandType::new("shell.builtin.Exit", SCOPE, "exit", "Leave the shell", || {
            Arc::new(Exit) as Arc<dyn Command>
        }),
    ]
}

struct Echo;

impl Command for Echo {
    fn execute(&self, session: &mut Session, args: &[String]) -> anyhow::Result<()> {
        writeln!(session.out(), "{}", args.join(" "))?;
        Ok(())
    }
}

struct Help;

impl Command for Help {
    fn execute(&self, session: &mut Session, _args: &[String]) -> anyhow::Result<()> {
        let width = session.terminal().width() as usize;
        let multi_scope = session.is_multi_scope();
        let lines: Vec<String> = session
            .registry()
            .commands()
            .iter()
            .map(|entry| {
                let name = if multi_scope {
                    entry.key()
                } else {
                    entry.name.clone()
                };
                let mut line = format!("  {:<24} {}", name, entry.description);
                if width > 0 && line.chars().count() > width {
                    line = line.chars().take(width).collect();
                }
                line
            })
            .collect();

        let out = session.out();
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

struct Set;

impl Command for Set {
    fn execute(&self, session: &mut Session, args: &[String]) -> anyhow::Result<()> {
        match args {
            [] => {
                let lines: Vec<String> = session
                    .variables()
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                let out = session.out();
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
            }
            [key, value @ ..] if !value.is_empty() => {
                session.put(key.clone(), value.join(" "));
            }
            _ => bail!("usage: set [NAME VALUE...]"),
        }
        Ok(())
    }
}

struct Exit;

impl Command for Exit {
    fn execute(&self, session: &mut Session, _args: &[String]) -> anyhow::Result<()> {
        session.close();
        Ok(())
    }
}
